//! Email normalization
//!
//! Profiles log in by email, so the stored address must be canonical. Only
//! the domain is canonicalized: domains are case-insensitive, while the
//! local part may be case-sensitive on the receiving server and is preserved
//! exactly.

/// Normalizes an email address by lower-casing its domain
///
/// Surrounding whitespace is trimmed and the address is split at the last
/// `@`. An input with no `@` is returned unchanged, whitespace included.
///
/// # Example
///
/// ```
/// use profiles_core::auth::email::normalize_email;
///
/// assert_eq!(normalize_email("John.Doe@EXAMPLE.Com"), "John.Doe@example.com");
/// assert_eq!(normalize_email("no-at-sign"), "no-at-sign");
/// ```
pub fn normalize_email(email: &str) -> String {
    match email.trim().rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
