/// Password hashing capability
///
/// Profiles never store plaintext passwords. The [`PasswordHasher`] trait is the
/// seam through which the account manager derives and checks credentials, so
/// callers decide which hasher (and which cost parameters) a deployment uses.
///
/// # Algorithms
///
/// - [`Argon2Hasher`]: Argon2id, PHC string output (default)
///
/// # Unusable passwords
///
/// Accounts created without a password receive a sentinel produced by
/// [`make_unusable_password`]: a `!` followed by 40 random alphanumeric
/// characters. The sentinel never parses as a PHC hash, so no input can ever
/// verify against it.
///
/// # Example
///
/// ```
/// use profiles_core::auth::password::{Argon2Hasher, PasswordHasher};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("super_secret_password_123")?;
///
/// assert!(hasher.verify("super_secret_password_123", &hash)?);
/// assert!(!hasher.verify("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2, ParamsBuilder, Version,
};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

/// Prefix marking a password that can never be used to log in
pub const UNUSABLE_PASSWORD_PREFIX: &str = "!";

/// Number of random characters following [`UNUSABLE_PASSWORD_PREFIX`]
pub const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// One-way credential transform
///
/// Implementations must be deterministic in verification and non-invertible in
/// hashing. `verify` returns `Ok(false)` for a wrong password and reserves
/// `Err` for malformed hashes or internal failures.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Verifies a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id cost parameters
///
/// Deserializable so deployments can tune cost from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,

    /// Hash output length in bytes
    pub output_len: usize,
}

impl Default for PasswordParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536, // 64 MB
            iterations: 3,
            parallelism: 4,
            output_len: 32,
        }
    }
}

/// Argon2id password hasher
///
/// Produces PHC strings such as:
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// Verification reads the parameters embedded in the hash, so changing
/// [`PasswordParams`] does not invalidate existing credentials.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: PasswordParams,
}

impl Argon2Hasher {
    /// Creates a hasher with explicit cost parameters
    pub fn with_params(params: PasswordParams) -> Self {
        Self { params }
    }

    /// Returns the configured cost parameters
    pub fn params(&self) -> PasswordParams {
        self.params
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = ParamsBuilder::new()
            .m_cost(self.params.memory_kib)
            .t_cost(self.params.iterations)
            .p_cost(self.params.parallelism)
            .output_len(self.params.output_len)
            .build()
            .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

        Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

        Ok(password_hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

        argon2::Algorithm::new(parsed_hash.algorithm.as_str()).map_err(|_| {
            PasswordError::InvalidHash(format!("Unsupported algorithm: {}", parsed_hash.algorithm))
        })?;

        if parsed_hash.hash.is_none() {
            return Err(PasswordError::InvalidHash("Missing hash output".to_string()));
        }

        // Parameters come from the hash itself
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
        }
    }
}

/// Generates a fresh unusable-password sentinel
pub fn make_unusable_password() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UNUSABLE_PASSWORD_SUFFIX_LENGTH)
        .map(char::from)
        .collect();

    format!("{}{}", UNUSABLE_PASSWORD_PREFIX, suffix)
}

/// Returns false for unusable-password sentinels
pub fn is_password_usable(stored: &str) -> bool {
    !stored.starts_with(UNUSABLE_PASSWORD_PREFIX)
}

/// Derives the stored credential for an optional plaintext password
///
/// `None` yields an unusable-password sentinel instead of a hash.
pub fn make_password(
    hasher: &dyn PasswordHasher,
    password: Option<&str>,
) -> Result<String, PasswordError> {
    match password {
        Some(raw) => hasher.hash(raw),
        None => Ok(make_unusable_password()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low-cost parameters keep the suite fast; the defaults are asserted separately.
    fn fast_hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(PasswordParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            output_len: 32,
        })
    }

    #[test]
    fn test_default_params() {
        let params = PasswordParams::default();
        assert_eq!(params.memory_kib, 65536);
        assert_eq!(params.iterations, 3);
        assert_eq!(params.parallelism, 4);
        assert_eq!(params.output_len, 32);
    }

    #[test]
    fn test_hash_embeds_configured_params() {
        let hash = Argon2Hasher::default()
            .hash("test_password_123")
            .expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = fast_hasher().hash("plaintext").expect("Hash should succeed");
        assert_ne!(hash, "plaintext");
        assert!(!hash.contains("plaintext"));
    }

    #[test]
    fn test_hash_produces_different_salts() {
        let hasher = fast_hasher();
        let hash1 = hasher.hash("same_password").expect("Hash 1 should succeed");
        let hash2 = hasher.hash("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_correct_and_incorrect() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct_password").expect("Hash should succeed");

        assert!(hasher.verify("correct_password", &hash).expect("Verify should succeed"));
        assert!(!hasher.verify("wrong_password", &hash).expect("Verify should succeed"));
        assert!(!hasher.verify("", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_across_param_sets() {
        let hash = fast_hasher().hash("portable").expect("Hash should succeed");
        let verified = Argon2Hasher::default()
            .verify("portable", &hash)
            .expect("Verify should succeed");
        assert!(verified);
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        assert!(hasher.verify("password", "invalid_hash").is_err());
        assert!(hasher.verify("password", "$argon2id$invalid").is_err());
    }

    #[test]
    fn test_verify_rejects_truncated_and_foreign_hashes() {
        let hasher = fast_hasher();
        let hash = hasher.hash("password").expect("Hash should succeed");

        let (without_output, _) = hash.rsplit_once('$').expect("PHC string has fields");
        assert!(matches!(
            hasher.verify("password", without_output),
            Err(PasswordError::InvalidHash(_))
        ));

        let foreign = hash.replacen("$argon2id$", "$scrypt$", 1);
        assert!(matches!(
            hasher.verify("password", &foreign),
            Err(PasswordError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_invalid_params_fail_to_hash() {
        let hasher = Argon2Hasher::with_params(PasswordParams {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
            output_len: 32,
        });

        assert!(matches!(hasher.hash("password"), Err(PasswordError::HashError(_))));
    }

    #[test]
    fn test_unusable_password_shape() {
        let sentinel = make_unusable_password();

        assert!(sentinel.starts_with(UNUSABLE_PASSWORD_PREFIX));
        assert_eq!(sentinel.len(), 1 + UNUSABLE_PASSWORD_SUFFIX_LENGTH);
        assert!(sentinel[1..].chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!is_password_usable(&sentinel));
        assert_ne!(sentinel, make_unusable_password());
    }

    #[test]
    fn test_unusable_password_never_verifies() {
        let sentinel = make_unusable_password();
        assert!(fast_hasher().verify("", &sentinel).is_err());
    }

    #[test]
    fn test_make_password() {
        let hasher = fast_hasher();

        let hashed = make_password(&hasher, Some("secret")).expect("Hash should succeed");
        assert!(is_password_usable(&hashed));
        assert!(hasher.verify("secret", &hashed).expect("Verify should succeed"));

        let unusable = make_password(&hasher, None).expect("Sentinel should succeed");
        assert!(!is_password_usable(&unusable));
    }
}
