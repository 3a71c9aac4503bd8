/// Account capability traits
///
/// An authenticatable account combines two independent capability sets:
///
/// - [`CredentialHolder`]: a login identifier plus a stored password credential
/// - [`PermissionHolder`]: the active/staff/superuser status flags
///
/// Entities implement both traits instead of inheriting from a base account type.

use super::password::{is_password_usable, make_password, PasswordError, PasswordHasher};

/// Something that can log in with an identifier and a password
pub trait CredentialHolder {
    /// Name of the field used as the login identifier
    const USERNAME_FIELD: &'static str;

    /// Fields (besides the identifier and password) required to create an account
    const REQUIRED_FIELDS: &'static [&'static str];

    /// The login identifier value
    fn username(&self) -> &str;

    /// The stored credential (hash or unusable sentinel)
    fn password_hash(&self) -> &str;

    /// Replaces the stored credential
    fn set_password_hash(&mut self, hash: String);

    /// Hashes and stores a new password
    ///
    /// `None` stores an unusable-password sentinel, locking password login.
    fn set_password(
        &mut self,
        hasher: &dyn PasswordHasher,
        password: Option<&str>,
    ) -> Result<(), PasswordError> {
        let hash = make_password(hasher, password)?;
        self.set_password_hash(hash);
        Ok(())
    }

    /// Locks password login for this account
    fn set_unusable_password(&mut self) {
        self.set_password_hash(super::password::make_unusable_password());
    }

    /// Whether the stored credential can ever verify
    fn has_usable_password(&self) -> bool {
        is_password_usable(self.password_hash())
    }

    /// Checks a plaintext password against the stored credential
    ///
    /// Unusable credentials return `Ok(false)` without consulting the hasher.
    fn check_password(
        &self,
        hasher: &dyn PasswordHasher,
        password: &str,
    ) -> Result<bool, PasswordError> {
        if !self.has_usable_password() {
            return Ok(false);
        }
        hasher.verify(password, self.password_hash())
    }
}

/// Something carrying account status flags
pub trait PermissionHolder {
    fn is_active(&self) -> bool;

    fn is_staff(&self) -> bool;

    fn is_superuser(&self) -> bool;

    /// Whether this account holds the named permission
    ///
    /// There are no per-account permission grants: an active superuser holds
    /// every permission and every other account holds none.
    fn has_perm(&self, _perm: &str) -> bool {
        self.is_active() && self.is_superuser()
    }

    /// Whether this account holds all of the named permissions
    fn has_perms(&self, perms: &[&str]) -> bool {
        perms.iter().all(|perm| self.has_perm(perm))
    }

    /// Whether this account may access the admin console
    fn can_access_admin(&self) -> bool {
        self.is_active() && self.is_staff()
    }
}
