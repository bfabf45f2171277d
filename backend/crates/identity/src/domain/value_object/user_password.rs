//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Maps platform errors into
//! identity errors and keeps clear text out of logs.

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Raw password from user input (zeroized on drop)
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw.into()).map_err(|e| match e {
            PasswordPolicyError::TooLong { .. }
            | PasswordPolicyError::EmptyOrWhitespace
            | PasswordPolicyError::InvalidCharacter => AuthError::Validation(e.to_string()),
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed user password for storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password; fails only with `HashingFailure`
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        Ok(Self(raw.0.hash(pepper)?))
    }

    /// Wrap a digest loaded from the store
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc_string))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `Ok(false)` on mismatch; `Err` only for a malformed stored digest
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<bool> {
        Ok(self.0.verify(&raw.0, pepper)?)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
