//! User Entity
//!
//! Identity record. Credentials and linked social identities live on the
//! same record; the store assigns the numeric ID.

use crate::domain::entity::social_login::SocialLogin;
use crate::domain::value_object::{
    email::Email, social_identity::SocialProvider, user_id::UserId, user_password::UserPassword,
    user_role::UserRole,
};

/// User entity
///
/// Invariant: at least one authentication method, either an email + hash
/// pair or one or more linked social identities.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique when present
    pub email: Option<Email>,
    /// Present only for credential-based accounts
    pub password_hash: Option<UserPassword>,
    pub user_role: UserRole,
    /// Order is irrelevant
    pub social_logins: Vec<SocialLogin>,
}

impl User {
    /// Whether the record satisfies the authentication-method invariant
    pub fn has_auth_method(&self) -> bool {
        let has_credentials = self.email.is_some() && self.password_hash.is_some();
        has_credentials || !self.social_logins.is_empty()
    }

    /// Linked identity for a provider, if any
    pub fn social_login(&self, provider: SocialProvider) -> Option<&SocialLogin> {
        self.social_logins.iter().find(|s| s.provider == provider)
    }
}
