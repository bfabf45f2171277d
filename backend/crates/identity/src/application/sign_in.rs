//! Sign In Use Case
//!
//! Email + password login. Lookup failure and password mismatch stay
//! distinct outcomes.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::entity::user::User;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Authenticated user plus a freshly minted session token
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: String,
}

impl SignedIn {
    pub(crate) fn issue(user: User, tokens: &TokenCodec) -> AuthResult<Self> {
        let token = tokens.issue(user.user_id, user.user_role)?;
        Ok(Self { user, token })
    }
}

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<S> SignInUseCase<S>
where
    S: IdentityStore,
{
    pub fn new(store: Arc<S>, tokens: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignedIn> {
        // A malformed address cannot belong to anyone
        let email = Email::new(input.email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .store
            .user_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password_hash = user
            .password_hash
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !password_hash.verify(&raw_password, self.config.pepper())? {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.user_id, role = %user.user_role, "User signed in");

        SignedIn::issue(user, &self.tokens)
    }
}
