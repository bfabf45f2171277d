//! Admin Management Use Case
//!
//! Superadmin-only surface. Gating happens at the route, not here.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{
    email::Email,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

/// Create admin input
pub struct CreateAdminInput {
    pub email: String,
    pub password: String,
}

/// Admin management use case
pub struct AdminUseCase<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> AdminUseCase<S>
where
    S: IdentityStore,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.store.list_admins().await
    }

    /// Same uniqueness rules as registration, role fixed to `admin`
    pub async fn create(&self, input: CreateAdminInput) -> AuthResult<User> {
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let admin = self.store.save_admin(&email, &password_hash).await?;

        tracing::info!(user_id = %admin.user_id, "Admin created");

        Ok(admin)
    }

    /// Idempotent: an unknown ID succeeds without effect
    pub async fn delete(&self, user_id: UserId) -> AuthResult<()> {
        let removed = self.store.delete_admin(user_id).await?;

        if removed {
            tracing::info!(user_id = %user_id, "Admin deleted");
        } else {
            tracing::debug!(user_id = %user_id, "No admin to delete");
        }

        Ok(())
    }
}
