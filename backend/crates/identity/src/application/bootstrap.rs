//! Superadmin Bootstrap
//!
//! Runs once before the service accepts traffic. Any error returned here
//! must abort startup.

use crate::application::config::SuperAdminConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

/// Replace whatever superadmin exists with the operator-supplied one
pub async fn bootstrap_superadmin<S: IdentityStore>(
    store: &S,
    config: &SuperAdminConfig,
    pepper: Option<&[u8]>,
) -> AuthResult<User> {
    let email = Email::new(config.email.as_str())?;
    let raw_password = RawPassword::new(config.password.as_str())?;
    let password_hash = UserPassword::from_raw(&raw_password, pepper)?;

    let superadmin = store.replace_superadmin(&email, &password_hash).await?;

    tracing::info!(user_id = %superadmin.user_id, "Superadmin installed");

    Ok(superadmin)
}
