//! VK Profile Lookup
//!
//! Resolves a local user ID to the VK user ID it is linked with.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{social_identity::SocialProvider, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VkProfile {
    pub user_id: UserId,
    pub vk_id: i64,
}

pub struct VkProfileUseCase<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
}

impl<S> VkProfileUseCase<S>
where
    S: IdentityStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// `UserNotFound` covers both an unknown user and a user with no VK link
    pub async fn execute(&self, user_id: UserId) -> AuthResult<VkProfile> {
        let user = self
            .store
            .user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let login = user
            .social_login(SocialProvider::Vk)
            .ok_or(AuthError::UserNotFound)?;

        let vk_id = login.subject_id.parse::<i64>().map_err(|_| {
            AuthError::Internal(format!("Stored VK subject id is not numeric: {}", login.subject_id))
        })?;

        Ok(VkProfile { user_id, vk_id })
    }
}
