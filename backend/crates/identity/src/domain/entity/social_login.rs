//! Social Login Entity
//!
//! Links one external-provider identity to exactly one User. Never mutated;
//! removed only by cascade when the owning User is deleted.

use crate::domain::value_object::{
    social_identity::{ProviderIdentity, SocialProvider},
    user_id::{SocialLoginId, UserId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLogin {
    pub social_login_id: SocialLoginId,
    /// Owning user
    pub user_id: UserId,
    pub provider: SocialProvider,
    /// Provider-side subject identifier
    pub subject_id: String,
}

impl SocialLogin {
    pub fn identity(&self) -> ProviderIdentity {
        ProviderIdentity {
            provider: self.provider,
            subject_id: self.subject_id.clone(),
        }
    }
}
