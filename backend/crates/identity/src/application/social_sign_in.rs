//! Social Sign In Use Case
//!
//! Both VK flows end in the same find-or-create step: reuse the user who
//! owns the identity, or create the user and its link together.

use std::sync::Arc;

use crate::application::sign_in::SignedIn;
use crate::application::social::{LaunchParamsVerifier, verify_access_token};
use crate::application::token::TokenCodec;
use crate::domain::entity::user::User;
use crate::domain::provider::TokenIntrospector;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::social_identity::ProviderIdentity;
use crate::error::AuthResult;

/// Find the user linked to `identity`, creating one on first sight
///
/// A concurrent first login for the same identity is settled inside
/// `create_social_user`, so both callers end up with the same user.
pub async fn link_identity<S: IdentityStore>(
    store: &S,
    identity: &ProviderIdentity,
) -> AuthResult<User> {
    if let Some(user) = store.social_user_by_identity(identity).await? {
        return Ok(user);
    }

    let user = store.create_social_user(identity).await?;
    tracing::info!(user_id = %user.user_id, identity = %identity, "Social identity linked");

    Ok(user)
}

/// Social sign in use case
pub struct SocialSignInUseCase<S, P>
where
    S: IdentityStore,
    P: TokenIntrospector,
{
    store: Arc<S>,
    provider: Arc<P>,
    launch_params: Arc<LaunchParamsVerifier>,
    tokens: Arc<TokenCodec>,
}

impl<S, P> SocialSignInUseCase<S, P>
where
    S: IdentityStore,
    P: TokenIntrospector,
{
    pub fn new(
        store: Arc<S>,
        provider: Arc<P>,
        launch_params: Arc<LaunchParamsVerifier>,
        tokens: Arc<TokenCodec>,
    ) -> Self {
        Self {
            store,
            provider,
            launch_params,
            tokens,
        }
    }

    /// Login with a VK user access token
    pub async fn with_access_token(&self, access_token: &str) -> AuthResult<SignedIn> {
        let identity = verify_access_token(self.provider.as_ref(), access_token).await?;
        self.sign_in(&identity).await
    }

    /// Login with signed VK launch params
    pub async fn with_launch_params(&self, payload: &str) -> AuthResult<SignedIn> {
        let identity = self.launch_params.verify(payload)?;
        self.sign_in(&identity).await
    }

    async fn sign_in(&self, identity: &ProviderIdentity) -> AuthResult<SignedIn> {
        let user = link_identity(self.store.as_ref(), identity).await?;

        tracing::info!(user_id = %user.user_id, provider = %identity.provider, "User signed in");

        SignedIn::issue(user, &self.tokens)
    }
}
