//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{
    AdminUseCase, AuthConfig, AuthContext, CreateAdminInput, LaunchParamsVerifier, RegisterInput,
    RegisterUseCase, SignInInput, SignInUseCase, SocialSignInUseCase, TokenCodec, VkProfile,
    VkProfileUseCase,
};
use crate::domain::provider::TokenIntrospector;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CredentialsRequest, TokenResponse, UserResponse, VkAccessTokenRequest, VkLaunchParamsRequest,
};
use crate::presentation::extract::JsonBody;

/// Shared state for identity handlers
pub struct IdentityState<S, P> {
    pub store: Arc<S>,
    pub provider: Arc<P>,
    pub tokens: Arc<TokenCodec>,
    pub launch_params: Arc<LaunchParamsVerifier>,
    pub config: Arc<AuthConfig>,
}

impl<S, P> IdentityState<S, P> {
    pub fn new(store: S, provider: P, config: AuthConfig) -> Self {
        Self {
            store: Arc::new(store),
            provider: Arc::new(provider),
            tokens: Arc::new(TokenCodec::from_config(&config)),
            launch_params: Arc::new(LaunchParamsVerifier::from_config(&config.vk)),
            config: Arc::new(config),
        }
    }
}

// Manual impl: derive would demand `S: Clone, P: Clone`
impl<S, P> Clone for IdentityState<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            provider: self.provider.clone(),
            tokens: self.tokens.clone(),
            launch_params: self.launch_params.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, P> IdentityState<S, P>
where
    S: IdentityStore,
    P: TokenIntrospector,
{
    fn social(&self) -> SocialSignInUseCase<S, P> {
        SocialSignInUseCase::new(
            self.store.clone(),
            self.provider.clone(),
            self.launch_params.clone(),
            self.tokens.clone(),
        )
    }
}

fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse::<UserId>()
        .map_err(|_| AuthError::Validation("Invalid ID".to_string()))
}

/// GET /healthz
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

// ============================================================================
// Credentials
// ============================================================================

/// POST /register
pub async fn register<S, P>(
    State(state): State<IdentityState<S, P>>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.store.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /login
pub async fn login<S, P>(
    State(state): State<IdentityState<S, P>>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.store.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let signed_in = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: signed_in.token,
    }))
}

// ============================================================================
// VK
// ============================================================================

/// POST /login/vk
pub async fn login_vk<S, P>(
    State(state): State<IdentityState<S, P>>,
    JsonBody(req): JsonBody<VkAccessTokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let signed_in = state
        .social()
        .with_access_token(&req.vk_access_token)
        .await?;

    Ok(Json(TokenResponse {
        token: signed_in.token,
    }))
}

/// POST /login/vk/launch
pub async fn login_vk_launch_params<S, P>(
    State(state): State<IdentityState<S, P>>,
    JsonBody(req): JsonBody<VkLaunchParamsRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let signed_in = state
        .social()
        .with_launch_params(&req.launch_params)
        .await?;

    Ok(Json(TokenResponse {
        token: signed_in.token,
    }))
}

/// GET /profile/{id}/vk
pub async fn vk_profile<S, P>(
    State(state): State<IdentityState<S, P>>,
    Path(id): Path<String>,
) -> AuthResult<Json<VkProfile>>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let profile = VkProfileUseCase::new(state.store.clone())
        .execute(user_id)
        .await?;

    Ok(Json(profile))
}

// ============================================================================
// Admin management (superadmin only)
// ============================================================================

/// GET /admin
pub async fn list_admins<S, P>(
    State(state): State<IdentityState<S, P>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let admins = AdminUseCase::new(state.store.clone(), state.config.clone())
        .list()
        .await?;

    Ok(Json(admins.iter().map(UserResponse::from).collect()))
}

/// POST /admin
pub async fn create_admin<S, P>(
    State(state): State<IdentityState<S, P>>,
    Extension(actor): Extension<AuthContext>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let admin = AdminUseCase::new(state.store.clone(), state.config.clone())
        .create(CreateAdminInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    tracing::info!(actor = %actor.user_id, user_id = %admin.user_id, "Admin created via API");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&admin))))
}

/// DELETE /admin/{id}
pub async fn delete_admin<S, P>(
    State(state): State<IdentityState<S, P>>,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
) -> AuthResult<StatusCode>
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    AdminUseCase::new(state.store.clone(), state.config.clone())
        .delete(user_id)
        .await?;

    tracing::info!(actor = %actor.user_id, user_id = %user_id, "Admin delete requested via API");

    Ok(StatusCode::NO_CONTENT)
}
