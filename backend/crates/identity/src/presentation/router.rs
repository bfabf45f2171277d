//! Identity Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};

use crate::domain::provider::TokenIntrospector;
use crate::domain::repository::IdentityStore;
use crate::presentation::handlers::{self, IdentityState};
use crate::presentation::middleware::{SUPERADMIN_ONLY, require_auth, require_roles};

/// Create the identity router for any store and provider implementation
///
/// Route layers run outermost-last, so authentication wraps the role check.
pub fn identity_router<S, P>(state: IdentityState<S, P>) -> Router
where
    S: IdentityStore + Send + Sync + 'static,
    P: TokenIntrospector + Send + Sync + 'static,
{
    let tokens = state.tokens.clone();

    let admin = Router::new()
        .route(
            "/",
            get(handlers::list_admins::<S, P>).post(handlers::create_admin::<S, P>),
        )
        .route("/{id}", delete(handlers::delete_admin::<S, P>))
        .route_layer(from_fn_with_state(SUPERADMIN_ONLY, require_roles))
        .route_layer(from_fn_with_state(tokens.clone(), require_auth));

    let profile = Router::new()
        .route("/{id}/vk", get(handlers::vk_profile::<S, P>))
        .route_layer(from_fn_with_state(tokens, require_auth));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/register", post(handlers::register::<S, P>))
        .route("/login", post(handlers::login::<S, P>))
        .route("/login/vk", post(handlers::login_vk::<S, P>))
        .route(
            "/login/vk/launch",
            post(handlers::login_vk_launch_params::<S, P>),
        )
        .nest("/admin", admin)
        .nest("/profile", profile)
        .with_state(state)
}
