//! Access Control Middleware
//!
//! Axum adapters for the two access gates. Mount `require_auth` outside
//! `require_roles`; each short-circuits with an error response.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::access::{AuthContext, authenticate, authorize};
use crate::application::token::TokenCodec;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;

/// Role set for superadmin-only routes
pub const SUPERADMIN_ONLY: &[UserRole] = &[UserRole::SuperAdmin];

/// Verify the bearer token and attach [`AuthContext`] to the request
pub async fn require_auth(
    State(tokens): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::BadTokenFormat)?),
        None => None,
    };

    let ctx = authenticate(header, &tokens)?;
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Reject callers whose role is not in `allowed`
pub async fn require_roles(
    State(allowed): State<&'static [UserRole]>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let ctx = authorize(req.extensions().get::<AuthContext>(), allowed)?;

    tracing::debug!(user_id = %ctx.user_id, role = %ctx.role, "Role check passed");

    Ok(next.run(req).await)
}
