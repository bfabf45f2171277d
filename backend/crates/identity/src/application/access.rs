//! Access Control
//!
//! Two gates in sequence. `authenticate` turns an `Authorization` header
//! into an [`AuthContext`]; `authorize` checks that context against the
//! roles a route accepts. The HTTP wiring lives in
//! `presentation::middleware`.

use std::sync::LazyLock;

use regex::Regex;

use crate::application::token::TokenCodec;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

static BEARER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Bearer\s([A-Za-z0-9\-._~+/]+=*)$").expect("bearer pattern is valid")
});

/// Verified caller identity attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Authentication gate
pub fn authenticate(header: Option<&str>, tokens: &TokenCodec) -> AuthResult<AuthContext> {
    let header = header.ok_or(AuthError::MissingToken)?;

    let token = BEARER
        .captures(header)
        .and_then(|caps| caps.get(1))
        .ok_or(AuthError::BadTokenFormat)?
        .as_str();

    let claims = tokens.verify(token)?;

    Ok(AuthContext {
        user_id: claims.user_id(),
        role: claims.role,
    })
}

/// Authorization gate
///
/// A missing context means the route was mounted without authentication
/// in front of it, which is a server misconfiguration.
pub fn authorize(ctx: Option<&AuthContext>, allowed: &[UserRole]) -> AuthResult<AuthContext> {
    let ctx = ctx.ok_or(AuthError::RoleContextMissing)?;

    if !allowed.contains(&ctx.role) {
        return Err(AuthError::Forbidden);
    }

    Ok(*ctx)
}
