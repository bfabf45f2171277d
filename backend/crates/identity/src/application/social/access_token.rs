//! Access Token Delegation
//!
//! Turns the provider's token-check envelope into a verified identity.

use chrono::Utc;

use crate::domain::provider::{TokenCheck, TokenIntrospector};
use crate::domain::value_object::social_identity::ProviderIdentity;
use crate::error::{AuthError, AuthResult};

/// Provider message for an unknown or revoked token
pub const INVALID_TOKEN_MSG: &str = "Access denied: invalid token";
/// Provider message for a token whose session is over
pub const EXPIRED_TOKEN_MSG: &str = "Access denied: token expired";

/// Ask the provider about `access_token` and interpret the answer
pub async fn verify_access_token<P: TokenIntrospector>(
    provider: &P,
    access_token: &str,
) -> AuthResult<ProviderIdentity> {
    if access_token.trim().is_empty() {
        return Err(AuthError::BadProviderToken);
    }

    let check = provider.check_token(access_token).await?;
    interpret(check, Utc::now().timestamp())
}

pub(crate) fn interpret(check: TokenCheck, now: i64) -> AuthResult<ProviderIdentity> {
    if let Some(error) = check.error {
        return match error.error_msg.as_str() {
            INVALID_TOKEN_MSG => Err(AuthError::BadProviderToken),
            EXPIRED_TOKEN_MSG => Err(AuthError::ProviderTokenExpired),
            other => Err(AuthError::Provider(format!(
                "token check failed with code {}: {other}",
                error.error_code
            ))),
        };
    }

    let info = check
        .response
        .ok_or_else(|| AuthError::Provider("token check returned an empty envelope".into()))?;

    if info.success != 1 || info.user_id == 0 {
        return Err(AuthError::BadProviderToken);
    }
    if info.expire != 0 && info.expire < now {
        return Err(AuthError::ProviderTokenExpired);
    }

    Ok(ProviderIdentity::vk(info.user_id))
}
