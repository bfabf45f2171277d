//! Provider Introspection Contract
//!
//! Wire shape of the provider's token-check response and the trait the
//! infrastructure client implements. Interpreting the envelope is an
//! application concern (`application::social`).

use serde::Deserialize;

use crate::error::AuthResult;

/// `{"response": {...}}` or `{"error": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenCheck {
    #[serde(default)]
    pub response: Option<TokenInfo>,
    #[serde(default)]
    pub error: Option<ProviderApiError>,
}

/// Successful token-check payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub success: i64,
    /// Issue time (unix seconds)
    #[serde(default)]
    pub date: i64,
    /// Expiry (unix seconds); 0 means no expiry
    #[serde(default)]
    pub expire: i64,
    #[serde(default)]
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderApiError {
    pub error_code: i64,
    pub error_msg: String,
}

/// Provider token introspection
#[trait_variant::make(TokenIntrospector: Send)]
pub trait LocalTokenIntrospector {
    /// Ask the provider about a user access token
    ///
    /// Transport and decoding failures are `AuthError::Provider`.
    async fn check_token(&self, access_token: &str) -> AuthResult<TokenCheck>;
}
