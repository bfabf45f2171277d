//! VK API Client
//!
//! Calls `secure.checkToken` with the app's service key. The response
//! envelope is returned as-is; interpreting it is not this module's job.

use crate::application::config::VkConfig;
use crate::domain::provider::{TokenCheck, TokenIntrospector};
use crate::error::{AuthError, AuthResult};

const CHECK_TOKEN_METHOD: &str = "secure.checkToken";

#[derive(Clone)]
pub struct VkApiClient {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
    api_version: String,
}

impl VkApiClient {
    pub fn new(client: reqwest::Client, config: &VkConfig) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/method/{CHECK_TOKEN_METHOD}",
                config.api_base_url.trim_end_matches('/')
            ),
            service_key: config.service_key.clone(),
            api_version: config.api_version.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TokenIntrospector for VkApiClient {
    async fn check_token(&self, access_token: &str) -> AuthResult<TokenCheck> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("v", self.api_version.as_str()),
                ("access_token", self.service_key.as_str()),
                ("token", access_token),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Provider(format!(
                "{CHECK_TOKEN_METHOD} returned HTTP {status}"
            )));
        }

        let check = response.json::<TokenCheck>().await?;

        tracing::debug!(
            ok = check.response.is_some(),
            error_code = check.error.as_ref().map(|e| e.error_code),
            "VK token check answered"
        );

        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_config() {
        let config = VkConfig {
            api_base_url: "https://api.vk.com/".to_string(),
            ..Default::default()
        };
        let client = VkApiClient::new(reqwest::Client::new(), &config);
        assert_eq!(client.endpoint(), "https://api.vk.com/method/secure.checkToken");
    }
}
