//! Application Configuration
//!
//! Secrets and tunables are passed in explicitly; nothing here reads the
//! process environment.

use std::fmt;
use std::time::Duration;

/// Identity application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for session tokens
    pub token_secret: Vec<u8>,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    pub vk: VkConfig,
}

/// VK provider settings
#[derive(Clone)]
pub struct VkConfig {
    /// Service key used as `access_token` for token introspection
    pub service_key: String,
    /// App secret used to sign launch params
    pub launch_params_secret: String,
    pub api_base_url: String,
    pub api_version: String,
}

/// Operator-supplied superadmin credentials, installed at every start
#[derive(Clone)]
pub struct SuperAdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for VkConfig {
    fn default() -> Self {
        Self {
            service_key: String::new(),
            launch_params_secret: String::new(),
            api_base_url: "https://api.vk.com".to_string(),
            api_version: "5.101".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: Duration::from_secs(24 * 3600), // 1 day
            password_pepper: None,
            vk: VkConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn development() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("vk", &self.vk)
            .finish()
    }
}

impl fmt::Debug for VkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VkConfig")
            .field("service_key", &"[REDACTED]")
            .field("launch_params_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl fmt::Debug for SuperAdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperAdminConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
