//! Process Configuration
//!
//! Everything the binary needs, read once from the environment at startup.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use identity::{AuthConfig, SuperAdminConfig, VkConfig};

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_POOL_MAX: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub pg_pool_max: u32,
    pub http_port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub superadmin: SuperAdminConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let vars = Vars(&lookup);

        let token_secret = match vars.get("JWT_TOKEN_SECRET") {
            Some(secret) if !secret.is_empty() => secret.into_bytes(),
            _ if cfg!(debug_assertions) => {
                tracing::warn!("JWT_TOKEN_SECRET not set, using a random development secret");
                AuthConfig::development().token_secret
            }
            _ => bail!("JWT_TOKEN_SECRET must be set"),
        };

        let vk_defaults = VkConfig::default();
        let vk = VkConfig {
            service_key: vars.required("VK_SERVICE_KEY")?,
            launch_params_secret: vars.required("VK_PRIVATE_KEY")?,
            api_base_url: vars.get("VK_API_BASE_URL").unwrap_or(vk_defaults.api_base_url),
            api_version: vars.get("VK_API_VERSION").unwrap_or(vk_defaults.api_version),
        };

        let auth = AuthConfig {
            token_secret,
            token_ttl: Duration::from_secs(
                vars.parsed("JWT_TOKEN_TTL_SECS", AuthConfig::default().token_ttl.as_secs())?,
            ),
            password_pepper: vars.get("PASSWORD_PEPPER").map(String::into_bytes),
            vk,
        };

        let superadmin = SuperAdminConfig {
            email: vars.required("SUPER_ADMIN_EMAIL")?,
            password: vars.required("SUPER_ADMIN_PASSWORD")?,
        };

        let frontend_origins = vars
            .get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url: vars.required("DATABASE_URL")?,
            pg_pool_max: vars.parsed("PG_POOL_MAX", DEFAULT_POOL_MAX)?,
            http_port: vars.parsed("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            frontend_origins,
            auth,
            superadmin,
        })
    }
}

struct Vars<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }

    fn required(&self, name: &str) -> anyhow::Result<String> {
        self.get(name)
            .filter(|value| !value.is_empty())
            .with_context(|| format!("{name} must be set"))
    }

    fn parsed<T>(&self, name: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.get(name) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("{name} has an invalid value: {raw}")),
            None => Ok(default),
        }
    }
}
