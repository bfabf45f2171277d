//! Social Identity Value Objects
//!
//! An external identity is the pair (provider, provider-side subject id).
//! The pair is unique across the whole system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Vk,
}

impl SocialProvider {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            SocialProvider::Vk => "vk",
        }
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "vk" => Ok(SocialProvider::Vk),
            other => Err(format!("Unknown social provider: {other}")),
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verified external identity, produced by a provider check
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderIdentity {
    pub provider: SocialProvider,
    pub subject_id: String,
}

impl ProviderIdentity {
    pub fn vk(user_id: i64) -> Self {
        Self {
            provider: SocialProvider::Vk,
            subject_id: user_id.to_string(),
        }
    }
}

impl fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.subject_id)
    }
}
