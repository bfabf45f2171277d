//! Launch Params Verification
//!
//! VK Mini Apps hand the embedded app a query string of `vk_*` fields plus
//! a `sign` field. `sign` is the URL-safe, unpadded base64 HMAC-SHA256 of
//! the canonical string built from the `vk_*` fields, keyed with the app
//! secret. The canonical form must match VK byte for byte.

use std::collections::BTreeMap;

use platform::crypto::{constant_time_eq, hmac_sha256, to_base64_url};

use crate::application::config::VkConfig;
use crate::domain::value_object::social_identity::ProviderIdentity;
use crate::error::{AuthError, AuthResult};

const PARAM_PREFIX: &str = "vk_";
const SIGN_KEY: &str = "sign";
const USER_ID_KEY: &str = "vk_user_id";

#[derive(Clone)]
pub struct LaunchParamsVerifier {
    secret: Vec<u8>,
}

impl std::fmt::Debug for LaunchParamsVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchParamsVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl LaunchParamsVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn from_config(config: &VkConfig) -> Self {
        Self::new(config.launch_params_secret.as_bytes())
    }

    /// Check the payload signature and return the signed VK identity
    ///
    /// Every failure, including a missing `sign` or an unparseable
    /// `vk_user_id`, is `BadLaunchParams`.
    pub fn verify(&self, payload: &str) -> AuthResult<ProviderIdentity> {
        let pairs = parse_query(payload)?;

        let mut signed = BTreeMap::new();
        let mut sign = None;
        for (key, value) in pairs {
            if key == SIGN_KEY {
                sign.get_or_insert(value);
            } else if key.starts_with(PARAM_PREFIX) {
                signed.entry(key).or_insert(value);
            }
        }

        let sign = sign.ok_or(AuthError::BadLaunchParams)?;
        let mac = hmac_sha256(&self.secret, canonical_string(&signed).as_bytes());
        let expected = to_base64_url(&mac);
        if !constant_time_eq(expected.as_bytes(), sign.as_bytes()) {
            return Err(AuthError::BadLaunchParams);
        }

        let user_id = signed
            .get(USER_ID_KEY)
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or(AuthError::BadLaunchParams)?;

        Ok(ProviderIdentity::vk(user_id))
    }
}

/// `key=value` pairs joined by `&`, in byte-wise key order
fn canonical_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", query_escape(k), query_escape(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Form-style escaping: unreserved bytes kept, space as `+`, rest `%XX`
fn query_escape(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

fn parse_query(payload: &str) -> AuthResult<Vec<(String, String)>> {
    let payload = payload.trim().trim_start_matches('?');

    payload
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            Ok((query_unescape(key)?, query_unescape(value)?))
        })
        .collect()
}

fn query_unescape(s: &str) -> AuthResult<String> {
    let s = s.replace('+', " ");
    urlencoding::decode(&s)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| AuthError::BadLaunchParams)
}
