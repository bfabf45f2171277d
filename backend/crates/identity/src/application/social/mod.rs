//! Social Signature Verification
//!
//! Two ways to prove a VK identity: a user access token checked against
//! the provider API, or launch params signed with the app secret.

pub mod access_token;
pub mod launch_params;

pub use access_token::verify_access_token;
pub use launch_params::LaunchParamsVerifier;
