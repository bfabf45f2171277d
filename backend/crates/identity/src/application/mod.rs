//! Application Layer
//!
//! Use cases and application services.

pub mod access;
pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod profile;
pub mod register;
pub mod sign_in;
pub mod social;
pub mod social_sign_in;
pub mod token;

// Re-exports
pub use access::{AuthContext, authenticate, authorize};
pub use admin::{AdminUseCase, CreateAdminInput};
pub use bootstrap::bootstrap_superadmin;
pub use config::{AuthConfig, SuperAdminConfig, VkConfig};
pub use profile::{VkProfile, VkProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use sign_in::{SignInInput, SignInUseCase, SignedIn};
pub use social::LaunchParamsVerifier;
pub use social_sign_in::{SocialSignInUseCase, link_identity};
pub use token::{SessionClaims, TokenCodec};
