//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store and provider contracts
//! - `application/` - Use cases, token codec, access gates, bootstrap
//! - `infra/` - PostgreSQL and in-memory stores, VK API client
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Email + password registration and login
//! - VK login by user access token or by signed launch params
//! - Stateless HS256 session tokens carrying `{uid, role, exp}`
//! - Superadmin-only admin management, superadmin reinstalled at startup
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application-wide pepper
//! - Launch params signatures compared in constant time
//! - A VK identity links to exactly one user, enforced by the store

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, SuperAdminConfig, VkConfig};
pub use application::{bootstrap_superadmin, token::TokenCodec};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryIdentityStore, PgIdentityStore, VkApiClient};
pub use presentation::{IdentityState, identity_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
