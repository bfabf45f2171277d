//! Domain Layer
//!
//! Entities, value objects, and the contracts the core needs from the
//! outside world (identity store, provider introspection).

pub mod entity;
pub mod provider;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{social_login::SocialLogin, user::User};
pub use provider::{TokenCheck, TokenIntrospector};
pub use repository::IdentityStore;
