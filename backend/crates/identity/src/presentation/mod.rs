//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::IdentityState;
pub use middleware::{SUPERADMIN_ONLY, require_auth, require_roles};
pub use router::identity_router;
