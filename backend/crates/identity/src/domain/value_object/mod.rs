//! Value Object Module

pub mod email;
pub mod social_identity;
pub mod user_id;
pub mod user_password;
pub mod user_role;
