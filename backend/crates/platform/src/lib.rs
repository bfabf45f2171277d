//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (HMAC-SHA256, URL-safe Base64, constant-time compare)
//! - Password hashing (Argon2id, PHC string format)

pub mod crypto;
pub mod password;
