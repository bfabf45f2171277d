//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary that every backend crate agrees on:
//! - The unified error type and its classification
//! - Typed numeric identifiers assigned by the store
//!
//! Only things whose meaning is stable across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
