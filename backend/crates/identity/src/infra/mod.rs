//! Infrastructure Layer
//!
//! Identity store implementations and the VK API client.

pub mod memory;
pub mod postgres;
pub mod vk_api;

pub use memory::MemoryIdentityStore;
pub use postgres::PgIdentityStore;
pub use vk_api::VkApiClient;
