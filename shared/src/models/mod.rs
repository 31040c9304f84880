//! Data models
//!
//! Shared between restaurant-server and its clients (via API).
//! Every entity carries a business identifier (`<entity>_id`, 32-char hex)
//! and Unix-millisecond `created_at` / `updated_at` stamps.

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

// Re-exports
pub use food::*;
pub use invoice::*;
pub use menu::*;
pub use order::*;
pub use order_item::*;
pub use table::*;
pub use user::*;
