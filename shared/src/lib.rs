//! Shared types for the restaurant backend
//!
//! Entity models, request payloads, pagination and write-result types,
//! the unified error system and small utilities used by the server and
//! its clients.

pub mod error;
pub mod models;
pub mod patch;
pub mod types;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use patch::{Patch, PatchDoc};
pub use types::{Page, PageRequest};
