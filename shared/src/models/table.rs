//! Dining Table Model

use crate::patch::Patch;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub table_id: String,
    pub table_number: i32,
    /// Number of guests
    pub capacity: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TableCreate {
    #[validate(range(min = 0))]
    pub table_number: i32,
    #[validate(range(min = 1))]
    pub capacity: i32,
}

/// Update table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub table_number: Patch<i32>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub capacity: Patch<i32>,
}
