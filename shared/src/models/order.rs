//! Order Model

use crate::patch::Patch;
use serde::{Deserialize, Serialize};

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub table_id: Option<String>,
    pub order_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: Option<String>,
}

/// Update order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderUpdate {
    /// `null` detaches the order from its table
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub table_id: Patch<String>,
}
