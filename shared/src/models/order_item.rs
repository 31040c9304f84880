//! Order Item Model

use crate::patch::Patch;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order item entity (one line of an order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub food_id: String,
    pub quantity: i32,
    /// Always stored rounded to 2 decimal places
    pub unit_price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One line of an order-item batch.
///
/// Fields are optional on the wire so a missing field is reported as a
/// validation failure of that line instead of a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    #[validate(required, length(min = 1, message = "food_id is required"))]
    pub food_id: Option<String>,
    #[validate(required, range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i32>,
    #[validate(required, range(min = 0.0, message = "unit_price must not be negative"))]
    pub unit_price: Option<f64>,
}

/// Batch creation payload: one new order plus its items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemPack {
    pub table_id: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItemInput>,
}

/// Result of a batch creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemBatch {
    pub order_id: String,
    pub inserted_ids: Vec<String>,
    pub items: Vec<OrderItem>,
}

/// Update order item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItemUpdate {
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub food_id: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub quantity: Patch<i32>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub unit_price: Patch<f64>,
}
