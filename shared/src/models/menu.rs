//! Menu Model

use crate::patch::Patch;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub menu_id: String,
    pub name: String,
    pub category: String,
    /// Availability window start (Unix millis)
    pub start_date: Option<i64>,
    /// Availability window end (Unix millis)
    pub end_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub category: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuUpdate {
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub category: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub start_date: Patch<i64>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub end_date: Patch<i64>,
}
