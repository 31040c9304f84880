//! Food Model

use crate::patch::Patch;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Food entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub food_id: String,
    pub name: String,
    /// Always stored rounded to 2 decimal places
    pub price: f64,
    pub food_image: Option<String>,
    pub menu_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create food payload
///
/// Either `menu_id` or `category` must be given. With only a category the
/// menu of that category is looked up, and created when missing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(max = 2048))]
    pub food_image: Option<String>,
    pub menu_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub category: Option<String>,
}

/// Update food payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodUpdate {
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub price: Patch<f64>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub food_image: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_missing")]
    pub menu_id: Patch<String>,
}
