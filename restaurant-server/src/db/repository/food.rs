//! Food Repository

use super::{Collection, Document};
use shared::models::Food;

impl Document for Food {
    const TABLE: &'static str = "foods";
    const ID_FIELD: &'static str = "food_id";
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["food_id", "name", "price", "menu_id", "created_at", "updated_at"];

    fn business_id(&self) -> &str {
        &self.food_id
    }
}

pub type FoodRepository = Collection<Food>;
