//! Dining Table Repository

use super::{Collection, Document};
use shared::models::Table;

impl Document for Table {
    const TABLE: &'static str = "dining_tables";
    const ID_FIELD: &'static str = "table_id";
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["table_id", "table_number", "capacity", "created_at", "updated_at"];

    fn business_id(&self) -> &str {
        &self.table_id
    }
}

pub type TableRepository = Collection<Table>;
