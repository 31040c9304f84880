//! Order Repository

use super::{Collection, Document};
use shared::models::Order;

impl Document for Order {
    const TABLE: &'static str = "orders";
    const ID_FIELD: &'static str = "order_id";
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["order_id", "order_date", "created_at", "updated_at"];

    fn business_id(&self) -> &str {
        &self.order_id
    }
}

pub type OrderRepository = Collection<Order>;
