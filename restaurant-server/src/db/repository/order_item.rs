//! Order Item Repository

use super::{Collection, Document, RequestContext, RepoResult};
use shared::models::OrderItem;

impl Document for OrderItem {
    const TABLE: &'static str = "order_items";
    const ID_FIELD: &'static str = "order_item_id";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "order_item_id",
        "order_id",
        "food_id",
        "quantity",
        "unit_price",
        "created_at",
        "updated_at",
    ];

    fn business_id(&self) -> &str {
        &self.order_item_id
    }
}

pub type OrderItemRepository = Collection<OrderItem>;

impl Collection<OrderItem> {
    /// Items of one order, oldest first
    pub async fn find_by_order(
        &self,
        ctx: &RequestContext,
        order_id: &str,
    ) -> RepoResult<Vec<OrderItem>> {
        self.find_many_by(ctx, "order_id", order_id).await
    }
}
