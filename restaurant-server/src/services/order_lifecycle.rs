//! Order Lifecycle
//!
//! 单个请求内的订单流程:
//!
//! ```text
//! Received → OrderPersisted → ItemsValidated → ItemsPersisted → Responded
//!     └──────────────┴──────────────┴──────────────┴──→ Failed
//! ```
//!
//! 订单与订单项之间没有事务: 订单项校验失败时, 已写入的订单保留。

use shared::models::{
    Order, OrderCreate, OrderItem, OrderItemBatch, OrderItemInput, OrderItemPack,
    OrderItemUpdate, OrderUpdate,
};
use shared::types::UpdateResult;
use shared::util::{new_business_id, now_millis, to_fixed};
use shared::PatchDoc;
use validator::Validate;

use crate::db::RequestContext;
use crate::db::repository::{OrderItemRepository, OrderRepository, TableRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 金额保留的小数位
const PRICE_PRECISION: u32 = 2;

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    order_items: OrderItemRepository,
    tables: TableRepository,
}

impl OrderLifecycle {
    pub fn new(
        orders: OrderRepository,
        order_items: OrderItemRepository,
        tables: TableRepository,
    ) -> Self {
        Self {
            orders,
            order_items,
            tables,
        }
    }

    /// 创建订单
    ///
    /// 指定了 `table_id` 时餐桌必须存在, 否则返回 `ReferenceNotFound` 且不写入。
    pub async fn create_order(&self, ctx: &RequestContext, req: OrderCreate) -> AppResult<Order> {
        tracing::debug!(stage = "received", table_id = ?req.table_id, "Creating order");

        if let Some(table_id) = req.table_id.as_deref() {
            self.ensure_table(ctx, table_id).await?;
        }

        let now = now_millis();
        let order = Order {
            order_id: new_business_id(),
            table_id: req.table_id,
            order_date: now,
            created_at: now,
            updated_at: now,
        };
        self.orders.insert_one(ctx, &order).await?;

        tracing::debug!(stage = "order_persisted", order_id = %order.order_id);
        Ok(order)
    }

    /// 创建订单并批量写入订单项
    ///
    /// 任一订单项不合法时整批拒绝 (错误详情带 `index`), 订单本身不回滚。
    pub async fn create_order_item_batch(
        &self,
        ctx: &RequestContext,
        pack: OrderItemPack,
    ) -> AppResult<OrderItemBatch> {
        if pack.order_items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let order = self
            .create_order(
                ctx,
                OrderCreate {
                    table_id: pack.table_id,
                },
            )
            .await?;
        let order_id = order.order_id;

        let now = now_millis();
        let items = pack
            .order_items
            .iter()
            .enumerate()
            .map(|(index, input)| build_item(&order_id, index, input, now))
            .collect::<AppResult<Vec<_>>>()
            .inspect_err(|e| {
                tracing::debug!(stage = "failed", order_id = %order_id, error = %e.message);
            })?;
        tracing::debug!(stage = "items_validated", order_id = %order_id, count = items.len());

        let inserted = self.order_items.insert_many(ctx, &items).await.map_err(|e| {
            tracing::error!(order_id = %order_id, error = %e, "Order items insert failed, order kept");
            AppError::from(e)
        })?;
        tracing::debug!(stage = "items_persisted", order_id = %order_id);

        tracing::info!(order_id = %order_id, items = items.len(), "Order created with items");
        Ok(OrderItemBatch {
            order_id,
            inserted_ids: inserted.inserted_ids,
            items,
        })
    }

    /// 某订单的全部订单项 (按创建时间)
    pub async fn items_by_order(
        &self,
        ctx: &RequestContext,
        order_id: &str,
    ) -> AppResult<Vec<OrderItem>> {
        if !self.orders.exists(ctx, order_id).await? {
            return Err(AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id));
        }
        Ok(self.order_items.find_by_order(ctx, order_id).await?)
    }

    /// 更新订单 (不存在时插入)
    pub async fn update_order(
        &self,
        ctx: &RequestContext,
        order_id: &str,
        update: OrderUpdate,
    ) -> AppResult<UpdateResult> {
        if let Some(table_id) = update.table_id.value() {
            self.ensure_table(ctx, table_id).await?;
        }

        let patch = PatchDoc::new().field("table_id", &update.table_id);
        let result = self
            .orders
            .upsert_by_filter(ctx, "order_id", order_id, patch)
            .await?;
        tracing::debug!(order_id = %order_id, matched = result.matched_count, "Order updated");
        Ok(result)
    }

    /// 更新订单项 (不存在时插入)
    pub async fn update_order_item(
        &self,
        ctx: &RequestContext,
        order_item_id: &str,
        update: OrderItemUpdate,
    ) -> AppResult<UpdateResult> {
        update.food_id.require_not_null("food_id")?;
        update.quantity.require_not_null("quantity")?;
        update.unit_price.require_not_null("unit_price")?;

        if let Some(food_id) = update.food_id.value()
            && food_id.trim().is_empty()
        {
            return Err(AppError::validation("food_id is required").with_detail("field", "food_id"));
        }
        if let Some(quantity) = update.quantity.value()
            && *quantity < 1
        {
            return Err(AppError::validation("quantity must be at least 1")
                .with_detail("field", "quantity"));
        }
        if let Some(price) = update.unit_price.value()
            && *price < 0.0
        {
            return Err(AppError::validation("unit_price must not be negative")
                .with_detail("field", "unit_price"));
        }

        let unit_price = update.unit_price.map(|p| to_fixed(p, PRICE_PRECISION));
        let patch = PatchDoc::new()
            .field("food_id", &update.food_id)
            .field("quantity", &update.quantity)
            .field("unit_price", &unit_price);

        Ok(self
            .order_items
            .upsert_by_filter(ctx, "order_item_id", order_item_id, patch)
            .await?)
    }

    async fn ensure_table(&self, ctx: &RequestContext, table_id: &str) -> AppResult<()> {
        if self.tables.exists(ctx, table_id).await? {
            Ok(())
        } else {
            tracing::debug!(stage = "failed", table_id = %table_id, "Order references unknown table");
            Err(AppError::reference_not_found("table", table_id))
        }
    }
}

/// 校验一条订单项输入并补全 ID、时间戳与金额精度
fn build_item(
    order_id: &str,
    index: usize,
    input: &OrderItemInput,
    now: i64,
) -> AppResult<OrderItem> {
    input
        .validate()
        .map_err(|e| AppError::from(e).with_detail("index", index))?;

    let (Some(food_id), Some(quantity), Some(unit_price)) =
        (input.food_id.as_ref(), input.quantity, input.unit_price)
    else {
        return Err(AppError::new(ErrorCode::RequiredField).with_detail("index", index));
    };

    Ok(OrderItem {
        order_item_id: new_business_id(),
        order_id: order_id.to_string(),
        food_id: food_id.clone(),
        quantity,
        unit_price: to_fixed(unit_price, PRICE_PRECISION),
        created_at: now,
        updated_at: now,
    })
}
