//! Catalog Service - 菜单、菜品、餐桌与发票
//!
//! 各资源的创建 / 更新规则; 简单读取由 handler 直接走仓储。

use shared::models::{
    Food, FoodCreate, FoodUpdate, Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView, Menu,
    MenuCreate, MenuUpdate, Table, TableCreate, TableUpdate,
};
use shared::types::{DeleteResult, UpdateResult};
use shared::util::{DAY_MILLIS, new_business_id, now_millis, to_fixed};
use shared::{Patch, PatchDoc};

use crate::db::RequestContext;
use crate::db::repository::{
    FoodRepository, InvoiceRepository, MenuRepository, OrderItemRepository, OrderRepository,
    TableRepository,
};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_payload, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const PRICE_PRECISION: u32 = 2;

#[derive(Clone)]
pub struct CatalogService {
    menus: MenuRepository,
    foods: FoodRepository,
    tables: TableRepository,
    orders: OrderRepository,
    order_items: OrderItemRepository,
    invoices: InvoiceRepository,
}

impl CatalogService {
    pub fn new(
        menus: MenuRepository,
        foods: FoodRepository,
        tables: TableRepository,
        orders: OrderRepository,
        order_items: OrderItemRepository,
        invoices: InvoiceRepository,
    ) -> Self {
        Self {
            menus,
            foods,
            tables,
            orders,
            order_items,
            invoices,
        }
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub async fn create_menu(&self, ctx: &RequestContext, req: MenuCreate) -> AppResult<Menu> {
        validate_payload(&req)?;
        if req.start_date.is_some() || req.end_date.is_some() {
            check_menu_window(req.start_date, req.end_date, now_millis())?;
        }

        let now = now_millis();
        let menu = Menu {
            menu_id: new_business_id(),
            name: req.name,
            category: req.category,
            start_date: req.start_date,
            end_date: req.end_date,
            created_at: now,
            updated_at: now,
        };
        self.menus.insert_one(ctx, &menu).await?;
        tracing::info!(menu_id = %menu.menu_id, category = %menu.category, "Menu created");
        Ok(menu)
    }

    /// 更新菜单
    ///
    /// 日期要么成对给出 (开始早于结束, 结束在未来), 要么都不给;
    /// 两者同时为 `null` 表示清除时间窗口。
    pub async fn update_menu(
        &self,
        ctx: &RequestContext,
        menu_id: &str,
        update: MenuUpdate,
    ) -> AppResult<UpdateResult> {
        update.name.require_not_null("name")?;
        update.category.require_not_null("category")?;
        if let Some(name) = update.name.value() {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(category) = update.category.value() {
            validate_required_text(category, "category", MAX_NAME_LEN)?;
        }

        match (&update.start_date, &update.end_date) {
            (Patch::Missing, Patch::Missing) | (Patch::Null, Patch::Null) => {}
            (Patch::Value(start), Patch::Value(end)) => {
                check_menu_window(Some(*start), Some(*end), now_millis())?
            }
            _ => return Err(AppError::new(ErrorCode::MenuDateRangeInvalid)),
        }

        let patch = PatchDoc::new()
            .field("name", &update.name)
            .field("category", &update.category)
            .field("start_date", &update.start_date)
            .field("end_date", &update.end_date);
        Ok(self
            .menus
            .upsert_by_filter(ctx, "menu_id", menu_id, patch)
            .await?)
    }

    pub async fn delete_menu(&self, ctx: &RequestContext, menu_id: &str) -> AppResult<DeleteResult> {
        if !self.menus.delete_by_business_id(ctx, menu_id).await? {
            return Err(AppError::new(ErrorCode::MenuNotFound).with_detail("menu_id", menu_id));
        }
        tracing::info!(menu_id = %menu_id, "Menu deleted");
        Ok(DeleteResult { deleted_count: 1 })
    }

    // =========================================================================
    // Food
    // =========================================================================

    /// 创建菜品
    ///
    /// 给了 `menu_id` 时菜单必须存在; 否则按 `category` 找到 (或新建) 该分类的菜单。
    pub async fn create_food(&self, ctx: &RequestContext, req: FoodCreate) -> AppResult<Food> {
        validate_payload(&req)?;

        let menu_id = match (req.menu_id, req.category) {
            (Some(menu_id), _) => {
                if !self.menus.exists(ctx, &menu_id).await? {
                    return Err(AppError::reference_not_found("menu", menu_id));
                }
                menu_id
            }
            (None, Some(category)) => self.menu_for_category(ctx, category).await?,
            (None, None) => {
                return Err(AppError::new(ErrorCode::RequiredField)
                    .with_detail("field", "menu_id"));
            }
        };

        let now = now_millis();
        let food = Food {
            food_id: new_business_id(),
            name: req.name,
            price: to_fixed(req.price, PRICE_PRECISION),
            food_image: req.food_image,
            menu_id,
            created_at: now,
            updated_at: now,
        };
        self.foods.insert_one(ctx, &food).await?;
        tracing::info!(food_id = %food.food_id, menu_id = %food.menu_id, "Food created");
        Ok(food)
    }

    async fn menu_for_category(&self, ctx: &RequestContext, category: String) -> AppResult<String> {
        if let Some(menu) = self.menus.find_by_category(ctx, &category).await? {
            return Ok(menu.menu_id);
        }

        let now = now_millis();
        let menu = Menu {
            menu_id: new_business_id(),
            name: category.clone(),
            category,
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
        };
        self.menus.insert_one(ctx, &menu).await?;
        tracing::info!(menu_id = %menu.menu_id, category = %menu.category, "Menu created for new category");
        Ok(menu.menu_id)
    }

    pub async fn update_food(
        &self,
        ctx: &RequestContext,
        food_id: &str,
        update: FoodUpdate,
    ) -> AppResult<UpdateResult> {
        update.name.require_not_null("name")?;
        update.price.require_not_null("price")?;
        update.menu_id.require_not_null("menu_id")?;

        if let Some(name) = update.name.value() {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(update.food_image.value().map(String::as_str), "food_image", MAX_URL_LEN)?;
        if let Some(price) = update.price.value()
            && *price < 0.0
        {
            return Err(AppError::validation("price must not be negative").with_detail("field", "price"));
        }
        if let Some(menu_id) = update.menu_id.value()
            && !self.menus.exists(ctx, menu_id).await?
        {
            return Err(AppError::reference_not_found("menu", menu_id.as_str()));
        }

        let price = update.price.map(|p| to_fixed(p, PRICE_PRECISION));
        let patch = PatchDoc::new()
            .field("name", &update.name)
            .field("price", &price)
            .field("food_image", &update.food_image)
            .field("menu_id", &update.menu_id);
        Ok(self
            .foods
            .upsert_by_filter(ctx, "food_id", food_id, patch)
            .await?)
    }

    // =========================================================================
    // Table
    // =========================================================================

    pub async fn create_table(&self, ctx: &RequestContext, req: TableCreate) -> AppResult<Table> {
        validate_payload(&req)?;
        let now = now_millis();
        let table = Table {
            table_id: new_business_id(),
            table_number: req.table_number,
            capacity: req.capacity,
            created_at: now,
            updated_at: now,
        };
        self.tables.insert_one(ctx, &table).await?;
        tracing::info!(table_id = %table.table_id, number = table.table_number, "Table created");
        Ok(table)
    }

    pub async fn update_table(
        &self,
        ctx: &RequestContext,
        table_id: &str,
        update: TableUpdate,
    ) -> AppResult<UpdateResult> {
        update.table_number.require_not_null("table_number")?;
        update.capacity.require_not_null("capacity")?;
        if let Some(n) = update.table_number.value()
            && *n < 0
        {
            return Err(AppError::validation("table_number must not be negative")
                .with_detail("field", "table_number"));
        }
        if let Some(c) = update.capacity.value()
            && *c < 1
        {
            return Err(AppError::validation("capacity must be at least 1")
                .with_detail("field", "capacity"));
        }

        let patch = PatchDoc::new()
            .field("table_number", &update.table_number)
            .field("capacity", &update.capacity);
        Ok(self
            .tables
            .upsert_by_filter(ctx, "table_id", table_id, patch)
            .await?)
    }

    // =========================================================================
    // Invoice
    // =========================================================================

    /// 创建发票, 订单必须存在; 付款期限默认为创建后一天
    pub async fn create_invoice(&self, ctx: &RequestContext, req: InvoiceCreate) -> AppResult<Invoice> {
        if !self.orders.exists(ctx, &req.order_id).await? {
            return Err(AppError::reference_not_found("order", req.order_id));
        }

        let now = now_millis();
        let invoice = Invoice {
            invoice_id: new_business_id(),
            order_id: req.order_id,
            payment_method: req.payment_method,
            payment_status: req.payment_status.unwrap_or_default(),
            payment_due_date: req.payment_due_date.unwrap_or(now + DAY_MILLIS),
            created_at: now,
            updated_at: now,
        };
        self.invoices.insert_one(ctx, &invoice).await?;
        tracing::info!(invoice_id = %invoice.invoice_id, order_id = %invoice.order_id, "Invoice created");
        Ok(invoice)
    }

    pub async fn update_invoice(
        &self,
        ctx: &RequestContext,
        invoice_id: &str,
        update: InvoiceUpdate,
    ) -> AppResult<UpdateResult> {
        update.payment_status.require_not_null("payment_status")?;
        update.payment_due_date.require_not_null("payment_due_date")?;

        let patch = PatchDoc::new()
            .field("payment_method", &update.payment_method)
            .field("payment_status", &update.payment_status)
            .field("payment_due_date", &update.payment_due_date);
        Ok(self
            .invoices
            .upsert_by_filter(ctx, "invoice_id", invoice_id, patch)
            .await?)
    }

    /// 发票视图: 订单项与应付金额
    pub async fn invoice_view(&self, ctx: &RequestContext, invoice_id: &str) -> AppResult<InvoiceView> {
        let invoice = self
            .invoices
            .find_by_business_id(ctx, invoice_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::InvoiceNotFound).with_detail("invoice_id", invoice_id))?;

        let table_id = self
            .orders
            .find_by_business_id(ctx, &invoice.order_id)
            .await?
            .and_then(|o| o.table_id);
        let items = self.order_items.find_by_order(ctx, &invoice.order_id).await?;
        let due: f64 = items
            .iter()
            .map(|i| i.quantity as f64 * i.unit_price)
            .sum();

        Ok(InvoiceView {
            invoice_id: invoice.invoice_id,
            order_id: invoice.order_id,
            table_id,
            payment_method: invoice.payment_method,
            payment_status: invoice.payment_status,
            payment_due_date: invoice.payment_due_date,
            payment_due: to_fixed(due, PRICE_PRECISION),
            items,
        })
    }
}

fn check_menu_window(start: Option<i64>, end: Option<i64>, now: i64) -> AppResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start < end && end > now => Ok(()),
        _ => Err(AppError::new(ErrorCode::MenuDateRangeInvalid)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{ctx, memory_db};
    use shared::models::{OrderItem, PaymentStatus};

    async fn catalog() -> CatalogService {
        let db = memory_db().await;
        CatalogService::new(
            MenuRepository::new(db.clone()),
            FoodRepository::new(db.clone()),
            TableRepository::new(db.clone()),
            OrderRepository::new(db.clone()),
            OrderItemRepository::new(db.clone()),
            InvoiceRepository::new(db),
        )
    }

    fn menu_create(category: &str) -> MenuCreate {
        MenuCreate {
            name: "Lunch".into(),
            category: category.into(),
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn test_menu_window() {
        assert!(check_menu_window(Some(1), Some(200), 100).is_ok());
        assert!(check_menu_window(Some(200), Some(150), 100).is_err());
        assert!(check_menu_window(Some(1), Some(50), 100).is_err());
        assert!(check_menu_window(Some(1), None, 100).is_err());
    }

    #[tokio::test]
    async fn test_update_menu_requires_both_dates() {
        let svc = catalog().await;
        let ctx = ctx();
        let menu = svc.create_menu(&ctx, menu_create("soups")).await.unwrap();

        let err = svc
            .update_menu(
                &ctx,
                &menu.menu_id,
                MenuUpdate {
                    start_date: Patch::Value(now_millis()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuDateRangeInvalid);
        assert_eq!(err.message, "kindly retype the time");

        let start = now_millis();
        let res = svc
            .update_menu(
                &ctx,
                &menu.menu_id,
                MenuUpdate {
                    start_date: Patch::Value(start),
                    end_date: Patch::Value(start + DAY_MILLIS),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(res.matched_count, 1);

        // both null clears the window
        svc.update_menu(
            &ctx,
            &menu.menu_id,
            MenuUpdate {
                start_date: Patch::Null,
                end_date: Patch::Null,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let stored = svc.menus.find_by_business_id(&ctx, &menu.menu_id).await.unwrap().unwrap();
        assert_eq!(stored.start_date, None);
        assert_eq!(stored.end_date, None);
    }

    #[tokio::test]
    async fn test_delete_menu() {
        let svc = catalog().await;
        let ctx = ctx();
        let menu = svc.create_menu(&ctx, menu_create("soups")).await.unwrap();
        assert_eq!(svc.delete_menu(&ctx, &menu.menu_id).await.unwrap().deleted_count, 1);
        let err = svc.delete_menu(&ctx, &menu.menu_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuNotFound);
    }

    #[tokio::test]
    async fn test_create_food_reuses_or_creates_category_menu() {
        let svc = catalog().await;
        let ctx = ctx();
        let req = |name: &str| FoodCreate {
            name: name.into(),
            price: 12.346,
            food_image: None,
            menu_id: None,
            category: Some("desserts".into()),
        };

        let first = svc.create_food(&ctx, req("Tiramisu")).await.unwrap();
        let second = svc.create_food(&ctx, req("Panna cotta")).await.unwrap();
        assert_eq!(first.menu_id, second.menu_id);
        assert_eq!(first.price, 12.35);
        assert_eq!(svc.menus.count_by(&ctx, "category", "desserts").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_food_unknown_menu() {
        let svc = catalog().await;
        let err = svc
            .create_food(
                &ctx(),
                FoodCreate {
                    name: "Soup".into(),
                    price: 3.0,
                    food_image: None,
                    menu_id: Some("ghost".into()),
                    category: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReferenceNotFound);
    }

    #[tokio::test]
    async fn test_update_food_writes_menu_id() {
        let svc = catalog().await;
        let ctx = ctx();
        let soups = svc.create_menu(&ctx, menu_create("soups")).await.unwrap();
        let mains = svc.create_menu(&ctx, menu_create("mains")).await.unwrap();
        let food = svc
            .create_food(
                &ctx,
                FoodCreate {
                    name: "Soup".into(),
                    price: 3.0,
                    food_image: None,
                    menu_id: Some(soups.menu_id),
                    category: None,
                },
            )
            .await
            .unwrap();

        svc.update_food(
            &ctx,
            &food.food_id,
            FoodUpdate {
                menu_id: Patch::Value(mains.menu_id.clone()),
                price: Patch::Value(4.499),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let stored = svc.foods.find_by_business_id(&ctx, &food.food_id).await.unwrap().unwrap();
        assert_eq!(stored.menu_id, mains.menu_id);
        assert_eq!(stored.price, 4.5);
    }

    #[tokio::test]
    async fn test_update_table_rejects_null_capacity() {
        let svc = catalog().await;
        let ctx = ctx();
        let table = svc
            .create_table(&ctx, TableCreate { table_number: 1, capacity: 2 })
            .await
            .unwrap();
        let err = svc
            .update_table(
                &ctx,
                &table.table_id,
                TableUpdate {
                    capacity: Patch::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_invoice_view_sums_items() {
        let svc = catalog().await;
        let ctx = ctx();

        let order = shared::models::Order {
            order_id: new_business_id(),
            table_id: Some("t1".into()),
            order_date: 1,
            created_at: 1,
            updated_at: 1,
        };
        svc.orders.insert_one(&ctx, &order).await.unwrap();
        let items: Vec<OrderItem> = [(2, 1.25), (3, 0.1)]
            .into_iter()
            .enumerate()
            .map(|(i, (quantity, unit_price))| OrderItem {
                order_item_id: new_business_id(),
                order_id: order.order_id.clone(),
                food_id: format!("f{i}"),
                quantity,
                unit_price,
                created_at: 10 + i as i64,
                updated_at: 10,
            })
            .collect();
        svc.order_items.insert_many(&ctx, &items).await.unwrap();

        let invoice = svc
            .create_invoice(
                &ctx,
                InvoiceCreate {
                    order_id: order.order_id.clone(),
                    payment_method: None,
                    payment_status: None,
                    payment_due_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(invoice.payment_status, PaymentStatus::Pending);
        assert_eq!(invoice.payment_due_date, invoice.created_at + DAY_MILLIS);

        let view = svc.invoice_view(&ctx, &invoice.invoice_id).await.unwrap();
        assert_eq!(view.payment_due, 2.8);
        assert_eq!(view.table_id.as_deref(), Some("t1"));
        assert_eq!(view.items.len(), 2);
    }

    #[tokio::test]
    async fn test_invoice_requires_order() {
        let svc = catalog().await;
        let err = svc
            .create_invoice(
                &ctx(),
                InvoiceCreate {
                    order_id: "ghost".into(),
                    payment_method: None,
                    payment_status: None,
                    payment_due_date: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReferenceNotFound);
    }
}
