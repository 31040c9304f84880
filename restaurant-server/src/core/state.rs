use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::repository::{
    FoodRepository, InvoiceRepository, MenuRepository, OrderItemRepository, OrderRepository,
    TableRepository, UserRepository,
};
use crate::db::{DbService, RequestContext};
use crate::services::{AccountService, CatalogService, OrderLifecycle};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价 Clone (内部为 Arc / 数据库句柄)。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | jwt_service | JWT 认证服务 |
/// | users ... invoices | 每个实体一个仓储 |
/// | accounts / catalog / orders_lifecycle | 业务服务 |
/// | shutdown | 关闭信号, 每个请求的取消令牌都派生自它 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,

    pub users: UserRepository,
    pub menus: MenuRepository,
    pub foods: FoodRepository,
    pub tables: TableRepository,
    pub orders: OrderRepository,
    pub order_items: OrderItemRepository,
    pub invoices: InvoiceRepository,

    pub accounts: AccountService,
    pub catalog: CatalogService,
    pub order_lifecycle: OrderLifecycle,

    pub shutdown: CancellationToken,
}

impl ServerState {
    /// 基于已打开的数据库构造状态
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let users = UserRepository::new(db.clone());
        let menus = MenuRepository::new(db.clone());
        let foods = FoodRepository::new(db.clone());
        let tables = TableRepository::new(db.clone());
        let orders = OrderRepository::new(db.clone());
        let order_items = OrderItemRepository::new(db.clone());
        let invoices = InvoiceRepository::new(db.clone());

        let accounts = AccountService::new(users.clone(), jwt_service.clone());
        let catalog = CatalogService::new(
            menus.clone(),
            foods.clone(),
            tables.clone(),
            orders.clone(),
            order_items.clone(),
            invoices.clone(),
        );
        let order_lifecycle =
            OrderLifecycle::new(orders.clone(), order_items.clone(), tables.clone());

        Self {
            config,
            db,
            jwt_service,
            users,
            menus,
            foods,
            tables,
            orders,
            order_items,
            invoices,
            accounts,
            catalog,
            order_lifecycle,
            shutdown: CancellationToken::new(),
        }
    }

    /// 打开数据库并构造状态
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path, &config.db_namespace, &config.db_name)
            .await
            .map_err(ServerError::Database)?;
        Ok(Self::with_db(config.clone(), db.db))
    }

    /// 内存数据库 + 测试配置
    pub async fn for_tests() -> Result<Self> {
        Self::initialize(&Config::for_tests()).await
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// 新请求的上下文: 配置的截止时间 + 关闭信号派生的取消令牌
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_cancellation(self.config.db_timeout(), self.shutdown.child_token())
    }
}
