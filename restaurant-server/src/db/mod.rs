//! Database Module
//!
//! Embedded SurrealDB (RocksDB on disk, or in-memory) plus schema setup.

pub mod context;
pub mod repository;

pub use context::RequestContext;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// `DATABASE_PATH` value selecting the in-memory engine
pub const MEMORY_PATH: &str = "memory";

/// 表结构与索引
///
/// 表为 SCHEMALESS; 业务 ID 以及 user.email / user.phone 上建唯一索引。
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS users SCHEMALESS;
DEFINE INDEX IF NOT EXISTS users_user_id ON TABLE users COLUMNS user_id UNIQUE;
DEFINE INDEX IF NOT EXISTS users_email ON TABLE users COLUMNS email UNIQUE;
DEFINE INDEX IF NOT EXISTS users_phone ON TABLE users COLUMNS phone UNIQUE;

DEFINE TABLE IF NOT EXISTS menus SCHEMALESS;
DEFINE INDEX IF NOT EXISTS menus_menu_id ON TABLE menus COLUMNS menu_id UNIQUE;
DEFINE INDEX IF NOT EXISTS menus_category ON TABLE menus COLUMNS category;

DEFINE TABLE IF NOT EXISTS foods SCHEMALESS;
DEFINE INDEX IF NOT EXISTS foods_food_id ON TABLE foods COLUMNS food_id UNIQUE;

DEFINE TABLE IF NOT EXISTS dining_tables SCHEMALESS;
DEFINE INDEX IF NOT EXISTS dining_tables_table_id ON TABLE dining_tables COLUMNS table_id UNIQUE;

DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
DEFINE INDEX IF NOT EXISTS orders_order_id ON TABLE orders COLUMNS order_id UNIQUE;

DEFINE TABLE IF NOT EXISTS order_items SCHEMALESS;
DEFINE INDEX IF NOT EXISTS order_items_order_item_id ON TABLE order_items COLUMNS order_item_id UNIQUE;
DEFINE INDEX IF NOT EXISTS order_items_order_id ON TABLE order_items COLUMNS order_id;

DEFINE TABLE IF NOT EXISTS invoices SCHEMALESS;
DEFINE INDEX IF NOT EXISTS invoices_invoice_id ON TABLE invoices COLUMNS invoice_id UNIQUE;
"#;

/// Database service, owns the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database at `path` (`"memory"` for the in-memory engine),
    /// select namespace/database and apply the schema.
    pub async fn new(path: &str, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db = if path == MEMORY_PATH {
            Surreal::new::<Mem>(()).await
        } else {
            if let Some(parent) = std::path::Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::database(format!("Failed to create database directory: {e}"))
                })?;
            }
            Surreal::new::<RocksDb>(path).await
        }
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %path, namespace = %namespace, database = %database, "Database connection established");

        let service = Self { db };
        service.apply_schema().await?;
        Ok(service)
    }

    /// In-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        Self::new(MEMORY_PATH, "test", "test").await
    }

    async fn apply_schema(&self) -> Result<(), AppError> {
        self.db
            .query(SCHEMA)
            .await
            .and_then(|res| res.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");
        Ok(())
    }

    /// Liveness check
    pub async fn ping(&self) -> Result<(), AppError> {
        self.db
            .query("RETURN true")
            .await
            .and_then(|res| res.check())
            .map(|_| ())
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))
    }
}
