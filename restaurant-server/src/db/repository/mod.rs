//! Repository Module
//!
//! One [`Collection`] per entity, owned by `ServerState`. Entities are
//! addressed by their business identifier field (`user_id`, `menu_id`, ...),
//! which is also used as the record key.

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

// Re-exports
pub use food::FoodRepository;
pub use invoice::InvoiceRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
pub use table::TableRepository;
pub use user::UserRepository;

use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use shared::PatchDoc;
use shared::types::{InsertManyResult, InsertOneResult, Page, PageRequest, UpdateResult};
use shared::util::{new_business_id, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::RequestContext;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Operation exceeded its deadline")]
    DeadlineExceeded,

    #[error("Operation was cancelled")]
    Cancelled,
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // 唯一索引冲突 / 记录 ID 冲突
        if msg.contains("already contains") || msg.contains("already exists") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// A stored entity
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// SurrealDB table name
    const TABLE: &'static str;
    /// Business identifier field
    const ID_FIELD: &'static str;
    /// Fields a document must carry to be decodable; checked when an upsert inserts
    const REQUIRED_FIELDS: &'static [&'static str];

    fn business_id(&self) -> &str;
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

fn first_count(rows: Vec<CountRow>) -> u64 {
    rows.first().map(|r| r.total).unwrap_or(0)
}

/// Generic persistence façade over one table
pub struct Collection<T> {
    base: BaseRepository,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
            _marker: PhantomData,
        }
    }

    pub fn db(&self) -> &Surreal<Db> {
        self.base.db()
    }

    /// Serialize a document into a record whose key is its business id
    fn to_record(doc: &T) -> RepoResult<Value> {
        let mut value = serde_json::to_value(doc)
            .map_err(|e| RepoError::Database(format!("Failed to encode {}: {e}", T::TABLE)))?;
        if let Value::Object(map) = &mut value {
            map.insert("id".to_string(), Value::String(doc.business_id().to_string()));
        }
        Ok(value)
    }

    /// Find a document by its business identifier
    pub async fn find_by_business_id(&self, ctx: &RequestContext, id: &str) -> RepoResult<Option<T>> {
        self.find_one_by(ctx, T::ID_FIELD, id).await
    }

    /// Whether a document with this business identifier exists
    pub async fn exists(&self, ctx: &RequestContext, id: &str) -> RepoResult<bool> {
        Ok(self.count_by(ctx, T::ID_FIELD, id).await? > 0)
    }

    /// First document whose `field` equals `value`
    pub async fn find_one_by(
        &self,
        ctx: &RequestContext,
        field: &str,
        value: &str,
    ) -> RepoResult<Option<T>> {
        let sql = format!("SELECT * OMIT id FROM {} WHERE {field} = $value LIMIT 1", T::TABLE);
        let value = value.to_string();
        ctx.run(async {
            let found: Vec<T> = self.db().query(sql).bind(("value", value)).await?.take(0)?;
            Ok(found.into_iter().next())
        })
        .await
    }

    /// All documents whose `field` equals `value`, oldest first
    pub async fn find_many_by(
        &self,
        ctx: &RequestContext,
        field: &str,
        value: &str,
    ) -> RepoResult<Vec<T>> {
        let sql = format!(
            "SELECT * OMIT id FROM {t} WHERE {field} = $value ORDER BY created_at ASC, {id} ASC",
            t = T::TABLE,
            id = T::ID_FIELD
        );
        let value = value.to_string();
        ctx.run(async {
            let found: Vec<T> = self.db().query(sql).bind(("value", value)).await?.take(0)?;
            Ok(found)
        })
        .await
    }

    /// Number of documents whose `field` equals `value`
    pub async fn count_by(&self, ctx: &RequestContext, field: &str, value: &str) -> RepoResult<u64> {
        let sql = format!(
            "SELECT count() AS total FROM {} WHERE {field} = $value GROUP ALL",
            T::TABLE
        );
        let value = value.to_string();
        ctx.run(async {
            let rows: Vec<CountRow> = self.db().query(sql).bind(("value", value)).await?.take(0)?;
            Ok(first_count(rows))
        })
        .await
    }

    /// One page of the table, ordered by creation, plus the total count.
    ///
    /// Count and slice run as two statements of a single query.
    pub async fn find_page(&self, ctx: &RequestContext, page: &PageRequest) -> RepoResult<Page<T>> {
        let count_sql = format!("SELECT count() AS total FROM {} GROUP ALL", T::TABLE);
        let slice_sql = format!(
            "SELECT * OMIT id FROM {t} ORDER BY created_at ASC, {id} ASC LIMIT $limit START $start",
            t = T::TABLE,
            id = T::ID_FIELD
        );
        let offset = page.offset();
        ctx.run(async {
            let rows: Vec<CountRow> = self.db().query(count_sql).await?.take(0)?;
            let total_count = first_count(rows);
            // start and limit go to the engine as signed ints; keep both
            // inside the table size
            let Some(remaining) = total_count.checked_sub(offset).filter(|r| *r > 0) else {
                return Ok(Page {
                    total_count,
                    items: Vec::new(),
                });
            };
            let items: Vec<T> = self
                .db()
                .query(slice_sql)
                .bind(("limit", page.limit().min(remaining)))
                .bind(("start", offset))
                .await?
                .take(0)?;
            Ok(Page { total_count, items })
        })
        .await
    }

    /// Merge `patch` into every document whose `field` equals `value`; insert
    /// a new document carrying the filter field when nothing matches.
    ///
    /// `updated_at` is always stamped. An explicit `null` in the patch clears
    /// the field.
    pub async fn upsert_by_filter(
        &self,
        ctx: &RequestContext,
        field: &str,
        value: &str,
        patch: PatchDoc,
    ) -> RepoResult<UpdateResult> {
        let now = now_millis();
        let patch = patch.set("updated_at", now).into_map();

        let matched = self.merge_where(ctx, field, value, patch.clone()).await?;
        if matched > 0 {
            return Ok(UpdateResult {
                matched_count: matched,
                modified_count: matched,
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let doc = Self::upsert_document(field, value, patch, now)?;
        let id = doc
            .get(T::ID_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();
        let mut record = doc;
        record.insert("id".to_string(), Value::String(id.clone()));

        let sql = format!("INSERT INTO {} $doc RETURN NONE", T::TABLE);
        ctx.run(async {
            self.db()
                .query(sql)
                .bind(("doc", Value::Object(record)))
                .await?
                .check()?;
            Ok(())
        })
        .await?;

        tracing::debug!(table = T::TABLE, id = %id, "Upsert inserted new document");
        Ok(UpdateResult {
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        })
    }

    /// Build the document inserted by an upsert that matched nothing
    fn upsert_document(
        field: &str,
        value: &str,
        patch: Map<String, Value>,
        now: i64,
    ) -> RepoResult<Map<String, Value>> {
        let mut doc = patch;
        doc.insert(field.to_string(), Value::String(value.to_string()));
        doc.entry("created_at").or_insert(Value::from(now));
        if !doc.contains_key(T::ID_FIELD) {
            doc.insert(T::ID_FIELD.to_string(), Value::String(new_business_id()));
        }

        let missing: Vec<&str> = T::REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| doc.get(*f).is_none_or(Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(RepoError::Validation(format!(
                "no {} matches and a new one needs: {}",
                T::TABLE,
                missing.join(", ")
            )));
        }
        Ok(doc)
    }

    /// Merge `patch` into matching documents without inserting. Returns the
    /// number of documents matched.
    pub async fn update_fields(
        &self,
        ctx: &RequestContext,
        field: &str,
        value: &str,
        patch: PatchDoc,
    ) -> RepoResult<u64> {
        let patch = patch.set("updated_at", now_millis()).into_map();
        self.merge_where(ctx, field, value, patch).await
    }

    async fn merge_where(
        &self,
        ctx: &RequestContext,
        field: &str,
        value: &str,
        patch: Map<String, Value>,
    ) -> RepoResult<u64> {
        let sql = format!(
            "SELECT count() AS total FROM {t} WHERE {field} = $value GROUP ALL;
             UPDATE {t} MERGE $patch WHERE {field} = $value RETURN NONE;",
            t = T::TABLE
        );
        let value = value.to_string();
        ctx.run(async {
            let mut res = self
                .db()
                .query(sql)
                .bind(("value", value))
                .bind(("patch", Value::Object(patch)))
                .await?
                .check()?;
            let rows: Vec<CountRow> = res.take(0)?;
            Ok(first_count(rows))
        })
        .await
    }

    /// Insert one document
    pub async fn insert_one(&self, ctx: &RequestContext, doc: &T) -> RepoResult<InsertOneResult> {
        let record = Self::to_record(doc)?;
        let sql = format!("INSERT INTO {} $doc RETURN NONE", T::TABLE);
        ctx.run(async {
            self.db().query(sql).bind(("doc", record)).await?.check()?;
            Ok(())
        })
        .await?;
        Ok(InsertOneResult {
            inserted_id: doc.business_id().to_string(),
        })
    }

    /// Insert many documents in one statement (all or nothing)
    pub async fn insert_many(
        &self,
        ctx: &RequestContext,
        docs: &[T],
    ) -> RepoResult<InsertManyResult> {
        if docs.is_empty() {
            return Ok(InsertManyResult {
                inserted_ids: Vec::new(),
            });
        }
        let records = docs
            .iter()
            .map(Self::to_record)
            .collect::<RepoResult<Vec<_>>>()?;
        let sql = format!("INSERT INTO {} $docs RETURN NONE", T::TABLE);
        ctx.run(async {
            self.db()
                .query(sql)
                .bind(("docs", Value::Array(records)))
                .await?
                .check()?;
            Ok(())
        })
        .await?;
        Ok(InsertManyResult {
            inserted_ids: docs.iter().map(|d| d.business_id().to_string()).collect(),
        })
    }

    /// Delete by business identifier; `false` when nothing was deleted
    pub async fn delete_by_business_id(&self, ctx: &RequestContext, id: &str) -> RepoResult<bool> {
        let sql = format!(
            "SELECT count() AS total FROM {t} WHERE {f} = $value GROUP ALL;
             DELETE {t} WHERE {f} = $value RETURN NONE;",
            t = T::TABLE,
            f = T::ID_FIELD
        );
        let value = id.to_string();
        ctx.run(async {
            let mut res = self.db().query(sql).bind(("value", value)).await?.check()?;
            let rows: Vec<CountRow> = res.take(0)?;
            Ok(first_count(rows) > 0)
        })
        .await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::db::DbService;
    use std::time::Duration;

    pub async fn memory_db() -> Surreal<Db> {
        DbService::memory().await.unwrap().db
    }

    pub fn ctx() -> RequestContext {
        RequestContext::new(Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{ctx, memory_db};
    use super::*;
    use shared::Patch;
    use shared::models::Table;

    fn table(n: i32, created_at: i64) -> Table {
        Table {
            table_id: new_business_id(),
            table_number: n,
            capacity: 4,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = TableRepository::new(memory_db().await);
        let ctx = ctx();
        let t = table(1, 100);

        let res = repo.insert_one(&ctx, &t).await.unwrap();
        assert_eq!(res.inserted_id, t.table_id);

        let found = repo.find_by_business_id(&ctx, &t.table_id).await.unwrap().unwrap();
        assert_eq!(found.table_number, 1);
        assert!(repo.exists(&ctx, &t.table_id).await.unwrap());
        assert!(repo.find_by_business_id(&ctx, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_business_id_rejected() {
        let repo = TableRepository::new(memory_db().await);
        let ctx = ctx();
        let t = table(1, 100);
        repo.insert_one(&ctx, &t).await.unwrap();
        assert!(matches!(
            repo.insert_one(&ctx, &t).await,
            Err(RepoError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_find_page_second_page() {
        let repo = TableRepository::new(memory_db().await);
        let ctx = ctx();
        let docs: Vec<Table> = (1..=5).map(|n| table(n, 1000 + n as i64)).collect();
        repo.insert_many(&ctx, &docs).await.unwrap();

        let page = repo
            .find_page(&ctx, &PageRequest::from_raw(Some("2"), Some("2"), None))
            .await
            .unwrap();
        assert_eq!(page.total_count, 5);
        let numbers: Vec<i32> = page.items.iter().map(|t| t.table_number).collect();
        assert_eq!(numbers, vec![3, 4]);

        let page = repo
            .find_page(&ctx, &PageRequest::from_raw(Some("2"), None, Some("4")))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].table_number, 5);
    }

    #[tokio::test]
    async fn test_find_page_past_the_end_is_empty() {
        let repo = TableRepository::new(memory_db().await);
        let ctx = ctx();
        let docs: Vec<Table> = (1..=3).map(|n| table(n, 1000 + n as i64)).collect();
        repo.insert_many(&ctx, &docs).await.unwrap();

        for raw in [
            PageRequest::from_raw(None, None, Some("3")),
            PageRequest::from_raw(None, None, Some("4294967295")),
            PageRequest::from_raw(None, None, Some("4294967296")),
            PageRequest::from_raw(None, None, Some("9223372036854775807")),
            PageRequest::from_raw(Some("4294967295"), Some("4294967295"), None),
        ] {
            let page = repo.find_page(&ctx, &raw).await.unwrap();
            assert_eq!(page.total_count, 3, "{raw:?}");
            assert!(page.items.is_empty(), "{raw:?}");
        }

        let page = repo
            .find_page(&ctx, &PageRequest::from_raw(Some("4294967295"), None, None))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_find_page_empty_table() {
        let repo = TableRepository::new(memory_db().await);
        let page = repo.find_page(&ctx(), &PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_updates_existing() {
        let repo = TableRepository::new(memory_db().await);
        let ctx = ctx();
        let t = table(1, 100);
        repo.insert_one(&ctx, &t).await.unwrap();

        let patch = PatchDoc::new().field("capacity", &Patch::Value(8));
        let res = repo
            .upsert_by_filter(&ctx, "table_id", &t.table_id, patch)
            .await
            .unwrap();
        assert_eq!(res.matched_count, 1);
        assert_eq!(res.upserted_id, None);

        let found = repo.find_by_business_id(&ctx, &t.table_id).await.unwrap().unwrap();
        assert_eq!(found.capacity, 8);
        assert_eq!(found.table_number, 1);
        assert!(found.updated_at > 100);
    }

    #[tokio::test]
    async fn test_upsert_inserts_when_nothing_matches() {
        let repo = TableRepository::new(memory_db().await);
        let ctx = ctx();
        let patch = PatchDoc::new()
            .field("table_number", &Patch::Value(9))
            .field("capacity", &Patch::Value(2));
        let res = repo
            .upsert_by_filter(&ctx, "table_id", "fresh-table", patch)
            .await
            .unwrap();
        assert_eq!(res.matched_count, 0);
        assert_eq!(res.upserted_id.as_deref(), Some("fresh-table"));

        let found = repo.find_by_business_id(&ctx, "fresh-table").await.unwrap().unwrap();
        assert_eq!(found.table_number, 9);
    }

    #[tokio::test]
    async fn test_upsert_insert_requires_fields() {
        let repo = TableRepository::new(memory_db().await);
        let patch = PatchDoc::new().field("capacity", &Patch::Value(2));
        let res = repo.upsert_by_filter(&ctx(), "table_id", "t-x", patch).await;
        assert!(matches!(res, Err(RepoError::Validation(_))));
        assert_eq!(repo.count_by(&ctx(), "table_id", "t-x").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_business_id() {
        let repo = TableRepository::new(memory_db().await);
        let ctx = ctx();
        let t = table(1, 100);
        repo.insert_one(&ctx, &t).await.unwrap();

        assert!(repo.delete_by_business_id(&ctx, &t.table_id).await.unwrap());
        assert!(!repo.delete_by_business_id(&ctx, &t.table_id).await.unwrap());
        assert!(!repo.exists(&ctx, &t.table_id).await.unwrap());
    }
}
