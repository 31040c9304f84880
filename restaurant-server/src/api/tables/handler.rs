//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::Page;
use shared::models::{Table, TableCreate, TableUpdate};
use shared::types::UpdateResult;

use crate::api::{AppJson, PageQuery, require_found};
use crate::core::ServerState;
use crate::db::RequestContext;
use crate::utils::{AppResult, ErrorCode};

/// GET /tables - 分页获取桌台
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Table>>> {
    Ok(Json(state.tables.find_page(&ctx, &query.to_request()).await?))
}

/// GET /tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<Table>> {
    let table = state.tables.find_by_business_id(&ctx, &id).await?;
    Ok(Json(require_found(table, ErrorCode::TableNotFound, &id)?))
}

/// POST /tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    ctx: RequestContext,
    AppJson(payload): AppJson<TableCreate>,
) -> AppResult<Json<Table>> {
    Ok(Json(state.catalog.create_table(&ctx, payload).await?))
}

/// PATCH /tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TableUpdate>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(state.catalog.update_table(&ctx, &id, payload).await?))
}
