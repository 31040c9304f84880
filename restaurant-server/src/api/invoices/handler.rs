//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::Page;
use shared::models::{Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView};
use shared::types::UpdateResult;

use crate::api::{AppJson, PageQuery};
use crate::core::ServerState;
use crate::db::RequestContext;
use crate::utils::AppResult;

/// GET /invoices - 分页获取发票
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Invoice>>> {
    Ok(Json(state.invoices.find_page(&ctx, &query.to_request()).await?))
}

/// GET /invoices/{id} - 发票视图 (含订单项与应付金额)
pub async fn get_view(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<InvoiceView>> {
    Ok(Json(state.catalog.invoice_view(&ctx, &id).await?))
}

/// POST /invoices - 创建发票
pub async fn create(
    State(state): State<ServerState>,
    ctx: RequestContext,
    AppJson(payload): AppJson<InvoiceCreate>,
) -> AppResult<Json<Invoice>> {
    Ok(Json(state.catalog.create_invoice(&ctx, payload).await?))
}

/// PATCH /invoices/{id}
pub async fn update(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    AppJson(payload): AppJson<InvoiceUpdate>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(state.catalog.update_invoice(&ctx, &id, payload).await?))
}
