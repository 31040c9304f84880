//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::Page;
use shared::models::{OrderItem, OrderItemBatch, OrderItemPack, OrderItemUpdate};
use shared::types::UpdateResult;

use crate::api::{AppJson, PageQuery, require_found};
use crate::core::ServerState;
use crate::db::RequestContext;
use crate::utils::{AppResult, ErrorCode};

/// GET /orderItems - 分页获取订单项
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<OrderItem>>> {
    Ok(Json(
        state.order_items.find_page(&ctx, &query.to_request()).await?,
    ))
}

/// GET /orderItems/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<OrderItem>> {
    let item = state.order_items.find_by_business_id(&ctx, &id).await?;
    Ok(Json(require_found(item, ErrorCode::OrderItemNotFound, &id)?))
}

/// GET /orderItems-order/{orderId} - 某订单的全部订单项
pub async fn items_by_order(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderItem>>> {
    Ok(Json(
        state.order_lifecycle.items_by_order(&ctx, &order_id).await?,
    ))
}

/// POST /orderItems - 新建订单并写入订单项
pub async fn create_batch(
    State(state): State<ServerState>,
    ctx: RequestContext,
    AppJson(pack): AppJson<OrderItemPack>,
) -> AppResult<Json<OrderItemBatch>> {
    Ok(Json(
        state
            .order_lifecycle
            .create_order_item_batch(&ctx, pack)
            .await?,
    ))
}

/// PATCH /orderItems/{id}
pub async fn update(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    AppJson(payload): AppJson<OrderItemUpdate>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(
        state
            .order_lifecycle
            .update_order_item(&ctx, &id, payload)
            .await?,
    ))
}
