//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::Page;
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::types::UpdateResult;

use crate::api::{AppJson, PageQuery, require_found};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::RequestContext;
use crate::utils::{AppResult, ErrorCode};

/// GET /orders - 分页获取订单
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Order>>> {
    Ok(Json(state.orders.find_page(&ctx, &query.to_request()).await?))
}

/// GET /orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.find_by_business_id(&ctx, &id).await?;
    Ok(Json(require_found(order, ErrorCode::OrderNotFound, &id)?))
}

/// POST /orders - 创建订单 (餐桌必须存在)
pub async fn create(
    State(state): State<ServerState>,
    ctx: RequestContext,
    user: CurrentUser,
    AppJson(payload): AppJson<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.order_lifecycle.create_order(&ctx, payload).await?;
    tracing::info!(order_id = %order.order_id, user_id = %user.id, "Order created");
    Ok(Json(order))
}

/// PATCH /orders/{id}
pub async fn update(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    AppJson(payload): AppJson<OrderUpdate>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(state.order_lifecycle.update_order(&ctx, &id, payload).await?))
}
