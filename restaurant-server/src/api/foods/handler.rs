//! Food API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::Page;
use shared::models::{Food, FoodCreate, FoodUpdate};
use shared::types::UpdateResult;

use crate::api::{AppJson, PageQuery, require_found};
use crate::core::ServerState;
use crate::db::RequestContext;
use crate::utils::{AppResult, ErrorCode};

/// GET /foods - 分页获取菜品
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Food>>> {
    Ok(Json(state.foods.find_page(&ctx, &query.to_request()).await?))
}

/// GET /foods/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<Food>> {
    let food = state.foods.find_by_business_id(&ctx, &id).await?;
    Ok(Json(require_found(food, ErrorCode::FoodNotFound, &id)?))
}

/// POST /foods - 创建菜品 (按分类自动归入菜单)
pub async fn create(
    State(state): State<ServerState>,
    ctx: RequestContext,
    AppJson(payload): AppJson<FoodCreate>,
) -> AppResult<Json<Food>> {
    Ok(Json(state.catalog.create_food(&ctx, payload).await?))
}

/// PATCH /foods/{id}
pub async fn update(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    AppJson(payload): AppJson<FoodUpdate>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(state.catalog.update_food(&ctx, &id, payload).await?))
}
