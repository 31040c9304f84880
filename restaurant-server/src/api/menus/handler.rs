//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::Page;
use shared::models::{Menu, MenuCreate, MenuUpdate};
use shared::types::{DeleteResult, UpdateResult};

use crate::api::{AppJson, PageQuery, require_found};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::RequestContext;
use crate::utils::{AppResult, ErrorCode};

/// GET /menus - 分页获取菜单
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Menu>>> {
    Ok(Json(state.menus.find_page(&ctx, &query.to_request()).await?))
}

/// GET /menus/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<Menu>> {
    let menu = state.menus.find_by_business_id(&ctx, &id).await?;
    Ok(Json(require_found(menu, ErrorCode::MenuNotFound, &id)?))
}

/// POST /menus - 创建菜单
pub async fn create(
    State(state): State<ServerState>,
    ctx: RequestContext,
    AppJson(payload): AppJson<MenuCreate>,
) -> AppResult<Json<Menu>> {
    Ok(Json(state.catalog.create_menu(&ctx, payload).await?))
}

/// PATCH /menus/{id} - 更新菜单 (不存在时插入)
pub async fn update(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    AppJson(payload): AppJson<MenuUpdate>,
) -> AppResult<Json<UpdateResult>> {
    Ok(Json(state.catalog.update_menu(&ctx, &id, payload).await?))
}

/// DELETE /menus/{id} - 删除菜单
pub async fn delete(
    State(state): State<ServerState>,
    ctx: RequestContext,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResult>> {
    let result = state.catalog.delete_menu(&ctx, &id).await?;
    tracing::info!(menu_id = %id, user_id = %user.id, "Menu removed by user");
    Ok(Json(result))
}
