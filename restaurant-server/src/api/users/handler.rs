//! User API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::Page;
use shared::models::{LoginRequest, SignUpRequest, UserView};

use crate::api::{AppJson, PageQuery, require_found};
use crate::core::ServerState;
use crate::db::RequestContext;
use crate::utils::{AppResult, ErrorCode};

/// GET /users - 分页获取用户 (不含密码)
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<UserView>>> {
    let page = state.users.find_page(&ctx, &query.to_request()).await?;
    Ok(Json(page.map(UserView::from)))
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<UserView>> {
    let user = state.users.find_by_business_id(&ctx, &id).await?;
    let user = require_found(user, ErrorCode::UserNotFound, &id)?;
    Ok(Json(user.into()))
}

/// POST /users/signup - 注册
pub async fn sign_up(
    State(state): State<ServerState>,
    ctx: RequestContext,
    AppJson(req): AppJson<SignUpRequest>,
) -> AppResult<Json<UserView>> {
    let user = state.accounts.sign_up(&ctx, req).await?;
    Ok(Json(user))
}

/// PATCH /users/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    ctx: RequestContext,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<UserView>> {
    let user = state.accounts.login(&ctx, req).await?;
    Ok(Json(user))
}
