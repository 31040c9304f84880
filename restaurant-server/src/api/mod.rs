//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 用户注册、登录、查询
//! - [`menus`] - 菜单管理
//! - [`foods`] - 菜品管理
//! - [`tables`] - 餐桌管理
//! - [`orders`] - 订单管理
//! - [`order_items`] - 订单项管理
//! - [`invoices`] - 发票管理

mod extract;
pub mod middleware;

pub mod foods;
pub mod health;
pub mod invoices;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod tables;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

// Re-export common types for handlers
pub use crate::utils::types::PageQuery;
pub use extract::AppJson;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(menus::router())
        .merge(foods::router())
        .merge(tables::router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(invoices::router())
}

/// Build the fully configured application: routes, middleware and state
///
/// Used by the HTTP server and by router-level tests.
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // JWT 认证 - require_auth 内部跳过公共路由
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // outermost: the id exists before anything logs
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}

/// `None` from a direct lookup becomes the resource's not-found error
pub(crate) fn require_found<T>(found: Option<T>, code: ErrorCode, id: &str) -> AppResult<T> {
    found.ok_or_else(|| AppError::new(code).with_detail("id", id))
}
