//! Order Item API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /orderItems | GET | 分页列表 |
//! | /orderItems | POST | 新建订单并批量写入订单项 |
//! | /orderItems/{id} | GET / PATCH | 单个订单项 |
//! | /orderItems-order/{orderId} | GET | 某订单的订单项 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/orderItems", routes())
        .route("/orderItems-order/{order_id}", get(handler::items_by_order))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create_batch))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
}
