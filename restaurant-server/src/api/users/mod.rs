//! User API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /users | GET | 分页列表 | 是 |
//! | /users/{id} | GET | 单个用户 | 是 |
//! | /users/signup | POST | 注册 | 无 |
//! | /users/login | PATCH | 登录, 轮换令牌 | 无 |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/signup", post(handler::sign_up))
        .route("/login", patch(handler::login))
        .route("/{id}", get(handler::get_by_id))
}
