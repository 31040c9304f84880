//! Restaurant Server - 餐厅管理后端
//!
//! # 架构概述
//!
//! 基于嵌入式 SurrealDB 的 HTTP 服务, 提供用户、菜单、菜品、餐桌、
//! 订单、订单项与发票的增删改查, 以及 JWT 认证。
//!
//! # 模块结构
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── auth/          # JWT 令牌、Argon2 密码、认证中间件
//! ├── services/      # 注册登录、订单流程、目录规则
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库、仓储、请求上下文
//! └── utils/         # 错误转换、日志、校验、分页参数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
