//! 认证模块
//!
//! - [`JwtService`] - JWT 令牌服务 (access + refresh 令牌对)
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`password`] - Argon2id 密码哈希

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenPair, TokenSubject};
pub use middleware::require_auth;
pub use password::{PasswordError, hash_password, verify_password};
