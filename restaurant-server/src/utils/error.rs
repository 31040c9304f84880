//! 统一错误处理
//!
//! 错误类型来自 `shared::error`, 这里补充仓储错误到 [`AppError`] 的转换。
//!
//! | RepoError | ErrorCode | HTTP |
//! |-----------|-----------|------|
//! | NotFound | NotFound | 404 |
//! | Duplicate | AlreadyExists | 409 |
//! | Validation | ValidationFailed | 400 |
//! | Database | DatabaseError | 500 |
//! | DeadlineExceeded | TimeoutError | 503 |
//! | Cancelled | Cancelled | 503 |

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::auth::{JwtError, PasswordError};
use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::DeadlineExceeded => AppError::timeout(),
            RepoError::Cancelled => AppError::new(ErrorCode::Cancelled),
        }
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::MalformedToken(msg) => AppError::invalid_token(msg),
            other => AppError::internal(other.to_string()),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        tracing::error!(error = %err, "Password hashing failed");
        AppError::internal("Failed to hash password")
    }
}
