//! Account Service
//!
//! 注册和登录: 组合 [`UserRepository`]、密码哈希与 [`JwtService`]。

use std::sync::Arc;

use shared::models::{LoginRequest, SignUpRequest, User, UserView};
use shared::util::{new_business_id, now_millis};

use crate::auth::{JwtService, TokenSubject, hash_password, verify_password};
use crate::db::RequestContext;
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    jwt: Arc<JwtService>,
}

impl AccountService {
    pub fn new(users: UserRepository, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// 注册新用户
    ///
    /// 邮箱或手机号已存在时返回 `UserAlreadyExists`, 不写入任何记录。
    pub async fn sign_up(&self, ctx: &RequestContext, req: SignUpRequest) -> AppResult<UserView> {
        validate_payload(&req)?;

        if self
            .users
            .email_or_phone_taken(ctx, &req.email, &req.phone)
            .await?
        {
            return Err(AppError::new(ErrorCode::UserAlreadyExists));
        }

        let password = hash_password(&req.password)?;
        let now = now_millis();
        let user_id = new_business_id();

        let pair = self.jwt.issue_token_pair(&TokenSubject {
            user_id: user_id.clone(),
            email: req.email.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
        })?;

        let user = User {
            user_id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            password,
            avatar: req.avatar,
            user_type: req.user_type.unwrap_or_default(),
            token: Some(pair.token),
            refresh_token: Some(pair.refresh_token),
            created_at: now,
            updated_at: now,
        };

        // 唯一索引兜住并发注册
        self.users.insert_one(ctx, &user).await.map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::UserAlreadyExists),
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.user_id, "User signed up");
        Ok(UserView::from(user))
    }

    /// 登录: 校验密码, 签发并保存新的令牌对
    pub async fn login(&self, ctx: &RequestContext, req: LoginRequest) -> AppResult<UserView> {
        validate_payload(&req)?;

        let Some(user) = self.users.find_by_email(ctx, &req.email).await? else {
            security_log!("WARN", "login_failed", reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        };

        let (valid, msg) = verify_password(&req.password, &user.password);
        if !valid {
            security_log!("WARN", "login_failed", user_id = user.user_id.as_str());
            return Err(AppError::with_message(ErrorCode::InvalidCredentials, msg));
        }

        let pair = self.jwt.issue_token_pair(&TokenSubject {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        })?;
        self.users
            .update_tokens(ctx, &user.user_id, &pair.token, &pair.refresh_token)
            .await?;

        let refreshed = self
            .users
            .find_by_business_id(ctx, &user.user_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

        security_log!("INFO", "login_success", user_id = refreshed.user_id.as_str());
        Ok(UserView::from(refreshed))
    }
}
