//! 请求上下文
//!
//! 每个请求一个 [`RequestContext`]: 截止时间 + 取消令牌。
//! 所有仓储调用都经由 [`RequestContext::run`] 执行。

use std::future::Future;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::repository::{RepoError, RepoResult};
use crate::core::ServerState;

#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Instant,
    cancel: CancellationToken,
}

impl RequestContext {
    /// 独立上下文 (不跟随服务器关闭)
    pub fn new(timeout: Duration) -> Self {
        Self::with_cancellation(timeout, CancellationToken::new())
    }

    pub fn with_cancellation(timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            cancel,
        }
    }

    /// 距截止时间的剩余时长
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 在截止时间内执行数据库操作
    ///
    /// 超时返回 [`RepoError::DeadlineExceeded`], 取消返回 [`RepoError::Cancelled`]。
    pub async fn run<T, F>(&self, fut: F) -> RepoResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RepoError::Cancelled),
            res = tokio::time::timeout_at(self.deadline, fut) => match res {
                Ok(inner) => inner,
                Err(_) => {
                    tracing::warn!("Database operation exceeded request deadline");
                    Err(RepoError::DeadlineExceeded)
                }
            },
        }
    }
}

impl FromRequestParts<ServerState> for RequestContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.request_context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_inner_result() {
        let ctx = RequestContext::new(Duration::from_secs(5));
        let res = ctx.run(async { Ok::<_, RepoError>(7) }).await;
        assert_eq!(res.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = RequestContext::new(Duration::from_millis(10));
        let res = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, RepoError>(())
            })
            .await;
        assert!(matches!(res, Err(RepoError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_cancelled() {
        let token = CancellationToken::new();
        let ctx = RequestContext::with_cancellation(Duration::from_secs(5), token.child_token());
        token.cancel();
        assert!(ctx.is_cancelled());
        let res = ctx.run(async { Ok::<_, RepoError>(()) }).await;
        assert!(matches!(res, Err(RepoError::Cancelled)));
    }
}
