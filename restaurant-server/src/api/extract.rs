//! JSON body extractor that rejects with the API error envelope

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::AppError;

/// Drop-in for `Json<T>` on request bodies.
///
/// Bad syntax, a wrong field type, a missing field or a missing
/// `Content-Type` all become `ValidationFailed` (400) instead of axum's
/// plain-text 4xx.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let reason = match &rejection {
        JsonRejection::JsonDataError(_) => "invalid_field",
        JsonRejection::JsonSyntaxError(_) => "invalid_json",
        JsonRejection::MissingJsonContentType(_) => "missing_content_type",
        _ => "unreadable_body",
    };
    tracing::debug!(reason, error = %rejection.body_text(), "Rejected request body");
    AppError::validation(rejection.body_text()).with_detail("reason", reason)
}
