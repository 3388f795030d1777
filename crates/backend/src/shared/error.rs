use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::common::{DomainError, FieldErrors};
use contracts::shared::notification::Notice;
use serde::Serialize;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Ошибки HTTP-слоя
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    NotFound(String),

    #[error("Требуется вход в систему")]
    Unauthorized,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(DomainError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Domain(DomainError::Index { .. }) => StatusCode::NOT_FOUND,
            AppError::Domain(DomainError::EmptyList(_)) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Domain(e) => e.kind(),
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized => "unauthorized",
            AppError::Conflict(_) => "conflict",
            AppError::Internal(_) => "internal",
        }
    }

    /// Уведомление для клиента: о пустом списке информируем, остальное ошибки
    pub fn notice(&self) -> Notice {
        match self {
            AppError::Domain(DomainError::EmptyList(message)) => Notice::info(message.clone()),
            AppError::Internal(_) => Notice::error("Внутренняя ошибка сервера"),
            other => Notice::error(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
    notice: Notice,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Domain(DomainError::Index { index, len }) => {
                tracing::warn!("Stale entry index {} (list length {})", index, len);
            }
            AppError::Internal(e) => tracing::error!("Internal error: {:#}", e),
            _ => {}
        }

        let fields = match &self {
            AppError::Domain(DomainError::Validation(fields)) => Some(fields.clone()),
            _ => None,
        };
        let error = match &self {
            AppError::Internal(_) => "Внутренняя ошибка сервера".to_string(),
            other => other.to_string(),
        };
        let body = ErrorBody {
            error,
            kind: self.kind(),
            fields,
            notice: self.notice(),
        };

        (self.status(), Json(body)).into_response()
    }
}
