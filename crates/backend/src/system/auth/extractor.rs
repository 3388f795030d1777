use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::UserInfo;

use super::middleware::SessionToken;
use crate::shared::error::AppError;

/// Extractor for the current user
/// Usage in handlers: `async fn handler(CurrentUser(user): CurrentUser) -> Response`
pub struct CurrentUser(pub UserInfo);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // UserInfo is set by the attach_user middleware
        parts
            .extensions
            .get::<UserInfo>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Пользователь, если запрос пришёл с действующей сессией
pub struct MaybeUser(pub Option<UserInfo>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<UserInfo>().cloned()))
    }
}

/// Токен текущей сессии
pub struct CurrentSession(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionToken>()
            .map(|t| CurrentSession(t.0.clone()))
            .ok_or(AppError::Unauthorized)
    }
}
