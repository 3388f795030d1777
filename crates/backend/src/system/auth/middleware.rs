use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use contracts::system::auth::UserInfo;

use crate::shared::error::AppError;
use crate::shared::state::AppState;

/// Токен текущей сессии (кладётся в extensions вместе с пользователем)
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Определяет пользователя по токену, если он передан.
/// Запрос без токена или с неизвестным токеном проходит как анонимный.
pub async fn attach_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req).map(str::to_string) {
        match state.sessions.resolve(&token).await {
            Some(user) => {
                req.extensions_mut().insert(user);
                req.extensions_mut().insert(SessionToken(token));
            }
            None => tracing::debug!("Unknown session token, continuing as anonymous"),
        }
    }
    next.run(req).await
}

/// Middleware that requires an authenticated session
pub async fn require_auth(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<UserInfo>().is_none() {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(req).await)
}
