use axum::extract::{Json, State};
use contracts::shared::notification::{Notice, NoticeResponse};
use contracts::system::auth::{
    validate_login, validate_profile, validate_register, LoginRequest, LoginResponse,
    ProfileResponse, RegisterRequest, UpdateProfileRequest, UserInfo,
};

use crate::shared::error::{AppError, AppResult};
use crate::shared::state::AppState;
use crate::system::auth::extractor::{CurrentSession, CurrentUser};

/// Login handler
///
/// Учётные данные только проверяются на заполненность: любой пароль
/// от 8 символов открывает сессию.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate_login(&request)?;

    let (access_token, user) = state.sessions.open(&request.email, None).await;
    tracing::info!("User {} logged in", user.id);

    Ok(Json(LoginResponse {
        access_token,
        user,
        notice: Notice::success("Вход выполнен успешно!"),
    }))
}

/// Register handler
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate_register(&request)?;

    let (access_token, user) = state
        .sessions
        .open(&request.email, Some(&request.name))
        .await;
    tracing::info!("User {} registered", user.id);

    Ok(Json(LoginResponse {
        access_token,
        user,
        notice: Notice::success("Аккаунт создан!"),
    }))
}

/// Logout handler (protected by middleware)
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(token): CurrentSession,
) -> Json<NoticeResponse> {
    state.sessions.revoke(&token).await;
    Json(Notice::success("Вы вышли из аккаунта").into())
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserInfo> {
    Json(user)
}

/// Update display name (protected by middleware)
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    validate_profile(&request)?;

    let user = state
        .sessions
        .rename(&user.id, &request.name)
        .await
        .ok_or(AppError::Unauthorized)?;
    tracing::info!("User {} updated profile", user.id);

    Ok(Json(ProfileResponse {
        user,
        notice: Notice::success("Данные сохранены"),
    }))
}
