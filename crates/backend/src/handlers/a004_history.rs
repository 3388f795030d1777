use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a003_workspace::WorkspaceId;
use contracts::domain::a004_history::{HistoryChangeResponse, HistoryListResponse, HistoryRecordId};
use uuid::Uuid;

use crate::domain::a003_workspace;
use crate::domain::a004_history::repository::HistoryScope;
use crate::domain::a004_history::service;
use crate::shared::error::AppResult;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/workspaces/:id/history
pub async fn list_for_workspace(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<HistoryListResponse>> {
    let id = WorkspaceId(id);
    a003_workspace::service::get_by_id(&state, id).await?;
    let records = service::list(&state, &HistoryScope::Workspace(id)).await;
    Ok(Json(HistoryListResponse { records }))
}

/// GET /api/history
pub async fn list_for_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<HistoryListResponse> {
    let records = service::list(&state, &HistoryScope::User(user.id)).await;
    Json(HistoryListResponse { records })
}

/// DELETE /api/history/:id
pub async fn remove_one(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<HistoryRecordId>,
) -> Json<HistoryChangeResponse> {
    Json(service::remove_one(&state, &user, id).await)
}

/// DELETE /api/history
pub async fn clear_all(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<HistoryChangeResponse> {
    Json(service::clear_all(&state, &user).await)
}
