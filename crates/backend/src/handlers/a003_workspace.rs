use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_workspace::{
    SelectProfessionRequest, ToggleHazardRequest, ToggleHazardResponse, Workspace, WorkspaceId,
    WorkspaceResponse,
};
use contracts::shared::notification::{Notice, NoticeResponse};
use uuid::Uuid;

use crate::domain::a003_workspace::service;
use crate::shared::error::AppResult;
use crate::shared::state::AppState;

/// POST /api/workspaces
pub async fn create(State(state): State<AppState>) -> (StatusCode, Json<Workspace>) {
    (StatusCode::CREATED, Json(service::create(&state).await))
}

/// GET /api/workspaces/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Workspace>> {
    Ok(Json(service::get_by_id(&state, WorkspaceId(id)).await?))
}

/// DELETE /api/workspaces/:id
pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NoticeResponse>> {
    service::reset(&state, WorkspaceId(id)).await?;
    Ok(Json(Notice::info("Рабочее пространство сброшено").into()))
}

/// PUT /api/workspaces/:id/draft/profession
pub async fn select_profession(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectProfessionRequest>,
) -> AppResult<Json<WorkspaceResponse>> {
    let workspace = service::select_profession(&state, WorkspaceId(id), request.profession_id).await?;
    Ok(Json(WorkspaceResponse::silent(workspace)))
}

/// DELETE /api/workspaces/:id/draft/profession
pub async fn clear_profession(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WorkspaceResponse>> {
    let workspace = service::clear_profession(&state, WorkspaceId(id)).await?;
    Ok(Json(WorkspaceResponse::silent(workspace)))
}

/// POST /api/workspaces/:id/draft/hazards/toggle
pub async fn toggle_hazard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ToggleHazardRequest>,
) -> AppResult<Json<ToggleHazardResponse>> {
    let (selected, workspace) = service::toggle_hazard(&state, WorkspaceId(id), &request.name).await?;
    Ok(Json(ToggleHazardResponse {
        workspace,
        selected,
    }))
}

/// POST /api/workspaces/:id/draft/commit
pub async fn commit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WorkspaceResponse>> {
    let (outcome, workspace) = service::commit(&state, WorkspaceId(id)).await?;
    Ok(Json(WorkspaceResponse::with_notice(
        workspace,
        Notice::success(outcome.message()),
    )))
}

/// POST /api/workspaces/:id/draft/cancel
pub async fn cancel_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WorkspaceResponse>> {
    let workspace = service::cancel_edit(&state, WorkspaceId(id)).await?;
    Ok(Json(WorkspaceResponse::silent(workspace)))
}

/// POST /api/workspaces/:id/entries/:index/edit
pub async fn start_edit(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<Json<WorkspaceResponse>> {
    let workspace = service::start_edit(&state, WorkspaceId(id), index).await?;
    Ok(Json(WorkspaceResponse::silent(workspace)))
}

/// DELETE /api/workspaces/:id/entries/:index
pub async fn remove_entry(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<Json<WorkspaceResponse>> {
    let (_, workspace) = service::remove_entry(&state, WorkspaceId(id), index).await?;
    Ok(Json(WorkspaceResponse::with_notice(
        workspace,
        Notice::success("Профессия удалена"),
    )))
}

/// DELETE /api/workspaces/:id/entries
pub async fn clear_entries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WorkspaceResponse>> {
    let (_, workspace) = service::clear_entries(&state, WorkspaceId(id)).await?;
    Ok(Json(WorkspaceResponse::with_notice(
        workspace,
        Notice::success("Список очищен"),
    )))
}
