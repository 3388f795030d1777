use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a003_workspace::WorkspaceId;
use contracts::shared::notification::Notice;
use contracts::usecases::u001_generate_document::{GenerateRequest, GenerationProgress};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{a003_workspace, a004_history};
use crate::shared::error::AppResult;
use crate::shared::format::attachment_disposition;
use crate::shared::state::AppState;
use crate::system::auth::extractor::MaybeUser;

/// Прогресс задания вместе с уведомлением о завершении
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: GenerationProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl From<GenerationProgress> for JobResponse {
    fn from(job: GenerationProgress) -> Self {
        let notice = job.notice();
        Self { job, notice }
    }
}

/// POST /api/workspaces/:id/generate
pub async fn generate(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> AppResult<(StatusCode, Json<JobResponse>)> {
    let id = WorkspaceId(id);
    let snapshot = a003_workspace::service::generation_snapshot(&state, id).await?;
    let scope = a004_history::service::scope_for(user.as_ref(), id);
    let job = state
        .generation
        .start_list(id, snapshot, request.doc_type, scope)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(job.into())))
}

/// POST /api/workspaces/:id/entries/:index/card
pub async fn generate_single_card(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<(StatusCode, Json<JobResponse>)> {
    let id = WorkspaceId(id);
    let entry = a003_workspace::service::entry_snapshot(&state, id, index).await?;
    let job = state.generation.start_single_card(id, entry).await?;
    Ok((StatusCode::ACCEPTED, Json(job.into())))
}

/// GET /api/generation/:job_id
pub async fn get_progress(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> AppResult<Json<JobResponse>> {
    Ok(Json(state.generation.get_progress(job_id).await?.into()))
}

/// POST /api/generation/:job_id/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> AppResult<Json<JobResponse>> {
    Ok(Json(state.generation.cancel(job_id).await?.into()))
}

/// GET /api/generation/:job_id/download
pub async fn download(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> AppResult<Response> {
    let payload = state.generation.download(job_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, payload.mime_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(&payload.file_name),
            ),
        ],
        payload.bytes,
    )
        .into_response())
}
