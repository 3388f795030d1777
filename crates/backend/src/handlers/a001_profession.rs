use axum::extract::{Query, State};
use axum::Json;
use contracts::domain::a001_profession::aggregate::{ProfessionCard, ProfessionQuery};

use crate::domain::a001_profession;
use crate::shared::error::AppResult;
use crate::shared::state::AppState;

/// GET /api/professions?search=&limit=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<ProfessionQuery>,
) -> AppResult<Json<Vec<ProfessionCard>>> {
    Ok(Json(a001_profession::service::search(&state, &query).await?))
}
