use axum::extract::{Query, State};
use axum::Json;
use contracts::domain::a002_hazard::HazardRef;
use serde::Deserialize;

use crate::domain::a002_hazard;
use crate::shared::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HazardQuery {
    #[serde(default)]
    pub search: String,
}

/// GET /api/hazards?search=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HazardQuery>,
) -> Json<Vec<HazardRef>> {
    Json(a002_hazard::service::list(&state, &query.search))
}
