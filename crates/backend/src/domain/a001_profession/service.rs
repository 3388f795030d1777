use contracts::domain::a001_profession::aggregate::{ProfessionCard, ProfessionQuery};

use crate::shared::error::{AppError, AppResult};
use crate::shared::state::AppState;

/// Поиск по справочнику профессий с лимитом из конфигурации
pub async fn search(state: &AppState, query: &ProfessionQuery) -> AppResult<Vec<ProfessionCard>> {
    let limit = state.config.catalog.effective_limit(query.limit);
    let found = state
        .catalogs
        .professions
        .search(&query.search, limit)
        .await?;
    tracing::debug!("Profession search {:?}: {} found", query.search, found.len());
    Ok(found)
}

/// Профессия по id; неизвестный id является ошибкой
pub async fn get_by_id(state: &AppState, id: i64) -> AppResult<ProfessionCard> {
    state
        .catalogs
        .professions
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Профессия {} не найдена в справочнике", id)))
}
