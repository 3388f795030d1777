use chrono::{DateTime, Duration, Utc};
use contracts::domain::a003_workspace::{CommitOutcome, Entry, Workspace, WorkspaceId};
use contracts::domain::common::{DomainError, DomainResult};

use crate::domain::a004_history::repository::HistoryScope;
use crate::domain::{a001_profession, a002_hazard};
use crate::shared::error::{AppError, AppResult};
use crate::shared::state::AppState;

fn not_found(id: WorkspaceId) -> AppError {
    AppError::not_found(format!("Рабочее пространство {} не найдено", id))
}

/// Доменная операция над пространством под блокировкой записи
async fn modify<R>(
    state: &AppState,
    id: WorkspaceId,
    f: impl FnOnce(&mut Workspace) -> DomainResult<R>,
) -> AppResult<(R, Workspace)> {
    let (result, workspace) = state
        .workspaces
        .modify(id, f)
        .await
        .ok_or_else(|| not_found(id))?;
    Ok((result?, workspace))
}

/// Создание нового рабочего пространства; заодно удаляются давно забытые
pub async fn create(state: &AppState) -> Workspace {
    evict_idle(state, Utc::now()).await;
    let workspace = Workspace::new();
    state.workspaces.insert(workspace.clone()).await;
    tracing::info!("Workspace {} created", workspace.id);
    workspace
}

pub async fn get_by_id(state: &AppState, id: WorkspaceId) -> AppResult<Workspace> {
    state.workspaces.get(id).await.ok_or_else(|| not_found(id))
}

/// Сброс пространства: удаляется вместе с анонимной историей.
/// Задания вошедшего пользователя дорабатывают и пишут в его историю.
pub async fn reset(state: &AppState, id: WorkspaceId) -> AppResult<()> {
    state.workspaces.remove(id).await.ok_or_else(|| not_found(id))?;
    let (cancelled, dropped) = discard(state, id).await;
    tracing::info!(
        "Workspace {} reset ({} anonymous jobs cancelled, {} anonymous history records dropped)",
        id,
        cancelled,
        dropped
    );
    Ok(())
}

/// Удалить пространства, не менявшиеся дольше `workspace.idle_ttl_hours`
pub async fn evict_idle(state: &AppState, now: DateTime<Utc>) -> usize {
    let cutoff = now - Duration::hours(state.config.workspace.idle_ttl_hours);
    let evicted = state.workspaces.evict_idle(cutoff).await;
    for id in &evicted {
        let (cancelled, dropped) = discard(state, *id).await;
        tracing::debug!(
            "Idle workspace {} evicted ({} jobs cancelled, {} history records dropped)",
            id,
            cancelled,
            dropped
        );
    }
    if !evicted.is_empty() {
        tracing::info!("Evicted {} idle workspaces", evicted.len());
    }
    evicted.len()
}

/// Отмена заданий и удаление истории, привязанных к удалённому пространству
async fn discard(state: &AppState, id: WorkspaceId) -> (usize, usize) {
    // Сначала отмена: завершение под блокировкой трекера уже не запишет историю
    let cancelled = state.generation.cancel_anonymous(id).await;
    let dropped = state.history.drop_scope(&HistoryScope::Workspace(id)).await;
    (cancelled, dropped)
}

/// Выбрать профессию из справочника
pub async fn select_profession(
    state: &AppState,
    id: WorkspaceId,
    profession_id: i64,
) -> AppResult<Workspace> {
    let card = a001_profession::service::get_by_id(state, profession_id).await?;
    let (_, workspace) = modify(state, id, |ws| {
        ws.select_profession(card.to_ref());
        Ok(())
    })
    .await?;
    Ok(workspace)
}

pub async fn clear_profession(state: &AppState, id: WorkspaceId) -> AppResult<Workspace> {
    let (_, workspace) = modify(state, id, |ws| {
        ws.clear_profession();
        Ok(())
    })
    .await?;
    Ok(workspace)
}

/// Переключить опасность; имя должно быть в справочнике
pub async fn toggle_hazard(
    state: &AppState,
    id: WorkspaceId,
    name: &str,
) -> AppResult<(bool, Workspace)> {
    if !a002_hazard::service::is_known(state, name) {
        tracing::warn!("Toggle of unknown hazard {:?} rejected", name);
        return Err(DomainError::field("hazard", "Опасность не найдена в справочнике").into());
    }
    modify(state, id, |ws| Ok(ws.toggle_hazard(name))).await
}

/// Добавить черновик в список или сохранить редактируемую позицию
pub async fn commit(state: &AppState, id: WorkspaceId) -> AppResult<(CommitOutcome, Workspace)> {
    let (outcome, workspace) = modify(state, id, Workspace::commit).await?;
    tracing::info!("Workspace {}: entry {} {:?}", id, outcome.index() + 1, outcome);
    Ok((outcome, workspace))
}

pub async fn start_edit(state: &AppState, id: WorkspaceId, index: usize) -> AppResult<Workspace> {
    let (_, workspace) = modify(state, id, |ws| ws.start_edit(index)).await?;
    Ok(workspace)
}

pub async fn cancel_edit(state: &AppState, id: WorkspaceId) -> AppResult<Workspace> {
    let (_, workspace) = modify(state, id, |ws| {
        ws.cancel_edit();
        Ok(())
    })
    .await?;
    Ok(workspace)
}

pub async fn remove_entry(
    state: &AppState,
    id: WorkspaceId,
    index: usize,
) -> AppResult<(Entry, Workspace)> {
    let (removed, workspace) = modify(state, id, |ws| ws.remove(index)).await?;
    tracing::info!("Workspace {}: removed entry {} ({})", id, index + 1, removed.profession_name);
    Ok((removed, workspace))
}

pub async fn clear_entries(state: &AppState, id: WorkspaceId) -> AppResult<(usize, Workspace)> {
    let (removed, workspace) = modify(state, id, Workspace::clear).await?;
    tracing::info!("Workspace {}: cleared {} entries", id, removed);
    Ok((removed, workspace))
}

/// Снимок списка на момент запроса формирования
pub async fn generation_snapshot(state: &AppState, id: WorkspaceId) -> AppResult<Vec<Entry>> {
    let workspace = get_by_id(state, id).await?;
    Ok(workspace.generation_snapshot()?)
}

pub async fn entry_snapshot(state: &AppState, id: WorkspaceId, index: usize) -> AppResult<Entry> {
    let workspace = get_by_id(state, id).await?;
    Ok(workspace.entry_snapshot(index)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::catalog::Catalogs;
    use crate::shared::config::Config;
    use contracts::enums::document_kind::DocumentKind;

    fn state() -> AppState {
        AppState::new(Config::default(), Catalogs::embedded())
    }

    #[tokio::test]
    async fn test_authoring_flow() {
        let state = state();
        let id = create(&state).await.id;

        select_profession(&state, id, 80).await.unwrap();
        let (selected, _) = toggle_hazard(&state, id, "Электрический ток").await.unwrap();
        assert!(selected);
        let (outcome, ws) = commit(&state, id).await.unwrap();

        assert_eq!(outcome, CommitOutcome::Added(0));
        assert_eq!(ws.entries.len(), 1);
        assert_eq!(ws.entries.get(0).unwrap().hazards, vec!["Электрический ток"]);
        assert!(ws.draft.is_empty());
    }

    #[tokio::test]
    async fn test_commit_without_profession_is_validation_error() {
        let state = state();
        let id = create(&state).await.id;
        let err = commit(&state, id).await.unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_unknown_references() {
        let state = state();
        let id = create(&state).await.id;

        let err = select_profession(&state, id, 99_999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = toggle_hazard(&state, id, "Радиация").await.unwrap_err();
        assert_eq!(err.kind(), "validation");

        let err = get_by_id(&state, WorkspaceId::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_stale_index_and_empty_list() {
        let state = state();
        let id = create(&state).await.id;

        let err = remove_entry(&state, id, 0).await.unwrap_err();
        assert_eq!(err.kind(), "index");
        let err = clear_entries(&state, id).await.unwrap_err();
        assert_eq!(err.kind(), "empty_list");
        let err = generation_snapshot(&state, id).await.unwrap_err();
        assert_eq!(err.kind(), "empty_list");
    }

    #[tokio::test]
    async fn test_reset_removes_workspace() {
        let state = state();
        let id = create(&state).await.id;
        reset(&state, id).await.unwrap();
        assert!(get_by_id(&state, id).await.is_err());
        assert!(reset(&state, id).await.is_err());
    }

    #[tokio::test]
    async fn test_evict_idle_drops_anonymous_history() {
        let state = state();
        let id = create(&state).await.id;
        select_profession(&state, id, 80).await.unwrap();
        commit(&state, id).await.unwrap();
        let snapshot = generation_snapshot(&state, id).await.unwrap();
        let scope = HistoryScope::Workspace(id);
        state
            .history
            .append(&scope, snapshot, DocumentKind::Normy, Utc::now())
            .await;

        assert_eq!(evict_idle(&state, Utc::now()).await, 0);
        assert!(get_by_id(&state, id).await.is_ok());

        let ttl = Duration::hours(state.config.workspace.idle_ttl_hours);
        let later = Utc::now() + ttl + Duration::minutes(1);
        assert_eq!(evict_idle(&state, later).await, 1);
        assert!(get_by_id(&state, id).await.is_err());
        assert!(state.history.list(&scope).await.is_empty());
    }
}
