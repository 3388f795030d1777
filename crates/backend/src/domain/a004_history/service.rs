use contracts::domain::a003_workspace::WorkspaceId;
use contracts::domain::a004_history::{HistoryChangeResponse, HistoryRecordId, HistoryRecordView};
use contracts::shared::notification::Notice;
use contracts::system::auth::UserInfo;

use super::repository::HistoryScope;
use crate::shared::state::AppState;

/// Владелец истории: пользователь, если он вошёл, иначе пространство
pub fn scope_for(user: Option<&UserInfo>, workspace_id: WorkspaceId) -> HistoryScope {
    match user {
        Some(user) => HistoryScope::User(user.id.clone()),
        None => HistoryScope::Workspace(workspace_id),
    }
}

pub async fn list(state: &AppState, scope: &HistoryScope) -> Vec<HistoryRecordView> {
    state
        .history
        .list(scope)
        .await
        .iter()
        .map(HistoryRecordView::from)
        .collect()
}

/// Удаление записи; отсутствующая запись не ошибка
pub async fn remove_one(
    state: &AppState,
    user: &UserInfo,
    id: HistoryRecordId,
) -> HistoryChangeResponse {
    let removed = state
        .history
        .remove_one(&HistoryScope::User(user.id.clone()), id)
        .await;
    if removed {
        tracing::info!("History record {} removed by {}", id, user.id);
    } else {
        tracing::debug!("History record {} not found for {}", id, user.id);
    }
    HistoryChangeResponse {
        removed: usize::from(removed),
        notice: Notice::success("Запись удалена"),
    }
}

pub async fn clear_all(state: &AppState, user: &UserInfo) -> HistoryChangeResponse {
    let removed = state
        .history
        .clear_all(&HistoryScope::User(user.id.clone()))
        .await;
    tracing::info!("History of {} cleared ({} records)", user.id, removed);
    HistoryChangeResponse {
        removed,
        notice: Notice::success("История очищена"),
    }
}
