use chrono::{DateTime, Utc};
use contracts::domain::a003_workspace::{Entry, WorkspaceId};
use contracts::domain::a004_history::{AppendOutcome, HistoryLedger, HistoryRecord, HistoryRecordId};
use contracts::domain::common::AggregateId;
use contracts::enums::document_kind::DocumentKind;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Владелец истории: пользователь или анонимное рабочее пространство
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HistoryScope {
    User(String),
    Workspace(WorkspaceId),
}

impl std::fmt::Display for HistoryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryScope::User(id) => write!(f, "user:{}", id),
            HistoryScope::Workspace(id) => write!(f, "workspace:{}", id.as_string()),
        }
    }
}

/// Истории формирований по владельцам
#[derive(Clone, Default)]
pub struct HistoryRepository {
    ledgers: Arc<RwLock<HashMap<HistoryScope, HistoryLedger>>>,
}

impl HistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(
        &self,
        scope: &HistoryScope,
        professions: Vec<Entry>,
        doc_type: DocumentKind,
        now: DateTime<Utc>,
    ) -> AppendOutcome {
        let mut ledgers = self.ledgers.write().await;
        ledgers
            .entry(scope.clone())
            .or_default()
            .append(professions, doc_type, now)
    }

    /// Записи владельца, новые первыми
    pub async fn list(&self, scope: &HistoryScope) -> Vec<HistoryRecord> {
        let ledgers = self.ledgers.read().await;
        ledgers
            .get(scope)
            .map(|l| l.records().to_vec())
            .unwrap_or_default()
    }

    pub async fn remove_one(&self, scope: &HistoryScope, id: HistoryRecordId) -> bool {
        let mut ledgers = self.ledgers.write().await;
        ledgers
            .get_mut(scope)
            .map(|l| l.remove_one(id))
            .unwrap_or(false)
    }

    pub async fn clear_all(&self, scope: &HistoryScope) -> usize {
        let mut ledgers = self.ledgers.write().await;
        ledgers.get_mut(scope).map(HistoryLedger::clear_all).unwrap_or(0)
    }

    /// Удалить историю владельца целиком (сброс анонимного пространства)
    pub async fn drop_scope(&self, scope: &HistoryScope) -> usize {
        let mut ledgers = self.ledgers.write().await;
        ledgers.remove(scope).map(|l| l.len()).unwrap_or(0)
    }
}
