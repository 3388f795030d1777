use chrono::{DateTime, Utc};
use contracts::domain::a003_workspace::{Workspace, WorkspaceId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Хранилище рабочих пространств в памяти процесса
#[derive(Clone, Default)]
pub struct WorkspaceRepository {
    items: Arc<RwLock<HashMap<WorkspaceId, Workspace>>>,
}

impl WorkspaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, workspace: Workspace) {
        let mut items = self.items.write().await;
        items.insert(workspace.id, workspace);
    }

    pub async fn get(&self, id: WorkspaceId) -> Option<Workspace> {
        let items = self.items.read().await;
        items.get(&id).cloned()
    }

    /// Изменить пространство под блокировкой записи; `None`, если его нет
    pub async fn modify<R>(
        &self,
        id: WorkspaceId,
        f: impl FnOnce(&mut Workspace) -> R,
    ) -> Option<(R, Workspace)> {
        let mut items = self.items.write().await;
        let workspace = items.get_mut(&id)?;
        let result = f(workspace);
        Some((result, workspace.clone()))
    }

    pub async fn remove(&self, id: WorkspaceId) -> Option<Workspace> {
        let mut items = self.items.write().await;
        items.remove(&id)
    }

    /// Удалить пространства, не менявшиеся с `cutoff`; возвращает их идентификаторы
    pub async fn evict_idle(&self, cutoff: DateTime<Utc>) -> Vec<WorkspaceId> {
        let mut items = self.items.write().await;
        let idle: Vec<WorkspaceId> = items
            .values()
            .filter(|ws| ws.updated_at < cutoff)
            .map(|ws| ws.id)
            .collect();
        for id in &idle {
            items.remove(id);
        }
        idle
    }

    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }
}
