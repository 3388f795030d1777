use std::sync::Arc;

use crate::domain::a003_workspace::repository::WorkspaceRepository;
use crate::domain::a004_history::repository::HistoryRepository;
use crate::shared::catalog::Catalogs;
use crate::shared::config::Config;
use crate::system::auth::SessionStore;
use crate::usecases::u001_generate_document::{GenerationExecutor, GenerationTracker};

/// Общее состояние приложения, передаётся обработчикам через `State`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalogs: Catalogs,
    pub workspaces: WorkspaceRepository,
    pub history: HistoryRepository,
    pub sessions: SessionStore,
    pub generation: GenerationExecutor,
}

impl AppState {
    pub fn new(config: Config, catalogs: Catalogs) -> Self {
        let history = HistoryRepository::new();
        let generation = GenerationExecutor::new(
            GenerationTracker::new(),
            history.clone(),
            config.generation.clone(),
        );
        let sessions = SessionStore::new(config.auth.session_idle_ttl_hours);
        Self {
            config: Arc::new(config),
            catalogs,
            workspaces: WorkspaceRepository::new(),
            history,
            sessions,
            generation,
        }
    }
}
