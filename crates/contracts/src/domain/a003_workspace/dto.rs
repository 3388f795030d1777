use serde::{Deserialize, Serialize};

use super::aggregate::Workspace;
use crate::shared::notification::Notice;

/// Выбор профессии из справочника в черновик
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectProfessionRequest {
    pub profession_id: i64,
}

/// Переключение опасности в черновике
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleHazardRequest {
    pub name: String,
}

/// Состояние рабочего пространства после изменения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    pub workspace: Workspace,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notice: Option<Notice>,
}

impl WorkspaceResponse {
    pub fn silent(workspace: Workspace) -> Self {
        Self {
            workspace,
            notice: None,
        }
    }

    pub fn with_notice(workspace: Workspace, notice: Notice) -> Self {
        Self {
            workspace,
            notice: Some(notice),
        }
    }
}

/// Результат переключения опасности
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleHazardResponse {
    pub workspace: Workspace,
    /// Опасность выбрана после переключения
    pub selected: bool,
}
