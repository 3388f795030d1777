use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draft::AuthoringDraft;
use super::entry::{CommitOutcome, Entry, EntryList};
use crate::domain::a001_profession::aggregate::ProfessionRef;
use crate::domain::common::{AggregateId, DomainError, DomainResult};

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор рабочей сессии (одна вкладка браузера)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(pub Uuid);

impl WorkspaceId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for WorkspaceId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WorkspaceId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Рабочее пространство: список профессий и черновик текущей позиции.
///
/// Единственный владелец состояния сессии; все изменения идут через методы ниже.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub entries: EntryList,
    pub draft: AuthoringDraft,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::new_with_id(WorkspaceId::new_v4())
    }

    pub fn new_with_id(id: WorkspaceId) -> Self {
        let now = Utc::now();
        Self {
            id,
            entries: EntryList::new(),
            draft: AuthoringDraft::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn select_profession(&mut self, profession: ProfessionRef) {
        self.draft.select_profession(profession);
        self.touch();
    }

    pub fn clear_profession(&mut self) {
        self.draft.clear_profession();
        self.touch();
    }

    pub fn toggle_hazard(&mut self, name: &str) -> bool {
        let selected = self.draft.toggle_hazard(name);
        self.touch();
        selected
    }

    pub fn commit(&mut self) -> DomainResult<CommitOutcome> {
        let outcome = self.entries.commit(&mut self.draft)?;
        self.touch();
        Ok(outcome)
    }

    /// Начать редактирование позиции; текущий черновик заменяется
    pub fn start_edit(&mut self, index: usize) -> DomainResult<()> {
        self.draft = self.entries.start_edit(index)?;
        self.touch();
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.draft.reset();
        self.touch();
    }

    /// Удалить позицию. Если редактировалась удалённая позиция или одна из
    /// сдвинутых после неё, черновик сбрасывается.
    pub fn remove(&mut self, index: usize) -> DomainResult<Entry> {
        let removed = self.entries.remove(index)?;
        if matches!(self.draft.editing_index, Some(editing) if editing >= index) {
            self.draft.reset();
        }
        self.touch();
        Ok(removed)
    }

    /// Очистить список. Для уже пустого списка возвращает `EmptyList`.
    pub fn clear(&mut self) -> DomainResult<usize> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyList("Список профессий уже пуст".into()));
        }
        let removed = self.entries.clear();
        if self.draft.is_editing() {
            self.draft.reset();
        }
        self.touch();
        Ok(removed)
    }

    /// Снимок списка для формирования документа по всем профессиям
    pub fn generation_snapshot(&self) -> DomainResult<Vec<Entry>> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyList(
                "Добавьте хотя бы одну профессию".into(),
            ));
        }
        Ok(self.entries.snapshot())
    }

    /// Снимок одной позиции (личная карточка по одной профессии)
    pub fn entry_snapshot(&self, index: usize) -> DomainResult<Entry> {
        self.entries.get(index).cloned().ok_or(DomainError::Index {
            index,
            len: self.entries.len(),
        })
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
