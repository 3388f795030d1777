use serde::{Deserialize, Serialize};

use super::draft::AuthoringDraft;
use crate::domain::a001_profession::aggregate::ProfessionRef;
use crate::domain::a002_hazard::HazardSet;
use crate::domain::common::{DomainError, DomainResult};

/// Профессия с выбранными опасностями, добавленная в рабочий список
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub profession_id: i64,
    pub profession_name: String,
    /// Названия опасностей в порядке выбора
    #[serde(default)]
    pub hazards: Vec<String>,
}

impl Entry {
    pub fn new(profession: &ProfessionRef, hazards: &HazardSet) -> Self {
        Self {
            profession_id: profession.id,
            profession_name: profession.name.clone(),
            hazards: hazards.to_vec(),
        }
    }

    pub fn profession(&self) -> ProfessionRef {
        ProfessionRef::new(self.profession_id, self.profession_name.clone())
    }
}

/// Результат сохранения черновика
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum CommitOutcome {
    Added(usize),
    Updated(usize),
}

impl CommitOutcome {
    pub fn index(&self) -> usize {
        match self {
            CommitOutcome::Added(i) | CommitOutcome::Updated(i) => *i,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CommitOutcome::Added(_) => "Профессия добавлена",
            CommitOutcome::Updated(_) => "Профессия обновлена",
        }
    }
}

/// Упорядоченный рабочий список профессий.
///
/// Позиция в списке и есть идентичность записи (номер "№" = позиция + 1).
/// Одна и та же профессия может встречаться несколько раз.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Копия списка для рендера и истории
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    fn check_index(&self, index: usize) -> DomainResult<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(DomainError::Index {
                index,
                len: self.entries.len(),
            })
        }
    }

    /// Сохранить черновик: добавить в конец или заменить редактируемую позицию.
    ///
    /// При успехе черновик сбрасывается. При ошибке ни список, ни черновик
    /// не меняются.
    pub fn commit(&mut self, draft: &mut AuthoringDraft) -> DomainResult<CommitOutcome> {
        let profession = draft
            .selected_profession
            .as_ref()
            .ok_or_else(|| DomainError::field("profession", "Выберите профессию"))?;
        let entry = Entry::new(profession, &draft.selected_hazards);

        let outcome = match draft.editing_index {
            Some(index) => {
                self.check_index(index)?;
                self.entries[index] = entry;
                CommitOutcome::Updated(index)
            }
            None => {
                self.entries.push(entry);
                CommitOutcome::Added(self.entries.len() - 1)
            }
        };

        draft.reset();
        Ok(outcome)
    }

    /// Удалить позицию; последующие позиции сдвигаются на одну вниз
    pub fn remove(&mut self, index: usize) -> DomainResult<Entry> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Очистить список без условий. Подтверждение запрашивает вызывающая сторона.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Загрузить позицию в новый черновик для редактирования.
    /// Опасности копируются, так что список не меняется до `commit`.
    pub fn start_edit(&self, index: usize) -> DomainResult<AuthoringDraft> {
        self.check_index(index)?;
        let entry = &self.entries[index];
        Ok(AuthoringDraft {
            selected_profession: Some(entry.profession()),
            selected_hazards: entry.hazards.iter().cloned().collect(),
            editing_index: Some(index),
        })
    }
}

impl From<Vec<Entry>> for EntryList {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}
