use serde::{Deserialize, Serialize};

use crate::domain::a001_profession::aggregate::ProfessionRef;
use crate::domain::a002_hazard::HazardSet;

/// Черновик позиции списка, который пользователь сейчас заполняет.
///
/// `editing_index = Some(i)` означает, что следующий `commit` заменит
/// позицию `i`, а не добавит новую.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoringDraft {
    pub selected_profession: Option<ProfessionRef>,
    #[serde(default)]
    pub selected_hazards: HazardSet,
    pub editing_index: Option<usize>,
}

impl AuthoringDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_profession(&mut self, profession: ProfessionRef) {
        self.selected_profession = Some(profession);
    }

    /// Поле поиска очищено: профессия больше не выбрана
    pub fn clear_profession(&mut self) {
        self.selected_profession = None;
    }

    pub fn toggle_hazard(&mut self, name: &str) -> bool {
        self.selected_hazards.toggle(name)
    }

    pub fn is_editing(&self) -> bool {
        self.editing_index.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_profession.is_none()
            && self.selected_hazards.is_empty()
            && self.editing_index.is_none()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
