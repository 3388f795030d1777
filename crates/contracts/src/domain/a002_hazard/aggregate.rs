use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::shared::text::contains_ignore_case;

/// Опасность (вредный производственный фактор)
///
/// Идентичность определяется только `name`; `event` носит описательный характер.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardRef {
    pub name: String,
    #[serde(default)]
    pub event: String,
}

impl HazardRef {
    pub fn new(name: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event: event.into(),
        }
    }
}

/// Убрать повторы по имени, сохранив первое вхождение и порядок
pub fn unique_by_name(hazards: Vec<HazardRef>) -> Vec<HazardRef> {
    let mut seen = HashSet::new();
    hazards
        .into_iter()
        .filter(|h| seen.insert(h.name.clone()))
        .collect()
}

/// Отбор опасностей по подстроке имени без учёта регистра.
///
/// Чистая проекция справочника: выбранные опасности остаются выбранными,
/// даже если фильтр их скрывает.
pub fn filter_hazards<'a>(catalog: &'a [HazardRef], search: &str) -> Vec<&'a HazardRef> {
    catalog
        .iter()
        .filter(|h| search.is_empty() || contains_ignore_case(&h.name, search))
        .collect()
}
