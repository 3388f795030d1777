use serde::{Deserialize, Serialize};

use crate::shared::text::contains_ignore_case;

/// Ссылка на профессию из справочника
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfessionRef {
    pub id: i64,
    pub name: String,
}

impl ProfessionRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Строка справочника профессий, как она показывается в результатах поиска
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionCard {
    pub id: i64,
    pub name: String,
    /// Количество позиций СИЗ по типовым нормам
    #[serde(default)]
    pub siz_count: u32,
}

impl ProfessionCard {
    pub fn to_ref(&self) -> ProfessionRef {
        ProfessionRef::new(self.id, self.name.clone())
    }

    /// Подпись под названием в выпадающем списке
    pub fn siz_caption(&self) -> String {
        format!("СИЗ: {} позиций", self.siz_count)
    }
}

/// Параметры поиска по справочнику профессий
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionQuery {
    #[serde(default)]
    pub search: String,
    pub limit: Option<usize>,
}

/// Поиск по подстроке без учёта регистра, в порядке справочника.
///
/// Пустой запрос ничего не возвращает: список появляется только после
/// ввода хотя бы одного символа.
pub fn filter_professions<'a>(
    catalog: &'a [ProfessionCard],
    search: &str,
    limit: usize,
) -> Vec<&'a ProfessionCard> {
    if search.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|p| contains_ignore_case(&p.name, search))
        .take(limit)
        .collect()
}
