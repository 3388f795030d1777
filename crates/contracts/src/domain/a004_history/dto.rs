use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{HistoryRecord, HistoryRecordId};
use crate::domain::a003_workspace::Entry;
use crate::enums::document_kind::DocumentKind;
use crate::shared::notification::Notice;

/// Запись истории в том виде, в каком её показывает профиль
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecordView {
    pub id: HistoryRecordId,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub doc_type: DocumentKind,
    pub title: String,
    #[serde(rename = "professionCount")]
    pub profession_count: usize,
    pub preview: String,
    pub professions: Vec<Entry>,
}

impl From<&HistoryRecord> for HistoryRecordView {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            doc_type: record.doc_type,
            title: record.title().to_string(),
            profession_count: record.profession_count(),
            preview: record.professions_preview(),
            professions: record.professions.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryListResponse {
    pub records: Vec<HistoryRecordView>,
}

/// Результат удаления из истории
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryChangeResponse {
    pub removed: usize,
    pub notice: Notice,
}
