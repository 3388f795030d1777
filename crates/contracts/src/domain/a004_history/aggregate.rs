use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::a003_workspace::Entry;
use crate::enums::document_kind::DocumentKind;
use crate::shared::text::truncate_chars;

/// Длина превью списка профессий в карточке истории
const PREVIEW_LEN: usize = 80;

/// Идентификатор записи истории (производный от времени в миллисекундах)
pub type HistoryRecordId = i64;

/// Ключ дедупликации: вид документа и отпечаток снимка списка.
///
/// Отпечаток используется как быстрая проверка; совпадение всегда
/// подтверждается сравнением снимков по значению.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub doc_type: DocumentKind,
    pub fingerprint: String,
}

impl DedupKey {
    pub fn new(professions: &[Entry], doc_type: DocumentKind) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(doc_type.code().as_bytes());
        for entry in professions {
            hasher.update(entry.profession_id.to_le_bytes());
            hash_str(&mut hasher, &entry.profession_name);
            hasher.update((entry.hazards.len() as u64).to_le_bytes());
            for hazard in &entry.hazards {
                hash_str(&mut hasher, hazard);
            }
        }
        Self {
            doc_type,
            fingerprint: format!("{:x}", hasher.finalize()),
        }
    }
}

/// Строка с префиксом длины, чтобы границы полей не смешивались
fn hash_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

/// Запись о сформированном документе
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: HistoryRecordId,
    pub date: DateTime<Utc>,
    pub professions: Vec<Entry>,
    #[serde(rename = "type")]
    pub doc_type: DocumentKind,
    /// Отпечаток снимка, вычисляется при добавлении в историю
    #[serde(skip)]
    fingerprint: String,
}

impl HistoryRecord {
    fn matches(&self, key: &DedupKey, professions: &[Entry]) -> bool {
        // У записи, пришедшей через serde, отпечатка нет: сравниваем по значению
        let fingerprint_matches = self.fingerprint.is_empty() || self.fingerprint == key.fingerprint;
        self.doc_type == key.doc_type
            && fingerprint_matches
            && self.professions.as_slice() == professions
    }

    pub fn title(&self) -> &'static str {
        self.doc_type.display_name()
    }

    pub fn profession_count(&self) -> usize {
        self.professions.len()
    }

    /// Названия профессий через запятую, не длиннее 80 символов
    pub fn professions_preview(&self) -> String {
        let joined = self
            .professions
            .iter()
            .map(|p| p.profession_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        truncate_chars(&joined, PREVIEW_LEN).to_string()
    }
}

/// Результат добавления в историю
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended(HistoryRecordId),
    /// Такая же запись уже есть; история не изменилась
    Duplicate(HistoryRecordId),
}

impl AppendOutcome {
    pub fn record_id(&self) -> HistoryRecordId {
        match self {
            AppendOutcome::Appended(id) | AppendOutcome::Duplicate(id) => *id,
        }
    }

    pub fn is_appended(&self) -> bool {
        matches!(self, AppendOutcome::Appended(_))
    }
}

/// История формирований, новые записи первыми.
///
/// Не может содержать двух записей с равными по значению снимками и
/// одинаковым видом документа: повтор молча отбрасывается, исходная запись
/// не переносится и её дата не обновляется.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLedger {
    records: Vec<HistoryRecord>,
    #[serde(skip)]
    last_id: HistoryRecordId,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: HistoryRecordId) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_duplicate(
        &self,
        professions: &[Entry],
        doc_type: DocumentKind,
    ) -> Option<&HistoryRecord> {
        let key = DedupKey::new(professions, doc_type);
        self.find_by_key(&key, professions)
    }

    fn find_by_key(&self, key: &DedupKey, professions: &[Entry]) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.matches(key, professions))
    }

    /// Добавить запись, если такой ещё нет
    pub fn append(
        &mut self,
        professions: Vec<Entry>,
        doc_type: DocumentKind,
        now: DateTime<Utc>,
    ) -> AppendOutcome {
        let key = DedupKey::new(&professions, doc_type);
        if let Some(existing) = self.find_by_key(&key, &professions) {
            return AppendOutcome::Duplicate(existing.id);
        }

        let id = self.next_id(now);
        self.records.insert(
            0,
            HistoryRecord {
                id,
                date: now,
                professions,
                doc_type,
                fingerprint: key.fingerprint,
            },
        );
        AppendOutcome::Appended(id)
    }

    /// Миллисекунды от `now`, но строго больше любого выданного ранее id
    fn next_id(&mut self, now: DateTime<Utc>) -> HistoryRecordId {
        let floor = self
            .records
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        let id = now.timestamp_millis().max(floor + 1);
        self.last_id = id;
        id
    }

    /// Удалить запись; отсутствие записи не ошибка
    pub fn remove_one(&mut self, id: HistoryRecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }
}
