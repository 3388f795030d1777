use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a003_workspace::WorkspaceId;
use crate::domain::a004_history::{AppendOutcome, HistoryRecordId};
use crate::enums::document_kind::DocumentKind;
use crate::shared::notification::Notice;

pub type JobId = Uuid;

/// Статус задания на формирование
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Ожидает завершения
    Pending,
    /// Документ готов к скачиванию
    Completed,
    /// Отменено пользователем
    Cancelled,
    /// Ошибка формирования
    Failed,
}

impl GenerationStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, GenerationStatus::Pending)
    }
}

/// Прогресс задания на формирование документа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProgress {
    #[serde(rename = "jobId")]
    pub job_id: JobId,

    #[serde(rename = "workspaceId")]
    pub workspace_id: WorkspaceId,

    #[serde(rename = "docType")]
    pub doc_type: DocumentKind,

    /// Карточка по одной профессии (не попадает в историю)
    #[serde(rename = "singleCard")]
    pub single_card: bool,

    /// Количество профессий в снимке
    #[serde(rename = "professionCount")]
    pub profession_count: usize,

    pub status: GenerationStatus,

    /// Имя файла, когда документ готов
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,

    /// Запись истории, соответствующая документу (новая или уже существовавшая)
    #[serde(rename = "historyRecordId")]
    pub history_record_id: Option<HistoryRecordId>,

    /// Была ли добавлена новая запись в историю
    #[serde(rename = "historyAppended")]
    pub history_appended: bool,

    pub error: Option<String>,

    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,

    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl GenerationProgress {
    pub fn pending(
        workspace_id: WorkspaceId,
        doc_type: DocumentKind,
        single_card: bool,
        profession_count: usize,
    ) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            workspace_id,
            doc_type,
            single_card,
            profession_count,
            status: GenerationStatus::Pending,
            file_name: None,
            history_record_id: None,
            history_appended: false,
            error: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Документ готов; `history` пустой для личной карточки
    pub fn complete(&mut self, file_name: String, history: Option<&AppendOutcome>) {
        self.status = GenerationStatus::Completed;
        self.file_name = Some(file_name);
        self.history_record_id = history.map(AppendOutcome::record_id);
        self.history_appended = history.map_or(false, AppendOutcome::is_appended);
        self.completed_at = Some(Utc::now());
    }

    pub fn cancel(&mut self) {
        self.status = GenerationStatus::Cancelled;
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = GenerationStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
    }

    /// Уведомление о завершении задания
    pub fn notice(&self) -> Option<Notice> {
        match self.status {
            GenerationStatus::Pending => None,
            GenerationStatus::Completed if self.single_card => {
                Some(Notice::success("Личная карточка сформирована"))
            }
            GenerationStatus::Completed => Some(Notice::success(format!(
                "Документ «{}» сформирован",
                self.doc_type.display_name()
            ))),
            GenerationStatus::Cancelled => Some(Notice::info("Формирование отменено")),
            GenerationStatus::Failed => Some(Notice::error(
                self.error
                    .clone()
                    .unwrap_or_else(|| "Не удалось сформировать документ".into()),
            )),
        }
    }
}
