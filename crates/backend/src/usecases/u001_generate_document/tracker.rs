use contracts::domain::a003_workspace::WorkspaceId;
use contracts::domain::a004_history::AppendOutcome;
use contracts::shared::document::DocumentPayload;
use contracts::usecases::u001_generate_document::{GenerationProgress, GenerationStatus, JobId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Задание: прогресс, готовый файл и токен отмены
struct JobSlot {
    progress: GenerationProgress,
    payload: Option<DocumentPayload>,
    cancel: CancellationToken,
    /// Результат пишется в анонимную историю пространства
    anonymous: bool,
}

/// Ошибки переходов состояния задания
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    UnknownJob,
    /// Для пространства уже выполняется задание
    Busy(JobId),
    /// Задание уже завершено
    Finished(GenerationStatus),
    /// Документ ещё не готов
    NotReady(GenerationStatus),
}

/// Трекер заданий формирования (in-memory)
#[derive(Clone, Default)]
pub struct GenerationTracker {
    jobs: Arc<RwLock<HashMap<JobId, JobSlot>>>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Зарегистрировать задание; не более одного ожидающего задания на пространство
    pub async fn register(
        &self,
        progress: GenerationProgress,
        cancel: CancellationToken,
        anonymous: bool,
    ) -> Result<(), TrackerError> {
        let mut jobs = self.jobs.write().await;
        if let Some(busy) = jobs.values().find(|slot| {
            slot.progress.workspace_id == progress.workspace_id
                && slot.progress.status == GenerationStatus::Pending
        }) {
            return Err(TrackerError::Busy(busy.progress.job_id));
        }
        jobs.insert(
            progress.job_id,
            JobSlot {
                progress,
                payload: None,
                cancel,
                anonymous,
            },
        );
        Ok(())
    }

    pub async fn get_progress(&self, job_id: JobId) -> Option<GenerationProgress> {
        let jobs = self.jobs.read().await;
        jobs.get(&job_id).map(|slot| slot.progress.clone())
    }

    /// Завершить задание, если оно ещё ожидает.
    ///
    /// `record` выполняется под блокировкой трекера, поэтому отмена не может
    /// вклиниться между записью в историю и сменой статуса.
    pub async fn complete<F, Fut>(&self, job_id: JobId, payload: DocumentPayload, record: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<AppendOutcome>>,
    {
        let mut jobs = self.jobs.write().await;
        let Some(slot) = jobs.get_mut(&job_id) else {
            return false;
        };
        if slot.progress.status != GenerationStatus::Pending {
            return false;
        }
        let outcome = record().await;
        slot.progress
            .complete(payload.file_name.clone(), outcome.as_ref());
        slot.payload = Some(payload);
        true
    }

    pub async fn fail(&self, job_id: JobId, error: String) {
        let mut jobs = self.jobs.write().await;
        if let Some(slot) = jobs.get_mut(&job_id) {
            if slot.progress.status == GenerationStatus::Pending {
                slot.progress.fail(error);
            }
        }
    }

    /// Отменить ожидающее задание
    pub async fn cancel(&self, job_id: JobId) -> Result<GenerationProgress, TrackerError> {
        let mut jobs = self.jobs.write().await;
        let slot = jobs.get_mut(&job_id).ok_or(TrackerError::UnknownJob)?;
        if slot.progress.status != GenerationStatus::Pending {
            return Err(TrackerError::Finished(slot.progress.status));
        }
        slot.cancel.cancel();
        slot.progress.cancel();
        Ok(slot.progress.clone())
    }

    /// Отменить ожидающие задания пространства с анонимной историей.
    /// Задания пользователя продолжают выполняться. Возвращает число отменённых.
    pub async fn cancel_anonymous(&self, workspace_id: WorkspaceId) -> usize {
        let mut jobs = self.jobs.write().await;
        let mut cancelled = 0;
        for slot in jobs.values_mut().filter(|s| {
            s.anonymous
                && s.progress.workspace_id == workspace_id
                && s.progress.status == GenerationStatus::Pending
        }) {
            slot.cancel.cancel();
            slot.progress.cancel();
            cancelled += 1;
        }
        cancelled
    }

    /// Готовый файл вместе с прогрессом
    pub async fn payload(
        &self,
        job_id: JobId,
    ) -> Result<(GenerationProgress, DocumentPayload), TrackerError> {
        let jobs = self.jobs.read().await;
        let slot = jobs.get(&job_id).ok_or(TrackerError::UnknownJob)?;
        match &slot.payload {
            Some(payload) => Ok((slot.progress.clone(), payload.clone())),
            None => Err(TrackerError::NotReady(slot.progress.status)),
        }
    }

    /// Удалить завершённые задания старше `max_age_hours` (для очистки памяти)
    pub async fn cleanup_old_jobs(&self, max_age_hours: i64) -> usize {
        let mut jobs = self.jobs.write().await;
        let now = chrono::Utc::now();
        let before = jobs.len();
        jobs.retain(|_, slot| match slot.progress.completed_at {
            Some(completed_at) => (now - completed_at).num_hours() < max_age_hours,
            None => true,
        });
        before - jobs.len()
    }
}
