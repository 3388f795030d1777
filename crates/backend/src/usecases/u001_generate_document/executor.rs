use chrono::{Local, Utc};
use contracts::domain::a003_workspace::{Entry, WorkspaceId};
use contracts::enums::document_kind::DocumentKind;
use contracts::shared::document::{build_list_payload, build_single_card_payload, DocumentPayload};
use contracts::usecases::u001_generate_document::{GenerationProgress, GenerationStatus, JobId};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::tracker::{GenerationTracker, TrackerError};
use crate::domain::a004_history::repository::{HistoryRepository, HistoryScope};
use crate::shared::config::GenerationConfig;
use crate::shared::error::{AppError, AppResult};

/// Завершённые задания живут в трекере не дольше суток
const JOB_RETENTION_HOURS: i64 = 24;

/// Что формировать
enum JobRequest {
    /// Документ по снимку всего списка; попадает в историю владельца
    List {
        entries: Vec<Entry>,
        doc_type: DocumentKind,
        scope: HistoryScope,
    },
    /// Личная карточка одной профессии; в историю не попадает
    SingleCard { entry: Entry },
}

impl JobRequest {
    /// Запись попадает в историю, которая удаляется вместе с пространством
    fn is_anonymous(&self) -> bool {
        matches!(
            self,
            JobRequest::List {
                scope: HistoryScope::Workspace(_),
                ..
            }
        )
    }
}

impl From<TrackerError> for AppError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::UnknownJob => AppError::not_found("Задание не найдено"),
            TrackerError::Busy(_) => AppError::conflict("Документ уже формируется"),
            TrackerError::Finished(_) => AppError::conflict("Задание уже завершено"),
            TrackerError::NotReady(GenerationStatus::Pending) => {
                AppError::conflict("Документ ещё формируется")
            }
            TrackerError::NotReady(_) => AppError::conflict("Документ недоступен"),
        }
    }
}

/// Executor для UseCase формирования документов
#[derive(Clone)]
pub struct GenerationExecutor {
    tracker: GenerationTracker,
    history: HistoryRepository,
    config: GenerationConfig,
}

impl GenerationExecutor {
    pub fn new(tracker: GenerationTracker, history: HistoryRepository, config: GenerationConfig) -> Self {
        Self {
            tracker,
            history,
            config,
        }
    }

    /// Запустить формирование по снимку списка (создаёт async task и возвращает прогресс)
    pub async fn start_list(
        &self,
        workspace_id: WorkspaceId,
        entries: Vec<Entry>,
        doc_type: DocumentKind,
        scope: HistoryScope,
    ) -> AppResult<GenerationProgress> {
        let progress = GenerationProgress::pending(workspace_id, doc_type, false, entries.len());
        tracing::info!(
            "Starting {} generation for workspace {} ({} professions, history {})",
            doc_type,
            workspace_id,
            entries.len(),
            scope
        );
        self.launch(
            progress,
            JobRequest::List {
                entries,
                doc_type,
                scope,
            },
            Duration::from_millis(self.config.latency_ms),
        )
        .await
    }

    /// Запустить формирование личной карточки по одной позиции
    pub async fn start_single_card(
        &self,
        workspace_id: WorkspaceId,
        entry: Entry,
    ) -> AppResult<GenerationProgress> {
        let progress = GenerationProgress::pending(workspace_id, DocumentKind::Anketa, true, 1);
        tracing::info!(
            "Starting single card generation for workspace {}: {}",
            workspace_id,
            entry.profession_name
        );
        self.launch(
            progress,
            JobRequest::SingleCard { entry },
            Duration::from_millis(self.config.single_card_latency_ms),
        )
        .await
    }

    async fn launch(
        &self,
        progress: GenerationProgress,
        request: JobRequest,
        latency: Duration,
    ) -> AppResult<GenerationProgress> {
        self.tracker.cleanup_old_jobs(JOB_RETENTION_HOURS).await;

        let job_id = progress.job_id;
        let token = CancellationToken::new();
        self.tracker
            .register(progress.clone(), token.clone(), request.is_anonymous())
            .await?;

        let worker = self.clone();
        let handle = tokio::spawn(async move { worker.run(job_id, request, latency, token).await });

        let tracker = self.tracker.clone();
        tokio::spawn(async move {
            if let Err(e) = handle.await {
                tracing::error!("Generation job {} failed: {}", job_id, e);
                tracker
                    .fail(job_id, "Не удалось сформировать документ".into())
                    .await;
            }
        });

        Ok(progress)
    }

    async fn run(self, job_id: JobId, request: JobRequest, latency: Duration, token: CancellationToken) {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::info!("Generation job {} cancelled", job_id);
                return;
            }
            _ = tokio::time::sleep(latency) => {}
        }

        let today = Local::now().date_naive();
        let completed = match request {
            JobRequest::List {
                entries,
                doc_type,
                scope,
            } => {
                let payload = build_list_payload(&entries, doc_type, today);
                let history = self.history.clone();
                self.tracker
                    .complete(job_id, payload, move || async move {
                        let outcome = history.append(&scope, entries, doc_type, Utc::now()).await;
                        if outcome.is_appended() {
                            tracing::info!("History record {} added for {}", outcome.record_id(), scope);
                        } else {
                            tracing::debug!("Duplicate of history record {} skipped", outcome.record_id());
                        }
                        Some(outcome)
                    })
                    .await
            }
            JobRequest::SingleCard { entry } => {
                let payload = build_single_card_payload(&entry, today);
                self.tracker.complete(job_id, payload, || async { None }).await
            }
        };

        if completed {
            tracing::info!("Generation job {} completed", job_id);
        } else {
            tracing::debug!("Generation job {} finished elsewhere, result dropped", job_id);
        }
    }

    pub async fn get_progress(&self, job_id: JobId) -> AppResult<GenerationProgress> {
        self.tracker
            .get_progress(job_id)
            .await
            .ok_or_else(|| TrackerError::UnknownJob.into())
    }

    pub async fn cancel(&self, job_id: JobId) -> AppResult<GenerationProgress> {
        let progress = self.tracker.cancel(job_id).await?;
        tracing::info!("Generation job {} cancel requested", job_id);
        Ok(progress)
    }

    /// Отменить задания, чей результат ушёл бы в анонимную историю пространства
    pub async fn cancel_anonymous(&self, workspace_id: WorkspaceId) -> usize {
        self.tracker.cancel_anonymous(workspace_id).await
    }

    pub async fn download(&self, job_id: JobId) -> AppResult<DocumentPayload> {
        let (_, payload) = self.tracker.payload(job_id).await?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor(latency_ms: u64) -> (GenerationExecutor, HistoryRepository) {
        let history = HistoryRepository::new();
        let config = GenerationConfig {
            latency_ms,
            single_card_latency_ms: latency_ms,
        };
        (
            GenerationExecutor::new(GenerationTracker::new(), history.clone(), config),
            history,
        )
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry {
                profession_id: 80,
                profession_name: "Бетонщик".into(),
                hazards: vec!["Электрический ток".into()],
            },
            Entry {
                profession_id: 300,
                profession_name: "Маляр".into(),
                hazards: Vec::new(),
            },
        ]
    }

    async fn wait_finished(executor: &GenerationExecutor, job_id: JobId) -> GenerationProgress {
        for _ in 0..200 {
            let progress = executor.get_progress(job_id).await.unwrap();
            if progress.status.is_finished() {
                return progress;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job {job_id} did not finish");
    }

    #[tokio::test]
    async fn test_list_job_records_history_once() {
        let (executor, history) = executor(0);
        let ws = WorkspaceId::new_v4();
        let scope = HistoryScope::Workspace(ws);

        for _ in 0..2 {
            let job = executor
                .start_list(ws, entries(), DocumentKind::Normy, scope.clone())
                .await
                .unwrap();
            let done = wait_finished(&executor, job.job_id).await;
            assert_eq!(done.status, GenerationStatus::Completed);
            assert_eq!(done.file_name.as_deref(), Some("normy-vydachi-siz.txt"));
        }

        let records = history.list(&scope).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].professions.len(), 2);
    }

    #[tokio::test]
    async fn test_second_job_for_workspace_conflicts() {
        let (executor, _) = executor(60_000);
        let ws = WorkspaceId::new_v4();
        let scope = HistoryScope::Workspace(ws);

        let first = executor
            .start_list(ws, entries(), DocumentKind::Normy, scope.clone())
            .await
            .unwrap();
        let second = executor
            .start_list(ws, entries(), DocumentKind::Anketa, scope)
            .await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        let download = executor.download(first.job_id).await;
        assert!(matches!(download, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_cancelled_job_leaves_no_history() {
        let (executor, history) = executor(60_000);
        let ws = WorkspaceId::new_v4();
        let scope = HistoryScope::Workspace(ws);

        let job = executor
            .start_list(ws, entries(), DocumentKind::Normy, scope.clone())
            .await
            .unwrap();
        let cancelled = executor.cancel(job.job_id).await.unwrap();
        assert_eq!(cancelled.status, GenerationStatus::Cancelled);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(history.list(&scope).await.is_empty());
        assert!(matches!(executor.cancel(job.job_id).await, Err(AppError::Conflict(_))));

        // После отмены можно запустить новое задание
        executor
            .start_list(ws, entries(), DocumentKind::Normy, scope)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_single_card_skips_history() {
        let (executor, history) = executor(0);
        let ws = WorkspaceId::new_v4();
        let entry = entries().remove(1);

        let job = executor.start_single_card(ws, entry).await.unwrap();
        assert!(job.single_card);
        let done = wait_finished(&executor, job.job_id).await;
        assert_eq!(done.file_name.as_deref(), Some("anketa-Маляр.txt"));
        assert!(done.history_record_id.is_none());

        let payload = executor.download(job.job_id).await.unwrap();
        let text = String::from_utf8(payload.bytes).unwrap();
        assert!(text.contains("Профессия: Маляр\n"));
        assert!(history.list(&HistoryScope::Workspace(ws)).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let (executor, _) = executor(0);
        let id = uuid::Uuid::new_v4();
        assert!(matches!(executor.get_progress(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(executor.download(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_user_job_survives_workspace_cancel() {
        let (executor, history) = executor(50);
        let ws = WorkspaceId::new_v4();
        let user = HistoryScope::User("ivan@company.ru".into());

        let job = executor
            .start_list(ws, entries(), DocumentKind::Normy, user.clone())
            .await
            .unwrap();
        assert_eq!(executor.cancel_anonymous(ws).await, 0);

        let done = wait_finished(&executor, job.job_id).await;
        assert_eq!(done.status, GenerationStatus::Completed);
        assert_eq!(history.list(&user).await.len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_job_cancelled_with_workspace() {
        let (executor, history) = executor(60_000);
        let ws = WorkspaceId::new_v4();
        let scope = HistoryScope::Workspace(ws);

        let job = executor
            .start_list(ws, entries(), DocumentKind::Normy, scope.clone())
            .await
            .unwrap();
        assert_eq!(executor.cancel_anonymous(ws).await, 1);

        let progress = executor.get_progress(job.job_id).await.unwrap();
        assert_eq!(progress.status, GenerationStatus::Cancelled);
        assert!(history.list(&scope).await.is_empty());
    }
}
