//! ``src/controller/mutations.rs``
//! ============================================================================
//! # Mutation Coordinator: create, update and delete against the jobs API
//!
//! Requests run on spawned tasks and report back as
//! [`TaskResult::MutationFinished`]. The job list itself is never patched
//! locally; a successful mutation leads to a refetch.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{Instrument, info, info_span};

use crate::api::client::JobsApi;
use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::model::app_state::ConfirmedDelete;
use crate::model::form::validate_draft;
use crate::model::job::{JobDraft, JobId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Job added successfully!",
            Self::Update => "Job updated successfully!",
            Self::Delete => "Job deleted successfully!",
        }
    }

    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Create | Self::Update => "Failed to save job.",
            Self::Delete => "Failed to delete job.",
        }
    }

    /// Create and update are submitted from the add/edit form.
    #[must_use]
    pub const fn closes_form(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

/// A mutation ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    Create(JobDraft),
    Update(JobId, JobDraft),
    Delete(ConfirmedDelete),
}

impl MutationRequest {
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::Create(_) => MutationKind::Create,
            Self::Update(..) => MutationKind::Update,
            Self::Delete(_) => MutationKind::Delete,
        }
    }
}

pub struct MutationCoordinator {
    api: Arc<dyn JobsApi>,
    task_tx: UnboundedSender<TaskResult>,
}

impl MutationCoordinator {
    pub fn new(api: Arc<dyn JobsApi>, task_tx: UnboundedSender<TaskResult>) -> Self {
        Self { api, task_tx }
    }

    /// Dispatch any mutation request.
    pub fn submit(&self, request: MutationRequest) -> Result<(), AppError> {
        match request {
            MutationRequest::Create(draft) => self.create_job(draft),
            MutationRequest::Update(id, draft) => self.update_job(id, draft),
            MutationRequest::Delete(confirmed) => {
                self.delete_job(confirmed);
                Ok(())
            }
        }
    }

    /// Validate and send a new posting. Invalid drafts are rejected here
    /// without a request.
    pub fn create_job(&self, draft: JobDraft) -> Result<(), AppError> {
        validate_draft(&draft).map_err(AppError::validation)?;

        let api = Arc::clone(&self.api);
        self.spawn(MutationKind::Create, async move {
            api.create_job(&draft).await.map(|_| ())
        });
        Ok(())
    }

    pub fn update_job(&self, id: JobId, draft: JobDraft) -> Result<(), AppError> {
        validate_draft(&draft).map_err(AppError::validation)?;

        let api = Arc::clone(&self.api);
        self.spawn(MutationKind::Update, async move {
            api.update_job(id, &draft).await.map(|_| ())
        });
        Ok(())
    }

    /// Deletes only ever follow an explicit confirmation.
    pub fn delete_job(&self, confirmed: ConfirmedDelete) {
        let api = Arc::clone(&self.api);
        let id = confirmed.id();
        self.spawn(MutationKind::Delete, async move { api.delete_job(id).await });
    }

    fn spawn<F>(&self, kind: MutationKind, call: F)
    where
        F: Future<Output = Result<(), crate::api::client::ApiError>> + Send + 'static,
    {
        let task_tx = self.task_tx.clone();
        let span = info_span!("mutation", marker = "MUTATION_TASK", ?kind);

        tokio::spawn(
            async move {
                info!("sending mutation");
                let result = call.await;
                let _ = task_tx.send(TaskResult::MutationFinished { kind, result });
            }
            .instrument(span),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeJobsApi;
    use crate::model::app_state::{AppState, Effect};
    use crate::model::job::JobPosting;
    use tokio::sync::mpsc;

    fn draft(company: &str) -> JobDraft {
        JobDraft {
            title: "Analyst".into(),
            company: company.into(),
            location: "NYC".into(),
            ..JobDraft::default()
        }
    }

    fn confirmed_delete_of(id: JobId) -> ConfirmedDelete {
        let mut state = AppState::default();
        let ticket = state.begin_fetch();
        let job = JobPosting {
            id,
            title: "Old".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: String::new(),
            tags: String::new(),
            posting_date: String::new(),
        };
        state.complete_fetch(ticket.generation, Ok(vec![job]));
        state.request_delete();
        match state.confirm_delete() {
            Some(Effect::Mutate(MutationRequest::Delete(confirmed))) => confirmed,
            other => panic!("expected delete, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_missing_company_sends_nothing() {
        let api = Arc::new(FakeJobsApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let coordinator = MutationCoordinator::new(api.clone(), tx);

        let err = coordinator.create_job(draft("")).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_reports_completion() {
        let api = Arc::new(FakeJobsApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let coordinator = MutationCoordinator::new(api.clone(), tx);

        coordinator.create_job(draft("Acme")).unwrap();
        match rx.recv().await.unwrap() {
            TaskResult::MutationFinished { kind, result } => {
                assert_eq!(kind, MutationKind::Create);
                assert!(result.is_ok());
            }
            other => panic!("unexpected task result: {other:?}"),
        }
        assert_eq!(api.calls(), ["create Analyst"]);
    }

    #[tokio::test]
    async fn test_failed_delete_is_reported() {
        let api = Arc::new(FakeJobsApi::default());
        api.fail_mutations(true);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let coordinator = MutationCoordinator::new(api.clone(), tx);

        coordinator
            .submit(MutationRequest::Delete(confirmed_delete_of(5)))
            .unwrap();
        match rx.recv().await.unwrap() {
            TaskResult::MutationFinished { kind, result } => {
                assert_eq!(kind, MutationKind::Delete);
                assert!(result.is_err());
            }
            other => panic!("unexpected task result: {other:?}"),
        }
        assert_eq!(api.calls(), ["delete 5"]);
    }

    #[test]
    fn test_messages() {
        assert_eq!(MutationKind::Update.success_message(), "Job updated successfully!");
        assert_eq!(MutationKind::Update.failure_message(), "Failed to save job.");
        assert!(!MutationKind::Delete.closes_form());
    }
}
