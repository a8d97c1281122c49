//! In-memory [`JobsApi`] used by the controller tests.
//!
//! Records every call, filters by the search term so results for
//! different filters are distinguishable, and can hold list responses
//! back for a configured delay.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::client::{ApiError, JobsApi};
use crate::model::filter::FilterCriteria;
use crate::model::job::{JobDraft, JobId, JobPosting};

#[derive(Default)]
pub struct FakeJobsApi {
    jobs: Mutex<Vec<JobPosting>>,
    calls: Mutex<Vec<String>>,
    list_delays: Mutex<VecDeque<Duration>>,
    fail_lists: AtomicBool,
    fail_mutations: AtomicBool,
    next_id: AtomicU64,
}

impl FakeJobsApi {
    pub fn with_jobs(jobs: Vec<JobPosting>) -> Self {
        let next_id = jobs.iter().map(|j| j.id).max().unwrap_or(0);
        let api = Self::default();
        *api.jobs.lock().unwrap() = jobs;
        api.next_id.store(next_id, Ordering::SeqCst);
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Delay applied to the next list call; queued in call order.
    pub fn push_list_delay(&self, delay: Duration) {
        self.list_delays.lock().unwrap().push_back(delay);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_guard(&self) -> Result<(), ApiError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(())
    }

    fn posting(id: JobId, draft: &JobDraft) -> JobPosting {
        JobPosting {
            id,
            title: draft.title.clone(),
            company: draft.company.clone(),
            location: draft.location.clone(),
            job_type: draft.job_type.clone(),
            tags: draft.tags.clone(),
            posting_date: "just now".into(),
        }
    }
}

pub fn job(id: JobId, title: &str) -> JobPosting {
    JobPosting {
        id,
        title: title.into(),
        company: "Acme".into(),
        location: "Remote".into(),
        job_type: "Full-time".into(),
        tags: String::new(),
        posting_date: "1d ago".into(),
    }
}

#[async_trait]
impl JobsApi for FakeJobsApi {
    async fn list_jobs(&self, filters: &FilterCriteria) -> Result<Vec<JobPosting>, ApiError> {
        let query = filters
            .query_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.record(format!("list {query}"));

        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable("connection refused".into()));
        }

        let needle = filters.search.to_lowercase();
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create_job(&self, draft: &JobDraft) -> Result<JobPosting, ApiError> {
        self.record(format!("create {}", draft.title));
        self.mutation_guard()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let posting = Self::posting(id, draft);
        self.jobs.lock().unwrap().insert(0, posting.clone());
        Ok(posting)
    }

    async fn update_job(&self, id: JobId, draft: &JobDraft) -> Result<JobPosting, ApiError> {
        self.record(format!("update {id}"));
        self.mutation_guard()?;

        let mut jobs = self.jobs.lock().unwrap();
        let slot = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "not found".into(),
            })?;
        *slot = Self::posting(id, draft);
        Ok(slot.clone())
    }

    async fn delete_job(&self, id: JobId) -> Result<(), ApiError> {
        self.record(format!("delete {id}"));
        self.mutation_guard()?;

        self.jobs.lock().unwrap().retain(|j| j.id != id);
        Ok(())
    }
}
