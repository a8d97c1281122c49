//! ``src/api/client.rs``
//! ============================================================================
//! # Jobs API client
//!
//! [`JobsApi`] is the seam the controllers talk to. [`HttpJobsApi`] is the
//! reqwest implementation against the `/api/jobs` resource:
//!
//! - `GET    /jobs?search=&location=&job_type=&sort=`
//! - `POST   /jobs`
//! - `PUT    /jobs/{id}`
//! - `DELETE /jobs/{id}`

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::model::filter::FilterCriteria;
use crate::model::job::{JobDraft, JobId, JobPosting};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Server unavailable: {0}")]
    Unavailable(String),
}

/// Operations against the jobs resource.
#[async_trait]
pub trait JobsApi: Send + Sync {
    async fn list_jobs(&self, filters: &FilterCriteria) -> Result<Vec<JobPosting>, ApiError>;

    async fn create_job(&self, draft: &JobDraft) -> Result<JobPosting, ApiError>;

    async fn update_job(&self, id: JobId, draft: &JobDraft) -> Result<JobPosting, ApiError>;

    async fn delete_job(&self, id: JobId) -> Result<(), ApiError>;
}

pub struct HttpJobsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJobsApi {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:5000/api`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    fn job_url(&self, id: JobId) -> String {
        format!("{}/jobs/{id}", self.base_url)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let resp = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiError::Unavailable(e.to_string())
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %text, "jobs API error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(resp)
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl JobsApi for HttpJobsApi {
    #[instrument(skip(self), fields(marker = "API_LIST_JOBS"))]
    async fn list_jobs(&self, filters: &FilterCriteria) -> Result<Vec<JobPosting>, ApiError> {
        let params = filters.query_params();
        debug!(?params, "fetching job list");

        let resp = self
            .send(self.client.get(self.jobs_url()).query(&params))
            .await?;
        Self::decode(resp).await
    }

    #[instrument(skip(self, draft), fields(marker = "API_CREATE_JOB", title = %draft.title))]
    async fn create_job(&self, draft: &JobDraft) -> Result<JobPosting, ApiError> {
        let resp = self
            .send(self.client.post(self.jobs_url()).json(draft))
            .await?;
        Self::decode(resp).await
    }

    #[instrument(skip(self, draft), fields(marker = "API_UPDATE_JOB"))]
    async fn update_job(&self, id: JobId, draft: &JobDraft) -> Result<JobPosting, ApiError> {
        let resp = self
            .send(self.client.put(self.job_url(id)).json(draft))
            .await?;
        Self::decode(resp).await
    }

    #[instrument(skip(self), fields(marker = "API_DELETE_JOB"))]
    async fn delete_job(&self, id: JobId) -> Result<(), ApiError> {
        self.send(self.client.delete(self.job_url(id))).await?;
        Ok(())
    }
}
