// Dry-run provider adapter - Accepts jobs and tracks them in memory
//
// Jobs never leave the process. A created job stays queued until the first
// status poll, which completes it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::time::format_elapsed;

/// Registry name of the dry-run provider
pub const DRY_RUN: &str = "dry-run";

/// In-memory provider used for previews and tests
#[derive(Default)]
pub struct DryRunProvider {
    jobs: RwLock<HashMap<String, JobStatus>>,
}

impl DryRunProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry factory. Fails when the `enabled` setting is `false`.
    pub fn factory(config: &ProviderConfig) -> Result<Arc<dyn Provider>, DomainError> {
        if !config.flag("enabled", true)? {
            return Err(DomainError::ProviderUnavailable(format!(
                "{} is disabled by configuration",
                config.name
            )));
        }
        Ok(Arc::new(Self::new()))
    }

    fn read_jobs(&self) -> Result<RwLockReadGuard<'_, HashMap<String, JobStatus>>, DomainError> {
        self.jobs
            .read()
            .map_err(|_| DomainError::ProviderUnavailable("job table lock poisoned".to_string()))
    }

    fn write_jobs(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, JobStatus>>, DomainError> {
        self.jobs
            .write()
            .map_err(|_| DomainError::ProviderUnavailable("job table lock poisoned".to_string()))
    }

    fn summarize(job: &JobSpec) -> String {
        let length = match job.spliced_duration() {
            Some(d) => format!("{} in {} segments", format_elapsed(d.as_secs_f64()), job.splice.len()),
            None => "full length".to_string(),
        };
        let (w, h) = job.output_size();
        format!("{}, {}x{} at {}", length, w, h, job.output)
    }
}

#[async_trait]
impl Provider for DryRunProvider {
    fn name(&self) -> &str {
        DRY_RUN
    }

    async fn create(&self, job: &JobSpec) -> Result<JobStatus, DomainError> {
        if job.id.is_empty() {
            return Err(DomainError::InvalidJob("job id is empty".to_string()));
        }

        let mut jobs = self.write_jobs()?;
        if jobs.contains_key(&job.id) {
            return Err(DomainError::InvalidJob(format!(
                "job {} already exists",
                job.id
            )));
        }

        let status =
            JobStatus::new(&job.id, DRY_RUN, JobState::Queued).with_message(Self::summarize(job));
        info!(job_id = %job.id, source = %job.source, "dry-run job queued");
        jobs.insert(job.id.clone(), status.clone());
        Ok(status)
    }

    async fn status(&self, job_id: &str) -> Result<JobStatus, DomainError> {
        let mut jobs = self.write_jobs()?;
        let status = jobs
            .get_mut(job_id)
            .ok_or_else(|| DomainError::JobNotFound(job_id.to_string()))?;
        if !status.state.is_terminal() {
            status.transition(JobState::Finished);
        }
        Ok(status.clone())
    }

    async fn cancel(&self, job_id: &str) -> Result<JobStatus, DomainError> {
        let mut jobs = self.write_jobs()?;
        let status = jobs
            .get_mut(job_id)
            .ok_or_else(|| DomainError::JobNotFound(job_id.to_string()))?;
        if status.state.is_terminal() {
            return Err(DomainError::InvalidJob(format!(
                "job {} is already {}",
                job_id, status.state
            )));
        }
        status.transition(JobState::Canceled);
        info!(job_id, "dry-run job canceled");
        Ok(status.clone())
    }

    async fn healthcheck(&self) -> Result<(), DomainError> {
        self.read_jobs().map(|_| ())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            input_formats: vec!["mov".into(), "mp4".into(), "mxf".into()],
            output_formats: vec!["mp4".into(), "webm".into(), "hls".into()],
            destinations: vec!["file".into()],
        }
    }
}
