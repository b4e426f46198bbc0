// Prepare interactor - Turns user-facing job requests into normalized job specs

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::app::registry::ProviderRegistry;
use crate::config::Config;
use crate::domain::errors::*;
use crate::domain::geometry::{Crop, Rect};
use crate::domain::model::*;
use crate::domain::rules::JobRules;
use crate::domain::timeline::{Range, Splice};
use crate::ports::Provider;

/// Raw job request as it arrives from the CLI or an API caller
#[derive(Debug, Clone, Default)]
pub struct PrepareRequest {
    /// Generated from the current time when absent
    pub job_id: Option<String>,
    pub source: String,
    pub destination: String,
    /// Splice in `[[a,b],...]` text form; blank means the whole asset
    pub splice: String,
    /// Asset length as a timecode, used to bound the splice
    pub duration: Option<String>,
    pub crop: Crop,
    pub width: i64,
    pub height: i64,
    /// Scale the crop to the source frame's aspect ratio
    pub keep_aspect: bool,
    /// 0 selects the default frame rate
    pub fps: f64,
}

/// A job accepted by a provider.
///
/// Registry lookups build a fresh provider each time, so follow-up status
/// and cancel calls must go through `provider`.
pub struct Submission {
    pub provider: Arc<dyn Provider>,
    pub status: JobStatus,
}

/// Interactor for the job preparation use case
pub struct JobPreparer {
    registry: Arc<ProviderRegistry>,
    config: Arc<Config>,
}

impl JobPreparer {
    /// Create new preparer with injected registry and config
    pub fn new(registry: Arc<ProviderRegistry>, config: Arc<Config>) -> Self {
        Self { registry, config }
    }

    /// Decode, normalize and validate a request
    pub fn prepare(&self, request: &PrepareRequest) -> Result<JobSpec, DomainError> {
        let mut splice = Splice::from_json(&request.splice)?;
        if !splice.is_sorted() {
            warn!(splice = %splice, "splice segments out of order; sorting");
            splice.sort();
        }

        let bound = request
            .duration
            .as_deref()
            .map(|text| Range::parse(text, request.fps))
            .transpose()?;

        let frame = Rect::from_size(request.width, request.height);
        JobRules::validate_frame(frame)?;

        let requested = request.crop.rect(frame);
        if Crop::from_rect(frame, requested) != request.crop {
            warn!(crop = %request.crop, %frame, "crop insets exceed the frame; clipped");
        }

        let crop = if request.keep_aspect {
            request.crop.scale(frame)
        } else {
            request.crop
        };

        let job = JobSpec {
            id: request
                .job_id
                .clone()
                .unwrap_or_else(|| format!("job-{}", Utc::now().timestamp_millis())),
            source: request.source.clone(),
            destination: request.destination.clone(),
            splice,
            crop,
            frame,
            output: crop.rect(frame),
            fps: request.fps,
        };
        JobRules::validate(&job, bound)?;

        info!(
            job_id = %job.id,
            segments = job.splice.len(),
            output = %job.output,
            "prepared job"
        );
        Ok(job)
    }

    /// Create an already prepared job on the named provider
    pub async fn create(&self, provider: &str, job: &JobSpec) -> Result<Submission, DomainError> {
        let provider = self.registry.get(provider, &self.config)?;
        info!(job_id = %job.id, provider = provider.name(), "submitting job");
        let status = provider.create(job).await?;
        Ok(Submission { provider, status })
    }

    /// Prepare a request and create it on the named provider
    pub async fn submit(
        &self,
        provider: &str,
        request: &PrepareRequest,
    ) -> Result<JobStatus, DomainError> {
        let job = self.prepare(request)?;
        Ok(self.create(provider, &job).await?.status)
    }
}

#[cfg(test)]
mod tests;
