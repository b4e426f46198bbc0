// Domain models - Job specifications and provider-facing status types

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geometry::{Crop, Rect};
use crate::domain::timeline::Splice;

/// Fully prepared transcode job handed to a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub id: String,
    pub source: String,
    pub destination: String,
    /// Included source segments; empty means the whole asset
    pub splice: Splice,
    pub crop: Crop,
    /// Source frame the crop is relative to
    pub frame: Rect,
    /// Effective output rectangle, `crop.rect(frame)`
    pub output: Rect,
    pub fps: f64,
}

impl JobSpec {
    /// Total duration of the included segments, if the job is spliced
    pub fn spliced_duration(&self) -> Option<Duration> {
        if self.splice.is_empty() {
            None
        } else {
            Some(self.splice.size())
        }
    }

    /// Output `(width, height)` in pixels
    pub fn output_size(&self) -> (i64, i64) {
        (self.output.width(), self.output.height())
    }
}

/// Lifecycle state of a provider job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Started,
    Finished,
    Failed,
    Canceled,
}

impl JobState {
    /// No further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished | JobState::Failed | JobState::Canceled)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Queued => "queued",
            JobState::Started => "started",
            JobState::Finished => "finished",
            JobState::Failed => "failed",
            JobState::Canceled => "canceled",
        };
        f.write_str(name)
    }
}

/// Snapshot of a job as reported by its provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub job_id: String,
    pub provider: String,
    pub state: JobState,
    /// Percent complete, 0 to 100
    pub progress: u8,
    pub message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl JobStatus {
    pub fn new(job_id: impl Into<String>, provider: impl Into<String>, state: JobState) -> Self {
        Self {
            job_id: job_id.into(),
            provider: provider.into(),
            state,
            progress: 0,
            message: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Move to `state`, refreshing the timestamp
    pub fn transition(&mut self, state: JobState) {
        self.state = state;
        if state == JobState::Finished {
            self.progress = 100;
        }
        self.updated_at = Utc::now();
    }
}

/// Formats and destinations a provider can handle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub input_formats: Vec<String>,
    pub output_formats: Vec<String>,
    pub destinations: Vec<String>,
}
