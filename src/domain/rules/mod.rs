// Domain rules - Business checks applied while preparing jobs

use crate::domain::errors::DomainError;
use crate::domain::geometry::Rect;
use crate::domain::model::JobSpec;
use crate::domain::timeline::{Range, Splice};

/// Validation rules for prepared jobs
pub struct JobRules;

impl JobRules {
    /// Source frame must have area
    pub fn validate_frame(frame: Rect) -> Result<(), DomainError> {
        if frame.canon().is_empty() {
            return Err(DomainError::InvalidJob(format!(
                "source frame {} has no area",
                frame
            )));
        }
        Ok(())
    }

    /// Every spliced segment must lie inside the asset bound
    pub fn validate_splice(splice: &Splice, bound: Range) -> Result<(), DomainError> {
        if let Some(outside) = splice.iter().find(|r| !bound.encloses(r)) {
            return Err(DomainError::InvalidJob(format!(
                "splice segment {} falls outside asset {}",
                outside.encode(),
                bound.encode()
            )));
        }
        Ok(())
    }

    /// Cropped output must keep at least one pixel
    pub fn validate_output(output: Rect) -> Result<(), DomainError> {
        if output.is_empty() {
            return Err(DomainError::InvalidJob(
                "crop leaves an empty output frame".to_string(),
            ));
        }
        Ok(())
    }

    /// Full job check: identity, frame, output inside frame, optional bound
    pub fn validate(job: &JobSpec, bound: Option<Range>) -> Result<(), DomainError> {
        if job.id.trim().is_empty() {
            return Err(DomainError::InvalidJob("job id is empty".to_string()));
        }
        if job.source.trim().is_empty() {
            return Err(DomainError::InvalidJob("source is empty".to_string()));
        }
        Self::validate_frame(job.frame)?;
        Self::validate_output(job.output)?;
        if !job.frame.canon().contains(&job.output) {
            return Err(DomainError::InvalidJob(format!(
                "output {} exceeds frame {}",
                job.output, job.frame
            )));
        }
        if let Some(bound) = bound {
            Self::validate_splice(&job.splice, bound)?;
        }
        Ok(())
    }
}
