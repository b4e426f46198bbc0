// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Timecode text did not yield at least hours, minutes and seconds
    #[error("Invalid timecode: {text:?}. Expected HH:MM:SS:FF, HH:MM:SS;FF or HH:MM:SS")]
    InvalidTimecode { text: String },

    /// Splice text is not an array of numeric pairs
    #[error("Failed to decode splice: {0}")]
    SpliceDecode(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Job failed validation
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    /// No provider registered under the name
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// A provider with the same name is already registered
    #[error("Provider already registered: {0}")]
    ProviderAlreadyRegistered(String),

    /// Provider cannot be instantiated or is unhealthy
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider does not know the job
    #[error("Job not found: {0}")]
    JobNotFound(String),
}
