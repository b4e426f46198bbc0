//! Cutframe Library
//!
//! Time-interval algebra for splicing source media and aspect-preserving crop
//! geometry, plus the job preparation flow that hands normalized jobs to
//! transcoding providers.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::geometry::{aspect, scale, Crop, Point, Rect};
pub use domain::model::{JobSpec, JobState, JobStatus};
pub use domain::timeline::{Range, Splice};
pub use error::{CutframeError, CutframeResult};
