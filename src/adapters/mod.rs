// Adapters - External system implementations

pub mod dry_run;
pub mod tracing_log;

// Re-export adapters
pub use dry_run::{DryRunProvider, DRY_RUN};
pub use tracing_log::init_tracing;
