// Application layer - Use case orchestration

pub mod container;
pub mod prepare_interactor;
pub mod registry;

pub use container::AppContainer;
pub use prepare_interactor::{JobPreparer, PrepareRequest, Submission};
pub use registry::{Health, ProviderDescription, ProviderRegistry};
