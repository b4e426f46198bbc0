use std::sync::Arc;

use crate::adapters::{DryRunProvider, DRY_RUN};
use crate::app::prepare_interactor::JobPreparer;
use crate::app::registry::ProviderRegistry;
use crate::config::Config;
use crate::error::CutframeResult;

/// Wires the registry and interactors for one application run
pub struct AppContainer {
    config: Arc<Config>,
    registry: Arc<ProviderRegistry>,
    preparer: Arc<JobPreparer>,
}

impl AppContainer {
    /// Build the container with the built-in providers registered
    pub fn new(config: Config) -> CutframeResult<Self> {
        let mut registry = ProviderRegistry::new();
        registry.register(DRY_RUN, DryRunProvider::factory)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Build the container around a caller-supplied registry
    pub fn with_registry(config: Config, registry: ProviderRegistry) -> Self {
        let config = Arc::new(config);
        let registry = Arc::new(registry);
        let preparer = Arc::new(JobPreparer::new(
            Arc::clone(&registry),
            Arc::clone(&config),
        ));

        Self {
            config,
            registry,
            preparer,
        }
    }

    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    pub fn registry(&self) -> Arc<ProviderRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn preparer(&self) -> Arc<JobPreparer> {
        Arc::clone(&self.preparer)
    }
}
