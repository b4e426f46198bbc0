// Provider registry - Explicit name-to-factory table passed to callers

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::errors::DomainError;
use crate::domain::model::Capabilities;
use crate::ports::{Provider, ProviderConfig, ProviderFactory};

/// Result of a provider healthcheck
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub ok: bool,
    pub message: Option<String>,
}

impl Health {
    fn from_result(result: Result<(), DomainError>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                message: None,
            },
            Err(e) => Self {
                ok: false,
                message: Some(e.to_string()),
            },
        }
    }
}

/// What a registered provider looks like under a given config
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDescription {
    pub name: String,
    /// The factory accepted the config
    pub enabled: bool,
    pub capabilities: Capabilities,
    pub health: Health,
}

/// Registered provider factories keyed by name
#[derive(Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factory under `name`. Names are unique.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<(), DomainError>
    where
        F: Fn(&ProviderConfig) -> Result<Arc<dyn Provider>, DomainError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(DomainError::ProviderAlreadyRegistered(name));
        }
        debug!(provider = %name, "registered provider factory");
        self.factories.insert(name, Box::new(factory));
        Ok(())
    }

    /// Every registered name, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Instantiate the provider registered as `name`
    pub fn get(&self, name: &str, config: &Config) -> Result<Arc<dyn Provider>, DomainError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| DomainError::ProviderNotFound(name.to_string()))?;
        factory(&config.provider_config(name))
    }

    /// Sorted names of providers whose factory accepts `config`
    pub fn list(&self, config: &Config) -> Vec<String> {
        self.factories
            .iter()
            .filter_map(|(name, factory)| match factory(&config.provider_config(name)) {
                Ok(_) => Some(name.clone()),
                Err(e) => {
                    warn!(provider = %name, error = %e, "provider unavailable");
                    None
                }
            })
            .collect()
    }

    /// Enablement, capabilities and health of the provider `name`
    pub async fn describe(
        &self,
        name: &str,
        config: &Config,
    ) -> Result<ProviderDescription, DomainError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| DomainError::ProviderNotFound(name.to_string()))?;

        let description = match factory(&config.provider_config(name)) {
            Ok(provider) => ProviderDescription {
                name: name.to_string(),
                enabled: true,
                capabilities: provider.capabilities(),
                health: Health::from_result(provider.healthcheck().await),
            },
            Err(e) => ProviderDescription {
                name: name.to_string(),
                enabled: false,
                capabilities: Capabilities::default(),
                health: Health::from_result(Err(e)),
            },
        };
        Ok(description)
    }
}
