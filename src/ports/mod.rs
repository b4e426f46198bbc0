// Ports - Interface definitions (contracts)

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for transcoding providers
///
/// Providers receive fully prepared [`JobSpec`]s; splice and crop geometry are
/// already normalized by the time `create` is called.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry name of this provider
    fn name(&self) -> &str;

    /// Submit a job
    async fn create(&self, job: &JobSpec) -> Result<JobStatus, DomainError>;

    /// Current status of a submitted job
    async fn status(&self, job_id: &str) -> Result<JobStatus, DomainError>;

    /// Cancel a submitted job
    async fn cancel(&self, job_id: &str) -> Result<JobStatus, DomainError>;

    /// Check the provider can accept work
    async fn healthcheck(&self) -> Result<(), DomainError>;

    /// Formats and destinations supported
    fn capabilities(&self) -> Capabilities;
}

/// Per-provider settings taken from the `[providers.<name>]` config table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub name: String,
    pub settings: BTreeMap<String, String>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: BTreeMap::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Boolean setting, `default` when absent
    pub fn flag(&self, key: &str, default: bool) -> Result<bool, DomainError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.trim().parse::<bool>().map_err(|e| {
                DomainError::BadArgs(format!(
                    "Invalid boolean value for {}.{}: {}",
                    self.name, key, e
                ))
            }),
        }
    }
}

/// Builds a provider from its settings; failure means the provider is disabled
pub type ProviderFactory =
    Box<dyn Fn(&ProviderConfig) -> Result<Arc<dyn Provider>, DomainError> + Send + Sync>;
