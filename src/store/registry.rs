//! Backend registry
//!
//! Maps backend names to constructors. Built explicitly at startup: each
//! backend module exposes a `register` function and the entry point calls
//! the ones it wants available.

use super::Backend;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Constructor for a backend instance
pub type BackendFactory = Arc<dyn Fn() -> Arc<dyn Backend> + Send + Sync>;

/// Errors raised while resolving a backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No factory registered under that name
    #[error("unknown storage backend '{0}'")]
    UnknownBackend(String),
}

/// Registry of all available backends
#[derive(Default)]
pub struct BackendRegistry {
    factories: HashMap<String, BackendFactory>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        BackendRegistry {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory under a name (case-insensitive)
    ///
    /// Registering a name twice replaces the earlier factory.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Arc<dyn Backend> + Send + Sync + 'static,
    {
        let name = name.to_lowercase();
        if self.factories.insert(name.clone(), Arc::new(factory)).is_some() {
            debug!("Backend '{}' re-registered, replacing previous factory", name);
        }
    }

    /// Build the backend registered under `name`
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Backend>, RegistryError> {
        match self.factories.get(&name.to_lowercase()) {
            Some(factory) => Ok(factory()),
            None => {
                warn!("Unknown storage backend: {}", name);
                Err(RegistryError::UnknownBackend(name.to_string()))
            }
        }
    }

    /// Check if a backend is registered
    pub fn has_backend(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_lowercase())
    }

    /// Get all registered backend names
    pub fn backend_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}
