//! Counter storage module
//!
//! Defines the capability every storage backend exposes, the registry used to
//! pick one by name at startup, and the in-memory reference backend.
//! This module is independent of command parsing and HTTP handling.

mod memory;
mod registry;
mod router;

pub use memory::{register as register_memory, MemoryBackend, MEMORY_BACKEND};
pub use registry::{BackendFactory, BackendRegistry, RegistryError};
pub use router::ShardRouter;

use thiserror::Error;

/// Counter storage capability
///
/// Each call is atomic with respect to its own key. Unknown keys read as 0
/// and are created on their first mutation.
pub trait Backend: Send + Sync {
    /// Get the current value of a counter (0 if unknown)
    fn get(&self, key: &str) -> Result<i64, BackendError>;

    /// Add `amount` to a counter. `amount` must be > 0.
    fn increase(&self, key: &str, amount: i64) -> Result<(), BackendError>;

    /// Subtract `amount` from a counter. `amount` must be > 0.
    fn decrease(&self, key: &str, amount: i64) -> Result<(), BackendError>;

    /// Backend name (for debugging/logging)
    fn name(&self) -> &'static str;
}

/// Errors a backend reports to its caller
///
/// None of these are fatal to the process; the current request fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// A mutation was issued with an amount <= 0
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// The mutation would overflow the counter
    #[error("counter '{0}' would overflow")]
    Overflow(String),

    /// The backend could not be reached or is in a broken state
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
