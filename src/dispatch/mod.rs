//! Command dispatcher
//!
//! Applies parsed karma commands to a storage backend and reports the
//! resulting tally. Sits between the transport and the storage layer.

use crate::commands::{self, KarmaCommand, Operation, ParseError};
use crate::store::{Backend, BackendError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Value of a counter after a command has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub key: String,
    pub value: i64,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

/// Errors raised while handling a command end to end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Command dispatcher
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
}

impl Dispatcher {
    /// Create a dispatcher over a resolved backend
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Dispatcher { backend }
    }

    /// Apply a command and read the counter back
    ///
    /// Increases and decreases of 0 never reach the backend; they fall
    /// through to the read like a query does.
    pub fn apply(&self, command: &KarmaCommand) -> Result<Tally, BackendError> {
        let key = command.key.as_str();

        match command.operation {
            Operation::Increase(amount) if amount > 0 => {
                debug!("Increasing '{}' by {} on {}", key, amount, self.backend.name());
                self.backend.increase(key, amount).inspect_err(|e| {
                    error!("Failed to increase '{}': {}", key, e);
                })?;
            }
            Operation::Decrease(amount) if amount > 0 => {
                debug!("Decreasing '{}' by {} on {}", key, amount, self.backend.name());
                self.backend.decrease(key, amount).inspect_err(|e| {
                    error!("Failed to decrease '{}': {}", key, e);
                })?;
            }
            _ => debug!("Querying '{}' on {}", key, self.backend.name()),
        }

        let value = self.backend.get(key).inspect_err(|e| {
            error!("Failed to read '{}': {}", key, e);
        })?;

        Ok(Tally {
            key: command.key.clone(),
            value,
        })
    }

    /// Parse command text and apply it
    ///
    /// With `strict` set, malformed `+=` / `-=` amounts are rejected instead
    /// of degrading to a query.
    pub fn handle_text(&self, text: &str, strict: bool) -> Result<Tally, DispatchError> {
        let command = if strict {
            commands::parse_strict(text)?
        } else {
            commands::parse(text)?
        };
        debug!("Parsed command: {:?}", command);

        Ok(self.apply(&command)?)
    }

    /// Get the backend (for testing/inspection)
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that counts mutating calls and never stores anything
    #[derive(Default)]
    struct CountingBackend {
        mutations: AtomicUsize,
    }

    impl Backend for CountingBackend {
        fn get(&self, _key: &str) -> Result<i64, BackendError> {
            Ok(0)
        }

        fn increase(&self, _key: &str, _amount: i64) -> Result<(), BackendError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn decrease(&self, _key: &str, _amount: i64) -> Result<(), BackendError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    /// Backend that is never reachable
    struct DownBackend;

    impl Backend for DownBackend {
        fn get(&self, _key: &str) -> Result<i64, BackendError> {
            Err(BackendError::Unavailable("timeout".to_string()))
        }

        fn increase(&self, _key: &str, _amount: i64) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("timeout".to_string()))
        }

        fn decrease(&self, _key: &str, _amount: i64) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("timeout".to_string()))
        }

        fn name(&self) -> &'static str {
            "down"
        }
    }

    fn memory_dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_tally_display() {
        let tally = Tally { key: "alice".to_string(), value: -3 };
        assert_eq!(tally.to_string(), "alice = -3");
    }

    #[test]
    fn test_apply_sequence() {
        let dispatcher = memory_dispatcher();

        let tally = dispatcher.handle_text("karma alice++", false).unwrap();
        assert_eq!(tally.to_string(), "alice = 1");

        let tally = dispatcher.handle_text("karma alice+=7", false).unwrap();
        assert_eq!(tally.value, 8);

        let tally = dispatcher.handle_text("karma Alice-=3", false).unwrap();
        assert_eq!(tally.value, 5);

        let tally = dispatcher.handle_text("karma alice--", false).unwrap();
        assert_eq!(tally.value, 4);

        let tally = dispatcher.handle_text("karma alice", false).unwrap();
        assert_eq!(tally.to_string(), "alice = 4");
    }

    #[test]
    fn test_zero_amount_never_mutates() {
        let backend = Arc::new(CountingBackend::default());
        let dispatcher = Dispatcher::new(backend.clone());

        dispatcher.apply(&KarmaCommand::new("dave", Operation::Increase(0))).unwrap();
        dispatcher.apply(&KarmaCommand::new("dave", Operation::Decrease(0))).unwrap();
        dispatcher.handle_text("karma dave+=abc", false).unwrap();
        dispatcher.handle_text("karma dave", false).unwrap();

        assert_eq!(backend.mutations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_parse_error_skips_backend() {
        let backend = Arc::new(CountingBackend::default());
        let dispatcher = Dispatcher::new(backend.clone());

        let err = dispatcher.handle_text("karma", false).unwrap_err();
        assert_eq!(err, DispatchError::Parse(ParseError::MissingPhrase));
        assert_eq!(backend.mutations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_strict_rejects_malformed_amount() {
        let dispatcher = memory_dispatcher();

        let err = dispatcher.handle_text("karma dave+=abc", true).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Parse(ParseError::InvalidAmount("dave+=abc".to_string()))
        );
        assert_eq!(dispatcher.backend().get("dave").unwrap(), 0);
    }

    #[test]
    fn test_backend_failure_propagates() {
        let dispatcher = Dispatcher::new(Arc::new(DownBackend));

        let err = dispatcher.handle_text("karma eve++", false).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Backend(BackendError::Unavailable("timeout".to_string()))
        );
    }
}
