//! Karma - a chat-command karma counter
//!
//! Karma is split along the same lines as the request path:
//! - `commands` turns chat text into a key and an operation
//! - `store` holds the counters behind a pluggable `Backend`
//! - `dispatch` applies a command to a backend
//! - `web` receives the chat webhook

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod store;
pub mod web;

/// Re-export commonly used types
pub use commands::{normalize, parse, parse_strict, KarmaCommand, Operation, ParseError};
pub use config::Config;
pub use dispatch::{DispatchError, Dispatcher, Tally};
pub use store::{Backend, BackendError, BackendRegistry, MemoryBackend, RegistryError};
