//! Web interface module
//!
//! Exposes the karma commands over HTTP as a chat outgoing-webhook endpoint.

mod server;
mod handlers;

pub use server::{router, run_web_server};
pub use handlers::{AppState, KarmaResponse, WebhookRequest};
