use clap::Parser;
use karma::{store, web, BackendRegistry, Config, Dispatcher};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging (INFO unless RUST_LOG says otherwise)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = Config::parse();
    info!("Karma starting with '{}' storage", config.storage);

    // Backends available to this binary
    let mut registry = BackendRegistry::new();
    store::register_memory(&mut registry, config.shard_count());

    let backend = match registry.resolve(&config.storage) {
        Ok(backend) => backend,
        Err(e) => {
            error!("Cannot start the backend: {} (available: {:?})", e, registry.backend_names());
            std::process::exit(1);
        }
    };

    let state = Arc::new(web::AppState::new(&config, Dispatcher::new(backend)));

    if let Err(e) = web::run_web_server(&config.addr, state).await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
