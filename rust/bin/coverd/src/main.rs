//! `coverd`: the Health Cover submission server.
//!
//! Usage:
//!   coverd [--port <port>] [--host <addr>] [--database-url <path>]
//!
//! Flags override the `PORT`, `HOST` and `DATABASE_URL` environment
//! variables. `DATABASE_URL` has no default.

mod routes;

use std::sync::Arc;

use clap::Parser;
use cover_core::{Module, ServiceConfig};
use cover_quote::QuoteModule;
use tokio::signal;
use tracing::info;

/// Health Cover submission server.
#[derive(Parser, Debug)]
#[command(name = "coverd", about = "Health Cover submission server")]
struct Cli {
    /// Listening port (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Interface to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Database location (overrides DATABASE_URL).
    #[arg(long = "database-url")]
    database_url: Option<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<ServiceConfig> {
    let database_url = cli.database_url.clone();
    let mut server_config = ServiceConfig::from_lookup(|key| match key {
        "DATABASE_URL" if database_url.is_some() => database_url.clone(),
        _ => std::env::var(key).ok(),
    })?;

    if let Some(port) = cli.port {
        server_config.port = port;
    }
    if let Some(host) = &cli.host {
        server_config.host = host.clone();
    }
    Ok(server_config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let server_config = load_config(&cli)?;
    info!(
        "Opening submission store at {}",
        server_config.db_path.display()
    );

    if let Some(parent) = server_config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let kv: Arc<dyn cover_kv::KVStore> = Arc::new(
        cover_kv::RedbStore::open(&server_config.db_path)
            .map_err(|e| anyhow::anyhow!("failed to open submission store: {}", e))?,
    );

    let quote_module = QuoteModule::new(Arc::clone(&kv));
    info!("{} module initialized", quote_module.name());

    let modules: Vec<Box<dyn Module>> = vec![Box::new(quote_module)];
    let app = routes::build_router(&modules);

    let address = server_config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Health Cover API listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
