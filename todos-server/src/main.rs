//! todos-server - HTTP API over a single todo table
//!
//! Reads configuration from flags, the environment and an optional `.env`
//! file, opens the store and serves until Ctrl+C / SIGTERM.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;
use todos_server::config::{DEFAULT_CORS_ORIGIN, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use todos_server::{open_store, run_server, ServerConfig, StorageBackend};

mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(name = "todos-server", version, about = "HTTP API for a single todo table")]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "TODOS_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// The one origin allowed by CORS
    #[arg(long, env = "CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    cors_origin: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", required_unless_present = "in_memory")]
    database_url: Option<String>,

    /// Maximum connections in the PostgreSQL pool
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,

    /// Create the "Todo" table at startup if it is missing
    #[arg(long, env = "TODOS_ENSURE_SCHEMA")]
    ensure_schema: bool,

    /// Keep todos in process memory instead of PostgreSQL (wins over --database-url)
    #[arg(long, env = "TODOS_IN_MEMORY")]
    in_memory: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_origin: self.cors_origin.clone(),
        }
    }

    fn storage_backend(&self) -> Result<StorageBackend> {
        if self.in_memory {
            return Ok(StorageBackend::Memory);
        }

        let database_url = self
            .database_url
            .clone()
            .context("DATABASE_URL is required unless --in-memory is set")?;

        Ok(StorageBackend::Postgres {
            database_url,
            max_connections: self.max_connections,
            ensure_schema: self.ensure_schema,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load but don't fail when there is no .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug })?;

    let backend = cli.storage_backend()?;
    tracing::info!(backend = backend.kind(), "Opening todo store");
    let store = open_store(&backend)
        .await
        .with_context(|| format!("failed to open {} store", backend.kind()))?;

    run_server(store, cli.server_config())
        .await
        .context("server failed")?;

    Ok(())
}
