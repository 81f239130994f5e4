//! Server and storage configuration
//!
//! The binary fills these from CLI flags and environment variables;
//! tests construct them directly.

use std::net::SocketAddr;

/// Default origin allowed by CORS (the web client dev server)
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default maximum connections for the PostgreSQL pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// The single origin allowed by CORS
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

/// Where todos are persisted
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// PostgreSQL through a sqlx pool
    Postgres {
        database_url: String,
        max_connections: u32,
        /// Create the `"Todo"` table on startup if it is missing
        ensure_schema: bool,
    },

    /// Process-local map, lost on exit
    Memory,
}

impl StorageBackend {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::Memory => "memory",
        }
    }
}
