//! Connection pool for the PostgreSQL store

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect a pool of at most `max_connections` connections.
///
/// Connects eagerly, so a bad URL or unreachable server is an error here
/// rather than on the first request.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to PostgreSQL");

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
