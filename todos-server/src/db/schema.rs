//! Table bootstrap
//!
//! A single idempotent CREATE TABLE. The layout matches tables created by
//! earlier deployments, so pointing the server at an existing database
//! needs no bootstrap at all.

use sqlx::PgPool;

/// Create the `"Todo"` table if it does not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring \"Todo\" table exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "Todo" (
            id SERIAL PRIMARY KEY,
            todo TEXT NOT NULL,
            completed BOOLEAN DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
