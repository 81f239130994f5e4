//! Database layer - storage trait, backends and connection pool
//!
//! Handlers only see `TodoStore`. The application root picks a backend
//! with [`open_store`] and hands it to the router; nothing here is global.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

use std::sync::Arc;

pub use memory::MemoryTodoStore;
pub use pool::create_pool;
pub use postgres::PgTodoStore;
pub use schema::ensure_schema;
pub use store::{StoreError, TodoStore};

use crate::config::StorageBackend;

/// Build the store described by `backend`.
///
/// For PostgreSQL this connects the pool (and bootstraps the table when
/// asked), so connection problems surface at startup.
pub async fn open_store(backend: &StorageBackend) -> Result<Arc<dyn TodoStore>, StoreError> {
    match backend {
        StorageBackend::Postgres {
            database_url,
            max_connections,
            ensure_schema: bootstrap,
        } => {
            let pool = create_pool(database_url, *max_connections).await?;
            if *bootstrap {
                ensure_schema(&pool).await?;
            }
            Ok(Arc::new(PgTodoStore::new(pool)))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryTodoStore::new())),
    }
}
