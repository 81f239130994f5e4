//! Storage trait shared by the PostgreSQL and in-memory backends

use async_trait::async_trait;

use crate::models::{NewTodo, Pagination, Todo, TodoChanges};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("not found: todo '{id}'")]
    NotFound { id: i64 },

    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Todo persistence (testable)
///
/// Every keyed operation reports a missing row as `StoreError::NotFound`.
/// Ids are taken as `i64` so any parsed path id can be looked up; ids
/// outside the column range simply never match.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Page of todos ordered by id, newest first.
    async fn list(&self, page: Pagination) -> Result<Vec<Todo>, StoreError>;

    /// Row count of the whole table.
    async fn count(&self) -> Result<i64, StoreError>;

    async fn get(&self, id: i64) -> Result<Todo, StoreError>;

    /// Insert and return the stored row with its assigned id.
    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError>;

    /// Apply `changes` and return the updated row.
    async fn update(&self, id: i64, changes: TodoChanges) -> Result<Todo, StoreError>;

    /// Hard delete, returning the removed row.
    async fn delete(&self, id: i64) -> Result<Todo, StoreError>;
}
