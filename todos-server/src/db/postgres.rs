//! PostgreSQL store
//!
//! One statement per operation; writes use RETURNING so the handler gets
//! the stored row without a second query.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use super::{StoreError, TodoStore};
use crate::models::{NewTodo, Pagination, Todo, TodoChanges};

// Rows written by older clients may carry a NULL `completed`
const COLUMNS: &str = "id, todo, COALESCE(completed, FALSE) AS completed";

/// Todo repository over a sqlx pool
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Todo>, StoreError> {
        let sql = format!(r#"SELECT {COLUMNS} FROM "Todo" ORDER BY id DESC LIMIT $1 OFFSET $2"#);
        let todos = sqlx::query_as::<_, Todo>(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;

        Ok(todos)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "Todo""#)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn get(&self, id: i64) -> Result<Todo, StoreError> {
        let sql = format!(r#"SELECT {COLUMNS} FROM "Todo" WHERE id = $1"#);
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        // Without `completed` the column default decides
        let with_completed =
            format!(r#"INSERT INTO "Todo" (todo, completed) VALUES ($1, $2) RETURNING {COLUMNS}"#);
        let without_completed =
            format!(r#"INSERT INTO "Todo" (todo) VALUES ($1) RETURNING {COLUMNS}"#);
        let query = match new.completed {
            Some(completed) => sqlx::query_as::<Postgres, Todo>(&with_completed)
                .bind(new.todo)
                .bind(completed),
            None => sqlx::query_as::<Postgres, Todo>(&without_completed).bind(new.todo),
        };

        let todo = query.fetch_one(&self.pool).await?;
        tracing::debug!(id = todo.id, "inserted todo");
        Ok(todo)
    }

    async fn update(&self, id: i64, changes: TodoChanges) -> Result<Todo, StoreError> {
        let sql = format!(
            r#"
            UPDATE "Todo"
            SET todo = COALESCE($2, todo),
                completed = COALESCE($3, completed)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .bind(changes.todo)
            .bind(changes.completed)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn delete(&self, id: i64) -> Result<Todo, StoreError> {
        let sql = format!(r#"DELETE FROM "Todo" WHERE id = $1 RETURNING {COLUMNS}"#);
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_CONNECTIONS;
    use crate::db::{create_pool, ensure_schema};

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p todos-server -- --ignored

    async fn store() -> PgTodoStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url, DEFAULT_MAX_CONNECTIONS)
            .await
            .expect("pool creation failed");
        ensure_schema(&pool).await.expect("schema bootstrap failed");
        PgTodoStore::new(pool)
    }

    fn new_todo(text: &str) -> NewTodo {
        NewTodo {
            todo: text.into(),
            completed: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_get_update_delete() {
        let store = store().await;

        let created = store.create(new_todo("pg roundtrip")).await.unwrap();
        assert!(!created.completed);
        assert_eq!(store.get(created.id as i64).await.unwrap(), created);

        let updated = store
            .update(
                created.id as i64,
                TodoChanges {
                    todo: Some("pg updated".into()),
                    completed: Some(true),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.todo, "pg updated");
        assert!(updated.completed);

        let deleted = store.delete(created.id as i64).await.unwrap();
        assert_eq!(deleted, updated);
        assert!(store.get(created.id as i64).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_newest_first_and_count_is_global() {
        let store = store().await;
        let first = store.create(new_todo("older")).await.unwrap();
        let second = store.create(new_todo("newer")).await.unwrap();

        let page = store.list(Pagination::new(2, 0)).await.unwrap();
        assert!(page.len() <= 2);
        assert!(page.windows(2).all(|w| w[0].id > w[1].id));
        assert!(store.count().await.unwrap() >= 2);

        store.delete(first.id as i64).await.unwrap();
        store.delete(second.id as i64).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn null_completed_reads_as_false() {
        let store = store().await;
        let id: i32 = sqlx::query_scalar(
            r#"INSERT INTO "Todo" (todo, completed) VALUES ('legacy', NULL) RETURNING id"#,
        )
        .fetch_one(&store.pool)
        .await
        .unwrap();

        let todo = store.get(i64::from(id)).await.unwrap();
        assert!(!todo.completed);

        let page = store.list(Pagination::new(100, 0)).await.unwrap();
        assert!(page.iter().any(|t| t.id == id && !t.completed));

        assert!(!store.delete(i64::from(id)).await.unwrap().completed);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_rows_are_not_found() {
        let store = store().await;
        assert!(store.delete(i64::from(i32::MAX)).await.unwrap_err().is_not_found());
        assert!(store
            .update(i64::from(i32::MAX), TodoChanges::default())
            .await
            .unwrap_err()
            .is_not_found());
    }
}
