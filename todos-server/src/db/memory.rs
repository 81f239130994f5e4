//! In-memory store for tests and local runs without a database

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::models::{NewTodo, Pagination, Todo, TodoChanges};

/// Process-local todo table.
///
/// Ids start at 1 and only ever grow, so a deleted id is never handed
/// out again.
#[derive(Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Todo>,
    last_id: i32,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(id: i64) -> Result<i32, StoreError> {
    i32::try_from(id).map_err(|_| StoreError::NotFound { id })
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Todo>, StoreError> {
        let table = self.inner.read().await;
        let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(0);

        Ok(table
            .rows
            .values()
            .rev()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let table = self.inner.read().await;
        Ok(table.rows.len() as i64)
    }

    async fn get(&self, id: i64) -> Result<Todo, StoreError> {
        let table = self.inner.read().await;
        table
            .rows
            .get(&key(id)?)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut table = self.inner.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Storage("todo id space exhausted".into()))?;

        let todo = Todo {
            id,
            todo: new.todo,
            completed: new.completed.unwrap_or(false),
        };
        table.last_id = id;
        table.rows.insert(id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: i64, changes: TodoChanges) -> Result<Todo, StoreError> {
        let mut table = self.inner.write().await;
        let todo = table
            .rows
            .get_mut(&key(id)?)
            .ok_or(StoreError::NotFound { id })?;

        if let Some(text) = changes.todo {
            todo.todo = text;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    async fn delete(&self, id: i64) -> Result<Todo, StoreError> {
        let mut table = self.inner.write().await;
        table
            .rows
            .remove(&key(id)?)
            .ok_or(StoreError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(text: &str) -> NewTodo {
        NewTodo {
            todo: text.into(),
            completed: None,
        }
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let store = MemoryTodoStore::new();
        let a = store.create(new_todo("a")).await.unwrap();
        let b = store.create(new_todo("b")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(b.id as i64).await.unwrap();
        let c = store.create(new_todo("c")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn completed_defaults_to_false() {
        let store = MemoryTodoStore::new();
        let todo = store.create(new_todo("x")).await.unwrap();
        assert!(!todo.completed);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paged() {
        let store = MemoryTodoStore::new();
        for text in ["one", "two", "three", "four"] {
            store.create(new_todo(text)).await.unwrap();
        }

        let page = store.list(Pagination::new(2, 1)).await.unwrap();
        let ids: Vec<i32> = page.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(store.count().await.unwrap(), 4);

        let past_end = store.list(Pagination::new(10, 10)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn update_applies_only_given_fields() {
        let store = MemoryTodoStore::new();
        let todo = store.create(new_todo("draft")).await.unwrap();

        let updated = store
            .update(
                todo.id as i64,
                TodoChanges {
                    todo: None,
                    completed: Some(true),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.todo, "draft");
        assert!(updated.completed);
        assert_eq!(store.get(todo.id as i64).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryTodoStore::new();
        assert!(store.get(1).await.unwrap_err().is_not_found());
        assert!(store.delete(1).await.unwrap_err().is_not_found());
        assert!(store
            .update(1, TodoChanges::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store.get(i64::MAX).await.unwrap_err().is_not_found());
    }
}
