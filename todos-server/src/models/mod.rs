//! Domain models with validation at construction
//!
//! Request bodies are validated into these types before any storage
//! call. Invalid input returns ValidationError, not panic.

pub mod pagination;
pub mod todo;
pub mod validation;

pub use pagination::{Pagination, PaginationParams, TodoPage};
pub use todo::{CreateTodoRequest, NewTodo, Todo, TodoChanges, UpdateTodoRequest};
pub use validation::{parse_int_prefix, ValidationError};
