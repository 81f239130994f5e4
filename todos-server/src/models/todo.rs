//! Todo entity and request bodies

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::ValidationError;

/// A stored todo, as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub todo: String,
    pub completed: bool,
}

/// Validated input for an insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub todo: String,
    /// `None` leaves the column default in charge
    pub completed: Option<bool>,
}

/// Fields to overwrite on update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub todo: Option<String>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.todo.is_none() && self.completed.is_none()
    }
}

/// POST /todos/add body
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    /// Any JSON value; falsy ones count as missing
    pub todo: Option<Value>,
    pub completed: Option<bool>,
}

/// `null`, `false`, `0` and `""` are treated like an absent field.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl CreateTodoRequest {
    /// Require truthy `todo` text.
    ///
    /// Falsy values get "Todo is required"; truthy values that are not
    /// strings cannot be stored and are rejected as a bad body.
    pub fn validate(self) -> Result<NewTodo, ValidationError> {
        match self.todo {
            None => Err(ValidationError::TodoRequired),
            Some(value) if is_falsy(&value) => Err(ValidationError::TodoRequired),
            Some(Value::String(todo)) => Ok(NewTodo {
                todo,
                completed: self.completed,
            }),
            Some(other) => Err(ValidationError::InvalidBody {
                reason: format!("todo must be a string, got {other}"),
            }),
        }
    }
}

/// PUT /todos/{id} body
///
/// The content field is `title` here while create uses `todo`. Existing
/// clients send it that way, so both names stay.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            todo: req.title,
            completed: req.completed,
        }
    }
}
