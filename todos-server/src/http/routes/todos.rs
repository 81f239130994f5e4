//! Todo endpoints
//!
//! Each handler performs one storage operation and returns
//! `Result<_, ApiError>`. Delete and update answer a missing row with
//! 500 and their own message, not 404; existing clients rely on it.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, TodoId};
use crate::http::server::AppState;
use crate::models::{
    CreateTodoRequest, Pagination, PaginationParams, Todo, TodoPage, UpdateTodoRequest,
};

/// DELETE /todos/{id} response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTodoResponse {
    pub message: String,
    pub deleted_todo: Todo,
}

/// GET /todos - newest first, with the table total
async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<TodoPage>, ApiError> {
    let page = Pagination::from(params);
    let store = state.store();

    let (todos, total) = tokio::try_join!(store.list(page), store.count())
        .map_err(ApiError::Internal)?;

    Ok(Json(TodoPage {
        todos,
        total,
        limit: page.limit,
        skip: page.skip,
    }))
}

/// GET /todos/{id}
async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.store().get(id).await?;
    Ok(Json(todo))
}

/// POST /todos/add
async fn create_todo(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let new = req.validate()?;
    let todo = state.store().create(new).await.map_err(ApiError::Internal)?;

    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<DeleteTodoResponse>, ApiError> {
    let deleted = state
        .store()
        .delete(id)
        .await
        .map_err(ApiError::DeleteFailed)?;

    tracing::info!(id = deleted.id, "todo deleted");
    Ok(Json(DeleteTodoResponse {
        message: "Todo deleted successfully".to_string(),
        deleted_todo: deleted,
    }))
}

/// PUT /todos/{id} - content arrives as `title`
async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    JsonBody(req): JsonBody<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state
        .store()
        .update(id, req.into())
        .await
        .map_err(ApiError::UpdateFailed)?;

    Ok(Json(todo))
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos))
        // "add" is also a (non-numeric) id for the other verbs, which
        // answer it with "Invalid ID" as `TodoId` finds no id segment here
        .route(
            "/todos/add",
            post(create_todo)
                .get(get_todo)
                .put(update_todo)
                .delete(delete_todo),
        )
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
