//! todos-server: HTTP server for a single todo table
//!
//! Exposes list/get/create/update/delete over HTTP and maps each
//! request onto one storage operation behind the `TodoStore` trait.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ServerConfig, StorageBackend};
pub use db::{open_store, MemoryTodoStore, PgTodoStore, StoreError, TodoStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerError};
pub use models::{Todo, TodoPage};
