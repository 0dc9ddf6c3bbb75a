//! Core domain logic for LazyTodo.
//! This crate is the single source of truth for to-do list invariants.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::StorageConfig;
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{
    format_due_date, parse_due_date, Priority, Todo, TodoId, TodoValidationError,
};
pub use repo::todo_repo::{
    decode_todos, encode_todos, DecodedTodos, RepoError, RepoResult, SlotTodoRepository,
    TodoRepository, TODO_LIST_SLOT,
};
pub use service::todo_service::{
    open_sqlite_service, SqliteTodoService, SubscriptionId, TodoService, TodoSnapshot,
};
pub use store::filter::TodoFilter;
pub use store::todo_list::{TodoDraft, TodoList, TodoStats};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
