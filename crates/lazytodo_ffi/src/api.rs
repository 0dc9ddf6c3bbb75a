//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level to-do functions to Dart via FRB.
//! - Translate core types into string-based DTOs the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - State lives in a host-owned `TodoSession`, never in a global.
//! - Mutations return an envelope; validation failures carry a UI message.
//!
//! # See also
//! - docs/architecture/logging.md

use lazytodo_core::{
    core_version as core_version_inner, format_due_date, init_logging as init_logging_inner,
    open_sqlite_service, parse_due_date, ping as ping_inner, Priority, SqliteTodoService,
    StorageConfig, Todo, TodoDraft, TodoFilter, TodoId, TodoValidationError,
};
use log::warn;
use std::sync::{Mutex, MutexGuard};

const EMPTY_TEXT_MESSAGE: &str = "Please enter a todo.";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One record as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// `Low|Medium|High`.
    pub priority: String,
    /// `YYYY-MM-DD`, absent when no due date is set.
    pub due_date: Option<String>,
}

/// List envelope for list/query/completed calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub items: Vec<TodoItem>,
    /// Snapshot revision the items were read from.
    pub revision: u64,
    /// Human-readable message; filter parse errors are reported here.
    pub message: String,
}

/// Result envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// Affected record id when known.
    pub todo_id: Option<String>,
    /// Human-readable response message for UI.
    pub message: String,
    /// Last persistence failure; the in-memory list is still updated.
    pub save_error: Option<String>,
}

/// Record counts for headers and empty states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoStatsResponse {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
}

/// Host-owned handle to one persisted to-do list.
#[flutter_rust_bridge::frb(opaque)]
pub struct TodoSession {
    service: Mutex<SqliteTodoService>,
}

/// Opens the to-do list stored at `db_path`.
///
/// `None` or a blank path resolves `LAZYTODO_DB_PATH`, then the temp dir.
///
/// # FFI contract
/// - Async call (DB open + initial load).
/// - Never panics; returns an error message when the database cannot open.
/// - A missing or corrupt slot opens an empty list, not an error.
pub fn todo_open(db_path: Option<String>) -> Result<TodoSession, String> {
    let mut config = StorageConfig::from_env();
    if let Some(path) = db_path.filter(|value| !value.trim().is_empty()) {
        config = config.with_db_path(path.trim());
    }
    let service =
        open_sqlite_service(&config).map_err(|err| format!("todo_open failed: {err}"))?;
    Ok(TodoSession {
        service: Mutex::new(service),
    })
}

impl TodoSession {
    /// Full list, newest first.
    #[flutter_rust_bridge::frb(sync)]
    pub fn list(&self) -> TodoListResponse {
        self.read(|service| {
            let items = service.todos().iter().map(to_todo_item).collect::<Vec<_>>();
            list_response(items, service.revision(), None)
        })
    }

    /// Filtered list. Blank/`None` criteria impose no constraint.
    ///
    /// `completed`: `Some(true)` completed only, `Some(false)` pending only.
    #[flutter_rust_bridge::frb(sync)]
    pub fn query(
        &self,
        search_text: Option<String>,
        priority: Option<String>,
        due_date: Option<String>,
        completed: Option<bool>,
    ) -> TodoListResponse {
        let filter = match build_filter(search_text, priority, due_date, completed) {
            Ok(filter) => filter,
            Err(err) => {
                return TodoListResponse {
                    items: Vec::new(),
                    revision: self.read(|service| service.revision()),
                    message: format!("todo_query failed: {err}"),
                };
            }
        };
        self.read(|service| {
            let items = service
                .query(&filter)
                .iter()
                .map(to_todo_item)
                .collect::<Vec<_>>();
            list_response(items, service.revision(), None)
        })
    }

    /// Completed records for the Completed screen.
    #[flutter_rust_bridge::frb(sync)]
    pub fn completed(&self) -> TodoListResponse {
        self.read(|service| {
            let items = service
                .completed()
                .iter()
                .map(to_todo_item)
                .collect::<Vec<_>>();
            list_response(items, service.revision(), Some("No completed todos yet."))
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn stats(&self) -> TodoStatsResponse {
        self.read(|service| {
            let stats = service.stats();
            TodoStatsResponse {
                total: saturating_u32(stats.total),
                completed: saturating_u32(stats.completed),
                pending: saturating_u32(stats.pending),
            }
        })
    }

    /// Adds a record at the top of the list.
    ///
    /// # FFI contract
    /// - Blank text returns `ok=false` with "Please enter a todo.".
    /// - Unknown priority or malformed due date returns `ok=false`.
    pub fn add(
        &self,
        text: String,
        priority: Option<String>,
        due_date: Option<String>,
    ) -> TodoActionResponse {
        let draft = match build_draft(text, priority, due_date) {
            Ok(draft) => draft,
            Err(err) => return TodoActionResponse::failure(validation_message("todo_add", &err)),
        };
        self.write(|service| match service.add(&draft) {
            Ok(id) => {
                TodoActionResponse::success("Todo added.", id, service.last_save_error())
            }
            Err(err) => TodoActionResponse::failure(validation_message("todo_add", &err)),
        })
    }

    /// Flips completion. Unknown ids succeed as no-ops.
    pub fn toggle_complete(&self, id: String) -> TodoActionResponse {
        let id = match TodoId::parse(id) {
            Ok(id) => id,
            Err(err) => return TodoActionResponse::failure(validation_message("todo_toggle", &err)),
        };
        self.write(|service| {
            service.toggle_complete(&id);
            TodoActionResponse::success("Todo updated.", id, service.last_save_error())
        })
    }

    /// Replaces text, priority and due date; `due_date=None` clears it.
    pub fn edit(
        &self,
        id: String,
        text: String,
        priority: Option<String>,
        due_date: Option<String>,
    ) -> TodoActionResponse {
        let parsed = TodoId::parse(id).and_then(|id| {
            build_draft(text, priority, due_date).map(|draft| (id, draft))
        });
        let (id, draft) = match parsed {
            Ok(parsed) => parsed,
            Err(err) => return TodoActionResponse::failure(validation_message("todo_edit", &err)),
        };
        self.write(|service| match service.edit(&id, &draft) {
            Ok(()) => {
                TodoActionResponse::success("Todo updated.", id, service.last_save_error())
            }
            Err(err) => TodoActionResponse::failure(validation_message("todo_edit", &err)),
        })
    }

    /// Removes a record. Unknown ids succeed as no-ops.
    pub fn delete(&self, id: String) -> TodoActionResponse {
        let id = match TodoId::parse(id) {
            Ok(id) => id,
            Err(err) => return TodoActionResponse::failure(validation_message("todo_delete", &err)),
        };
        self.write(|service| {
            service.delete(&id);
            TodoActionResponse::success("Todo deleted.", id, service.last_save_error())
        })
    }

    fn read<T>(&self, f: impl FnOnce(&SqliteTodoService) -> T) -> T {
        f(&self.lock())
    }

    fn write<T>(&self, f: impl FnOnce(&mut SqliteTodoService) -> T) -> T {
        f(&mut self.lock())
    }

    // A panic inside a previous call must not brick the session.
    fn lock(&self) -> MutexGuard<'_, SqliteTodoService> {
        self.service.lock().unwrap_or_else(|poisoned| {
            warn!("event=ffi_session_lock module=ffi status=recovered reason=poisoned");
            poisoned.into_inner()
        })
    }
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, id: TodoId, save_error: Option<&str>) -> Self {
        Self {
            ok: true,
            todo_id: Some(id.to_string()),
            message: message.into(),
            save_error: save_error.map(str::to_owned),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            todo_id: None,
            message: message.into(),
            save_error: None,
        }
    }
}

fn build_draft(
    text: String,
    priority: Option<String>,
    due_date: Option<String>,
) -> Result<TodoDraft, TodoValidationError> {
    Ok(TodoDraft::new(text)
        .with_priority(parse_priority(priority)?.unwrap_or_default())
        .with_due_date(parse_optional_date(due_date)?))
}

fn build_filter(
    search_text: Option<String>,
    priority: Option<String>,
    due_date: Option<String>,
    completed: Option<bool>,
) -> Result<TodoFilter, TodoValidationError> {
    Ok(TodoFilter {
        search_text,
        priority: parse_priority(priority)?,
        due_date: parse_optional_date(due_date)?,
        completed,
    })
}

fn parse_priority(value: Option<String>) -> Result<Option<Priority>, TodoValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Priority::parse(raw).map(Some),
    }
}

fn parse_optional_date(
    value: Option<String>,
) -> Result<Option<chrono::NaiveDate>, TodoValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_due_date(raw).map(Some),
    }
}

fn validation_message(operation: &str, err: &TodoValidationError) -> String {
    match err {
        TodoValidationError::EmptyText => EMPTY_TEXT_MESSAGE.to_string(),
        other => format!("{operation} failed: {other}"),
    }
}

fn list_response(
    items: Vec<TodoItem>,
    revision: u64,
    empty_message: Option<&str>,
) -> TodoListResponse {
    let message = if items.is_empty() {
        empty_message.unwrap_or("No todos yet. Add your first one!").to_string()
    } else {
        format!("{} todo(s).", items.len())
    };
    TodoListResponse {
        items,
        revision,
        message,
    }
}

fn to_todo_item(todo: &Todo) -> TodoItem {
    TodoItem {
        id: todo.id.to_string(),
        text: todo.text.clone(),
        completed: todo.completed,
        priority: todo.priority.as_str().to_string(),
        due_date: todo.due_date.map(format_due_date),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{core_version, init_logging, ping, todo_open, TodoSession};

    fn open_session(dir: &tempfile::TempDir) -> TodoSession {
        let path = dir.path().join("todos.sqlite3");
        todo_open(Some(path.to_string_lossy().into_owned())).expect("session should open")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn add_blank_text_returns_user_message() {
        let dir = tempfile::tempdir().unwrap();
        let session = open_session(&dir);

        let response = session.add("   ".to_string(), None, None);
        assert!(!response.ok);
        assert_eq!(response.message, "Please enter a todo.");
        assert!(session.list().items.is_empty());
    }

    #[test]
    fn add_rejects_malformed_priority_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let session = open_session(&dir);

        let bad_priority = session.add("x".to_string(), Some("urgent".to_string()), None);
        assert!(!bad_priority.ok);
        assert!(bad_priority.message.contains("priority"));

        let bad_date = session.add("x".to_string(), None, Some("next week".to_string()));
        assert!(!bad_date.ok);
        assert!(bad_date.message.contains("due date"));
    }

    #[test]
    fn session_flow_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let session = open_session(&dir);

        let milk = session.add("Buy milk".to_string(), None, None);
        assert!(milk.ok, "{}", milk.message);
        let bob = session.add(
            "Call Bob".to_string(),
            Some("high".to_string()),
            Some("2026-10-20".to_string()),
        );
        assert!(bob.ok, "{}", bob.message);
        let milk_id = milk.todo_id.expect("add should return id");
        let bob_id = bob.todo_id.expect("add should return id");

        assert!(session.toggle_complete(milk_id.clone()).ok);
        let high = session.query(None, Some("High".to_string()), None, None);
        assert_eq!(high.items.len(), 1);
        assert_eq!(high.items[0].due_date.as_deref(), Some("2026-10-20"));
        assert!(session.delete(bob_id).ok);
        drop(session);

        let reopened = open_session(&dir);
        let list = reopened.list();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].id, milk_id);
        assert_eq!(list.items[0].priority, "Low");
        assert!(list.items[0].completed);
        assert_eq!(reopened.completed().items.len(), 1);
        assert_eq!(reopened.stats().completed, 1);
    }

    #[test]
    fn edit_updates_fields_and_clears_due_date() {
        let dir = tempfile::tempdir().unwrap();
        let session = open_session(&dir);
        let added = session.add("draft".to_string(), None, Some("2026-10-20".to_string()));
        let id = added.todo_id.expect("add should return id");

        let edited = session.edit(
            id.clone(),
            "final".to_string(),
            Some("Medium".to_string()),
            None,
        );
        assert!(edited.ok, "{}", edited.message);

        let item = session.list().items.into_iter().next().expect("one item");
        assert_eq!(item.id, id);
        assert_eq!(item.text, "final");
        assert_eq!(item.priority, "Medium");
        assert_eq!(item.due_date, None);
    }

    #[test]
    fn query_reports_bad_filter_in_message() {
        let dir = tempfile::tempdir().unwrap();
        let session = open_session(&dir);

        let response = session.query(None, None, Some("soon".to_string()), None);
        assert!(response.items.is_empty());
        assert!(response.message.contains("todo_query failed"));
    }
}
