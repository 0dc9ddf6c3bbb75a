//! To-do use-case service.
//!
//! # Responsibility
//! - Own the authoritative record snapshot for one process.
//! - Apply store transitions and persist after every mutation.
//! - Notify subscribers with each new snapshot.
//!
//! # Invariants
//! - The snapshot is loaded exactly once, at construction.
//! - add/toggle/edit/delete are the only write surface.
//! - Every accepted mutation (including not-found no-ops) bumps the
//!   revision, saves the full sequence and notifies subscribers.
//! - Rejected input leaves the snapshot, storage and revision untouched.
//! - Save failures never roll back memory; they are logged and kept in
//!   `last_save_error`.

use crate::config::StorageConfig;
use crate::kv::{KvResult, SqliteKvStore};
use crate::model::todo::{Todo, TodoId, TodoValidationError};
use crate::repo::todo_repo::{SlotTodoRepository, TodoRepository};
use crate::store::filter::TodoFilter;
use crate::store::todo_list::{TodoDraft, TodoList, TodoStats};
use log::{debug, error, info};

/// Service wired to the on-device SQLite slot store.
pub type SqliteTodoService = TodoService<SlotTodoRepository<SqliteKvStore>>;

/// Immutable view of the sequence after one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSnapshot {
    /// Starts at 0 after load; +1 per accepted mutation.
    pub revision: u64,
    pub todos: TodoList,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type SnapshotListener = Box<dyn FnMut(&TodoSnapshot) + Send>;

/// Stateful facade over the record store and its repository.
pub struct TodoService<R: TodoRepository> {
    repo: R,
    snapshot: TodoSnapshot,
    listeners: Vec<(SubscriptionId, SnapshotListener)>,
    next_subscription: u64,
    last_save_error: Option<String>,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates the service and populates it from the repository.
    pub fn open(repo: R) -> Self {
        let todos = repo.load();
        info!(
            "event=todo_service_open module=service status=ok count={}",
            todos.len()
        );
        Self {
            repo,
            snapshot: TodoSnapshot { revision: 0, todos },
            listeners: Vec::new(),
            next_subscription: 0,
            last_save_error: None,
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> TodoSnapshot {
        self.snapshot.clone()
    }

    pub fn todos(&self) -> &TodoList {
        &self.snapshot.todos
    }

    pub fn revision(&self) -> u64 {
        self.snapshot.revision
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.snapshot.todos.get(id)
    }

    /// Adds a record at the front of the list.
    ///
    /// # Errors
    /// - `EmptyText` for blank text; nothing is saved.
    pub fn add(&mut self, draft: &TodoDraft) -> Result<TodoId, TodoValidationError> {
        let (next, id) = self.snapshot.todos.add(draft).inspect_err(|err| {
            debug!("event=todo_add module=service status=rejected reason={err}");
        })?;
        self.commit("todo_add", next);
        Ok(id)
    }

    /// Flips completion of `id`. Unknown ids still trigger a save.
    pub fn toggle_complete(&mut self, id: &TodoId) {
        let next = self.snapshot.todos.toggle_complete(id);
        self.commit("todo_toggle", next);
    }

    /// Replaces text, priority and due date of `id`.
    ///
    /// # Errors
    /// - `EmptyText` for blank text; nothing is saved.
    pub fn edit(&mut self, id: &TodoId, draft: &TodoDraft) -> Result<(), TodoValidationError> {
        let next = self.snapshot.todos.edit(id, draft).inspect_err(|err| {
            debug!("event=todo_edit module=service status=rejected reason={err}");
        })?;
        self.commit("todo_edit", next);
        Ok(())
    }

    /// Removes `id`. Unknown ids still trigger a save.
    pub fn delete(&mut self, id: &TodoId) {
        let next = self.snapshot.todos.delete(id);
        self.commit("todo_delete", next);
    }

    /// Filters the current snapshot.
    pub fn query(&self, filter: &TodoFilter) -> Vec<Todo> {
        self.snapshot.todos.query(filter)
    }

    pub fn completed(&self) -> Vec<Todo> {
        self.snapshot.todos.completed()
    }

    pub fn stats(&self) -> TodoStats {
        self.snapshot.todos.stats()
    }

    /// Registers a callback invoked with every new snapshot.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&TodoSnapshot) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Message of the most recent failed save, cleared by the next success.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn commit(&mut self, event: &str, next: TodoList) {
        self.snapshot = TodoSnapshot {
            revision: self.snapshot.revision + 1,
            todos: next,
        };

        match self.repo.save(&self.snapshot.todos) {
            Ok(()) => {
                self.last_save_error = None;
                debug!(
                    "event={event} module=service status=ok revision={} count={}",
                    self.snapshot.revision,
                    self.snapshot.todos.len()
                );
            }
            Err(err) => {
                error!(
                    "event={event} module=service status=error error_code={} error={} revision={}",
                    err.code(),
                    err,
                    self.snapshot.revision
                );
                self.last_save_error = Some(err.to_string());
            }
        }

        for (_, listener) in &mut self.listeners {
            listener(&self.snapshot);
        }
    }
}

/// Opens the SQLite-backed service described by `config`.
pub fn open_sqlite_service(config: &StorageConfig) -> KvResult<SqliteTodoService> {
    let store = SqliteKvStore::open(&config.db_path)?;
    let repo = SlotTodoRepository::with_slot_key(store, config.slot_key.clone());
    Ok(TodoService::open(repo))
}
