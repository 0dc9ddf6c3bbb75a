//! Immutable record sequence and its transitions.
//!
//! # Responsibility
//! - Represent one snapshot of the newest-first record sequence.
//! - Compute the next snapshot for each user command.
//!
//! # Invariants
//! - Transitions never mutate `self`; callers swap snapshots.
//! - Not-found ids leave the sequence unchanged (same snapshot).
//! - Ids stay unique; `add` never reuses an id present in the sequence.

use crate::model::todo::{normalize_text, Priority, Todo, TodoId, TodoValidationError};
use crate::store::filter::TodoFilter;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

/// User input for creating or editing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    /// Raw text; trimmed before storage.
    pub text: String,
    pub priority: Priority,
    /// `None` clears the due date on edit.
    pub due_date: Option<NaiveDate>,
}

impl TodoDraft {
    /// Draft with default priority and no due date.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::default(),
            due_date: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }
}

/// Record counts used by list headers and empty states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// One immutable snapshot of the record sequence, newest first.
///
/// Cloning is cheap; snapshots share their backing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    items: Arc<[Todo]>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoList {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Builds a sequence from already-ordered records.
    ///
    /// # Errors
    /// - Any record-level validation failure.
    /// - `DuplicateId` when two records share an id.
    pub fn from_todos(todos: Vec<Todo>) -> Result<Self, TodoValidationError> {
        let mut seen = HashSet::with_capacity(todos.len());
        for todo in &todos {
            todo.validate()?;
            if !seen.insert(&todo.id) {
                return Err(TodoValidationError::DuplicateId(todo.id.clone()));
            }
        }
        Ok(Self {
            items: Arc::from(todos),
        })
    }

    /// Builds a sequence from decoded records, skipping failed records and
    /// later repeats of an id. Returns the reason for each skipped record.
    pub fn from_todos_lossy(
        records: impl IntoIterator<Item = Result<Todo, TodoValidationError>>,
    ) -> (Self, Vec<TodoValidationError>) {
        let mut kept = Vec::new();
        let mut dropped = Vec::new();
        let mut seen = HashSet::new();
        for record in records {
            match record.and_then(|todo| todo.validate().map(|()| todo)) {
                Ok(todo) if seen.insert(todo.id.clone()) => kept.push(todo),
                Ok(todo) => dropped.push(TodoValidationError::DuplicateId(todo.id)),
                Err(err) => dropped.push(err),
            }
        }
        let list = Self {
            items: Arc::from(kept),
        };
        (list, dropped)
    }

    pub fn as_slice(&self) -> &[Todo] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| &todo.id == id)
    }

    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn to_vec(&self) -> Vec<Todo> {
        self.items.to_vec()
    }

    /// Prepends a new incomplete record.
    ///
    /// Returns the next snapshot and the id assigned to the new record.
    ///
    /// # Errors
    /// - `EmptyText` when the draft text is blank; `self` is unchanged.
    pub fn add(&self, draft: &TodoDraft) -> Result<(Self, TodoId), TodoValidationError> {
        let text = normalize_text(&draft.text)?;
        let id = self.fresh_id();
        let todo = Todo {
            id: id.clone(),
            text,
            completed: false,
            due_date: draft.due_date,
            priority: draft.priority,
        };

        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(todo);
        next.extend(self.items.iter().cloned());
        Ok((
            Self {
                items: Arc::from(next),
            },
            id,
        ))
    }

    /// Flips `completed` on the matching record.
    pub fn toggle_complete(&self, id: &TodoId) -> Self {
        self.replace(id, |todo| Todo {
            completed: !todo.completed,
            ..todo.clone()
        })
    }

    /// Replaces text, priority and due date of the matching record, keeping
    /// its id and completion state.
    ///
    /// # Errors
    /// - `EmptyText` when the draft text is blank, even when `id` is unknown.
    pub fn edit(&self, id: &TodoId, draft: &TodoDraft) -> Result<Self, TodoValidationError> {
        let text = normalize_text(&draft.text)?;
        Ok(self.replace(id, |todo| Todo {
            id: todo.id.clone(),
            text: text.clone(),
            completed: todo.completed,
            due_date: draft.due_date,
            priority: draft.priority,
        }))
    }

    /// Removes the matching record.
    pub fn delete(&self, id: &TodoId) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        let next: Vec<Todo> = self
            .items
            .iter()
            .filter(|todo| &todo.id != id)
            .cloned()
            .collect();
        Self {
            items: Arc::from(next),
        }
    }

    /// Returns matching records in sequence order without touching `self`.
    pub fn query(&self, filter: &TodoFilter) -> Vec<Todo> {
        if filter.is_unconstrained() {
            return self.to_vec();
        }
        let matches = filter.matcher();
        self.items
            .iter()
            .filter(|&todo| matches(todo))
            .cloned()
            .collect()
    }

    /// Completed records in sequence order.
    pub fn completed(&self) -> Vec<Todo> {
        self.query(&TodoFilter::completed())
    }

    pub fn stats(&self) -> TodoStats {
        let completed = self.items.iter().filter(|todo| todo.completed).count();
        TodoStats {
            total: self.items.len(),
            completed,
            pending: self.items.len() - completed,
        }
    }

    fn replace(&self, id: &TodoId, update: impl Fn(&Todo) -> Todo) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        let next: Vec<Todo> = self
            .items
            .iter()
            .map(|todo| {
                if &todo.id == id {
                    update(todo)
                } else {
                    todo.clone()
                }
            })
            .collect();
        Self {
            items: Arc::from(next),
        }
    }

    fn fresh_id(&self) -> TodoId {
        loop {
            let candidate = TodoId::generate();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
