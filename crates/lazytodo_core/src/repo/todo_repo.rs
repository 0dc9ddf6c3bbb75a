//! Record-sequence persistence over one key-value slot.
//!
//! # Responsibility
//! - Serialize the full sequence to JSON and write it to the `TODO_LIST_V2`
//!   slot.
//! - Read and decode the slot at startup.
//!
//! # Invariants
//! - `save` unconditionally replaces the slot with a full snapshot.
//! - `load` never fails: a missing, unreadable or malformed slot yields an
//!   empty sequence and a log event.
//! - A well-formed payload keeps every valid record; records that break
//!   record invariants or repeat an id are skipped and logged.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::kv::{KeyValueStore, KvError};
use crate::model::todo::{Todo, TodoValidationError, TodoWire};
use crate::store::todo_list::TodoList;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Slot key holding the serialized record sequence.
pub const TODO_LIST_SLOT: &str = "TODO_LIST_V2";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for slot reads, writes and payload decoding.
#[derive(Debug)]
pub enum RepoError {
    Kv(KvError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl RepoError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Kv(_) => "slot_io_failed",
            Self::Encode(_) => "encode_failed",
            Self::Decode(_) => "decode_failed",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode todo list: {err}"),
            Self::Decode(err) => write!(f, "failed to decode todo list: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Repository interface for loading and saving the record sequence.
pub trait TodoRepository {
    /// Reads the persisted sequence. `Ok(None)` means never written.
    fn try_load(&self) -> RepoResult<Option<TodoList>>;

    /// Replaces the persisted sequence with `list`.
    fn save(&self, list: &TodoList) -> RepoResult<()>;

    /// Reads the persisted sequence, defaulting to empty on any failure.
    fn load(&self) -> TodoList {
        match self.try_load() {
            Ok(Some(list)) => list,
            Ok(None) => {
                info!("event=todo_load module=repo status=empty");
                TodoList::new()
            }
            Err(err) => {
                warn!(
                    "event=todo_load module=repo status=error error_code={} error={} fallback=empty",
                    err.code(),
                    err
                );
                TodoList::new()
            }
        }
    }
}

/// Repository storing the sequence as JSON in one key-value slot.
pub struct SlotTodoRepository<S: KeyValueStore> {
    store: S,
    slot_key: String,
}

impl<S: KeyValueStore> SlotTodoRepository<S> {
    /// Uses the default `TODO_LIST_V2` slot.
    pub fn new(store: S) -> Self {
        Self::with_slot_key(store, TODO_LIST_SLOT)
    }

    pub fn with_slot_key(store: S, slot_key: impl Into<String>) -> Self {
        Self {
            store,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> TodoRepository for SlotTodoRepository<S> {
    fn try_load(&self) -> RepoResult<Option<TodoList>> {
        let started_at = Instant::now();
        let Some(raw) = self.store.get(&self.slot_key)? else {
            return Ok(None);
        };

        let DecodedTodos { list, dropped } = decode_todos(&raw)?;
        if let Some(first) = dropped.first() {
            warn!(
                "event=todo_load module=repo status=partial count={} dropped={} first_error={} duration_ms={}",
                list.len(),
                dropped.len(),
                first,
                started_at.elapsed().as_millis()
            );
        } else {
            info!(
                "event=todo_load module=repo status=ok count={} bytes={} duration_ms={}",
                list.len(),
                raw.len(),
                started_at.elapsed().as_millis()
            );
        }
        Ok(Some(list))
    }

    fn save(&self, list: &TodoList) -> RepoResult<()> {
        let started_at = Instant::now();
        let raw = encode_todos(list)?;
        self.store.set(&self.slot_key, &raw)?;
        info!(
            "event=todo_save module=repo status=ok count={} bytes={} duration_ms={}",
            list.len(),
            raw.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Serializes a sequence to its slot payload (a JSON array).
pub fn encode_todos(list: &TodoList) -> RepoResult<String> {
    serde_json::to_string(list.as_slice()).map_err(RepoError::Encode)
}

/// Decoded slot payload.
#[derive(Debug)]
pub struct DecodedTodos {
    pub list: TodoList,
    /// Why each skipped record was rejected, in payload order.
    pub dropped: Vec<TodoValidationError>,
}

/// Parses a slot payload.
///
/// # Errors
/// - `Decode` when the payload is not a JSON array of record objects.
///
/// Records breaking record invariants, and later records repeating an id,
/// are skipped and reported in `dropped`.
pub fn decode_todos(raw: &str) -> RepoResult<DecodedTodos> {
    let records: Vec<TodoWire> = serde_json::from_str(raw).map_err(RepoError::Decode)?;
    let (list, dropped) = TodoList::from_todos_lossy(records.into_iter().map(Todo::try_from));
    Ok(DecodedTodos { list, dropped })
}

#[cfg(test)]
mod tests {
    use super::{decode_todos, encode_todos};
    use crate::model::todo::{TodoId, TodoValidationError};
    use crate::store::todo_list::{TodoDraft, TodoList};

    #[test]
    fn encode_writes_json_array_in_sequence_order() {
        let (list, _) = TodoList::new().add(&TodoDraft::new("older")).unwrap();
        let (list, _) = list.add(&TodoDraft::new("newer")).unwrap();

        let raw = encode_todos(&list).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["text"], "newer");
        assert_eq!(value[1]["text"], "older");
    }

    #[test]
    fn decode_keeps_first_record_of_a_repeated_id() {
        let raw = r#"[
            {"id":"1","text":"a","completed":false,"priority":"Low"},
            {"id":"1","text":"b","completed":false,"priority":"Low"}
        ]"#;
        let decoded = decode_todos(raw).unwrap();
        assert_eq!(decoded.list.len(), 1);
        assert_eq!(decoded.list.as_slice()[0].text, "a");
        assert_eq!(
            decoded.dropped,
            vec![TodoValidationError::DuplicateId(TodoId::parse("1").unwrap())]
        );
    }

    #[test]
    fn decode_skips_blank_records_and_keeps_ids_verbatim() {
        let raw = r#"[
            {"id":" 7","text":"padded id","completed":false,"priority":"Low"},
            {"id":"7","text":"plain id","completed":false,"priority":"Low"},
            {"id":"8","text":"  ","completed":false,"priority":"Low"},
            {"id":"","text":"no id","completed":false,"priority":"Low"}
        ]"#;
        let decoded = decode_todos(raw).unwrap();
        let ids: Vec<&str> = decoded.list.iter().map(|todo| todo.id.as_str()).collect();
        assert_eq!(ids, vec![" 7", "7"]);
        assert_eq!(
            decoded.dropped,
            vec![TodoValidationError::EmptyText, TodoValidationError::EmptyId]
        );
        assert_eq!(encode_todos(&decoded.list).unwrap().matches(r#""id":" 7""#).count(), 1);
    }

    #[test]
    fn decode_rejects_non_array_payload() {
        let err = decode_todos(r#"{"id":"1"}"#).unwrap_err();
        assert_eq!(err.code(), "decode_failed");
    }
}
