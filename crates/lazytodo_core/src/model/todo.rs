//! To-do record model.
//!
//! # Responsibility
//! - Define `Todo`, its identifier and priority types.
//! - Validate record text and ids on construction and on deserialization.
//! - Own the persisted wire shape (`id`, `text`, `completed`, `dueDate`,
//!   `priority`).
//!
//! # Invariants
//! - `id` is non-empty and stable for the record lifetime.
//! - `text` is trimmed and non-empty.
//! - `due_date` carries a calendar day only; time-of-day is never stored.
//!
//! # See also
//! - docs/architecture/data-model.md

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Date layout used on the wire and by host-facing parsers.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

// Accepts `2026-10-20` and full ISO timestamps such as
// `2026-10-20T00:00:00.000Z`; only the calendar-day prefix is kept.
static DUE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{4}-\d{2}-\d{2})(?:[T ][0-9:.]*(?:Z|[+-]\d{2}:?\d{2})?)?\s*$")
        .expect("valid due date regex")
});

/// Validation failures for record construction and sequence integrity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// Identifier is empty after trimming.
    EmptyId,
    /// Two records in one sequence share an identifier.
    DuplicateId(TodoId),
    /// Due date text is not a calendar date.
    InvalidDueDate(String),
    /// Priority label is not one of `Low|Medium|High`.
    InvalidPriority(String),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text cannot be empty"),
            Self::EmptyId => write!(f, "todo id cannot be empty"),
            Self::DuplicateId(id) => write!(f, "duplicate todo id: {id}"),
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected low|medium|high")
            }
        }
    }
}

impl Error for TodoValidationError {}

/// Stable opaque identifier of one record.
///
/// New ids are random UUID v4 strings. Any non-empty string read back from
/// storage is accepted, so ids written by older app builds stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps host input, trimming it and rejecting blank values.
    pub fn parse(value: impl Into<String>) -> Result<Self, TodoValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        if trimmed.len() == value.len() {
            return Ok(Self(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wraps an identifier read back from storage, byte for byte.
    pub(crate) fn from_stored(value: String) -> Result<Self, TodoValidationError> {
        if value.trim().is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_stored(raw).map_err(serde::de::Error::custom)
    }
}

/// Record priority. Serialized with its capitalized variant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Wire label (`Low|Medium|High`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses a label case-insensitively.
    pub fn parse(value: &str) -> Result<Self, TodoValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TodoValidationError::InvalidPriority(value.to_string())),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TodoWire")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    /// Calendar day only. Omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl Todo {
    /// Creates an incomplete record with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank after trimming.
    pub fn new(
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, TodoValidationError> {
        Self::with_id(TodoId::generate(), text, priority, due_date)
    }

    /// Creates an incomplete record with a caller-provided id.
    pub fn with_id(
        id: TodoId,
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, TodoValidationError> {
        Ok(Self {
            id,
            text: normalize_text(text)?,
            completed: false,
            due_date,
            priority,
        })
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TodoValidationError::EmptyText);
        }
        Ok(())
    }
}

/// Trims record text and rejects blank input.
pub fn normalize_text(text: &str) -> Result<String, TodoValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TodoValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Parses a due date in `YYYY-MM-DD` form, also accepting an ISO timestamp
/// whose calendar-day prefix is used.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TodoValidationError> {
    let day = DUE_DATE_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| TodoValidationError::InvalidDueDate(value.to_string()))?;
    NaiveDate::parse_from_str(day.as_str(), DUE_DATE_FORMAT)
        .map_err(|_| TodoValidationError::InvalidDueDate(value.to_string()))
}

/// Formats a due date in wire form.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

// Read-side shape: tolerant of records written before `priority` and
// `completed` existed, and of `null` or timestamp due dates. Record
// invariants are checked in `TryFrom`, so a payload can be decoded
// structurally and validated one record at a time.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TodoWire {
    id: String,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    priority: Priority,
}

impl TryFrom<TodoWire> for Todo {
    type Error = TodoValidationError;

    fn try_from(wire: TodoWire) -> Result<Self, Self::Error> {
        let todo = Self {
            id: TodoId::from_stored(wire.id)?,
            text: wire.text,
            completed: wire.completed,
            due_date: wire.due_date,
            priority: wire.priority,
        };
        todo.validate()?;
        Ok(todo)
    }
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_due_date(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
