//! Domain model for to-do records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by store, persistence and FFI.
//! - Own record-level validation so every write path enforces the same rules.
//!
//! # Invariants
//! - Every record is identified by a stable, never reused `TodoId`.
//! - Record text is trimmed and never empty.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod todo;
