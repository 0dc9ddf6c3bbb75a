//! In-memory record store.
//!
//! # Responsibility
//! - Hold the ordered, newest-first record sequence as an immutable snapshot.
//! - Expose pure transitions (add/toggle/edit/delete) and read-only queries.
//!
//! # Invariants
//! - Ids are unique across a sequence.
//! - A transition either yields a complete new sequence or is rejected.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod filter;
pub mod todo_list;
