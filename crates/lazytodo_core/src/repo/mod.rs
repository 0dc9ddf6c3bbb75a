//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the record sequence.
//! - Isolate slot encoding details from service orchestration.
//!
//! # Invariants
//! - Writes replace the full persisted sequence.
//! - Reads enforce record and sequence invariants before returning data.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod todo_repo;
