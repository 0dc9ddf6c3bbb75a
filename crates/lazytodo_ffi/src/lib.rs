//! Flutter bridge for the LazyTodo core.
//!
//! Only use-case functions live here; all invariants are enforced by
//! `lazytodo_core`.

pub mod api;
