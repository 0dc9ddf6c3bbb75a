//! Core use-case services.
//!
//! # Responsibility
//! - Own process state and orchestrate store transitions with persistence.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod todo_service;
