//! Fabrik Core Library
//!
//! This crate provides the data-access core for Fabrik, including:
//! - Row-folding materialization of entity graphs from flat query rows
//! - Per-operation identity caching with cycle-safe cross-reference resolution
//! - Dynamic-arity write templates and their paired parameter bindings
//! - The manufacturing entity model (enterprises, factories, processes,
//!   capabilities, products, product passports)
//! - An in-memory graph store backend for wiring and tests

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::domain::graph::{
        GraphEntity, GraphReader, Iri, LangText, Row, RowSource, Shared, shared,
    };
    pub use crate::domain::statement::{Bindings, GraphWriter, WritePlan, WriteTemplate};
    pub use crate::error::{Error, Result};
}
