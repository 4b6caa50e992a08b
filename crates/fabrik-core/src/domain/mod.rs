//! Domain layer
//!
//! Contains the generic graph materialization machinery, the manufacturing
//! entity model, and the write-statement pipeline.

pub mod graph;
pub mod manufacturing;
pub mod statement;
