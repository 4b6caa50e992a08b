//! Write-statement pipeline
//!
//! Serializes an in-memory entity and its relations into a parametrized
//! write statement plus the matching parameter bindings. The repeated
//! relation arity is not known until write time, so both halves are driven
//! by one shared recipe:
//!
//! - [`RelationSeries`] produces the fixed + indexed parameter names for one
//!   repeated relation
//! - [`WritePlan`] is the single ordered walk over an entity's fields
//! - [`build_template`] and [`populate_bindings`] both consume that walk,
//!   so template and bindings cannot drift out of sync

mod bindings;
mod executor;
mod plan;
mod template;

pub use bindings::{Bindings, BoundValue, populate_bindings};
pub use executor::{GraphWriter, StatementExecutor};
pub use plan::{WritePlan, build_template};
pub use template::{RelationSeries, Term, TriplePattern, WriteTemplate};
