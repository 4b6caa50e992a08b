//! Generic graph read pipeline
//!
//! Folds flat, denormalized query rows into cyclically linked entity graphs:
//!
//! - **Row / RowSource**: one flat tuple per combination of optional
//!   relation, columns keyed by name, values optional
//! - **IdentityCache**: per-operation store keyed by (kind, identity);
//!   registers stubs before population so cycles resolve to real objects
//! - **Resolver**: cross-reference resolution, delegating to per-kind fetch
//!   collaborators that re-enter the same pipeline
//! - **materialize / GraphReader**: the row-folding loop producing the
//!   deduplicated root entity list in first-seen order
//!
//! Everything here is single-threaded and pull-based; a cache or resolver
//! must never be shared across concurrent operations.

mod cache;
mod identity;
mod materialize;
mod row;
mod value;

pub use cache::{IdentityCache, Shared, shared};
pub use identity::{IdentityLookup, IdentityMinter, Iri, mint_fresh_identity};
pub use materialize::{
    FetchByIdentity, FetcherRegistry, GraphEntity, GraphReader, Resolver, materialize,
};
pub use row::{Row, RowSource, Value, VecRowSource};
pub use value::LangText;
