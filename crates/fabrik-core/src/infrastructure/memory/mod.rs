//! In-memory graph store backend
//!
//! A small in-process triple store implementing every collaborator the
//! domain layer is written against: per-kind flat row projections, per-kind
//! single-entity fetchers, statement execution, identity lookup, and
//! identity minting. Used for wiring and tests; a production deployment
//! substitutes the real store behind the same traits.

mod fetchers;
mod minter;
mod store;

pub use fetchers::{MemoryFetcher, reader, registry};
pub use minter::UuidMinter;
pub use store::{MemoryGraph, MemoryStore, Node};
