//! Manufacturing entity model
//!
//! The concrete entity kinds reconstructed from and written back to the
//! graph store: enterprises and their factories and supplier chains,
//! processes and the capabilities they require, capability hierarchies, and
//! products with their passports.
//!
//! Relations are deliberately cyclic (an enterprise owns factories, a
//! factory points back at its enterprise; capabilities specialize and
//! generalize each other; enterprises supply each other), so entities are
//! held as [`Shared`](crate::domain::graph::Shared) handles and looked up by
//! identity only.

pub mod capability;
pub mod enterprise;
pub mod factory;
pub mod passport;
pub mod process;
pub mod product;
pub mod vocab;

pub use capability::Capability;
pub use enterprise::Enterprise;
pub use factory::Factory;
pub use passport::{PassportProperty, ProductPassport};
pub use process::Process;
pub use product::Product;

use crate::domain::graph::{GraphEntity, Iri, Shared};

/// Identities of a relation collection, in collection order
pub fn identities<T: GraphEntity>(entities: &[Shared<T>]) -> Vec<Iri> {
    entities
        .iter()
        .map(|entity| entity.borrow().identity().clone())
        .collect()
}
