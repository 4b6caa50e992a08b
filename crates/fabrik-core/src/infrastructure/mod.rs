//! Infrastructure layer
//!
//! Contains concrete implementations of the domain's collaborator traits.

pub mod memory;
