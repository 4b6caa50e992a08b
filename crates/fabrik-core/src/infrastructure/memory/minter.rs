//! UUID-backed identity minting

use uuid::Uuid;

use crate::domain::graph::{IdentityMinter, Iri};
use crate::error::Result;

/// Mints `urn:uuid:` identities
///
/// Candidates are still collision-checked against storage by
/// [`mint_fresh_identity`](crate::domain::graph::mint_fresh_identity).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidMinter;

impl UuidMinter {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityMinter for UuidMinter {
    fn new_identity(&mut self) -> Result<Iri> {
        Ok(Iri::new(format!("urn:uuid:{}", Uuid::new_v4())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_identities_are_urns_and_distinct() {
        let mut minter = UuidMinter::new();
        let a = minter.new_identity().unwrap();
        let b = minter.new_identity().unwrap();
        assert!(a.as_str().starts_with("urn:uuid:"));
        assert_ne!(a, b);
    }
}
