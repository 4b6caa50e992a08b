//! Opaque entity identities and the minting collaborator
//!
//! An [`Iri`] names exactly one entity in the backing graph store. Identities
//! are compared and hashed by their string form only; entities themselves are
//! never compared structurally (structural equality cannot terminate on a
//! cyclic graph).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;

/// Opaque, globally unique, immutable entity reference
///
/// Cheap to clone; the string body is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(Arc<str>);

impl Iri {
    /// Create an identity from its string form
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    /// The string form of the identity
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Collaborator that mints candidate identities for new entities
pub trait IdentityMinter {
    /// Produce one candidate identity; uniqueness is checked by the caller
    fn new_identity(&mut self) -> Result<Iri>;
}

/// Collaborator answering whether an identity is already present in storage
pub trait IdentityLookup {
    fn exists(&self, identity: &Iri) -> Result<bool>;
}

/// Mint an identity that is not already present in storage
///
/// Retries the minter until the candidate passes the collision check, as the
/// minting contract requires.
pub fn mint_fresh_identity<M, L>(minter: &mut M, storage: &L) -> Result<Iri>
where
    M: IdentityMinter + ?Sized,
    L: IdentityLookup + ?Sized,
{
    loop {
        let candidate = minter.new_identity()?;
        if !storage.exists(&candidate)? {
            return Ok(candidate);
        }
        debug!(identity = %candidate, "minted identity collides with storage, retrying");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct SequenceMinter {
        queue: Vec<&'static str>,
    }

    impl IdentityMinter for SequenceMinter {
        fn new_identity(&mut self) -> Result<Iri> {
            if self.queue.is_empty() {
                return Err(Error::Minting("minter exhausted".into()));
            }
            Ok(Iri::new(self.queue.remove(0)))
        }
    }

    struct FixedStorage {
        taken: Vec<Iri>,
    }

    impl IdentityLookup for FixedStorage {
        fn exists(&self, identity: &Iri) -> Result<bool> {
            Ok(self.taken.contains(identity))
        }
    }

    #[test]
    fn test_identity_equality_is_by_string() {
        let a = Iri::new("urn:fabrik:enterprise:1");
        let b = Iri::from("urn:fabrik:enterprise:1");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "urn:fabrik:enterprise:1");
    }

    #[test]
    fn test_identity_serializes_as_plain_string() {
        let iri = Iri::new("urn:fabrik:factory:7");
        let json = serde_json::to_string(&iri).unwrap();
        assert_eq!(json, "\"urn:fabrik:factory:7\"");
        let back: Iri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, iri);
    }

    #[test]
    fn test_minting_retries_past_collisions() {
        let mut minter = SequenceMinter {
            queue: vec!["urn:a", "urn:b", "urn:c"],
        };
        let storage = FixedStorage {
            taken: vec![Iri::new("urn:a"), Iri::new("urn:b")],
        };

        let fresh = mint_fresh_identity(&mut minter, &storage).unwrap();
        assert_eq!(fresh, Iri::new("urn:c"));
    }
}
