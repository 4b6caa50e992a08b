//! Per-operation identity cache
//!
//! Scoped to a single top-level read and discarded afterward. Never a
//! process-wide singleton: the cache is threaded explicitly through every
//! recursive resolution call so operations stay independent.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::identity::Iri;
use super::materialize::GraphEntity;

/// Shared handle to an entity under construction or in use
///
/// Entity graphs are cyclic (enterprise/factory, supplier chains, capability
/// hierarchies), so entities are held by shared ownership and mutated through
/// interior mutability. Lookup and comparison are by identity, never by
/// structure.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap an entity in a shared handle
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Store from (kind, identity) to the in-progress or completed instance
///
/// `get_or_create` registers the bare stub *before* any field is populated.
/// A cyclic reference met mid-construction therefore resolves to the real,
/// still-partial object instead of recursing forever. The key includes the
/// entity kind, so the one cache breaks cycles across kind boundaries too.
#[derive(Default)]
pub struct IdentityCache {
    entries: HashMap<(TypeId, Iri), Rc<dyn Any>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The existing instance for `identity`, or a freshly registered stub
    ///
    /// Returns the handle and whether it was newly created.
    pub fn get_or_create<T: GraphEntity>(&mut self, identity: &Iri) -> (Shared<T>, bool) {
        let key = (TypeId::of::<T>(), identity.clone());
        if let Some(existing) = self.entries.get(&key) {
            if let Ok(entity) = Rc::clone(existing).downcast::<RefCell<T>>() {
                trace!(kind = T::KIND, identity = %identity, "identity cache hit");
                return (entity, false);
            }
        }

        let entity = shared(T::stub(identity.clone()));
        self.entries.insert(key, Rc::clone(&entity) as Rc<dyn Any>);
        trace!(kind = T::KIND, identity = %identity, "identity cache stub registered");
        (entity, true)
    }

    /// The instance for `identity`, if one is registered
    pub fn lookup<T: GraphEntity>(&self, identity: &Iri) -> Option<Shared<T>> {
        let key = (TypeId::of::<T>(), identity.clone());
        self.entries
            .get(&key)
            .and_then(|entry| Rc::clone(entry).downcast::<RefCell<T>>().ok())
    }

    /// Number of registered instances across all kinds
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::row::Row;

    #[derive(Debug)]
    struct Widget {
        identity: Iri,
        label: Option<String>,
    }

    impl GraphEntity for Widget {
        const KIND: &'static str = "widget";
        const IDENTITY_COLUMN: &'static str = "widget";

        fn stub(identity: Iri) -> Self {
            Self {
                identity,
                label: None,
            }
        }

        fn identity(&self) -> &Iri {
            &self.identity
        }

        fn apply_scalars(&mut self, row: &Row) {
            self.label = row.text("label").map(str::to_owned);
        }
    }

    #[derive(Debug)]
    struct Gadget {
        identity: Iri,
    }

    impl GraphEntity for Gadget {
        const KIND: &'static str = "gadget";
        const IDENTITY_COLUMN: &'static str = "gadget";

        fn stub(identity: Iri) -> Self {
            Self { identity }
        }

        fn identity(&self) -> &Iri {
            &self.identity
        }

        fn apply_scalars(&mut self, _row: &Row) {}
    }

    #[test]
    fn test_same_identity_returns_same_instance() {
        let mut cache = IdentityCache::new();
        let id = Iri::new("urn:w1");

        let (first, created_first) = cache.get_or_create::<Widget>(&id);
        let (second, created_second) = cache.get_or_create::<Widget>(&id);

        assert!(created_first);
        assert!(!created_second);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_stub_is_registered_before_population() {
        let mut cache = IdentityCache::new();
        let id = Iri::new("urn:w1");

        let (widget, _) = cache.get_or_create::<Widget>(&id);
        // Not yet populated, but already resolvable by identity.
        assert!(widget.borrow().label.is_none());
        assert!(cache.lookup::<Widget>(&id).is_some());
    }

    #[test]
    fn test_kinds_do_not_collide_on_the_same_identity() {
        let mut cache = IdentityCache::new();
        let id = Iri::new("urn:shared");

        let (_, widget_new) = cache.get_or_create::<Widget>(&id);
        let (_, gadget_new) = cache.get_or_create::<Gadget>(&id);

        assert!(widget_new);
        assert!(gadget_new);
        assert_eq!(cache.len(), 2);
    }
}
