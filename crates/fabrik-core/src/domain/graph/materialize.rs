//! Row-folding materialization and cross-reference resolution
//!
//! The materializer folds N flat rows (one per combination of optional
//! multi-valued relation) into K identity-stable root entities with merged
//! relation collections, tolerating cyclic references between entity kinds.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::cache::{IdentityCache, Shared};
use super::identity::Iri;
use super::row::{Row, RowSource};
use crate::error::{Error, Result};

/// An entity kind that can be folded out of a flat row stream
///
/// Implementors declare their identity column and how scalar and relation
/// columns of one row apply to an instance. Relation application appends
/// unconditionally: the fold performs no de-duplication against the existing
/// collection, so a stream that repeats an identical relation row yields a
/// duplicated edge. That matches the store's contract of never repeating a
/// relation row within one projection.
pub trait GraphEntity: Sized + 'static {
    /// Kind name used in logs and errors
    const KIND: &'static str;
    /// Column carrying the mandatory identity of this kind's rows
    const IDENTITY_COLUMN: &'static str;

    /// A bare, unpopulated instance carrying only its identity
    fn stub(identity: Iri) -> Self;

    /// The identity this instance was created under
    fn identity(&self) -> &Iri;

    /// Populate non-relational fields from a row
    ///
    /// Runs once per identity: the left-join duplication of a one-to-many
    /// relation repeats the scalar columns identically on every row.
    fn apply_scalars(&mut self, row: &Row);

    /// Resolve and append the relation columns present in a row
    fn apply_relations(this: &Shared<Self>, row: &Row, resolver: &mut Resolver<'_>) -> Result<()> {
        let _ = (this, row, resolver);
        Ok(())
    }
}

/// Single-entity fetch collaborator for one related kind
///
/// Implementations typically query the store for that one subject and
/// re-enter [`materialize`] with the caller's resolver, so the whole
/// resolution chain shares one identity cache.
pub trait FetchByIdentity<T: GraphEntity> {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<T>>>;
}

/// Wiring from entity kind to its fetch collaborator
#[derive(Default)]
pub struct FetcherRegistry {
    fetchers: HashMap<TypeId, Box<dyn Any>>,
}

impl FetcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the fetch collaborator for kind `T`
    pub fn register<T: GraphEntity>(&mut self, fetcher: impl FetchByIdentity<T> + 'static) {
        self.fetchers.insert(
            TypeId::of::<T>(),
            Box::new(Box::new(fetcher) as Box<dyn FetchByIdentity<T>>),
        );
    }

    fn get<T: GraphEntity>(&self) -> Option<&dyn FetchByIdentity<T>> {
        self.fetchers
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Box<dyn FetchByIdentity<T>>>())
            .map(|boxed| boxed.as_ref())
    }
}

/// Cross-reference resolution context for one read operation
///
/// Carries the operation-scoped identity cache and the fetcher wiring down
/// every recursive call. Cross-kind cycles (Enterprise → Factory →
/// Enterprise) terminate because the cache is consulted before any fetch:
/// an entity already being assembled further up the chain is returned as a
/// partial reference instead of being re-descended into.
pub struct Resolver<'a> {
    cache: &'a mut IdentityCache,
    fetchers: &'a FetcherRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(cache: &'a mut IdentityCache, fetchers: &'a FetcherRegistry) -> Self {
        Self { cache, fetchers }
    }

    /// Resolve a related identity found in a row
    ///
    /// An identity the fetch collaborator cannot resolve is not an error;
    /// the edge is silently skipped. A kind with no registered fetcher is a
    /// wiring bug and fails loudly.
    pub fn resolve<T: GraphEntity>(&mut self, identity: &Iri) -> Result<Option<Shared<T>>> {
        if let Some(existing) = self.cache.lookup::<T>(identity) {
            trace!(kind = T::KIND, identity = %identity, "cross-reference served from cache");
            return Ok(Some(existing));
        }

        let fetchers = self.fetchers;
        let Some(fetcher) = fetchers.get::<T>() else {
            return Err(Error::FetcherMissing(T::KIND));
        };

        match fetcher.fetch_by_identity(self, identity)? {
            Some(entity) => Ok(Some(entity)),
            None => {
                debug!(kind = T::KIND, identity = %identity, "cross-reference unresolved, edge skipped");
                Ok(None)
            }
        }
    }

    /// The operation-scoped identity cache
    pub fn cache_mut(&mut self) -> &mut IdentityCache {
        self.cache
    }
}

/// Fold a row stream for kind `T` into its distinct root entities
///
/// Per row: read the mandatory identity (fatal when absent), get-or-create
/// the root, populate scalars once on first sighting, then resolve and
/// append every relation column present. Roots come back in first-seen
/// order; the identity cache doubles as the O(rows) de-duplication lookup.
pub fn materialize<T: GraphEntity>(
    source: &mut dyn RowSource,
    resolver: &mut Resolver<'_>,
) -> Result<Vec<Shared<T>>> {
    let mut roots: Vec<Shared<T>> = Vec::new();
    let mut seen: HashSet<Iri> = HashSet::new();

    while let Some(row) = source.next_row()? {
        let identity = row.identity(T::IDENTITY_COLUMN, T::KIND)?;

        let (entity, created) = resolver.cache_mut().get_or_create::<T>(&identity);
        if created {
            entity.borrow_mut().apply_scalars(&row);
        }
        if seen.insert(identity) {
            roots.push(Shared::clone(&entity));
        }

        T::apply_relations(&entity, &row, resolver)?;
    }

    debug!(kind = T::KIND, roots = roots.len(), "row stream folded");
    Ok(roots)
}

/// Entry point for top-level reads
///
/// Creates a fresh identity cache per call, so repeated reads of the same
/// rows yield structurally equivalent but instance-distinct graphs.
pub struct GraphReader {
    fetchers: FetcherRegistry,
}

impl GraphReader {
    pub fn new(fetchers: FetcherRegistry) -> Self {
        Self { fetchers }
    }

    /// Materialize every root of kind `T` from `source`
    pub fn read_all<T: GraphEntity>(&self, source: &mut dyn RowSource) -> Result<Vec<Shared<T>>> {
        let mut cache = IdentityCache::new();
        let mut resolver = Resolver::new(&mut cache, &self.fetchers);
        materialize::<T>(source, &mut resolver)
    }

    /// Materialize at most one root of kind `T` from `source`
    pub fn read_first<T: GraphEntity>(
        &self,
        source: &mut dyn RowSource,
    ) -> Result<Option<Shared<T>>> {
        Ok(self.read_all::<T>(source)?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::row::VecRowSource;

    #[derive(Debug)]
    struct Station {
        identity: Iri,
        label: Option<String>,
        next: Vec<Shared<Station>>,
    }

    impl GraphEntity for Station {
        const KIND: &'static str = "station";
        const IDENTITY_COLUMN: &'static str = "station";

        fn stub(identity: Iri) -> Self {
            Self {
                identity,
                label: None,
                next: Vec::new(),
            }
        }

        fn identity(&self) -> &Iri {
            &self.identity
        }

        fn apply_scalars(&mut self, row: &Row) {
            self.label = row.text("label").map(str::to_owned);
        }

        fn apply_relations(
            this: &Shared<Self>,
            row: &Row,
            resolver: &mut Resolver<'_>,
        ) -> Result<()> {
            if let Some(target) = row.reference("next") {
                if let Some(next) = resolver.resolve::<Station>(target)? {
                    this.borrow_mut().next.push(next);
                }
            }
            Ok(())
        }
    }

    /// Fetcher that never resolves anything
    struct NoStations;

    impl FetchByIdentity<Station> for NoStations {
        fn fetch_by_identity(
            &self,
            _resolver: &mut Resolver<'_>,
            _identity: &Iri,
        ) -> Result<Option<Shared<Station>>> {
            Ok(None)
        }
    }

    /// Fetcher that re-enters the materializer over canned per-subject rows
    struct MapStations {
        rows: HashMap<Iri, Vec<Row>>,
    }

    impl FetchByIdentity<Station> for MapStations {
        fn fetch_by_identity(
            &self,
            resolver: &mut Resolver<'_>,
            identity: &Iri,
        ) -> Result<Option<Shared<Station>>> {
            let Some(rows) = self.rows.get(identity) else {
                return Ok(None);
            };
            let mut source = VecRowSource::new(rows.clone());
            Ok(materialize::<Station>(&mut source, resolver)?.into_iter().next())
        }
    }

    fn reader() -> GraphReader {
        let mut fetchers = FetcherRegistry::new();
        fetchers.register::<Station>(NoStations);
        GraphReader::new(fetchers)
    }

    #[test]
    fn test_rows_with_same_identity_fold_into_one_root() {
        let mut source = VecRowSource::new(vec![
            Row::new()
                .with_reference("station", "urn:s1")
                .with_text("label", "saw"),
            Row::new()
                .with_reference("station", "urn:s2")
                .with_text("label", "mill"),
            Row::new()
                .with_reference("station", "urn:s1")
                .with_text("label", "saw"),
        ]);

        let roots = reader().read_all::<Station>(&mut source).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].borrow().identity, Iri::new("urn:s1"));
        assert_eq!(roots[1].borrow().identity, Iri::new("urn:s2"));
    }

    #[test]
    fn test_scalars_are_applied_once_per_identity() {
        let mut source = VecRowSource::new(vec![
            Row::new()
                .with_reference("station", "urn:s1")
                .with_text("label", "first"),
            // Later row with diverging scalar text must not overwrite.
            Row::new()
                .with_reference("station", "urn:s1")
                .with_text("label", "second"),
        ]);

        let roots = reader().read_all::<Station>(&mut source).unwrap();
        assert_eq!(roots[0].borrow().label.as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_identity_aborts_the_read() {
        let mut source = VecRowSource::new(vec![Row::new().with_text("label", "orphan")]);
        let err = reader().read_all::<Station>(&mut source).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingIdentity {
                kind: "station",
                column: "station",
            }
        ));
    }

    #[test]
    fn test_unresolvable_reference_is_skipped_silently() {
        let mut source = VecRowSource::new(vec![
            Row::new()
                .with_reference("station", "urn:s1")
                .with_reference("next", "urn:gone"),
        ]);

        let roots = reader().read_all::<Station>(&mut source).unwrap();
        assert!(roots[0].borrow().next.is_empty());
    }

    #[test]
    fn test_same_kind_cycle_resolves_to_the_partial_instance() {
        // s1 -> s2 resolves through a fetch whose rows point straight back
        // at s1. The back-reference must come out of the shared cache while
        // s1 is still partial, not re-descend.
        let mut rows = HashMap::new();
        rows.insert(
            Iri::new("urn:s2"),
            vec![
                Row::new()
                    .with_reference("station", "urn:s2")
                    .with_reference("next", "urn:s1"),
            ],
        );
        let mut fetchers = FetcherRegistry::new();
        fetchers.register::<Station>(MapStations { rows });
        let reader = GraphReader::new(fetchers);

        let mut source = VecRowSource::new(vec![
            Row::new()
                .with_reference("station", "urn:s1")
                .with_reference("next", "urn:s2"),
        ]);

        let roots = reader.read_all::<Station>(&mut source).unwrap();
        assert_eq!(roots.len(), 1);
        let s1 = &roots[0];
        let s2 = Shared::clone(&s1.borrow().next[0]);
        assert_eq!(s2.borrow().identity, Iri::new("urn:s2"));
        assert!(Shared::ptr_eq(&s2.borrow().next[0], s1));
    }

    #[test]
    fn test_unregistered_kind_is_a_wiring_error() {
        let reader = GraphReader::new(FetcherRegistry::new());
        let mut source = VecRowSource::new(vec![
            Row::new()
                .with_reference("station", "urn:s1")
                .with_reference("next", "urn:s9"),
        ]);

        let err = reader.read_all::<Station>(&mut source).unwrap_err();
        assert!(matches!(err, Error::FetcherMissing("station")));
    }
}
