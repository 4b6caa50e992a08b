//! Per-kind single-entity fetchers over the memory store
//!
//! Each fetch runs the kind's narrowed row projection and re-enters the
//! materializer with the caller's resolver, so the whole resolution chain
//! shares one identity cache and cross-kind cycles terminate.

use crate::domain::graph::{
    FetchByIdentity, FetcherRegistry, GraphReader, Iri, Resolver, Shared, materialize,
};
use crate::domain::manufacturing::{
    Capability, Enterprise, Factory, PassportProperty, Process, Product, ProductPassport,
};
use crate::error::Result;

use super::store::MemoryStore;

/// Fetch collaborator for every entity kind the memory store projects
#[derive(Clone)]
pub struct MemoryFetcher {
    store: MemoryStore,
}

impl MemoryFetcher {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl FetchByIdentity<Enterprise> for MemoryFetcher {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<Enterprise>>> {
        let mut source = self.store.enterprise_rows(Some(identity));
        Ok(materialize::<Enterprise>(&mut source, resolver)?.into_iter().next())
    }
}

impl FetchByIdentity<Factory> for MemoryFetcher {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<Factory>>> {
        let mut source = self.store.factory_rows(Some(identity));
        Ok(materialize::<Factory>(&mut source, resolver)?.into_iter().next())
    }
}

impl FetchByIdentity<Process> for MemoryFetcher {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<Process>>> {
        let mut source = self.store.process_rows(Some(identity));
        Ok(materialize::<Process>(&mut source, resolver)?.into_iter().next())
    }
}

impl FetchByIdentity<Capability> for MemoryFetcher {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<Capability>>> {
        let mut source = self.store.capability_rows(Some(identity));
        Ok(materialize::<Capability>(&mut source, resolver)?.into_iter().next())
    }
}

impl FetchByIdentity<Product> for MemoryFetcher {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<Product>>> {
        let mut source = self.store.product_rows(Some(identity));
        Ok(materialize::<Product>(&mut source, resolver)?.into_iter().next())
    }
}

impl FetchByIdentity<ProductPassport> for MemoryFetcher {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<ProductPassport>>> {
        let mut source = self.store.passport_rows(Some(identity));
        Ok(materialize::<ProductPassport>(&mut source, resolver)?.into_iter().next())
    }
}

impl FetchByIdentity<PassportProperty> for MemoryFetcher {
    fn fetch_by_identity(
        &self,
        resolver: &mut Resolver<'_>,
        identity: &Iri,
    ) -> Result<Option<Shared<PassportProperty>>> {
        let mut source = self.store.property_rows(Some(identity));
        Ok(materialize::<PassportProperty>(&mut source, resolver)?.into_iter().next())
    }
}

/// Fetcher wiring for every kind the memory store serves
pub fn registry(store: &MemoryStore) -> FetcherRegistry {
    let mut registry = FetcherRegistry::new();
    registry.register::<Enterprise>(MemoryFetcher::new(store.clone()));
    registry.register::<Factory>(MemoryFetcher::new(store.clone()));
    registry.register::<Process>(MemoryFetcher::new(store.clone()));
    registry.register::<Capability>(MemoryFetcher::new(store.clone()));
    registry.register::<Product>(MemoryFetcher::new(store.clone()));
    registry.register::<ProductPassport>(MemoryFetcher::new(store.clone()));
    registry.register::<PassportProperty>(MemoryFetcher::new(store.clone()));
    registry
}

/// A reader wired against `store`
pub fn reader(store: &MemoryStore) -> GraphReader {
    GraphReader::new(registry(store))
}
