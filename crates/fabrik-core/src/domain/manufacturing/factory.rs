//! Factory entity

use crate::domain::graph::{GraphEntity, Iri, LangText, Resolver, Row, Shared};
use crate::domain::statement::WritePlan;
use crate::error::Result;

use super::enterprise::Enterprise;
use super::process::Process;
use super::{identities, vocab};

/// Column names of the factory row projection
pub mod columns {
    pub const IDENTITY: &str = "factory";
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const SOURCE_ID: &str = "sourceId";
    pub const ENTERPRISE: &str = "enterprise";
    pub const PROCESS: &str = "process";
}

/// A production site
///
/// Points back at its owning enterprise (the Enterprise ↔ Factory cycle) and
/// provides manufacturing processes.
#[derive(Debug)]
pub struct Factory {
    pub identity: Iri,
    pub label: Option<LangText>,
    pub description: Option<LangText>,
    pub source_id: Option<String>,
    /// Owning enterprise; single-valued back-edge
    pub enterprise: Option<Shared<Enterprise>>,
    pub processes: Vec<Shared<Process>>,
}

impl Factory {
    pub fn new(identity: Iri) -> Self {
        Self {
            identity,
            label: None,
            description: None,
            source_id: None,
            enterprise: None,
            processes: Vec::new(),
        }
    }

    pub fn with_label(mut self, text: impl Into<String>, lang: impl Into<String>) -> Self {
        self.label = Some(LangText::tagged(text, lang));
        self
    }

    pub fn with_description(mut self, text: impl Into<String>, lang: impl Into<String>) -> Self {
        self.description = Some(LangText::tagged(text, lang));
        self
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// The write recipe for this factory snapshot
    pub fn write_plan(&self) -> Result<WritePlan> {
        let enterprise = self
            .enterprise
            .as_ref()
            .map(|enterprise| enterprise.borrow().identity.clone());
        Ok(WritePlan::for_subject(&self.identity)
            .typed(vocab::TYPE, vocab::classes::FACTORY)
            .tagged(vocab::LABEL, columns::LABEL, self.label.as_ref())
            .tagged(
                vocab::DESCRIPTION,
                columns::DESCRIPTION,
                self.description.as_ref(),
            )
            .text(vocab::SOURCE_ID, columns::SOURCE_ID, self.source_id.as_deref())
            .reference(vocab::OWNED_BY, columns::ENTERPRISE, enterprise.as_ref())
            .series(
                vocab::PROVIDES_PROCESS,
                columns::PROCESS,
                identities(&self.processes),
            ))
    }
}

impl GraphEntity for Factory {
    const KIND: &'static str = "factory";
    const IDENTITY_COLUMN: &'static str = columns::IDENTITY;

    fn stub(identity: Iri) -> Self {
        Self::new(identity)
    }

    fn identity(&self) -> &Iri {
        &self.identity
    }

    fn apply_scalars(&mut self, row: &Row) {
        self.label = row.literal(columns::LABEL).cloned();
        self.description = row.literal(columns::DESCRIPTION).cloned();
        self.source_id = row.text(columns::SOURCE_ID).map(str::to_owned);
    }

    fn apply_relations(this: &Shared<Self>, row: &Row, resolver: &mut Resolver<'_>) -> Result<()> {
        if let Some(target) = row.reference(columns::ENTERPRISE) {
            if let Some(enterprise) = resolver.resolve::<Enterprise>(target)? {
                this.borrow_mut().enterprise = Some(enterprise);
            }
        }
        if let Some(target) = row.reference(columns::PROCESS) {
            if let Some(process) = resolver.resolve::<Process>(target)? {
                this.borrow_mut().processes.push(process);
            }
        }
        Ok(())
    }
}
