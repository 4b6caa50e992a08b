//! Process entity

use crate::domain::graph::{GraphEntity, Iri, LangText, Resolver, Row, Shared};
use crate::domain::statement::WritePlan;
use crate::error::Result;

use super::capability::Capability;
use super::product::Product;
use super::{identities, vocab};

/// Column names of the process row projection
pub mod columns {
    pub const IDENTITY: &str = "process";
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const CAPABILITY: &str = "capability";
    pub const PRODUCT: &str = "product";
}

/// A manufacturing process provided by a factory
#[derive(Debug)]
pub struct Process {
    pub identity: Iri,
    pub label: Option<LangText>,
    pub description: Option<LangText>,
    pub capabilities: Vec<Shared<Capability>>,
    pub outputs: Vec<Shared<Product>>,
}

impl Process {
    pub fn new(identity: Iri) -> Self {
        Self {
            identity,
            label: None,
            description: None,
            capabilities: Vec::new(),
            outputs: Vec::new(),
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

    /// The write recipe for this process snapshot
    pub fn write_plan(&self) -> Result<WritePlan> {
        Ok(WritePlan::for_subject(&self.identity)
            .typed(vocab::TYPE, vocab::classes::PROCESS)
            .tagged(vocab::LABEL, columns::LABEL, self.label.as_ref())
            .tagged(
                vocab::DESCRIPTION,
                columns::DESCRIPTION,
                self.description.as_ref(),
            )
            .series(
                vocab::REQUIRES_CAPABILITY,
                columns::CAPABILITY,
                identities(&self.capabilities),
            )
            .series(
                vocab::OUTPUTS_PRODUCT,
                columns::PRODUCT,
                identities(&self.outputs),
            ))
    }
}

impl GraphEntity for Process {
    const KIND: &'static str = "process";
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
    }

    fn apply_relations(this: &Shared<Self>, row: &Row, resolver: &mut Resolver<'_>) -> Result<()> {
        if let Some(target) = row.reference(columns::CAPABILITY) {
            if let Some(capability) = resolver.resolve::<Capability>(target)? {
                this.borrow_mut().capabilities.push(capability);
            }
        }
        if let Some(target) = row.reference(columns::PRODUCT) {
            if let Some(product) = resolver.resolve::<Product>(target)? {
                this.borrow_mut().outputs.push(product);
            }
        }
        Ok(())
    }
}
