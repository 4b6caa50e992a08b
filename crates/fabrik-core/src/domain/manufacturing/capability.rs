//! Capability entity

use crate::domain::graph::{GraphEntity, Iri, LangText, Resolver, Row, Shared};
use crate::domain::statement::WritePlan;
use crate::error::Result;

use super::{identities, vocab};

/// Column names of the capability row projection
pub mod columns {
    pub const IDENTITY: &str = "capability";
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const CHILD: &str = "child";
    pub const PARENT: &str = "parent";
}

/// A manufacturing capability in a specialization hierarchy
///
/// Child and parent lists are independent repeated relations; each gets its
/// own fixed + indexed parameter sequence on the write side. The hierarchy
/// is bidirectional and may be cyclic through shared generalizations.
#[derive(Debug)]
pub struct Capability {
    pub identity: Iri,
    pub label: Option<LangText>,
    pub description: Option<LangText>,
    /// Capabilities this one specializes into
    pub children: Vec<Shared<Capability>>,
    /// Capabilities this one is generalized by
    pub parents: Vec<Shared<Capability>>,
}

impl Capability {
    pub fn new(identity: Iri) -> Self {
        Self {
            identity,
            label: None,
            description: None,
            children: Vec::new(),
            parents: Vec::new(),
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

    /// The write recipe for this capability snapshot
    pub fn write_plan(&self) -> Result<WritePlan> {
        Ok(WritePlan::for_subject(&self.identity)
            .typed(vocab::TYPE, vocab::classes::CAPABILITY)
            .tagged(vocab::LABEL, columns::LABEL, self.label.as_ref())
            .tagged(
                vocab::DESCRIPTION,
                columns::DESCRIPTION,
                self.description.as_ref(),
            )
            .series(
                vocab::HAS_CHILD_CAPABILITY,
                columns::CHILD,
                identities(&self.children),
            )
            .series(
                vocab::GENERALIZED_BY,
                columns::PARENT,
                identities(&self.parents),
            ))
    }
}

impl GraphEntity for Capability {
    const KIND: &'static str = "capability";
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
        if let Some(target) = row.reference(columns::CHILD) {
            if let Some(child) = resolver.resolve::<Capability>(target)? {
                this.borrow_mut().children.push(child);
            }
        }
        if let Some(target) = row.reference(columns::PARENT) {
            if let Some(parent) = resolver.resolve::<Capability>(target)? {
                this.borrow_mut().parents.push(parent);
            }
        }
        Ok(())
    }
}
