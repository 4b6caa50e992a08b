//! Enterprise entity

use crate::domain::graph::{GraphEntity, Iri, LangText, Resolver, Row, Shared};
use crate::domain::statement::WritePlan;
use crate::error::Result;

use super::factory::Factory;
use super::{identities, vocab};

/// Column names of the enterprise row projection
pub mod columns {
    pub const IDENTITY: &str = "enterprise";
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const SOURCE_ID: &str = "sourceId";
    pub const FACTORY: &str = "factory";
    pub const SUPPLIER: &str = "supplier";
}

/// A manufacturing enterprise
///
/// Owns factories (which point back at the enterprise) and names other
/// enterprises as suppliers; supplier chains may be cyclic.
#[derive(Debug)]
pub struct Enterprise {
    pub identity: Iri,
    pub label: Option<LangText>,
    pub description: Option<LangText>,
    pub source_id: Option<String>,
    pub factories: Vec<Shared<Factory>>,
    pub suppliers: Vec<Shared<Enterprise>>,
}

impl Enterprise {
    pub fn new(identity: Iri) -> Self {
        Self {
            identity,
            label: None,
            description: None,
            source_id: None,
            factories: Vec::new(),
            suppliers: Vec::new(),
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

    /// The write recipe for this enterprise snapshot
    pub fn write_plan(&self) -> Result<WritePlan> {
        Ok(WritePlan::for_subject(&self.identity)
            .typed(vocab::TYPE, vocab::classes::ENTERPRISE)
            .tagged(vocab::LABEL, columns::LABEL, self.label.as_ref())
            .tagged(
                vocab::DESCRIPTION,
                columns::DESCRIPTION,
                self.description.as_ref(),
            )
            .text(vocab::SOURCE_ID, columns::SOURCE_ID, self.source_id.as_deref())
            .series(
                vocab::HAS_FACTORY,
                columns::FACTORY,
                identities(&self.factories),
            )
            .series(
                vocab::HAS_SUPPLIER,
                columns::SUPPLIER,
                identities(&self.suppliers),
            ))
    }
}

impl GraphEntity for Enterprise {
    const KIND: &'static str = "enterprise";
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
        if let Some(target) = row.reference(columns::FACTORY) {
            if let Some(factory) = resolver.resolve::<Factory>(target)? {
                this.borrow_mut().factories.push(factory);
            }
        }
        if let Some(target) = row.reference(columns::SUPPLIER) {
            if let Some(supplier) = resolver.resolve::<Enterprise>(target)? {
                this.borrow_mut().suppliers.push(supplier);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::shared;
    use crate::domain::statement::{BoundValue, populate_bindings};

    #[test]
    fn test_write_plan_covers_both_relation_series() {
        let enterprise = Enterprise::new(Iri::new("urn:e1"))
            .with_label("Acme", "en")
            .with_source_id("ERP-17");
        let mut enterprise = enterprise;
        enterprise
            .factories
            .push(shared(Factory::new(Iri::new("urn:f1"))));
        enterprise
            .suppliers
            .push(shared(Enterprise::new(Iri::new("urn:e2"))));

        let plan = enterprise.write_plan().unwrap();
        let bindings = populate_bindings(&plan);

        assert_eq!(
            bindings.get("factory"),
            Some(&BoundValue::Iri(Iri::new("urn:f1")))
        );
        assert_eq!(
            bindings.get("supplier"),
            Some(&BoundValue::Iri(Iri::new("urn:e2")))
        );
        assert_eq!(bindings.get("sourceId"), Some(&BoundValue::Literal("ERP-17".into())));
    }
}
