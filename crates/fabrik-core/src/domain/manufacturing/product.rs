//! Product entity

use crate::domain::graph::{GraphEntity, Iri, LangText, Resolver, Row, Shared};
use crate::domain::statement::WritePlan;
use crate::error::Result;

use super::passport::ProductPassport;
use super::vocab;

/// Column names of the product row projection
pub mod columns {
    pub const IDENTITY: &str = "product";
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const SOURCE_ID: &str = "sourceId";
    pub const PASSPORT: &str = "passport";
}

/// A manufactured product, optionally carrying a product passport
#[derive(Debug)]
pub struct Product {
    pub identity: Iri,
    pub label: Option<LangText>,
    pub description: Option<LangText>,
    pub source_id: Option<String>,
    /// Owned sub-entity, written within the product's own statement
    pub passport: Option<Shared<ProductPassport>>,
}

impl Product {
    pub fn new(identity: Iri) -> Self {
        Self {
            identity,
            label: None,
            description: None,
            source_id: None,
            passport: None,
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

    pub fn with_passport(mut self, passport: Shared<ProductPassport>) -> Self {
        self.passport = Some(passport);
        self
    }

    /// The write recipe for this product snapshot
    ///
    /// The passport and its properties are validated and planned recursively;
    /// a property lacking its required fields aborts the whole write.
    pub fn write_plan(&self) -> Result<WritePlan> {
        let mut plan = WritePlan::for_subject(&self.identity)
            .typed(vocab::TYPE, vocab::classes::PRODUCT)
            .tagged(vocab::LABEL, columns::LABEL, self.label.as_ref())
            .tagged(
                vocab::DESCRIPTION,
                columns::DESCRIPTION,
                self.description.as_ref(),
            )
            .text(vocab::SOURCE_ID, columns::SOURCE_ID, self.source_id.as_deref());
        if let Some(passport) = &self.passport {
            plan = plan.nested(
                vocab::HAS_PASSPORT,
                columns::PASSPORT,
                passport.borrow().write_plan()?,
            );
        }
        Ok(plan)
    }
}

impl GraphEntity for Product {
    const KIND: &'static str = "product";
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
        if let Some(target) = row.reference(columns::PASSPORT) {
            if let Some(passport) = resolver.resolve::<ProductPassport>(target)? {
                this.borrow_mut().passport = Some(passport);
            }
        }
        Ok(())
    }
}
