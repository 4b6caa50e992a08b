//! Product passports and their properties

use crate::domain::graph::{GraphEntity, Iri, LangText, Resolver, Row, Shared};
use crate::domain::statement::{RelationSeries, WritePlan};
use crate::error::{Error, Result};

use super::vocab;

/// Column names of the passport row projection
pub mod passport_columns {
    pub const IDENTITY: &str = "passport";
    pub const PROPERTY: &str = "property";
}

/// Column names of the passport property row projection
pub mod property_columns {
    pub const IDENTITY: &str = "property";
    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const SEMANTIC_REFERENCE: &str = "semanticReference";
    pub const VALUE: &str = "value";
    pub const UNIT: &str = "unit";
}

/// A product's digital passport: an ordered collection of properties
#[derive(Debug)]
pub struct ProductPassport {
    pub identity: Iri,
    pub properties: Vec<Shared<PassportProperty>>,
}

impl ProductPassport {
    pub fn new(identity: Iri) -> Self {
        Self {
            identity,
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: Shared<PassportProperty>) -> Self {
        self.properties.push(property);
        self
    }

    /// The write recipe for this passport snapshot
    ///
    /// Each property is planned under the parameter name the property series
    /// assigns it, which also prefixes the property's own field parameters
    /// so they stay unique within the enclosing statement.
    pub fn write_plan(&self) -> Result<WritePlan> {
        let series = RelationSeries::new(
            vocab::HAS_PROPERTY,
            passport_columns::PROPERTY,
            self.properties.len(),
        );
        let mut plans = Vec::with_capacity(self.properties.len());
        for (prefix, property) in series.params().zip(&self.properties) {
            plans.push(property.borrow().write_plan(&prefix)?);
        }
        Ok(WritePlan::for_subject(&self.identity)
            .typed(vocab::TYPE, vocab::classes::PRODUCT_PASSPORT)
            .nested_series(vocab::HAS_PROPERTY, passport_columns::PROPERTY, plans))
    }
}

impl GraphEntity for ProductPassport {
    const KIND: &'static str = "passport";
    const IDENTITY_COLUMN: &'static str = passport_columns::IDENTITY;

    fn stub(identity: Iri) -> Self {
        Self::new(identity)
    }

    fn identity(&self) -> &Iri {
        &self.identity
    }

    fn apply_scalars(&mut self, _row: &Row) {}

    fn apply_relations(this: &Shared<Self>, row: &Row, resolver: &mut Resolver<'_>) -> Result<()> {
        if let Some(target) = row.reference(passport_columns::PROPERTY) {
            if let Some(property) = resolver.resolve::<PassportProperty>(target)? {
                this.borrow_mut().properties.push(property);
            }
        }
        Ok(())
    }
}

/// One passport property
///
/// Identified either by a semantic reference into an external dictionary or
/// by a human-readable label and description. One of the two must be present
/// at write time.
#[derive(Debug)]
pub struct PassportProperty {
    pub identity: Iri,
    pub label: Option<LangText>,
    pub description: Option<LangText>,
    pub semantic_reference: Option<Iri>,
    pub value: Option<String>,
    pub unit: Option<String>,
}

impl PassportProperty {
    pub fn new(identity: Iri) -> Self {
        Self {
            identity,
            label: None,
            description: None,
            semantic_reference: None,
            value: None,
            unit: None,
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

    pub fn with_semantic_reference(mut self, reference: impl Into<Iri>) -> Self {
        self.semantic_reference = Some(reference.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// The write recipe for this property, parameters prefixed by `prefix`
    ///
    /// Fails with a user-facing validation error when the property has
    /// neither a semantic reference nor a label and description.
    pub fn write_plan(&self, prefix: &str) -> Result<WritePlan> {
        let described = self.label.is_some() && self.description.is_some();
        if self.semantic_reference.is_none() && !described {
            return Err(Error::Validation {
                kind: "passport property",
                reason: format!(
                    "'{}' needs a semantic reference or a label and description",
                    self.identity
                ),
            });
        }
        Ok(WritePlan::for_subject(&self.identity)
            .typed(vocab::TYPE, vocab::classes::PASSPORT_PROPERTY)
            .tagged(vocab::LABEL, format!("{prefix}Label"), self.label.as_ref())
            .tagged(
                vocab::DESCRIPTION,
                format!("{prefix}Description"),
                self.description.as_ref(),
            )
            .reference(
                vocab::SEMANTIC_REFERENCE,
                format!("{prefix}SemanticReference"),
                self.semantic_reference.as_ref(),
            )
            .text(vocab::VALUE, format!("{prefix}Value"), self.value.as_deref())
            .text(vocab::UNIT, format!("{prefix}Unit"), self.unit.as_deref()))
    }
}

impl GraphEntity for PassportProperty {
    const KIND: &'static str = "passport property";
    const IDENTITY_COLUMN: &'static str = property_columns::IDENTITY;

    fn stub(identity: Iri) -> Self {
        Self::new(identity)
    }

    fn identity(&self) -> &Iri {
        &self.identity
    }

    fn apply_scalars(&mut self, row: &Row) {
        self.label = row.literal(property_columns::LABEL).cloned();
        self.description = row.literal(property_columns::DESCRIPTION).cloned();
        self.semantic_reference = row.reference(property_columns::SEMANTIC_REFERENCE).cloned();
        self.value = row.text(property_columns::VALUE).map(str::to_owned);
        self.unit = row.text(property_columns::UNIT).map(str::to_owned);
    }
}
