//! The ordered field walk shared by template builder and binding populator
//!
//! A [`WritePlan`] is produced once per entity snapshot and records, in
//! order, every slot the write statement covers. [`build_template`] and
//! [`populate_bindings`](super::bindings::populate_bindings) both consume
//! the same plan, so parameter numbering and binding order can never drift.

use crate::domain::graph::{Iri, LangText};

use super::template::{RelationSeries, Term, TriplePattern, WriteTemplate};

/// One slot in the ordered walk
#[derive(Debug, Clone)]
pub(super) enum Slot {
    /// Fixed class triple, no parameter
    Type { predicate: String, class: Iri },
    /// Language-taggable text; bound only when text and tag are both present
    Tagged {
        predicate: String,
        param: String,
        value: Option<LangText>,
    },
    /// Plain text; bound when present
    Text {
        predicate: String,
        param: String,
        value: Option<String>,
    },
    /// Single-valued relation; bound when present
    Reference {
        predicate: String,
        param: String,
        value: Option<Iri>,
    },
    /// Repeated relation with write-time arity
    Series {
        series: RelationSeries,
        values: Vec<Iri>,
    },
    /// Single owned sub-entity, written recursively
    Nested {
        predicate: String,
        param: String,
        plan: WritePlan,
    },
    /// Repeated owned sub-entities, written recursively
    NestedSeries {
        series: RelationSeries,
        plans: Vec<WritePlan>,
    },
}

/// Ordered write recipe for one entity and its relation collections
#[derive(Debug, Clone)]
pub struct WritePlan {
    pub(super) subject: Iri,
    pub(super) slots: Vec<Slot>,
}

impl WritePlan {
    pub fn for_subject(subject: &Iri) -> Self {
        Self {
            subject: subject.clone(),
            slots: Vec::new(),
        }
    }

    /// The entity this plan writes
    pub fn subject(&self) -> &Iri {
        &self.subject
    }

    /// Declare the entity's class
    pub fn typed(mut self, predicate: impl Into<String>, class: impl Into<Iri>) -> Self {
        self.slots.push(Slot::Type {
            predicate: predicate.into(),
            class: class.into(),
        });
        self
    }

    /// A language-taggable text field
    pub fn tagged(
        mut self,
        predicate: impl Into<String>,
        param: impl Into<String>,
        value: Option<&LangText>,
    ) -> Self {
        self.slots.push(Slot::Tagged {
            predicate: predicate.into(),
            param: param.into(),
            value: value.cloned(),
        });
        self
    }

    /// A plain text field
    pub fn text(
        mut self,
        predicate: impl Into<String>,
        param: impl Into<String>,
        value: Option<&str>,
    ) -> Self {
        self.slots.push(Slot::Text {
            predicate: predicate.into(),
            param: param.into(),
            value: value.map(str::to_owned),
        });
        self
    }

    /// A single-valued relation
    pub fn reference(
        mut self,
        predicate: impl Into<String>,
        param: impl Into<String>,
        value: Option<&Iri>,
    ) -> Self {
        self.slots.push(Slot::Reference {
            predicate: predicate.into(),
            param: param.into(),
            value: value.cloned(),
        });
        self
    }

    /// A repeated relation; the series length is taken from `values`
    pub fn series(
        mut self,
        predicate: impl Into<String>,
        base_param: impl Into<String>,
        values: Vec<Iri>,
    ) -> Self {
        let predicate = predicate.into();
        let base_param = base_param.into();
        let series = RelationSeries::new(predicate, base_param, values.len());
        self.slots.push(Slot::Series { series, values });
        self
    }

    /// A single owned sub-entity written within the same statement
    pub fn nested(
        mut self,
        predicate: impl Into<String>,
        param: impl Into<String>,
        plan: WritePlan,
    ) -> Self {
        self.slots.push(Slot::Nested {
            predicate: predicate.into(),
            param: param.into(),
            plan,
        });
        self
    }

    /// Repeated owned sub-entities; the series length is taken from `plans`
    ///
    /// Callers are expected to have prefixed the nested plans' parameter
    /// names with the series names (see
    /// [`RelationSeries::params`]) so they stay unique within the statement.
    pub fn nested_series(
        mut self,
        predicate: impl Into<String>,
        base_param: impl Into<String>,
        plans: Vec<WritePlan>,
    ) -> Self {
        let series = RelationSeries::new(predicate.into(), base_param.into(), plans.len());
        self.slots.push(Slot::NestedSeries { series, plans });
        self
    }
}

/// Build the parametrized statement for `plan`
///
/// Every repeated relation emits one triple for the first element under its
/// fixed parameter name and one more per further element under the indexed
/// names; zero arity still emits the fixed-name triple, marked optional.
pub fn build_template(plan: &WritePlan) -> WriteTemplate {
    let mut template = WriteTemplate::default();
    append_triples(plan, &mut template);
    template
}

fn append_triples(plan: &WritePlan, template: &mut WriteTemplate) {
    let subject = Term::Iri(plan.subject.clone());
    for slot in &plan.slots {
        match slot {
            Slot::Type { predicate, class } => template.push(TriplePattern {
                subject: subject.clone(),
                predicate: predicate.clone(),
                object: Term::Iri(class.clone()),
                optional: false,
            }),
            Slot::Tagged { predicate, param, .. }
            | Slot::Text { predicate, param, .. }
            | Slot::Reference { predicate, param, .. } => template.push(TriplePattern {
                subject: subject.clone(),
                predicate: predicate.clone(),
                object: Term::Param(param.clone()),
                optional: true,
            }),
            Slot::Series { series, .. } => {
                for name in series.params() {
                    template.push(TriplePattern {
                        subject: subject.clone(),
                        predicate: series.predicate().to_owned(),
                        object: Term::Param(name),
                        optional: series.is_empty(),
                    });
                }
            }
            Slot::Nested {
                predicate,
                param,
                plan: nested,
            } => {
                template.push(TriplePattern {
                    subject: subject.clone(),
                    predicate: predicate.clone(),
                    object: Term::Param(param.clone()),
                    optional: false,
                });
                append_triples(nested, template);
            }
            Slot::NestedSeries { series, plans } => {
                for (i, name) in series.params().enumerate() {
                    template.push(TriplePattern {
                        subject: subject.clone(),
                        predicate: series.predicate().to_owned(),
                        object: Term::Param(name),
                        optional: series.is_empty(),
                    });
                    if let Some(nested) = plans.get(i) {
                        append_triples(nested, template);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_arity_matches_collection_size() {
        let plan = WritePlan::for_subject(&Iri::new("urn:e1"))
            .typed("rdf:type", "mfg:Enterprise")
            .series(
                "mfg:hasFactory",
                "factory",
                vec![Iri::new("urn:f1"), Iri::new("urn:f2")],
            )
            .series("mfg:hasSupplier", "supplier", vec![]);

        let template = build_template(&plan);
        let params: Vec<&str> = template.params().collect();
        assert_eq!(params, vec!["factory", "factory1", "supplier"]);

        // The degenerate zero-arity triple is optional; populated ones are not.
        assert!(!template.triples[1].optional);
        assert!(template.triples[3].optional);
    }

    #[test]
    fn test_nested_plan_triples_follow_their_link() {
        let passport = WritePlan::for_subject(&Iri::new("urn:pp1"))
            .typed("rdf:type", "mfg:ProductPassport");
        let plan = WritePlan::for_subject(&Iri::new("urn:p1"))
            .nested("mfg:hasPassport", "passport", passport);

        let template = build_template(&plan);
        assert_eq!(template.len(), 2);
        assert_eq!(template.triples[0].object, Term::Param("passport".into()));
        assert_eq!(
            template.triples[1].subject,
            Term::Iri(Iri::new("urn:pp1"))
        );
    }
}
