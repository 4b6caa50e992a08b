//! Parametrized write templates and the shared relation-naming recipe

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::graph::Iri;

/// Subject or object position in a triple pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// A concrete identity
    Iri(Iri),
    /// A named parameter filled in at execution time
    Param(String),
}

/// One triple of a write statement
///
/// `optional` marks triples the statement must tolerate being unbound:
/// partially populated scalar fields and zero-arity relation slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
    pub optional: bool,
}

/// A parametrized write statement with fixed shape but variable arity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteTemplate {
    pub triples: Vec<TriplePattern>,
}

impl WriteTemplate {
    pub fn push(&mut self, triple: TriplePattern) {
        self.triples.push(triple);
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Parameter names in template order
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.triples.iter().filter_map(|t| match &t.object {
            Term::Param(name) => Some(name.as_str()),
            Term::Iri(_) => None,
        })
    }
}

impl fmt::Display for WriteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in &self.triples {
            let subject = match &triple.subject {
                Term::Iri(iri) => format!("<{iri}>"),
                Term::Param(name) => format!("?{name}"),
            };
            let object = match &triple.object {
                Term::Iri(iri) => format!("<{iri}>"),
                Term::Param(name) => format!("?{name}"),
            };
            if triple.optional {
                writeln!(f, "OPTIONAL {{ {subject} {} {object} }}", triple.predicate)?;
            } else {
                writeln!(f, "{subject} {} {object}", triple.predicate)?;
            }
        }
        Ok(())
    }
}

/// Naming recipe for one repeated relation of write-time arity `len`
///
/// The first element gets the fixed base name, every further element `i` the
/// base name suffixed with `i`. Zero arity still yields the fixed name once,
/// to be bound to an absent value: a degenerate but syntactically valid
/// statement, not an error. Template builder and binding populator both
/// iterate this same recipe, which is what keeps their numbering aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSeries {
    predicate: String,
    base_param: String,
    len: usize,
}

impl RelationSeries {
    pub fn new(predicate: impl Into<String>, base_param: impl Into<String>, len: usize) -> Self {
        Self {
            predicate: predicate.into(),
            base_param: base_param.into(),
            len,
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Number of collection elements behind this series
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of emitted parameter slots (at least one)
    pub fn slot_count(&self) -> usize {
        self.len.max(1)
    }

    /// Parameter names in slot order
    pub fn params(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.slot_count()).map(move |i| {
            if i == 0 {
                self.base_param.clone()
            } else {
                format!("{}{}", self.base_param, i)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_names_fixed_then_indexed() {
        let series = RelationSeries::new("mfg:hasFactory", "factory", 3);
        let names: Vec<String> = series.params().collect();
        assert_eq!(names, vec!["factory", "factory1", "factory2"]);
    }

    #[test]
    fn test_zero_arity_still_yields_the_fixed_name() {
        let series = RelationSeries::new("mfg:hasFactory", "factory", 0);
        let names: Vec<String> = series.params().collect();
        assert_eq!(names, vec!["factory"]);
        assert_eq!(series.slot_count(), 1);
        assert!(series.is_empty());
    }

    #[test]
    fn test_template_param_listing() {
        let mut template = WriteTemplate::default();
        template.push(TriplePattern {
            subject: Term::Iri(Iri::new("urn:e1")),
            predicate: "rdf:type".into(),
            object: Term::Iri(Iri::new("mfg:Enterprise")),
            optional: false,
        });
        template.push(TriplePattern {
            subject: Term::Iri(Iri::new("urn:e1")),
            predicate: "rdfs:label".into(),
            object: Term::Param("label".into()),
            optional: true,
        });

        assert_eq!(template.params().collect::<Vec<_>>(), vec!["label"]);
        let rendered = template.to_string();
        assert!(rendered.contains("OPTIONAL { <urn:e1> rdfs:label ?label }"));
    }
}
