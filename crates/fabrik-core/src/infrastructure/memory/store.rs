//! In-process triple store and its flat row projections

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::domain::graph::{IdentityLookup, Iri, LangText, Row, VecRowSource};
use crate::domain::manufacturing::vocab::{self, classes};
use crate::domain::manufacturing::{capability, enterprise, factory, passport, process, product};
use crate::domain::statement::{Bindings, BoundValue, StatementExecutor, Term, WriteTemplate};
use crate::error::{Error, Result};

/// Object position of a stored triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Iri(Iri),
    Literal(LangText),
}

/// The triple set
#[derive(Debug, Default)]
pub struct MemoryGraph {
    triples: Vec<(Iri, String, Node)>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_reference(&mut self, subject: &Iri, predicate: &str, object: &Iri) {
        self.triples
            .push((subject.clone(), predicate.to_owned(), Node::Iri(object.clone())));
    }

    pub fn insert_literal(
        &mut self,
        subject: &Iri,
        predicate: &str,
        text: &str,
        lang: Option<&str>,
    ) {
        let literal = match lang {
            Some(lang) => LangText::tagged(text, lang),
            None => LangText::untagged(text),
        };
        self.triples
            .push((subject.clone(), predicate.to_owned(), Node::Literal(literal)));
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Whether `identity` occurs anywhere in the graph
    pub fn contains(&self, identity: &Iri) -> bool {
        self.triples.iter().any(|(s, _, o)| {
            s == identity || matches!(o, Node::Iri(iri) if iri == identity)
        })
    }

    fn objects<'a, 'b>(
        &'a self,
        subject: &'b Iri,
        predicate: &'b str,
    ) -> impl Iterator<Item = &'a Node> + use<'a, 'b> {
        self.triples
            .iter()
            .filter(move |(s, p, _)| s == subject && p.as_str() == predicate)
            .map(|(_, _, o)| o)
    }

    fn literal(&self, subject: &Iri, predicate: &str) -> Option<&LangText> {
        self.objects(subject, predicate).find_map(|o| match o {
            Node::Literal(text) => Some(text),
            Node::Iri(_) => None,
        })
    }

    fn references(&self, subject: &Iri, predicate: &str) -> Vec<Iri> {
        self.objects(subject, predicate)
            .filter_map(|o| match o {
                Node::Iri(iri) => Some(iri.clone()),
                Node::Literal(_) => None,
            })
            .collect()
    }

    fn is_a(&self, subject: &Iri, class: &str) -> bool {
        let class = Iri::new(class);
        self.objects(subject, vocab::TYPE)
            .any(|o| matches!(o, Node::Iri(iri) if *iri == class))
    }

    /// Subjects of `class`, in insertion order, optionally narrowed to one
    fn kind_subjects(&self, class: &str, filter: Option<&Iri>) -> Vec<Iri> {
        match filter {
            Some(subject) if self.is_a(subject, class) => vec![subject.clone()],
            Some(_) => Vec::new(),
            None => {
                let class = Iri::new(class);
                let mut subjects = Vec::new();
                for (s, p, o) in &self.triples {
                    let is_type = p.as_str() == vocab::TYPE
                        && matches!(o, Node::Iri(iri) if *iri == class);
                    if is_type && !subjects.contains(s) {
                        subjects.push(s.clone());
                    }
                }
                subjects
            }
        }
    }

    /// The scalar base row of one subject
    fn scalar_row(&self, subject: &Iri, identity_column: &str, fields: &[(&str, &str)]) -> Row {
        let mut row = Row::new().with_reference(identity_column, subject.clone());
        for (predicate, column) in fields {
            if let Some(literal) = self.literal(subject, predicate) {
                row = match &literal.lang {
                    Some(lang) => row.with_tagged(*column, literal.text.clone(), lang.clone()),
                    None => row.with_text(*column, literal.text.clone()),
                };
            }
        }
        row
    }

    /// One row per relation edge, scalars not repeated beyond the identity
    ///
    /// Union-style projection: each optional relation contributes its own
    /// rows instead of joining into a cross product, so a clean store never
    /// repeats a relation row within one stream.
    fn edge_rows(
        &self,
        subject: &Iri,
        identity_column: &str,
        predicate: &str,
        column: &str,
        rows: &mut Vec<Row>,
    ) {
        for target in self.references(subject, predicate) {
            rows.push(
                Row::new()
                    .with_reference(identity_column, subject.clone())
                    .with_reference(column, target),
            );
        }
    }

    pub fn enterprise_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        let mut rows = Vec::new();
        for s in self.kind_subjects(classes::ENTERPRISE, subject) {
            rows.push(self.scalar_row(
                &s,
                enterprise::columns::IDENTITY,
                &[
                    (vocab::LABEL, enterprise::columns::LABEL),
                    (vocab::DESCRIPTION, enterprise::columns::DESCRIPTION),
                    (vocab::SOURCE_ID, enterprise::columns::SOURCE_ID),
                ],
            ));
            self.edge_rows(
                &s,
                enterprise::columns::IDENTITY,
                vocab::HAS_FACTORY,
                enterprise::columns::FACTORY,
                &mut rows,
            );
            self.edge_rows(
                &s,
                enterprise::columns::IDENTITY,
                vocab::HAS_SUPPLIER,
                enterprise::columns::SUPPLIER,
                &mut rows,
            );
        }
        VecRowSource::new(rows)
    }

    pub fn factory_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        let mut rows = Vec::new();
        for s in self.kind_subjects(classes::FACTORY, subject) {
            rows.push(self.scalar_row(
                &s,
                factory::columns::IDENTITY,
                &[
                    (vocab::LABEL, factory::columns::LABEL),
                    (vocab::DESCRIPTION, factory::columns::DESCRIPTION),
                    (vocab::SOURCE_ID, factory::columns::SOURCE_ID),
                ],
            ));
            self.edge_rows(
                &s,
                factory::columns::IDENTITY,
                vocab::OWNED_BY,
                factory::columns::ENTERPRISE,
                &mut rows,
            );
            self.edge_rows(
                &s,
                factory::columns::IDENTITY,
                vocab::PROVIDES_PROCESS,
                factory::columns::PROCESS,
                &mut rows,
            );
        }
        VecRowSource::new(rows)
    }

    pub fn process_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        let mut rows = Vec::new();
        for s in self.kind_subjects(classes::PROCESS, subject) {
            rows.push(self.scalar_row(
                &s,
                process::columns::IDENTITY,
                &[
                    (vocab::LABEL, process::columns::LABEL),
                    (vocab::DESCRIPTION, process::columns::DESCRIPTION),
                ],
            ));
            self.edge_rows(
                &s,
                process::columns::IDENTITY,
                vocab::REQUIRES_CAPABILITY,
                process::columns::CAPABILITY,
                &mut rows,
            );
            self.edge_rows(
                &s,
                process::columns::IDENTITY,
                vocab::OUTPUTS_PRODUCT,
                process::columns::PRODUCT,
                &mut rows,
            );
        }
        VecRowSource::new(rows)
    }

    pub fn capability_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        let mut rows = Vec::new();
        for s in self.kind_subjects(classes::CAPABILITY, subject) {
            rows.push(self.scalar_row(
                &s,
                capability::columns::IDENTITY,
                &[
                    (vocab::LABEL, capability::columns::LABEL),
                    (vocab::DESCRIPTION, capability::columns::DESCRIPTION),
                ],
            ));
            self.edge_rows(
                &s,
                capability::columns::IDENTITY,
                vocab::HAS_CHILD_CAPABILITY,
                capability::columns::CHILD,
                &mut rows,
            );
            self.edge_rows(
                &s,
                capability::columns::IDENTITY,
                vocab::GENERALIZED_BY,
                capability::columns::PARENT,
                &mut rows,
            );
        }
        VecRowSource::new(rows)
    }

    pub fn product_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        let mut rows = Vec::new();
        for s in self.kind_subjects(classes::PRODUCT, subject) {
            rows.push(self.scalar_row(
                &s,
                product::columns::IDENTITY,
                &[
                    (vocab::LABEL, product::columns::LABEL),
                    (vocab::DESCRIPTION, product::columns::DESCRIPTION),
                    (vocab::SOURCE_ID, product::columns::SOURCE_ID),
                ],
            ));
            self.edge_rows(
                &s,
                product::columns::IDENTITY,
                vocab::HAS_PASSPORT,
                product::columns::PASSPORT,
                &mut rows,
            );
        }
        VecRowSource::new(rows)
    }

    pub fn passport_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        let mut rows = Vec::new();
        for s in self.kind_subjects(classes::PRODUCT_PASSPORT, subject) {
            rows.push(Row::new().with_reference(passport::passport_columns::IDENTITY, s.clone()));
            self.edge_rows(
                &s,
                passport::passport_columns::IDENTITY,
                vocab::HAS_PROPERTY,
                passport::passport_columns::PROPERTY,
                &mut rows,
            );
        }
        VecRowSource::new(rows)
    }

    pub fn property_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        let mut rows = Vec::new();
        for s in self.kind_subjects(classes::PASSPORT_PROPERTY, subject) {
            let mut row = self.scalar_row(
                &s,
                passport::property_columns::IDENTITY,
                &[
                    (vocab::LABEL, passport::property_columns::LABEL),
                    (vocab::DESCRIPTION, passport::property_columns::DESCRIPTION),
                    (vocab::VALUE, passport::property_columns::VALUE),
                    (vocab::UNIT, passport::property_columns::UNIT),
                ],
            );
            if let Some(reference) = self.references(&s, vocab::SEMANTIC_REFERENCE).first() {
                row = row.with_reference(
                    passport::property_columns::SEMANTIC_REFERENCE,
                    reference.clone(),
                );
            }
            rows.push(row);
        }
        VecRowSource::new(rows)
    }
}

/// Shared handle over one [`MemoryGraph`]
///
/// Cloning shares the same triple set. Implements the write-side
/// collaborators directly; the read-side fetchers live in
/// [`super::fetchers`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    graph: Rc<RefCell<MemoryGraph>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_reference(&self, subject: &Iri, predicate: &str, object: &Iri) {
        self.graph.borrow_mut().insert_reference(subject, predicate, object);
    }

    pub fn insert_literal(&self, subject: &Iri, predicate: &str, text: &str, lang: Option<&str>) {
        self.graph
            .borrow_mut()
            .insert_literal(subject, predicate, text, lang);
    }

    pub fn contains(&self, identity: &Iri) -> bool {
        self.graph.borrow().contains(identity)
    }

    pub fn triple_count(&self) -> usize {
        self.graph.borrow().len()
    }

    pub fn enterprise_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        self.graph.borrow().enterprise_rows(subject)
    }

    pub fn factory_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        self.graph.borrow().factory_rows(subject)
    }

    pub fn process_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        self.graph.borrow().process_rows(subject)
    }

    pub fn capability_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        self.graph.borrow().capability_rows(subject)
    }

    pub fn product_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        self.graph.borrow().product_rows(subject)
    }

    pub fn passport_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        self.graph.borrow().passport_rows(subject)
    }

    pub fn property_rows(&self, subject: Option<&Iri>) -> VecRowSource {
        self.graph.borrow().property_rows(subject)
    }
}

impl StatementExecutor for MemoryStore {
    /// Apply a built statement to the triple set
    ///
    /// Optional triples with omitted or absent bindings are dropped, as the
    /// statement shape promises; a required triple without a binding is an
    /// execution failure.
    fn execute(&mut self, template: &WriteTemplate, bindings: &Bindings) -> Result<()> {
        let mut graph = self.graph.borrow_mut();
        let mut applied = 0usize;
        for triple in &template.triples {
            let subject = match &triple.subject {
                Term::Iri(iri) => iri,
                Term::Param(name) => {
                    return Err(Error::Execution(format!(
                        "memory store does not support parametrized subjects (?{name})"
                    )));
                }
            };
            match &triple.object {
                Term::Iri(iri) => {
                    graph.insert_reference(subject, &triple.predicate, iri);
                    applied += 1;
                }
                Term::Param(name) => match bindings.get(name) {
                    Some(BoundValue::Iri(iri)) => {
                        graph.insert_reference(subject, &triple.predicate, iri);
                        applied += 1;
                    }
                    Some(BoundValue::Literal(text)) => {
                        graph.insert_literal(subject, &triple.predicate, text, None);
                        applied += 1;
                    }
                    Some(BoundValue::Tagged { text, lang }) => {
                        graph.insert_literal(subject, &triple.predicate, text, Some(lang));
                        applied += 1;
                    }
                    Some(BoundValue::Absent) | None if triple.optional => {}
                    Some(BoundValue::Absent) | None => {
                        return Err(Error::Execution(format!(
                            "required parameter '?{name}' is unbound"
                        )));
                    }
                },
            }
        }
        debug!(applied, "write statement applied to memory store");
        Ok(())
    }
}

impl IdentityLookup for MemoryStore {
    fn exists(&self, identity: &Iri) -> Result<bool> {
        Ok(self.contains(identity))
    }
}
