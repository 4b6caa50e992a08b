//! Flat query rows and the row source collaborator
//!
//! A [`Row`] is one flat tuple from the store: a mapping from a fixed,
//! per-kind column-name set to optional typed values. Optional columns are
//! simply absent from the mapping when no matching relation or scalar exists
//! in that row.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::identity::Iri;
use super::value::LangText;
use crate::error::{Error, Result};

/// One typed column value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A literal, optionally language-tagged
    Literal(LangText),
    /// A reference to another entity
    Reference(Iri),
}

/// One flat tuple from the row source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    columns: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an untagged literal column
    pub fn with_text(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.columns
            .insert(column.into(), Value::Literal(LangText::untagged(text)));
        self
    }

    /// Add a language-tagged literal column
    pub fn with_tagged(
        mut self,
        column: impl Into<String>,
        text: impl Into<String>,
        lang: impl Into<String>,
    ) -> Self {
        self.columns
            .insert(column.into(), Value::Literal(LangText::tagged(text, lang)));
        self
    }

    /// Add an entity-reference column
    pub fn with_reference(mut self, column: impl Into<String>, target: impl Into<Iri>) -> Self {
        self.columns
            .insert(column.into(), Value::Reference(target.into()));
        self
    }

    /// The literal in `column`, if present
    pub fn literal(&self, column: &str) -> Option<&LangText> {
        match self.columns.get(column) {
            Some(Value::Literal(text)) => Some(text),
            _ => None,
        }
    }

    /// The literal text in `column`, if present, ignoring any language tag
    pub fn text(&self, column: &str) -> Option<&str> {
        self.literal(column).map(|t| t.text.as_str())
    }

    /// The entity reference in `column`, if present
    pub fn reference(&self, column: &str) -> Option<&Iri> {
        match self.columns.get(column) {
            Some(Value::Reference(iri)) => Some(iri),
            _ => None,
        }
    }

    /// The mandatory identity column for `kind`
    ///
    /// A row without its identity is unprocessable; the whole read operation
    /// aborts.
    pub fn identity(&self, column: &'static str, kind: &'static str) -> Result<Iri> {
        self.reference(column)
            .cloned()
            .ok_or(Error::MissingIdentity { kind, column })
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Collaborator producing the flat row stream for one entity kind
pub trait RowSource {
    /// The next row, or `None` when the stream is exhausted
    fn next_row(&mut self) -> Result<Option<Row>>;
}

/// Row source over an in-memory list of rows
#[derive(Debug, Default)]
pub struct VecRowSource {
    rows: VecDeque<Row>,
}

impl VecRowSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }
}

impl From<Vec<Row>> for VecRowSource {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl RowSource for VecRowSource {
    fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}
