//! Parameter bindings for a write template

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::graph::Iri;

use super::plan::{Slot, WritePlan};

/// A concrete value for one statement parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundValue {
    /// An entity reference
    Iri(Iri),
    /// An untagged literal
    Literal(String),
    /// A language-tagged literal
    Tagged { text: String, lang: String },
    /// Explicitly absent, for the zero-arity fixed parameter
    Absent,
}

impl BoundValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, BoundValue::Absent)
    }
}

/// Ordered parameter-name → value mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    values: Vec<(String, BoundValue)>,
}

impl Bindings {
    pub fn insert(&mut self, name: impl Into<String>, value: BoundValue) {
        self.values.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Produce the bindings for `plan`, in the template builder's order
///
/// Language-taggable text is only bound when both the text and its tag are
/// present; otherwise the whole field is omitted, never defaulted or
/// errored. Absent plain text and absent single-valued relations are
/// likewise omitted. A zero-arity repeated relation binds its fixed
/// parameter to an explicit absent value.
pub fn populate_bindings(plan: &WritePlan) -> Bindings {
    let mut bindings = Bindings::default();
    append_bindings(plan, &mut bindings);
    bindings
}

fn append_bindings(plan: &WritePlan, bindings: &mut Bindings) {
    for slot in &plan.slots {
        match slot {
            Slot::Type { .. } => {}
            Slot::Tagged { param, value, .. } => match value.as_ref().and_then(|v| v.tag_pair()) {
                Some((text, lang)) => bindings.insert(
                    param.clone(),
                    BoundValue::Tagged {
                        text: text.to_owned(),
                        lang: lang.to_owned(),
                    },
                ),
                None => trace!(param = %param, "untagged or absent text field omitted from bindings"),
            },
            Slot::Text { param, value, .. } => {
                if let Some(text) = value {
                    bindings.insert(param.clone(), BoundValue::Literal(text.clone()));
                }
            }
            Slot::Reference { param, value, .. } => {
                if let Some(target) = value {
                    bindings.insert(param.clone(), BoundValue::Iri(target.clone()));
                }
            }
            Slot::Series { series, values } => {
                if series.is_empty() {
                    // Degenerate case: the fixed-name triple stays in the
                    // statement, bound to nothing.
                    for name in series.params() {
                        bindings.insert(name, BoundValue::Absent);
                    }
                } else {
                    for (name, value) in series.params().zip(values) {
                        bindings.insert(name, BoundValue::Iri(value.clone()));
                    }
                }
            }
            Slot::Nested {
                param,
                plan: nested,
                ..
            } => {
                bindings.insert(param.clone(), BoundValue::Iri(nested.subject.clone()));
                append_bindings(nested, bindings);
            }
            Slot::NestedSeries { series, plans } => {
                if series.is_empty() {
                    for name in series.params() {
                        bindings.insert(name, BoundValue::Absent);
                    }
                } else {
                    for (name, nested) in series.params().zip(plans) {
                        bindings.insert(name, BoundValue::Iri(nested.subject.clone()));
                        append_bindings(nested, bindings);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::LangText;

    #[test]
    fn test_untagged_label_is_dropped_entirely() {
        let plan = WritePlan::for_subject(&Iri::new("urn:p1")).tagged(
            "rdfs:label",
            "label",
            Some(&LangText::untagged("Press")),
        );
        let bindings = populate_bindings(&plan);
        assert!(bindings.is_empty());
        assert!(bindings.get("label").is_none());
    }

    #[test]
    fn test_tagged_label_binds_text_and_tag_together() {
        let plan = WritePlan::for_subject(&Iri::new("urn:p1")).tagged(
            "rdfs:label",
            "label",
            Some(&LangText::tagged("Press", "en")),
        );
        let bindings = populate_bindings(&plan);
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.get("label"),
            Some(&BoundValue::Tagged {
                text: "Press".into(),
                lang: "en".into(),
            })
        );
    }

    #[test]
    fn test_series_bindings_line_up_with_template_numbering() {
        let plan = WritePlan::for_subject(&Iri::new("urn:c1"))
            .series(
                "mfg:hasChildCapability",
                "child",
                vec![Iri::new("urn:c2"), Iri::new("urn:c3")],
            )
            .series("mfg:generalizedBy", "parent", vec![]);

        let bindings = populate_bindings(&plan);
        assert_eq!(bindings.get("child"), Some(&BoundValue::Iri(Iri::new("urn:c2"))));
        assert_eq!(bindings.get("child1"), Some(&BoundValue::Iri(Iri::new("urn:c3"))));
        assert_eq!(bindings.get("parent"), Some(&BoundValue::Absent));
        assert_eq!(bindings.len(), 3);
    }
}
