//! Scalar text values with optional language tags

use serde::{Deserialize, Serialize};

/// A text value that may carry a language tag
///
/// Labels and descriptions come back from the store as literals with or
/// without a tag. On the write side a tagged field is only bound when both
/// halves are present; [`LangText::tag_pair`] is the accessor the binding
/// populator uses for that rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangText {
    /// The text body
    pub text: String,
    /// Language tag, e.g. "en" or "de"
    pub lang: Option<String>,
}

impl LangText {
    /// Text with a language tag
    pub fn tagged(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: Some(lang.into()),
        }
    }

    /// Text without a language tag
    pub fn untagged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
        }
    }

    /// Both halves, when the value is fully tagged
    pub fn tag_pair(&self) -> Option<(&str, &str)> {
        self.lang.as_deref().map(|lang| (self.text.as_str(), lang))
    }
}
