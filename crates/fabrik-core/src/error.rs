//! Error types for Fabrik

use thiserror::Error;

/// Result type alias using Fabrik's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Fabrik error types
///
/// Only fatal conditions become errors. Absent optional columns, cross
/// references that do not resolve, and untagged text at bind time are all
/// "field not present" and stay `Option`s on the affected structures.
#[derive(Error, Debug)]
pub enum Error {
    // Read-path errors
    #[error("row for kind '{kind}' is missing its identity column '{column}'")]
    MissingIdentity {
        kind: &'static str,
        column: &'static str,
    },

    #[error("no fetcher registered for entity kind '{0}'")]
    FetcherMissing(&'static str),

    #[error("row source failed: {0}")]
    RowSource(String),

    // Write-path errors
    #[error("validation failed for {kind}: {reason}")]
    Validation {
        kind: &'static str,
        reason: String,
    },

    #[error("statement execution failed: {0}")]
    Execution(String),

    #[error("identity minting failed: {0}")]
    Minting(String),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the caller should discard any partially built in-memory graph
    ///
    /// All fatal read/write conditions abort the current operation; nothing
    /// at this layer retries.
    pub fn aborts_operation(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identity_message_names_kind_and_column() {
        let err = Error::MissingIdentity {
            kind: "enterprise",
            column: "enterprise",
        };
        let msg = err.to_string();
        assert!(msg.contains("enterprise"));
        assert!(msg.contains("identity column"));
    }

    #[test]
    fn test_validation_message() {
        let err = Error::Validation {
            kind: "passport property",
            reason: "needs a semantic reference or a label and description".into(),
        };
        assert!(err.to_string().starts_with("validation failed for passport property"));
        assert!(err.aborts_operation());
    }
}
