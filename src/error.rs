//! Error types for query conversion.

use thiserror::Error;

use crate::ast::Engine;

/// The main error type for conversion operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The statement has no single top-level `WHERE` split point.
    #[error("Could not split WHERE clause of '{statement}'")]
    MalformedStatement { statement: String },

    /// A fragment is not a well-formed `column LIKE 'value'`.
    #[error("Malformed LIKE predicate: '{fragment}'")]
    MalformedPredicate { fragment: String },

    /// An AND group (or a combined regex) spans more than one column.
    #[error("Unexpected columns in AND fields: {}", .columns.join(", "))]
    InconsistentColumn { columns: Vec<String> },

    /// The selected style is not implemented for the engine.
    #[error("Style {style} is not implemented for {engine}")]
    UnsupportedStyle { engine: Engine, style: u8 },

    /// The style number is outside the known range.
    #[error("Unknown style {style} for {engine}. Expected 1 to 5")]
    UnknownStyle { engine: Engine, style: u8 },

    /// A statement of a batch failed; carries the offending text.
    #[error("Statement {index} failed: {source} (in '{statement}')")]
    Statement {
        index: usize,
        statement: String,
        #[source]
        source: Box<ConvertError>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn malformed_statement(statement: impl Into<String>) -> Self {
        Self::MalformedStatement {
            statement: statement.into(),
        }
    }

    pub fn malformed_predicate(fragment: impl Into<String>) -> Self {
        Self::MalformedPredicate {
            fragment: fragment.into(),
        }
    }

    /// Attach the originating statement to a failure.
    pub fn in_statement(self, index: usize, statement: impl Into<String>) -> Self {
        Self::Statement {
            index,
            statement: statement.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, skipping statement context.
    pub fn root(&self) -> &ConvertError {
        match self {
            Self::Statement { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
