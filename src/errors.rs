use crate::model::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by normalization, session loading, and comparison.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{file}: not valid JSON: {source}")]
    JsonSyntax {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file}: does not match the expected {role} export format: {reason}")]
    ShapeMismatch {
        file: String,
        role: Role,
        reason: String,
    },

    #[error("cannot read {role} file '{}': {source}", path.display())]
    MissingFile {
        role: Role,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Precondition { message: String },
}

impl AuditError {
    pub fn json_syntax(file: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonSyntax {
            file: file.into(),
            source,
        }
    }

    pub fn shape_mismatch(file: impl Into<String>, role: Role, reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            file: file.into(),
            role,
            reason: reason.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the CLI error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::JsonSyntax { .. } => "JSON_SYNTAX",
            AuditError::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            AuditError::MissingFile { .. } => "MISSING_FILE",
            AuditError::Precondition { .. } => "PRECONDITION",
        }
    }
}
