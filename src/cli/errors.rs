use crate::errors::AuditError;
use serde::Serialize;

/// Single-line JSON error envelope written to stderr on failure.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
}

pub fn envelope_for(error: &anyhow::Error) -> ErrorEnvelope {
    let code = error
        .downcast_ref::<AuditError>()
        .map(AuditError::code)
        .unwrap_or("COMMAND_FAILED");

    ErrorEnvelope {
        code,
        message: format!("{error:#}"),
    }
}
