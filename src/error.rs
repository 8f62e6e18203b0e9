//! Error taxonomy for the command-dispatch layer.

use thiserror::Error;

use crate::engine::CollaboratorError;

/// Errors surfaced by dispatch and the command handlers.
///
/// The `Display` form of every variant is safe to return to the caller:
/// collaborator causes are attached as `source` and stay in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The engine rejected the caller's credentials.
    #[error("account ({account}) unauthorized")]
    Unauthorized { account: String },

    /// Missing or undecodable request input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No registered route matches the request.
    #[error("no route matches {method} {path}")]
    NotFound { method: String, path: String },

    /// A delegated collaborator call failed.
    #[error("{operation} failed")]
    OperationFailed {
        operation: &'static str,
        #[source]
        source: CollaboratorError,
    },
}

impl ApiError {
    /// HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized { .. } => 401,
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound { .. } => 404,
            ApiError::OperationFailed { .. } => 500,
        }
    }
}
