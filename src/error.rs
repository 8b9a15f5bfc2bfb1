use axum::http::StatusCode;
use thiserror::Error;

use crate::flow::Stage;

/// Failures that are reported back to the visitor. Storage problems never
/// show up here; the store swallows them and hands back empty state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid job import: {0}")]
    ImportFormat(String),

    #[error("{action} is not available from the {stage} stage")]
    WrongStage {
        action: &'static str,
        stage: Stage,
    },

    #[error("no account registered for {0}")]
    UnknownAccount(String),
}

impl BoardError {
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        BoardError::Validation { field, reason }
    }

    pub fn status(&self) -> StatusCode {
        use BoardError::*;
        match self {
            Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ImportFormat(_) => StatusCode::BAD_REQUEST,
            WrongStage { .. } => StatusCode::FORBIDDEN,
            UnknownAccount(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            BoardError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
