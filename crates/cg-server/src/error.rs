use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use cg_sdk::{FailureKind, SdkError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Sdk(#[from] SdkError),

    /// A request field the ledger API cannot even represent.
    #[error("request rejected: {0}")]
    Rejected(FailureKind),

    #[error("malformed request body: {0}")]
    Malformed(#[from] JsonRejection),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Code for a body that is not the JSON object a route expects.
pub const MALFORMED_CODE: &str = "CG_MalformedRequest";

pub(crate) fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::ReportNotFound => StatusCode::NOT_FOUND,
        FailureKind::AlreadyClaimed => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let Self::Malformed(rejection) = &self {
            tracing::debug!(error = %rejection, "malformed request body");
            let body = Json(json!({ "error": MALFORMED_CODE }));
            return (rejection.status(), body).into_response();
        }

        let kind = match &self {
            Self::Sdk(e) => e.kind(),
            Self::Rejected(kind) => Some(*kind),
            _ => None,
        };
        let (status, code) = match kind {
            Some(kind) => (status_for(kind), kind.code()),
            None => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "CG_Internal")
            }
        };
        (status, Json(json!({ "error": code }))).into_response()
    }
}
