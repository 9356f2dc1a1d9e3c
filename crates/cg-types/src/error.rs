use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid report id: {0}")]
    InvalidReportId(String),
}

/// Closed set of failures a caller of the ledger can observe.
///
/// Every kind is recoverable. The wire code (`CG_<Kind>`) is what HTTP and
/// CLI callers render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    ReportTooLong,
    ReportCapReached,
    BountyOutOfRange,
    InvalidReportId,
    ReportNotFound,
    AlreadyClaimed,
    BatchTooLarge,
    MissingId,
}

impl FailureKind {
    /// All kinds, in declaration order.
    pub const ALL: [FailureKind; 8] = [
        Self::ReportTooLong,
        Self::ReportCapReached,
        Self::BountyOutOfRange,
        Self::InvalidReportId,
        Self::ReportNotFound,
        Self::AlreadyClaimed,
        Self::BatchTooLarge,
        Self::MissingId,
    ];

    /// Stable wire code, e.g. `CG_AlreadyClaimed`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReportTooLong => "CG_ReportTooLong",
            Self::ReportCapReached => "CG_ReportCapReached",
            Self::BountyOutOfRange => "CG_BountyOutOfRange",
            Self::InvalidReportId => "CG_InvalidReportId",
            Self::ReportNotFound => "CG_ReportNotFound",
            Self::AlreadyClaimed => "CG_AlreadyClaimed",
            Self::BatchTooLarge => "CG_BatchTooLarge",
            Self::MissingId => "CG_MissingId",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
