use thiserror::Error;

use cg_types::FailureKind;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("report not found: {0}")]
    ReportNotFound(String),

    #[error(transparent)]
    Gate(#[from] cg_gate::GateError),

    #[error("ledger error: {0}")]
    Ledger(#[from] cg_ledger::LedgerError),
}

impl SdkError {
    /// The caller-facing failure kind, or `None` for internal faults.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::ReportNotFound(_) => Some(FailureKind::ReportNotFound),
            Self::Gate(e) => Some(e.kind()),
            Self::Ledger(e) => e.kind(),
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
