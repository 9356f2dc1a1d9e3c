use cg_types::{FailureKind, ReportId};

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("report not found: {0}")]
    ReportNotFound(ReportId),

    #[error("report already claimed: {0}")]
    AlreadyClaimed(ReportId),

    #[error("ledger is full ({cap} reports)")]
    CapacityReached { cap: usize },

    #[error("bounty {bounty_wei} would overflow the ledger total {total}")]
    BountyTotalOverflow { total: u64, bounty_wei: u64 },

    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("ledger {0} lock poisoned")]
    Poisoned(&'static str),
}

impl LedgerError {
    /// The caller-facing failure kind, if this is a business-rule rejection.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::ReportNotFound(_) => Some(FailureKind::ReportNotFound),
            Self::AlreadyClaimed(_) => Some(FailureKind::AlreadyClaimed),
            Self::CapacityReached { .. } => Some(FailureKind::ReportCapReached),
            Self::BountyTotalOverflow { .. } => Some(FailureKind::BountyOutOfRange),
            Self::IntegrityViolation(_) | Self::Poisoned(_) => None,
        }
    }
}
