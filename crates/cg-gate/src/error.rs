use cg_types::FailureKind;

/// A precondition that failed before any mutation took place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("report body is {len} characters; the limit is {max}")]
    ReportTooLong { len: usize, max: usize },

    #[error("ledger already holds {count} reports (cap {cap})")]
    ReportCapReached { count: usize, cap: usize },

    #[error("bounty {bounty_wei} outside 0..={max}")]
    BountyOutOfRange { bounty_wei: i64, max: u64 },

    #[error("not a ledger report id: {0:?}")]
    InvalidReportId(String),

    #[error("batch of {requested} exceeds the limit of {max}")]
    BatchTooLarge { requested: usize, max: usize },

    #[error("report id is required")]
    MissingId,
}

impl GateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ReportTooLong { .. } => FailureKind::ReportTooLong,
            Self::ReportCapReached { .. } => FailureKind::ReportCapReached,
            Self::BountyOutOfRange { .. } => FailureKind::BountyOutOfRange,
            Self::InvalidReportId(_) => FailureKind::InvalidReportId,
            Self::BatchTooLarge { .. } => FailureKind::BatchTooLarge,
            Self::MissingId => FailureKind::MissingId,
        }
    }
}
