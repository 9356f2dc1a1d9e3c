use cg_types::{LedgerStats, Report, ReportId};

use crate::error::LedgerError;
use crate::records::NewReport;

/// Write boundary for ledger mutations.
pub trait LedgerWriter: Send + Sync {
    /// Append a report and return its newly issued id.
    fn append(&self, report: NewReport) -> Result<ReportId, LedgerError>;

    /// Claim a report's bounty. Exactly one caller wins per report.
    fn claim(&self, id: &ReportId, claimer: &str) -> Result<Report, LedgerError>;
}

/// Read boundary for ledger queries.
pub trait LedgerReader: Send + Sync {
    fn get(&self, id: &ReportId) -> Result<Option<Report>, LedgerError>;

    /// Reports in insertion order, windowed to `[offset, offset + limit)`.
    fn list(&self, offset: usize, limit: usize) -> Result<Vec<Report>, LedgerError>;

    /// Like [`list`](Self::list), over unclaimed reports only.
    fn list_unclaimed(&self, offset: usize, limit: usize) -> Result<Vec<Report>, LedgerError>;

    fn report_count(&self) -> Result<usize, LedgerError>;

    fn stats(&self) -> Result<LedgerStats, LedgerError>;
}
