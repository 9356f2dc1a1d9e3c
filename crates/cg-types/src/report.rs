use serde::Serialize;

use crate::id::ReportId;

/// Point-in-time view of a watch report.
///
/// `claimed` and `claimed_by` always agree: a report is claimed exactly when
/// a claimer is present. The constructor is the only way to build one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    id: ReportId,
    body: String,
    bounty_wei: u64,
    #[serde(rename = "from")]
    submitter: String,
    claimed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    claimed_by: Option<String>,
}

impl Report {
    pub fn new(
        id: ReportId,
        body: impl Into<String>,
        bounty_wei: u64,
        submitter: impl Into<String>,
        claimed_by: Option<String>,
    ) -> Self {
        Self {
            id,
            body: body.into(),
            bounty_wei,
            submitter: submitter.into(),
            claimed: claimed_by.is_some(),
            claimed_by,
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn bounty_wei(&self) -> u64 {
        self.bounty_wei
    }

    pub fn submitter(&self) -> &str {
        &self.submitter
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    pub fn claimed_by(&self) -> Option<&str> {
        self.claimed_by.as_deref()
    }
}

/// Snapshot of the ledger's aggregate counters.
///
/// `total_bounty_wei` is the cumulative bounty offered at submission time;
/// claims never decrement it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub report_count: u64,
    pub total_bounty_wei: u64,
    pub claimed_count: u64,
}
