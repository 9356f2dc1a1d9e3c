use serde::{Deserialize, Serialize};

use cg_types::{BATCH_QUERY_LIMIT, MAX_BOUNTY_WEI, MAX_REPORTS, MAX_REPORT_BODY_LEN};

/// Limits enforced before any ledger mutation or paginated read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum body length in characters, measured after trimming.
    pub max_body_len: usize,
    /// Maximum number of reports the ledger accepts.
    pub max_reports: usize,
    /// Largest bounty a report may offer.
    pub max_bounty_wei: u64,
    /// Largest page a paginated read may request.
    pub batch_limit: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_len: MAX_REPORT_BODY_LEN,
            max_reports: MAX_REPORTS,
            max_bounty_wei: MAX_BOUNTY_WEI,
            batch_limit: BATCH_QUERY_LIMIT,
        }
    }
}
