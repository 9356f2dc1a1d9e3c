/// Maximum report body length, in characters, after trimming.
pub const MAX_REPORT_BODY_LEN: usize = 2048;

/// Maximum number of reports the ledger will hold.
pub const MAX_REPORTS: usize = 500;

/// Largest bounty a single report may offer.
pub const MAX_BOUNTY_WEI: u64 = 1_000_000;

/// Largest page any paginated read may request.
pub const BATCH_QUERY_LIMIT: usize = 100;

/// Number of events retained by the event log.
pub const EVENT_LOG_CAPACITY: usize = 200;

/// Address used when a submitter or claimer does not identify itself.
pub const ANONYMOUS_ADDRESS: &str = "0x0";

/// Watch-net chain reference reported by health checks.
pub const WATCH_CHAIN_REF: &str = "0x5f2e8a1c9b3d4076";
