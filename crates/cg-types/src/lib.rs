//! Foundation types for the Cigilante watch ledger.
//!
//! This crate provides the identity, record, and failure types shared by
//! every other Cigilante crate.
//!
//! # Key Types
//!
//! - [`ReportId`] — Ledger-issued report identifier (sequence + coarse clock)
//! - [`Report`] — Point-in-time view of a watch report and its claim state
//! - [`LedgerStats`] — Aggregate counters snapshot
//! - [`FailureKind`] — Closed set of business-rule failures with wire codes

pub mod error;
pub mod id;
pub mod limits;
pub mod report;

pub use error::{FailureKind, TypeError};
pub use id::ReportId;
pub use limits::{
    ANONYMOUS_ADDRESS, BATCH_QUERY_LIMIT, EVENT_LOG_CAPACITY, MAX_BOUNTY_WEI, MAX_REPORTS,
    MAX_REPORT_BODY_LEN, WATCH_CHAIN_REF,
};
pub use report::{LedgerStats, Report};
