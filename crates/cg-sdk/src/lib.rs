//! High-level API for the Cigilante watch ledger.
//!
//! [`WatchNet`] is the single entry point callers (HTTP handlers, the CLI)
//! use: it validates input through `cg-gate`, mutates the `cg-ledger`
//! store, and exposes the event history from `cg-events`.

pub mod config;
pub mod error;
pub mod watchnet;

pub use config::WatchConfig;
pub use error::{SdkError, SdkResult};
pub use watchnet::WatchNet;

// Re-export key types
pub use cg_events::{EventKind, EventLogConfig, EventPayload, EventStream, LedgerEvent};
pub use cg_gate::LimitsConfig;
pub use cg_types::{FailureKind, LedgerStats, Report, ReportId};
