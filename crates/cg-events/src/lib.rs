//! Event log for the Cigilante watch ledger.
//!
//! Every successful submit and claim leaves a [`LedgerEvent`] in a bounded,
//! insertion-ordered [`EventLog`]. The log keeps the most recent entries
//! (evicting oldest first) and fans each entry out to live subscribers.

pub mod event;
pub mod log;

pub use event::{EventKind, EventPayload, LedgerEvent};
pub use log::{EventLog, EventLogConfig, EventStream};
