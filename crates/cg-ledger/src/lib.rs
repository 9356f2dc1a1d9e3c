//! Report ledger for the Cigilante watch net.
//!
//! This crate is the heart of Cigilante. It provides:
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger`, the process-wide store of reports and counters
//! - Single-winner claims: a report moves from unclaimed to claimed once
//! - Insertion-ordered pagination, optionally filtered to unclaimed reports
//! - An invariant audit over the collection and its counters

pub mod error;
pub mod memory;
pub mod records;
pub mod traits;

pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use records::NewReport;
pub use traits::{LedgerReader, LedgerWriter};
