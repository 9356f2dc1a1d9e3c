//! Precondition checks for the Cigilante watch ledger.
//!
//! Every submission, claim, and paginated read passes through the [`Gate`]
//! before it reaches the ledger, so the ledger never sees a malformed
//! request. Checks are pure: on failure nothing has been mutated.
//!
//! # Quick Start
//!
//! ```rust
//! use cg_gate::{Gate, LimitsConfig};
//!
//! let gate = Gate::new(LimitsConfig::default());
//! let ok = gate.check_submission("  fence down at the north lot  ", 500, 0).unwrap();
//! assert_eq!(ok.body, "fence down at the north lot");
//! assert!(gate.check_bounty(-1).is_err());
//! ```

pub mod config;
pub mod error;
pub mod gate;

pub use config::LimitsConfig;
pub use error::GateError;
pub use gate::{Gate, Submission};
