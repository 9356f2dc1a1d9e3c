//! HTTP server for the Cigilante watch ledger.
//!
//! Thin JSON glue over [`cg_sdk::WatchNet`]: every route parses its input,
//! calls one ledger operation, and renders the result or a `CG_*` error code.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::CigilanteServer;
