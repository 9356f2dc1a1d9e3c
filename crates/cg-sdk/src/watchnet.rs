use std::sync::Arc;

use tracing::{debug, info};

use cg_events::{EventKind, EventLog, EventStream, LedgerEvent};
use cg_gate::{Gate, LimitsConfig};
use cg_ledger::{InMemoryLedger, LedgerError, LedgerReader, LedgerWriter, NewReport};
use cg_types::{LedgerStats, Report, ReportId, ANONYMOUS_ADDRESS};

use crate::config::WatchConfig;
use crate::error::{SdkError, SdkResult};

/// High-level Cigilante API.
///
/// One `WatchNet` owns one ledger and its event log for the lifetime of the
/// process; share it behind an `Arc` with whatever serves requests. Every
/// mutating call runs the gate checks first, so a failed call leaves no
/// trace.
pub struct WatchNet {
    gate: Gate,
    ledger: InMemoryLedger,
}

impl WatchNet {
    pub fn new(config: WatchConfig) -> Self {
        let events = Arc::new(EventLog::new(config.events));
        let ledger = InMemoryLedger::new(config.limits.max_reports, events);
        info!(
            max_reports = config.limits.max_reports,
            event_capacity = ledger.events().capacity(),
            "watch net ledger ready"
        );
        Self {
            gate: Gate::new(config.limits),
            ledger,
        }
    }

    pub fn limits(&self) -> &LimitsConfig {
        self.gate.limits()
    }

    // ---- Mutations ----

    pub fn submit_report(&self, body: &str, from: &str, bounty_wei: i64) -> SdkResult<ReportId> {
        let current = self.ledger.report_count()?;
        let submission = self.gate.check_submission(body, bounty_wei, current)?;

        let id = self
            .ledger
            .append(NewReport::new(submission.body, address(from), submission.bounty_wei))
            .map_err(|e| match e {
                // Lost a race for the last slot after the gate's check.
                LedgerError::CapacityReached { cap } => {
                    SdkError::Gate(cg_gate::GateError::ReportCapReached { count: cap, cap })
                }
                other => SdkError::Ledger(other),
            })?;

        debug!(%id, "report submitted");
        Ok(id)
    }

    pub fn claim_bounty(&self, report_id: &str, claimer: &str) -> SdkResult<Report> {
        let id = self.gate.check_report_id(report_id)?;
        let report = self.ledger.claim(&id, &address(claimer))?;
        Ok(report)
    }

    // ---- Queries ----

    pub fn get_report(&self, id: &str) -> SdkResult<Report> {
        let raw = self.gate.check_lookup_id(id)?;
        let not_found = || SdkError::ReportNotFound(raw.to_string());
        let id: ReportId = raw.parse().map_err(|_| not_found())?;
        self.ledger.get(&id)?.ok_or_else(not_found)
    }

    /// Reports in insertion order. A negative offset counts as zero.
    pub fn list_reports(&self, offset: i64, limit: usize) -> SdkResult<Vec<Report>> {
        self.gate.check_batch(limit)?;
        Ok(self.ledger.list(clamp_offset(offset), limit)?)
    }

    pub fn list_unclaimed_reports(&self, offset: i64, limit: usize) -> SdkResult<Vec<Report>> {
        self.gate.check_batch(limit)?;
        Ok(self.ledger.list_unclaimed(clamp_offset(offset), limit)?)
    }

    pub fn stats(&self) -> SdkResult<LedgerStats> {
        Ok(self.ledger.stats()?)
    }

    /// Up to `n` most recent events, oldest first.
    pub fn recent_events(&self, n: usize) -> Vec<LedgerEvent> {
        self.ledger.events().recent(n)
    }

    pub fn recent_events_of(&self, kind: EventKind, n: usize) -> Vec<LedgerEvent> {
        self.ledger.events().recent_of(kind, n)
    }

    /// Live feed of events emitted after this call.
    pub fn subscribe(&self) -> EventStream {
        self.ledger.events().subscribe()
    }

    /// Verify the ledger's counters against its contents.
    pub fn audit(&self) -> SdkResult<()> {
        Ok(self.ledger.audit()?)
    }
}

impl Default for WatchNet {
    fn default() -> Self {
        Self::new(WatchConfig::default())
    }
}

fn address(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        ANONYMOUS_ADDRESS.to_string()
    } else {
        raw.to_string()
    }
}

fn clamp_offset(offset: i64) -> usize {
    if offset <= 0 {
        0
    } else {
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}
