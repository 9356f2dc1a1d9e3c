use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use cg_events::{EventLog, EventPayload};
use cg_types::{LedgerStats, Report, ReportId, MAX_REPORTS};

use crate::error::LedgerError;
use crate::records::NewReport;
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory report ledger, constructed once per process and shared by
/// reference with whatever serves requests.
///
/// Appends take the exclusive guard. Claims and every read take only the
/// shared guard: the claim transition itself is a one-shot [`OnceLock`] on
/// the report, so two racing claimers can never both succeed and readers
/// never see the flag without its claimer. The claimed count is derived from
/// those flags, so it can never disagree with them.
pub struct InMemoryLedger {
    max_reports: usize,
    inner: RwLock<LedgerState>,
    events: Arc<EventLog>,
}

#[derive(Default)]
struct LedgerState {
    next_seq: u64,
    reports: Vec<ReportEntry>,
    index: HashMap<ReportId, usize>,
    total_bounty_wei: u64,
}

impl LedgerState {
    fn entry(&self, id: &ReportId) -> Option<&ReportEntry> {
        self.index.get(id).and_then(|&i| self.reports.get(i))
    }
}

struct ReportEntry {
    id: ReportId,
    body: String,
    bounty_wei: u64,
    submitter: String,
    claimed_by: OnceLock<String>,
}

impl ReportEntry {
    fn is_claimed(&self) -> bool {
        self.claimed_by.get().is_some()
    }

    fn snapshot(&self) -> Report {
        Report::new(
            self.id,
            self.body.clone(),
            self.bounty_wei,
            self.submitter.clone(),
            self.claimed_by.get().cloned(),
        )
    }
}

impl InMemoryLedger {
    pub fn new(max_reports: usize, events: Arc<EventLog>) -> Self {
        Self {
            max_reports,
            inner: RwLock::new(LedgerState {
                next_seq: 1,
                ..Default::default()
            }),
            events,
        }
    }

    pub fn max_reports(&self) -> usize {
        self.max_reports
    }

    /// The event log this ledger records into.
    pub fn events(&self) -> &Arc<EventLog> {
        &self.events
    }

    /// Check the counters against the collection and the id index.
    pub fn audit(&self) -> Result<(), LedgerError> {
        let state = self.read()?;

        let mut total = 0u64;
        let mut last_seq = 0u64;
        for (position, entry) in state.reports.iter().enumerate() {
            if entry.id.seq() <= last_seq {
                return Err(LedgerError::IntegrityViolation(format!(
                    "{} out of order after seq {last_seq}",
                    entry.id
                )));
            }
            last_seq = entry.id.seq();

            if state.index.get(&entry.id) != Some(&position) {
                return Err(LedgerError::IntegrityViolation(format!(
                    "{} missing from index",
                    entry.id
                )));
            }

            total = total.checked_add(entry.bounty_wei).ok_or_else(|| {
                LedgerError::IntegrityViolation(format!("bounty sum overflows at {}", entry.id))
            })?;
        }

        if state.index.len() != state.reports.len() {
            return Err(LedgerError::IntegrityViolation(
                "index size differs from report count".into(),
            ));
        }
        if total != state.total_bounty_wei {
            return Err(LedgerError::IntegrityViolation(format!(
                "bounty sum {total} != counter {}",
                state.total_bounty_wei
            )));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::Poisoned("read"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::Poisoned("write"))
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(MAX_REPORTS, Arc::new(EventLog::default()))
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&self, report: NewReport) -> Result<ReportId, LedgerError> {
        let mut state = self.write()?;
        if state.reports.len() >= self.max_reports {
            return Err(LedgerError::CapacityReached {
                cap: self.max_reports,
            });
        }

        let total_bounty_wei = state
            .total_bounty_wei
            .checked_add(report.bounty_wei)
            .ok_or(LedgerError::BountyTotalOverflow {
                total: state.total_bounty_wei,
                bounty_wei: report.bounty_wei,
            })?;

        let id = ReportId::issue(state.next_seq);
        state.next_seq += 1;
        state.total_bounty_wei = total_bounty_wei;
        let position = state.reports.len();
        state.index.insert(id, position);
        state.reports.push(ReportEntry {
            id,
            body: report.body,
            bounty_wei: report.bounty_wei,
            submitter: report.submitter.clone(),
            claimed_by: OnceLock::new(),
        });

        // Still under the guard, so no claim event for this id can precede it.
        self.events.emit(EventPayload::ReportSubmitted {
            report_id: id,
            bounty_wei: report.bounty_wei,
            submitter: report.submitter,
        });

        debug!(%id, bounty_wei = report.bounty_wei, "report appended");
        Ok(id)
    }

    fn claim(&self, id: &ReportId, claimer: &str) -> Result<Report, LedgerError> {
        let state = self.read()?;
        let entry = state.entry(id).ok_or(LedgerError::ReportNotFound(*id))?;

        if entry.claimed_by.set(claimer.to_string()).is_err() {
            debug!(%id, claimer, "claim lost: already claimed");
            return Err(LedgerError::AlreadyClaimed(*id));
        }

        self.events.emit(EventPayload::BountyClaimed {
            report_id: *id,
            claimer: claimer.to_string(),
        });

        debug!(%id, claimer, "bounty claimed");
        Ok(entry.snapshot())
    }
}

impl LedgerReader for InMemoryLedger {
    fn get(&self, id: &ReportId) -> Result<Option<Report>, LedgerError> {
        let state = self.read()?;
        Ok(state.entry(id).map(ReportEntry::snapshot))
    }

    fn list(&self, offset: usize, limit: usize) -> Result<Vec<Report>, LedgerError> {
        let state = self.read()?;
        Ok(state
            .reports
            .iter()
            .skip(offset)
            .take(limit)
            .map(ReportEntry::snapshot)
            .collect())
    }

    fn list_unclaimed(&self, offset: usize, limit: usize) -> Result<Vec<Report>, LedgerError> {
        let state = self.read()?;
        Ok(state
            .reports
            .iter()
            .filter(|entry| !entry.is_claimed())
            .skip(offset)
            .take(limit)
            .map(ReportEntry::snapshot)
            .collect())
    }

    fn report_count(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.reports.len())
    }

    fn stats(&self) -> Result<LedgerStats, LedgerError> {
        // Claim flags only go from unset to set, so counting them under the
        // shared guard yields a count the ledger actually passed through.
        let state = self.read()?;
        let claimed_count = state.reports.iter().filter(|e| e.is_claimed()).count();
        Ok(LedgerStats {
            report_count: state.reports.len() as u64,
            total_bounty_wei: state.total_bounty_wei,
            claimed_count: claimed_count as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_events::EventKind;
    use proptest::prelude::*;
    use std::sync::Barrier;
    use std::thread;

    fn submit(ledger: &InMemoryLedger, body: &str, bounty_wei: u64) -> ReportId {
        ledger
            .append(NewReport::new(body, "0xsubmitter", bounty_wei))
            .unwrap()
    }

    fn bodies(reports: &[Report]) -> Vec<&str> {
        reports.iter().map(Report::body).collect()
    }

    #[test]
    fn append_then_get_returns_unclaimed_report() {
        let ledger = InMemoryLedger::default();
        let id = submit(&ledger, "broken streetlight on 5th", 250);

        let report = ledger.get(&id).unwrap().unwrap();
        assert_eq!(report.id(), id);
        assert_eq!(report.body(), "broken streetlight on 5th");
        assert_eq!(report.bounty_wei(), 250);
        assert_eq!(report.submitter(), "0xsubmitter");
        assert!(!report.is_claimed());
        assert_eq!(report.claimed_by(), None);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let ledger = InMemoryLedger::default();
        let ids: Vec<ReportId> = (0..20).map(|i| submit(&ledger, "x", i)).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[1].seq(), pair[0].seq() + 1);
        }
        assert_eq!(ids[0].seq(), 1);
    }

    #[test]
    fn claim_marks_report_once() {
        let ledger = InMemoryLedger::default();
        let id = submit(&ledger, "a", 10);

        let claimed = ledger.claim(&id, "0xclaimer").unwrap();
        assert!(claimed.is_claimed());
        assert_eq!(claimed.claimed_by(), Some("0xclaimer"));

        let again = ledger.claim(&id, "0xother").unwrap_err();
        assert_eq!(again, LedgerError::AlreadyClaimed(id));

        let stored = ledger.get(&id).unwrap().unwrap();
        assert_eq!(stored.claimed_by(), Some("0xclaimer"));
        assert_eq!(ledger.stats().unwrap().claimed_count, 1);
    }

    #[test]
    fn claim_unknown_id_is_not_found() {
        let ledger = InMemoryLedger::default();
        submit(&ledger, "a", 1);
        let ghost = ReportId::from_parts(99, 0);
        assert_eq!(
            ledger.claim(&ghost, "0xclaimer").unwrap_err(),
            LedgerError::ReportNotFound(ghost)
        );
        assert_eq!(ledger.stats().unwrap().claimed_count, 0);
    }

    #[test]
    fn lookup_requires_exact_id() {
        let ledger = InMemoryLedger::default();
        let id = submit(&ledger, "a", 1);
        let same_seq_other_clock = ReportId::from_parts(id.seq(), id.epoch_secs() + 1);
        assert!(ledger.get(&same_seq_other_clock).unwrap().is_none());
        assert!(ledger.get(&id).unwrap().is_some());
    }

    #[test]
    fn list_windows_in_insertion_order() {
        let ledger = InMemoryLedger::default();
        for body in ["A", "B", "C"] {
            submit(&ledger, body, 0);
        }

        assert_eq!(bodies(&ledger.list(0, 100).unwrap()), vec!["A", "B", "C"]);
        assert_eq!(bodies(&ledger.list(1, 100).unwrap()), vec!["B", "C"]);
        assert_eq!(bodies(&ledger.list(1, 1).unwrap()), vec!["B"]);
        assert!(ledger.list(3, 100).unwrap().is_empty());
        assert!(ledger.list(10, 100).unwrap().is_empty());
        assert!(ledger.list(0, 0).unwrap().is_empty());
    }

    #[test]
    fn list_unclaimed_filters_before_windowing() {
        let ledger = InMemoryLedger::default();
        let ids: Vec<ReportId> = ["A", "B", "C", "D"]
            .iter()
            .map(|b| submit(&ledger, b, 0))
            .collect();
        ledger.claim(&ids[0], "0x1").unwrap();
        ledger.claim(&ids[2], "0x1").unwrap();

        assert_eq!(bodies(&ledger.list_unclaimed(0, 100).unwrap()), vec!["B", "D"]);
        assert_eq!(bodies(&ledger.list_unclaimed(1, 100).unwrap()), vec!["D"]);
        assert!(ledger.list_unclaimed(2, 100).unwrap().is_empty());
        // The full listing still has everything.
        assert_eq!(ledger.list(0, 100).unwrap().len(), 4);
    }

    #[test]
    fn claims_never_remove_reports_or_bounty() {
        let ledger = InMemoryLedger::default();
        let ids: Vec<ReportId> = [100, 200, 300]
            .into_iter()
            .map(|b| submit(&ledger, "r", b))
            .collect();
        let before = ledger.stats().unwrap();
        assert_eq!(before.report_count, 3);
        assert_eq!(before.total_bounty_wei, 600);

        for id in &ids {
            ledger.claim(id, "0xclaimer").unwrap();
        }
        let after = ledger.stats().unwrap();
        assert_eq!(after.report_count, 3);
        assert_eq!(after.total_bounty_wei, 600);
        assert_eq!(after.claimed_count, 3);
        assert_eq!(ledger.report_count().unwrap(), 3);
    }

    #[test]
    fn append_stops_at_capacity() {
        let ledger = InMemoryLedger::new(3, Arc::new(EventLog::default()));
        for _ in 0..3 {
            submit(&ledger, "x", 1);
        }
        let err = ledger.append(NewReport::new("x", "0x0", 1)).unwrap_err();
        assert_eq!(err, LedgerError::CapacityReached { cap: 3 });
        assert_eq!(ledger.report_count().unwrap(), 3);
        assert_eq!(ledger.stats().unwrap().total_bounty_wei, 3);
    }

    #[test]
    fn mutations_emit_events_in_order() {
        let ledger = InMemoryLedger::default();
        let id = submit(&ledger, "a", 7);
        ledger.claim(&id, "0xclaimer").unwrap();
        let _ = ledger.claim(&id, "0xlate");

        let events = ledger.events().recent(10);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::ReportSubmitted);
        assert_eq!(events[1].kind, EventKind::BountyClaimed);
        assert_eq!(events[1].payload.report_id(), id);
    }

    #[test]
    fn audit_passes_on_healthy_ledger() {
        let ledger = InMemoryLedger::default();
        let a = submit(&ledger, "a", 5);
        submit(&ledger, "b", 6);
        ledger.claim(&a, "0x1").unwrap();
        ledger.audit().unwrap();
    }

    #[test]
    fn audit_detects_counter_drift() {
        let ledger = InMemoryLedger::default();
        submit(&ledger, "a", 5);
        ledger.inner.write().unwrap().total_bounty_wei = 999;

        let err = ledger.audit().unwrap_err();
        assert!(matches!(err, LedgerError::IntegrityViolation(reason) if reason.contains("bounty sum")));
    }

    #[test]
    fn bounty_total_overflow_is_rejected_without_mutation() {
        let ledger = InMemoryLedger::default();
        let first = submit(&ledger, "a", u64::MAX - 10);

        let err = ledger.append(NewReport::new("b", "0x0", 11)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::BountyTotalOverflow {
                total: u64::MAX - 10,
                bounty_wei: 11
            }
        );
        assert_eq!(err.kind(), Some(cg_types::FailureKind::BountyOutOfRange));

        // Nothing was appended and the lock is still healthy.
        let stats = ledger.stats().unwrap();
        assert_eq!(stats.report_count, 1);
        assert_eq!(stats.total_bounty_wei, u64::MAX - 10);
        assert_eq!(ledger.events().recent(10).len(), 1);
        submit(&ledger, "c", 10);
        ledger.claim(&first, "0x1").unwrap();
        ledger.audit().unwrap();
    }

    #[test]
    fn stats_only_needs_the_shared_guard() {
        let ledger = InMemoryLedger::default();
        let id = submit(&ledger, "a", 3);
        ledger.claim(&id, "0x1").unwrap();

        // Another thread parks on the shared guard; stats and audit must not wait for it.
        let held = Barrier::new(2);
        let done = Barrier::new(2);
        thread::scope(|s| {
            s.spawn(|| {
                let _reader = ledger.inner.read().unwrap();
                held.wait();
                done.wait();
            });
            held.wait();
            let stats = ledger.stats().unwrap();
            assert_eq!(stats.claimed_count, 1);
            assert_eq!(stats.total_bounty_wei, 3);
            ledger.audit().unwrap();
            done.wait();
        });
    }

    #[test]
    fn concurrent_claims_have_one_winner() {
        let ledger = Arc::new(InMemoryLedger::default());
        let id = submit(&ledger, "contested", 1000);

        let contenders = 16;
        let barrier = Arc::new(Barrier::new(contenders));
        let handles: Vec<_> = (0..contenders)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    ledger.claim(&id, &format!("0xclaimer{i}"))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<&Report> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == LedgerError::AlreadyClaimed(id)));

        let stored = ledger.get(&id).unwrap().unwrap();
        assert_eq!(stored.claimed_by(), winners[0].claimed_by());
        assert_eq!(ledger.stats().unwrap().claimed_count, 1);
        assert_eq!(ledger.events().recent_of(EventKind::BountyClaimed, 100).len(), 1);
        ledger.audit().unwrap();
    }

    #[test]
    fn concurrent_appends_respect_capacity() {
        let ledger = Arc::new(InMemoryLedger::new(50, Arc::new(EventLog::default())));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    (0..10)
                        .filter(|_| ledger.append(NewReport::new("x", "0x0", 2)).is_ok())
                        .count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(accepted, 50);
        let stats = ledger.stats().unwrap();
        assert_eq!(stats.report_count, 50);
        assert_eq!(stats.total_bounty_wei, 100);
        ledger.audit().unwrap();
    }

    #[test]
    fn readers_see_whole_reports_during_claims() {
        let ledger = Arc::new(InMemoryLedger::default());
        let ids: Vec<ReportId> = (0..100).map(|i| submit(&ledger, "r", i)).collect();

        let claimer = {
            let ledger = Arc::clone(&ledger);
            let ids = ids.clone();
            thread::spawn(move || {
                for id in ids.iter().step_by(2) {
                    ledger.claim(id, "0xclaimer").unwrap();
                }
            })
        };

        for _ in 0..50 {
            for report in ledger.list(0, 100).unwrap() {
                assert_eq!(report.is_claimed(), report.claimed_by().is_some());
            }
            for report in ledger.list_unclaimed(0, 100).unwrap() {
                assert!(!report.is_claimed());
            }
            let stats = ledger.stats().unwrap();
            assert!(stats.claimed_count <= 50);
        }
        claimer.join().unwrap();

        let open = ledger.list_unclaimed(0, 100).unwrap();
        assert_eq!(open.len(), 50);
        assert!(open.iter().all(|r| r.id().seq() % 2 == 0));
        ledger.audit().unwrap();
    }

    proptest! {
        #[test]
        fn list_matches_slice_model(count in 0usize..40, offset in 0usize..60, limit in 0usize..60) {
            let ledger = InMemoryLedger::default();
            let model: Vec<String> = (0..count).map(|i| format!("r{i}")).collect();
            for body in &model {
                ledger.append(NewReport::new(body.clone(), "0x0", 0)).unwrap();
            }

            let page = ledger.list(offset, limit).unwrap();
            let start = offset.min(model.len());
            let end = offset.saturating_add(limit).min(model.len()).max(start);
            let expected: Vec<&str> = model[start..end].iter().map(String::as_str).collect();
            prop_assert_eq!(bodies(&page), expected);
        }

        #[test]
        fn unclaimed_page_matches_filtered_model(
            claims in proptest::collection::vec(any::<bool>(), 0..30),
            offset in 0usize..35,
            limit in 0usize..35,
        ) {
            let ledger = InMemoryLedger::default();
            let mut open = Vec::new();
            for (i, claim) in claims.iter().enumerate() {
                let body = format!("r{i}");
                let id = ledger.append(NewReport::new(body.clone(), "0x0", 0)).unwrap();
                if *claim {
                    ledger.claim(&id, "0xclaimer").unwrap();
                } else {
                    open.push(body);
                }
            }

            let page = ledger.list_unclaimed(offset, limit).unwrap();
            let expected: Vec<&str> = open.iter().skip(offset).take(limit).map(String::as_str).collect();
            prop_assert_eq!(bodies(&page), expected);
            prop_assert_eq!(
                ledger.stats().unwrap().claimed_count,
                claims.iter().filter(|c| **c).count() as u64
            );
        }
    }
}
