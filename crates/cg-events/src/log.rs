use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use cg_types::EVENT_LOG_CAPACITY;

use crate::event::{EventKind, EventPayload, LedgerEvent};

/// A broadcast channel receiver for live ledger events.
pub type EventStream = broadcast::Receiver<LedgerEvent>;

/// Configuration for the [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLogConfig {
    /// Number of events retained; older entries are evicted first.
    pub capacity: usize,
    /// Capacity of the live subscription channel. Subscribers that fall
    /// further behind than this lag and skip ahead.
    pub channel_capacity: usize,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            capacity: EVENT_LOG_CAPACITY,
            channel_capacity: 256,
        }
    }
}

struct LogState {
    next_seq: u64,
    entries: VecDeque<LedgerEvent>,
}

/// Bounded, insertion-ordered history of ledger events.
///
/// All mutation happens under one mutex, so concurrent emitters never lose
/// or duplicate an entry and readers always copy out a whole window.
pub struct EventLog {
    capacity: usize,
    state: Mutex<LogState>,
    sender: broadcast::Sender<LedgerEvent>,
}

impl EventLog {
    pub fn new(config: EventLogConfig) -> Self {
        let capacity = config.capacity.max(1);
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            capacity,
            state: Mutex::new(LogState {
                next_seq: 1,
                entries: VecDeque::with_capacity(capacity),
            }),
            sender,
        }
    }

    /// Append an event to the tail, evicting the oldest entry when full.
    pub fn emit(&self, payload: EventPayload) -> LedgerEvent {
        let mut state = self.lock();
        let event = LedgerEvent::new(state.next_seq, payload);
        state.next_seq += 1;

        while state.entries.len() >= self.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(event.clone());

        // Sent under the lock so subscribers observe log order. An error
        // only means nobody is listening.
        let _ = self.sender.send(event.clone());
        drop(state);

        debug!(seq = event.seq, kind = %event.kind, "event emitted");
        event
    }

    /// Up to `n` of the most recent resident events, oldest first.
    pub fn recent(&self, n: usize) -> Vec<LedgerEvent> {
        let state = self.lock();
        let skip = state.entries.len().saturating_sub(n);
        state.entries.iter().skip(skip).cloned().collect()
    }

    /// Up to `n` of the most recent resident events of one kind, oldest first.
    pub fn recent_of(&self, kind: EventKind, n: usize) -> Vec<LedgerEvent> {
        let state = self.lock();
        let mut picked: Vec<LedgerEvent> = state
            .entries
            .iter()
            .rev()
            .filter(|e| e.kind == kind)
            .take(n)
            .cloned()
            .collect();
        picked.reverse();
        picked
    }

    /// Subscribe to events emitted from now on.
    pub fn subscribe(&self) -> EventStream {
        self.sender.subscribe()
    }

    /// Number of resident events.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total events ever emitted, including evicted ones.
    pub fn total_emitted(&self) -> u64 {
        self.lock().next_seq - 1
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}
