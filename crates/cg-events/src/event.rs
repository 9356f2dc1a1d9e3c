use std::fmt;

use serde::Serialize;

use cg_types::ReportId;

/// Classification of ledger events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// A report was appended to the ledger.
    ReportSubmitted,
    /// A report's bounty was claimed.
    BountyClaimed,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ReportSubmitted => "ReportSubmitted",
            Self::BountyClaimed => "BountyClaimed",
        };
        write!(f, "{s}")
    }
}

/// Data carried by a ledger event. The variant determines the event kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    #[serde(rename_all = "camelCase")]
    ReportSubmitted {
        report_id: ReportId,
        bounty_wei: u64,
        #[serde(rename = "from")]
        submitter: String,
    },
    #[serde(rename_all = "camelCase")]
    BountyClaimed { report_id: ReportId, claimer: String },
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ReportSubmitted { .. } => EventKind::ReportSubmitted,
            Self::BountyClaimed { .. } => EventKind::BountyClaimed,
        }
    }

    /// The report this event concerns.
    pub fn report_id(&self) -> ReportId {
        match self {
            Self::ReportSubmitted { report_id, .. } | Self::BountyClaimed { report_id, .. } => {
                *report_id
            }
        }
    }
}

impl fmt::Display for EventPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReportSubmitted {
                report_id,
                bounty_wei,
                submitter,
            } => write!(f, "{report_id} bounty={bounty_wei} from={submitter}"),
            Self::BountyClaimed { report_id, claimer } => {
                write!(f, "{report_id} by={claimer}")
            }
        }
    }
}

/// A single entry in the event log.
///
/// `seq` counts every event the log has accepted, starting at 1, so gaps at
/// the front of [`EventLog::recent`](crate::EventLog::recent) reveal eviction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerEvent {
    pub seq: u64,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub payload: EventPayload,
}

impl LedgerEvent {
    pub fn new(seq: u64, payload: EventPayload) -> Self {
        Self {
            seq,
            kind: payload.kind(),
            payload,
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.seq, self.kind, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rid(seq: u64) -> ReportId {
        ReportId::from_parts(seq, 0xab)
    }

    #[test]
    fn kind_follows_payload() {
        let submitted = LedgerEvent::new(
            1,
            EventPayload::ReportSubmitted {
                report_id: rid(1),
                bounty_wei: 10,
                submitter: "0xabc".into(),
            },
        );
        assert_eq!(submitted.kind, EventKind::ReportSubmitted);

        let claimed = LedgerEvent::new(
            2,
            EventPayload::BountyClaimed {
                report_id: rid(1),
                claimer: "0xdef".into(),
            },
        );
        assert_eq!(claimed.kind, EventKind::BountyClaimed);
        assert_eq!(claimed.payload.report_id(), rid(1));
    }

    #[test]
    fn display_is_one_line() {
        let event = LedgerEvent::new(
            4,
            EventPayload::BountyClaimed {
                report_id: rid(2),
                claimer: "0xdef".into(),
            },
        );
        assert_eq!(event.to_string(), "#4 BountyClaimed wr-ab-2 by=0xdef");
    }

    #[test]
    fn json_shape() {
        let event = LedgerEvent::new(
            1,
            EventPayload::ReportSubmitted {
                report_id: rid(3),
                bounty_wei: 25,
                submitter: "0xabc".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "seq": 1,
                "type": "ReportSubmitted",
                "payload": {"reportId": "wr-ab-3", "bountyWei": 25, "from": "0xabc"},
            })
        );
    }
}
