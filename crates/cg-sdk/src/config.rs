use serde::{Deserialize, Serialize};

use cg_events::EventLogConfig;
use cg_gate::LimitsConfig;

/// Everything needed to construct a [`WatchNet`](crate::WatchNet).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub limits: LimitsConfig,
    pub events: EventLogConfig,
}
