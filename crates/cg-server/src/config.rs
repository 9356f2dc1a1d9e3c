use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cg_sdk::{EventLogConfig, LimitsConfig, WatchConfig};

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 3952;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Page size used when a listing request names no `limit`.
    pub default_page_size: usize,
    /// Event count used when `/events` names no `n`.
    pub default_event_count: usize,
    pub limits: LimitsConfig,
    pub events: EventLogConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let limits = LimitsConfig::default();
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            default_page_size: limits.batch_limit,
            default_event_count: 50,
            limits,
            events: EventLogConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            limits: self.limits.clone(),
            events: self.events.clone(),
        }
    }
}
