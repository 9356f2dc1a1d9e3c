use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const PREFIX: &str = "wr-";

/// Identifier assigned by the ledger to each report.
///
/// The sequence number alone guarantees uniqueness and creation order. The
/// coarse wall-clock component only helps humans correlate ids with logs.
///
/// Canonical text form: `wr-<epoch seconds, lowercase hex>-<seq>`.
/// Ordering follows the sequence number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ReportId {
    seq: u64,
    epoch_secs: u64,
}

impl ReportId {
    /// Issue an id for `seq`, stamped with the current wall clock.
    pub fn issue(seq: u64) -> Self {
        let epoch_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self { seq, epoch_secs }
    }

    /// Create an id with explicit components.
    pub fn from_parts(seq: u64, epoch_secs: u64) -> Self {
        Self { seq, epoch_secs }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn epoch_secs(&self) -> u64 {
        self.epoch_secs
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{:x}-{}", self.epoch_secs, self.seq)
    }
}

impl fmt::Debug for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReportId({self})")
    }
}

impl FromStr for ReportId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidReportId(s.to_string());
        let rest = s.trim().strip_prefix(PREFIX).ok_or_else(invalid)?;
        let (clock, seq) = rest.split_once('-').ok_or_else(invalid)?;

        // Reject signs and empty parts; `from_str_radix` accepts a leading '+'.
        let all_hex = !clock.is_empty() && clock.bytes().all(|b| b.is_ascii_hexdigit());
        let all_digits = !seq.is_empty() && seq.bytes().all(|b| b.is_ascii_digit());
        if !all_hex || !all_digits {
            return Err(invalid());
        }

        let epoch_secs = u64::from_str_radix(clock, 16).map_err(|_| invalid())?;
        let seq: u64 = seq.parse().map_err(|_| invalid())?;
        if seq == 0 {
            return Err(invalid());
        }
        Ok(Self { seq, epoch_secs })
    }
}

impl From<ReportId> for String {
    fn from(id: ReportId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ReportId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
