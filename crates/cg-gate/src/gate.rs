use cg_types::ReportId;

use crate::config::LimitsConfig;
use crate::error::GateError;

/// Stateless precondition checks, parameterised by [`LimitsConfig`].
///
/// Every check either passes (possibly returning a normalized value) or
/// fails with a [`GateError`]; none has side effects.
#[derive(Clone, Debug, Default)]
pub struct Gate {
    limits: LimitsConfig,
}

/// A submission that passed every check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Body with surrounding whitespace removed.
    pub body: String,
    pub bounty_wei: u64,
}

impl Gate {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Trim the body and check its length. An empty body is allowed.
    pub fn check_body<'a>(&self, body: &'a str) -> Result<&'a str, GateError> {
        let trimmed = body.trim();
        let len = trimmed.chars().count();
        if len > self.limits.max_body_len {
            return Err(GateError::ReportTooLong {
                len,
                max: self.limits.max_body_len,
            });
        }
        Ok(trimmed)
    }

    pub fn check_capacity(&self, current: usize) -> Result<(), GateError> {
        if current >= self.limits.max_reports {
            return Err(GateError::ReportCapReached {
                count: current,
                cap: self.limits.max_reports,
            });
        }
        Ok(())
    }

    pub fn check_bounty(&self, bounty_wei: i64) -> Result<u64, GateError> {
        u64::try_from(bounty_wei)
            .ok()
            .filter(|b| *b <= self.limits.max_bounty_wei)
            .ok_or(GateError::BountyOutOfRange {
                bounty_wei,
                max: self.limits.max_bounty_wei,
            })
    }

    /// Parse an id the ledger could have issued.
    pub fn check_report_id(&self, raw: &str) -> Result<ReportId, GateError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(GateError::InvalidReportId(String::new()));
        }
        raw.parse()
            .map_err(|_| GateError::InvalidReportId(raw.to_string()))
    }

    /// Require a non-blank id for point lookups.
    pub fn check_lookup_id<'a>(&self, raw: &'a str) -> Result<&'a str, GateError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(GateError::MissingId);
        }
        Ok(raw)
    }

    pub fn check_batch(&self, limit: usize) -> Result<(), GateError> {
        if limit > self.limits.batch_limit {
            return Err(GateError::BatchTooLarge {
                requested: limit,
                max: self.limits.batch_limit,
            });
        }
        Ok(())
    }

    /// Body, bounty, then capacity: the order a caller sees failures in.
    pub fn check_submission(
        &self,
        body: &str,
        bounty_wei: i64,
        current_count: usize,
    ) -> Result<Submission, GateError> {
        let body = self.check_body(body)?;
        let bounty_wei = self.check_bounty(bounty_wei)?;
        self.check_capacity(current_count)?;
        Ok(Submission {
            body: body.to_string(),
            bounty_wei,
        })
    }
}
