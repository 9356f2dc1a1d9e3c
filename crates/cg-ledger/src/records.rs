/// A report ready to be appended. Shape checks happen before this point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReport {
    pub body: String,
    pub submitter: String,
    pub bounty_wei: u64,
}

impl NewReport {
    pub fn new(body: impl Into<String>, submitter: impl Into<String>, bounty_wei: u64) -> Self {
        Self {
            body: body.into(),
            submitter: submitter.into(),
            bounty_wei,
        }
    }
}
