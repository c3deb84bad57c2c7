// Run identifiers are supplied by the caller; the flow never looks them up itself.

use crate::telemetry::generate_run_id;

/// Supplies a fresh identifier for every run
pub trait RunIdSource {
    fn next_run_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidRunIds;

impl RunIdSource for UuidRunIds {
    fn next_run_id(&mut self) -> String {
        generate_run_id()
    }
}

/// `prefix-1`, `prefix-2`, ... for reproducible runs
#[derive(Debug, Clone)]
pub struct SequentialRunIds {
    prefix: String,
    next: u64,
}

impl SequentialRunIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl RunIdSource for SequentialRunIds {
    fn next_run_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl<F> RunIdSource for F
where
    F: FnMut() -> String,
{
    fn next_run_id(&mut self) -> String {
        self()
    }
}
