use serde::{Deserialize, Serialize};

use crate::models::violation::ViolationRecord;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Summary {
    pub total_violations: usize,
}

/// Document handed to downstream consumers after a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViolationReport {
    pub summary: Summary,
    pub source: String,
    /// False when the reader stopped early on an I/O or XML error.
    pub complete: bool,
    pub violations: Vec<ViolationRecord>,
}

impl ViolationReport {
    pub fn new(source: impl Into<String>, complete: bool, violations: Vec<ViolationRecord>) -> Self {
        Self {
            summary: Summary {
                total_violations: violations.len(),
            },
            source: source.into(),
            complete,
            violations,
        }
    }
}
