use serde::{Deserialize, Serialize};

/// Line value used in the identity key when a violation has no line.
pub const NO_LINE: i64 = -1;

/// One reported defect at a source location (file-level when `line` is absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ViolationRecord {
    pub resource_key: String,
    pub line: Option<u32>,
    pub rule_key: String,
    pub rule_description: Option<String>,
    pub message: Option<String>,
}

/// (resource, line-or-sentinel, rule) tuple used to detect duplicate reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub resource_key: String,
    pub line: i64,
    pub rule_key: String,
}

impl ViolationRecord {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            resource_key: self.resource_key.clone(),
            line: self.line.map(i64::from).unwrap_or(NO_LINE),
            rule_key: self.rule_key.clone(),
        }
    }

    pub fn has_message(&self) -> bool {
        self.message
            .as_deref()
            .map(|m| !m.trim().is_empty())
            .unwrap_or(false)
    }
}
