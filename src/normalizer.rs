use std::collections::HashSet;

use crate::models::{IdentityKey, ViolationRecord};

/// Fills an empty or whitespace-only message from the rule description, then
/// from the rule key. The chosen value is trimmed. Records with a usable
/// message are left alone.
pub fn fill_message(violation: &mut ViolationRecord) {
    if violation.has_message() {
        return;
    }

    let fallback = violation
        .rule_description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .or_else(|| Some(violation.rule_key.trim()).filter(|k| !k.is_empty()))
        .map(str::to_string);

    if fallback.is_some() {
        violation.message = fallback;
    }
}

/// Applies message fallback and drops every record whose identity key was
/// already seen. The first occurrence wins and survivors keep document order.
pub fn normalize(raw: Vec<ViolationRecord>) -> Vec<ViolationRecord> {
    let mut seen: HashSet<IdentityKey> = HashSet::with_capacity(raw.len());
    let mut violations = Vec::with_capacity(raw.len());

    for mut v in raw {
        fill_message(&mut v);
        if seen.insert(v.identity_key()) {
            violations.push(v);
        }
    }

    tracing::error!(count = violations.len(), "Reporting {} violations.", violations.len());
    violations
}
