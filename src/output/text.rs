use crate::models::{ViolationRecord, ViolationReport};

pub fn format_text_report(report: &ViolationReport) -> String {
    let mut out = String::new();
    out.push_str("════════════════════════════════════════════════════════════════\n");
    out.push_str("                    OCLint Violations Report                    \n");
    out.push_str("════════════════════════════════════════════════════════════════\n\n");

    out.push_str("## Summary\n\n");
    out.push_str(&format!("  Source: {}\n", report.source));
    out.push_str(&format!(
        "  Total violations: {}\n",
        report.summary.total_violations
    ));
    if !report.complete {
        out.push_str("  Status: incomplete (the report could not be fully read)\n");
    }
    out.push('\n');

    out.push_str("## Violations\n\n");
    for v in &report.violations {
        out.push_str(&format_violation(v));
    }

    out
}

fn format_violation(v: &ViolationRecord) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "  [{}] {}:{}\n",
        v.rule_key,
        v.resource_key,
        v.line.map(|l| l.to_string()).unwrap_or_default()
    ));
    s.push_str(&format!("    {}\n", v.message.as_deref().unwrap_or_default()));
    if let Some(desc) = &v.rule_description {
        if v.message.as_deref() != Some(desc.trim()) {
            s.push_str(&format!("    Rule: {}\n", desc));
        }
    }
    s.push('\n');
    s
}
