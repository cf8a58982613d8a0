//! Human-readable summary renderer for snapshot diffs.

use crate::diff::model::{DiffReport, ServiceChange};

/// Render a human-readable Markdown summary of a [`DiffReport`].
///
/// The summary is intended for terminal review output. It is informational
/// only and does not affect the structured report.
pub fn render_human_summary(report: &DiffReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("## Snapshot Diff: {}\n\n", report.old_snapshot.ip));
    out.push_str(&format!(
        "**Window**: {} → {}\n\n",
        report.old_snapshot.timestamp, report.new_snapshot.timestamp
    ));

    if !report.has_changes {
        out.push_str("_No changes detected._\n");
        return out;
    }

    if !report.ports_added.is_empty() {
        out.push_str(&format!(
            "### Ports Added ({})\n\n",
            report.ports_added.len()
        ));
        for entry in &report.ports_added {
            let protocol = entry
                .new_service
                .as_ref()
                .map(|s| s.protocol.as_str())
                .unwrap_or("?");
            out.push_str(&format!("- `{}/{}`\n", entry.port, protocol));
        }
        out.push('\n');
    }

    if !report.ports_removed.is_empty() {
        out.push_str(&format!(
            "### Ports Removed ({})\n\n",
            report.ports_removed.len()
        ));
        for entry in &report.ports_removed {
            let protocol = entry
                .old_service
                .as_ref()
                .map(|s| s.protocol.as_str())
                .unwrap_or("?");
            out.push_str(&format!("- `{}/{}`\n", entry.port, protocol));
        }
        out.push('\n');
    }

    if !report.services_changed.is_empty() {
        out.push_str(&format!(
            "### Services Changed ({})\n\n",
            report.services_changed.len()
        ));
        for change in &report.services_changed {
            out.push_str(&format!(
                "- `{}/{}`: {}\n",
                change.port,
                change.protocol,
                change_details(change)
            ));
        }
    }

    out
}

fn change_details(change: &ServiceChange) -> String {
    let mut parts: Vec<String> = Vec::new();

    if change.status_changed {
        parts.push(format!(
            "status {} → {}",
            change.old_status.unwrap_or(0),
            change.new_status.unwrap_or(0)
        ));
    }
    if change.protocol_changed {
        parts.push(format!(
            "protocol {} → {}",
            change.old_protocol.as_deref().unwrap_or("?"),
            change.new_protocol.as_deref().unwrap_or("?")
        ));
    }
    if change.software_changed {
        parts.push("software changed".to_string());
    }
    if change.tls_changed {
        parts.push("TLS changed".to_string());
    }
    if !change.vulnerabilities_added.is_empty() {
        parts.push(format!(
            "vulnerabilities added: {}",
            change.vulnerabilities_added.join(", ")
        ));
    }
    if !change.vulnerabilities_fixed.is_empty() {
        parts.push(format!(
            "vulnerabilities fixed: {}",
            change.vulnerabilities_fixed.join(", ")
        ));
    }

    parts.join("; ")
}
