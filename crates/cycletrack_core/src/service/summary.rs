//! Human-readable cycle summary block.
//!
//! The block is embedded verbatim in daily health summaries, so its line
//! layout is stable:
//!
//! ```text
//! Cycle:
//! - Day 14 of ~27 (Ovulatory phase)
//! - Predicted next: 2026-03-24
//! - Recent trend: insufficient-data (last 5 range 27-28)
//! ```

use crate::analytics::status::CycleStatus;

/// Renders `status` as a `Cycle:` block with one `- ` line per fact.
///
/// The trend line appears only when a recent range exists; anomaly and note
/// lines only when present.
pub fn build_cycle_summary(status: &CycleStatus) -> String {
    let mut lines = vec!["Cycle:".to_string()];
    lines.push(format!(
        "- Day {} of ~{} ({} phase)",
        status.cycle_day,
        status.rounded_estimate(),
        status.phase
    ));
    lines.push(format!("- Predicted next: {}", status.predicted_next));

    if let Some(range) = status.recent_range {
        lines.push(format!(
            "- Recent trend: {} (last 5 range {}-{})",
            status.trend, range.min, range.max
        ));
    }

    if let Some(anomaly) = status.anomaly {
        lines.push(format!("- Note: {anomaly}"));
    }

    if let Some(note) = status.note.as_deref() {
        lines.push(format!("- Cycle note: {note}"));
    }

    lines.join("\n")
}
