//! Plain-text damage-block report.

use crate::damage::DamageStats;

/// Format the report shown by the report command.
///
/// The low-damage lines are omitted when `threshold` is zero, since nothing
/// can have been blocked as low damage.
pub fn format_report(stats: &DamageStats, threshold: f32) -> String {
    let mut report = format!("Zero-damage events blocked: {}", stats.zero_damage_blocked);

    if threshold > 0.0 {
        report.push('\n');
        report.push_str(&format!(
            "Low-damage events blocked (below {}): {}\n",
            threshold, stats.low_damage_blocked
        ));
        report.push_str(&format!(
            "Low-damage cumulatively blocked: {}",
            stats.low_damage_cumulative
        ));
    }

    report
}
