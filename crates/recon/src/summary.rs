use crate::model::{ReconciliationResult, SummaryStats};

/// Compute summary statistics from reconciliation results.
pub fn compute_summary(results: &[ReconciliationResult]) -> SummaryStats {
    let total = results.len();
    let matched_count = results.iter().filter(|r| r.outcome.is_matched()).count();
    let match_percentage = if total > 0 {
        matched_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    SummaryStats {
        total,
        matched_count,
        match_percentage,
    }
}
