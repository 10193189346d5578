use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::authority::NameAuthority;
use crate::cancel::CancelToken;
use crate::classify::classify_reply;
use crate::config::ReconConfig;
use crate::model::{LookupOutcome, ReconMeta, ReconReport, ReconRun, ReconciliationResult};
use crate::normalize::normalize;
use crate::summary::compute_summary;
use crate::throttle::Throttle;

/// Reconcile species names against `authority`, one lookup per distinct
/// original spelling, in first-seen order.
///
/// Never fails: transport, protocol and payload problems become
/// [`LookupOutcome`] values and the batch continues. The throttle pauses
/// after every lookup. `cancel` is checked before each lookup.
pub fn run<A, I, S>(
    authority: &A,
    names: I,
    config: &ReconConfig,
    throttle: &mut Throttle,
    cancel: &CancelToken,
) -> ReconRun
where
    A: NameAuthority + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique = distinct_names(names);
    let total = unique.len();
    info!(names = total, authority = %config.authority_name, "reconciling species names");

    let mut run = ReconRun::default();

    for (idx, original) in unique.into_iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(done = idx, remaining = total - idx, "reconciliation cancelled");
            run.cancelled = true;
            break;
        }

        let key = normalize(&original);
        debug!(name = %original, key = %key, "looking up");

        let outcome = match authority.search(key.as_str()) {
            Ok(reply) => classify_reply(&reply, &config.shape),
            Err(detail) => LookupOutcome::TransportError(detail),
        };

        info!(
            index = idx + 1,
            total,
            name = %original,
            outcome = %outcome,
            "lookup finished"
        );

        run.results.push(ReconciliationResult::new(original, outcome));
        throttle.pause();
    }

    run
}

/// Wrap a finished run with its summary and metadata.
pub fn build_report(config: &ReconConfig, run: ReconRun) -> ReconReport {
    let summary = compute_summary(&run.results);
    ReconReport {
        meta: ReconMeta {
            authority: config.authority_name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            cancelled: run.cancelled,
        },
        summary,
        results: run.results,
    }
}

/// Raw spellings, deduplicated, first occurrence kept.
fn distinct_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for name in names {
        let name = name.as_ref();
        if seen.insert(name.to_string()) {
            unique.push(name.to_string());
        }
    }
    unique
}
