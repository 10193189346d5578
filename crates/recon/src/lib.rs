//! `taxcheck-recon`: species name reconciliation engine.
//!
//! Pure engine crate: receives species names, asks a [`NameAuthority`] about
//! each one, returns classified results + summary. No network or file IO of
//! its own; the concrete authority client lives elsewhere.

pub mod authority;
pub mod cancel;
pub mod classify;
pub mod config;
pub mod engine;
pub mod model;
pub mod normalize;
pub mod summary;
pub mod throttle;

pub use authority::{AuthorityReply, NameAuthority};
pub use cancel::CancelToken;
pub use classify::classify_reply;
pub use config::{ReconConfig, ResponseShape};
pub use engine::{build_report, run};
pub use model::{
    LookupOutcome, ReconMeta, ReconReport, ReconRun, ReconciliationResult, SummaryStats, JSON_DECODE_ERROR,
    UNEXPECTED_SHAPE,
};
pub use normalize::{normalize, NormalizedName};
pub use summary::compute_summary;
pub use throttle::{Throttle, MIN_LOOKUP_DELAY};
