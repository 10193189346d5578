//! Load → validate → select group → reconcile → summarize.
//!
//! Everything the CLI needs for one verification run flows through a
//! [`VerifyRequest`]; nothing is read from ambient state.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use taxcheck_io::{
    distinct_groups, load_table, select_group, validate_columns, LoadError, SchemaError, Table,
    GROUP_COLUMN,
};
use taxcheck_recon::{build_report, run, CancelToken, NameAuthority, ReconConfig, ReconReport, Throttle};

/// Input for one verification run.
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub uploaded_bytes: Vec<u8>,
    /// WHATWG encoding label
    pub encoding: String,
    /// `None` picks the first group in the file
    pub selected_group: Option<String>,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("group '{group}' not found (available: {})", .available.join(", "))]
    UnknownGroup { group: String, available: Vec<String> },

    #[error("column '{}' has no values", GROUP_COLUMN)]
    NoGroups,
}

/// A finished run for one group.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutcome {
    pub group: String,
    #[serde(flatten)]
    pub report: ReconReport,
}

/// Load bytes into a table that carries both required columns.
pub fn load_validated(bytes: &[u8], encoding: &str) -> Result<Table, PipelineError> {
    let table = load_table(bytes, encoding)?;
    validate_columns(&table.headers)?;
    Ok(table)
}

/// Distinct groups in the uploaded table, first-seen order.
pub fn list_groups(bytes: &[u8], encoding: &str) -> Result<Vec<String>, PipelineError> {
    let table = load_validated(bytes, encoding)?;
    Ok(distinct_groups(&table))
}

/// The requested group if present in the table, else the first one.
pub fn resolve_group(table: &Table, requested: Option<&str>) -> Result<String, PipelineError> {
    let available = distinct_groups(table);
    match requested {
        Some(group) if available.iter().any(|g| g == group) => Ok(group.to_string()),
        Some(group) => Err(PipelineError::UnknownGroup {
            group: group.to_string(),
            available,
        }),
        None => available.into_iter().next().ok_or(PipelineError::NoGroups),
    }
}

/// Run the whole pipeline for one request.
///
/// Structural problems (encoding, delimiter, columns, group) fail before
/// any lookup. Per-name lookup problems end up in the report.
pub fn run_pipeline<A: NameAuthority + ?Sized>(
    request: &VerifyRequest,
    authority: &A,
    config: &ReconConfig,
    throttle: &mut Throttle,
    cancel: &CancelToken,
) -> Result<VerifyOutcome, PipelineError> {
    let table = load_validated(&request.uploaded_bytes, &request.encoding)?;
    let group = resolve_group(&table, request.selected_group.as_deref())?;

    let records = select_group(&table, &group);
    info!(group = %group, rows = records.len(), "group selected");

    let names = records.iter().map(|r| r.species_name.as_str());
    let recon = run(authority, names, config, throttle, cancel);

    Ok(VerifyOutcome {
        group,
        report: build_report(config, recon),
    })
}
