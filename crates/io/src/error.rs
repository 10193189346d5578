use thiserror::Error;

/// Structural failure while turning uploaded bytes into a table.
///
/// Always fatal to a run: nothing downstream executes.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The declared encoding label is not a known WHATWG label.
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// The content has no first line to sniff.
    #[error("file is empty")]
    Empty,

    /// No candidate delimiter splits the header line into several fields.
    #[error("could not determine field delimiter from header line")]
    NoDelimiter,

    /// The header line itself could not be read.
    #[error("cannot read header: {0}")]
    Header(String),

    /// Every data row was dropped (or there were none).
    #[error("no usable rows after parsing")]
    NoRows,

    #[error("IO error: {0}")]
    Io(String),
}

/// Required columns are absent from the header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required column(s): {}", .missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}
