use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Per-name outcome
// ---------------------------------------------------------------------------

/// Detail used when a success payload parses but has the wrong structure.
pub const UNEXPECTED_SHAPE: &str = "unexpected shape";

/// Prefix of the detail used when a success body is not JSON.
pub const JSON_DECODE_ERROR: &str = "JSON decode error: ";

/// Classified result of one lookup. Every variant is terminal; no retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// First candidate's display name.
    Matched(String),
    NotFound,
    /// 2xx with a body that is not JSON or not the expected structure.
    InvalidResponse(String),
    /// Non-2xx status code.
    ProtocolError(u16),
    /// Connection failure, timeout, or unreadable body.
    TransportError(String),
}

impl LookupOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn matched_name(&self) -> Option<&str> {
        match self {
            Self::Matched(name) => Some(name),
            _ => None,
        }
    }

    /// Human-readable status for the `estado` column.
    pub fn label(&self, authority: &str) -> String {
        match self {
            Self::Matched(_) => format!("Coincide en {authority}"),
            Self::NotFound => format!("No encontrada en {authority}"),
            Self::InvalidResponse(detail) => match detail.strip_prefix(JSON_DECODE_ERROR) {
                Some(error) => format!("Error de decodificación JSON: {error}"),
                None if detail == UNEXPECTED_SHAPE => format!("Respuesta no válida de {authority}"),
                None => format!("Respuesta no válida de {authority}: {detail}"),
            },
            Self::ProtocolError(status) => format!("HTTP {status}"),
            Self::TransportError(detail) => format!("Error de conexión: {detail}"),
        }
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matched(name) => write!(f, "matched ({name})"),
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidResponse(detail) => write!(f, "invalid_response ({detail})"),
            Self::ProtocolError(status) => write!(f, "protocol_error ({status})"),
            Self::TransportError(detail) => write!(f, "transport_error ({detail})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One entry per distinct original species spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub original_name: String,
    pub outcome: LookupOutcome,
    pub matched_name: Option<String>,
}

impl ReconciliationResult {
    pub fn new(original_name: impl Into<String>, outcome: LookupOutcome) -> Self {
        let matched_name = outcome.matched_name().map(str::to_string);
        Self {
            original_name: original_name.into(),
            outcome,
            matched_name,
        }
    }
}

/// What the engine hands back: results in first-seen order.
///
/// `cancelled` is set when a cancel request stopped the batch early; the
/// results collected before that point are still complete and valid.
#[derive(Debug, Clone, Default)]
pub struct ReconRun {
    pub results: Vec<ReconciliationResult>,
    pub cancelled: bool,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub matched_count: usize,
    pub match_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: SummaryStats,
    pub results: Vec<ReconciliationResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub authority: String,
    pub engine_version: String,
    pub run_at: String,
    pub cancelled: bool,
}
