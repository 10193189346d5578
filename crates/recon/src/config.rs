use serde::{Deserialize, Serialize};
use taxcheck_config::{DEFAULT_AUTHORITY_NAME, DEFAULT_CANDIDATES_FIELD, DEFAULT_DISPLAY_FIELD};

// ---------------------------------------------------------------------------
// Engine config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReconConfig {
    /// Authority name shown in status labels and report metadata.
    pub authority_name: String,
    pub shape: ResponseShape,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            authority_name: DEFAULT_AUTHORITY_NAME.to_string(),
            shape: ResponseShape::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

/// Where the candidate list and the display name sit in a success payload.
///
/// Defaults match the ITIS `searchByScientificName` JSON service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseShape {
    pub candidates_field: String,
    pub display_field: String,
}

impl Default for ResponseShape {
    fn default() -> Self {
        Self {
            candidates_field: DEFAULT_CANDIDATES_FIELD.to_string(),
            display_field: DEFAULT_DISPLAY_FIELD.to_string(),
        }
    }
}
