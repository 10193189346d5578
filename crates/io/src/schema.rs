// Required column check

use crate::error::SchemaError;

/// Categorical column that partitions the observations.
pub const GROUP_COLUMN: &str = "componente_biologico";

/// Column holding the reported species name.
pub const SPECIES_COLUMN: &str = "especie";

/// Confirm both required columns are present (exact, case-sensitive match).
pub fn validate_columns(headers: &[String]) -> Result<(), SchemaError> {
    require_columns(headers, &[GROUP_COLUMN, SPECIES_COLUMN])
}

/// Confirm every name in `required` appears in `headers`.
///
/// The error lists all missing names in the order given.
pub fn require_columns(headers: &[String], required: &[&str]) -> Result<(), SchemaError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing })
    }
}
