use std::fmt;

use serde::Serialize;

/// Uncertainty qualifiers removed before lookup.
///
/// Matched as literal substrings anywhere in the name, so a qualifier glued
/// to the next token ("Aus sp.ectabilis") is also cut. Known false positive.
pub const QUALIFIERS: [&str; 3] = [" sp.", " cf.", " aff."];

/// Species name with qualifiers stripped and whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a raw species name.
///
/// Removal repeats until no qualifier is left, since cutting one can splice
/// another together ("a s sp.p." → "a sp."). Each pass shortens the string,
/// so this terminates.
pub fn normalize(raw: &str) -> NormalizedName {
    let mut name = raw.to_string();
    while QUALIFIERS.iter().any(|q| name.contains(q)) {
        for q in QUALIFIERS {
            name = name.replace(q, "");
        }
    }
    NormalizedName(name.trim().to_string())
}
