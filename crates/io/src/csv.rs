// Delimited text import: decode, sniff delimiter, parse rows

use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::table::{RawRow, Table};

/// Candidate delimiters, in tie-break order.
const CANDIDATES: &[u8] = &[b'\t', b';', b',', b'|'];

/// Lines inspected when scoring candidates.
const SAMPLE_LINES: usize = 10;

/// Cell values read as missing, matched exactly (no trimming, case-sensitive).
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A",
    "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(value: &str) -> bool {
    NA_TOKENS.contains(&value)
}

/// Decode, sniff and parse uploaded bytes into a [`Table`].
pub fn load_table(bytes: &[u8], encoding: &str) -> Result<Table, LoadError> {
    let content = decode(bytes, encoding)?;
    let delimiter = sniff_delimiter(&content)?;
    parse_table(&content, delimiter)
}

/// Read a file from disk and load it with [`load_table`].
pub fn load_file(path: &Path, encoding: &str) -> Result<Table, LoadError> {
    let bytes = std::fs::read(path)
        .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?;
    load_table(&bytes, encoding)
}

/// Decode `bytes` using a WHATWG encoding label (`utf-8`, `windows-1252`, `latin1`, ...).
///
/// Malformed sequences become U+FFFD instead of failing. A byte-order mark
/// overrides the declared label and is stripped.
pub fn decode(bytes: &[u8], encoding: &str) -> Result<String, LoadError> {
    let declared = Encoding::for_label(encoding.trim().as_bytes())
        .ok_or_else(|| LoadError::UnknownEncoding(encoding.to_string()))?;

    let (decoded, used, had_errors) = declared.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "invalid byte sequences replaced while decoding");
    }

    Ok(decoded.trim_start_matches('\u{feff}').to_string())
}

/// Infer the field delimiter from the header line.
///
/// A candidate is plausible only if it splits the first line into more than
/// one field. Plausible candidates are scored by how many sample lines share
/// the header's field count, times that field count; more columns wins ties
/// between equally consistent candidates.
pub fn sniff_delimiter(content: &str) -> Result<u8, LoadError> {
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if sample_lines.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut best: Option<u8> = None;
    let mut best_score = 0u64;

    for &delim in CANDIDATES {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| field_count(line, delim))
            .collect();

        let target = counts[0];
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = Some(delim);
        }
    }

    match best {
        Some(delim) => {
            debug!(delimiter = %char::from(delim).escape_default(), score = best_score, "sniffed delimiter");
            Ok(delim)
        }
        None => Err(LoadError::NoDelimiter),
    }
}

fn field_count(line: &str, delim: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}

/// Parse decoded content with a known delimiter.
///
/// The first record is the header. Rows whose field count differs from the
/// header, or that the reader rejects, are dropped and counted.
pub fn parse_table(content: &str, delimiter: u8) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Header(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut dropped_rows = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "skipping unreadable row");
                dropped_rows += 1;
                continue;
            }
        };

        if record.len() != headers.len() {
            debug!(
                line = record.position().map(|p| p.line()).unwrap_or(0),
                fields = record.len(),
                expected = headers.len(),
                "skipping row with inconsistent field count"
            );
            dropped_rows += 1;
            continue;
        }

        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| {
                let value = if is_missing(v) { None } else { Some(v.to_string()) };
                (h.clone(), value)
            })
            .collect();
        rows.push(RawRow::new(cells));
    }

    if rows.is_empty() {
        return Err(LoadError::NoRows);
    }

    info!(rows = rows.len(), dropped = dropped_rows, columns = headers.len(), "table loaded");

    Ok(Table {
        headers,
        rows,
        delimiter,
        dropped_rows,
    })
}
