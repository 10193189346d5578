//! Result rendering: `especie,estado,nombre_encontrado` CSV, text table,
//! summary metrics.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use taxcheck_recon::{ReconReport, SummaryStats};

/// Column cap for the text table; longer cells are cut with "..".
const MAX_CELL_WIDTH: usize = 60;

/// One output row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub especie: String,
    pub estado: String,
    pub nombre_encontrado: String,
}

pub fn result_rows(report: &ReconReport) -> Vec<ResultRow> {
    report
        .results
        .iter()
        .map(|r| ResultRow {
            especie: r.original_name.clone(),
            estado: r.outcome.label(&report.meta.authority),
            nombre_encontrado: r.matched_name.clone().unwrap_or_default(),
        })
        .collect()
}

/// Write the result rows as CSV (header always present).
pub fn write_csv<W: Write>(out: W, report: &ReconReport) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    let rows = result_rows(report);
    if rows.is_empty() {
        writer.write_record(["especie", "estado", "nombre_encontrado"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, report: &ReconReport) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    write_csv(io::BufWriter::new(file), report).map_err(|e| format!("{}: {}", path.display(), e))
}

/// The three headline metrics as (label, value) pairs.
pub fn summary_metrics(summary: &SummaryStats, authority: &str) -> [(String, String); 3] {
    [
        ("Total analizadas".to_string(), summary.total.to_string()),
        (format!("Encontradas en {authority}"), summary.matched_count.to_string()),
        ("% Coincidencia".to_string(), format!("{:.1}%", summary.match_percentage)),
    ]
}

pub fn render_summary(report: &ReconReport) -> String {
    let metrics = summary_metrics(&report.summary, &report.meta.authority);
    let label_width = metrics.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in &metrics {
        out.push_str(&pad_right(label, label_width));
        out.push_str("  ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Aligned text table of the result rows.
pub fn render_table(report: &ReconReport) -> String {
    let headers = ["especie", "estado", "nombre_encontrado"];
    let rows: Vec<[String; 3]> = result_rows(report)
        .into_iter()
        .map(|r| [r.especie, r.estado, r.nombre_encontrado])
        .collect();

    let mut widths = headers.map(|h| h.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width()).min(MAX_CELL_WIDTH);
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let padded: Vec<String> = cells.iter().zip(widths).map(|(c, w)| pad_right(c, *w)).collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Pad to `width` display columns, or cut with ".." when wider.
fn pad_right(s: &str, width: usize) -> String {
    let sw = s.width();
    if sw <= width {
        return format!("{}{}", s, " ".repeat(width - sw));
    }
    if width < 3 {
        return s.chars().take_while(|c| c.width().unwrap_or(0) <= width).take(1).collect();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut cut = String::new();
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        cut.push(ch);
    }
    cut.push_str("..");
    format!("{}{}", cut, " ".repeat(width - (used + 2)))
}
