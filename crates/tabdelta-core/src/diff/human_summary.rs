//! Human-readable summary renderer for diff results.

use crate::diff::highlight::{count_highlighted, is_highlighted};
use crate::diff::model::{DiffResult, Table, TableRef};
use crate::model::CellValue;
use std::fmt::Write;

/// Render a Markdown summary of a [`DiffResult`].
///
/// The summary is intended for review. It is informational only: flagged
/// cells are shown in bold and changed-row listings skip rows without a
/// flagged cell. The structured result is unaffected.
///
/// "No changes" is only claimed when the result is unchanged and no cell
/// is flagged, so a flagged cell is never hidden from the reader.
pub fn render_summary(result: &DiffResult) -> String {
    let mut out = String::new();

    out.push_str("## Table Diff\n\n");

    out.push_str("| Table | Rows |\n|---|---|\n");
    for (name, table) in result.named_tables() {
        let _ = writeln!(out, "| {} | {} |", name, table.len());
    }
    out.push('\n');

    if !result.warnings.is_empty() {
        out.push_str("### Warnings\n\n");
        for warning in &result.warnings {
            let _ = writeln!(out, "- `{}`: {}", warning.kind().code(), warning.message());
        }
        out.push('\n');
    }

    if result.is_unchanged() && count_highlighted(&result.changed_rows) == 0 {
        out.push_str("_No changes detected._\n");
        return out;
    }

    for (name, table) in result.named_tables() {
        match table {
            TableRef::Values(t) if !t.is_empty() => {
                let _ = writeln!(out, "### {}\n", title(name));
                render_values(&mut out, t);
                out.push('\n');
            }
            TableRef::Cells(t) => {
                let flagged: Vec<_> = t
                    .rows
                    .iter()
                    .filter(|r| r.cells.iter().any(is_highlighted))
                    .collect();
                if flagged.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "### {}\n", title(name));
                header(&mut out, &t.index, &t.columns);
                for row in flagged {
                    let cells = row.cells.iter().map(|c| {
                        let text = escape(&c.render());
                        if is_highlighted(c) && !text.is_empty() {
                            format!("**{}**", text)
                        } else {
                            text
                        }
                    });
                    line(&mut out, key_cells(&row.key.values()).chain(cells));
                }
                out.push('\n');
            }
            TableRef::Values(_) => {}
        }
    }

    out
}

fn title(name: &str) -> String {
    let mut words = name.split('_').map(|w| {
        let mut chars = w.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        }
    });
    let first = words.next().unwrap_or_default();
    words.fold(first, |acc, w| acc + " " + &w.to_lowercase())
}

fn render_values(out: &mut String, table: &Table<CellValue>) {
    header(out, &table.index, &table.columns);
    for row in &table.rows {
        let cells = row.cells.iter().map(|c| escape(&c.to_string()));
        line(out, key_cells(&row.key.values()).chain(cells));
    }
}

fn key_cells(values: &[CellValue]) -> impl Iterator<Item = String> + '_ {
    values.iter().map(|v| escape(&v.to_string()))
}

fn header(out: &mut String, index: &[String], columns: &[String]) {
    line(out, index.iter().chain(columns).map(|c| escape(c)));
    line(out, index.iter().chain(columns).map(|_| "---".to_string()));
}

fn line(out: &mut String, cells: impl Iterator<Item = String>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&cell);
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
