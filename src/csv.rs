// src/csv.rs
use std::io::{self, Write};

use crate::model::{FilterMap, LightingFilter};

/// Spreadsheet columns, `id` first, then every canonical field.
pub const SHEET_COLUMNS: [&str; 10] = [
    "id",
    "brand",
    "name",
    "description",
    "rgb",
    "transmission",
    "spectral_distribution",
    "source_a",
    "source_c",
    "source_d65",
];

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Filter rows ---------------- */

/// One spreadsheet row. CIE points as `(x, y, Y)`, RGB as hex,
/// spectral data only as a presence flag. Missing values are empty cells.
pub fn filter_row(id: &str, f: &LightingFilter) -> Vec<String> {
    let opt = |v: Option<String>| v.unwrap_or_default();
    vec![
        s!(id),
        f.brand.clone(),
        f.name.clone(),
        f.description.clone(),
        f.rgb.to_hex(),
        opt(f.transmission.map(|t| t.to_string())),
        f.spectral_distribution.is_some().to_string(),
        opt(f.source_a.map(|c| c.to_coords())),
        opt(f.source_c.map(|c| c.to_coords())),
        opt(f.source_d65.map(|c| c.to_coords())),
    ]
}

/// Whole spreadsheet as text, rows in filter-ID order.
pub fn to_sheet_string(filters: &FilterMap, include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let header: Vec<String> = SHEET_COLUMNS.iter().map(|c| s!(*c)).collect();
        let _ = write_row(&mut buf, &header, sep);
    }
    for (id, f) in filters {
        let _ = write_row(&mut buf, &filter_row(id, f), sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::take;
    use crate::model::filter::sample_filter;

    /// Minimal CSV/TSV parser (quotes + CRLF tolerant).
    fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut field = s!();
        let mut row = Vec::new();
        let mut in_quotes = false;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '"' => {
                    if in_quotes {
                        if matches!(chars.peek(), Some('"')) {
                            chars.next(); // double-quote escape
                            field.push('"');
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        in_quotes = true;
                    }
                }
                c if c == sep && !in_quotes => {
                    row.push(take(&mut field));
                }
                '\n' | '\r' if !in_quotes => {
                    if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                    row.push(take(&mut field));
                    if !(row.len() == 1 && row[0].is_empty()) {
                        rows.push(take(&mut row));
                    } else {
                        row.clear();
                    }
                }
                _ => field.push(ch),
            }
        }

        // Trailing row without a newline
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            rows.push(row);
        }

        rows
    }

    #[test]
    fn quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &[s!("R02"), s!("Warm, soft"), s!("say \"hi\"")], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "R02,\"Warm, soft\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn sheet_rows_sorted_by_id_and_rendered() {
        let mut map = FilterMap::new();
        map.insert(s!("R02"), sample_filter("Roscolux"));
        map.insert(s!("L002"), sample_filter("Lee"));

        let text = to_sheet_string(&map, true, ',');
        let rows = parse_rows(&text, ',');
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], SHEET_COLUMNS.iter().map(|c| s!(*c)).collect::<Vec<_>>());
        assert_eq!(rows[1][0], "L002");
        assert_eq!(rows[2][0], "R02");
        assert_eq!(rows[1][4], "#fac8a0");
        assert_eq!(rows[1][5], "0.7");
        assert_eq!(rows[1][6], "false");
        assert_eq!(rows[1][7], "");
        assert_eq!(rows[1][8], "(0.3695, 0.3612, 68)");
    }

    #[test]
    fn tsv_without_headers() {
        let mut map = FilterMap::new();
        map.insert(s!("L002"), sample_filter("Lee"));
        let text = to_sheet_string(&map, false, '\t');
        assert!(text.starts_with("L002\tLee\t"));
        assert_eq!(parse_rows(&text, '\t').len(), 1);
    }
}
