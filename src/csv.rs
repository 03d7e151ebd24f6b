// src/csv.rs
use std::fs::File;
use std::io::{self, Read, Write};
use std::mem::take;
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant). std-only.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
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
            ',' if !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !row.is_empty() && !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Split off the header row if the first cell says "Timestamp".
pub fn detect_headers(mut rows: Vec<Vec<String>>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    if rows.is_empty() { return (None, rows); }
    let first = &rows[0];
    if !first.is_empty() && first[0].eq_ignore_ascii_case("timestamp") {
        let header = rows.remove(0);
        return (Some(header), rows);
    }
    (None, rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, ",")?; } else { first = false; }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

pub fn to_csv_string(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut buf = Vec::new();
    let _ = write_row(&mut buf, headers);
    for row in rows {
        let _ = write_row(&mut buf, row);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/* ---------------- File I/O (plain and gzip) ---------------- */

/// Read a `.csv` or `.csv.gz` file into text, by extension.
pub fn read_to_string(path: &Path) -> io::Result<String> {
    let is_gz = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    let mut text = s!();
    if is_gz {
        let file = File::open(path)?;
        GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        File::open(path)?.read_to_string(&mut text)?;
    }
    Ok(text)
}

/// Decompress in-memory gzip bytes into text (remote downloads).
pub fn gunzip_to_string(bytes: &[u8]) -> io::Result<String> {
    let mut text = s!();
    GzDecoder::new(bytes).read_to_string(&mut text)?;
    Ok(text)
}

/// Write CSV text to `path`, gzip-compressed when it ends in `.gz`.
pub fn write_text(path: &Path, text: &str) -> io::Result<()> {
    let is_gz = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gz {
        let file = File::create(path)?;
        let mut enc = GzEncoder::new(file, Compression::default());
        enc.write_all(text.as_bytes())?;
        enc.finish()?;
    } else {
        std::fs::write(path, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_handles_quoted_json_cell() {
        let text = "a,\"[{\"\"filled\"\":true}]\",c\n";
        let rows = parse_rows(text);
        assert_eq!(rows, vec![vec![s!("a"), s!(r#"[{"filled":true}]"#), s!("c")]]);
    }

    #[test]
    fn write_quotes_commas_and_quotes() {
        let mut buf = Vec::new();
        write_row(&mut buf, &[s!("a,b"), s!("say \"hi\"")]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn header_detection_by_timestamp_cell() {
        let rows = vec![
            vec![s!("Timestamp"), s!("ID")],
            vec![s!("2025-06-01 18:45:00"), s!("1")],
        ];
        let (h, r) = detect_headers(rows);
        assert_eq!(h.unwrap()[0], "Timestamp");
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn row_round_trips_through_writer_and_parser() {
        let row = vec![s!("2025-06-01 18:45:00"), s!(r#"[{"job":"WHM SGE"}]"#), s!("plain")];
        let mut buf = Vec::new();
        write_row(&mut buf, &row).unwrap();
        let parsed = parse_rows(&String::from_utf8(buf).unwrap());
        assert_eq!(parsed, vec![row]);
    }
}
