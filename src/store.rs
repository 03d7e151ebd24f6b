// src/store.rs
//
// Dated export files: exports/YYYY-MM-DD.csv (scraper, plain) and
// exports/YYYY-MM-DD.csv.gz (sheets sync / published history).
// Append-only accumulation; the single invariant is dedup by
// (Timestamp, ID), first occurrence wins.

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::consts::{CSV_HEADERS, DATE_FMT};
use crate::csv;
use crate::listing::Listing;
use crate::timeline::floor_bucket;

pub fn headers() -> Vec<String> {
    CSV_HEADERS.iter().map(|h| s!(*h)).collect()
}

pub fn day_file_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.csv", date.format(DATE_FMT)))
}

pub fn day_gz_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}.csv.gz", title))
}

fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Keep the first occurrence per (Timestamp, ID), preserving order.
pub fn dedup(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|l| seen.insert(l.key()))
        .collect()
}

/// Parse CSV rows into listings, best-effort: malformed rows are skipped
/// with a logged warning. Timestamps are floored to their bucket here,
/// since sheet-sourced rows may carry raw observation times.
pub fn rows_to_listings(rows: &[Vec<String>], origin: &str) -> Vec<Listing> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match Listing::from_row(row) {
            Ok(mut l) => {
                l.timestamp = floor_bucket(l.timestamp);
                out.push(l);
            }
            Err(e) => logw!("Store: bad row in {}: {}", origin, e),
        }
    }
    out
}

fn listings_to_csv(listings: &[Listing]) -> Result<String, Box<dyn Error>> {
    let mut rows = Vec::with_capacity(listings.len());
    for l in listings {
        rows.push(l.to_row()?);
    }
    Ok(csv::to_csv_string(&headers(), &rows))
}

/// Load one export file (`.csv` or `.csv.gz`). Headerless files are
/// tolerated.
pub fn load_file(path: &Path) -> Result<Vec<Listing>, Box<dyn Error>> {
    let text = csv::read_to_string(path)?;
    let (_h, rows) = csv::detect_headers(csv::parse_rows(&text));
    Ok(rows_to_listings(&rows, &path.display().to_string()))
}

/// Append listings to the day file for their bucket date. Existing rows
/// win on key collision, so re-running a pass is idempotent.
/// Returns the path and how many rows were actually new.
pub fn append_day_file(
    dir: &Path,
    listings: &[Listing],
) -> Result<(PathBuf, usize), Box<dyn Error>> {
    let first = listings.first().ok_or("No listings to append")?;
    ensure_directory(dir)?;
    let path = day_file_path(dir, first.timestamp.date());

    let existing = if path.exists() { load_file(&path)? } else { Vec::new() };
    let mut merged = dedup(existing);
    let before = merged.len();
    merged.extend(listings.iter().cloned());
    let merged = dedup(merged);
    let added = merged.len() - before;

    csv::write_text(&path, &listings_to_csv(&merged)?)?;
    Ok((path, added))
}

/// Write a full day snapshot as `<title>.csv.gz` (sheets sync output).
pub fn write_day_gz(
    dir: &Path,
    title: &str,
    listings: &[Listing],
) -> Result<PathBuf, Box<dyn Error>> {
    ensure_directory(dir)?;
    let path = day_gz_path(dir, title);
    csv::write_text(&path, &listings_to_csv(listings)?)?;
    Ok(path)
}

/// Load every export file in `dir` (both `.csv` and `.csv.gz`), merged,
/// deduped, and sorted by timestamp. Unreadable files are skipped with a
/// warning.
pub fn load_dir(dir: &Path) -> Result<Vec<Listing>, Box<dyn Error>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    if dir.exists() {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() { continue; }
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if name.ends_with(".csv") || name.ends_with(".csv.gz") {
                paths.push(path);
            }
        }
    }
    paths.sort();

    let mut all = Vec::new();
    for path in &paths {
        match load_file(path) {
            Ok(mut l) => all.append(&mut l),
            Err(e) => logw!("Store: skipping {}: {}", path.display(), e),
        }
    }

    let mut all = dedup(all);
    all.sort_by_key(|l| l.timestamp);
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{parse_timestamp, Role, Slot, Tags};

    fn listing(ts: &str, id: u64) -> Listing {
        Listing {
            timestamp: parse_timestamp(ts).unwrap(),
            id,
            data_centre: s!("Light"),
            category: s!("HighEndDuty"),
            duty: s!("The Omega Protocol"),
            party: vec![Slot { filled: false, role: Role::Dps, job: s!("BLM") }],
            tags: Tags::default(),
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let a = listing("2025-06-01 18:45:00", 1);
        let mut b = a.clone();
        b.duty = s!("changed");
        let c = listing("2025-06-01 19:00:00", 1);

        let out = dedup(vec![a.clone(), b, c.clone()]);
        assert_eq!(out, vec![a, c]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let v = vec![
            listing("2025-06-01 18:45:00", 1),
            listing("2025-06-01 18:45:00", 1),
            listing("2025-06-01 18:45:00", 2),
        ];
        let once = dedup(v);
        let twice = dedup(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn day_paths() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(
            day_file_path(Path::new("exports"), d),
            PathBuf::from("exports/2025-06-01.csv")
        );
        assert_eq!(
            day_gz_path(Path::new("exports"), "2025-06-01"),
            PathBuf::from("exports/2025-06-01.csv.gz")
        );
    }

    #[test]
    fn raw_timestamps_are_floored_on_load() {
        let mut l = listing("2025-06-01 18:45:00", 1);
        l.timestamp = parse_timestamp("2025-06-01 18:47:23").unwrap();

        let out = rows_to_listings(&[l.to_row().unwrap()], "test");
        assert_eq!(out[0].timestamp, parse_timestamp("2025-06-01 18:45:00").unwrap());
    }

    #[test]
    fn bad_rows_are_skipped() {
        let rows = vec![
            listing("2025-06-01 18:45:00", 1).to_row().unwrap(),
            vec![s!("not a timestamp")],
        ];
        let out = rows_to_listings(&rows, "test");
        assert_eq!(out.len(), 1);
    }
}
