// src/sheets.rs
//
// Pull the spreadsheet-backed store into local .csv.gz exports.
// One worksheet per UTC date, titled YYYY-MM-DD; we sync yesterday and
// today. Service-account auth via the OAuth2 JWT-bearer flow.

use std::error::Error;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::consts::{DATE_FMT, SHEETS_SCOPE};
use crate::config::options::SyncOptions;
use crate::progress::Progress;
use crate::store;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn Error>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read credentials {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange an RS256-signed service-account JWT for an access token.
pub fn access_token(
    client: &reqwest::blocking::Client,
    key: &ServiceAccountKey,
) -> Result<String, Box<dyn Error>> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + 3600,
    };
    let jwt = jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &EncodingKey::from_rsa_pem(key.private_key.as_bytes())?,
    )?;

    let resp: TokenResponse = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &jwt)])
        .send()?
        .error_for_status()?
        .json()?;
    Ok(resp.access_token)
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// All cell values of the worksheet titled `title`, or None if the
/// spreadsheet has no such sheet.
fn worksheet_values(
    client: &reqwest::blocking::Client,
    token: &str,
    spreadsheet_id: &str,
    title: &str,
) -> Result<Option<Vec<Vec<String>>>, Box<dyn Error>> {
    let url = format!(
        "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}",
        spreadsheet_id, title
    );
    let resp = client.get(&url).bearer_auth(token).send()?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        if is_missing_sheet(status.as_u16(), &body) {
            return Ok(None);
        }
        // Anything else (bad spreadsheet id, revoked token) is a real error.
        return Err(format!("Sheets API error {}: {}", status, body).into());
    }
    let range: ValueRange = resp.json()?;

    let rows = range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect();
    Ok(Some(rows))
}

/// A worksheet absent from the spreadsheet comes back as a 400 with
/// "Unable to parse range" in the error body.
fn is_missing_sheet(status: u16, body: &str) -> bool {
    status == 400 && body.contains("Unable to parse range")
}

fn cell_to_string(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::String(st) => st,
        other => other.to_string(),
    }
}

/// Reorder worksheet rows into canonical column order by header name.
/// Rows shorter than the header are padded so the row parser reports
/// them instead of panicking.
fn shape_rows(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    if rows.is_empty() {
        return rows;
    }
    let header = rows.remove(0);
    let index_of = |name: &str| header.iter().position(|h| h.trim() == name);
    let order: Vec<Option<usize>> = store::headers().iter().map(|h| index_of(h)).collect();

    rows.into_iter()
        .map(|row| {
            order
                .iter()
                .map(|ix| ix.and_then(|i| row.get(i)).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Sync yesterday's and today's worksheets into `out_dir` as .csv.gz.
/// Missing worksheets and malformed rows are skipped with warnings.
pub fn run(
    opts: &SyncOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if opts.spreadsheet_id.is_empty() {
        return Err("Missing spreadsheet id".into());
    }

    let key = ServiceAccountKey::from_file(&opts.creds_file)?;
    let client = reqwest::blocking::Client::builder()
        .user_agent("pftrack/0.3")
        .build()?;
    let token = access_token(&client, &key)?;

    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);

    let mut written = Vec::new();
    for date in [yesterday, today] {
        match sync_day(&client, &token, opts, date)? {
            Some(path) => {
                logf!("Sync: saved {}", path.display());
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Saved {}", path.display()));
                    p.item_done();
                }
                written.push(path);
            }
            None => {
                logw!("Sync: sheet for {} not found, skipping", date);
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Sheet for {} not found — skipping", date));
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(written)
}

fn sync_day(
    client: &reqwest::blocking::Client,
    token: &str,
    opts: &SyncOptions,
    date: NaiveDate,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let title = date.format(DATE_FMT).to_string();
    let Some(values) = worksheet_values(client, token, &opts.spreadsheet_id, &title)? else {
        return Ok(None);
    };

    let rows = shape_rows(values);
    let listings = store::dedup(store::rows_to_listings(&rows, &title));
    let path = store::write_day_gz(&opts.out_dir, &title, &listings)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> serde_json::Value {
        serde_json::Value::String(s!(s))
    }

    #[test]
    fn cells_stringify_numbers_without_quotes() {
        assert_eq!(cell_to_string(serde_json::json!(42)), "42");
        assert_eq!(cell_to_string(v("x")), "x");
    }

    #[test]
    fn shape_rows_reorders_by_header_name() {
        let rows = vec![
            vec![s!("ID"), s!("Timestamp"), s!("Data Centre"), s!("Category"), s!("Duty"),
                 s!("Party (JSON)"), s!("[Practice]"), s!("[Loot]"),
                 s!("[Duty Completion]"), s!("[One Player per Job]")],
            vec![s!("7"), s!("2025-06-01 18:45:00"), s!("Light"), s!("HighEndDuty"), s!("TOP"),
                 s!("[]"), s!("0"), s!("1"), s!("0"), s!("0")],
        ];
        let shaped = shape_rows(rows);
        assert_eq!(shaped.len(), 1);
        assert_eq!(shaped[0][0], "2025-06-01 18:45:00");
        assert_eq!(shaped[0][1], "7");
        assert_eq!(shaped[0][7], "1"); // [Loot]
    }

    #[test]
    fn shape_rows_pads_short_rows() {
        let rows = vec![
            store::headers(),
            vec![s!("2025-06-01 18:45:00"), s!("7")],
        ];
        let shaped = shape_rows(rows);
        assert_eq!(shaped[0].len(), store::headers().len());
        assert_eq!(shaped[0][2], "");
    }

    #[test]
    fn only_unparseable_range_counts_as_missing() {
        let not_found = r#"{"error":{"code":400,"message":"Unable to parse range: 2025-06-01"}}"#;
        assert!(is_missing_sheet(400, not_found));

        // bad spreadsheet id
        assert!(!is_missing_sheet(404, r#"{"error":{"message":"Requested entity was not found."}}"#));
        // some other bad request
        assert!(!is_missing_sheet(400, r#"{"error":{"message":"Invalid value"}}"#));
    }

    #[test]
    fn token_response_shape() {
        let r: TokenResponse =
            serde_json::from_str(r#"{"access_token":"ya29.x","expires_in":3599,"token_type":"Bearer"}"#)
                .unwrap();
        assert_eq!(r.access_token, "ya29.x");
    }
}
