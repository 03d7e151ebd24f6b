// src/remote.rs
//
// Published history: list the exports folder through the GitHub contents
// API, download every .csv.gz raw file, and parse it into listings.

use std::error::Error;

use serde::Deserialize;

use crate::config::options::RemoteOptions;
use crate::csv;
use crate::listing::Listing;
use crate::progress::Progress;
use crate::store;

#[derive(Deserialize)]
struct ContentEntry {
    name: String,
}

fn client() -> Result<reqwest::blocking::Client, Box<dyn Error>> {
    // GitHub rejects requests without a User-Agent.
    Ok(reqwest::blocking::Client::builder()
        .user_agent("pftrack/0.3")
        .build()?)
}

/// Names of the .csv.gz exports currently published, sorted (they are
/// dated, so name order is date order).
pub fn list_exports(
    client: &reqwest::blocking::Client,
    opts: &RemoteOptions,
) -> Result<Vec<String>, Box<dyn Error>> {
    let url = format!(
        "https://api.github.com/repos/{}/contents/{}?ref={}",
        opts.repo, opts.folder, opts.branch
    );
    let entries: Vec<ContentEntry> = client.get(&url).send()?.error_for_status()?.json()?;

    let mut names: Vec<String> = entries
        .into_iter()
        .map(|e| e.name)
        .filter(|n| n.ends_with(".csv.gz"))
        .collect();
    names.sort();
    Ok(names)
}

fn download_export(
    client: &reqwest::blocking::Client,
    opts: &RemoteOptions,
    name: &str,
) -> Result<Vec<Listing>, Box<dyn Error>> {
    let url = format!(
        "https://raw.githubusercontent.com/{}/{}/{}/{}",
        opts.repo, opts.branch, opts.folder, name
    );
    let bytes = client.get(&url).send()?.error_for_status()?.bytes()?;
    let text = csv::gunzip_to_string(&bytes)?;
    let (_h, rows) = csv::detect_headers(csv::parse_rows(&text));
    Ok(store::rows_to_listings(&rows, name))
}

/// Download the whole published history, merged and deduped. Individual
/// file failures are skipped with a warning.
pub fn fetch_all(
    opts: &RemoteOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Listing>, Box<dyn Error>> {
    let client = client()?;
    let names = list_exports(&client, opts)?;
    logf!("Remote: {} export files in {}", names.len(), opts.repo);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(names.len());
    }

    let mut all = Vec::new();
    for name in &names {
        match download_export(&client, opts, name) {
            Ok(mut l) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Loaded {} ({} rows)", name, l.len()));
                    p.item_done();
                }
                all.append(&mut l);
            }
            Err(e) => logw!("Remote: skipping {}: {}", name, e),
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let mut all = store::dedup(all);
    all.sort_by_key(|l| l.timestamp);
    Ok(all)
}
