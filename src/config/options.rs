// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub host: String,
    pub path: String,
    pub out_dir: PathBuf,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            host: s!(HOST),
            path: s!(PAGE_PATH),
            out_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOptions {
    pub creds_file: PathBuf,
    pub spreadsheet_id: String,
    pub out_dir: PathBuf,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            creds_file: PathBuf::from(DEFAULT_CREDS_FILE),
            spreadsheet_id: s!(),
            out_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

/// Where the dashboard finds published history files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteOptions {
    pub repo: String,
    pub branch: String,
    pub folder: String,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            repo: s!(REMOTE_REPO),
            branch: s!(REMOTE_BRANCH),
            folder: s!(REMOTE_FOLDER),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub sync: SyncOptions,
    pub remote: RemoteOptions,
    /// Local directory the dashboard reads exports from.
    pub export_dir: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            scrape: ScrapeOptions::default(),
            sync: SyncOptions::default(),
            remote: RemoteOptions::default(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}
