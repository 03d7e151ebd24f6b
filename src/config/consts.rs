// src/config/consts.rs

// Net config
pub const HOST: &str = "xivpf.com";
pub const PAGE_PATH: &str = "/";

// Local cache
pub const LOG_FILE: &str = ".store/debug.log";

// Exports
pub const DEFAULT_EXPORT_DIR: &str = "exports";
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FMT: &str = "%Y-%m-%d";

// Observation buckets
pub const BUCKET_MINUTES: u32 = 15;

// Sheets sync
pub const DEFAULT_CREDS_FILE: &str = "google_credentials.json";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

// Published history (dashboard download)
pub const REMOTE_REPO: &str = "Rinn-K/PFTracker";
pub const REMOTE_BRANCH: &str = "main";
pub const REMOTE_FOLDER: &str = "exports";

// CSV header, in column order
pub const CSV_HEADERS: [&str; 10] = [
    "Timestamp",
    "ID",
    "Data Centre",
    "Category",
    "Duty",
    "Party (JSON)",
    "[Practice]",
    "[Loot]",
    "[Duty Completion]",
    "[One Player per Job]",
];
