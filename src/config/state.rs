// src/config/state.rs
use chrono::NaiveDate;

use super::options::AppOptions;
use crate::timeline::TagFilter;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Display offset from UTC, in minutes. Session-only.
    pub tz_offset_min: i32,

    /// Date window over the loaded data; None until data is loaded.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    pub selected_dc: Option<String>,
    pub selected_duties: Vec<String>,
    pub tag_filter: TagFilter,

    /// User-defined job groups (lists of job abbreviations).
    pub job_groups: Vec<Vec<String>>,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            tz_offset_min: 0,
            start_date: None,
            end_date: None,
            selected_dc: None,
            selected_duties: Vec::new(),
            tag_filter: TagFilter::None,
            job_groups: vec![vec![s!("WHM"), s!("SGE")]],
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            options: AppOptions::default(),
            gui: GuiState::default(),
        }
    }
}
