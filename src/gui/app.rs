// src/gui/app.rs
use std::error::Error;
use std::sync::{Arc, Mutex};

use eframe::egui;

use crate::config::state::AppState;
use crate::listing::Listing;
use crate::timeline::{self, FilterSet, GroupSeries};

use super::{actions, components};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "PFTracker",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    /// Canonical loaded data: merged, deduped, sorted by bucket.
    pub listings: Vec<Listing>,

    // status line (progress sinks write here)
    pub status: Arc<Mutex<String>>,

    /// Set by any control change; cleared by recompute().
    pub dirty: bool,

    // derived caches, rebuilt by recompute()
    pub data_centres: Vec<String>,
    pub duties: Vec<String>,
    pub observed_jobs: Vec<String>,
    pub series: Vec<GroupSeries>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let mut app = Self {
            state,
            listings: Vec::new(),
            status: Arc::new(Mutex::new(s!("Idle"))),
            dirty: true,
            data_centres: Vec::new(),
            duties: Vec::new(),
            observed_jobs: Vec::new(),
            series: Vec::new(),
        };

        // local exports, if any, on startup
        actions::load::load_local(&mut app);
        logf!("Init: {} listings loaded", app.listings.len());
        app
    }

    pub fn status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Called after a data load: reset the date window to the loaded
    /// range and rebuild everything.
    pub fn on_data_loaded(&mut self) {
        let tz = self.state.gui.tz_offset_min;
        let dates: Vec<_> = self
            .listings
            .iter()
            .map(|l| timeline::local_bucket(l.timestamp, tz).date())
            .collect();
        self.state.gui.start_date = dates.iter().min().copied();
        self.state.gui.end_date = dates.iter().max().copied();
        self.dirty = true;
    }

    fn filter_set(&self) -> FilterSet {
        let g = &self.state.gui;
        FilterSet {
            start_date: g.start_date,
            end_date: g.end_date,
            data_centre: g.selected_dc.clone(),
            duties: Some(g.selected_duties.clone()),
            tag: g.tag_filter,
            tz_offset_min: g.tz_offset_min,
        }
    }

    /// Rebuild the derived caches. Filter stages narrow progressively:
    /// dates → data centres, +centre → duties, full set → jobs/series.
    pub fn recompute(&mut self) {
        self.dirty = false;
        let full = self.filter_set();

        let by_date = FilterSet {
            data_centre: None,
            duties: None,
            tag: timeline::TagFilter::None,
            ..full.clone()
        };
        let dated = by_date.apply(&self.listings);

        self.data_centres = unique_sorted(dated.iter().map(|l| l.data_centre.clone()));
        let dc_known = self
            .state
            .gui
            .selected_dc
            .as_ref()
            .is_some_and(|dc| self.data_centres.contains(dc));
        if !dc_known {
            self.state.gui.selected_dc = None;
        }
        if self.state.gui.selected_dc.is_none() {
            self.state.gui.selected_dc = self.data_centres.first().cloned();
        }

        let by_dc = FilterSet {
            data_centre: self.state.gui.selected_dc.clone(),
            duties: None,
            tag: timeline::TagFilter::None,
            ..full.clone()
        };
        let in_dc = by_dc.apply(&self.listings);
        self.duties = unique_sorted(in_dc.iter().map(|l| l.duty.clone()));
        self.state.gui.selected_duties.retain(|d| self.duties.contains(d));

        let full = self.filter_set();
        let filtered = full.apply(&self.listings);
        self.observed_jobs = timeline::observed_jobs(&filtered);

        let groups: Vec<(String, Vec<String>)> = self
            .state
            .gui
            .job_groups
            .iter()
            .enumerate()
            .filter(|(_, jobs)| !jobs.is_empty())
            .map(|(i, jobs)| (format!("Group {}", i + 1), jobs.clone()))
            .collect();
        self.series = timeline::build_series(&filtered, &groups, self.state.gui.tz_offset_min);
    }
}

fn unique_sorted(it: impl Iterator<Item = String>) -> Vec<String> {
    let mut v: Vec<String> = it.collect();
    v.sort();
    v.dedup();
    v
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.dirty {
            self.recompute();
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("PFTracker");
                ui.separator();
                if ui.button("Reload local exports").clicked() {
                    actions::load::load_local(self);
                }
                if ui.button("Download published history").clicked() {
                    actions::download::download_remote(self);
                }
                ui.separator();
                ui.label(self.status_text());
            });
        });

        egui::SidePanel::left("filters")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut changed = components::filters::draw(self, ui);
                    ui.separator();
                    changed |= components::groups::draw(self, ui);
                    if changed {
                        self.dirty = true;
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::chart::draw(self, ui);
        });
    }
}
