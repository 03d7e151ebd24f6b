// src/gui/components/chart.rs
use chrono::DateTime;
use eframe::egui;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

use crate::gui::app::App;
use crate::jobs;

fn fmt_ts(secs: f64, fmt: &str) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

/// The per-bucket unfulfilled-listings chart plus the averages table.
pub fn draw(app: &mut App, ui: &mut egui::Ui) {
    ui.label(
        "How many parties are still looking for at least one job from each \
         group, per 15-minute bucket.",
    );

    if app.series.is_empty() {
        ui.separator();
        ui.label("Nothing to plot. Load data and define a job group.");
        return;
    }
    if app.series.iter().all(|s| s.points.is_empty()) {
        ui.separator();
        ui.label("No listings match the filters. Select at least one duty.");
        return;
    }

    let plot = Plot::new("unfulfilled")
        .legend(Legend::default().position(Corner::RightTop))
        .height(ui.available_height() * 0.75)
        .x_axis_formatter(|mark, _range| fmt_ts(mark.value, "%m-%d\n%H:%M"))
        .label_formatter(|name, point| {
            if name.is_empty() {
                fmt_ts(point.x, "%Y-%m-%d %H:%M")
            } else {
                format!("{}\n{}  {:.0}", name, fmt_ts(point.x, "%Y-%m-%d %H:%M"), point.y)
            }
        });

    plot.show(ui, |plot_ui| {
        for s in &app.series {
            let c = jobs::blend(s.jobs.iter().map(|j| j.as_str()));
            let points: PlotPoints = s
                .points
                .iter()
                .map(|(t, n)| [t.and_utc().timestamp() as f64, *n as f64])
                .collect();
            plot_ui.line(
                Line::new(format!("{}: {}", s.label, s.jobs.join(", ")), points)
                    .color(egui::Color32::from_rgb(c[0], c[1], c[2]))
                    .width(2.0),
            );
        }
    });

    ui.separator();
    ui.heading("Average listings per group (in time window)");
    for s in &app.series {
        let c = jobs::blend(s.jobs.iter().map(|j| j.as_str()));
        ui.colored_label(
            egui::Color32::from_rgb(c[0], c[1], c[2]),
            format!("{}: {:.2}", s.label, s.average),
        );
    }
}
