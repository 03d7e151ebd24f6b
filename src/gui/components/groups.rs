// src/gui/components/groups.rs
use eframe::egui;

use crate::gui::app::App;
use crate::jobs;

/// Job group editor. Returns true when anything changed.
pub fn draw(app: &mut App, ui: &mut egui::Ui) -> bool {
    let mut changed = false;

    ui.heading("Job Groups");

    ui.horizontal(|ui| {
        if ui.button("Add Group").clicked() {
            app.state.gui.job_groups.push(Vec::new());
            changed = true;
        }
        if ui.button("Remove Group").clicked() && !app.state.gui.job_groups.is_empty() {
            app.state.gui.job_groups.pop();
            changed = true;
        }
    });

    ui.label("Quick add by role");
    ui.horizontal_wrapped(|ui| {
        for (role, preset) in jobs::ROLE_PRESETS {
            if ui.button(*role).clicked() {
                app.state.gui.job_groups.push(preset.iter().map(|j| s!(*j)).collect());
                changed = true;
            }
        }
    });

    for (i, group) in app.state.gui.job_groups.iter_mut().enumerate() {
        let color = jobs::blend(group.iter().map(|j| j.as_str()));
        ui.separator();
        ui.colored_label(
            egui::Color32::from_rgb(color[0], color[1], color[2]),
            format!("Group {}", i + 1),
        );

        // toggles for jobs present in the filtered data
        ui.horizontal_wrapped(|ui| {
            for job in &app.observed_jobs {
                let on = group.contains(job);
                if ui.selectable_label(on, job).clicked() {
                    if on {
                        group.retain(|j| j != job);
                    } else {
                        group.push(job.clone());
                    }
                    changed = true;
                }
            }
        });
    }

    if app.state.gui.job_groups.iter().all(|g| g.is_empty()) {
        ui.separator();
        ui.label("Add at least one job group to visualize.");
    }

    changed
}
