// src/gui/components/filters.rs
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::gui::app::App;
use crate::timeline::TagFilter;

/// Sidebar filter controls. Returns true when anything changed.
pub fn draw(app: &mut App, ui: &mut egui::Ui) -> bool {
    let mut changed = false;

    ui.heading("Filters");

    ui.horizontal(|ui| {
        ui.label("UTC offset");
        changed |= ui
            .add(
                egui::DragValue::new(&mut app.state.gui.tz_offset_min)
                    .speed(15)
                    .range(-720..=840)
                    .suffix(" min"),
            )
            .changed();
    });

    if let (Some(mut start), Some(mut end)) = (app.state.gui.start_date, app.state.gui.end_date) {
        ui.horizontal(|ui| {
            ui.label("Start date");
            if ui
                .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                .changed()
            {
                app.state.gui.start_date = Some(start);
                changed = true;
            }
        });
        ui.horizontal(|ui| {
            ui.label("End date");
            if ui
                .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                .changed()
            {
                app.state.gui.end_date = Some(end);
                changed = true;
            }
        });
    } else {
        ui.label("No data loaded yet.");
    }

    let selected = app.state.gui.selected_dc.clone().unwrap_or_default();
    egui::ComboBox::from_label("Data Centre")
        .selected_text(&selected)
        .show_ui(ui, |ui| {
            for dc in &app.data_centres {
                if ui
                    .selectable_label(app.state.gui.selected_dc.as_deref() == Some(dc), dc)
                    .clicked()
                {
                    app.state.gui.selected_dc = Some(dc.clone());
                    changed = true;
                }
            }
        });

    ui.collapsing("Duties", |ui| {
        for duty in &app.duties {
            let mut on = app.state.gui.selected_duties.contains(duty);
            if ui.checkbox(&mut on, duty).changed() {
                if on {
                    app.state.gui.selected_duties.push(duty.clone());
                } else {
                    app.state.gui.selected_duties.retain(|d| d != duty);
                }
                changed = true;
            }
        }
    });

    ui.label("Tag filter");
    for tag in TagFilter::ALL {
        changed |= ui
            .radio_value(&mut app.state.gui.tag_filter, tag, tag.label())
            .changed();
    }

    changed
}
