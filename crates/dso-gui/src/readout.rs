use dso_core::measure;
use dso_core::settings::{ScopeSettings, ViewSettings};
use dso_core::snapshot::CaptureSnapshot;

use crate::color32;

/// The settings line above the main scope: software-trigger status, trigger
/// summary, record, samplerate and base labels.
pub fn settings_bar(
    ui: &mut egui::Ui,
    scope: &ScopeSettings,
    view: &ViewSettings,
    snapshot: Option<&CaptureSnapshot>,
) {
    let summary = measure::settings_summary(scope);
    let trigger_colour = view
        .screen
        .voltage
        .get(scope.trigger.source)
        .copied()
        .unwrap_or(view.screen.text);

    ui.horizontal(|ui| {
        if let Some(snapshot) = snapshot {
            let status = if snapshot.software_trigger_triggered {
                egui::Color32::GREEN
            } else {
                egui::Color32::RED
            };
            ui.colored_label(status, "TR");
        }
        ui.colored_label(color32(trigger_colour), measure::trigger_summary(scope));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(summary.frequencybase);
            ui.label(summary.timebase);
            ui.label(summary.samplerate);
            ui.label(summary.record_length);
        });
    });
}

/// The marker line between the main and zoom scopes.
pub fn marker_bar(ui: &mut egui::Ui, scope: &ScopeSettings, view: &ViewSettings) {
    let details = measure::marker_details(scope, view.zoom);
    ui.horizontal(|ui| {
        ui.label(details.info);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(frequencybase) = details.frequencybase {
                ui.label(frequencybase);
            }
            if let Some(timebase) = details.timebase {
                ui.label(timebase);
            }
            ui.label(details.frequency);
            ui.label(details.time);
        });
    });
}

/// The measurement table under the scopes: one row per channel in use.
pub fn measurement_table(
    ui: &mut egui::Ui,
    scope: &ScopeSettings,
    view: &ViewSettings,
    snapshot: Option<&CaptureSnapshot>,
) {
    let rows = measure::measurement_rows(scope, snapshot);
    egui::Grid::new("measurements")
        .num_columns(6)
        .spacing([16.0, 2.0])
        .show(ui, |ui| {
            for row in rows {
                let voltage_colour = view
                    .screen
                    .voltage
                    .get(row.channel)
                    .copied()
                    .unwrap_or(view.screen.text);
                let spectrum_colour = view
                    .screen
                    .spectrum
                    .get(row.channel)
                    .copied()
                    .unwrap_or(view.screen.text);

                ui.colored_label(color32(voltage_colour), &row.name);
                ui.colored_label(color32(voltage_colour), &row.misc);
                ui.label(row.gain.as_deref().unwrap_or(""));
                ui.colored_label(
                    color32(spectrum_colour),
                    row.magnitude.as_deref().unwrap_or(""),
                );
                ui.label(row.amplitude.as_deref().unwrap_or(""));
                ui.label(row.frequency.as_deref().unwrap_or(""));
                ui.end_row();
            }
        });
}
