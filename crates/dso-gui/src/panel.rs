use dso_core::measure::{self, CursorReadout};
use dso_core::settings::{ChannelMode, ScopeSettings, ViewSettings};
use dso_core::view::{DIVS_TIME, MARKER_COUNT, MARKER_STEP};

use crate::color32;

/// What the cursor panel changed this frame.
#[derive(Debug, Default)]
pub struct PanelResponse {
    /// A cursor shape or position changed; the marker buffer needs a rewrite.
    pub markers_changed: bool,
    /// The user picked another cursor to interact with.
    pub selection_changed: bool,
}

/// The cursor column: one selector per cursor with its shape toggle and delta
/// readouts. Selector order matches the marker-set index order.
pub fn cursor_panel(
    ui: &mut egui::Ui,
    scope: &mut ScopeSettings,
    view: &ViewSettings,
    selected_cursor: &mut usize,
) -> PanelResponse {
    let mut response = PanelResponse::default();

    // Global marker pair.
    let details = measure::marker_details(scope, view.zoom);
    if ui.selectable_label(*selected_cursor == 0, "Markers").clicked() {
        *selected_cursor = 0;
        response.selection_changed = true;
    }
    ui.horizontal(|ui| {
        ui.label(&details.delta_x);
        ui.label(&details.delta_y);
    });
    ui.separator();

    let voltage_count = scope.voltage.len();
    for channel in 0..voltage_count {
        let index = 1 + channel;
        let colour = view
            .screen
            .voltage
            .get(channel)
            .copied()
            .unwrap_or(view.screen.text);
        let readout = measure::voltage_cursor_readout(scope, channel);
        channel_cursor_row(
            ui,
            &scope.voltage[channel].name.clone(),
            colour,
            index,
            selected_cursor,
            readout,
            scope.voltage[channel].used,
            || scope.voltage[channel].cursor.toggle_shape(),
            &mut response,
        );
    }
    ui.separator();
    for channel in 0..scope.spectrum.len() {
        let index = 1 + voltage_count + channel;
        let colour = view
            .screen
            .spectrum
            .get(channel)
            .copied()
            .unwrap_or(view.screen.text);
        let readout = measure::spectrum_cursor_readout(scope, channel);
        channel_cursor_row(
            ui,
            &format!(
                "{} {}",
                scope.spectrum[channel].name,
                ChannelMode::Spectrum.label()
            ),
            colour,
            index,
            selected_cursor,
            readout,
            scope.spectrum[channel].used,
            || scope.spectrum[channel].cursor.toggle_shape(),
            &mut response,
        );
    }

    response
}

#[allow(clippy::too_many_arguments)]
fn channel_cursor_row(
    ui: &mut egui::Ui,
    name: &str,
    colour: dso_core::settings::Color,
    index: usize,
    selected_cursor: &mut usize,
    readout: Option<CursorReadout>,
    used: bool,
    toggle: impl FnOnce(),
    response: &mut PanelResponse,
) {
    ui.horizontal(|ui| {
        let label = egui::RichText::new(name).color(color32(colour));
        if ui
            .add_enabled(used, egui::SelectableLabel::new(*selected_cursor == index, label))
            .clicked()
        {
            *selected_cursor = index;
            response.selection_changed = true;
        }
        let tag = readout.as_ref().map(|r| r.tag).unwrap_or("OFF");
        if ui.add_enabled(used, egui::Button::new(tag)).clicked() {
            toggle();
            response.markers_changed = true;
        }
    });
    if let Some(readout) = readout {
        ui.horizontal(|ui| {
            if let Some(dx) = &readout.delta_x {
                ui.label(dx);
            }
            if let Some(dy) = &readout.delta_y {
                ui.label(dy);
            }
        });
    }
}

/// The marker slider row under the main scope: both global markers, quantized
/// to the marker step across the full time axis.
pub fn marker_sliders(ui: &mut egui::Ui, scope: &mut ScopeSettings) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        for marker in 0..MARKER_COUNT {
            let mut value = scope.marker(marker);
            let slider = egui::Slider::new(&mut value, -DIVS_TIME / 2.0..=DIVS_TIME / 2.0)
                .step_by(MARKER_STEP)
                .text(format!("{}", marker + 1));
            if ui.add(slider).changed() {
                scope.set_marker(marker, value);
                changed = true;
            }
        }
    });
    changed
}
