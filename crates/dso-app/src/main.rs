use std::sync::Arc;
use std::time::Duration;

use dso_core::measure;
use dso_core::settings::{Interpolation, ScopeSettings, ViewSettings};
use dso_core::snapshot::CaptureSnapshot;
use dso_core::zoom;
use dso_gui::{panel, readout, ScopeView, SnapshotSlot};

mod producer;
use producer::CaptureProducer;

struct DsoApp {
    scope: ScopeSettings,
    view: ViewSettings,
    main_scope: ScopeView,
    zoom_scope: ScopeView,
    slot: Arc<SnapshotSlot>,
    latest: Option<Arc<CaptureSnapshot>>,
    _producer: CaptureProducer,
}

impl DsoApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut scope = ScopeSettings::with_channels(2);
        scope.voltage[1].used = true;
        scope.set_marker(0, -2.0);
        scope.set_marker(1, 3.0);

        let view = ViewSettings::new(scope.voltage.len());
        let slot = Arc::new(SnapshotSlot::new());
        let producer = CaptureProducer::start(slot.clone(), scope.voltage.len());
        log::info!("started with {} voltage channels", scope.voltage.len());

        Self {
            scope,
            view,
            main_scope: ScopeView::main(),
            zoom_scope: ScopeView::zoomed(),
            slot,
            latest: None,
            _producer: producer,
        }
    }

    fn markers_changed(&self) {
        self.main_scope.invalidate_markers();
        self.zoom_scope.invalidate_markers();
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Cursors");
        let mut selected = self.main_scope.selected_cursor();
        let response = panel::cursor_panel(ui, &mut self.scope, &self.view, &mut selected);
        if response.selection_changed {
            self.main_scope.select_cursor(selected);
        }
        if response.markers_changed {
            self.markers_changed();
        }

        ui.separator();
        ui.heading("Channels");
        for channel in 0..self.scope.physical_channels {
            let name = self.scope.voltage[channel].name.clone();
            ui.checkbox(&mut self.scope.voltage[channel].used, name.clone());
            ui.checkbox(
                &mut self.scope.spectrum[channel].used,
                format!("{name} spectrum"),
            );
        }

        ui.separator();
        ui.heading("Trigger");
        ui.add(egui::Slider::new(&mut self.scope.trigger.position, 0.0..=1.0).text("Position"));

        ui.separator();
        ui.heading("Display");
        ui.checkbox(&mut self.view.zoom, "Zoom view");
        ui.checkbox(&mut self.view.digital_phosphor, "Digital phosphor");
        ui.add(
            egui::Slider::new(&mut self.view.digital_phosphor_depth, 1..=16).text("Depth"),
        );
        egui::ComboBox::from_label("Interpolation")
            .selected_text(self.view.interpolation.label())
            .show_ui(ui, |ui| {
                for mode in [
                    Interpolation::Off,
                    Interpolation::Linear,
                    Interpolation::Sinc,
                ] {
                    ui.selectable_value(&mut self.view.interpolation, mode, mode.label());
                }
            });
    }
}

impl eframe::App for DsoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One consumption point per UI frame; both views share the snapshot.
        if let Some(snapshot) = self.slot.take() {
            self.main_scope.on_frame_ready(snapshot.clone());
            self.zoom_scope.on_frame_ready(snapshot.clone());
            self.latest = Some(snapshot);
        }

        egui::TopBottomPanel::top("settings").show(ctx, |ui| {
            readout::settings_bar(ui, &self.scope, &self.view, self.latest.as_deref());
        });
        egui::SidePanel::right("cursors")
            .default_width(200.0)
            .show(ctx, |ui| self.side_panel(ui));
        egui::TopBottomPanel::bottom("measurements").show(ctx, |ui| {
            readout::measurement_table(ui, &self.scope, &self.view, self.latest.as_deref());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let reserved = if self.view.zoom { 80.0 } else { 60.0 };
            let main_height = if self.view.zoom {
                (ui.available_height() - reserved) / 2.0
            } else {
                ui.available_height() - reserved
            };

            let mut marker_moves = Vec::new();
            ui.allocate_ui(
                egui::Vec2::new(ui.available_width(), main_height.max(150.0)),
                |ui| {
                    marker_moves = self.main_scope.show(ui, &mut self.scope, &self.view);
                },
            );
            if !marker_moves.is_empty() {
                // The main view already invalidated itself; mirror into the
                // zoom view so its next frame sees the moved window.
                self.zoom_scope.invalidate_markers();
            }

            if panel::marker_sliders(ui, &mut self.scope) {
                self.markers_changed();
            }
            readout::marker_bar(ui, &self.scope, &self.view);

            if self.view.zoom {
                // The zoom view's trigger slider works in zoom coordinates
                // and is disabled when the trigger leaves the marker window.
                let adapted = measure::adapt_zoom_trigger_position(&self.scope);
                let mut value = adapted.value;
                let response = ui.add_enabled(
                    adapted.enabled,
                    egui::Slider::new(&mut value, 0.0..=1.0).text("Trigger"),
                );
                if response.changed() {
                    if let Some(position) = zoom::zoom_to_main(&self.scope, value) {
                        self.scope.trigger.position = position;
                    }
                }
                let _ = self.zoom_scope.show(ui, &mut self.scope, &self.view);
            }
        });

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DSO Scope")
            .with_inner_size([1100.0, 760.0]),
        multisampling: 4,
        ..Default::default()
    };
    eframe::run_native(
        "dso-scope",
        options,
        Box::new(|cc| Ok(Box::new(DsoApp::new(cc)))),
    )
}
