use std::sync::{Arc, Mutex};

use dso_core::mapper::{pixel_to_division, MarkerEvent, PointerTracker};
use dso_core::settings::{ScopeSettings, ViewSettings};
use dso_core::snapshot::CaptureSnapshot;
use dso_render::ScopeRenderer;

use crate::color32;

/// The interactive scope surface as an egui widget.
///
/// Rendering happens inside an `egui::PaintCallback` on egui's glow painter,
/// so the renderer sits behind an `Arc<Mutex>` shared with the callback. All
/// cursor interaction is decoded here and applied through the pointer
/// tracker; the zoomed twin ignores the pointer entirely.
pub struct ScopeView {
    renderer: Arc<Mutex<ScopeRenderer>>,
    tracker: PointerTracker,
    zoomed: bool,
    pending: Option<Arc<CaptureSnapshot>>,
    last_pointer: Option<glam::DVec2>,
}

impl ScopeView {
    /// The interactive main view.
    pub fn main() -> Self {
        Self {
            renderer: Arc::new(Mutex::new(ScopeRenderer::main())),
            tracker: PointerTracker::new(),
            zoomed: false,
            pending: None,
            last_pointer: None,
        }
    }

    /// The magnified view driven by the marker pair.
    pub fn zoomed() -> Self {
        Self {
            renderer: Arc::new(Mutex::new(ScopeRenderer::zoomed())),
            tracker: PointerTracker::new(),
            zoomed: true,
            pending: None,
            last_pointer: None,
        }
    }

    /// Queue a freshly produced capture; its trace buffers are written during
    /// the next paint.
    pub fn on_frame_ready(&mut self, snapshot: Arc<CaptureSnapshot>) {
        self.pending = Some(snapshot);
    }

    /// Route pointer interaction to another cursor.
    pub fn select_cursor(&mut self, index: usize) {
        self.tracker.select_cursor(index);
    }

    pub fn selected_cursor(&self) -> usize {
        self.tracker.selected_cursor()
    }

    /// Force marker quad regeneration before the next draw; call after any
    /// cursor mutation made outside this view (shape toggles, sliders).
    pub fn invalidate_markers(&self) {
        if let Ok(mut renderer) = self.renderer.lock() {
            renderer.invalidate_markers();
        }
    }

    /// Lay out the surface, process pointer interaction and schedule the GL
    /// paint. Returns the marker movements this frame so labels and sliders
    /// can follow.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        scope: &mut ScopeSettings,
        view: &ViewSettings,
    ) -> Vec<MarkerEvent> {
        let size = ui.available_size().max(egui::Vec2::new(200.0, 150.0));
        let sense = if self.zoomed {
            egui::Sense::hover()
        } else {
            egui::Sense::drag()
        };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        let mut events = Vec::new();
        if !self.zoomed {
            if let Some(pos) = response.interact_pointer_pos() {
                let division = pixel_to_division(
                    (pos.x - rect.left()) as f64,
                    (pos.y - rect.top()) as f64,
                    rect.width() as f64,
                    rect.height() as f64,
                );
                self.last_pointer = Some(division);
                if response.drag_started() {
                    events.extend(self.tracker.on_pointer_down(scope, division));
                } else if response.dragged() {
                    events.extend(self.tracker.on_pointer_moved(scope, division));
                }
            }
            if response.drag_stopped() {
                if let Some(division) = self.last_pointer.take() {
                    events.extend(self.tracker.on_pointer_up(scope, division));
                }
            }
        }

        let mut renderer = match self.renderer.lock() {
            Ok(renderer) => renderer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !events.is_empty() {
            renderer.invalidate_markers();
        }

        // A failed surface paints its message instead of scheduling GL work.
        if let Some(message) = renderer.error_message() {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                message.to_string(),
                egui::FontId::proportional(16.0),
                color32(view.screen.text),
            );
            return events;
        }
        drop(renderer);

        let renderer = self.renderer.clone();
        let pending = self.pending.take();
        let scope_frame = scope.clone();
        let view_frame = view.clone();
        let selected_cursor = self.tracker.selected_cursor();

        let callback = egui_glow::CallbackFn::new(move |info, painter| {
            let gl = painter.gl();
            let vp = info.viewport_in_pixels();
            let viewport = [vp.left_px, vp.from_bottom_px, vp.width_px, vp.height_px];

            let mut renderer = match renderer.lock() {
                Ok(renderer) => renderer,
                Err(poisoned) => poisoned.into_inner(),
            };
            renderer.ensure_initialized(gl, &scope_frame);
            if let Some(snapshot) = &pending {
                renderer.show_frame(gl, snapshot, &view_frame);
            }
            renderer.render(gl, &scope_frame, &view_frame, selected_cursor, viewport);
        });
        ui.painter().add(egui::PaintCallback {
            rect,
            callback: Arc::new(callback),
        });

        events
    }
}
