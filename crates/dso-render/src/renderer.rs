use glam::Mat4;
use glow::HasContext;

use dso_core::settings::{darker, GraphFormat, Interpolation, ScopeSettings, ViewSettings};
use dso_core::snapshot::CaptureSnapshot;

use crate::graph::TraceGraph;
use crate::grid::GridBuffers;
use crate::history::GraphHistory;
use crate::marker::MarkerBuffers;
use crate::matrix::{ortho_projection, zoom_matrix};
use crate::program::{FlatProgram, RendererError};

enum RendererState {
    /// Surface not ready yet; the first render call attempts initialization.
    Uninitialized,
    Ready(Box<ReadyState>),
    /// Initialization failed. Permanent for this surface: every draw, resize
    /// and show-frame call is a no-op and the message stays available for a
    /// textual overlay.
    Failed(String),
}

struct ReadyState {
    program: FlatProgram,
    grid: GridBuffers,
    markers: MarkerBuffers,
    history: GraphHistory<TraceGraph>,
    projection: Mat4,
    viewport_size: (i32, i32),
    markers_dirty: bool,
    embedded: bool,
}

/// The scope drawing surface: grid, markers, trace history. One instance per
/// surface; a zoomed instance re-projects the traces through the marker-pair
/// window and never draws markers.
///
/// All methods taking a GL context must be called from the toolkit's single
/// rendering callback sequence; the renderer exclusively owns its GPU objects.
pub struct ScopeRenderer {
    zoomed: bool,
    state: RendererState,
}

impl ScopeRenderer {
    /// The interactive main view.
    pub fn main() -> Self {
        Self {
            zoomed: false,
            state: RendererState::Uninitialized,
        }
    }

    /// The magnified view driven by the marker pair.
    pub fn zoomed() -> Self {
        Self {
            zoomed: true,
            state: RendererState::Uninitialized,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    /// The stored failure message while in the degraded state.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            RendererState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// One-shot transition out of the uninitialized state. A failure here is
    /// final: the renderer stays in the degraded error-display state and
    /// never retries on this surface.
    pub fn ensure_initialized(&mut self, gl: &glow::Context, scope: &ScopeSettings) {
        if !matches!(self.state, RendererState::Uninitialized) {
            return;
        }
        match Self::init(gl, scope) {
            Ok(ready) => {
                log::info!("scope renderer initialized");
                self.state = RendererState::Ready(Box::new(ready));
            }
            Err(error) => {
                log::error!("scope renderer initialization failed: {error}");
                self.state = RendererState::Failed(error.to_string());
            }
        }
    }

    fn init(gl: &glow::Context, scope: &ScopeSettings) -> Result<ReadyState, RendererError> {
        let program = FlatProgram::compile(gl)?;
        let grid = GridBuffers::new(gl, &program)?;
        let markers = MarkerBuffers::new(gl, &program, scope.cursor_count())?;
        Ok(ReadyState {
            program,
            grid,
            markers,
            history: GraphHistory::new(),
            projection: Mat4::IDENTITY,
            viewport_size: (0, 0),
            markers_dirty: true,
            embedded: gl.version().is_embedded,
        })
    }

    /// Mark the marker vertex cache stale; the quads are regenerated before
    /// the next draw. Call after any cursor move or shape change.
    pub fn invalidate_markers(&mut self) {
        if let RendererState::Ready(ready) = &mut self.state {
            ready.markers_dirty = true;
        }
    }

    /// Take delivery of a new capture: bound the history to the configured
    /// phosphor depth, recycle the least recently used slot to the front and
    /// rewrite its buffers with this frame's traces.
    pub fn show_frame(
        &mut self,
        gl: &glow::Context,
        snapshot: &CaptureSnapshot,
        view: &ViewSettings,
    ) {
        let RendererState::Ready(ready) = &mut self.state else {
            return;
        };
        let ReadyState {
            program, history, ..
        } = &mut **ready;

        let (evicted, slot) = history.advance(view.phosphor_draws());
        for graph in &evicted {
            graph.destroy(gl);
        }
        if let Some(slot) = slot {
            slot.write(gl, program, snapshot);
        }
    }

    /// Recompute the projection for a new surface size. Also happens
    /// implicitly when `render` observes a changed viewport.
    pub fn resize(&mut self, width: i32, height: i32) {
        if let RendererState::Ready(ready) = &mut self.state {
            ready.viewport_size = (width, height);
            ready.projection = ortho_projection(width, height);
        }
    }

    /// Draw one frame: clear, composite the trace history oldest to newest
    /// with age-proportional darkening, then grid and markers on top with the
    /// unzoomed projection.
    pub fn render(
        &mut self,
        gl: &glow::Context,
        scope: &ScopeSettings,
        view: &ViewSettings,
        selected_cursor: usize,
        viewport: [i32; 4],
    ) {
        self.ensure_initialized(gl, scope);
        let zoomed = self.zoomed;
        let RendererState::Ready(ready) = &mut self.state else {
            return;
        };

        let [x, y, width, height] = viewport;
        if (width, height) != ready.viewport_size {
            ready.viewport_size = (width, height);
            ready.projection = ortho_projection(width, height);
        }

        unsafe {
            gl.viewport(x, y, width, height);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::CULL_FACE);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            if !ready.embedded {
                gl.enable(glow::PROGRAM_POINT_SIZE);
            }

            let background = view.screen.background;
            gl.clear_color(background[0], background[1], background[2], background[3]);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.line_width(1.0);
        }

        ready.program.bind(gl);

        if ready.markers_dirty {
            ready.markers.update(gl, scope);
            ready.markers_dirty = false;
        }

        // Traces see the zoom window; grid and markers never do.
        let trace_matrix = if zoomed {
            match zoom_matrix(scope) {
                Some(zoom) => ready.projection * zoom,
                None => ready.projection,
            }
        } else {
            ready.projection
        };
        ready.program.set_matrix(gl, &trace_matrix);

        let mode = match view.interpolation {
            Interpolation::Off => glow::POINTS,
            _ => glow::LINE_STRIP,
        };
        for (age, graph) in ready.history.iter_aged() {
            let fade = 1.0 + 0.1 * age as f32;
            for channel in 0..scope.voltage.len() {
                if scope.horizontal.format == GraphFormat::Ty && scope.spectrum[channel].used {
                    let colour = ready_colour(&view.screen.spectrum, channel, view);
                    ready.program.set_colour(gl, darker(colour, fade));
                    graph.draw_spectrum(gl, channel, mode);
                }
                if scope.voltage[channel].used {
                    let colour = ready_colour(&view.screen.voltage, channel, view);
                    ready.program.set_colour(gl, darker(colour, fade));
                    graph.draw_voltage(gl, channel, mode);
                }
            }
        }

        ready.program.set_matrix(gl, &ready.projection);

        ready.grid.draw(gl, &ready.program, &view.screen);

        if !zoomed {
            ready
                .markers
                .draw(gl, &ready.program, scope, view, selected_cursor);
        }

        ready.program.unbind(gl);
    }

    /// Release every GPU object. The surface is gone afterwards; a new one
    /// starts from the uninitialized state again.
    pub fn destroy(&mut self, gl: &glow::Context) {
        if let RendererState::Ready(ready) = &mut self.state {
            for graph in ready.history.clear() {
                graph.destroy(gl);
            }
            ready.markers.destroy(gl);
            ready.grid.destroy(gl);
            ready.program.destroy(gl);
        }
        self.state = RendererState::Uninitialized;
    }
}

fn ready_colour(
    palette: &[dso_core::settings::Color],
    channel: usize,
    view: &ViewSettings,
) -> dso_core::settings::Color {
    palette
        .get(channel)
        .copied()
        .unwrap_or(view.screen.markers)
}
