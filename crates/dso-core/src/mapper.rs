use glam::DVec2;

use crate::cursor::CursorShape;
use crate::settings::ScopeSettings;
use crate::view::{DIVS_TIME, DIVS_VOLTAGE, MARKER_COUNT};

/// Convert a pixel position inside a widget of the given size to division
/// space. Pixel origin is top-left; division origin is the plot center with Y
/// growing upward.
pub fn pixel_to_division(pixel_x: f64, pixel_y: f64, width: f64, height: f64) -> DVec2 {
    DVec2::new(
        (pixel_x - width / 2.0) * DIVS_TIME / width,
        (height / 2.0 - pixel_y) * DIVS_VOLTAGE / height,
    )
}

/// Emitted whenever interaction moves a cursor endpoint, so labels and sliders
/// can stay in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerEvent {
    /// Cursor index in marker-set order (0 = global marker pair).
    pub cursor: usize,
    /// Which of the cursor's endpoints moved.
    pub marker: usize,
}

/// Pointer interaction state machine for the scope surface.
///
/// The host calls `on_pointer_down`, `on_pointer_moved` and `on_pointer_up`
/// with positions already decoded to division space; the tracker mutates only
/// cursor endpoint positions inside the passed-in settings and reports every
/// move as a `MarkerEvent`.
#[derive(Debug, Default)]
pub struct PointerTracker {
    selected_cursor: usize,
    selected_marker: Option<usize>,
    pressed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change which cursor pointer interaction addresses.
    pub fn select_cursor(&mut self, index: usize) {
        self.selected_cursor = index;
    }

    pub fn selected_cursor(&self) -> usize {
        self.selected_cursor
    }

    /// The endpoint captured by the last press, if any.
    pub fn selected_marker(&self) -> Option<usize> {
        self.selected_marker
    }

    /// Press: capture the nearest endpoint of the selected cursor within the
    /// snap area (1% of full scale per axis) and snap it to the press
    /// position. The X axis participates for rectangular and vertical shapes,
    /// the Y axis for rectangular and horizontal ones; both axes narrow the
    /// candidate independently and the first endpoint wins exact ties.
    pub fn on_pointer_down(
        &mut self,
        scope: &mut ScopeSettings,
        position: DVec2,
    ) -> Vec<MarkerEvent> {
        self.pressed = true;
        self.selected_marker = None;

        let cursor = scope.cursor(self.selected_cursor);
        let capture_x = matches!(
            cursor.shape,
            CursorShape::Rectangular | CursorShape::Vertical
        );
        let capture_y = matches!(
            cursor.shape,
            CursorShape::Rectangular | CursorShape::Horizontal
        );

        let mut distance = DVec2::new(DIVS_TIME, DIVS_VOLTAGE);
        for marker in 0..MARKER_COUNT {
            let dx = (cursor.positions[marker].x - position.x).abs();
            if capture_x && dx < distance.x.min(DIVS_TIME / 100.0) {
                distance.x = dx;
                self.selected_marker = Some(marker);
            }
            let dy = (cursor.positions[marker].y - position.y).abs();
            if capture_y && dy < distance.y.min(DIVS_VOLTAGE / 100.0) {
                distance.y = dy;
                self.selected_marker = Some(marker);
            }
        }

        match self.selected_marker {
            Some(marker) => {
                scope.cursor_mut(self.selected_cursor).positions[marker] = position;
                vec![MarkerEvent {
                    cursor: self.selected_cursor,
                    marker,
                }]
            }
            None => Vec::new(),
        }
    }

    /// Move: the captured endpoint follows the pointer synchronously. If the
    /// press missed every snap zone, the first move jumps all endpoints of the
    /// selected cursor to the pointer and leaves the last one captured.
    pub fn on_pointer_moved(
        &mut self,
        scope: &mut ScopeSettings,
        position: DVec2,
    ) -> Vec<MarkerEvent> {
        if !self.pressed {
            return Vec::new();
        }

        match self.selected_marker {
            None => {
                let mut events = Vec::with_capacity(MARKER_COUNT);
                for marker in 0..MARKER_COUNT {
                    scope.cursor_mut(self.selected_cursor).positions[marker] = position;
                    events.push(MarkerEvent {
                        cursor: self.selected_cursor,
                        marker,
                    });
                    self.selected_marker = Some(marker);
                }
                events
            }
            Some(marker) => {
                scope.cursor_mut(self.selected_cursor).positions[marker] = position;
                vec![MarkerEvent {
                    cursor: self.selected_cursor,
                    marker,
                }]
            }
        }
    }

    /// Release: apply the final position and clear the capture.
    pub fn on_pointer_up(
        &mut self,
        scope: &mut ScopeSettings,
        position: DVec2,
    ) -> Vec<MarkerEvent> {
        let mut events = Vec::new();
        if let Some(marker) = self.selected_marker.take() {
            scope.cursor_mut(self.selected_cursor).positions[marker] = position;
            events.push(MarkerEvent {
                cursor: self.selected_cursor,
                marker,
            });
        }
        self.pressed = false;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorShape;

    fn scope_with_rect_cursor(p0: (f64, f64), p1: (f64, f64)) -> ScopeSettings {
        let mut scope = ScopeSettings::with_channels(2);
        let cursor = &mut scope.voltage[0].cursor;
        cursor.shape = CursorShape::Rectangular;
        cursor.positions[0] = DVec2::new(p0.0, p0.1);
        cursor.positions[1] = DVec2::new(p1.0, p1.1);
        scope
    }

    #[test]
    fn test_pixel_to_division_center() {
        let p = pixel_to_division(400.0, 300.0, 800.0, 600.0);
        assert_eq!(p, DVec2::new(0.0, 0.0));
    }

    #[test]
    fn test_pixel_to_division_corners() {
        // Top-left pixel maps to the negative-time, positive-voltage corner.
        let p = pixel_to_division(0.0, 0.0, 800.0, 600.0);
        assert_eq!(p, DVec2::new(-DIVS_TIME / 2.0, DIVS_VOLTAGE / 2.0));
        let p = pixel_to_division(800.0, 600.0, 800.0, 600.0);
        assert_eq!(p, DVec2::new(DIVS_TIME / 2.0, -DIVS_VOLTAGE / 2.0));
    }

    #[test]
    fn test_press_on_endpoint_is_noop_move() {
        let mut scope = scope_with_rect_cursor((0.4, 0.0), (2.0, 2.0));
        let mut tracker = PointerTracker::new();
        tracker.select_cursor(1);

        let events = tracker.on_pointer_down(&mut scope, DVec2::new(0.4, 0.0));
        assert_eq!(
            events,
            vec![MarkerEvent {
                cursor: 1,
                marker: 0
            }]
        );
        assert_eq!(scope.voltage[0].cursor.positions[0], DVec2::new(0.4, 0.0));
        assert_eq!(scope.voltage[0].cursor.positions[1], DVec2::new(2.0, 2.0));
    }

    #[test]
    fn test_snap_tolerance_is_strict() {
        // X distance exactly at the 1% tolerance (0.1 div) does not capture on
        // X, but the Y distance of zero still captures and snaps the endpoint
        // to the press position.
        let mut scope = scope_with_rect_cursor((0.4, 0.0), (3.0, 3.0));
        let mut tracker = PointerTracker::new();
        tracker.select_cursor(1);

        let events = tracker.on_pointer_down(&mut scope, DVec2::new(0.5, 0.0));
        assert_eq!(events.len(), 1);
        assert_eq!(scope.voltage[0].cursor.positions[0], DVec2::new(0.5, 0.0));
    }

    #[test]
    fn test_press_outside_snap_selects_nothing() {
        let mut scope = scope_with_rect_cursor((0.4, 0.0), (2.0, 2.0));
        let mut tracker = PointerTracker::new();
        tracker.select_cursor(1);

        let events = tracker.on_pointer_down(&mut scope, DVec2::new(-3.0, -3.0));
        assert!(events.is_empty());
        assert_eq!(tracker.selected_marker(), None);
        assert_eq!(scope.voltage[0].cursor.positions[0], DVec2::new(0.4, 0.0));
    }

    #[test]
    fn test_missed_press_drag_jumps_all_endpoints() {
        let mut scope = scope_with_rect_cursor((0.4, 0.0), (2.0, 2.0));
        let mut tracker = PointerTracker::new();
        tracker.select_cursor(1);

        tracker.on_pointer_down(&mut scope, DVec2::new(-3.0, -3.0));
        let events = tracker.on_pointer_moved(&mut scope, DVec2::new(-2.5, -2.5));
        assert_eq!(events.len(), MARKER_COUNT);
        // All endpoints land on the first drag position, not the press one.
        for marker in 0..MARKER_COUNT {
            assert_eq!(
                scope.voltage[0].cursor.positions[marker],
                DVec2::new(-2.5, -2.5)
            );
        }
        assert_eq!(tracker.selected_marker(), Some(MARKER_COUNT - 1));
    }

    #[test]
    fn test_drag_moves_only_captured_endpoint() {
        let mut scope = scope_with_rect_cursor((0.4, 0.0), (2.0, 2.0));
        let mut tracker = PointerTracker::new();
        tracker.select_cursor(1);

        tracker.on_pointer_down(&mut scope, DVec2::new(0.4, 0.0));
        tracker.on_pointer_moved(&mut scope, DVec2::new(1.0, -1.0));
        let events = tracker.on_pointer_up(&mut scope, DVec2::new(1.2, -1.1));
        assert_eq!(events.len(), 1);
        assert_eq!(scope.voltage[0].cursor.positions[0], DVec2::new(1.2, -1.1));
        assert_eq!(scope.voltage[0].cursor.positions[1], DVec2::new(2.0, 2.0));
        assert_eq!(tracker.selected_marker(), None);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut scope = scope_with_rect_cursor((0.4, 0.0), (2.0, 2.0));
        let mut tracker = PointerTracker::new();
        tracker.select_cursor(1);

        let events = tracker.on_pointer_moved(&mut scope, DVec2::new(1.0, 1.0));
        assert!(events.is_empty());
        assert_eq!(scope.voltage[0].cursor.positions[0], DVec2::new(0.4, 0.0));
    }

    #[test]
    fn test_vertical_cursor_ignores_y_axis() {
        let mut scope = ScopeSettings::with_channels(2);
        // Global marker pair is vertical; a press aligned with an endpoint's Y
        // but far on X must not capture.
        scope.horizontal.cursor.positions[0] = DVec2::new(-2.0, 0.0);
        scope.horizontal.cursor.positions[1] = DVec2::new(3.0, 0.0);
        let mut tracker = PointerTracker::new();

        let events = tracker.on_pointer_down(&mut scope, DVec2::new(0.0, 0.0));
        assert!(events.is_empty());

        let events = tracker.on_pointer_down(&mut scope, DVec2::new(3.05, 2.0));
        assert_eq!(
            events,
            vec![MarkerEvent {
                cursor: 0,
                marker: 1
            }]
        );
        assert_eq!(scope.horizontal.cursor.positions[1], DVec2::new(3.05, 2.0));
    }

    #[test]
    fn test_per_axis_search_keeps_last_axis_winner() {
        // Rectangular cursor where endpoint 0 is close on X and endpoint 1 is
        // close on Y: the Y test runs after the X test for each endpoint, so
        // endpoint 1 ends up captured. Pins the per-axis independence of the
        // snap search.
        let mut scope = scope_with_rect_cursor((0.05, 5.0), (5.0, 0.05));
        let mut tracker = PointerTracker::new();
        tracker.select_cursor(1);

        let events = tracker.on_pointer_down(&mut scope, DVec2::new(0.0, 0.0));
        assert_eq!(
            events,
            vec![MarkerEvent {
                cursor: 1,
                marker: 1
            }]
        );
        assert_eq!(scope.voltage[0].cursor.positions[1], DVec2::new(0.0, 0.0));
        assert_eq!(scope.voltage[0].cursor.positions[0], DVec2::new(0.05, 5.0));
    }
}
