use dso_core::cursor::CursorShape;
use dso_core::mapper::{pixel_to_division, MarkerEvent, PointerTracker};
use dso_core::settings::ScopeSettings;
use dso_core::view::{DIVS_TIME, DIVS_VOLTAGE, MARKER_COUNT};
use dso_core::zoom;
use glam::DVec2;

// ── Helpers ──────────────────────────────────────────────────────

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;

fn press_at_pixel(
    tracker: &mut PointerTracker,
    scope: &mut ScopeSettings,
    px: f64,
    py: f64,
) -> Vec<MarkerEvent> {
    tracker.on_pointer_down(scope, pixel_to_division(px, py, WIDTH, HEIGHT))
}

fn scope_with_selected_rect_cursor(tracker: &mut PointerTracker) -> ScopeSettings {
    let mut scope = ScopeSettings::with_channels(2);
    scope.voltage[0].cursor.shape = CursorShape::Rectangular;
    scope.voltage[0].cursor.positions = [DVec2::new(0.4, 0.0), DVec2::new(3.0, 3.0)];
    tracker.select_cursor(1);
    scope
}

// ── Pixel decoding ───────────────────────────────────────────────

#[test]
fn widget_center_decodes_to_origin() {
    let p = pixel_to_division(400.0, 300.0, WIDTH, HEIGHT);
    assert_eq!(p, DVec2::new(0.0, 0.0));
}

#[test]
fn screen_down_is_division_up() {
    let above = pixel_to_division(400.0, 200.0, WIDTH, HEIGHT);
    let below = pixel_to_division(400.0, 400.0, WIDTH, HEIGHT);
    assert!(above.y > 0.0);
    assert!(below.y < 0.0);
    assert_eq!(above.y, -below.y);
}

// ── Press / drag / release over the full settings model ──────────

#[test]
fn press_inside_tolerance_moves_only_that_endpoint() {
    let mut tracker = PointerTracker::new();
    let mut scope = scope_with_selected_rect_cursor(&mut tracker);

    // Pixel 432 decodes to exactly 0.4 time divisions: the press sits on
    // endpoint 0 and release leaves it there, endpoint 1 untouched.
    let events = press_at_pixel(&mut tracker, &mut scope, 432.0, 300.0);
    assert_eq!(
        events,
        vec![MarkerEvent {
            cursor: 1,
            marker: 0
        }]
    );
    let up = tracker.on_pointer_up(&mut scope, pixel_to_division(432.0, 300.0, WIDTH, HEIGHT));
    assert_eq!(up.len(), 1);
    assert!((scope.voltage[0].cursor.positions[0].x - 0.4).abs() < 1e-12);
    assert!(scope.voltage[0].cursor.positions[0].y.abs() < 1e-12);
    assert_eq!(scope.voltage[0].cursor.positions[1], DVec2::new(3.0, 3.0));
}

#[test]
fn tolerance_boundary_press_captures_via_other_axis() {
    let mut tracker = PointerTracker::new();
    let mut scope = scope_with_selected_rect_cursor(&mut tracker);

    // Pixel 440 decodes to 0.5 divisions: the X distance to endpoint 0 equals
    // the 1% tolerance exactly and strict comparison rejects it, but the zero
    // Y distance still captures the endpoint and snaps it to the press point.
    let events = press_at_pixel(&mut tracker, &mut scope, 440.0, 300.0);
    assert_eq!(events.len(), 1);
    assert_eq!(scope.voltage[0].cursor.positions[0], DVec2::new(0.5, 0.0));
}

#[test]
fn missed_press_then_drag_places_whole_cursor() {
    let mut tracker = PointerTracker::new();
    let mut scope = scope_with_selected_rect_cursor(&mut tracker);

    let events = press_at_pixel(&mut tracker, &mut scope, 100.0, 100.0);
    assert!(events.is_empty());

    // The first drag position, not the press position, is what every endpoint
    // jumps to.
    let drag = pixel_to_division(120.0, 130.0, WIDTH, HEIGHT);
    let events = tracker.on_pointer_moved(&mut scope, drag);
    assert_eq!(events.len(), MARKER_COUNT);
    for marker in 0..MARKER_COUNT {
        assert_eq!(scope.voltage[0].cursor.positions[marker], drag);
    }

    // Subsequent drags move only the resolved (last) endpoint.
    let drag2 = pixel_to_division(200.0, 200.0, WIDTH, HEIGHT);
    tracker.on_pointer_moved(&mut scope, drag2);
    assert_eq!(scope.voltage[0].cursor.positions[0], drag);
    assert_eq!(
        scope.voltage[0].cursor.positions[MARKER_COUNT - 1],
        drag2
    );
}

#[test]
fn global_marker_drag_reports_cursor_zero() {
    let mut tracker = PointerTracker::new();
    let mut scope = ScopeSettings::with_channels(2);
    scope.set_marker(0, -2.0);
    scope.set_marker(1, 3.0);

    // Press within 1% of full scale of marker 1 on the X axis.
    let press = DVec2::new(3.05, 1.0);
    let events = tracker.on_pointer_down(&mut scope, press);
    assert_eq!(
        events,
        vec![MarkerEvent {
            cursor: 0,
            marker: 1
        }]
    );
    assert_eq!(scope.marker(1), 3.05);

    tracker.on_pointer_moved(&mut scope, DVec2::new(-4.0, 0.0));
    assert_eq!(scope.marker(1), -4.0);
    // Marker 0 never moved.
    assert_eq!(scope.marker(0), -2.0);
}

// ── Zoom window driven by the markers ────────────────────────────

#[test]
fn zoom_round_trip_after_marker_drag() {
    let mut tracker = PointerTracker::new();
    let mut scope = ScopeSettings::with_channels(2);
    scope.set_marker(0, -2.0);
    scope.set_marker(1, 3.0);

    // Drag marker 1 left of marker 0; the transform stays order-normalized.
    tracker.on_pointer_down(&mut scope, DVec2::new(3.02, 0.0));
    tracker.on_pointer_moved(&mut scope, DVec2::new(-3.5, 0.0));
    tracker.on_pointer_up(&mut scope, DVec2::new(-3.5, 0.0));
    assert_eq!(scope.marker(1), -3.5);

    for i in 0..=10 {
        let x = i as f64 / 10.0;
        let z = zoom::main_to_zoom(&scope, x).unwrap();
        let back = zoom::zoom_to_main(&scope, z).unwrap();
        assert!((back - x).abs() < 1e-12);
    }
}

#[test]
fn collapsed_markers_disable_zoom_transform() {
    let mut tracker = PointerTracker::new();
    let mut scope = ScopeSettings::with_channels(2);
    scope.set_marker(0, 1.0);
    scope.set_marker(1, 3.0);

    tracker.on_pointer_down(&mut scope, DVec2::new(3.01, 0.0));
    tracker.on_pointer_moved(&mut scope, DVec2::new(1.0, 0.0));
    tracker.on_pointer_up(&mut scope, DVec2::new(1.0, 0.0));

    assert_eq!(zoom::main_to_zoom(&scope, 0.5), None);
    assert_eq!(zoom::zoom_to_main(&scope, 0.5), None);
}

// ── Full-scale sanity ────────────────────────────────────────────

#[test]
fn decoded_positions_stay_inside_the_plot() {
    for px in [0.0, 1.0, 399.0, 400.0, 799.0, 800.0] {
        for py in [0.0, 1.0, 299.0, 300.0, 599.0, 600.0] {
            let p = pixel_to_division(px, py, WIDTH, HEIGHT);
            assert!(p.x.abs() <= DIVS_TIME / 2.0);
            assert!(p.y.abs() <= DIVS_VOLTAGE / 2.0);
        }
    }
}
