use crate::settings::ScopeSettings;
use crate::view::DIVS_TIME;

/// Marker spans below this width (in divisions) are treated as a degenerate
/// zoom window: the transform is undefined and callers disable zooming.
pub const MIN_ZOOM_SPAN: f64 = 1e-9;

/// The global marker pair, order-normalized so the transform stays well
/// defined when marker 1 was dragged left of marker 0. `None` when the window
/// is degenerate.
pub fn marker_span(scope: &ScopeSettings) -> Option<(f64, f64)> {
    let m0 = scope.marker(0);
    let m1 = scope.marker(1);
    let (lo, hi) = if m0 <= m1 { (m0, m1) } else { (m1, m0) };
    if hi - lo < MIN_ZOOM_SPAN {
        None
    } else {
        Some((lo, hi))
    }
}

/// Translate a horizontal position (0..1 across the record) from the main
/// view into the zoom view.
pub fn main_to_zoom(scope: &ScopeSettings, position: f64) -> Option<f64> {
    let (lo, hi) = marker_span(scope)?;
    Some(((position - 0.5) * DIVS_TIME - lo) / (hi - lo))
}

/// Translate a horizontal position (0..1) from the zoom view back into the
/// main view. Algebraic inverse of `main_to_zoom`.
pub fn zoom_to_main(scope: &ScopeSettings, position: f64) -> Option<f64> {
    let (lo, hi) = marker_span(scope)?;
    Some(0.5 + (lo + position * (hi - lo)) / DIVS_TIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_with_markers(m0: f64, m1: f64) -> ScopeSettings {
        let mut scope = ScopeSettings::with_channels(2);
        scope.set_marker(0, m0);
        scope.set_marker(1, m1);
        scope
    }

    #[test]
    fn test_round_trip() {
        let scope = scope_with_markers(-2.0, 3.0);
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            let there = main_to_zoom(&scope, x).unwrap();
            let back = zoom_to_main(&scope, there).unwrap();
            assert!((back - x).abs() < 1e-12, "round trip failed at {x}");
        }
    }

    #[test]
    fn test_closed_form() {
        // Markers at -2 and 3: main_to_zoom(p) = ((p - 0.5) * 10 + 2) / 5.
        let scope = scope_with_markers(-2.0, 3.0);
        let p = 0.7;
        let expected = ((p - 0.5) * DIVS_TIME + 2.0) / 5.0;
        assert!((main_to_zoom(&scope, p).unwrap() - expected).abs() < 1e-12);
        // The marker positions themselves map to the zoom window edges.
        assert!((main_to_zoom(&scope, 0.5 + -2.0 / DIVS_TIME).unwrap() - 0.0).abs() < 1e-12);
        assert!((main_to_zoom(&scope, 0.5 + 3.0 / DIVS_TIME).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_markers_order_normalized() {
        let forward = scope_with_markers(-2.0, 3.0);
        let swapped = scope_with_markers(3.0, -2.0);
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert_eq!(main_to_zoom(&forward, x), main_to_zoom(&swapped, x));
            assert_eq!(zoom_to_main(&forward, x), zoom_to_main(&swapped, x));
        }
    }

    #[test]
    fn test_degenerate_span_is_none() {
        let scope = scope_with_markers(1.5, 1.5);
        assert_eq!(marker_span(&scope), None);
        assert_eq!(main_to_zoom(&scope, 0.5), None);
        assert_eq!(zoom_to_main(&scope, 0.5), None);
    }
}
