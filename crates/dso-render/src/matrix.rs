use glam::{Mat4, Vec3};

use dso_core::settings::ScopeSettings;
use dso_core::view::{DIVS_TIME, DIVS_VOLTAGE};
use dso_core::zoom;

/// Orthographic projection covering the full division grid, widened by
/// `size / (size - 1)` per axis so the outermost coordinates land on exact
/// pixel centers instead of being clipped by half a pixel. Recomputed on every
/// resize.
pub fn ortho_projection(width: i32, height: i32) -> Mat4 {
    let width_correction = if width > 1 {
        width as f32 / (width - 1) as f32
    } else {
        1.0
    };
    let height_correction = if height > 1 {
        height as f32 / (height - 1) as f32
    } else {
        1.0
    };

    let half_time = DIVS_TIME as f32 / 2.0;
    let half_voltage = DIVS_VOLTAGE as f32 / 2.0;
    Mat4::orthographic_rh_gl(
        -half_time * width_correction,
        half_time * width_correction,
        -half_voltage * height_correction,
        half_voltage * height_correction,
        -1.0,
        1.0,
    )
}

/// Scale-and-translate transform that re-projects the marker-pair window onto
/// the full plot width. `None` for a degenerate window.
pub fn zoom_matrix(scope: &ScopeSettings) -> Option<Mat4> {
    let (lo, hi) = zoom::marker_span(scope)?;
    let span = (hi - lo) as f32;
    let mid = ((lo + hi) / 2.0) as f32;
    Some(
        Mat4::from_scale(Vec3::new(DIVS_TIME as f32 / span, 1.0, 1.0))
            * Mat4::from_translation(Vec3::new(-mid, 0.0, 0.0)),
    )
}
