use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::view::{DIVS_TIME, DIVS_VOLTAGE, MARKER_COUNT};

/// Which of a cursor's two endpoints carry meaning, and how its outline quad
/// is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorShape {
    None,
    Vertical,
    Horizontal,
    Rectangular,
}

impl CursorShape {
    /// Short tag shown on the shape toggle button.
    pub fn tag(self) -> &'static str {
        match self {
            CursorShape::None => "OFF",
            CursorShape::Vertical => "||",
            CursorShape::Horizontal => "=",
            CursorShape::Rectangular => "#",
        }
    }
}

/// A user-positionable measurement cursor: a shape plus two endpoints in
/// division space (time divisions x voltage/magnitude divisions).
///
/// Cursors live for the whole session. Interaction and sliders mutate the
/// endpoints in place; a shape change resets nothing but the shape itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScopeCursor {
    pub shape: CursorShape,
    pub positions: [DVec2; MARKER_COUNT],
}

impl Default for ScopeCursor {
    fn default() -> Self {
        Self {
            shape: CursorShape::None,
            positions: [DVec2::new(-1.0, -1.0), DVec2::new(1.0, 1.0)],
        }
    }
}

impl ScopeCursor {
    /// Toggle between the off placeholder and the rectangular shape.
    /// Idempotent per direction: any non-off shape toggles to off.
    pub fn toggle_shape(&mut self) {
        self.shape = match self.shape {
            CursorShape::None => CursorShape::Rectangular,
            _ => CursorShape::None,
        };
    }
}

/// Generate the fixed four-corner outline for a cursor in division space.
///
/// Every shape produces exactly four vertices so the GPU marker buffer keeps a
/// stable layout (4 vertices per cursor at a fixed sub-range); 1-D shapes span
/// the full off-screen extent on their free axis and the off placeholder is a
/// rectangle entirely outside the visible area.
pub fn marker_vertices(cursor: &ScopeCursor) -> [[f32; 2]; 4] {
    let t = DIVS_TIME as f32;
    let v = DIVS_VOLTAGE as f32;
    let p0 = cursor.positions[0].as_vec2();
    let p1 = cursor.positions[1].as_vec2();

    match cursor.shape {
        CursorShape::None => [[-t, -v], [-t, v], [t, v], [t, -v]],
        CursorShape::Vertical => [[p0.x, -v], [p0.x, v], [p1.x, v], [p1.x, -v]],
        CursorShape::Horizontal => [[-t, p0.y], [t, p0.y], [t, p1.y], [-t, p1.y]],
        CursorShape::Rectangular => [[p0.x, p0.y], [p0.x, p1.y], [p1.x, p1.y], [p1.x, p0.y]],
    }
}
