/// Horizontal extent of the plot area in time divisions.
pub const DIVS_TIME: f64 = 10.0;

/// Vertical extent of the plot area in voltage/magnitude divisions.
pub const DIVS_VOLTAGE: f64 = 8.0;

/// Sub-divisions per division, used for the dot grid and axis ticks.
pub const DIVS_SUB: i32 = 5;

/// Number of movable endpoints per cursor.
pub const MARKER_COUNT: usize = 2;

/// Quantization step for the marker sliders, in divisions.
pub const MARKER_STEP: f64 = 0.25;
