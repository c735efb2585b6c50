//! Readout computation for the label layer: marker spans, per-cursor deltas,
//! per-channel measurements and the trigger summary. All widget-free; the GUI
//! crate renders these strings verbatim.

use crate::cursor::CursorShape;
use crate::format::{value_to_string, Unit};
use crate::settings::ScopeSettings;
use crate::snapshot::CaptureSnapshot;
use crate::view::DIVS_TIME;
use crate::zoom;

/// Everything the marker info line and the marker delta labels display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerDetails {
    /// "Markers: ..." or "Zoom x...: ..." line with both marker positions.
    pub info: String,
    /// Time distance between the markers.
    pub time: String,
    /// Reciprocal of the time distance.
    pub frequency: String,
    /// Zoomed seconds per division; present only while the zoom view is shown.
    pub timebase: Option<String>,
    /// Zoomed hertz per division; present only while the zoom view is shown.
    pub frequencybase: Option<String>,
    /// Delta shown under the marker selector (time distance).
    pub delta_x: String,
    /// Delta shown under the marker selector (frequency span).
    pub delta_y: String,
}

pub fn marker_details(scope: &ScopeSettings, zoom_shown: bool) -> MarkerDetails {
    let p0 = scope.horizontal.cursor.positions[0];
    let p1 = scope.horizontal.cursor.positions[1];
    let divs = (p1.x - p0.x).abs();
    let time = divs * scope.horizontal.timebase;
    let freq = divs * scope.horizontal.frequencybase;

    let mut prefix = "Markers".to_string();
    let mut timebase = None;
    let mut frequencybase = None;
    if zoom_shown {
        if divs >= zoom::MIN_ZOOM_SPAN {
            prefix = format!("Zoom x{:.3}", DIVS_TIME / divs);
        }
        timebase = Some(format!(
            "{}/div",
            value_to_string(time / DIVS_TIME, Unit::Seconds, 3)
        ));
        frequencybase = Some(format!(
            "{}/div",
            value_to_string(freq / DIVS_TIME, Unit::Hertz, 4)
        ));
    }

    let info = format!(
        "{}:  {}  {}",
        prefix,
        value_to_string(
            0.5 + p0.x / DIVS_TIME - scope.trigger.position,
            Unit::Seconds,
            4
        ),
        value_to_string(
            0.5 + p1.x / DIVS_TIME - scope.trigger.position,
            Unit::Seconds,
            4
        ),
    );

    MarkerDetails {
        info,
        time: value_to_string(time, Unit::Seconds, 4),
        frequency: value_to_string(1.0 / time, Unit::Hertz, 4),
        timebase,
        frequencybase,
        delta_x: value_to_string(time, Unit::Seconds, 4),
        delta_y: value_to_string(freq, Unit::Hertz, 4),
    }
}

/// Delta labels for one channel cursor; which deltas appear depends on the
/// shape (vertical measures X only, horizontal Y only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorReadout {
    pub tag: &'static str,
    pub delta_x: Option<String>,
    pub delta_y: Option<String>,
}

fn shaped_readout(shape: CursorShape, dx: String, dy: String) -> CursorReadout {
    let (delta_x, delta_y) = match shape {
        CursorShape::None => (None, None),
        CursorShape::Vertical => (Some(dx), None),
        CursorShape::Horizontal => (None, Some(dy)),
        CursorShape::Rectangular => (Some(dx), Some(dy)),
    };
    CursorReadout {
        tag: shape.tag(),
        delta_x,
        delta_y,
    }
}

/// Readout for a voltage channel cursor; `None` while the channel is unused.
pub fn voltage_cursor_readout(scope: &ScopeSettings, channel: usize) -> Option<CursorReadout> {
    let ch = &scope.voltage[channel];
    if !ch.used {
        return None;
    }
    let p0 = ch.cursor.positions[0];
    let p1 = ch.cursor.positions[1];
    Some(shaped_readout(
        ch.cursor.shape,
        value_to_string((p1.x - p0.x) * scope.horizontal.timebase, Unit::Seconds, 4),
        value_to_string((p1.y - p0.y) * scope.gain(channel), Unit::Volts, 4),
    ))
}

/// Readout for a spectrum channel cursor; `None` while the channel is unused.
pub fn spectrum_cursor_readout(scope: &ScopeSettings, channel: usize) -> Option<CursorReadout> {
    let ch = &scope.spectrum[channel];
    if !ch.used {
        return None;
    }
    let p0 = ch.cursor.positions[0];
    let p1 = ch.cursor.positions[1];
    Some(shaped_readout(
        ch.cursor.shape,
        value_to_string(
            (p1.x - p0.x) * scope.horizontal.frequencybase,
            Unit::Hertz,
            4,
        ),
        value_to_string(
            (p1.y - p0.y) * ch.magnitude * crate::view::DIVS_VOLTAGE,
            Unit::Decibel,
            4,
        ),
    ))
}

/// One row of the measurement table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRow {
    pub channel: usize,
    pub name: String,
    /// Coupling for hardware channels, math mode for the math channel.
    pub misc: String,
    pub gain: Option<String>,
    pub magnitude: Option<String>,
    pub amplitude: Option<String>,
    pub frequency: Option<String>,
}

/// Rows for every channel whose voltage or spectrum trace is in use.
pub fn measurement_rows(
    scope: &ScopeSettings,
    snapshot: Option<&CaptureSnapshot>,
) -> Vec<MeasurementRow> {
    (0..scope.voltage.len())
        .filter(|&ch| scope.voltage[ch].used || scope.spectrum[ch].used)
        .map(|ch| {
            let misc = if ch < scope.physical_channels {
                scope.voltage[ch].coupling.label().to_string()
            } else {
                scope.math_mode.label().to_string()
            };
            let data = snapshot.and_then(|s| s.channel(ch));
            MeasurementRow {
                channel: ch,
                name: scope.voltage[ch].name.clone(),
                misc,
                gain: scope.voltage[ch].used.then(|| {
                    format!("{}/div", value_to_string(scope.gain(ch), Unit::Volts, 3))
                }),
                magnitude: scope.spectrum[ch].used.then(|| {
                    format!(
                        "{}/div",
                        value_to_string(scope.spectrum[ch].magnitude, Unit::Decibel, 3)
                    )
                }),
                amplitude: data.map(|d| value_to_string(d.amplitude, Unit::Volts, 4)),
                frequency: data.map(|d| value_to_string(d.frequency, Unit::Hertz, 5)),
            }
        })
        .collect()
}

/// "CH1  [slope]  [level]  [pretrigger%]" summary for the settings line.
pub fn trigger_summary(scope: &ScopeSettings) -> String {
    let source = &scope.voltage[scope.trigger.source];
    format!(
        "{}  {}  {}  {}%",
        source.name,
        scope.trigger.slope.label(),
        value_to_string(source.trigger, Unit::Volts, 3),
        (scope.trigger.position * 100.0 + 0.5) as i32
    )
}

/// Labels for the settings line to the right of the trigger summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSummary {
    pub record_length: String,
    pub samplerate: String,
    pub timebase: String,
    pub frequencybase: String,
}

pub fn settings_summary(scope: &ScopeSettings) -> SettingsSummary {
    SettingsSummary {
        record_length: value_to_string(scope.horizontal.record_length as f64, Unit::Samples, 4),
        samplerate: format!(
            "{}/s",
            value_to_string(scope.horizontal.samplerate, Unit::Samples, 4)
        ),
        timebase: format!(
            "{}/div",
            value_to_string(scope.horizontal.timebase, Unit::Seconds, 4)
        ),
        frequencybase: format!(
            "{}/div",
            value_to_string(scope.horizontal.frequencybase, Unit::Hertz, 4)
        ),
    }
}

/// Re-projected slider value, disabled when it falls outside the slider range
/// or the zoom window is degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderAdaptation {
    pub enabled: bool,
    pub value: f64,
}

/// Re-project the trigger position into the zoom view for the zoom view's
/// position slider.
pub fn adapt_zoom_trigger_position(scope: &ScopeSettings) -> SliderAdaptation {
    match zoom::main_to_zoom(scope, scope.trigger.position) {
        Some(value) if (0.0..=1.0).contains(&value) => SliderAdaptation {
            enabled: true,
            value,
        },
        Some(value) => SliderAdaptation {
            enabled: false,
            value: value.clamp(0.0, 1.0),
        },
        None => SliderAdaptation {
            enabled: false,
            value: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ChannelTraces;
    use glam::DVec2;

    fn scope() -> ScopeSettings {
        let mut scope = ScopeSettings::with_channels(2);
        scope.set_marker(0, -2.0);
        scope.set_marker(1, 3.0);
        scope
    }

    #[test]
    fn test_marker_details_spans() {
        let details = marker_details(&scope(), false);
        // 5 divisions at 1 ms/div.
        assert_eq!(details.time, "5.000 ms");
        assert_eq!(details.frequency, "200.0 Hz");
        assert_eq!(details.delta_y, "5.000 kHz");
        assert!(details.info.starts_with("Markers:"));
        assert_eq!(details.timebase, None);
    }

    #[test]
    fn test_marker_details_zoomed() {
        let details = marker_details(&scope(), true);
        assert!(details.info.starts_with("Zoom x2.000"));
        assert_eq!(details.timebase.as_deref(), Some("500 \u{b5}s/div"));
        assert!(details.frequencybase.is_some());
    }

    #[test]
    fn test_degenerate_markers_fall_back_to_marker_label() {
        let mut s = scope();
        s.set_marker(0, 1.0);
        s.set_marker(1, 1.0);
        let details = marker_details(&s, true);
        assert!(details.info.starts_with("Markers:"));
        assert_eq!(details.frequency, "- Hz");
    }

    #[test]
    fn test_voltage_cursor_readout_by_shape() {
        let mut s = scope();
        s.voltage[0].cursor.shape = CursorShape::Rectangular;
        s.voltage[0].cursor.positions = [DVec2::new(-1.0, -1.0), DVec2::new(1.0, 1.0)];
        let readout = voltage_cursor_readout(&s, 0).unwrap();
        assert_eq!(readout.tag, "#");
        // 2 divisions at 1 ms/div and 1 V/div.
        assert_eq!(readout.delta_x.as_deref(), Some("2.000 ms"));
        assert_eq!(readout.delta_y.as_deref(), Some("2.000 V"));

        s.voltage[0].cursor.shape = CursorShape::Vertical;
        let readout = voltage_cursor_readout(&s, 0).unwrap();
        assert!(readout.delta_x.is_some());
        assert_eq!(readout.delta_y, None);

        s.voltage[0].used = false;
        assert_eq!(voltage_cursor_readout(&s, 0), None);
    }

    #[test]
    fn test_measurement_rows_skip_unused() {
        let mut s = scope();
        s.voltage[1].used = false;
        s.spectrum[1].used = false;
        let snapshot = CaptureSnapshot::new(
            vec![
                Some(ChannelTraces {
                    amplitude: 2.5,
                    frequency: 1000.0,
                    ..ChannelTraces::default()
                }),
                None,
                None,
            ],
            1000,
        );
        let rows = measurement_rows(&s, Some(&snapshot));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].channel, 0);
        assert_eq!(rows[0].misc, "DC");
        assert_eq!(rows[0].gain.as_deref(), Some("1.00 V/div"));
        assert_eq!(rows[0].amplitude.as_deref(), Some("2.500 V"));
        assert_eq!(rows[0].frequency.as_deref(), Some("1.0000 kHz"));
    }

    #[test]
    fn test_trigger_summary() {
        let mut s = scope();
        s.voltage[0].trigger = 0.5;
        s.trigger.position = 0.25;
        assert_eq!(trigger_summary(&s), "CH1  \u{2197}  500 mV  25%");
    }

    #[test]
    fn test_zoom_trigger_slider_adaptation() {
        let mut s = scope();
        // Markers -2..3 cover record fractions 0.3..0.8.
        s.trigger.position = 0.5;
        let adapted = adapt_zoom_trigger_position(&s);
        assert!(adapted.enabled);
        assert!((adapted.value - 0.4).abs() < 1e-12);

        s.trigger.position = 0.95;
        let adapted = adapt_zoom_trigger_position(&s);
        assert!(!adapted.enabled);
        assert_eq!(adapted.value, 1.0);

        s.set_marker(1, -2.0);
        let adapted = adapt_zoom_trigger_position(&s);
        assert!(!adapted.enabled);
    }
}
