use serde::{Deserialize, Serialize};

use crate::cursor::{CursorShape, ScopeCursor};
use crate::view::MARKER_COUNT;

/// RGBA color, components in 0..1.
pub type Color = [f32; 4];

/// Divide the RGB components by `factor`, preserving alpha. `factor` of 1.0 is
/// the identity; larger values darken.
pub fn darker(color: Color, factor: f32) -> Color {
    [color[0] / factor, color[1] / factor, color[2] / factor, color[3]]
}

/// The two trace kinds a channel can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelMode {
    Voltage,
    Spectrum,
}

impl ChannelMode {
    pub fn label(self) -> &'static str {
        match self {
            ChannelMode::Voltage => "Voltage",
            ChannelMode::Spectrum => "Spectrum",
        }
    }
}

/// How trace samples are connected on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Off,
    Linear,
    Sinc,
}

impl Interpolation {
    pub fn label(self) -> &'static str {
        match self {
            Interpolation::Off => "Off",
            Interpolation::Linear => "Linear",
            Interpolation::Sinc => "Sinc",
        }
    }
}

/// Horizontal plot format: voltage over time, or channel 1 against channel 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphFormat {
    Ty,
    Xy,
}

impl GraphFormat {
    pub fn label(self) -> &'static str {
        match self {
            GraphFormat::Ty => "T - Y",
            GraphFormat::Xy => "X - Y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coupling {
    Ac,
    Dc,
    Gnd,
}

impl Coupling {
    pub fn label(self) -> &'static str {
        match self {
            Coupling::Ac => "AC",
            Coupling::Dc => "DC",
            Coupling::Gnd => "GND",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slope {
    Positive,
    Negative,
}

impl Slope {
    pub fn label(self) -> &'static str {
        match self {
            Slope::Positive => "\u{2197}",
            Slope::Negative => "\u{2198}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerMode {
    WaitForce,
    HardwareSoftware,
    Single,
}

impl TriggerMode {
    pub fn label(self) -> &'static str {
        match self {
            TriggerMode::WaitForce => "Wait/Force",
            TriggerMode::HardwareSoftware => "Hard-/Software",
            TriggerMode::Single => "Single",
        }
    }
}

/// Combination applied to produce the math channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MathMode {
    AddCh1Ch2,
    SubCh2FromCh1,
    SubCh1FromCh2,
}

impl MathMode {
    pub fn label(self) -> &'static str {
        match self {
            MathMode::AddCh1Ch2 => "CH1+CH2",
            MathMode::SubCh2FromCh1 => "CH1-CH2",
            MathMode::SubCh1FromCh2 => "CH2-CH1",
        }
    }
}

/// Per-channel voltage trace settings. `offset` is in divisions, `gain` in
/// volts per division, `trigger` is the trigger level in volts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoltageChannelSettings {
    pub name: String,
    pub used: bool,
    pub offset: f64,
    pub gain: f64,
    pub trigger: f64,
    pub coupling: Coupling,
    pub cursor: ScopeCursor,
}

impl VoltageChannelSettings {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            used: false,
            offset: 0.0,
            gain: 1.0,
            trigger: 0.0,
            coupling: Coupling::Dc,
            cursor: ScopeCursor::default(),
        }
    }
}

/// Per-channel spectrum trace settings. `magnitude` is in dB per division.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumChannelSettings {
    pub name: String,
    pub used: bool,
    pub offset: f64,
    pub magnitude: f64,
    pub cursor: ScopeCursor,
}

impl SpectrumChannelSettings {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            used: false,
            offset: 0.0,
            magnitude: 20.0,
            cursor: ScopeCursor::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSettings {
    /// Index of the source channel.
    pub source: usize,
    /// Special (non-channel) trigger source selected.
    pub special: bool,
    pub slope: Slope,
    pub mode: TriggerMode,
    /// Pretrigger position as a fraction of the record, 0..1.
    pub position: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizontalSettings {
    /// Seconds per division.
    pub timebase: f64,
    /// Hertz per division.
    pub frequencybase: f64,
    /// Samples per second.
    pub samplerate: f64,
    pub record_length: usize,
    pub format: GraphFormat,
    /// The shared marker pair used for measurements and zoom-region selection.
    pub cursor: ScopeCursor,
}

/// Authoritative scope state shared between interaction, readouts and the
/// renderer. The display layer reads everything and writes back only cursor
/// fields; everything else belongs to the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeSettings {
    pub horizontal: HorizontalSettings,
    pub voltage: Vec<VoltageChannelSettings>,
    pub spectrum: Vec<SpectrumChannelSettings>,
    pub trigger: TriggerSettings,
    pub math_mode: MathMode,
    /// Number of hardware channels; `voltage` holds one extra math channel.
    pub physical_channels: usize,
}

impl ScopeSettings {
    /// Build settings for `physical_channels` hardware channels plus the math
    /// channel, with the global marker pair enabled as a vertical cursor.
    pub fn with_channels(physical_channels: usize) -> Self {
        let mut voltage: Vec<VoltageChannelSettings> = (0..physical_channels)
            .map(|ch| VoltageChannelSettings::new(&format!("CH{}", ch + 1)))
            .collect();
        voltage.push(VoltageChannelSettings::new("MATH"));
        if let Some(first) = voltage.first_mut() {
            first.used = true;
        }

        let spectrum: Vec<SpectrumChannelSettings> = voltage
            .iter()
            .map(|v| SpectrumChannelSettings::new(&v.name))
            .collect();

        Self {
            horizontal: HorizontalSettings {
                timebase: 1e-3,
                frequencybase: 1e3,
                samplerate: 1e6,
                record_length: 10_000,
                format: GraphFormat::Ty,
                cursor: ScopeCursor {
                    shape: CursorShape::Vertical,
                    ..ScopeCursor::default()
                },
            },
            voltage,
            spectrum,
            trigger: TriggerSettings {
                source: 0,
                special: false,
                slope: Slope::Positive,
                mode: TriggerMode::HardwareSoftware,
                position: 0.5,
            },
            math_mode: MathMode::AddCh1Ch2,
            physical_channels,
        }
    }

    /// Volts per division for a channel.
    pub fn gain(&self, channel: usize) -> f64 {
        self.voltage[channel].gain
    }

    /// X coordinate of one of the global markers, in divisions.
    pub fn marker(&self, index: usize) -> f64 {
        self.horizontal.cursor.positions[index].x
    }

    pub fn set_marker(&mut self, index: usize, value: f64) {
        self.horizontal.cursor.positions[index].x = value;
    }

    /// Total number of cursors: the global marker pair plus one per voltage
    /// channel plus one per spectrum channel.
    pub fn cursor_count(&self) -> usize {
        1 + self.voltage.len() + self.spectrum.len()
    }

    /// Cursor by its fixed index. Index 0 is the global marker pair, followed
    /// by the voltage channels, then the spectrum channels. This order is also
    /// the renderer's draw order and addresses the marker vertex buffer.
    pub fn cursor(&self, index: usize) -> &ScopeCursor {
        if index == 0 {
            &self.horizontal.cursor
        } else if index <= self.voltage.len() {
            &self.voltage[index - 1].cursor
        } else {
            &self.spectrum[index - 1 - self.voltage.len()].cursor
        }
    }

    pub fn cursor_mut(&mut self, index: usize) -> &mut ScopeCursor {
        if index == 0 {
            &mut self.horizontal.cursor
        } else if index <= self.voltage.len() {
            &mut self.voltage[index - 1].cursor
        } else {
            let ch = index - 1 - self.voltage.len();
            &mut self.spectrum[ch].cursor
        }
    }

    /// Whether the channel behind a cursor index is in use. The global marker
    /// pair at index 0 is always active.
    pub fn cursor_used(&self, index: usize) -> bool {
        if index == 0 {
            true
        } else if index <= self.voltage.len() {
            self.voltage[index - 1].used
        } else {
            self.spectrum[index - 1 - self.voltage.len()].used
        }
    }
}

/// Screen colors for every drawn element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenColors {
    pub background: Color,
    pub text: Color,
    pub grid: Color,
    pub axes: Color,
    pub border: Color,
    pub markers: Color,
    pub voltage: Vec<Color>,
    pub spectrum: Vec<Color>,
}

impl ScreenColors {
    /// The classic dark screen: near-black background, warm traces.
    pub fn dark(channels: usize) -> Self {
        const TRACE: [Color; 4] = [
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
        ];
        Self {
            background: [0.0, 0.0, 0.0, 1.0],
            text: [1.0, 1.0, 1.0, 1.0],
            grid: [0.6, 0.6, 0.6, 1.0],
            axes: [0.7, 0.7, 0.7, 1.0],
            border: [1.0, 1.0, 1.0, 1.0],
            markers: [0.4, 0.4, 0.4, 1.0],
            voltage: (0..channels).map(|ch| TRACE[ch % TRACE.len()]).collect(),
            spectrum: (0..channels)
                .map(|ch| darker(TRACE[ch % TRACE.len()], 1.3))
                .collect(),
        }
    }
}

/// Presentation settings: colors, interpolation, phosphor persistence, zoom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    pub screen: ScreenColors,
    pub interpolation: Interpolation,
    pub digital_phosphor: bool,
    pub digital_phosphor_depth: usize,
    pub zoom: bool,
}

impl ViewSettings {
    pub fn new(channels: usize) -> Self {
        Self {
            screen: ScreenColors::dark(channels),
            interpolation: Interpolation::Linear,
            digital_phosphor: false,
            digital_phosphor_depth: 8,
            zoom: false,
        }
    }

    /// Number of history entries actually drawn: the configured depth while
    /// digital phosphor is on, otherwise a single frame.
    pub fn phosphor_draws(&self) -> usize {
        if self.digital_phosphor {
            self.digital_phosphor_depth.max(1)
        } else {
            1
        }
    }
}

/// Compile-time check that cursors always carry exactly two endpoints; the
/// marker buffer layout and the snap search both assume it.
const _: () = assert!(MARKER_COUNT == 2);
