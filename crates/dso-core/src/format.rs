/// Physical unit of a displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Volts,
    Decibel,
    Seconds,
    Hertz,
    Samples,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Unit::Volts => "V",
            Unit::Decibel => "dB",
            Unit::Seconds => "s",
            Unit::Hertz => "Hz",
            Unit::Samples => "S",
        }
    }
}

const PREFIXES: [&str; 8] = ["p", "n", "\u{b5}", "m", "", "k", "M", "G"];

/// Render a value with an SI prefix and the given number of significant
/// digits. `precision <= 0` uses the shortest exact representation. Decibels
/// are never prefixed; seconds never get a positive prefix.
pub fn value_to_string(value: f64, unit: Unit, precision: i32) -> String {
    if !value.is_finite() {
        return format!("- {}", unit.suffix());
    }
    if unit == Unit::Decibel {
        return format!("{} {}", significant(value, precision), unit.suffix());
    }
    if value == 0.0 {
        return format!("{} {}", significant(0.0, precision), unit.suffix());
    }

    let mut decade = (value.abs().log10().floor() as i32).div_euclid(3).clamp(-4, 3);
    if unit == Unit::Seconds {
        decade = decade.min(0);
    }
    // Multiply by the exact integer power for sub-unit decades instead of
    // dividing by its inexact reciprocal.
    let scaled = if decade < 0 {
        value * 10f64.powi(-3 * decade)
    } else {
        value / 10f64.powi(3 * decade)
    };
    let prefix = PREFIXES[(decade + 4) as usize];
    format!("{} {}{}", significant(scaled, precision), prefix, unit.suffix())
}

/// Format with `precision` significant digits.
fn significant(value: f64, precision: i32) -> String {
    if precision <= 0 {
        return format!("{value}");
    }
    let magnitude = if value == 0.0 {
        0
    } else {
        value.abs().log10().floor() as i32
    };
    let decimals = (precision - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}
