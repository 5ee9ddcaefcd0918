use ratatui::style::Color;

/// Maps a numeric domain onto a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    pub const fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// Position of `value` within the domain as a 0..1 fraction (unclamped
    /// unless the scale is clamped). A degenerate domain maps to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        if span.abs() < f64::EPSILON {
            return 0.0;
        }
        let t = (value - d0) / span;
        if self.clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        self.normalize(value).mul_add(r1 - r0, r0)
    }
}

/// Logarithmic scale; always clamped. Non-positive inputs map to the low end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
}

impl LogScale {
    pub const fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    pub fn normalize(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d0 <= 0.0 || d1 <= 0.0 || value <= 0.0 {
            return 0.0;
        }
        let span = d1.log10() - d0.log10();
        if span.abs() < f64::EPSILON {
            return 0.0;
        }
        ((value.log10() - d0.log10()) / span).clamp(0.0, 1.0)
    }
}

/// Two-stop color gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamp {
    pub low: (u8, u8, u8),
    pub high: (u8, u8, u8),
}

impl ColorRamp {
    pub const fn new(low: (u8, u8, u8), high: (u8, u8, u8)) -> Self {
        Self { low, high }
    }

    /// Color at fraction `t`; `t` is clamped to 0..1.
    pub fn at(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| -> u8 {
            let value = (f64::from(b) - f64::from(a)).mul_add(t, f64::from(a));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = value.round().clamp(0.0, 255.0) as u8;
            value
        };
        Color::Rgb(
            channel(self.low.0, self.high.0),
            channel(self.low.1, self.high.1),
            channel(self.low.2, self.high.2),
        )
    }

    pub fn low_color(&self) -> Color {
        self.at(0.0)
    }

    pub fn high_color(&self) -> Color {
        self.at(1.0)
    }
}

/// Parses `#rrggbb`. Anything else yields `None`.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let component = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((component(0..2)?, component(2..4)?, component(4..6)?))
}

/// Like [`parse_hex`] but falls back to gray for malformed input.
pub fn hex_color(hex: &str) -> Color {
    parse_hex(hex).map_or(Color::Gray, |(r, g, b)| Color::Rgb(r, g, b))
}
