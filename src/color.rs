//! Color encodings shared by the SVG and terminal renderers

/// Segment fill for positive-strand evidence
pub const PLUS: &str = "#b40426";
/// Segment fill for negative-strand evidence
pub const MINUS: &str = "#3b4cc0";
/// Segment fill for unknown orientation
pub const UNKNOWN: &str = "#9aa7c7";
/// Fill for zero-total heatmap cells
pub const EMPTY_CELL: &str = "rgba(255,255,255,.08)";
/// Accent used for imputed-zero badges
pub const IMPUTED_ACCENT: &str = "#ffcc66";

/// 11-class RdBu diverging scheme, red (low t) to blue (high t)
const RDBU: [(u8, u8, u8); 11] = [
    (0x67, 0x00, 0x1f),
    (0xb2, 0x18, 0x2b),
    (0xd6, 0x60, 0x4d),
    (0xf4, 0xa5, 0x82),
    (0xfd, 0xdb, 0xc7),
    (0xf7, 0xf7, 0xf7),
    (0xd1, 0xe5, 0xf0),
    (0x92, 0xc5, 0xde),
    (0x43, 0x93, 0xc3),
    (0x21, 0x66, 0xac),
    (0x05, 0x30, 0x61),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Parse `#rrggbb`
    pub fn parse(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Diverging color for a signed score in [-1, 1]: warm for positive, cool for negative
pub fn signed_color(score: f64) -> Rgb {
    let score = if score.is_finite() { score.clamp(-1.0, 1.0) } else { 0.0 };
    rdbu(1.0 - (score + 1.0) / 2.0)
}

/// Uniform cubic B-spline through the RdBu control colors, `t` in [0, 1]
pub fn rdbu(t: f64) -> Rgb {
    let channel = |pick: fn(&(u8, u8, u8)) -> u8| {
        let values: Vec<f64> = RDBU.iter().map(|c| pick(c) as f64).collect();
        basis(&values, t).round().clamp(0.0, 255.0) as u8
    };
    Rgb(channel(|c| c.0), channel(|c| c.1), channel(|c| c.2))
}

fn basis(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t <= 0.0 {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };
    let t1 = (t - i as f64 / n as f64) * n as f64;
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}
