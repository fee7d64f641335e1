//! `Rgb` and `Hsb`: the public color representations for floem-radial.
//!
//! HSB is the wheel's source of truth; RGB is a derived 8-bit view that
//! round-trips through HSB with rounding loss.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WheelError;
use crate::math;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue (degrees, 0–360), saturation and brightness (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

impl Default for Hsb {
    /// Fully saturated red at full brightness.
    fn default() -> Self {
        Self {
            h: 0.0,
            s: 1.0,
            b: 1.0,
        }
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a packed `0xRRGGBB` value; higher bits are ignored.
    pub fn from_u32(color: u32) -> Self {
        let (_, r, g, b) = math::unpack_argb(color);
        Self { r, g, b }
    }

    /// Packed `0xRRGGBB`.
    pub fn to_u32(&self) -> u32 {
        math::pack_rgb(self.r, self.g, self.b)
    }

    /// Packed `0xFFRRGGBB`.
    pub fn to_argb(&self) -> u32 {
        0xFF00_0000 | self.to_u32()
    }

    pub fn to_hsb(&self) -> Hsb {
        let (h, s, b) = math::rgb_to_hsb(self.r, self.g, self.b);
        Hsb { h, s, b }
    }

    /// Parse a hex string (with or without `#` or `0x`, 3 or 6 chars).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim();
        let stripped = stripped
            .strip_prefix('#')
            .or_else(|| stripped.strip_prefix("0x"))
            .unwrap_or(stripped);
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match stripped.len() {
            3 => {
                let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
                let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
                let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => u32::from_str_radix(stripped, 16).ok().map(Self::from_u32),
            _ => None,
        }
    }

    /// Format as uppercase hex with `#` prefix.
    pub fn to_hex(&self) -> String {
        math::web_string(self.to_u32(), 6)
    }
}

impl Hsb {
    pub const fn new(h: f64, s: f64, b: f64) -> Self {
        Self { h, s, b }
    }

    pub fn to_rgb(&self) -> Rgb {
        let (r, g, b) = math::hsb_to_rgb(self.h, self.s, self.b);
        Rgb { r, g, b }
    }
}

impl From<Rgb> for Hsb {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsb()
    }
}

impl From<Hsb> for Rgb {
    fn from(hsb: Hsb) -> Self {
        hsb.to_rgb()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Hsb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.h.round() as i64,
            (self.s * 100.0).round() as i64,
            (self.b * 100.0).round() as i64
        )
    }
}

/// Split `"a, b, c"` into three trimmed fields.
fn three_fields<'a>(s: &'a str, model: &'static str) -> Result<[&'a str; 3], WheelError> {
    let invalid = || WheelError::InvalidComponent {
        model,
        value: s.to_string(),
    };
    let mut parts = s.split(',').map(str::trim);
    let fields = [
        parts.next().ok_or_else(invalid)?,
        parts.next().ok_or_else(invalid)?,
        parts.next().ok_or_else(invalid)?,
    ];
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(fields)
}

impl FromStr for Rgb {
    type Err = WheelError;

    /// Accepts hex (`#0080FF`, `0x0080FF`, `08F`) or `"r, g, b"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains(',') {
            return Self::from_hex(s).ok_or_else(|| WheelError::InvalidHex(s.to_string()));
        }
        let [r, g, b] = three_fields(s, "rgb")?;
        let parse = |v: &str| {
            v.parse::<u8>().map_err(|_| WheelError::InvalidComponent {
                model: "rgb",
                value: v.to_string(),
            })
        };
        Ok(Self::new(parse(r)?, parse(g)?, parse(b)?))
    }
}

impl FromStr for Hsb {
    type Err = WheelError;

    /// Accepts `"h, s, b"` with hue in degrees and saturation/brightness in
    /// percent, the same shape `Display` produces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [h, sat, bri] = three_fields(s, "hsb")?;
        let parse = |v: &str| match v.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(WheelError::InvalidComponent {
                model: "hsb",
                value: v.to_string(),
            }),
        };
        Ok(Self::new(
            parse(h)?,
            parse(sat)? / 100.0,
            parse(bri)? / 100.0,
        ))
    }
}
