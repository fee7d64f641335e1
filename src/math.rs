//! Color math: direct conversions between packed, RGB and HSB colors.
//!
//! Hue is in degrees (0–360), saturation and brightness in 0.0–1.0, RGB
//! channels in 0–255. Packed colors are `0xAARRGGBB`.

/// RGB (0–255) → HSB/HSV. Returns (hue°, saturation, brightness).
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        (60.0 * (g - b) / delta + 360.0) % 360.0
    } else if max == g {
        60.0 * (b - r) / delta + 120.0
    } else {
        60.0 * (r - g) / delta + 240.0
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max / 255.0)
}

/// HSB/HSV → RGB (0–255). Hue in degrees; 360 wraps to red.
pub fn hsb_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (channel(r), channel(g), channel(b))
}

fn channel(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Pack RGB channels into `0xRRGGBB` (alpha 0).
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split a packed color into (a, r, g, b).
pub fn unpack_argb(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24 & 0xFF) as u8,
        (color >> 16 & 0xFF) as u8,
        (color >> 8 & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Blend two packed ARGB colors channel by channel.
///
/// `progress` 0.0 yields `from`, 1.0 yields `to`. Blended channels are
/// truncated, not rounded.
pub fn interpolate_color(from: u32, to: u32, progress: f64) -> u32 {
    let q = 1.0 - progress;
    let mix = |shift: u32| {
        let a = (from >> shift & 0xFF) as f64;
        let b = (to >> shift & 0xFF) as f64;
        ((a * q + b * progress) as u32 & 0xFF) << shift
    };
    mix(24) | mix(16) | mix(8) | mix(0)
}

/// `#RRGGBB`-style string, zero-padded to `len` hex digits.
pub fn web_string(color: u32, len: usize) -> String {
    format!("#{:0len$X}", color, len = len)
}

/// `rgb(r,g,b)` string; alpha is ignored.
pub fn rgb_string(color: u32) -> String {
    let (_, r, g, b) = unpack_argb(color);
    format!("rgb({},{},{})", r, g, b)
}

/// `rgba(r,g,b, a)` string with alpha normalized to 0.0–1.0.
pub fn rgba_string(color: u32) -> String {
    let (a, r, g, b) = unpack_argb(color);
    format!("rgba({},{},{}, {})", r, g, b, a as f64 / 255.0)
}
