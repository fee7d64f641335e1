//! Sizing, color, and styling constants for the wheel.

/// Default outer radius of the hue ring
pub const OUTER_RADIUS: f64 = 200.0;

/// Default inner radius of the innermost ring
pub const INNER_RADIUS: f64 = 50.0;

/// Largest accepted outer radius; ring rasters are `2 * radius` pixels square
pub const MAX_RADIUS: f64 = 4096.0;

/// Default gap between rings
pub const SPACING: f64 = 0.0;

/// Angular step between spectrum/gradient slices, in degrees
pub const SLICE_STEP: f64 = 1.0;

/// Half-width of each painted slice; slices overlap to hide seams
pub const SLICE_OVERLAP: f64 = 1.0;

/// Largest arc piece approximated by a single quadratic curve, in degrees
pub const ARC_PIECE: f64 = 45.0;

/// Where the hue spectrum starts painting (12 o'clock in segment space)
pub const SPECTRUM_START: f64 = 180.0;

/// Shadow start color (ARGB)
pub const SHADOW_COLOR: u32 = 0x7700_0000;

/// Shadow end color (ARGB, fully transparent)
pub const SHADOW_FADE: u32 = 0x0000_0000;

/// Shadow thickness
pub const SHADOW_SIZE: f64 = 10.0;

/// Indicator triangle width
pub const INDICATOR_WIDTH: f64 = 6.0;

/// Indicator triangle height
pub const INDICATOR_HEIGHT: f64 = 15.0;

/// Indicator opacity while a ring is hovered or dragged
pub const INDICATOR_OPACITY: f64 = 0.6;

/// Rotation quantization for cached ring images (steps per degree)
pub const ROTATION_CACHE_STEPS: f64 = 10.0;
