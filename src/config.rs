//! Wheel configuration and the ring layout derived from it.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::WheelError;

/// Where depth shadows are drawn between rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowMode {
    #[default]
    None,
    /// Shadow falls inward from each ring's inner edge.
    Inner,
    /// Shadow starts `spacing` below each ring's inner edge and falls
    /// outward across the gap, over the next ring's outer band.
    Outer,
}

/// Construction parameters for a [`ColorWheel`](crate::ColorWheel).
///
/// Fixed for the lifetime of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Outer radius of the hue ring.
    pub outer_radius: f64,
    /// Radius the innermost ring stops at (the swatch fills the rest).
    pub inner_radius: f64,
    /// Gap between consecutive rings.
    pub spacing: f64,
    pub shadow_mode: ShadowMode,
    /// Repaint saturation/brightness as two-colour gradients on every
    /// colour change instead of tinting a precomputed alpha ring.
    pub blended_gradient: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            outer_radius: constants::OUTER_RADIUS,
            inner_radius: constants::INNER_RADIUS,
            spacing: constants::SPACING,
            shadow_mode: ShadowMode::None,
            blended_gradient: false,
        }
    }
}

/// Radii of one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBand {
    pub outer: f64,
    pub inner: f64,
}

/// A shadow annulus: starts at `radius` and extends by `size` (signed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub radius: f64,
    pub size: f64,
}

/// Concrete geometry for the three rings, the swatch, and the shadows.
#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub hue: RingBand,
    pub saturation: RingBand,
    pub brightness: RingBand,
    pub swatch_radius: f64,
    pub shadows: Vec<ShadowSpec>,
}

impl WheelConfig {
    pub fn new(outer_radius: f64, inner_radius: f64, spacing: f64) -> Self {
        Self {
            outer_radius,
            inner_radius,
            spacing,
            ..Self::default()
        }
    }

    pub fn with_shadows(mut self, mode: ShadowMode) -> Self {
        self.shadow_mode = mode;
        self
    }

    pub fn with_blended_gradient(mut self, blended: bool) -> Self {
        self.blended_gradient = blended;
        self
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Reject radii that cannot hold three rings or exceed
    /// [`MAX_RADIUS`](constants::MAX_RADIUS).
    pub fn validate(self) -> Result<Self, WheelError> {
        let fields = [self.outer_radius, self.inner_radius, self.spacing];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(WheelError::InvalidConfig("non-finite radius or spacing".into()));
        }
        if self.inner_radius < 0.0 || self.spacing < 0.0 {
            return Err(WheelError::InvalidConfig("negative radius or spacing".into()));
        }
        if self.outer_radius > constants::MAX_RADIUS {
            return Err(WheelError::InvalidConfig(format!(
                "outer radius {} exceeds the maximum of {}",
                self.outer_radius,
                constants::MAX_RADIUS
            )));
        }
        if self.outer_radius <= self.inner_radius {
            return Err(WheelError::InvalidConfig(format!(
                "outer radius {} must exceed inner radius {}",
                self.outer_radius, self.inner_radius
            )));
        }
        if self.ring_thickness() < 1.0 {
            return Err(WheelError::InvalidConfig(format!(
                "spacing {} leaves no room for three rings",
                self.spacing
            )));
        }
        Ok(self)
    }

    /// Thickness shared by all three rings.
    pub fn ring_thickness(&self) -> f64 {
        (((self.outer_radius - self.inner_radius) - 3.0 * self.spacing) / 3.0).floor()
    }

    /// Lay rings out from the outside in.
    ///
    /// Inner rings overlap the previous ring's inner edge by one pixel so
    /// no gap shows when spacing is 0.
    pub fn layout(&self) -> RingLayout {
        let t = self.ring_thickness();
        let mut shadows = Vec::new();
        let mut edge = self.outer_radius;
        let mut bands = [RingBand { outer: 0.0, inner: 0.0 }; 3];

        for (i, band) in bands.iter_mut().enumerate() {
            let outer = if i == 0 { edge } else { edge + 1.0 };
            edge -= t;
            *band = RingBand { outer, inner: edge };

            if self.shadow_mode == ShadowMode::Inner {
                shadows.push(ShadowSpec {
                    radius: edge,
                    size: -constants::SHADOW_SIZE,
                });
            }
            edge -= self.spacing;
            if self.shadow_mode == ShadowMode::Outer {
                shadows.push(ShadowSpec {
                    radius: edge,
                    size: constants::SHADOW_SIZE,
                });
            }
        }

        RingLayout {
            hue: bands[0],
            saturation: bands[1],
            brightness: bands[2],
            swatch_radius: edge + 1.0,
            shadows,
        }
    }
}
