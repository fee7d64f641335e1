//! One interactive ring of the wheel.
//!
//! A ring turns under the pointer; its value is read off the rotation at
//! the fixed 12 o'clock indicator. The hue ring maps one full turn onto
//! 0–360°, saturation and brightness map a half turn onto 1.0–0.0 and
//! mirror the other half, so dragging either way from the top lowers the
//! value.

use floem::kurbo::{Point, Vec2};

use crate::color::Rgb;
use crate::config::RingBand;
use crate::constants;
use crate::geometry::{clamp, normalize_angle, screen_angle};
use crate::render;
use crate::surface::{Canvas, Surface};

/// Which HSB channel a ring controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingKind {
    Hue,
    Saturation,
    Brightness,
}

impl RingKind {
    /// Degrees of rotation spanning the full value range.
    pub fn factor(self) -> f64 {
        match self {
            RingKind::Hue => 360.0,
            RingKind::Saturation | RingKind::Brightness => 180.0,
        }
    }

    /// Color the ring fades toward at zero value.
    fn edge_color(self) -> u32 {
        match self {
            RingKind::Saturation => 0xFFFF_FFFF,
            _ => 0xFF00_0000,
        }
    }
}

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RingState {
    #[default]
    Idle,
    Hovered,
    Dragging,
}

type RingListener = Box<dyn FnMut(RingKind, f64)>;

pub struct RingControl {
    kind: RingKind,
    band: RingBand,
    blended: bool,
    /// Normalized 0.0–1.0 (hue: 0.0–<1.0).
    value: f64,
    /// Degrees, clockwise; may leave 0–360 while dragging.
    rotation: f64,
    rotation_delta: f64,
    state: RingState,
    color: Option<Rgb>,
    /// Rotated layer: spectrum, alpha ring, or blended gradient.
    canvas: Canvas,
    /// Unrotated flat tint under the alpha ring (bitmap mode only).
    tint: Option<Canvas>,
    listener: Option<RingListener>,
}

impl std::fmt::Debug for RingControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingControl")
            .field("kind", &self.kind)
            .field("band", &self.band)
            .field("value", &self.value)
            .field("rotation", &self.rotation)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RingControl {
    /// Create a ring and paint its static layer.
    ///
    /// With `blended` the saturation/brightness layer is repainted as a
    /// gradient on every [`set_color`](Self::set_color); otherwise a
    /// precomputed alpha ring sits over a flat tint.
    pub fn new(kind: RingKind, band: RingBand, blended: bool) -> Self {
        let side = (band.outer * 2.0).ceil().max(0.0) as u32;
        let tint = (!blended && kind != RingKind::Hue).then(|| Canvas::new(side, side));
        let mut ring = Self {
            kind,
            band,
            blended,
            value: 0.0,
            rotation: 0.0,
            rotation_delta: 0.0,
            state: RingState::Idle,
            color: None,
            canvas: Canvas::new(side, side),
            tint,
            listener: None,
        };
        ring.set_value(ring.external_value());
        ring.paint_static();
        ring
    }

    pub fn kind(&self) -> RingKind {
        self.kind
    }

    pub fn band(&self) -> RingBand {
        self.band
    }

    pub fn state(&self) -> RingState {
        self.state
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Ring centre in canvas coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.band.outer, self.band.outer)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn tint(&self) -> Option<&Canvas> {
        self.tint.as_ref()
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    /// Opacity of the 12 o'clock indicator.
    pub fn indicator_opacity(&self) -> f64 {
        match self.state {
            RingState::Idle => 0.0,
            RingState::Hovered | RingState::Dragging => constants::INDICATOR_OPACITY,
        }
    }

    /// Register the change listener, replacing any previous one.
    pub fn on_change(&mut self, listener: impl FnMut(RingKind, f64) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Value in channel units: degrees for hue, 0.0–1.0 otherwise.
    pub fn value(&self) -> f64 {
        self.external_value()
    }

    fn external_value(&self) -> f64 {
        match self.kind {
            RingKind::Hue => self.value * 360.0,
            _ => self.value,
        }
    }

    /// Set the value in channel units and turn the ring to match.
    ///
    /// The listener fires only when the stored value actually changes.
    /// Returns whether it did.
    pub fn set_value(&mut self, value: f64) -> bool {
        let normalized = match self.kind {
            RingKind::Hue => value / 360.0,
            _ => value,
        };
        let mut v = clamp(normalized, 0.0, 1.0);
        if self.kind == RingKind::Hue && v >= 1.0 {
            v = 0.0;
        }
        self.rotation = (1.0 - v) * self.kind.factor();
        self.store(v)
    }

    fn store(&mut self, v: f64) -> bool {
        if v == self.value {
            return false;
        }
        self.value = v;
        log::trace!("{:?} ring value -> {:.4}", self.kind, self.external_value());
        let external = self.external_value();
        if let Some(listener) = self.listener.as_mut() {
            listener(self.kind, external);
        }
        true
    }

    /// Re-derive the value from the current rotation.
    fn value_from_rotation(&self) -> f64 {
        let mut r = normalize_angle(self.rotation);
        if self.kind != RingKind::Hue && r > 180.0 {
            r = 360.0 - r;
        }
        let v = 1.0 - clamp(r / self.kind.factor(), 0.0, 1.0);
        if self.kind == RingKind::Hue && v >= 1.0 { 0.0 } else { v }
    }

    /// Whether `radius` falls within this ring's band (inclusive).
    pub fn is_over(&self, radius: f64) -> bool {
        radius >= self.band.inner && radius <= self.band.outer
    }

    pub fn pointer_over(&mut self) {
        if self.state == RingState::Idle {
            self.state = RingState::Hovered;
        }
    }

    pub fn pointer_out(&mut self) {
        if self.state == RingState::Hovered {
            self.state = RingState::Idle;
        }
    }

    /// Start a drag. `local` is relative to the ring centre.
    ///
    /// Captures the offset between rotation and pointer angle so the ring
    /// follows the pointer instead of jumping to it.
    pub fn pointer_down(&mut self, local: Vec2) {
        self.rotation_delta = self.rotation - screen_angle(local);
        self.state = RingState::Dragging;
        log::debug!("{:?} ring drag start at {:.1}°", self.kind, self.rotation);
    }

    /// Follow the pointer while dragging. Returns whether the value changed.
    pub fn pointer_move(&mut self, local: Vec2) -> bool {
        if self.state != RingState::Dragging {
            return false;
        }
        self.rotation = screen_angle(local) + self.rotation_delta;
        let v = self.value_from_rotation();
        self.store(v)
    }

    pub fn pointer_up(&mut self) {
        if self.state == RingState::Dragging {
            self.state = RingState::Hovered;
            log::debug!("{:?} ring drag end at {:.4}", self.kind, self.external_value());
        }
    }

    /// Tint the ring with its base color; no-op for the hue ring or an
    /// unchanged color.
    pub fn set_color(&mut self, color: Rgb) {
        if self.kind == RingKind::Hue || self.color == Some(color) {
            return;
        }
        self.color = Some(color);
        self.paint_tint();
    }

    /// Draw a depth shadow on this ring's rotated layer.
    pub fn add_shadow(&mut self, radius: f64, from: u32, to: u32, size: f64) {
        let center = self.center();
        render::fill_shadow(&mut self.canvas, center, radius, size, from, to);
    }

    /// Release the surfaces and the listener. Safe to call repeatedly.
    pub fn finalize(&mut self) {
        self.listener = None;
        self.state = RingState::Idle;
        self.canvas.release();
        if let Some(tint) = self.tint.as_mut() {
            tint.release();
        }
    }

    fn paint_static(&mut self) {
        let (outer, inner, center) = (self.band.outer, self.band.inner, self.center());
        match self.kind {
            RingKind::Hue => {
                let start = constants::SPECTRUM_START;
                render::fill_spectrum(&mut self.canvas, start, start + 360.0, outer, inner, center);
            }
            kind if !self.blended => {
                let pixels = render::rasterize_alpha_ring(kind.edge_color(), outer, inner);
                self.canvas.put_pixels(Point::ZERO, pixels);
            }
            _ => {}
        }
    }

    fn paint_tint(&mut self) {
        let Some(color) = self.color else {
            return;
        };
        let (outer, inner, center) = (self.band.outer, self.band.inner, self.center());
        log::trace!("{:?} ring tint {}", self.kind, color);
        if self.blended {
            self.canvas.clear();
            render::fill_symmetric_gradient(
                &mut self.canvas,
                self.kind.edge_color(),
                color.to_argb(),
                outer,
                inner,
                center,
            );
        } else if let Some(tint) = self.tint.as_mut() {
            tint.clear();
            tint.put_pixels(Point::ZERO, render::rasterize_disk(color.to_u32(), outer, inner));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawOp;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn band() -> RingBand {
        RingBand {
            outer: 100.0,
            inner: 60.0,
        }
    }

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {a} ~= {b}");
    }

    /// Pointer at `deg` on a circle of radius 80, screen angle convention.
    fn at(deg: f64) -> Vec2 {
        let r = deg.to_radians();
        Vec2::new(80.0 * r.cos(), 80.0 * r.sin())
    }

    #[test]
    fn half_turn_rings_round_trip_values() {
        for kind in [RingKind::Saturation, RingKind::Brightness] {
            let mut ring = RingControl::new(kind, band(), false);
            for v in [0.0, 0.25, 0.5, 0.75, 1.0] {
                ring.set_value(v);
                approx_eq(ring.value(), v);
                approx_eq(ring.value_from_rotation(), v);
            }
        }
    }

    #[test]
    fn hue_ring_wraps_full_turn() {
        let mut ring = RingControl::new(RingKind::Hue, band(), false);
        ring.set_value(90.0);
        approx_eq(ring.value(), 90.0);
        approx_eq(ring.rotation(), 270.0);

        ring.set_value(360.0);
        approx_eq(ring.value(), 0.0);
        approx_eq(ring.value_from_rotation(), 0.0);

        ring.set_value(-20.0);
        approx_eq(ring.value(), 0.0);
    }

    #[test]
    fn values_are_clamped() {
        let mut ring = RingControl::new(RingKind::Saturation, band(), false);
        ring.set_value(1.5);
        approx_eq(ring.value(), 1.0);
        ring.set_value(-0.5);
        approx_eq(ring.value(), 0.0);
        approx_eq(ring.rotation(), 180.0);
    }

    #[test]
    fn hit_test_is_inclusive() {
        let ring = RingControl::new(RingKind::Brightness, band(), false);
        assert!(ring.is_over(60.0));
        assert!(ring.is_over(100.0));
        assert!(ring.is_over(80.0));
        assert!(!ring.is_over(60.0 - 1e-9));
        assert!(!ring.is_over(100.0 + 1e-9));
    }

    #[test]
    fn listener_fires_only_on_change() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut ring = RingControl::new(RingKind::Saturation, band(), false);
        ring.set_value(0.5);
        let sink = fired.clone();
        ring.on_change(move |kind, v| sink.borrow_mut().push((kind, v)));

        assert!(!ring.set_value(0.5));
        assert!(fired.borrow().is_empty());

        assert!(ring.set_value(0.75));
        assert_eq!(*fired.borrow(), vec![(RingKind::Saturation, 0.75)]);
    }

    #[test]
    fn hover_and_drag_states() {
        let mut ring = RingControl::new(RingKind::Hue, band(), false);
        assert_eq!(ring.state(), RingState::Idle);
        assert_eq!(ring.indicator_opacity(), 0.0);

        ring.pointer_over();
        assert_eq!(ring.state(), RingState::Hovered);
        assert_eq!(ring.indicator_opacity(), constants::INDICATOR_OPACITY);

        ring.pointer_down(at(0.0));
        assert_eq!(ring.state(), RingState::Dragging);
        // Hover-out does not cancel a drag.
        ring.pointer_out();
        assert_eq!(ring.state(), RingState::Dragging);

        ring.pointer_up();
        assert_eq!(ring.state(), RingState::Hovered);
        ring.pointer_out();
        assert_eq!(ring.state(), RingState::Idle);
    }

    #[test]
    fn drag_is_relative_to_grab_point() {
        let mut ring = RingControl::new(RingKind::Saturation, band(), false);
        ring.set_value(1.0);
        ring.pointer_over();
        // Grab anywhere: no jump until the pointer turns.
        ring.pointer_down(at(37.0));
        assert!(!ring.pointer_move(at(37.0)));
        approx_eq(ring.value(), 1.0);

        // Quarter turn either way lands on half saturation.
        assert!(ring.pointer_move(at(37.0 + 90.0)));
        assert!((ring.value() - 0.5).abs() < 1e-9);
        ring.pointer_move(at(37.0));
        ring.pointer_move(at(37.0 - 90.0));
        assert!((ring.value() - 0.5).abs() < 1e-9);

        // Half a turn reaches zero.
        ring.pointer_move(at(37.0 + 180.0));
        assert!(ring.value().abs() < 1e-9);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut ring = RingControl::new(RingKind::Hue, band(), false);
        ring.pointer_over();
        assert!(!ring.pointer_move(at(45.0)));
        approx_eq(ring.value(), 0.0);
    }

    #[test]
    fn hue_ring_paints_spectrum_once() {
        let mut ring = RingControl::new(RingKind::Hue, band(), false);
        assert_eq!(ring.canvas().ops().len(), 360);
        assert!(ring.tint().is_none());
        let g = ring.canvas().generation();
        ring.set_color(Rgb::new(1, 2, 3));
        assert_eq!(ring.canvas().generation(), g);
    }

    #[test]
    fn bitmap_mode_tints_separate_layer() {
        let mut ring = RingControl::new(RingKind::Brightness, band(), false);
        assert!(matches!(ring.canvas().ops(), [DrawOp::Pixels { .. }]));
        let base = ring.canvas().generation();

        ring.set_color(Rgb::new(0, 128, 255));
        let tint = ring.tint().unwrap();
        assert_eq!(tint.ops().len(), 1);
        assert_eq!(ring.canvas().generation(), base);

        // Same color again does not repaint.
        let g = ring.tint().unwrap().generation();
        ring.set_color(Rgb::new(0, 128, 255));
        assert_eq!(ring.tint().unwrap().generation(), g);
    }

    #[test]
    fn blended_mode_repaints_gradient() {
        let mut ring = RingControl::new(RingKind::Saturation, band(), true);
        assert!(ring.canvas().ops().is_empty());
        assert!(ring.tint().is_none());
        ring.set_color(Rgb::new(255, 0, 0));
        assert_eq!(ring.canvas().ops().len(), 360);
        ring.set_color(Rgb::new(0, 255, 0));
        assert_eq!(ring.canvas().ops().len(), 360);
    }

    #[test]
    fn shadows_land_on_rotated_layer() {
        let mut ring = RingControl::new(RingKind::Hue, band(), false);
        ring.add_shadow(60.0, constants::SHADOW_COLOR, constants::SHADOW_FADE, -10.0);
        assert_eq!(ring.canvas().ops().len(), 361);
    }

    #[test]
    fn finalize_releases_everything() {
        let fired = Rc::new(RefCell::new(0));
        let mut ring = RingControl::new(RingKind::Saturation, band(), false);
        let sink = fired.clone();
        ring.on_change(move |_, _| *sink.borrow_mut() += 1);
        ring.finalize();
        ring.finalize();
        assert!(ring.canvas().is_released());
        assert!(ring.tint().unwrap().is_released());
        ring.set_value(0.3);
        assert_eq!(*fired.borrow(), 0);
    }
}
