//! The composed HSB wheel: three rings around a result swatch.
//!
//! The wheel holds the authoritative HSB color. Rings are display and
//! input devices for one channel each; after every pointer-driven ring
//! change the wheel re-reads all three, recolors only the rings that
//! depend on the changed channel, and notifies its listener.

use floem::kurbo::{Point, Vec2};

use crate::color::{Hsb, Rgb};
use crate::config::{RingLayout, WheelConfig};
use crate::constants;
use crate::error::WheelError;
use crate::geometry::{clamp, normalize_angle};
use crate::ring::{RingControl, RingKind};
use crate::swatch::ColorSwatch;

type ChangeListener = Box<dyn FnMut(Hsb, Rgb)>;

/// Pointer input, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Enter,
    Leave(Point),
}

pub struct ColorWheel {
    config: WheelConfig,
    layout: RingLayout,
    hsb: Hsb,
    hue: RingControl,
    saturation: RingControl,
    brightness: RingControl,
    swatch: ColorSwatch,
    hit_order: [RingKind; 3],
    active: Option<RingKind>,
    pointer_down: bool,
    pointer_inside: bool,
    /// Page position of the wheel centre.
    position: Point,
    on_change: Option<ChangeListener>,
    finalized: bool,
}

impl std::fmt::Debug for ColorWheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorWheel")
            .field("hsb", &self.hsb)
            .field("active", &self.active)
            .field("pointer_down", &self.pointer_down)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl ColorWheel {
    /// Build a wheel, falling back to [`WheelConfig::default`] when
    /// `config` fails validation.
    pub fn new(config: WheelConfig) -> Self {
        match Self::try_new(config) {
            Ok(wheel) => wheel,
            Err(err) => {
                log::warn!("{err}; using the default wheel config");
                Self::build(WheelConfig::default())
            }
        }
    }

    /// Build a wheel from a validated `config`.
    pub fn try_new(config: WheelConfig) -> Result<Self, WheelError> {
        config.validate().map(Self::build)
    }

    fn build(config: WheelConfig) -> Self {
        let layout = config.layout();
        let blended = config.blended_gradient;
        let mut hue = RingControl::new(RingKind::Hue, layout.hue, blended);
        // The hue layer is composited on top, so every shadow goes there.
        for shadow in &layout.shadows {
            hue.add_shadow(
                shadow.radius,
                constants::SHADOW_COLOR,
                constants::SHADOW_FADE,
                shadow.size,
            );
        }

        let mut wheel = Self {
            config,
            hue,
            saturation: RingControl::new(RingKind::Saturation, layout.saturation, blended),
            brightness: RingControl::new(RingKind::Brightness, layout.brightness, blended),
            swatch: ColorSwatch::new(layout.swatch_radius),
            layout,
            hsb: Hsb::default(),
            hit_order: [RingKind::Hue, RingKind::Saturation, RingKind::Brightness],
            active: None,
            pointer_down: false,
            pointer_inside: false,
            position: Point::ZERO,
            on_change: None,
            finalized: false,
        };
        wheel.sync_rings();
        log::debug!(
            "color wheel created: outer {} inner {} spacing {} shadows {:?}",
            config.outer_radius,
            config.inner_radius,
            config.spacing,
            config.shadow_mode
        );
        wheel
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn ring(&self, kind: RingKind) -> &RingControl {
        match kind {
            RingKind::Hue => &self.hue,
            RingKind::Saturation => &self.saturation,
            RingKind::Brightness => &self.brightness,
        }
    }

    fn ring_mut(&mut self, kind: RingKind) -> &mut RingControl {
        match kind {
            RingKind::Hue => &mut self.hue,
            RingKind::Saturation => &mut self.saturation,
            RingKind::Brightness => &mut self.brightness,
        }
    }

    /// Rings bottom-up in compositing order.
    pub fn rings(&self) -> [&RingControl; 3] {
        [&self.brightness, &self.saturation, &self.hue]
    }

    pub fn swatch(&self) -> &ColorSwatch {
        &self.swatch
    }

    pub fn active_ring(&self) -> Option<RingKind> {
        self.active
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Whether the pointer is inside the wheel region. Moves are ignored
    /// until [`pointer_enter`](Self::pointer_enter).
    pub fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Register the change listener, replacing any previous one.
    ///
    /// Called with `(hsb, rgb)` after pointer-driven changes only.
    pub fn on_change(&mut self, listener: impl FnMut(Hsb, Rgb) + 'static) {
        if self.finalized {
            return;
        }
        self.on_change = Some(Box::new(listener));
    }

    pub fn hsb(&self) -> Hsb {
        self.hsb
    }

    pub fn rgb(&self) -> Rgb {
        self.hsb.to_rgb()
    }

    /// Current color packed as `0xRRGGBB`.
    pub fn color_int(&self) -> u32 {
        self.rgb().to_u32()
    }

    /// Set the color from HSB. Silent: the listener is not called.
    pub fn set_hsb(&mut self, hsb: Hsb) {
        self.hsb = Hsb {
            h: normalize_angle(hsb.h),
            s: clamp(hsb.s, 0.0, 1.0),
            b: clamp(hsb.b, 0.0, 1.0),
        };
        self.sync_rings();
    }

    /// Set the color from RGB. Silent: the listener is not called.
    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.set_hsb(rgb.to_hsb());
    }

    /// Move the wheel centre to `(x, y)` in page coordinates.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Order in which rings claim a pointer whose radius hits more than
    /// one band.
    pub fn set_hit_order(&mut self, order: [RingKind; 3]) {
        self.hit_order = order;
    }

    fn local(&self, page: Point) -> Vec2 {
        page - self.position
    }

    /// Ring under `page`, by distance from the centre.
    pub fn hit_test(&self, page: Point) -> Option<RingKind> {
        let radius = self.local(page).length();
        self.hit_order
            .iter()
            .copied()
            .find(|&kind| self.ring(kind).is_over(radius))
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
            PointerEvent::Enter => {
                self.pointer_enter();
                false
            }
            PointerEvent::Leave(p) => self.pointer_leave(p),
        }
    }

    pub fn pointer_enter(&mut self) {
        self.pointer_inside = true;
    }

    /// Start a drag on the hovered ring. Returns whether a drag started.
    pub fn pointer_down(&mut self, page: Point) -> bool {
        if self.finalized {
            return false;
        }
        let Some(kind) = self.active else {
            return false;
        };
        self.pointer_down = true;
        let local = self.local(page);
        self.ring_mut(kind).pointer_down(local);
        true
    }

    /// Track hover while idle, forward to the captured ring while dragging.
    /// Returns whether the color changed.
    pub fn pointer_move(&mut self, page: Point) -> bool {
        if self.finalized || !self.pointer_inside {
            return false;
        }
        if !self.pointer_down {
            let hit = self.hit_test(page);
            self.set_active(hit);
        }
        let Some(kind) = self.active else {
            return false;
        };
        let local = self.local(page);
        if self.ring_mut(kind).pointer_move(local) {
            self.ring_changed(kind);
            return true;
        }
        false
    }

    /// End a drag and re-check hover.
    pub fn pointer_up(&mut self, page: Point) -> bool {
        self.pointer_down = false;
        let Some(kind) = self.active else {
            return false;
        };
        self.ring_mut(kind).pointer_up();
        self.pointer_move(page)
    }

    /// Leaving the wheel ends any drag and clears hover.
    pub fn pointer_leave(&mut self, page: Point) -> bool {
        let changed = self.pointer_up(page);
        self.set_active(None);
        self.pointer_inside = false;
        changed
    }

    fn set_active(&mut self, next: Option<RingKind>) {
        if next == self.active {
            return;
        }
        if let Some(prev) = self.active {
            self.ring_mut(prev).pointer_out();
        }
        self.active = next;
        if let Some(kind) = next {
            self.ring_mut(kind).pointer_over();
        }
        log::debug!("active ring -> {:?}", next);
    }

    fn ring_changed(&mut self, kind: RingKind) {
        self.hsb = Hsb {
            h: self.hue.value(),
            s: self.saturation.value(),
            b: self.brightness.value(),
        };
        self.update_colors(kind == RingKind::Hue, kind != RingKind::Brightness);
        let (hsb, rgb) = (self.hsb, self.rgb());
        if let Some(listener) = self.on_change.as_mut() {
            listener(hsb, rgb);
        }
    }

    /// Push the HSB state into the rings without notifying.
    fn sync_rings(&mut self) {
        let Hsb { h, s, b } = self.hsb;
        self.hue.set_value(h);
        self.saturation.set_value(s);
        self.brightness.set_value(b);
        self.update_colors(true, true);
    }

    /// Saturation is tinted by hue, brightness by hue and saturation; the
    /// swatch always follows.
    fn update_colors(&mut self, saturation: bool, brightness: bool) {
        let Hsb { h, s, b } = self.hsb;
        if saturation {
            self.saturation.set_color(Hsb::new(h, 1.0, 1.0).to_rgb());
        }
        if brightness {
            self.brightness.set_color(Hsb::new(h, s, 1.0).to_rgb());
        }
        self.swatch.set_color(Hsb::new(h, s, b).to_rgb());
    }

    /// Release the listener and every surface. Idempotent.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        self.active = None;
        self.pointer_down = false;
        self.on_change = None;
        self.hue.finalize();
        self.saturation.finalize();
        self.brightness.finalize();
        self.swatch.finalize();
        log::debug!("color wheel finalized");
    }
}

impl Default for ColorWheel {
    fn default() -> Self {
        Self::new(WheelConfig::default())
    }
}

impl Drop for ColorWheel {
    fn drop(&mut self) {
        self.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::RingState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn wheel() -> ColorWheel {
        let mut w = ColorWheel::new(WheelConfig::new(190.0, 50.0, 0.0));
        w.set_position(300.0, 300.0);
        w
    }

    /// Page point at `radius` from the centre in screen angle `deg`.
    fn at(w: &ColorWheel, radius: f64, deg: f64) -> Point {
        let r = deg.to_radians();
        w.position() + Vec2::new(radius * r.cos(), radius * r.sin())
    }

    #[test]
    fn hit_test_follows_priority() {
        let w = wheel();
        // Hue [144,190], saturation [98,145], brightness [52,99].
        assert_eq!(w.hit_test(at(&w, 170.0, 0.0)), Some(RingKind::Hue));
        assert_eq!(w.hit_test(at(&w, 120.0, 0.0)), Some(RingKind::Saturation));
        assert_eq!(w.hit_test(at(&w, 75.0, 0.0)), Some(RingKind::Brightness));
        assert_eq!(w.hit_test(at(&w, 30.0, 0.0)), None);
        assert_eq!(w.hit_test(at(&w, 200.0, 0.0)), None);
        // The one-pixel overlap goes to the outer ring first.
        assert_eq!(w.hit_test(at(&w, 144.5, 0.0)), Some(RingKind::Hue));
    }

    #[test]
    fn custom_hit_order() {
        let mut w = wheel();
        w.set_hit_order([RingKind::Brightness, RingKind::Saturation, RingKind::Hue]);
        assert_eq!(w.hit_test(at(&w, 144.5, 0.0)), Some(RingKind::Saturation));
    }

    #[test]
    fn moves_before_enter_are_ignored() {
        let mut w = wheel();
        w.pointer_move(at(&w, 170.0, 0.0));
        assert_eq!(w.active_ring(), None);
        w.pointer_enter();
        w.pointer_move(at(&w, 170.0, 0.0));
        assert_eq!(w.active_ring(), Some(RingKind::Hue));
        assert_eq!(w.ring(RingKind::Hue).state(), RingState::Hovered);
    }

    #[test]
    fn hover_switches_rings() {
        let mut w = wheel();
        w.pointer_enter();
        w.pointer_move(at(&w, 170.0, 0.0));
        w.pointer_move(at(&w, 120.0, 0.0));
        assert_eq!(w.active_ring(), Some(RingKind::Saturation));
        assert_eq!(w.ring(RingKind::Hue).state(), RingState::Idle);
        assert_eq!(w.ring(RingKind::Saturation).state(), RingState::Hovered);
        w.pointer_move(at(&w, 10.0, 0.0));
        assert_eq!(w.active_ring(), None);
        assert_eq!(w.ring(RingKind::Saturation).state(), RingState::Idle);
    }

    #[test]
    fn down_outside_rings_does_nothing() {
        let mut w = wheel();
        w.pointer_enter();
        w.pointer_move(at(&w, 10.0, 0.0));
        assert!(!w.pointer_down(at(&w, 10.0, 0.0)));
        assert!(!w.is_pointer_down());
    }

    #[test]
    fn drag_does_not_retarget() {
        let mut w = wheel();
        w.pointer_enter();
        w.pointer_move(at(&w, 170.0, 0.0));
        w.pointer_down(at(&w, 170.0, 0.0));
        // Wander into the saturation band mid-drag.
        w.pointer_move(at(&w, 120.0, -30.0));
        assert_eq!(w.active_ring(), Some(RingKind::Hue));
        assert_eq!(w.ring(RingKind::Hue).state(), RingState::Dragging);
        assert!((w.hsb().h - 30.0).abs() < 1e-6, "{:?}", w.hsb());

        w.pointer_up(at(&w, 120.0, -30.0));
        assert_eq!(w.active_ring(), Some(RingKind::Saturation));
        assert_eq!(w.ring(RingKind::Hue).state(), RingState::Idle);
    }

    #[test]
    fn leave_ends_drag() {
        let mut w = wheel();
        w.pointer_enter();
        w.pointer_move(at(&w, 120.0, 0.0));
        w.pointer_down(at(&w, 120.0, 0.0));
        w.pointer_leave(at(&w, 120.0, 45.0));
        assert!(!w.is_pointer_down());
        assert_eq!(w.active_ring(), None);
        assert_eq!(w.ring(RingKind::Saturation).state(), RingState::Idle);
        // Further moves are ignored until the pointer re-enters.
        let before = w.hsb();
        w.pointer_move(at(&w, 120.0, 90.0));
        assert_eq!(w.hsb(), before);
    }

    #[test]
    fn saturation_drag_recolors_brightness_only() {
        let mut w = wheel();
        w.set_hsb(Hsb::new(120.0, 1.0, 1.0));
        let sat_tint = w.ring(RingKind::Saturation).tint().unwrap().generation();
        let bri_tint = w.ring(RingKind::Brightness).tint().unwrap().generation();

        w.pointer_enter();
        w.pointer_move(at(&w, 120.0, 0.0));
        w.pointer_down(at(&w, 120.0, 0.0));
        assert!(w.pointer_move(at(&w, 120.0, 90.0)));
        assert!((w.hsb().s - 0.5).abs() < 1e-9);

        assert_eq!(w.ring(RingKind::Saturation).tint().unwrap().generation(), sat_tint);
        assert!(w.ring(RingKind::Brightness).tint().unwrap().generation() > bri_tint);
        assert_eq!(w.ring(RingKind::Brightness).color(), Some(Rgb::new(128, 255, 128)));
        assert_eq!(w.swatch().color(), Some(w.rgb()));
    }

    #[test]
    fn brightness_drag_recolors_swatch_only() {
        let mut w = wheel();
        w.set_hsb(Hsb::new(240.0, 1.0, 1.0));
        let sat_tint = w.ring(RingKind::Saturation).tint().unwrap().generation();
        let bri_tint = w.ring(RingKind::Brightness).tint().unwrap().generation();
        let swatch = w.swatch().canvas().generation();

        w.pointer_enter();
        w.pointer_move(at(&w, 75.0, 0.0));
        w.pointer_down(at(&w, 75.0, 0.0));
        assert!(w.pointer_move(at(&w, 75.0, 90.0)));

        assert_eq!(w.ring(RingKind::Saturation).tint().unwrap().generation(), sat_tint);
        assert_eq!(w.ring(RingKind::Brightness).tint().unwrap().generation(), bri_tint);
        assert!(w.swatch().canvas().generation() > swatch);
        assert_eq!(w.swatch().color(), Some(Rgb::new(0, 0, 128)));
    }

    #[test]
    fn set_hsb_is_silent_and_normalized() {
        let calls = Rc::new(RefCell::new(0));
        let mut w = wheel();
        let sink = calls.clone();
        w.on_change(move |_, _| *sink.borrow_mut() += 1);

        w.set_hsb(Hsb::new(400.0, 1.5, -0.2));
        assert_eq!(*calls.borrow(), 0);
        let hsb = w.hsb();
        assert!((hsb.h - 40.0).abs() < 1e-9);
        assert_eq!((hsb.s, hsb.b), (1.0, 0.0));
        assert!((w.ring(RingKind::Hue).value() - 40.0).abs() < 1e-9);
        assert_eq!(w.ring(RingKind::Saturation).value(), 1.0);
        assert_eq!(w.ring(RingKind::Brightness).value(), 0.0);
    }

    #[test]
    fn default_color_is_red() {
        let w = ColorWheel::default();
        assert_eq!(w.rgb(), Rgb::new(255, 0, 0));
        assert_eq!(w.color_int(), 0xFF0000);
        assert_eq!(w.swatch().color(), Some(Rgb::new(255, 0, 0)));
        assert_eq!(w.ring(RingKind::Saturation).color(), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn shadows_follow_config() {
        use crate::config::ShadowMode;
        use crate::surface::{DrawOp, Paint};

        let w = ColorWheel::new(WheelConfig::new(190.0, 50.0, 10.0).with_shadows(ShadowMode::Inner));
        let radial = w
            .ring(RingKind::Hue)
            .canvas()
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Fill { paint: Paint::Radial { .. }, .. }))
            .count();
        assert_eq!(radial, 3);

        let plain = wheel();
        assert_eq!(plain.ring(RingKind::Hue).canvas().ops().len(), 360);
    }

    /// Drag the hue ring from 3 o'clock by `degrees` counter-clockwise.
    fn drag_hue(w: &mut ColorWheel, degrees: f64) {
        w.pointer_enter();
        w.pointer_move(at(w, 170.0, 0.0));
        w.pointer_down(at(w, 170.0, 0.0));
        assert!(w.pointer_move(at(w, 170.0, -degrees)));
        w.pointer_up(at(w, 170.0, -degrees));
    }

    #[test]
    fn hue_drag_recolors_both_dependents() {
        let mut w = wheel();
        w.set_hsb(Hsb::new(0.0, 0.5, 1.0));
        let sat_tint = w.ring(RingKind::Saturation).tint().unwrap().generation();
        let bri_tint = w.ring(RingKind::Brightness).tint().unwrap().generation();

        drag_hue(&mut w, 120.0);
        assert!((w.hsb().h - 120.0).abs() < 1e-6, "{:?}", w.hsb());

        assert!(w.ring(RingKind::Saturation).tint().unwrap().generation() > sat_tint);
        assert!(w.ring(RingKind::Brightness).tint().unwrap().generation() > bri_tint);
        assert_eq!(w.ring(RingKind::Saturation).color(), Some(Rgb::new(0, 255, 0)));
        assert_eq!(w.ring(RingKind::Brightness).color(), Some(Rgb::new(128, 255, 128)));
        assert_eq!(w.swatch().color(), Some(w.rgb()));
    }

    #[test]
    fn blended_hue_drag_repaints_gradient_rings() {
        let mut w = ColorWheel::new(WheelConfig::new(190.0, 50.0, 0.0).with_blended_gradient(true));
        w.set_position(300.0, 300.0);
        assert!(w.ring(RingKind::Saturation).tint().is_none());
        let sat = w.ring(RingKind::Saturation).canvas().generation();
        let bri = w.ring(RingKind::Brightness).canvas().generation();

        drag_hue(&mut w, 240.0);
        assert!((w.hsb().h - 240.0).abs() < 1e-6, "{:?}", w.hsb());

        let saturation = w.ring(RingKind::Saturation);
        assert!(saturation.canvas().generation() > sat);
        assert_eq!(saturation.canvas().ops().len(), 360);
        assert_eq!(saturation.color(), Some(Rgb::new(0, 0, 255)));
        assert!(w.ring(RingKind::Brightness).canvas().generation() > bri);
        assert_eq!(w.swatch().color(), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn invalid_config_is_rejected_or_replaced() {
        let bad = WheelConfig::new(40.0, 50.0, 0.0);
        assert!(matches!(
            ColorWheel::try_new(bad),
            Err(WheelError::InvalidConfig(_))
        ));
        assert!(ColorWheel::try_new(WheelConfig::new(17000.0, 16990.0, 0.0)).is_err());

        let mut w = ColorWheel::new(bad);
        assert_eq!(*w.config(), WheelConfig::default());
        let hue = w.layout().hue;
        assert!(hue.outer > hue.inner);
        w.set_position(300.0, 300.0);
        assert_eq!(w.hit_test(at(&w, 190.0, 0.0)), Some(RingKind::Hue));
    }

    #[test]
    fn enter_and_leave_gate_tracking() {
        let mut w = wheel();
        assert!(!w.is_pointer_inside());
        w.handle_pointer(PointerEvent::Enter);
        assert!(w.is_pointer_inside());
        w.handle_pointer(PointerEvent::Leave(at(&w, 170.0, 0.0)));
        assert!(!w.is_pointer_inside());
        w.handle_pointer(PointerEvent::Move(at(&w, 170.0, 0.0)));
        assert_eq!(w.active_ring(), None);
    }

    #[test]
    fn finalize_is_idempotent() {
        let calls = Rc::new(RefCell::new(0));
        let mut w = wheel();
        let sink = calls.clone();
        w.on_change(move |_, _| *sink.borrow_mut() += 1);
        w.pointer_enter();
        w.pointer_move(at(&w, 170.0, 0.0));

        w.finalize();
        w.finalize();
        assert!(w.is_finalized());
        assert_eq!(w.active_ring(), None);
        assert!(w.rings().iter().all(|r| r.canvas().is_released()));
        assert!(w.swatch().canvas().is_released());

        assert!(!w.pointer_down(at(&w, 170.0, 0.0)));
        assert!(!w.pointer_move(at(&w, 170.0, 40.0)));
        assert_eq!(*calls.borrow(), 0);
    }
}
