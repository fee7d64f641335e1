//! Floem view hosting a [`ColorWheel`].
//!
//! Replays each canvas's display list every paint. Rings are turned by
//! their rotation: vector fills through an affine transform, pixel layers
//! by resampling into a cached image keyed on canvas generation and
//! quantized rotation.

use std::collections::HashMap;
use std::sync::Arc;

use floem::kurbo::{Affine, BezPath, Point, Rect};
use floem::peniko::{self, Blob, Color, Gradient};

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Hsb;
use crate::config::WheelConfig;
use crate::constants;
use crate::geometry::normalize_angle;
use crate::math;
use crate::ring::RingKind;
use crate::surface::{Canvas, DrawOp, Paint, PixelBuffer};
use crate::wheel::{ColorWheel, PointerEvent};

enum WheelUpdate {
    Color(Hsb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Layer {
    Swatch,
    Tint(RingKind),
    Ring(RingKind),
}

struct CachedImage {
    generation: u64,
    rotation: i64,
    img: peniko::Image,
    hash: Vec<u8>,
}

type ImageCache = HashMap<(Layer, usize), CachedImage>;

pub struct HsbWheelView {
    id: ViewId,
    wheel: ColorWheel,
    size: floem::taffy::prelude::Size<f32>,
    last_pointer: Point,
    images: ImageCache,
}

/// Creates the radial HSB picker view.
///
/// The wheel reads from and writes to `color`. External changes to the
/// signal turn the rings silently; dragging a ring updates the signal.
/// An invalid `config` is logged and replaced by the default one.
pub fn hsb_wheel(color: RwSignal<Hsb>, config: WheelConfig) -> HsbWheelView {
    let id = ViewId::new();

    create_effect(move |_| {
        let hsb = color.get();
        id.update_state(WheelUpdate::Color(hsb));
    });

    let mut wheel = ColorWheel::new(config);
    wheel.set_hsb(color.get_untracked());
    wheel.on_change(move |hsb, _| color.set(hsb));

    let side = (wheel.config().outer_radius * 2.0).ceil() as f32;

    HsbWheelView {
        id,
        wheel,
        size: Default::default(),
        last_pointer: Point::ZERO,
        images: HashMap::new(),
    }
    .style(move |s| {
        s.width(side)
            .height(side)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl HsbWheelView {
    pub fn wheel(&self) -> &ColorWheel {
        &self.wheel
    }

    fn center(&self) -> Point {
        Point::new(
            self.size.width as f64 / 2.0,
            self.size.height as f64 / 2.0,
        )
    }

    /// Floem only delivers pointer events over the view (or to it while
    /// it holds the pointer), so the first one after a leave is the enter.
    fn track(&mut self, pos: Point) {
        self.last_pointer = pos;
        if !self.wheel.is_pointer_inside() {
            self.wheel.handle_pointer(PointerEvent::Enter);
        }
    }
}

fn argb_color(argb: u32) -> Color {
    let (a, r, g, b) = math::unpack_argb(argb);
    Color::rgba8(r, g, b, a)
}

/// Image for a pixel op, re-rasterized when the canvas or the rotation
/// changed since the last paint.
fn ensure_image<'a>(
    cache: &'a mut ImageCache,
    key: (Layer, usize),
    generation: u64,
    rotation: f64,
    pixels: &PixelBuffer,
) -> Option<&'a CachedImage> {
    let steps = constants::ROTATION_CACHE_STEPS;
    let turn = (360.0 * steps) as i64;
    let rotation_key = ((normalize_angle(rotation) * steps).round() as i64).rem_euclid(turn);

    let fresh = cache
        .get(&key)
        .is_some_and(|c| c.generation == generation && c.rotation == rotation_key);
    if !fresh {
        let (w, h) = (pixels.width(), pixels.height());
        if w == 0 || h == 0 {
            return None;
        }
        let raster = if rotation_key == 0 {
            pixels.clone()
        } else {
            pixels.rotated(rotation_key as f64 / steps)
        };
        let blob = Blob::new(Arc::new(raster.into_data()));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, w, h);
        let hash = blob.id().to_le_bytes().to_vec();
        cache.insert(
            key,
            CachedImage {
                generation,
                rotation: rotation_key,
                img,
                hash,
            },
        );
    }
    cache.get(&key)
}

/// Replay `canvas` with its centre at `center`, turned by `rotation` degrees.
fn paint_canvas(
    cx: &mut PaintCx,
    cache: &mut ImageCache,
    layer: Layer,
    canvas: &Canvas,
    center: Point,
    rotation: f64,
) {
    let origin = center - canvas.center().to_vec2();
    let transform = Affine::translate(origin.to_vec2())
        * Affine::rotate_about(rotation.to_radians(), canvas.center());

    for (index, op) in canvas.ops().iter().enumerate() {
        match op {
            DrawOp::Fill { path, paint } => {
                let path: BezPath = transform * path.clone();
                match *paint {
                    Paint::Solid(argb) => cx.fill(&path, argb_color(argb), 0.0),
                    Paint::Radial {
                        center: focus,
                        start_radius,
                        end_radius,
                        from,
                        to,
                    } => {
                        let c = transform * focus;
                        let gradient = Gradient::new_two_point_radial(
                            c,
                            start_radius as f32,
                            c,
                            end_radius as f32,
                        )
                        .with_stops([argb_color(from), argb_color(to)]);
                        cx.fill(&path, &gradient, 0.0);
                    }
                }
            }
            DrawOp::Pixels { origin: at, pixels } => {
                let key = (layer, index);
                let Some(entry) = ensure_image(cache, key, canvas.generation(), rotation, pixels)
                else {
                    continue;
                };
                let rect = Rect::from_origin_size(
                    origin + at.to_vec2(),
                    (pixels.width() as f64, pixels.height() as f64),
                );
                cx.draw_img(
                    floem_renderer::Img {
                        img: entry.img.clone(),
                        hash: &entry.hash,
                    },
                    rect,
                );
            }
        }
    }
}

/// Downward triangle at the top of a ring of `outer` radius.
fn indicator_path(center: Point, outer: f64) -> BezPath {
    let top = center.y - outer;
    let half = constants::INDICATOR_WIDTH / 2.0;
    let mut path = BezPath::new();
    path.move_to((center.x - half, top));
    path.line_to((center.x + half, top));
    path.line_to((center.x, top + constants::INDICATOR_HEIGHT));
    path.close_path();
    path
}

impl View for HsbWheelView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<WheelUpdate>() {
            match *update {
                WheelUpdate::Color(hsb) => {
                    if hsb != self.wheel.hsb() {
                        self.wheel.set_hsb(hsb);
                    }
                }
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                self.track(e.pos);
                self.wheel.pointer_move(e.pos);
                if self.wheel.pointer_down(e.pos) {
                    cx.update_active(self.id());
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                self.track(e.pos);
                self.wheel.pointer_move(e.pos);
                self.id.request_layout();
                if self.wheel.is_pointer_down() {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                self.last_pointer = e.pos;
                self.wheel.pointer_up(e.pos);
                self.id.request_layout();
                EventPropagation::Continue
            }
            Event::PointerLeave | Event::FocusLost => {
                self.wheel.pointer_leave(self.last_pointer);
                self.id.request_layout();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        let center = self.center();
        self.wheel.set_position(center.x, center.y);
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 || self.wheel.is_finalized() {
            return;
        }
        let center = self.center();

        paint_canvas(
            cx,
            &mut self.images,
            Layer::Swatch,
            self.wheel.swatch().canvas(),
            center,
            0.0,
        );

        for ring in self.wheel.rings() {
            let kind = ring.kind();
            if let Some(tint) = ring.tint() {
                paint_canvas(cx, &mut self.images, Layer::Tint(kind), tint, center, 0.0);
            }
            paint_canvas(
                cx,
                &mut self.images,
                Layer::Ring(kind),
                ring.canvas(),
                center,
                ring.rotation(),
            );
        }

        for ring in self.wheel.rings() {
            let opacity = ring.indicator_opacity();
            if opacity > 0.0 {
                let path = indicator_path(center, ring.band().outer);
                cx.fill(&path, Color::rgba(0.0, 0.0, 0.0, opacity), 0.0);
            }
        }
    }
}
