//! Ring painting routines.
//!
//! Segment angles use the [`polar`] convention: 0° points down and 180°
//! points up (12 o'clock). Pixel routines sample at integer pixel
//! positions with the ring centred at `(outer, outer)`.

use floem::kurbo::{BezPath, Point};

use crate::constants;
use crate::geometry::{normalize_angle, polar, DEG_TO_RAD, RAD_TO_DEG};
use crate::math;
use crate::surface::{Paint, PixelBuffer, Surface};

/// Closed annular segment path between `start_angle` and `end_angle`
/// (degrees), or `None` for a zero-width sweep.
///
/// Radii and angles are swapped into order; sweeps are capped at a full
/// turn. Arcs are approximated with quadratic curves of at most
/// [`constants::ARC_PIECE`] degrees each.
pub fn circle_segment(
    start_angle: f64,
    end_angle: f64,
    outer_radius: f64,
    inner_radius: f64,
    center: Point,
) -> Option<BezPath> {
    let (mut start, mut end) = (start_angle, end_angle);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    let sweep = (end - start).min(360.0);
    if sweep <= 0.0 {
        return None;
    }
    let (outer, inner) = if inner_radius > outer_radius {
        (inner_radius, outer_radius)
    } else {
        (outer_radius, inner_radius)
    };
    let start = normalize_angle(start);
    let end = start + sweep;

    let at = |radius: f64, deg: f64| center + polar(radius, deg * DEG_TO_RAD);

    let mut path = BezPath::new();
    path.move_to(at(inner, start));
    path.line_to(at(outer, start));
    arc_to(&mut path, center, outer, start, end);
    path.line_to(at(inner, end));
    if inner > 0.0 {
        arc_to(&mut path, center, inner, end, start);
    }
    path.close_path();
    Some(path)
}

/// Append an arc from `from` to `to` degrees (either direction) at `radius`.
fn arc_to(path: &mut BezPath, center: Point, radius: f64, from: f64, to: f64) {
    let pieces = ((to - from).abs() / constants::ARC_PIECE).ceil().max(1.0);
    let step = (to - from) / pieces;
    let control_radius = radius / (step * 0.5 * DEG_TO_RAD).cos();
    for i in 0..pieces as usize {
        let a = from + step * i as f64;
        let control = center + polar(control_radius, (a + step * 0.5) * DEG_TO_RAD);
        let end = center + polar(radius, (a + step) * DEG_TO_RAD);
        path.quad_to(control, end);
    }
}

/// Normalized sweep `(start, end)` with `end > start`, wrapping `end` by a
/// full turn when needed.
fn sweep(start_angle: f64, end_angle: f64) -> (f64, f64) {
    let start = normalize_angle(start_angle);
    let mut end = normalize_angle(end_angle);
    if end <= start {
        end += 360.0;
    }
    (start, end)
}

/// Paint a hue spectrum over the sweep, one slice per degree.
///
/// Hue 0 is painted at `end_angle` and increases as the angle decreases,
/// so with the default 180°→540° sweep red sits at 12 o'clock and hue
/// grows clockwise.
pub fn fill_spectrum<S: Surface + ?Sized>(
    surface: &mut S,
    start_angle: f64,
    end_angle: f64,
    outer_radius: f64,
    inner_radius: f64,
    center: Point,
) {
    let (start, end) = sweep(start_angle, end_angle);
    let slices = ((end - start) / constants::SLICE_STEP).round() as usize;
    let multiplier = 360.0 / slices as f64;
    for i in 0..slices {
        let pos = end - i as f64 * constants::SLICE_STEP;
        let (r, g, b) = math::hsb_to_rgb(i as f64 * multiplier, 1.0, 1.0);
        let path = circle_segment(
            pos - constants::SLICE_OVERLAP,
            pos + constants::SLICE_OVERLAP,
            outer_radius,
            inner_radius,
            center,
        );
        if let Some(path) = path {
            surface.fill_path(path, Paint::Solid(0xFF00_0000 | math::pack_rgb(r, g, b)));
        }
    }
}

/// Paint a gradient from `from` (at `start_angle`) to `to` (at
/// `end_angle`), one opaque slice per degree.
#[allow(clippy::too_many_arguments)]
pub fn fill_gradient<S: Surface + ?Sized>(
    surface: &mut S,
    from: u32,
    to: u32,
    start_angle: f64,
    end_angle: f64,
    outer_radius: f64,
    inner_radius: f64,
    center: Point,
) {
    let (start, end) = sweep(start_angle, end_angle);
    let slices = ((end - start) / constants::SLICE_STEP).round() as usize;
    let scale = 1.0 / slices as f64;
    for i in 0..slices {
        let pos = start + i as f64 * constants::SLICE_STEP;
        let color = math::interpolate_color(from, to, i as f64 * scale);
        let path = circle_segment(
            pos - constants::SLICE_OVERLAP,
            pos + constants::SLICE_OVERLAP,
            outer_radius,
            inner_radius,
            center,
        );
        if let Some(path) = path {
            // Slices are opaque whatever the input alpha.
            surface.fill_path(path, Paint::Solid(0xFF00_0000 | (color & 0x00FF_FFFF)));
        }
    }
}

/// Two mirrored gradient sweeps: `edge → color` over 0–180° and
/// `color → edge` over 180–360°.
pub fn fill_symmetric_gradient<S: Surface + ?Sized>(
    surface: &mut S,
    edge: u32,
    color: u32,
    outer_radius: f64,
    inner_radius: f64,
    center: Point,
) {
    fill_gradient(surface, edge, color, 0.0, 180.0, outer_radius, inner_radius, center);
    fill_gradient(surface, color, edge, 180.0, 360.0, outer_radius, inner_radius, center);
}

/// Coverage of a pixel at `radius`, fading over the last pixel at either
/// edge. `None` outside the band.
fn edge_coverage(radius: f64, outer: f64, inner: f64) -> Option<f64> {
    if radius < inner || radius > outer {
        return None;
    }
    Some(if radius < inner + 1.0 {
        radius - inner
    } else if radius > outer - 1.0 {
        outer - radius
    } else {
        1.0
    })
}

fn raster_side(outer_radius: f64) -> u32 {
    (outer_radius * 2.0).ceil().max(0.0) as u32
}

/// Rasterize a ring of flat `color` whose opacity encodes angle: fully
/// transparent at 12 o'clock, opaque at 6 o'clock, mirrored left/right.
pub fn rasterize_alpha_ring(color: u32, outer_radius: f64, inner_radius: f64) -> PixelBuffer {
    let side = raster_side(outer_radius);
    let mut buf = PixelBuffer::new(side, side);
    let (_, r, g, b) = math::unpack_argb(color);
    let c = outer_radius;

    for py in 0..side {
        let dy = py as f64 - c;
        for px in 0..side {
            let dx = px as f64 - c;
            let radius = (dx * dx + dy * dy).sqrt();
            let Some(coverage) = edge_coverage(radius, outer_radius, inner_radius) else {
                continue;
            };
            let mut degree = normalize_angle(dy.atan2(dx) * RAD_TO_DEG + 90.0);
            if degree > 180.0 {
                degree = 360.0 - degree;
            }
            let alpha = 255.0 * coverage * degree / 180.0;
            buf.set_pixel(px, py, [r, g, b, alpha.round() as u8]);
        }
    }
    buf
}

/// Rasterize an opaque ring (or disk, with `inner_radius` 0) of flat
/// `color`, anti-aliased over one pixel at each edge.
pub fn rasterize_disk(color: u32, outer_radius: f64, inner_radius: f64) -> PixelBuffer {
    let side = raster_side(outer_radius);
    let mut buf = PixelBuffer::new(side, side);
    let (_, r, g, b) = math::unpack_argb(color);
    let c = outer_radius;

    for py in 0..side {
        let dy = py as f64 - c;
        for px in 0..side {
            let dx = px as f64 - c;
            let radius = (dx * dx + dy * dy).sqrt();
            // A solid disk has no inner edge to soften.
            let coverage = if inner_radius <= 0.0 {
                (radius <= outer_radius).then(|| (outer_radius - radius).min(1.0))
            } else {
                edge_coverage(radius, outer_radius, inner_radius)
            };
            if let Some(coverage) = coverage {
                buf.set_pixel(px, py, [r, g, b, (255.0 * coverage).round() as u8]);
            }
        }
    }
    buf
}

/// Paint a soft shadow annulus starting at `radius` and extending by
/// `size` (negative shadows inward), fading from `from` to `to`.
pub fn fill_shadow<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    radius: f64,
    size: f64,
    from: u32,
    to: u32,
) {
    if size == 0.0 {
        return;
    }
    let far = radius + size;
    let Some(path) = circle_segment(0.0, 360.0, radius, far, center) else {
        return;
    };
    let paint = if size >= 0.0 {
        Paint::Radial {
            center,
            start_radius: radius,
            end_radius: far,
            from,
            to,
        }
    } else {
        Paint::Radial {
            center,
            start_radius: far.max(0.0),
            end_radius: radius,
            from: to,
            to: from,
        }
    };
    surface.fill_path(path, paint);
}
