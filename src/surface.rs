//! Write-only drawing surfaces.
//!
//! Ring painting targets the [`Surface`] trait. [`Canvas`] implements it as
//! a display list that the Floem view replays at paint time; nothing is
//! ever read back by the core.

use floem::kurbo::{BezPath, Point};

/// How a path is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Packed `0xAARRGGBB`.
    Solid(u32),
    /// Two-stop radial gradient between concentric circles.
    ///
    /// `from` is painted at `start_radius`, `to` at `end_radius`;
    /// `start_radius` is always the smaller of the two.
    Radial {
        center: Point,
        start_radius: f64,
        end_radius: f64,
        from: u32,
        to: u32,
    },
}

/// Straight-alpha RGBA8 pixels.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// RGBA at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.data[o..o + 4].copy_from_slice(&rgba);
    }

    /// Resample rotated by `degrees` (clockwise, y down) about the buffer
    /// centre. Nearest neighbour; pixels mapping outside stay transparent.
    pub fn rotated(&self, degrees: f64) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.width, self.height);
        let (sin, cos) = (-degrees.to_radians()).sin_cos();
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;

        for y in 0..self.height {
            let dy = y as f64 + 0.5 - cy;
            for x in 0..self.width {
                let dx = x as f64 + 0.5 - cx;
                // Inverse-rotate the destination pixel into source space.
                let sx = (dx * cos - dy * sin + cx).floor();
                let sy = (dx * sin + dy * cos + cy).floor();
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                if let Some(px) = self.pixel(sx as u32, sy as u32) {
                    if px[3] != 0 {
                        out.set_pixel(x, y, px);
                    }
                }
            }
        }
        out
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Pixels blitted with their top-left corner at `origin`.
    Pixels { origin: Point, pixels: PixelBuffer },
    Fill { path: BezPath, paint: Paint },
}

/// Abstract raster target used by the ring renderer.
pub trait Surface {
    /// Drop everything drawn so far.
    fn clear(&mut self);

    /// Write a block of RGBA pixels.
    fn put_pixels(&mut self, origin: Point, pixels: PixelBuffer);

    /// Fill a closed vector path (nonzero winding).
    fn fill_path(&mut self, path: BezPath, paint: Paint);
}

/// Display-list surface owned by exactly one ring or swatch.
///
/// `generation` increases on every write so renderers can cache whatever
/// they derive from the recorded ops.
#[derive(Debug, Default)]
pub struct Canvas {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    generation: u64,
    released: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas centre in canvas coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Free the recorded content; later writes are ignored.
    pub fn release(&mut self) {
        self.ops = Vec::new();
        self.released = true;
        self.generation += 1;
    }

    fn touch(&mut self) {
        self.generation += 1;
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        if self.released {
            return;
        }
        self.ops.clear();
        self.touch();
    }

    fn put_pixels(&mut self, origin: Point, pixels: PixelBuffer) {
        if self.released {
            return;
        }
        self.ops.push(DrawOp::Pixels { origin, pixels });
        self.touch();
    }

    fn fill_path(&mut self, path: BezPath, paint: Paint) {
        if self.released {
            return;
        }
        self.ops.push(DrawOp::Fill { path, paint });
        self.touch();
    }
}
