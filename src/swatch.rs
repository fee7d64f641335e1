//! Result swatch: a flat disk in the wheel's centre.

use floem::kurbo::Point;

use crate::color::Rgb;
use crate::render;
use crate::surface::{Canvas, Surface};

#[derive(Debug)]
pub struct ColorSwatch {
    radius: f64,
    color: Option<Rgb>,
    canvas: Canvas,
}

impl ColorSwatch {
    pub fn new(radius: f64) -> Self {
        let side = (radius * 2.0).ceil().max(0.0) as u32;
        Self {
            radius,
            color: None,
            canvas: Canvas::new(side, side),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn set_color(&mut self, color: Rgb) {
        if self.color == Some(color) {
            return;
        }
        self.color = Some(color);
        self.canvas.clear();
        self.canvas
            .put_pixels(Point::ZERO, render::rasterize_disk(color.to_u32(), self.radius, 0.0));
    }

    pub fn finalize(&mut self) {
        self.canvas.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawOp;

    #[test]
    fn repaints_only_on_new_color() {
        let mut swatch = ColorSwatch::new(20.0);
        assert!(swatch.canvas().ops().is_empty());

        swatch.set_color(Rgb::new(0, 128, 255));
        let DrawOp::Pixels { pixels, .. } = &swatch.canvas().ops()[0] else {
            panic!("expected pixels");
        };
        assert_eq!(pixels.pixel(20, 20), Some([0, 128, 255, 255]));

        let g = swatch.canvas().generation();
        swatch.set_color(Rgb::new(0, 128, 255));
        assert_eq!(swatch.canvas().generation(), g);
        swatch.set_color(Rgb::new(1, 128, 255));
        assert_eq!(swatch.canvas().ops().len(), 1);
    }
}
