use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum PixelToComplexCoordsError {
    #[error(
        "point (x: {}, y: {}) is outside the {}x{} raster",
        .point.x, .point.y, .pixel_rect.width(), .pixel_rect.height()
    )]
    PointOutsideRect { point: Point, pixel_rect: PixelRect },
}

/// Pixel to plane conversion for one viewport and raster.
///
/// Column `x` maps to `left + x * dx` and row `y` to `top - y * dy`, so the top
/// row carries the most positive imaginary part. Every component that converts
/// between pixels and the plane goes through this type.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneMapping {
    left: f64,
    top: f64,
    dx: f64,
    dy: f64,
}

impl PlaneMapping {
    #[must_use]
    pub fn new(viewport: &Viewport, pixel_rect: PixelRect) -> Self {
        let (dx, dy) = viewport.pixel_size(pixel_rect);

        Self {
            left: viewport.left(),
            top: viewport.top(),
            dx,
            dy,
        }
    }

    #[inline]
    #[must_use]
    pub fn real_at(&self, x: u32) -> f64 {
        self.left + f64::from(x) * self.dx
    }

    #[inline]
    #[must_use]
    pub fn imag_at(&self, y: u32) -> f64 {
        self.top - f64::from(y) * self.dy
    }

    /// Plane width of one pixel.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Plane height of one pixel.
    #[must_use]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Fractional row at which the imaginary part is zero.
    #[must_use]
    pub fn real_axis_row(&self) -> f64 {
        self.top / self.dy
    }
}

pub fn pixel_to_complex_coords(
    pixel_position: Point,
    pixel_rect: PixelRect,
    viewport: &Viewport,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !pixel_rect.contains_point(pixel_position) {
        return Err(PixelToComplexCoordsError::PointOutsideRect {
            point: pixel_position,
            pixel_rect,
        });
    }

    let mapping = PlaneMapping::new(viewport, pixel_rect);

    Ok(Complex {
        real: mapping.real_at(pixel_position.x as u32),
        imag: mapping.imag_at(pixel_position.y as u32),
    })
}
