use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use thiserror::Error;

/// Two extents closer than this are treated as the same zoom level.
pub const SCALE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport size must be positive and finite: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("viewport centre must be finite: ({real}, {imag})")]
    NonFiniteCenter { real: f64, imag: f64 },
    #[error("zoom factor must be positive and finite: {0}")]
    InvalidZoomFactor(f64),
}

/// The visible rectangle of the complex plane, described by its centre and extent.
///
/// Immutable for the duration of a render; pans and zooms produce new values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    center: Complex,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(center: Complex, width: f64, height: f64) -> Result<Self, ViewportError> {
        if !center.is_finite() {
            return Err(ViewportError::NonFiniteCenter {
                real: center.real,
                imag: center.imag,
            });
        }

        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ViewportError::InvalidSize { width, height });
        }

        Ok(Self {
            center,
            width,
            height,
        })
    }

    /// A viewport `width` units wide whose height follows the raster's aspect ratio.
    pub fn for_raster(center: Complex, width: f64, pixel_rect: PixelRect) -> Result<Self, ViewportError> {
        let height = width * f64::from(pixel_rect.height()) / f64::from(pixel_rect.width());

        Self::new(center, width, height)
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Real part of the left edge.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.center.real - self.width / 2.0
    }

    /// Imaginary part of the top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.center.imag + self.height / 2.0
    }

    /// Plane extent of one pixel as `(dx, dy)`.
    #[must_use]
    pub fn pixel_size(&self, pixel_rect: PixelRect) -> (f64, f64) {
        (
            self.width / f64::from(pixel_rect.width()),
            self.height / f64::from(pixel_rect.height()),
        )
    }

    #[must_use]
    pub fn has_same_scale(&self, other: &Self) -> bool {
        (self.width - other.width).abs() < SCALE_TOLERANCE
            && (self.height - other.height).abs() < SCALE_TOLERANCE
    }

    /// Moves the window by whole pixels: positive `columns` to the right,
    /// positive `rows` downwards on screen.
    #[must_use]
    pub fn shifted_by_pixels(&self, columns: i32, rows: i32, pixel_rect: PixelRect) -> Self {
        let (dx, dy) = self.pixel_size(pixel_rect);

        Self {
            center: Complex::new(
                self.center.real + f64::from(columns) * dx,
                self.center.imag - f64::from(rows) * dy,
            ),
            ..*self
        }
    }

    /// Zooms in by `factor` (values below one zoom out) keeping the plane
    /// point under `anchor` fixed on screen.
    pub fn zoomed_about(&self, anchor: Point, factor: f64, pixel_rect: PixelRect) -> Result<Self, ViewportError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::InvalidZoomFactor(factor));
        }

        let (dx, dy) = self.pixel_size(pixel_rect);
        let anchor_real = self.left() + f64::from(anchor.x) * dx;
        let anchor_imag = self.top() - f64::from(anchor.y) * dy;

        let width = self.width / factor;
        let height = self.height / factor;
        let new_dx = width / f64::from(pixel_rect.width());
        let new_dy = height / f64::from(pixel_rect.height());

        Self::new(
            Complex::new(
                anchor_real + width / 2.0 - f64::from(anchor.x) * new_dx,
                anchor_imag - height / 2.0 + f64::from(anchor.y) * new_dy,
            ),
            width,
            height,
        )
    }
}
