use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PixelRectError {
    #[error("pixel rect size must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// A raster of `width × height` pixels anchored at `(0, 0)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PixelRect {
    width: u32,
    height: u32,
}

impl PixelRect {
    pub fn new(width: u32, height: u32) -> Result<Self, PixelRectError> {
        if width == 0 || height == 0 || i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(PixelRectError::InvalidSize { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }

    /// Row-major index of `point`, if it lies inside the raster.
    #[must_use]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.contains_point(point)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }

    /// Same raster scaled by an integer factor, used for high resolution exports.
    pub fn scaled(&self, factor: u32) -> Result<Self, PixelRectError> {
        Self::new(
            self.width.saturating_mul(factor),
            self.height.saturating_mul(factor),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_dimensions() {
        let rect = PixelRect::new(121, 101).unwrap();

        assert_eq!(rect.width(), 121);
        assert_eq!(rect.height(), 101);
        assert_eq!(rect.size(), 12221);
    }

    #[test]
    fn test_pixel_rect_dimensions_must_be_positive() {
        assert_eq!(
            PixelRect::new(0, 10),
            Err(PixelRectError::InvalidSize { width: 0, height: 10 })
        );
        assert_eq!(
            PixelRect::new(10, 0),
            Err(PixelRectError::InvalidSize { width: 10, height: 0 })
        );
        assert!(PixelRect::new(1, 1).is_ok());
    }

    #[test]
    fn test_pixel_rect_rejects_sizes_beyond_i32() {
        assert!(PixelRect::new(u32::MAX, 2).is_err());
    }

    #[test]
    fn test_pixel_rect_contains_point() {
        let rect = PixelRect::new(100, 50).unwrap();

        assert!(rect.contains_point(Point { x: 0, y: 0 }));
        assert!(rect.contains_point(Point { x: 99, y: 49 }));
        assert!(!rect.contains_point(Point { x: 100, y: 10 }));
        assert!(!rect.contains_point(Point { x: 10, y: 50 }));
        assert!(!rect.contains_point(Point { x: -1, y: 10 }));
        assert!(!rect.contains_point(Point { x: 10, y: -1 }));
    }

    #[test]
    fn test_index_of_is_row_major() {
        let rect = PixelRect::new(4, 3).unwrap();

        assert_eq!(rect.index_of(Point { x: 0, y: 0 }), Some(0));
        assert_eq!(rect.index_of(Point { x: 3, y: 0 }), Some(3));
        assert_eq!(rect.index_of(Point { x: 1, y: 2 }), Some(9));
        assert_eq!(rect.index_of(Point { x: 4, y: 0 }), None);
    }

    #[test]
    fn test_scaled() {
        let rect = PixelRect::new(400, 300).unwrap().scaled(2).unwrap();

        assert_eq!((rect.width(), rect.height()), (800, 600));
    }
}
