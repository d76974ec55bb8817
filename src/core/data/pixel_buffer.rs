use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 4;

const OPAQUE: u8 = 255;

fn pixel_rect_to_buffer_size(pixel_rect: PixelRect) -> usize {
    pixel_rect.size() * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixelBufferError {
    #[error("pixel at x:{}, y:{} outside of {}x{} raster", .pixel.x, .pixel.y, .pixel_rect.width(), .pixel_rect.height())]
    PixelOutsideBounds {
        pixel: Point,
        pixel_rect: PixelRect,
    },
    #[error("pixel rect size {pixel_rect_size} does not match buffer size {buffer_size}")]
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGBA8 raster; alpha is always opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    /// An opaque black raster.
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        let mut buffer = vec![0; pixel_rect_to_buffer_size(pixel_rect)];

        for pixel in buffer.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[3] = OPAQUE;
        }

        Self { pixel_rect, buffer }
    }

    pub fn from_data(
        pixel_rect: PixelRect,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let buffer_size = pixel_rect_to_buffer_size(pixel_rect);

        if buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.byte_index(pixel)?;

        Ok(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.byte_index(pixel)?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;
        self.buffer[index + 3] = OPAQUE;

        Ok(())
    }

    fn byte_index(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        self.pixel_rect
            .index_of(pixel)
            .map(|index| index * BYTES_PER_PIXEL)
            .ok_or(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            })
    }
}

/// Writes one opaque pixel into a 4-byte RGBA slot.
#[inline]
pub fn write_rgba(slot: &mut [u8], colour: Colour) {
    slot[0] = colour.r;
    slot[1] = colour.g;
    slot[2] = colour.b;
    slot[3] = OPAQUE;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_pixel_rect(width: u32, height: u32) -> PixelRect {
        PixelRect::new(width, height).unwrap()
    }

    #[test]
    fn test_new_creates_opaque_black_buffer() {
        let buffer = PixelBuffer::new(create_pixel_rect(10, 10));

        assert_eq!(buffer.buffer_size(), 400); // 10 * 10 * 4
        assert!(
            buffer
                .buffer()
                .chunks_exact(4)
                .all(|pixel| pixel == [0, 0, 0, 255])
        );
    }

    #[test]
    fn test_from_data_valid() {
        let pixel_rect = create_pixel_rect(2, 1);
        let data: Vec<u8> = vec![
            255, 0, 0, 255, // pixel (0,0) - red
            0, 255, 0, 255, // pixel (1,0) - green
        ];

        let buffer = PixelBuffer::from_data(pixel_rect, data.clone()).unwrap();

        assert_eq!(buffer.pixel_rect(), pixel_rect);
        assert_eq!(buffer.buffer(), data.as_slice());
    }

    #[test]
    fn test_from_data_size_mismatch() {
        let pixel_rect = create_pixel_rect(2, 2);

        assert_eq!(
            PixelBuffer::from_data(pixel_rect, vec![0; 12]).unwrap_err(),
            PixelBufferError::BoundsMismatch {
                pixel_rect_size: 16,
                buffer_size: 12
            }
        );
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut buffer = PixelBuffer::new(create_pixel_rect(3, 3));
        let red = Colour::new(255, 0, 0);

        buffer.set_pixel(Point { x: 1, y: 1 }, red).unwrap();

        assert_eq!(&buffer.buffer()[16..20], &[255, 0, 0, 255]);
        assert_eq!(buffer.pixel(Point { x: 1, y: 1 }), Ok(red));
        assert_eq!(buffer.pixel(Point { x: 0, y: 0 }), Ok(Colour::BLACK));
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let pixel_rect = create_pixel_rect(3, 3);
        let mut buffer = PixelBuffer::new(pixel_rect);

        assert_eq!(
            buffer.set_pixel(Point { x: 5, y: 1 }, Colour::BLACK),
            Err(PixelBufferError::PixelOutsideBounds {
                pixel: Point { x: 5, y: 1 },
                pixel_rect
            })
        );
        assert!(buffer.pixel(Point { x: -1, y: 0 }).is_err());
    }

    #[test]
    fn test_write_rgba_sets_alpha() {
        let mut slot = [0u8; 4];

        write_rgba(&mut slot, Colour::new(1, 2, 3));

        assert_eq!(slot, [1, 2, 3, 255]);
    }
}
