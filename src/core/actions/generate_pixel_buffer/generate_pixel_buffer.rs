use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel, check_cancelled};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer, PixelBufferError, write_rgba};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::pixel_value::PixelValue;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratePixelBufferError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Log-scaled mapping of smooth values onto `[0, 1]` for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Normaliser {
    min: f64,
    log_span: Option<f64>,
}

impl Normaliser {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let log_span = (max > min).then(|| (max - min + 1.0).ln());

        Self { min, log_span }
    }

    /// Normaliser over the exterior values of a finished frame. Interior
    /// pixels and non-finite values take no part in the range.
    #[must_use]
    pub fn from_values(values: &[PixelValue]) -> Self {
        let (min, max) = values
            .par_iter()
            .filter_map(PixelValue::exterior_value)
            .filter(|value| value.is_finite())
            .fold(
                || (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), value| (min.min(value), max.max(value)),
            )
            .reduce(
                || (f64::INFINITY, f64::NEG_INFINITY),
                |(a_min, a_max), (b_min, b_max)| (a_min.min(b_min), a_max.max(b_max)),
            );

        Self::new(min, max)
    }

    #[inline]
    #[must_use]
    pub fn normalise(&self, value: f64) -> f64 {
        match self.log_span {
            Some(log_span) => (value - self.min + 1.0).ln() / log_span,
            None => 0.0,
        }
    }
}

#[inline]
fn colour_of<CMap: ColourMap + ?Sized>(value: PixelValue, normaliser: &Normaliser, colour_map: &CMap) -> Colour {
    match value {
        PixelValue::Interior => Colour::BLACK,
        PixelValue::Exterior(value) => colour_map.map(normaliser.normalise(value)),
    }
}

/// Colours a finished frame of raw values.
pub fn generate_pixel_buffer<CMap>(
    values: &[PixelValue],
    colour_map: &CMap,
    pixel_rect: PixelRect,
) -> Result<PixelBuffer, PixelBufferError>
where
    CMap: ColourMap + ?Sized,
{
    generate_pixel_buffer_cancelable(values, colour_map, pixel_rect, &NeverCancel).map_err(|e| match e {
        GeneratePixelBufferError::PixelBuffer(err) => err,
        GeneratePixelBufferError::Cancelled(_) => {
            unreachable!("NeverCancel token should never signal cancellation")
        }
    })
}

/// Colours a finished frame of raw values with cancellation support.
///
/// First pass: a parallel min/max reduction over exterior values. Second pass:
/// every row is coloured in parallel, polling `cancel` at each row start.
/// Interior pixels are opaque black.
pub fn generate_pixel_buffer_cancelable<CMap, C>(
    values: &[PixelValue],
    colour_map: &CMap,
    pixel_rect: PixelRect,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    CMap: ColourMap + ?Sized,
    C: CancelToken + ?Sized,
{
    if values.len() != pixel_rect.size() {
        return Err(PixelBufferError::BoundsMismatch {
            pixel_rect_size: pixel_rect.size(),
            buffer_size: values.len(),
        }
        .into());
    }

    let normaliser = Normaliser::from_values(values);
    let width = pixel_rect.width() as usize;
    let mut buffer = vec![0u8; pixel_rect.size() * BYTES_PER_PIXEL];

    buffer
        .par_chunks_mut(width * BYTES_PER_PIXEL)
        .zip(values.par_chunks(width))
        .try_for_each(|(row_bytes, row_values)| {
            check_cancelled(cancel)?;

            for (slot, &value) in row_bytes.chunks_exact_mut(BYTES_PER_PIXEL).zip(row_values) {
                write_rgba(slot, colour_of(value, &normaliser, colour_map));
            }

            Ok::<(), Cancelled>(())
        })?;

    Ok(PixelBuffer::from_data(pixel_rect, buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::point::Point;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Grey level equal to `t * 200`, so normalised values are visible.
    struct StubColourMap;

    impl ColourMap for StubColourMap {
        fn map(&self, t: f64) -> Colour {
            let level = (t * 200.0).round() as u8;
            Colour::new(level, level, level)
        }

        fn display_name(&self) -> &str {
            "Stub grey"
        }
    }

    fn grey_at(buffer: &PixelBuffer, x: i32, y: i32) -> u8 {
        buffer.pixel(Point { x, y }).unwrap().r
    }

    #[test]
    fn test_normaliser_maps_range_onto_unit_interval() {
        let normaliser = Normaliser::new(3.0, 10.0);

        assert_eq!(normaliser.normalise(3.0), 0.0);
        assert!((normaliser.normalise(10.0) - 1.0).abs() < 1e-12);
        assert!(normaliser.normalise(6.0) > (6.0 - 3.0) / 7.0);
    }

    #[test]
    fn test_degenerate_range_normalises_to_zero() {
        let normaliser = Normaliser::new(5.0, 5.0);

        assert_eq!(normaliser.normalise(5.0), 0.0);
        assert_eq!(Normaliser::from_values(&[PixelValue::Interior]).normalise(1.0), 0.0);
    }

    #[test]
    fn test_range_ignores_interior_and_non_finite_values() {
        let values = [
            PixelValue::Exterior(2.0),
            PixelValue::Interior,
            PixelValue::Exterior(f64::NEG_INFINITY),
            PixelValue::Exterior(9.0),
        ];

        assert_eq!(Normaliser::from_values(&values), Normaliser::new(2.0, 9.0));
    }

    #[test]
    fn test_interior_is_opaque_black_and_extremes_hit_the_ends() {
        let pixel_rect = PixelRect::new(3, 1).unwrap();
        let values = [
            PixelValue::Exterior(1.0),
            PixelValue::Interior,
            PixelValue::Exterior(8.0),
        ];

        let buffer = generate_pixel_buffer(&values, &StubColourMap, pixel_rect).unwrap();

        assert_eq!(&buffer.buffer()[4..8], &[0, 0, 0, 255]);
        assert_eq!(grey_at(&buffer, 0, 0), 0);
        assert_eq!(grey_at(&buffer, 2, 0), 200);
        assert!(buffer.buffer().chunks_exact(4).all(|pixel| pixel[3] == 255));
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let pixel_rect = PixelRect::new(2, 2).unwrap();

        assert_eq!(
            generate_pixel_buffer(&[PixelValue::Interior; 3], &StubColourMap, pixel_rect),
            Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: 4,
                buffer_size: 3
            })
        );
    }

    #[test]
    fn test_cancelled_colour_pass_returns_error() {
        let pixel_rect = PixelRect::new(2, 2).unwrap();
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result = generate_pixel_buffer_cancelable(
            &[PixelValue::Exterior(1.0); 4],
            &StubColourMap,
            pixel_rect,
            &cancel_token,
        );

        assert_eq!(result, Err(GeneratePixelBufferError::Cancelled(Cancelled)));
    }
}
