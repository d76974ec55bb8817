use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::generate_fractal::frame_cache::CacheEntry;
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::{
    GeneratedValues, generate_fractal_parallel_rayon_cancelable,
};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer_cancelable,
};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::frame::Frame;
use crate::core::data::pixel_buffer::PixelBufferError;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::viewport::Viewport;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderFrameError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

impl From<GeneratePixelBufferError> for RenderFrameError {
    fn from(err: GeneratePixelBufferError) -> Self {
        match err {
            GeneratePixelBufferError::Cancelled(cancelled) => Self::Cancelled(cancelled),
            GeneratePixelBufferError::PixelBuffer(err) => Self::PixelBuffer(err),
        }
    }
}

impl RenderFrameError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Renders one frame from scratch or on top of `cache`. Stateless: the caller
/// decides whether the result becomes the next cache entry.
pub fn render_frame<Alg, CMap>(
    pixel_rect: PixelRect,
    viewport: &Viewport,
    algorithm: &Alg,
    colour_map: &CMap,
    cache: Option<&CacheEntry>,
) -> Result<Frame, RenderFrameError>
where
    Alg: FractalAlgorithm + ?Sized,
    CMap: ColourMap + ?Sized,
{
    render_frame_cancelable(pixel_rect, viewport, algorithm, colour_map, cache, &NeverCancel)
}

pub fn render_frame_cancelable<Alg, CMap, C>(
    pixel_rect: PixelRect,
    viewport: &Viewport,
    algorithm: &Alg,
    colour_map: &CMap,
    cache: Option<&CacheEntry>,
    cancel: &C,
) -> Result<Frame, RenderFrameError>
where
    Alg: FractalAlgorithm + ?Sized,
    CMap: ColourMap + ?Sized,
    C: CancelToken + ?Sized,
{
    let GeneratedValues {
        values,
        stats,
        mirrored_rows,
    } =
        generate_fractal_parallel_rayon_cancelable(pixel_rect, viewport, algorithm, cache, cancel)?;

    let pixel_buffer = generate_pixel_buffer_cancelable(&values, colour_map, pixel_rect, cancel)?;

    Ok(Frame {
        viewport: *viewport,
        pixel_rect,
        values,
        pixel_buffer,
        stats,
        mirrored_rows,
    })
}
