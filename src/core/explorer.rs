use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::generate_fractal::frame_cache::CacheEntry;
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::actions::render_frame::render_frame::{RenderFrameError, render_frame_cancelable};
use crate::core::data::complex::Complex;
use crate::core::data::frame::Frame;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point_result::PointResult;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_mapping::errors::PaletteError;
use crate::core::fractals::mandelbrot::colour_mapping::factory::mandelbrot_colour_map_factory;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
use crate::core::fractals::mandelbrot::colour_mapping::map::MandelbrotColourMap;
use crate::core::fractals::mandelbrot::params::MandelbrotParams;
use log::{debug, info};
use std::time::Instant;

/// Stateful front end over the stateless renderer.
///
/// Owns the single retained [`CacheEntry`]. A frame replaces the entry only
/// once it has completed; a cancelled or failed render leaves it untouched.
pub struct FractalExplorer {
    algorithm: MandelbrotAlgorithm,
    colour_map: Box<dyn MandelbrotColourMap>,
    cache: Option<CacheEntry>,
}

impl FractalExplorer {
    pub fn new(params: MandelbrotParams, palette: PaletteKind, lut_size: usize) -> Result<Self, PaletteError> {
        let colour_map = mandelbrot_colour_map_factory(palette, lut_size)?;

        Ok(Self::from_parts(MandelbrotAlgorithm::new(params), colour_map))
    }

    #[must_use]
    pub fn from_parts(algorithm: MandelbrotAlgorithm, colour_map: Box<dyn MandelbrotColourMap>) -> Self {
        Self {
            algorithm,
            colour_map,
            cache: None,
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> &MandelbrotAlgorithm {
        &self.algorithm
    }

    #[must_use]
    pub fn palette(&self) -> PaletteKind {
        self.colour_map.kind()
    }

    #[must_use]
    pub fn cache(&self) -> Option<&CacheEntry> {
        self.cache.as_ref()
    }

    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    /// Classifies a single plane point, without distance estimation.
    #[must_use]
    pub fn evaluate(&self, real: f64, imag: f64) -> PointResult {
        self.algorithm.evaluate(Complex::new(real, imag), None)
    }

    pub fn render(&mut self, viewport: &Viewport, pixel_rect: PixelRect) -> Result<Frame, RenderFrameError> {
        self.render_cancelable(viewport, pixel_rect, &NeverCancel)
    }

    /// Renders through the cache and, on success, makes the new frame the
    /// cache entry.
    pub fn render_cancelable<C: CancelToken + ?Sized>(
        &mut self,
        viewport: &Viewport,
        pixel_rect: PixelRect,
        cancel: &C,
    ) -> Result<Frame, RenderFrameError> {
        let frame = self.timed_render(viewport, pixel_rect, self.cache.as_ref(), cancel)?;

        self.cache = Some(CacheEntry::from(&frame));

        Ok(frame)
    }

    /// Renders with an explicit target and no cache. Used for exports at a
    /// different resolution; the retained entry is left as it was.
    pub fn render_to(&self, viewport: &Viewport, pixel_rect: PixelRect) -> Result<Frame, RenderFrameError> {
        self.timed_render(viewport, pixel_rect, None, &NeverCancel)
    }

    fn timed_render<C: CancelToken + ?Sized>(
        &self,
        viewport: &Viewport,
        pixel_rect: PixelRect,
        cache: Option<&CacheEntry>,
        cancel: &C,
    ) -> Result<Frame, RenderFrameError> {
        let started = Instant::now();

        let result = render_frame_cancelable(
            pixel_rect,
            viewport,
            &self.algorithm,
            self.colour_map.as_ref(),
            cache,
            cancel,
        );

        match &result {
            Ok(frame) => {
                let stats = frame.stats;
                info!(
                    "rendered {}x{} with {} in {:?}: {} evaluated, {} reused, {} skipped, {} mirrored",
                    pixel_rect.width(),
                    pixel_rect.height(),
                    self.colour_map.display_name(),
                    started.elapsed(),
                    stats.evaluated,
                    stats.reused,
                    stats.skipped,
                    stats.mirrored,
                );
            }
            Err(err) => debug!("render of {}x{} abandoned: {err}", pixel_rect.width(), pixel_rect.height()),
        }

        result
    }
}
