use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::generate_fractal::frame_cache::{CacheEntry, CachedFrame, try_reuse};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_fractal::row_scan::RowScanner;
use crate::core::actions::generate_fractal::symmetry::{RowPlan, plan_rows};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::pixel_value::PixelValue;
use crate::core::data::render_stats::RenderStats;
use crate::core::data::viewport::Viewport;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;

/// Raw values for every pixel of a frame, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedValues {
    pub values: Vec<PixelValue>,
    pub stats: RenderStats,
    pub mirrored_rows: Vec<bool>,
}

/// Resolves every pixel of `viewport` on `pixel_rect` without cancellation.
pub fn generate_fractal_parallel_rayon<Alg>(
    pixel_rect: PixelRect,
    viewport: &Viewport,
    algorithm: &Alg,
    cache: Option<&CacheEntry>,
) -> GeneratedValues
where
    Alg: FractalAlgorithm + ?Sized,
{
    match generate_fractal_parallel_rayon_cancelable(pixel_rect, viewport, algorithm, cache, &NeverCancel) {
        Ok(generated) => generated,
        Err(Cancelled) => unreachable!("NeverCancel token should never signal cancellation"),
    }
}

/// Resolves every pixel of `viewport` on `pixel_rect`.
///
/// Which shortcuts apply is decided by the algorithm's optimisation toggles.
/// Computed rows run in parallel on rayon's pool and poll `cancel` at every
/// row start; mirrored rows are copied once all computed rows are done.
pub fn generate_fractal_parallel_rayon_cancelable<Alg, C>(
    pixel_rect: PixelRect,
    viewport: &Viewport,
    algorithm: &Alg,
    cache: Option<&CacheEntry>,
    cancel: &C,
) -> Result<GeneratedValues, Cancelled>
where
    Alg: FractalAlgorithm + ?Sized,
    C: CancelToken + ?Sized,
{
    let optimisations = algorithm.optimisations();
    let mapping = PlaneMapping::new(viewport, pixel_rect);
    let width = pixel_rect.width() as usize;

    let cached = cache
        .filter(|_| optimisations.overlap_cache)
        .and_then(|entry| try_reuse(viewport, pixel_rect, entry).map(|shift| CachedFrame::new(entry, shift)));

    let plan = if optimisations.axis_symmetry {
        plan_rows(&mapping, pixel_rect.height())
    } else {
        vec![RowPlan::Compute; pixel_rect.height() as usize]
    };

    let scanner = RowScanner {
        algorithm,
        mapping,
        cached,
        tuning: algorithm.tuning(),
        adaptive_skip: optimisations.adaptive_skip,
    };

    let mut values = vec![PixelValue::Interior; pixel_rect.size()];

    let mut stats = values
        .par_chunks_mut(width)
        .enumerate()
        .filter(|(y, _)| plan[*y] == RowPlan::Compute)
        .map(|(y, row)| scanner.scan(y as u32, row, cancel))
        .try_reduce(RenderStats::default, |a, b| Ok(a + b))?;

    for (y, row_plan) in plan.iter().enumerate() {
        if let RowPlan::Mirror(source) = *row_plan {
            let start = source as usize * width;
            values.copy_within(start..start + width, y * width);
            stats.mirrored += width;
        }
    }

    let mirrored_rows = plan.iter().map(|row_plan| matches!(row_plan, RowPlan::Mirror(_))).collect();

    Ok(GeneratedValues {
        values,
        stats,
        mirrored_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use crate::core::data::point_result::PointResult;
    use crate::core::fractals::mandelbrot::params::Optimisations;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Escape value depends on |imag| only, so it is mirror-symmetric.
    struct StubAlgorithm {
        optimisations: Optimisations,
    }

    impl FractalAlgorithm for StubAlgorithm {
        fn evaluate(&self, c: Complex, _: Option<f64>) -> PointResult {
            if c.real < 0.0 {
                PointResult::interior(7)
            } else {
                PointResult::exterior(c.real * 10.0 + c.imag.abs(), None, 1)
            }
        }

        fn optimisations(&self) -> Optimisations {
            self.optimisations
        }
    }

    fn stub(optimisations: Optimisations) -> StubAlgorithm {
        StubAlgorithm { optimisations }
    }

    fn setup() -> (PixelRect, Viewport) {
        (
            PixelRect::new(8, 8).unwrap(),
            Viewport::new(Complex::ZERO, 4.0, 4.0).unwrap(),
        )
    }

    #[test]
    fn test_plain_generation_evaluates_every_pixel() {
        let (pixel_rect, viewport) = setup();

        let generated = generate_fractal_parallel_rayon(pixel_rect, &viewport, &stub(Optimisations::NONE), None);

        assert_eq!(generated.values.len(), 64);
        assert_eq!(generated.stats.evaluated, 64);
        assert_eq!(generated.values[0], PixelValue::Interior);
        assert_eq!(generated.values[4], PixelValue::Exterior(2.0));
    }

    #[test]
    fn test_symmetry_matches_plain_generation() {
        let (pixel_rect, viewport) = setup();
        let symmetric = Optimisations {
            axis_symmetry: true,
            ..Optimisations::NONE
        };

        let plain = generate_fractal_parallel_rayon(pixel_rect, &viewport, &stub(Optimisations::NONE), None);
        let mirrored = generate_fractal_parallel_rayon(pixel_rect, &viewport, &stub(symmetric), None);

        assert_eq!(mirrored.values, plain.values);
        // axis at row 4: rows 0..=4 computed, rows 5..8 mirrored
        assert_eq!(mirrored.stats.mirrored, 24);
        assert_eq!(mirrored.stats.evaluated, 40);
        assert_eq!(mirrored.mirrored_rows, [false, false, false, false, false, true, true, true]);
        assert!(plain.mirrored_rows.iter().all(|row| !row));
    }

    #[test]
    fn test_cache_is_ignored_when_disabled() {
        let (pixel_rect, viewport) = setup();
        let algorithm = stub(Optimisations::NONE);
        let first = generate_fractal_parallel_rayon(pixel_rect, &viewport, &algorithm, None);
        let entry = CacheEntry::new(viewport, pixel_rect, first.values).unwrap();

        let second = generate_fractal_parallel_rayon(pixel_rect, &viewport, &algorithm, Some(&entry));

        assert_eq!(second.stats.reused, 0);
        assert_eq!(second.stats.evaluated, 64);
    }

    #[test]
    fn test_cache_reuses_overlap_after_pan() {
        let (pixel_rect, viewport) = setup();
        let caching = stub(Optimisations {
            overlap_cache: true,
            ..Optimisations::NONE
        });
        let first = generate_fractal_parallel_rayon(pixel_rect, &viewport, &caching, None);
        let entry = CacheEntry::new(viewport, pixel_rect, first.values).unwrap();
        let panned = viewport.shifted_by_pixels(2, 1, pixel_rect);

        let reused = generate_fractal_parallel_rayon(pixel_rect, &panned, &caching, Some(&entry));
        let scratch = generate_fractal_parallel_rayon(pixel_rect, &panned, &stub(Optimisations::NONE), None);

        assert_eq!(reused.values, scratch.values);
        assert_eq!(reused.stats.reused, 6 * 7);
        assert_eq!(reused.stats.evaluated, 64 - 42);
    }

    #[test]
    fn test_cancelled_generation_returns_error() {
        let (pixel_rect, viewport) = setup();
        let cancel = || true;

        let result = generate_fractal_parallel_rayon_cancelable(
            pixel_rect,
            &viewport,
            &stub(Optimisations::ALL),
            None,
            &cancel,
        );

        assert_eq!(result, Err(Cancelled));
    }

    #[test]
    fn test_cancellation_polled_at_every_computed_row() {
        let (pixel_rect, viewport) = setup();
        let polls = AtomicUsize::new(0);
        let cancel = || {
            polls.fetch_add(1, Ordering::Relaxed);
            false
        };

        let result = generate_fractal_parallel_rayon_cancelable(
            pixel_rect,
            &viewport,
            &stub(Optimisations::NONE),
            None,
            &cancel,
        );

        assert!(result.is_ok());
        assert!(polls.load(Ordering::Relaxed) >= 8);
    }
}
