use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled, check_cancelled};
use crate::core::actions::generate_fractal::frame_cache::CachedFrame;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_value::PixelValue;
use crate::core::data::point_result::PointResult;
use crate::core::data::render_stats::RenderStats;
use crate::core::fractals::mandelbrot::params::TuningParams;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;

/// Number of pixels (including the evaluated one) that may share `result`.
///
/// Anything without a usable distance, or too close to the boundary, gets a
/// run of one.
#[must_use]
pub fn run_length(result: &PointResult, pixel_size: f64, tuning: &TuningParams, remaining: usize) -> usize {
    let Some(distance) = result.distance_estimate() else {
        return 1;
    };
    if !(distance >= tuning.detail_multiplier * pixel_size) {
        return 1;
    }

    // float to int casts saturate, so huge estimates land on the clamp
    let run = (distance / pixel_size * tuning.safety_factor).floor() as usize;

    run.clamp(1, tuning.max_horizontal_skip as usize)
        .min(remaining.max(1))
}

/// Everything a row needs that stays fixed for the whole frame.
pub struct RowScanner<'a, Alg: FractalAlgorithm + ?Sized> {
    pub algorithm: &'a Alg,
    pub mapping: PlaneMapping,
    pub cached: Option<CachedFrame<'a>>,
    pub tuning: TuningParams,
    pub adaptive_skip: bool,
}

impl<Alg: FractalAlgorithm + ?Sized> RowScanner<'_, Alg> {
    /// Resolves every pixel of row `y` into `row`, left to right.
    ///
    /// Cached values are taken first. Each remaining pixel is evaluated and,
    /// with adaptive skip on, its value is copied across the following
    /// unresolved pixels of its run. Cached pixels inside a run keep their own
    /// value.
    pub fn scan<C: CancelToken + ?Sized>(
        &self,
        y: u32,
        row: &mut [PixelValue],
        cancel: &C,
    ) -> Result<RenderStats, Cancelled> {
        check_cancelled(cancel)?;

        let width = row.len();
        let mut stats = RenderStats::default();
        let mut known = vec![false; width];

        if let Some(cached) = &self.cached {
            for (x, (slot, is_known)) in row.iter_mut().zip(known.iter_mut()).enumerate() {
                if let Some(value) = cached.lookup(x as u32, y) {
                    *slot = value;
                    *is_known = true;
                    stats.reused += 1;
                }
            }
        }

        let pixel_size = self.adaptive_skip.then_some(self.mapping.dx());
        let imag = self.mapping.imag_at(y);
        let mut since_check = 0;
        let mut x = 0;

        while x < width {
            if known[x] {
                x += 1;
                continue;
            }

            if since_check >= CANCEL_CHECK_INTERVAL_PIXELS {
                check_cancelled(cancel)?;
                since_check = 0;
            }

            let c = Complex::new(self.mapping.real_at(x as u32), imag);
            let result = self.algorithm.evaluate(c, pixel_size);
            let value = result.pixel_value();

            row[x] = value;
            stats.evaluated += 1;
            stats.iterations += u64::from(result.iterations);

            let run = match pixel_size {
                Some(pixel_size) => run_length(&result, pixel_size, &self.tuning, width - x),
                None => 1,
            };

            for skipped in x + 1..x + run {
                if !known[skipped] {
                    row[skipped] = value;
                    stats.skipped += 1;
                }
            }

            since_check += run;
            x += run;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::actions::generate_fractal::frame_cache::{CacheEntry, CacheShift};
    use crate::core::data::pixel_rect::PixelRect;
    use crate::core::data::viewport::Viewport;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Exterior everywhere with a fixed distance; the value is the real part.
    struct StubAlgorithm {
        distance: Option<f64>,
        calls: AtomicUsize,
    }

    impl StubAlgorithm {
        fn new(distance: Option<f64>) -> Self {
            Self {
                distance,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FractalAlgorithm for StubAlgorithm {
        fn evaluate(&self, c: Complex, pixel_size: Option<f64>) -> PointResult {
            self.calls.fetch_add(1, Ordering::Relaxed);
            PointResult::exterior(c.real, pixel_size.and(self.distance), 3)
        }
    }

    fn mapping(width: u32) -> PlaneMapping {
        // one plane unit per pixel, x maps to cr = x
        let pixel_rect = PixelRect::new(width, 2).unwrap();
        let viewport = Viewport::new(
            Complex::new(f64::from(width) / 2.0, 0.0),
            f64::from(width),
            2.0,
        )
        .unwrap();

        PlaneMapping::new(&viewport, pixel_rect)
    }

    fn scanner<'a>(algorithm: &'a StubAlgorithm, width: u32, adaptive_skip: bool) -> RowScanner<'a, StubAlgorithm> {
        RowScanner {
            algorithm,
            mapping: mapping(width),
            cached: None,
            tuning: TuningParams::default(),
            adaptive_skip,
        }
    }

    fn exterior_values(row: &[PixelValue]) -> Vec<f64> {
        row.iter().map(|value| value.exterior_value().unwrap()).collect()
    }

    #[test]
    fn test_run_length_rules() {
        let tuning = TuningParams::default();
        let exterior = |distance| PointResult::exterior(5.0, Some(distance), 5);

        assert_eq!(run_length(&PointResult::interior(9), 0.25, &tuning, 100), 1);
        assert_eq!(run_length(&PointResult::exterior(5.0, None, 5), 0.25, &tuning, 100), 1);
        // below 1.5 pixels of detail
        assert_eq!(run_length(&exterior(0.3), 0.25, &tuning, 100), 1);
        // 10 pixels away, 0.9 safety
        assert_eq!(run_length(&exterior(2.5), 0.25, &tuning, 100), 9);
        assert_eq!(run_length(&exterior(10.0), 0.25, &tuning, 100), 32);
        assert_eq!(run_length(&exterior(10.0), 0.25, &tuning, 5), 5);
        assert_eq!(run_length(&exterior(f64::INFINITY), 0.25, &tuning, 100), 32);
        assert_eq!(run_length(&exterior(f64::NAN), 0.25, &tuning, 100), 1);
    }

    #[test]
    fn test_plain_scan_evaluates_every_pixel() {
        let algorithm = StubAlgorithm::new(Some(100.0));
        let mut row = vec![PixelValue::Interior; 6];

        let stats = scanner(&algorithm, 6, false).scan(0, &mut row, &NeverCancel).unwrap();

        assert_eq!(exterior_values(&row), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stats.evaluated, 6);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.iterations, 18);
    }

    #[test]
    fn test_far_from_detail_fills_runs() {
        // distance 3.0 at 1.0 per pixel gives runs of floor(3 * 0.9) = 2
        let algorithm = StubAlgorithm::new(Some(3.0));
        let mut row = vec![PixelValue::Interior; 5];

        let stats = scanner(&algorithm, 5, true).scan(0, &mut row, &NeverCancel).unwrap();

        assert_eq!(exterior_values(&row), vec![0.0, 0.0, 2.0, 2.0, 4.0]);
        assert_eq!(stats.evaluated, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(algorithm.calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_fully_cached_row_needs_no_evaluation() {
        let width = 6;
        let pixel_rect = PixelRect::new(width, 2).unwrap();
        let mut previous = vec![PixelValue::Exterior(-1.0); 12];
        previous[1] = PixelValue::Exterior(42.0);
        let entry = CacheEntry::new(
            Viewport::new(Complex::new(3.0, 0.0), 6.0, 2.0).unwrap(),
            pixel_rect,
            previous,
        )
        .unwrap();
        let shift = CacheShift {
            offset_x: 0,
            offset_y: 0,
        };
        let algorithm = StubAlgorithm::new(Some(100.0));
        let mut scanner = scanner(&algorithm, width, true);
        scanner.cached = Some(CachedFrame::new(&entry, shift));

        let mut row = vec![PixelValue::Interior; 6];
        let stats = scanner.scan(0, &mut row, &NeverCancel).unwrap();

        assert_eq!(row[1], PixelValue::Exterior(42.0));
        assert_eq!(stats.reused, 6);
        assert_eq!(stats.total_pixels(), 6);
        assert_eq!(algorithm.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_cached_pixels_inside_a_run_keep_their_value() {
        let width = 6;
        let pixel_rect = PixelRect::new(width, 1).unwrap();
        let entry = CacheEntry::new(
            Viewport::new(Complex::new(3.0, 0.0), 6.0, 1.0).unwrap(),
            pixel_rect,
            (0..6).map(|i| PixelValue::Exterior(100.0 + f64::from(i))).collect(),
        )
        .unwrap();
        // source x = x - 4, so only columns 4 and 5 are cached
        let shift = CacheShift {
            offset_x: 4,
            offset_y: 0,
        };
        let algorithm = StubAlgorithm::new(Some(100.0));
        let mut scanner = scanner(&algorithm, width, true);
        scanner.mapping = PlaneMapping::new(entry.viewport(), pixel_rect);
        scanner.cached = Some(CachedFrame::new(&entry, shift));

        let mut row = vec![PixelValue::Interior; 6];
        let stats = scanner.scan(0, &mut row, &NeverCancel).unwrap();

        assert_eq!(exterior_values(&row), vec![0.0, 0.0, 0.0, 0.0, 100.0, 101.0]);
        assert_eq!(stats.reused, 2);
        assert_eq!(stats.evaluated, 1);
        assert_eq!(stats.skipped, 3);
    }

    #[test]
    fn test_cancelled_before_row_start() {
        let algorithm = StubAlgorithm::new(None);
        let mut row = vec![PixelValue::Interior; 4];
        let cancel = || true;

        let result = scanner(&algorithm, 4, true).scan(0, &mut row, &cancel);

        assert_eq!(result, Err(Cancelled));
        assert_eq!(algorithm.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_wide_rows_poll_cancellation_repeatedly() {
        let algorithm = StubAlgorithm::new(None);
        let mut row = vec![PixelValue::Interior; 3000];
        let polls = AtomicUsize::new(0);
        let cancel = || {
            polls.fetch_add(1, Ordering::Relaxed);
            false
        };

        scanner(&algorithm, 3000, false).scan(0, &mut row, &cancel).unwrap();

        assert!(polls.load(Ordering::Relaxed) >= 3);
    }
}
