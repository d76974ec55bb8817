use std::path::Path;

use log::{info, warn};

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::render_frame::render_frame::RenderFrameError;
use crate::core::data::frame::Frame;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::render_stats::RenderStats;
use crate::core::data::viewport::Viewport;
use crate::core::explorer::FractalExplorer;

/// Headless driver: renders a view, optionally walks it sideways through the
/// cache, and hands the last frame to a file presenter.
pub struct CliRenderController<P: FilePresenterPort> {
    explorer: FractalExplorer,
    presenter: P,
    frame: Option<Frame>,
}

impl<P: FilePresenterPort> CliRenderController<P> {
    pub fn new(explorer: FractalExplorer, presenter: P) -> Self {
        Self {
            explorer,
            presenter,
            frame: None,
        }
    }

    #[must_use]
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn generate(&mut self, viewport: &Viewport, pixel_rect: PixelRect) -> Result<&Frame, RenderFrameError> {
        let frame = self.explorer.render(viewport, pixel_rect)?;

        Ok(self.frame.insert(frame))
    }

    /// Renders `frames` successive views, each `columns` pixels to the side
    /// of the last, and returns their summed statistics.
    pub fn pan(&mut self, columns: i32, frames: u32) -> Result<RenderStats, RenderFrameError> {
        let mut totals = RenderStats::default();

        let Some(start) = self.frame.as_ref() else {
            warn!("nothing to pan: no frame rendered yet");
            return Ok(totals);
        };
        let pixel_rect = start.pixel_rect;
        let mut viewport = start.viewport;

        for _ in 0..frames {
            viewport = viewport.shifted_by_pixels(columns, 0, pixel_rect);
            totals += self.generate(&viewport, pixel_rect)?.stats;
        }

        if frames > 0 {
            info!(
                "{frames} pans: {} evaluated, {} reused ({:.1}% of pixels)",
                totals.evaluated,
                totals.reused,
                100.0 * totals.reused as f64 / totals.total_pixels().max(1) as f64,
            );
        }

        Ok(totals)
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(frame) = &self.frame {
            self.presenter.present(&frame.pixel_buffer, filepath)?
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use crate::core::data::pixel_buffer::PixelBuffer;
    use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
    use crate::core::fractals::mandelbrot::params::MandelbrotParams;
    use crate::presenters::file::ppm::PpmFilePresenter;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingPresenter {
        written: RefCell<Vec<(PathBuf, usize)>>,
    }

    impl FilePresenterPort for &RecordingPresenter {
        fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
            self.written
                .borrow_mut()
                .push((filepath.as_ref().to_path_buf(), buffer.buffer_size()));
            Ok(())
        }
    }

    fn explorer() -> FractalExplorer {
        FractalExplorer::new(MandelbrotParams::with_max_iterations(100).unwrap(), PaletteKind::Fire, 256).unwrap()
    }

    fn setup() -> (PixelRect, Viewport) {
        let pixel_rect = PixelRect::new(32, 24).unwrap();

        (pixel_rect, Viewport::for_raster(Complex::new(-0.5, 0.0), 4.0, pixel_rect).unwrap())
    }

    #[test]
    fn test_write_without_frame_does_nothing() {
        let presenter = RecordingPresenter::default();
        let controller = CliRenderController::new(explorer(), &presenter);

        controller.write("unused.ppm").unwrap();

        assert!(presenter.written.borrow().is_empty());
    }

    #[test]
    fn test_generate_then_write_presents_the_frame() {
        let (pixel_rect, viewport) = setup();
        let presenter = RecordingPresenter::default();
        let mut controller = CliRenderController::new(explorer(), &presenter);

        let frame = controller.generate(&viewport, pixel_rect).unwrap();
        assert_eq!(frame.stats.total_pixels(), pixel_rect.size());
        controller.write("out.ppm").unwrap();

        assert_eq!(
            presenter.written.borrow().as_slice(),
            &[(PathBuf::from("out.ppm"), 32 * 24 * 4)]
        );
    }

    #[test]
    fn test_pan_reuses_all_but_one_column_per_frame() {
        let (pixel_rect, viewport) = setup();
        let presenter = RecordingPresenter::default();
        let mut controller = CliRenderController::new(explorer(), &presenter);
        controller.generate(&viewport, pixel_rect).unwrap();

        let totals = controller.pan(1, 3).unwrap();

        assert_eq!(totals.total_pixels(), 3 * pixel_rect.size());
        // only the newly exposed column is ever evaluated
        assert!(totals.evaluated + totals.skipped <= 3 * 24);
        assert!(totals.reused > 0);
        let last = controller.frame().unwrap();
        assert_eq!(last.viewport, viewport.shifted_by_pixels(3, 0, pixel_rect));
    }

    #[test]
    fn test_pan_without_frame_is_a_no_op() {
        let presenter = RecordingPresenter::default();
        let mut controller = CliRenderController::new(explorer(), &presenter);

        assert_eq!(controller.pan(1, 5).unwrap(), RenderStats::default());
        assert!(controller.frame().is_none());
    }

    #[test]
    fn test_ppm_file_is_written() {
        let (pixel_rect, viewport) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mandelbrot.ppm");
        let mut controller = CliRenderController::new(explorer(), PpmFilePresenter::new());

        controller.generate(&viewport, pixel_rect).unwrap();
        controller.write(&path).unwrap();

        let written = std::fs::read(&path).unwrap();
        let header = b"P6\n32 24\n255\n";
        assert_eq!(&written[..header.len()], header);
        assert_eq!(written.len(), header.len() + 32 * 24 * 3);
    }
}
