mod adapters;
pub mod config;
mod controllers;
mod core;
mod input;
mod presenters;

pub use adapters::pixel_format::{copy_rgba_to_rgb, rgba_to_rgb};
pub use config::{ConfigError, ExplorerConfig};
pub use controllers::cli::cli_render::CliRenderController;
pub use controllers::interactive::{
    FrameData, InteractiveController, InteractiveControllerPresenterPort, RenderError, RenderEvent, RenderRequest,
};
pub use controllers::ports::file_presenter::FilePresenterPort;
pub use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::generate_fractal::frame_cache::{CacheEntry, CacheShift, try_reuse};
pub use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::{
    GeneratedValues, generate_fractal_parallel_rayon,
};
pub use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
pub use crate::core::actions::render_frame::render_frame::{RenderFrameError, render_frame, render_frame_cancelable};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::frame::Frame;
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::pixel_rect::PixelRect;
pub use crate::core::data::pixel_value::PixelValue;
pub use crate::core::data::point::Point;
pub use crate::core::data::point_result::{Escape, PointResult};
pub use crate::core::data::render_stats::RenderStats;
pub use crate::core::data::viewport::{Viewport, ViewportError};
pub use crate::core::explorer::FractalExplorer;
pub use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
pub use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
pub use crate::core::fractals::mandelbrot::colour_mapping::lut::{DEFAULT_LUT_SIZE, PaletteLut};
pub use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;
pub use crate::core::fractals::mandelbrot::params::{MandelbrotParams, Optimisations, TuningParams};
pub use input::view_state::{PanDirection, ViewState};
pub use presenters::file::ppm::PpmFilePresenter;

#[cfg(feature = "gui")]
pub use input::gui::{GuiError, GuiEvent, RunGuiCommand};
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
