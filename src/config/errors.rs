use crate::core::data::pixel_rect::PixelRectError;
use crate::core::data::viewport::ViewportError;
use crate::core::fractals::mandelbrot::colour_mapping::errors::PaletteError;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file named on the command line could not be read.
    #[error("failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Only the escape-time Mandelbrot family is available.
    #[error("unknown fractal {0:?}, expected \"Mandelbrot\"")]
    UnknownFractal(String),

    #[error("invalid fractal parameters: {0}")]
    Params(#[from] MandelbrotError),

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("invalid window size: {0}")]
    Window(#[from] PixelRectError),

    #[error("invalid initial view: {0}")]
    Viewport(#[from] ViewportError),
}
