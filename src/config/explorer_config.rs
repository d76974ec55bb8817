use crate::config::errors::ConfigError;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::viewport::Viewport;
use crate::core::explorer::FractalExplorer;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
use crate::core::fractals::mandelbrot::colour_mapping::lut::DEFAULT_LUT_SIZE;
use crate::core::fractals::mandelbrot::params::{
    DEFAULT_MAX_ITERATIONS, MandelbrotParams, Optimisations, TuningParams,
};
use log::{debug, warn};
use serde::Deserialize;
use std::path::Path;

const MANDELBROT: &str = "Mandelbrot";

/// Width of the plane shown at startup; the height follows the window aspect.
pub const INITIAL_PLANE_WIDTH: f64 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FractalSection {
    pub name: String,
    pub max_iterations: u32,
    pub palette: PaletteKind,
    pub lut_size: usize,
}

impl Default for FractalSection {
    fn default() -> Self {
        Self {
            name: MANDELBROT.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            palette: PaletteKind::default(),
            lut_size: DEFAULT_LUT_SIZE,
        }
    }
}

/// Everything fixed at startup. Every section and key is optional:
///
/// ```toml
/// [window]
/// width = 800
/// height = 600
///
/// [fractal]
/// name = "Mandelbrot"
/// max_iterations = 1000
/// palette = "twilight"
///
/// [tuning]
/// safety_factor = 0.9
///
/// [optimisations]
/// adaptive_skip = false
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    pub window: WindowSection,
    pub fractal: FractalSection,
    pub tuning: TuningParams,
    pub optimisations: Optimisations,
}

impl ExplorerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&contents).inspect_err(|err| {
            warn!("rejecting config {}: {err}", path.display());
        })?;

        debug!("loaded config from {}", path.display());

        Ok(config)
    }

    /// Parses and validates a config document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fractal.name.eq_ignore_ascii_case(MANDELBROT) {
            return Err(ConfigError::UnknownFractal(self.fractal.name.clone()));
        }

        self.params()?;
        self.pixel_rect()?;

        Ok(())
    }

    pub fn params(&self) -> Result<MandelbrotParams, ConfigError> {
        Ok(MandelbrotParams::new(
            self.fractal.max_iterations,
            self.tuning,
            self.optimisations,
        )?)
    }

    pub fn pixel_rect(&self) -> Result<PixelRect, ConfigError> {
        Ok(PixelRect::new(self.window.width, self.window.height)?)
    }

    /// Origin-centred view, [`INITIAL_PLANE_WIDTH`] wide, matching the window aspect.
    pub fn initial_viewport(&self) -> Result<Viewport, ConfigError> {
        Ok(Viewport::for_raster(
            Complex::ZERO,
            INITIAL_PLANE_WIDTH,
            self.pixel_rect()?,
        )?)
    }

    pub fn explorer(&self) -> Result<FractalExplorer, ConfigError> {
        Ok(FractalExplorer::new(
            self.params()?,
            self.fractal.palette,
            self.fractal.lut_size,
        )?)
    }
}
