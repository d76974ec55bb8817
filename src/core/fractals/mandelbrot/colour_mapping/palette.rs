use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::errors::PaletteError;

/// Ordered control colours, linearly interpolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    pub fn new(colours: Vec<Colour>) -> Result<Self, PaletteError> {
        if colours.is_empty() {
            return Err(PaletteError::NoControlColours);
        }

        Ok(Self { colours })
    }

    /// Built-in ramps are known to be non-empty.
    pub(crate) fn from_static(colours: &'static [Colour]) -> Self {
        debug_assert!(!colours.is_empty());
        Self {
            colours: colours.to_vec(),
        }
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Samples the ramp at `t`. Values at or below 0 (and NaN) clamp to the
    /// first colour, values at or above 1 to the last.
    #[must_use]
    pub fn colour_for(&self, t: f64) -> Colour {
        let first = self.colours[0];
        let last = self.colours[self.colours.len() - 1];

        if t.is_nan() || t <= 0.0 || self.colours.len() == 1 {
            return first;
        }
        if t >= 1.0 {
            return last;
        }

        let position = t * (self.colours.len() - 1) as f64;
        let index = (position.floor() as usize).min(self.colours.len() - 2);
        let frac = position - index as f64;

        self.colours[index].lerp(self.colours[index + 1], frac)
    }
}

impl ColourMap for Palette {
    fn map(&self, t: f64) -> Colour {
        self.colour_for(t)
    }

    fn display_name(&self) -> &str {
        "Palette"
    }
}
