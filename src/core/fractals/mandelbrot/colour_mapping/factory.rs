use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::errors::PaletteError;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;
use crate::core::fractals::mandelbrot::colour_mapping::lut::PaletteLut;
use crate::core::fractals::mandelbrot::colour_mapping::map::MandelbrotColourMap;

/// A named palette baked into a lookup table.
#[derive(Debug, Clone)]
pub struct MandelbrotPaletteLut {
    kind: PaletteKind,
    lut: PaletteLut,
}

impl MandelbrotPaletteLut {
    #[must_use]
    pub fn lut(&self) -> &PaletteLut {
        &self.lut
    }
}

impl ColourMap for MandelbrotPaletteLut {
    #[inline]
    fn map(&self, t: f64) -> Colour {
        self.lut.lookup(t)
    }

    fn display_name(&self) -> &str {
        self.kind.display_name()
    }
}

impl MandelbrotColourMap for MandelbrotPaletteLut {
    fn kind(&self) -> PaletteKind {
        self.kind
    }
}

pub fn mandelbrot_colour_map_factory(
    kind: PaletteKind,
    lut_size: usize,
) -> Result<Box<dyn MandelbrotColourMap>, PaletteError> {
    let lut = PaletteLut::new(&kind.palette(), lut_size)?;

    Ok(Box::new(MandelbrotPaletteLut { kind, lut }))
}
