use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::errors::PaletteError;
use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;

pub const DEFAULT_LUT_SIZE: usize = 4096;

/// Fixed-size table sampled from a [`Palette`] at `i / (len - 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteLut {
    entries: Vec<Colour>,
}

impl PaletteLut {
    pub fn new(palette: &Palette, size: usize) -> Result<Self, PaletteError> {
        if size < 2 {
            return Err(PaletteError::LutTooSmall(size));
        }

        let last = (size - 1) as f64;
        let entries = (0..size)
            .map(|i| palette.colour_for(i as f64 / last))
            .collect();

        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[Colour] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn lookup(&self, t: f64) -> Colour {
        let last = self.entries.len() - 1;

        if t.is_nan() || t <= 0.0 {
            return self.entries[0];
        }
        if t >= 1.0 {
            return self.entries[last];
        }

        let index = (t * last as f64).round() as usize;
        self.entries[index.min(last)]
    }
}

impl ColourMap for PaletteLut {
    fn map(&self, t: f64) -> Colour {
        self.lookup(t)
    }

    fn display_name(&self) -> &str {
        "Palette lookup table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fractals::mandelbrot::colour_mapping::kinds::PaletteKind;

    #[test]
    fn test_too_small_lut_is_rejected() {
        let palette = PaletteKind::Twilight.palette();

        assert_eq!(PaletteLut::new(&palette, 1), Err(PaletteError::LutTooSmall(1)));
        assert!(PaletteLut::new(&palette, 2).is_ok());
    }

    #[test]
    fn test_entries_match_direct_interpolation_at_sample_points() {
        let palette = PaletteKind::Twilight.palette();
        let lut = PaletteLut::new(&palette, 257).unwrap();

        for (i, &entry) in lut.entries().iter().enumerate() {
            let t = i as f64 / 256.0;
            assert_eq!(entry, palette.colour_for(t));
            assert_eq!(lut.lookup(t), entry);
        }
    }

    #[test]
    fn test_lookup_endpoints() {
        let palette = PaletteKind::Twilight.palette();
        let lut = PaletteLut::new(&palette, DEFAULT_LUT_SIZE).unwrap();
        let colours = palette.colours();

        assert_eq!(lut.lookup(0.0), colours[0]);
        assert_eq!(lut.lookup(1.0), colours[colours.len() - 1]);
        assert_eq!(lut.lookup(-1.0), colours[0]);
        assert_eq!(lut.lookup(f64::NAN), colours[0]);
        assert_eq!(lut.lookup(2.0), colours[colours.len() - 1]);
    }

    #[test]
    fn test_adjacent_entries_differ_by_at_most_one() {
        for &kind in PaletteKind::ALL {
            let lut = PaletteLut::new(&kind.palette(), DEFAULT_LUT_SIZE).unwrap();

            for pair in lut.entries().windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(a.r.abs_diff(b.r) <= 1, "{kind}: {a:?} -> {b:?}");
                assert!(a.g.abs_diff(b.g) <= 1, "{kind}: {a:?} -> {b:?}");
                assert!(a.b.abs_diff(b.b) <= 1, "{kind}: {a:?} -> {b:?}");
            }
        }
    }
}
