use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::palette::Palette;
use serde::Deserialize;

const TWILIGHT: &[Colour] = &[
    Colour::new(0, 7, 100),
    Colour::new(18, 0, 30),
    Colour::new(60, 10, 80),
    Colour::new(20, 30, 90),
    Colour::new(80, 150, 255),
    Colour::new(200, 255, 200),
    Colour::new(120, 200, 150),
];

const FIRE: &[Colour] = &[
    Colour::new(32, 0, 0),
    Colour::new(128, 0, 0),
    Colour::new(255, 64, 0),
    Colour::new(255, 160, 0),
    Colour::new(255, 255, 128),
    Colour::new(255, 255, 255),
];

const BLUE_WHITE: &[Colour] = &[
    Colour::new(0, 0, 64),
    Colour::new(0, 64, 192),
    Colour::new(96, 160, 255),
    Colour::new(255, 255, 255),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteKind {
    #[default]
    Twilight,
    Fire,
    BlueWhite,
}

impl PaletteKind {
    pub const ALL: &'static [Self] = &[Self::Twilight, Self::Fire, Self::BlueWhite];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Twilight => "Twilight",
            Self::Fire => "Fire",
            Self::BlueWhite => "Blue-white",
        }
    }

    #[must_use]
    pub const fn control_colours(self) -> &'static [Colour] {
        match self {
            Self::Twilight => TWILIGHT,
            Self::Fire => FIRE,
            Self::BlueWhite => BLUE_WHITE,
        }
    }

    #[must_use]
    pub fn palette(self) -> Palette {
        Palette::from_static(self.control_colours())
    }
}

impl std::fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
