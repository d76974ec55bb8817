use crate::core::data::colour::Colour;

/// Maps a normalised value `t` in `[0, 1]` to a colour.
pub trait ColourMap: Sync {
    fn map(&self, t: f64) -> Colour;

    fn display_name(&self) -> &str;
}
