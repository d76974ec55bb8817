use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette needs at least one control colour")]
    NoControlColours,
    #[error("colour lookup table needs at least 2 entries, got {0}")]
    LutTooSmall(usize),
}
