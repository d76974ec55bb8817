pub mod errors;
pub mod factory;
pub mod kinds;
pub mod lut;
pub mod map;
pub mod palette;
