//! Startup configuration loaded from TOML.

pub mod errors;
pub mod explorer_config;

pub use errors::ConfigError;
pub use explorer_config::{ExplorerConfig, FractalSection, WindowSection};
