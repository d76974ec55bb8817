use crate::config::ConfigError;
use crate::input::view_state::ResizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixels error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("failed to resize surface: {0}")]
    Texture(#[from] pixels::TextureError),
    #[error("invalid window size: {0}")]
    Size(#[from] ResizeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
