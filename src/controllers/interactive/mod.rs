//! Interactive controller for real-time exploration.
//!
//! Owns a [`FractalExplorer`](crate::core::explorer::FractalExplorer) on a
//! background worker so the overlap cache survives between frames, and
//! dispatches results to the presentation layer through a port.
//!
//! # Architecture
//!
//! - **Input**: [`RenderRequest`] values describing the viewport to render
//! - **Output**: [`InteractiveControllerPresenterPort`] receiving [`RenderEvent`]s
//! - **Core**: the explorer and the stateless render actions in `core/`

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;

pub use controller::InteractiveController;
pub use data::frame_data::FrameData;
pub use data::render_request::RenderRequest;
pub use errors::render_error::RenderError;
pub use events::render_event::RenderEvent;
pub use ports::presenter_port::InteractiveControllerPresenterPort;
