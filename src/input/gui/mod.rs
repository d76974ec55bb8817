//! Windowed front end for interactive exploration.
//!
//! winit owns the window and input, pixels owns the framebuffer. Rendering
//! happens on the [`InteractiveController`](crate::controllers::interactive::InteractiveController)
//! worker; this module only turns input into requests and draws what comes back.

mod gui_app;
pub mod errors;
pub mod events;
pub mod ports;
pub mod run_gui;

pub use errors::GuiError;
pub use events::GuiEvent;
pub use run_gui::RunGuiCommand;
