use std::sync::Arc;

use crate::controllers::interactive::ports::presenter_port::InteractiveControllerPresenterPort;

pub trait GuiPresenterPort {
    /// Draws the newest completed frame for `requested_generation`, or keeps
    /// showing the previous one.
    fn render(&mut self, requested_generation: u64) -> Result<(), pixels::Error>;
    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort>;
    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError>;
    fn last_error_message(&self) -> Option<&str>;
}
