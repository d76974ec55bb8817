use std::sync::{Mutex, PoisonError};
use winit::event_loop::EventLoopProxy;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::InteractiveControllerPresenterPort;
use crate::input::gui::events::GuiEvent;

/// Hand-off slot between the render worker and the UI thread. Only the
/// newest event is kept.
pub struct PixelsAdapter {
    render_event: Mutex<Option<RenderEvent>>,
    event_loop_proxy: EventLoopProxy<GuiEvent>,
}

impl InteractiveControllerPresenterPort for PixelsAdapter {
    fn present(&self, event: RenderEvent) {
        *self.render_event.lock().unwrap_or_else(PoisonError::into_inner) = Some(event);
        let _ = self.event_loop_proxy.send_event(GuiEvent::Wake);
    }
}

impl PixelsAdapter {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            render_event: Mutex::new(None),
            event_loop_proxy,
        }
    }

    pub fn take_render_event(&self) -> Option<RenderEvent> {
        self.render_event.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
