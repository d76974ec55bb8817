/// User events posted into the winit loop from other threads.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// The render worker has handed the presenter a new event. The loop only
    /// marks a redraw as pending; the presenter decides whether to draw it.
    Wake,
}
