use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::viewport::Viewport;

/// Snapshot of what one render job should produce.
///
/// `PartialEq` lets the input layer skip resubmitting an unchanged view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    pub viewport: Viewport,
    pub pixel_rect: PixelRect,
}
