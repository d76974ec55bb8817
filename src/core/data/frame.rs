use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::pixel_value::PixelValue;
use crate::core::data::render_stats::RenderStats;
use crate::core::data::viewport::Viewport;

/// One fully resolved and coloured render.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub pixel_rect: PixelRect,
    /// Raw value per pixel, row-major.
    pub values: Vec<PixelValue>,
    pub pixel_buffer: PixelBuffer,
    pub stats: RenderStats,
    /// Rows copied from their reflection across the real axis.
    pub mirrored_rows: Vec<bool>,
}
