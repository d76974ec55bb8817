pub mod colour;
pub mod complex;
pub mod frame;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod pixel_value;
pub mod point;
pub mod point_result;
pub mod render_stats;
pub mod viewport;
