use crate::core::data::frame::Frame;
use std::time::Duration;

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub frame: Frame,
    pub render_duration: Duration,
}
