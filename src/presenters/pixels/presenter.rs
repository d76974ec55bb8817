use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::InteractiveControllerPresenterPort;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::ports::presenter::GuiPresenterPort;
use crate::presenters::pixels::adapter::PixelsAdapter;
use log::debug;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    adapter: Arc<PixelsAdapter>,
    width: u32,
    height: u32,
    has_frame: bool,
    last_presented_generation: u64,
    last_error_message: Option<String>,
}

impl PixelsPresenter {
    pub fn new(window: &'static Window, event_loop_proxy: EventLoopProxy<GuiEvent>) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        Ok(Self {
            pixels,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            width: size.width,
            height: size.height,
            has_frame: false,
            last_presented_generation: 0,
            last_error_message: None,
        })
    }

    fn draw_placeholder(&mut self) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }
    }

    /// Pulls the newest worker event and copies its frame into the surface if
    /// it is current and matches the surface size.
    fn maybe_draw_frame(&mut self, requested_generation: u64) {
        let Some(event) = self.adapter.take_render_event() else {
            return;
        };

        match event {
            RenderEvent::Frame(frame) => {
                let pixel_rect = frame.frame.pixel_rect;

                if frame.generation > self.last_presented_generation
                    && frame.generation <= requested_generation
                    && pixel_rect.width() == self.width
                    && pixel_rect.height() == self.height
                {
                    self.copy_pixel_buffer_into_pixels_frame(&frame);
                    self.has_frame = true;
                    self.last_presented_generation = frame.generation;
                    self.last_error_message = None;
                    debug!("presented generation {} ({:?})", frame.generation, frame.render_duration);
                }
            }
            RenderEvent::Error(error) => {
                if error.generation >= self.last_presented_generation {
                    self.last_error_message = Some(error.message);
                }
            }
        }
    }

    fn copy_pixel_buffer_into_pixels_frame(&mut self, frame: &FrameData) {
        let src = frame.frame.pixel_buffer.buffer();
        let dest = self.pixels.frame_mut();

        if dest.len() == src.len() {
            dest.copy_from_slice(src);
        }
    }
}

impl GuiPresenterPort for PixelsPresenter {
    fn render(&mut self, requested_generation: u64) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        self.maybe_draw_frame(requested_generation);

        if !self.has_frame {
            self.draw_placeholder();
        }

        self.pixels.render()
    }

    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort> {
        Arc::clone(&self.adapter) as Arc<dyn InteractiveControllerPresenterPort>
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.width = width;
        self.height = height;

        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;

        self.has_frame = false;

        Ok(())
    }

    fn last_error_message(&self) -> Option<&str> {
        self.last_error_message.as_deref()
    }
}
