use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

use crate::controllers::interactive::InteractiveController;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::point::Point;
use crate::core::explorer::FractalExplorer;
use crate::input::gui::errors::GuiError;
use crate::input::gui::ports::presenter::GuiPresenterPort;
use crate::input::view_state::{PanDirection, ViewState};
use crate::presenters::file::ppm::PpmFilePresenter;

const EXPORT_DIR: &str = "output";
/// Trackpads report scroll in pixels; this many count as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 50.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    ViewChanged,
    Exit,
}

pub struct GuiApp<T: GuiPresenterPort> {
    presenter: T,
    pub controller: InteractiveController,
    export_explorer: FractalExplorer,
    file_presenter: PpmFilePresenter,
    view: ViewState,
    cursor: (f64, f64),
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(
        presenter: T,
        controller: InteractiveController,
        export_explorer: FractalExplorer,
        view: ViewState,
    ) -> Self {
        Self {
            presenter,
            controller,
            export_explorer,
            file_presenter: PpmFilePresenter::new(),
            view,
            cursor: (0.0, 0.0),
        }
    }

    pub fn render(&mut self) -> Result<(), pixels::Error> {
        self.presenter.render(self.view.latest_submitted_generation)?;

        if let Some(message) = self.presenter.last_error_message() {
            warn!("last render failed: {message}");
        }

        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), GuiError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.presenter.resize(width, height)?;

        if let Err(err) = self.view.resize(width, height) {
            warn!("ignoring resize to {width}x{height}: {err}");
        }

        Ok(())
    }

    pub fn submit_render_request_if_needed(&mut self) {
        let request = self.view.render_request();

        if self.view.should_submit(&request) {
            let generation = self.controller.submit_request(request);
            self.view.record_submission(request, generation);
        }
    }

    pub fn handle_key(&mut self, key: &Key) -> InputOutcome {
        let direction = match key {
            Key::Named(NamedKey::Escape) => return InputOutcome::Exit,
            Key::Named(NamedKey::ArrowLeft) => PanDirection::Left,
            Key::Named(NamedKey::ArrowRight) => PanDirection::Right,
            Key::Named(NamedKey::ArrowUp) => PanDirection::Up,
            Key::Named(NamedKey::ArrowDown) => PanDirection::Down,
            Key::Character(c) if c.eq_ignore_ascii_case("r") => {
                self.view.reset();
                return InputOutcome::ViewChanged;
            }
            Key::Character(c) if c.eq_ignore_ascii_case("s") => {
                self.export();
                return InputOutcome::Ignored;
            }
            _ => return InputOutcome::Ignored,
        };

        self.view.pan(direction);
        InputOutcome::ViewChanged
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }

        match state {
            ElementState::Pressed => self.view.begin_drag(self.cursor.0, self.cursor.1),
            ElementState::Released => self.view.end_drag(),
        }
    }

    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) -> InputOutcome {
        self.cursor = (x, y);

        if self.view.drag_to(x, y) {
            InputOutcome::ViewChanged
        } else {
            InputOutcome::Ignored
        }
    }

    pub fn handle_wheel(&mut self, delta: MouseScrollDelta) -> InputOutcome {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => f64::from(y),
            MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_NOTCH,
        };

        if notches == 0.0 {
            return InputOutcome::Ignored;
        }

        let cursor = Point {
            x: self.cursor.0 as i32,
            y: self.cursor.1 as i32,
        };

        match self.view.zoom(cursor, notches) {
            Ok(()) => InputOutcome::ViewChanged,
            Err(err) => {
                warn!("zoom rejected: {err}");
                InputOutcome::Ignored
            }
        }
    }

    /// Renders the current view at export resolution on the UI thread and
    /// writes it under `output/`. The interactive cache is not involved.
    pub fn export(&self) {
        let request = match self.view.export_request() {
            Ok(request) => request,
            Err(err) => {
                warn!("export skipped: {err}");
                return;
            }
        };

        let frame = match self.export_explorer.render_to(&request.viewport, request.pixel_rect) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("export render failed: {err}");
                return;
            }
        };

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        let path = format!("{EXPORT_DIR}/mandelbrot-{stamp}.ppm");

        match self.file_presenter.present(&frame.pixel_buffer, &path) {
            Ok(()) => info!(
                "exported {}x{} view to {path}",
                request.pixel_rect.width(),
                request.pixel_rect.height()
            ),
            Err(err) => warn!("failed to write {path}: {err}"),
        }
    }
}
