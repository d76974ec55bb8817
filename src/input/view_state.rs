use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use crate::core::data::viewport::{Viewport, ViewportError};
use log::debug;

/// Share of the visible width (or height) moved by one arrow key press.
pub const ARROW_PAN_FRACTION: f64 = 0.1;
/// Zoom applied per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.2;
/// Exports are rendered at this multiple of the window resolution.
pub const EXPORT_SCALE: u32 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Input-independent view state of an interactive session.
///
/// Every pan moves the view by whole pixels so the next frame can be served
/// largely from the overlap cache; zooms and resizes are free-form.
#[derive(Debug, Clone)]
pub struct ViewState {
    home: Viewport,
    viewport: Viewport,
    pixel_rect: PixelRect,
    drag_anchor: Option<(f64, f64)>,
    last_submitted_request: Option<RenderRequest>,
    pub latest_submitted_generation: u64,
}

impl ViewState {
    #[must_use]
    pub fn new(home: Viewport, pixel_rect: PixelRect) -> Self {
        Self {
            home,
            viewport: home,
            pixel_rect,
            drag_anchor: None,
            last_submitted_request: None,
            latest_submitted_generation: 0,
        }
    }

    /// Origin-centred home view, `plane_width` wide, on a `width × height` raster.
    pub fn centred(plane_width: f64, width: u32, height: u32) -> Result<Self, ResizeError> {
        let pixel_rect = PixelRect::new(width, height)?;
        let home = Viewport::for_raster(Complex::ZERO, plane_width, pixel_rect)?;

        Ok(Self::new(home, pixel_rect))
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    pub fn pan(&mut self, direction: PanDirection) {
        let step = |pixels: u32| ((f64::from(pixels) * ARROW_PAN_FRACTION).round() as i32).max(1);
        let columns = step(self.pixel_rect.width());
        let rows = step(self.pixel_rect.height());

        let (columns, rows) = match direction {
            PanDirection::Left => (-columns, 0),
            PanDirection::Right => (columns, 0),
            PanDirection::Up => (0, -rows),
            PanDirection::Down => (0, rows),
        };

        self.viewport = self.viewport.shifted_by_pixels(columns, rows, self.pixel_rect);
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag_anchor = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Follows the cursor while dragging. Movement is applied in whole
    /// pixels; the fractional remainder carries over to the next call.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some((anchor_x, anchor_y)) = self.drag_anchor else {
            return false;
        };

        let columns = (x - anchor_x).trunc();
        let rows = (y - anchor_y).trunc();

        if columns == 0.0 && rows == 0.0 {
            return false;
        }

        // content follows the cursor, so the window moves the other way
        self.viewport = self
            .viewport
            .shifted_by_pixels(-(columns as i32), -(rows as i32), self.pixel_rect);
        self.drag_anchor = Some((anchor_x + columns, anchor_y + rows));

        true
    }

    /// Zooms about `cursor`; positive `notches` zoom in.
    pub fn zoom(&mut self, cursor: Point, notches: f64) -> Result<(), ViewportError> {
        let cursor = Point {
            x: cursor.x.clamp(0, self.pixel_rect.width() as i32 - 1),
            y: cursor.y.clamp(0, self.pixel_rect.height() as i32 - 1),
        };

        self.viewport = self
            .viewport
            .zoomed_about(cursor, WHEEL_ZOOM_FACTOR.powf(notches), self.pixel_rect)?;

        Ok(())
    }

    /// Keeps centre and plane width; the height follows the new aspect.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ResizeError> {
        let pixel_rect = PixelRect::new(width, height)?;

        self.viewport = Viewport::for_raster(self.viewport.center(), self.viewport.width(), pixel_rect)?;
        self.home = Viewport::for_raster(self.home.center(), self.home.width(), pixel_rect)?;
        self.pixel_rect = pixel_rect;

        debug!("view resized to {width}x{height}");

        Ok(())
    }

    pub fn reset(&mut self) {
        self.viewport = self.home;
    }

    #[must_use]
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            viewport: self.viewport,
            pixel_rect: self.pixel_rect,
        }
    }

    /// The current view at [`EXPORT_SCALE`] times the window resolution.
    pub fn export_request(&self) -> Result<RenderRequest, PixelRectError> {
        Ok(RenderRequest {
            viewport: self.viewport,
            pixel_rect: self.pixel_rect.scaled(EXPORT_SCALE)?,
        })
    }

    #[must_use]
    pub fn should_submit(&self, request: &RenderRequest) -> bool {
        self.last_submitted_request
            .as_ref()
            .is_none_or(|last| last != request)
    }

    pub fn record_submission(&mut self, request: RenderRequest, generation: u64) {
        self.last_submitted_request = Some(request);
        self.latest_submitted_generation = generation;
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResizeError {
    #[error(transparent)]
    PixelRect(#[from] PixelRectError),
    #[error(transparent)]
    Viewport(#[from] ViewportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ViewState {
        // 1/32 per pixel keeps every pan exact
        ViewState::centred(4.0, 128, 64).unwrap()
    }

    #[test]
    fn test_arrow_pan_moves_a_tenth_of_the_view() {
        let mut state = state();

        // 12.8 columns rounds to 13
        state.pan(PanDirection::Right);
        assert_eq!(state.viewport().center(), Complex::new(13.0 / 32.0, 0.0));

        // 6.4 rows rounds to 6
        state.pan(PanDirection::Up);
        assert_eq!(state.viewport().center(), Complex::new(13.0 / 32.0, 6.0 / 32.0));
    }

    #[test]
    fn test_arrow_pan_is_whole_pixels_on_odd_sizes() {
        let pixel_rect = PixelRect::new(64, 33).unwrap();
        let home = Viewport::new(Complex::ZERO, 4.0, 4.0).unwrap();
        let mut state = ViewState::new(home, pixel_rect);

        state.pan(PanDirection::Down);

        // 3.3 rows rounds to 3
        assert_eq!(state.viewport(), &home.shifted_by_pixels(0, 3, pixel_rect));
    }

    #[test]
    fn test_drag_moves_by_whole_pixels_and_carries_remainder() {
        let mut state = state();
        let home = *state.viewport();

        assert!(!state.drag_to(10.0, 10.0), "no drag in progress");

        state.begin_drag(10.0, 10.0);
        assert!(!state.drag_to(10.6, 10.2));
        assert!(state.drag_to(12.5, 10.2));
        assert_eq!(state.viewport(), &home.shifted_by_pixels(-2, 0, state.pixel_rect()));

        // 0.5 left over from the previous call plus 0.6 more
        assert!(state.drag_to(13.1, 10.2));
        assert_eq!(state.viewport(), &home.shifted_by_pixels(-3, 0, state.pixel_rect()));

        state.end_drag();
        assert!(!state.drag_to(50.0, 50.0));
    }

    #[test]
    fn test_wheel_zoom_about_cursor() {
        let mut state = state();

        state.zoom(Point { x: 64, y: 32 }, 1.0).unwrap();

        assert!((state.viewport().width() - 4.0 / 1.2).abs() < 1e-12);
        assert!(state.viewport().center().real.abs() < 1e-12);

        state.zoom(Point { x: 64, y: 32 }, -1.0).unwrap();
        assert!((state.viewport().width() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_returns_home() {
        let mut state = state();
        let home = *state.viewport();

        state.pan(PanDirection::Left);
        state.zoom(Point { x: 3, y: 4 }, 2.0).unwrap();
        state.reset();

        assert_eq!(state.viewport(), &home);
    }

    #[test]
    fn test_resize_keeps_centre_and_width() {
        let mut state = state();
        state.pan(PanDirection::Right);

        state.resize(200, 200).unwrap();

        assert_eq!(state.viewport().center(), Complex::new(13.0 / 32.0, 0.0));
        assert_eq!(state.viewport().width(), 4.0);
        assert_eq!(state.viewport().height(), 4.0);
        assert!(state.resize(0, 10).is_err());
    }

    #[test]
    fn test_export_request_doubles_resolution() {
        let state = state();

        let export = state.export_request().unwrap();

        assert_eq!(export.viewport, *state.viewport());
        assert_eq!(export.pixel_rect, PixelRect::new(256, 128).unwrap());
    }

    #[test]
    fn test_centred_rejects_empty_raster() {
        assert_eq!(
            ViewState::centred(4.0, 0, 10).unwrap_err(),
            ResizeError::PixelRect(PixelRectError::InvalidSize { width: 0, height: 10 })
        );
    }

    #[test]
    fn test_unchanged_view_is_not_resubmitted() {
        let mut state = state();

        let request = state.render_request();
        assert!(state.should_submit(&request));
        state.record_submission(request, 1);
        assert!(!state.should_submit(&state.render_request()));

        state.pan(PanDirection::Left);
        assert!(state.should_submit(&state.render_request()));
        assert_eq!(state.latest_submitted_generation, 1);
    }
}
