use std::marker::PhantomData;

use log::error;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoopBuilder;
use winit::window::{Window, WindowBuilder};

use crate::config::ExplorerConfig;
use crate::config::explorer_config::INITIAL_PLANE_WIDTH;
use crate::controllers::interactive::InteractiveController;
use crate::input::gui::errors::GuiError;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::gui_app::{GuiApp, InputOutcome};
use crate::input::gui::ports::presenter::GuiPresenterPort;
use crate::input::gui::ports::presenter_factory::GuiPresenterFactoryPort;
use crate::input::view_state::ViewState;

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: ExplorerConfig,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F, config: ExplorerConfig) -> Self {
        Self {
            presenter_factory,
            config,
            _phantom: PhantomData,
        }
    }

    pub fn execute(&self) -> Result<(), GuiError> {
        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();

        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Mandelbrot Explorer")
                .with_inner_size(PhysicalSize::new(self.config.window.width, self.config.window.height))
                .with_min_inner_size(LogicalSize::new(200.0, 200.0))
                .build(&event_loop)?,
        ));

        let size = window.inner_size();
        let view = ViewState::centred(INITIAL_PLANE_WIDTH, size.width.max(1), size.height.max(1))?;

        let presenter: P = self.presenter_factory.build(window, event_loop_proxy)?;
        let controller = InteractiveController::new(self.config.explorer()?, presenter.share_adapter());
        let mut app = GuiApp::new(
            presenter,
            controller,
            self.config.explorer()?,
            view,
        );
        let mut redraw_pending = true;

        event_loop.run(move |event, elwt| match event {
            Event::UserEvent(GuiEvent::Wake) => {
                redraw_pending = true;
            }
            Event::WindowEvent { event, window_id } if window_id == window.id() => {
                let outcome = match event {
                    WindowEvent::CloseRequested => InputOutcome::Exit,
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state,
                                ..
                            },
                        ..
                    } if state == ElementState::Pressed => app.handle_key(&logical_key),
                    WindowEvent::MouseInput { state, button, .. } => {
                        app.handle_mouse_button(button, state);
                        InputOutcome::Ignored
                    }
                    WindowEvent::CursorMoved { position, .. } => app.handle_cursor_moved(position.x, position.y),
                    WindowEvent::MouseWheel { delta, .. } => app.handle_wheel(delta),
                    WindowEvent::Resized(size) => {
                        if let Err(err) = app.resize(size.width, size.height) {
                            error!("resize failed: {err}");
                            InputOutcome::Exit
                        } else {
                            InputOutcome::ViewChanged
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        redraw_pending = false;
                        app.submit_render_request_if_needed();

                        if let Err(err) = app.render() {
                            error!("render error: {err}");
                            InputOutcome::Exit
                        } else {
                            InputOutcome::Ignored
                        }
                    }
                    _ => InputOutcome::Ignored,
                };

                match outcome {
                    InputOutcome::Exit => {
                        app.controller.shutdown();
                        elwt.exit();
                    }
                    InputOutcome::ViewChanged => redraw_pending = true,
                    InputOutcome::Ignored => {}
                }
            }
            Event::AboutToWait => {
                if redraw_pending {
                    window.request_redraw();
                }
            }
            _ => {}
        })?;

        Ok(())
    }
}
