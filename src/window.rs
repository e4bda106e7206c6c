//! Window runner: drives a [`Simulation`] from a `winit` event loop.
//!
//! One tick per redraw. Cursor, touch and resize events are translated into
//! [`InputEvent`]s; the layers are composited into a frame canvas and handed
//! to the GPU [`Presenter`]. Closing the window stops the simulation.

use crate::canvas::Canvas;
use crate::config::WindowConfig;
use crate::error::PresentError;
use crate::gpu::Presenter;
use crate::input::{InputEvent, InputTranslator};
use crate::simulation::Simulation;
use crate::time::FrameClock;
use crate::viewport::Viewport;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Open a window and run `simulation` until it is closed.
///
/// The simulation is started once the window exists, so its viewport follows
/// the real inner size rather than the requested one. If that size is empty,
/// the start is retried on the first usable resize.
pub fn run(simulation: Simulation, config: &WindowConfig) -> Result<(), PresentError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(simulation, config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    simulation: Simulation,
    title: String,
    size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    frame: Option<Canvas>,
    clock: FrameClock,
    translator: InputTranslator,
    error: Option<PresentError>,
    closing: bool,
}

impl App {
    fn new(simulation: Simulation, config: &WindowConfig) -> Self {
        Self {
            simulation,
            title: config.title.clone(),
            size: PhysicalSize::new(config.width, config.height),
            window: None,
            presenter: None,
            frame: None,
            clock: FrameClock::new(),
            translator: InputTranslator::new(),
            error: None,
            closing: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PresentError) {
        log::error!("{err}");
        self.error = Some(err);
        self.close(event_loop);
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.closing = true;
        self.simulation.stop();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let viewport = self.simulation.viewport();
        if !viewport.is_valid() {
            self.clock.pause();
            return;
        }
        self.clock.resume();
        if self.clock.update() {
            log::debug!(
                "{:.1} fps, {} particles",
                self.clock.fps(),
                self.simulation.particle_count()
            );
        }

        if !self.simulation.tick() {
            return;
        }

        if self.frame.as_ref().map(Canvas::viewport) != Some(viewport) {
            match Canvas::new(viewport) {
                Ok(canvas) => self.frame = Some(canvas),
                Err(err) => {
                    log::warn!("skipping frame: {err}");
                    return;
                }
            }
        }
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        if let Err(err) = self.simulation.composite(frame) {
            log::warn!("skipping frame: {err}");
            return;
        }

        if let Some(presenter) = &mut self.presenter {
            match presenter.present(frame) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory, closing");
                    self.close(event_loop);
                }
                Err(err) => log::warn!("dropped frame: {err}"),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.size);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let presenter = match pollster::block_on(Presenter::new(window.clone())) {
            Ok(presenter) => presenter,
            Err(err) => return self.fail(event_loop, err),
        };
        self.presenter = Some(presenter);

        let viewport = Viewport::from(window.inner_size());
        if !self.simulation.start_at(viewport) {
            log::warn!("simulation not started; waiting for a usable window size");
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(input) = self.translator.translate(&event) {
            if let InputEvent::Resized(viewport) = input {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(viewport);
                }
                if !self.closing && !self.simulation.is_running() && viewport.is_valid() {
                    self.simulation.start_at(viewport);
                }
            }
            self.simulation.handle_event(input);
        }

        match event {
            WindowEvent::CloseRequested => self.close(event_loop),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
