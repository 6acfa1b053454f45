use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::SurfaceSize;
use crate::core::{App as CoreApp, AppControl, FrameCtx, SurfaceCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::translate::translate_window_event;
use crate::input::InputState;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Request a window with an alpha channel.
    pub transparent: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "afterglow".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            transparent: true,
        }
    }
}

/// Runtime handle passed to `on_frame`.
///
/// Requests are applied after the callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit: bool,
}

impl RuntimeCtx {
    /// Ends the event loop after the current frame.
    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Single-window event loop driver.
///
/// One window, one GPU surface, one frame clock. Every redraw ticks the clock
/// and hands the frame to the app; a new redraw is requested right after, so
/// the app sees a continuous stream of frames paced by the present mode.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs the event loop to completion and returns the
    /// first startup error (window or GPU creation), if any.
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            initial,
            gpu_init,
            app,
            entry: None,
            exiting: false,
            startup_error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window and the GPU surface borrowing it.
#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_transparent(config.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    /// Runs `f` with a surface context, then schedules a redraw.
    fn with_surface<R>(&mut self, f: impl FnOnce(&mut SurfaceCtx<'_, '_>) -> R) -> R {
        self.with_mut(|fields| {
            let mut ctx = SurfaceCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
            };
            let out = f(&mut ctx);
            fields.window.request_redraw();
            out
        })
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exiting: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        event_loop.exit();
    }

    fn dispatch_resize(&mut self, size: Option<SurfaceSize>) {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        entry.with_surface(|ctx| {
            let size = size.unwrap_or_else(|| ctx.window.physical_size());
            app.on_resize(ctx, size);
        });
    }

    fn dispatch_frame(&mut self) -> bool {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return false;
        };

        let mut runtime = RuntimeCtx::default();
        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
                time,
                runtime: &mut runtime,
            };

            if app.on_frame(&mut ctx) == AppControl::Exit {
                ctx.runtime.exit();
            }
        });
        runtime.exit
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match WindowEntry::open(event_loop, &self.initial, self.gpu_init.clone()) {
            Ok(entry) => self.entry = Some(entry),
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.startup_error = Some(e);
                self.exit(event_loop);
                return;
            }
        }

        let (app, entry) = (&mut self.app, &mut self.entry);
        let control = entry
            .as_mut()
            .map_or(AppControl::Continue, |entry| {
                entry.with_surface(|ctx| app.on_surface_ready(ctx))
            });

        if control == AppControl::Exit {
            self.exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // The time source ticks once per redraw; keep them coming.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut().filter(|e| e.id() == window_id) else {
            return;
        };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(&ev);
                if app.on_input(window_id, &ev) == AppControl::Exit {
                    control = AppControl::Exit;
                }
            }
            if app.on_window_event(window_id, &event) == AppControl::Exit {
                control = AppControl::Exit;
            }
        });

        if control == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.exit(event_loop);
            }
            WindowEvent::Resized(size) => self.dispatch_resize(Some(SurfaceSize::from(size))),
            WindowEvent::ScaleFactorChanged { .. } => self.dispatch_resize(None),
            WindowEvent::RedrawRequested => {
                if self.dispatch_frame() {
                    self.exit(event_loop);
                }
            }
            _ => {}
        }
    }
}
