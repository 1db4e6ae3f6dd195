use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::GpuInit;
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::render::{FrameDriver, LoopState, SceneConfig, WgpuBackend};
use crate::scene::FACADE_SIZE;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let (w, h) = FACADE_SIZE;
        Self {
            title: "facade".to_string(),
            initial_size: LogicalSize::new(f64::from(w), f64::from(h)),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, renders `scene` into it until closed, then cleans up.
    ///
    /// Any initialization or rendering failure ends the loop and is returned.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,

    window: Window,

    #[borrows(window)]
    #[covariant]
    driver: FrameDriver<WgpuBackend<'this>>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scene: SceneConfig,

    window: Option<(WindowId, WindowEntry)>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig) -> Self {
        Self {
            config,
            gpu_init,
            scene,
            window: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.close(event_loop);
    }

    /// Releases GPU resources, drops the window and stops the loop.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some((_, mut entry)) = self.window.take() {
            entry.with_driver_mut(|d| d.shutdown());
        }
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let size = window.inner_size();
        log::info!(
            "created window `{}` ({}x{} physical)",
            self.config.title,
            size.width,
            size.height
        );

        let gpu_init = self.gpu_init.clone();
        let scene = self.scene.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            window,
            driver_builder: |w| {
                let backend = pollster::block_on(WgpuBackend::new(w, gpu_init))
                    .context("GPU initialization failed")?;
                let size = w.inner_size();
                FrameDriver::new(backend, scene, size.width, size.height)
            },
        }
        .try_build()?;

        entry.with_window(|w| w.request_redraw());
        self.window = Some((id, entry));
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw; presentation paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some((_, entry)) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some((id, entry)) = self.window.as_mut() else {
            return;
        };
        if *id != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            entry.with_mut(|fields| fields.input_state.apply_event(fields.input_frame, ev));
        }

        match &event {
            WindowEvent::CloseRequested => {
                entry.with_driver_mut(|d| d.request_close());
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                entry.with_driver_mut(|d| d.resize(size.width, size.height));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_driver_mut(|d| d.resize(size.width, size.height));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let result = entry.with_mut(|fields| {
                    let result = fields.driver.frame(fields.input_state, fields.input_frame);
                    // Per-frame deltas are consumed by this frame.
                    fields.input_frame.clear();
                    result
                });

                match result {
                    Ok(LoopState::Running) => {}
                    Ok(LoopState::Closing) => self.close(event_loop),
                    Err(e) => self.fail(event_loop, e.context("frame rendering failed")),
                }
            }

            _ => {}
        }
    }
}
