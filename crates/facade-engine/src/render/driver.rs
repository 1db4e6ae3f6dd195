use anyhow::Result;

use crate::coords::Viewport;
use crate::input::{InputFrame, InputState, Key};
use crate::paint::Color;
use crate::scene::{ShapeDef, ShapeRegistry, FACADE};
use crate::shader::{ShaderCache, ShaderSources};

use super::{DrawCall, FrameOutcome, RenderBackend};

/// Framebuffer clear color (cyan-white sky).
pub const CLEAR_COLOR: Color = Color::rgba(0.2, 1.0, 1.0, 1.0);

/// What the driver draws and how.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub shapes: &'static [ShapeDef],
    pub clear: Color,
    pub shaders: ShaderSources,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shapes: &FACADE,
            clear: CLEAR_COLOR,
            shaders: ShaderSources::default(),
        }
    }
}

/// Render loop state.
///
/// `Closing` is terminal: once entered, no further frames are drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Closing,
}

/// Drives one frame at a time over a static scene.
///
/// Construction compiles every needed program and uploads every shape; any
/// failure there is returned and nothing is ever drawn.
pub struct FrameDriver<B: RenderBackend> {
    backend: B,
    shaders: ShaderCache,
    registry: ShapeRegistry,
    draws: Vec<DrawCall>,
    clear: Color,
    state: LoopState,
    viewport: Viewport,
    frames_presented: u64,
}

impl<B: RenderBackend> FrameDriver<B> {
    /// Builds the scene on `backend` for a framebuffer of `width` × `height`.
    pub fn new(mut backend: B, config: SceneConfig, width: u32, height: u32) -> Result<Self> {
        let SceneConfig {
            shapes,
            clear,
            shaders,
        } = config;

        let mut registry = ShapeRegistry::from_table(shapes)?;
        let mut shaders = ShaderCache::new(shaders);
        registry.upload(&mut backend, &mut shaders)?;

        let draws = registry.draw_calls().collect();

        let mut driver = Self {
            backend,
            shaders,
            registry,
            draws,
            clear,
            state: LoopState::Running,
            viewport: Viewport::default(),
            frames_presented: 0,
        };
        driver.resize(width, height);
        Ok(driver)
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_closing(&self) -> bool {
        self.state == LoopState::Closing
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Draw calls issued every frame, in paint order.
    #[inline]
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draws
    }

    #[inline]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    #[inline]
    pub fn shaders(&self) -> &ShaderCache {
        &self.shaders
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Window close request from the platform layer.
    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::info!("close requested");
            self.state = LoopState::Closing;
        }
    }

    /// Framebuffer resize callback: the viewport follows the framebuffer.
    ///
    /// A zero-area size is recorded, but frames are skipped until the
    /// framebuffer is non-empty again.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::from_size(width, height);
        if viewport == self.viewport {
            return;
        }

        log::debug!("viewport -> {width}x{height}");
        self.backend.resize_framebuffer(width, height);
        if !viewport.is_empty() {
            self.backend.set_viewport(viewport);
        }
        self.viewport = viewport;
    }

    /// Runs one iteration of the render loop.
    ///
    /// 1. input is processed; Escape moves the loop to `Closing`
    /// 2. the framebuffer is cleared
    /// 3. every shape is drawn in registration order
    /// 4. the frame is presented
    ///
    /// Returns the state after the iteration. Nothing is drawn once closing.
    pub fn frame(&mut self, input: &InputState, input_frame: &InputFrame) -> Result<LoopState> {
        self.process_input(input, input_frame);

        if self.state == LoopState::Closing || self.viewport.is_empty() {
            return Ok(self.state);
        }

        match self.backend.render(self.clear, &self.draws)? {
            FrameOutcome::Presented => self.frames_presented += 1,
            FrameOutcome::Skipped => log::trace!("frame skipped"),
        }

        Ok(self.state)
    }

    /// Releases every GPU object created for the scene.
    ///
    /// Idempotent. Leaves the driver in `Closing`.
    pub fn shutdown(&mut self) {
        if !self.registry.is_uploaded() && self.shaders.is_empty() {
            return;
        }

        self.state = LoopState::Closing;
        self.draws.clear();
        self.registry.forget_gpu_handles();
        self.shaders.clear();
        self.backend.release_all();

        log::info!("released GPU resources after {} frames", self.frames_presented);
    }

    fn process_input(&mut self, input: &InputState, input_frame: &InputFrame) {
        if self.state != LoopState::Running {
            return;
        }
        if input.key_down(Key::Escape) || input_frame.pressed(Key::Escape) {
            log::info!("escape pressed; closing");
            self.state = LoopState::Closing;
        }
    }
}

impl<B: RenderBackend> Drop for FrameDriver<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::input::{InputEvent, KeyState};
    use crate::render::recording::RecordingBackend;
    use crate::scene::FACADE_SIZE;
    use crate::shader::ShaderError;

    fn driver() -> FrameDriver<RecordingBackend> {
        let (w, h) = FACADE_SIZE;
        FrameDriver::new(RecordingBackend::default(), SceneConfig::default(), w, h).unwrap()
    }

    fn press(state: &mut InputState, frame: &mut InputFrame, key: Key) {
        state.apply_event(
            frame,
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
            },
        );
    }

    fn idle() -> (InputState, InputFrame) {
        (InputState::default(), InputFrame::default())
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn initial_viewport_matches_window() {
        let d = driver();
        assert_eq!(d.viewport(), Viewport::new(0, 0, 1920, 1080));
        assert_eq!(d.backend().viewport, Viewport::new(0, 0, 1920, 1080));
        assert_eq!(d.state(), LoopState::Running);
    }

    #[test]
    fn every_shape_gets_a_draw_call() {
        let d = driver();
        assert_eq!(d.draw_calls().len(), FACADE.len());
        assert!(d.registry().is_uploaded());
    }

    #[test]
    fn malformed_shader_aborts_before_any_frame() {
        let config = SceneConfig {
            shaders: ShaderSources {
                fragment_template: Cow::Borrowed("@fragment fn fs_main() -> {{COLOR}}"),
                ..ShaderSources::default()
            },
            ..SceneConfig::default()
        };

        let err = FrameDriver::new(RecordingBackend::default(), config, 1920, 1080)
            .err()
            .expect("construction must fail");

        let shader_err = err.downcast_ref::<ShaderError>().expect("shader error");
        assert!(shader_err.to_string().contains("fragment shader compilation failed"));
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frame_clears_then_draws_in_order() {
        let mut d = driver();
        let (input, frame) = idle();

        assert_eq!(d.frame(&input, &frame).unwrap(), LoopState::Running);

        let recorded = &d.backend().frames;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].clear, CLEAR_COLOR);
        assert_eq!(recorded[0].draws, d.draw_calls());
        assert_eq!(d.frames_presented(), 1);
    }

    #[test]
    fn draw_order_is_identical_across_frames_and_runs() {
        let mut a = driver();
        let mut b = driver();
        let (input, frame) = idle();

        for _ in 0..3 {
            a.frame(&input, &frame).unwrap();
            b.frame(&input, &frame).unwrap();
        }

        let first = &a.backend().frames[0].draws;
        for f in a.backend().frames.iter().chain(&b.backend().frames) {
            assert_eq!(&f.draws, first);
        }
    }

    #[test]
    fn every_draw_binds_its_own_program() {
        let d = driver();
        for (call, def) in d.draw_calls().iter().zip(&FACADE) {
            assert_eq!(Some(call.program), d.shaders().get(def.key), "{}", def.name);
        }
    }

    // ── state machine ─────────────────────────────────────────────────────

    #[test]
    fn escape_transitions_to_closing_without_drawing() {
        let mut d = driver();
        let (mut input, mut frame) = idle();

        d.frame(&input, &frame).unwrap();
        press(&mut input, &mut frame, Key::Escape);

        assert_eq!(d.frame(&input, &frame).unwrap(), LoopState::Closing);
        assert_eq!(d.backend().frames.len(), 1);
    }

    #[test]
    fn other_keys_do_not_close() {
        let mut d = driver();
        let (mut input, mut frame) = idle();
        press(&mut input, &mut frame, Key::Unknown(62));

        assert_eq!(d.frame(&input, &frame).unwrap(), LoopState::Running);
    }

    #[test]
    fn close_request_is_terminal() {
        let mut d = driver();
        let (input, frame) = idle();

        d.request_close();
        assert!(d.is_closing());
        assert_eq!(d.frame(&input, &frame).unwrap(), LoopState::Closing);
        assert!(d.backend().frames.is_empty());
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_updates_viewport_only() {
        let mut d = driver();
        let before: Vec<_> = d.backend().geometries.iter().map(|g| g.vertices.clone()).collect();

        d.resize(800, 600);

        assert_eq!(d.viewport(), Viewport::new(0, 0, 800, 600));
        assert_eq!(d.backend().viewport, Viewport::new(0, 0, 800, 600));
        assert_eq!(d.backend().framebuffer, (800, 600));

        let after: Vec<_> = d.backend().geometries.iter().map(|g| g.vertices.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn zero_size_skips_frames_until_restored() {
        let mut d = driver();
        let (input, frame) = idle();

        d.resize(0, 0);
        d.frame(&input, &frame).unwrap();
        assert!(d.backend().frames.is_empty());

        d.resize(640, 480);
        d.frame(&input, &frame).unwrap();
        assert_eq!(d.backend().frames[0].viewport, Viewport::new(0, 0, 640, 480));
    }

    #[test]
    fn zero_size_at_startup_is_not_an_error() {
        let mut d =
            FrameDriver::new(RecordingBackend::default(), SceneConfig::default(), 0, 0).unwrap();
        let (input, frame) = idle();

        assert!(d.viewport().is_empty());
        assert_eq!(d.frame(&input, &frame).unwrap(), LoopState::Running);
        assert!(d.backend().frames.is_empty());

        d.resize(1920, 1080);
        d.frame(&input, &frame).unwrap();
        assert_eq!(d.backend().frames.len(), 1);
        assert_eq!(d.backend().frames[0].viewport, Viewport::new(0, 0, 1920, 1080));
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn one_frame_then_escape_then_shutdown() {
        let mut d = driver();
        let (mut input, mut frame) = idle();

        assert_eq!(d.frame(&input, &frame).unwrap(), LoopState::Running);
        frame.clear();

        press(&mut input, &mut frame, Key::Escape);
        assert_eq!(d.frame(&input, &frame).unwrap(), LoopState::Closing);

        d.shutdown();
        assert!(d.backend().released);
        assert_eq!(d.backend().live_objects(), 0);
        assert!(d.draw_calls().is_empty());
        assert!(d.shaders().is_empty());

        // A second shutdown is a no-op.
        d.shutdown();
        assert_eq!(d.frames_presented(), 1);
    }
}
