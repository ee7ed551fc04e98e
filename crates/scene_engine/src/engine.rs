//! Core engine implementation

use crate::{
    application::{AppError, AppEvent, Application},
    config::ConfigError,
    core::config::EngineConfig,
    foundation::time::{Stopwatch, Timer},
    input::InputManager,
    platform::{Platform, PlatformError},
    scene::{SceneError, SceneManager},
    ui::UIManager,
};
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the scene manager and input state and runs the main loop.
pub struct Engine {
    /// Registered scenes
    pub scenes: SceneManager,

    /// Input handling system
    pub input: InputManager,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Last reported window size
    window_size: (u32, u32),

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        Ok(Self {
            scenes: SceneManager::with_ui(UIManager::new()),
            input: InputManager::new(),
            timer: Timer::new(config.frame.max_delta_time),
            config,
            window_size: (1280, 720),
            running: true,
        })
    }

    /// Run the engine main loop with the given platform and application.
    ///
    /// The loop ends when the platform requests a close, the application calls
    /// [`Engine::quit`], the configured exit key is held, or anything fails. A
    /// failure is logged and returned; there is no retry. The application's
    /// `cleanup` runs in every case once initialization was attempted.
    pub fn run<P: Platform, A: Application>(
        config: EngineConfig,
        platform: &mut P,
        app: &mut A,
    ) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;
        let stopwatch = Stopwatch::start_new();

        let result = engine.main_loop(platform, app);
        if let Err(err) = &result {
            log::error!("Main loop stopped: {}", err);
        }

        app.cleanup(&mut engine);
        log::info!(
            "Engine shutdown complete after {} frames ({:.2?}, {:.1} fps average)",
            engine.timer.frame_count(),
            stopwatch.elapsed(),
            engine.timer.average_fps()
        );
        result
    }

    fn main_loop<P: Platform, A: Application>(
        &mut self,
        platform: &mut P,
        app: &mut A,
    ) -> Result<(), EngineError> {
        app.initialize(self)
            .map_err(|source| EngineError::Application { stage: "initialize", source })?;

        log::info!("Starting main loop...");
        let mut events = Vec::new();

        while self.running {
            let delta_time = self.timer.tick(platform.begin_frame()?);

            self.input.update();
            platform.poll_events(&mut events);
            for event in events.drain(..) {
                app.handle_event(self, event)
                    .map_err(|source| EngineError::Application { stage: "handle_event", source })?;
            }

            if let Some(key) = self.config.frame.exit_key {
                if self.input.is_key_down(key) {
                    log::info!("Exit key {:?} pressed", key);
                    self.quit();
                }
            }
            if !self.running {
                break;
            }

            app.update(self, delta_time)
                .map_err(|source| EngineError::Application { stage: "update", source })?;
            self.scenes.update(&self.input, delta_time)?;

            platform.end_frame()?;
        }

        Ok(())
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => {
                log::info!("Window close requested");
                self.running = false;
            }
            AppEvent::WindowResized { width, height } => {
                self.window_size = (width, height);
            }
            AppEvent::WindowUnfocused => {
                self.input.release_all();
            }
            AppEvent::WindowFocused => {}
            AppEvent::KeyInput { key, pressed } => {
                self.input.handle_key_input(key, pressed);
            }
            AppEvent::MouseButton { button, pressed } => {
                self.input.handle_mouse_button(button, pressed);
            }
            AppEvent::MouseMoved { x, y } => {
                self.input.handle_mouse_move(x, y);
            }
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop will run another frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Window width over height, for camera projections
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.window_size;
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Platform frame error
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Scene update error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Application hook error
    #[error("Application error during {stage}: {source}")]
    Application {
        /// Hook that failed
        stage: &'static str,
        /// Underlying error
        source: AppError,
    },
}
