/// Terminal host that renders the plaza scene as ASCII art
use anyhow::{bail, Context};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use plaza_core::transform::cursor_to_ndc;
use plaza_core::{Camera, ShapeLibrary, TessellationConfig, TransformStack, TurnState};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod logging;
pub mod renderer;
pub mod scene;

pub use logging::{init_logging, LoggingConfig};
pub use renderer::AsciiRenderer;
pub use scene::{draw_scene, Canvas};

/// Keyboard turn per key press, in radians.
const KEY_TURN: f32 = 0.1;

/// Where logs go unless `--log-file` says otherwise; stderr would draw over the frame.
pub const DEFAULT_LOG_FILE: &str = "plaza-terminal.log";

/// Settings for a [`TerminalApp`] run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub target_fps: u32,
    pub tessellation: TessellationConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            tessellation: TessellationConfig::default(),
            logging: LoggingConfig {
                log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
                ..LoggingConfig::default()
            },
        }
    }
}

impl AppConfig {
    /// Build a config from command-line arguments (program name excluded).
    ///
    /// Accepts `[--log-file PATH] [RESOLUTION]`; the resolution sets the
    /// tessellation grid to N x N.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let mut args = args.into_iter();
        let mut resolution_seen = false;

        while let Some(arg) = args.next() {
            if arg == "--log-file" {
                let path = args.next().context("--log-file needs a path")?;
                config.logging.log_file = Some(PathBuf::from(path));
                continue;
            }
            if resolution_seen {
                bail!("Unexpected argument '{}'", arg);
            }

            let resolution: usize = arg
                .parse()
                .with_context(|| format!("Invalid resolution '{}'", arg))?;
            if resolution < 2 {
                bail!("Resolution must be at least 2, got {}", resolution);
            }
            config.tessellation.columns = resolution;
            config.tessellation.rows = resolution;
            resolution_seen = true;
        }

        Ok(config)
    }
}

/// Terminal cells are roughly twice as tall as they are wide.
fn camera_for(width: u16, height: u16) -> Camera {
    Camera::new(width as u32, height as u32 * 2)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    library: ShapeLibrary,
    stack: TransformStack,
    turn: TurnState,
    camera: Camera,
    renderer: AsciiRenderer,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let library =
            ShapeLibrary::build(&config.tessellation).context("Failed to build shape meshes")?;
        let (width, height) = terminal::size()?;

        Ok(Self {
            library,
            stack: TransformStack::new(),
            turn: TurnState::new(),
            camera: camera_for(width, height),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            frame_time: Duration::from_millis(1000 / config.target_fps.max(1) as u64),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('a') | KeyCode::Left => self.turn.nudge(-KEY_TURN),
                KeyCode::Char('d') | KeyCode::Right => self.turn.nudge(KEY_TURN),
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let pressed = matches!(kind, MouseEventKind::Down(_) | MouseEventKind::Drag(_));
                self.turn.update(cursor_to_ndc(
                    column as f32,
                    row as f32,
                    self.renderer.width() as f32,
                    self.renderer.height() as f32,
                    pressed,
                ));
            }
            Event::Resize(width, height) => {
                log::debug!("Terminal resized to {}x{}", width, height);
                self.camera = camera_for(width, height);
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();
        self.renderer.set_camera(&self.camera);

        // Render scene
        draw_scene(&mut self.stack, &self.library, self.turn.angle, &mut self.renderer);
        self.stack.end_frame();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Plaza | FPS: {:.1} | Turn: {:.2} | Drag/A/D=Turn Q=Quit",
                self.fps, self.turn.angle
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
