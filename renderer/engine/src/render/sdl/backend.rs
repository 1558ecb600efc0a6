use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::render::WindowCanvas;
use sdl2::video::WindowBuildError;
use sdl2::{EventPump, Sdl, VideoSubsystem};

use common::input::{DriveKey, GameKey, KeyAction};
use common::*;
use config::Config;
use simulation::input::InputCommand;
use simulation::{Exit, PerfSummary, Simulation, SimulationBackend};

use crate::render::sdl::canvas::CanvasRenderer;
use crate::render::sdl::text::TextRenderer;

/// Frames between window title perf updates
const TITLE_UPDATE_FRAMES: u32 = 30;

const WINDOW_TITLE: &str = "stickcar";

pub struct SdlBackend {
    sdl_events: EventPump,
    #[allow(dead_code)]
    keep_alive: GraphicsKeepAlive,

    /// Lent to the renderer for each frame
    canvas: Option<WindowCanvas>,
    renderer: CanvasRenderer,
    frames: u32,
}

/// Unused fields but need to be kept alive
#[allow(dead_code)]
struct GraphicsKeepAlive {
    sdl: Sdl,
    video: VideoSubsystem,
}

#[derive(Debug, Error)]
pub enum SdlBackendError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Failed to create window: {0}")]
    WindowCreation(#[from] WindowBuildError),
}

impl SimulationBackend for SdlBackend {
    type Renderer = CanvasRenderer;
    type Error = SdlBackendError;

    fn new(config: &Config) -> Result<Self, Self::Error> {
        let sdl = sdl2::init().map_err(SdlBackendError::Sdl)?;
        let video = sdl.video().map_err(SdlBackendError::Sdl)?;

        let display = &config.display;
        let (w, h) = display.resolution;
        info!("window size {width}x{height}", width = w, height = h);

        let window = video
            .window(WINDOW_TITLE, w, h)
            .position_centered()
            .build()?;

        let canvas = {
            let mut builder = window.into_canvas().accelerated();
            if display.vsync {
                builder = builder.present_vsync();
            }
            builder
                .build()
                .map_err(|e| SdlBackendError::Sdl(e.to_string()))?
        };

        let text = match &display.font {
            None => {
                warn!("no font configured, stick labels will not be drawn");
                None
            }
            Some(path) => match TextRenderer::load(path, display.font_size) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("failed to load font, stick labels will not be drawn";
                        "path" => %path.display(), "error" => %e);
                    None
                }
            },
        };

        let events = sdl.event_pump().map_err(SdlBackendError::Sdl)?;

        Ok(Self {
            sdl_events: events,
            keep_alive: GraphicsKeepAlive { sdl, video },
            canvas: Some(canvas),
            renderer: CanvasRenderer::new(text),
            frames: 0,
        })
    }

    fn name() -> &'static str {
        "SDL2"
    }

    fn consume_events(&mut self, commands: &mut Vec<InputCommand>) -> Option<Exit> {
        for event in self.sdl_events.poll_iter() {
            match event {
                Event::Quit { .. } => return Some(Exit::Stop),

                // held keys repeat at the os rate, the controller has its own timers
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match map_sdl_keycode(key) {
                    Some(KeyAction::Game(GameKey::Exit)) => return Some(Exit::Stop),
                    Some(KeyAction::Game(GameKey::Restart)) => return Some(Exit::Restart),
                    Some(KeyAction::Drive(key)) => commands.push(InputCommand::Key { key, down: true }),
                    None => debug!("ignoring unknown key"; "key" => %key),
                },

                Event::KeyUp {
                    keycode: Some(key),
                    ..
                } => {
                    if let Some(KeyAction::Drive(key)) = map_sdl_keycode(key) {
                        commands.push(InputCommand::Key { key, down: false });
                    }
                }
                _ => {}
            }
        }

        None
    }

    fn tick(&mut self, _simulation: &Simulation<Self::Renderer>) {}

    fn render(
        &mut self,
        simulation: &mut Simulation<Self::Renderer>,
        interpolation: f64,
        perf: &PerfSummary,
    ) {
        let canvas = match self.canvas.take() {
            Some(canvas) => canvas,
            None => {
                debug_assert!(false, "canvas not returned by renderer");
                return;
            }
        };

        let mut canvas = simulation.render(canvas, &mut self.renderer, interpolation);

        self.frames = self.frames.wrapping_add(1);
        if self.frames % TITLE_UPDATE_FRAMES == 0 {
            let input = simulation.input();
            let title = format!(
                "{} | throttle {} steering {} | tick {:.2}ms render {:.2}ms (max {:.2}ms) | {:.1} ticks/frame",
                WINDOW_TITLE,
                input.throttle,
                input.steering,
                perf.tick_ms,
                perf.render_ms,
                perf.render_max_ms,
                perf.ticks_per_frame,
            );

            if let Err(e) = canvas.window_mut().set_title(&title) {
                warn!("failed to set window title"; "error" => %e);
            }
        }

        self.canvas = Some(canvas);
    }

    fn reset(&mut self) {
        self.frames = 0;
    }
}

fn map_sdl_keycode(keycode: Keycode) -> Option<KeyAction> {
    Some(match keycode {
        Keycode::Escape => KeyAction::Game(GameKey::Exit),
        Keycode::R => KeyAction::Game(GameKey::Restart),

        Keycode::Left => KeyAction::Drive(DriveKey::Left),
        Keycode::Right => KeyAction::Drive(DriveKey::Right),
        Keycode::Up => KeyAction::Drive(DriveKey::Up),
        Keycode::Down => KeyAction::Drive(DriveKey::Down),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping() {
        assert_eq!(
            map_sdl_keycode(Keycode::Left),
            Some(KeyAction::Drive(DriveKey::Left))
        );
        assert_eq!(
            map_sdl_keycode(Keycode::Escape),
            Some(KeyAction::Game(GameKey::Exit))
        );
        assert_eq!(map_sdl_keycode(Keycode::Space), None);
    }
}
