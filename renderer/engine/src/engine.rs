use std::time::{Duration, Instant};

use common::*;
use gameloop::{FrameAction, GameLoop, GameLoopError};
use simulation::input::InputCommand;
use simulation::{self, DrawOptions, Exit, Perf, Simulation, SimulationBackend};

/// Max ticks to run in a single frame before rendering anyway
const MAX_FRAMESKIP: u32 = 5;

pub struct Engine<'b, B: SimulationBackend> {
    backend: &'b mut B,
    simulation: Simulation<B::Renderer>,
    perf: Perf,
    /// Commands from backend -> game, accumulated over render frames and passed to sim on each tick
    sim_input_commands: Vec<InputCommand>,
}

impl<'b, B: SimulationBackend> Engine<'b, B> {
    pub fn new(simulation: Simulation<B::Renderer>, backend: &'b mut B) -> Self {
        Self {
            backend,
            simulation,
            perf: Default::default(),
            sim_input_commands: Vec::with_capacity(32),
        }
    }

    /// Game loop
    pub fn run(mut self) -> Result<Exit, GameLoopError> {
        // initial sleep
        let delay = config::get().simulation.start_delay;
        if delay > 0 {
            info!("sleeping for {}ms before starting", delay);
            std::thread::sleep(Duration::from_millis(delay as u64));
        }

        let game_loop = GameLoop::new(simulation::TICKS_PER_SECOND, MAX_FRAMESKIP)?;
        info!("starting game loop"; "backend" => B::name(), "tps" => simulation::TICKS_PER_SECOND);

        let exit = loop {
            if let Some(exit) = self.backend.consume_events(&mut self.sim_input_commands) {
                break exit;
            }

            let mut ticks = 0;
            for action in game_loop.actions() {
                match action {
                    FrameAction::Tick => {
                        self.tick();
                        ticks += 1;
                    }
                    FrameAction::Render { interpolation } => self.render(interpolation, ticks),
                }
            }

            if B::SLEEP_WHEN_IDLE && ticks == 0 {
                std::thread::sleep(game_loop.until_next_tick());
            }
        };

        info!("exiting game loop"; "exit" => ?exit, "ticks" => simulation::current_tick());
        Ok(exit)
    }

    fn tick(&mut self) {
        trace!("tick"; "tick" => simulation::current_tick());
        let start = Instant::now();

        self.simulation.tick(&self.sim_input_commands);
        self.sim_input_commands.clear();

        self.backend.tick(&self.simulation);
        self.perf.record_tick(start.elapsed());
    }

    /// `ticks` is the number of ticks run this frame
    fn render(&mut self, interpolation: f64, ticks: u32) {
        let perf = self.perf.summary();

        trace!("render"; "interpolation" => interpolation, "ticks" => ticks);
        let start = Instant::now();

        // pick up config reloads
        let options = DrawOptions::from(&config::get().display);
        self.simulation.set_draw_options(options);

        self.backend
            .render(&mut self.simulation, interpolation, &perf);
        self.perf.record_frame(start.elapsed(), ticks);
    }
}
