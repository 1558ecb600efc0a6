use config::Config;

use crate::input::InputCommand;
use crate::{PerfSummary, Renderer, Simulation};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Exit {
    Stop,
    Restart,
}

pub trait SimulationBackend: Sized {
    type Renderer: Renderer;
    type Error: std::error::Error + 'static;

    /// Sleep until the next tick when a frame runs no ticks, for backends without vsync
    const SLEEP_WHEN_IDLE: bool = false;

    fn new(config: &Config) -> Result<Self, Self::Error>;

    fn name() -> &'static str;

    /// Pushes drive input for the next tick, returns `Some` to leave the game loop
    fn consume_events(&mut self, commands: &mut Vec<InputCommand>) -> Option<Exit>;

    fn tick(&mut self, simulation: &Simulation<Self::Renderer>);

    fn render(
        &mut self,
        simulation: &mut Simulation<Self::Renderer>,
        interpolation: f64,
        perf: &PerfSummary,
    );

    /// Called before the backend is reused for a restarted simulation
    fn reset(&mut self) {}
}
