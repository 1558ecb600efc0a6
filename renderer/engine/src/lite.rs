//! Windowless backend that replays the scripted key presses from config

use std::convert::Infallible;
use std::time::{Duration, Instant};

use color::ColorRgb;
use common::input::DriveKey;
use common::*;
use config::{Config, ScriptedKey};
use simulation::input::InputCommand;
use simulation::{Exit, PerfSummary, Renderer, Simulation, SimulationBackend, TICK_DURATION};

pub struct DummyRenderer;

pub struct HeadlessBackend {
    renderer: DummyRenderer,
    /// Sorted by time, drained from the front
    script: Vec<ScriptedKey>,
    next_key: usize,
    run_for: Option<Duration>,
    started: Instant,
    ticks: u32,
    report_every: u32,
    /// Most recent timings handed to `render`
    perf: PerfSummary,
    frames: u32,
}

impl Renderer for DummyRenderer {
    type Target = ();
    type Error = Infallible;

    fn init(&mut self, _target: Self::Target) {}

    fn clear(&mut self, _color: ColorRgb) {}

    fn line(&mut self, _from: Vector2, _to: Vector2, _color: ColorRgb, _width: F) {}

    fn filled_circle(&mut self, _centre: Vector2, _radius: F, _color: ColorRgb) {}

    fn filled_triangle(&mut self, _points: [Vector2; 3], _color: ColorRgb) {}

    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn deinit(&mut self) -> Self::Target {}
}

impl HeadlessBackend {
    /// Frames rendered since start or the last reset
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Simulated time since start
    fn elapsed(&self) -> Duration {
        TICK_DURATION * self.ticks
    }

    fn due_keys(&mut self) -> impl Iterator<Item = &ScriptedKey> + '_ {
        let now = self.elapsed().as_millis() as u64;
        let start = self.next_key;
        let due = self.script[start..]
            .iter()
            .take_while(|key| key.at_ms <= now)
            .count();

        self.next_key += due;
        self.script[start..start + due].iter()
    }
}

impl SimulationBackend for HeadlessBackend {
    type Renderer = DummyRenderer;
    type Error = Infallible;

    const SLEEP_WHEN_IDLE: bool = true;

    fn new(config: &Config) -> Result<Self, Self::Error> {
        let headless = &config.headless;
        let mut script = headless.script.clone();
        script.sort_by_key(|key| key.at_ms);

        let run_for = match headless.run_for_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        info!("running headless"; "run_for" => ?run_for, "scripted_keys" => script.len());

        Ok(Self {
            renderer: DummyRenderer,
            script,
            next_key: 0,
            run_for,
            started: Instant::now(),
            ticks: 0,
            report_every: headless.report_every_ticks,
            perf: PerfSummary::default(),
            frames: 0,
        })
    }

    fn name() -> &'static str {
        "Headless"
    }

    fn consume_events(&mut self, commands: &mut Vec<InputCommand>) -> Option<Exit> {
        if let Some(run_for) = self.run_for {
            if self.started.elapsed() >= run_for {
                info!("headless run finished"; "ticks" => self.ticks, "frames" => self.frames);
                return Some(Exit::Stop);
            }
        }

        for scripted in self.due_keys() {
            let key: DriveKey = scripted.key;
            debug!("scripted key"; "key" => ?key, "down" => scripted.down, "at_ms" => scripted.at_ms);
            commands.push(InputCommand::Key {
                key,
                down: scripted.down,
            });
        }

        None
    }

    fn tick(&mut self, simulation: &Simulation<Self::Renderer>) {
        self.ticks += 1;

        if self.report_every != 0 && self.ticks % self.report_every == 0 {
            let car = simulation.car();
            let centroid = car.centroid();
            let heading = car.heading();
            let input = simulation.input();
            info!("car";
                "tick" => simulation::current_tick(),
                "x" => centroid.x,
                "y" => centroid.y,
                "heading" => ?(heading.x, heading.y),
                "throttle" => input.throttle,
                "steering" => input.steering,
                "tick_ms" => self.perf.tick_ms,
            );
        }
    }

    fn render(
        &mut self,
        simulation: &mut Simulation<Self::Renderer>,
        interpolation: f64,
        perf: &PerfSummary,
    ) {
        self.perf = *perf;
        self.frames += 1;
        simulation.render((), &mut self.renderer, interpolation);
    }

    fn reset(&mut self) {
        self.next_key = 0;
        self.ticks = 0;
        self.frames = 0;
        self.started = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(script: Vec<ScriptedKey>) -> Config {
        let mut config = Config::default();
        config.headless.script = script;
        config.headless.run_for_ms = 0;
        config
    }

    fn key(at_ms: u64, key: DriveKey, down: bool) -> ScriptedKey {
        ScriptedKey { at_ms, key, down }
    }

    #[test]
    fn script_replays_by_tick() {
        common::logging::for_tests();
        let config = config(vec![
            key(100, DriveKey::Right, true),
            key(0, DriveKey::Up, true),
        ]);
        let mut backend = HeadlessBackend::new(&config).unwrap();
        let mut sim = Simulation::<DummyRenderer>::new(&config).unwrap();

        let mut commands = Vec::new();
        assert!(backend.consume_events(&mut commands).is_none());
        assert_eq!(
            commands,
            vec![InputCommand::Key {
                key: DriveKey::Up,
                down: true
            }]
        );

        // 6 ticks is just under 100ms
        for _ in 0..6 {
            backend.tick(&sim);
        }
        commands.clear();
        backend.consume_events(&mut commands);
        assert!(commands.is_empty());

        backend.tick(&sim);
        backend.consume_events(&mut commands);
        assert_eq!(commands.len(), 1);

        // nothing is replayed twice
        commands.clear();
        backend.tick(&sim);
        backend.consume_events(&mut commands);
        assert!(commands.is_empty());

        sim.tick(&commands);
        backend.render(&mut sim, 0.0, &PerfSummary::default());
    }

    #[test]
    fn reset_restarts_script() {
        let config = config(vec![key(0, DriveKey::Down, true)]);
        let mut backend = HeadlessBackend::new(&config).unwrap();

        let mut commands = Vec::new();
        backend.consume_events(&mut commands);
        backend.reset();
        backend.consume_events(&mut commands);
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn stops_after_run_time() {
        let mut config = config(vec![]);
        config.headless.run_for_ms = 1;
        let mut backend = HeadlessBackend::new(&config).unwrap();

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(backend.consume_events(&mut Vec::new()), Some(Exit::Stop));
    }
}
