//! Fixed timestep game loop: each frame yields up to `max_frameskip` ticks to catch up with
//! real time, followed by a single render with the interpolation between the last two ticks.

use std::cell::Cell;
use std::time::{Duration, Instant};

use common::*;

pub struct GameLoop<C: Clock = InstantClock> {
    clock: C,

    /// Microseconds
    skip_ticks: u64,
    max_frameskip: u32,

    /// Microseconds
    next_game_tick: Cell<u64>,
}

#[derive(Debug, Error)]
pub enum GameLoopError {
    #[error("Ticks per second must be in 1..=1000, not {0}")]
    BadTicksPerSecond(usize),

    #[error("Max frameskip must be at least 1")]
    ZeroFrameskip,
}

/// Source of elapsed time since the loop started
pub trait Clock {
    fn elapsed_micros(&self) -> u64;
}

pub struct InstantClock(Instant);

pub struct FrameActions<'a, C: Clock> {
    game_loop: &'a GameLoop<C>,

    loops: u32,
    rendered: bool,
}

#[derive(Debug, PartialEq)]
pub enum FrameAction {
    Tick,
    Render { interpolation: f64 },
}

impl GameLoop<InstantClock> {
    pub fn new(tps: usize, max_frameskip: u32) -> Result<Self, GameLoopError> {
        Self::with_clock(tps, max_frameskip, InstantClock(Instant::now()))
    }
}

impl<C: Clock> GameLoop<C> {
    pub fn with_clock(tps: usize, max_frameskip: u32, clock: C) -> Result<Self, GameLoopError> {
        if !(1..=1000).contains(&tps) {
            return Err(GameLoopError::BadTicksPerSecond(tps));
        }

        if max_frameskip == 0 {
            return Err(GameLoopError::ZeroFrameskip);
        }

        let skip_ticks = 1_000_000 / tps as u64;
        info!(
            "initialized game loop";
            "tps" => tps, "us_per_tick" => skip_ticks, "max_frameskip" => max_frameskip
        );

        Ok(Self {
            clock,
            skip_ticks,
            max_frameskip,
            next_game_tick: Cell::new(0),
        })
    }

    /// Time left before the next tick is due, zero if already behind
    pub fn until_next_tick(&self) -> Duration {
        let now = self.clock.elapsed_micros();
        Duration::from_micros(self.next_game_tick.get().saturating_sub(now))
    }

    /// Actions to perform this frame
    pub fn actions(&self) -> FrameActions<C> {
        FrameActions {
            game_loop: self,
            loops: 0,
            rendered: false,
        }
    }
}

impl<'a, C: Clock> Iterator for FrameActions<'a, C> {
    type Item = FrameAction;

    fn next(&mut self) -> Option<Self::Item> {
        let game_loop = self.game_loop;
        let next_tick = &game_loop.next_game_tick;

        if game_loop.clock.elapsed_micros() > next_tick.get() && self.loops < game_loop.max_frameskip
        {
            next_tick.set(next_tick.get() + game_loop.skip_ticks);
            self.loops += 1;
            return Some(FrameAction::Tick);
        }

        if !self.rendered {
            self.rendered = true;

            let render_time = game_loop.clock.elapsed_micros();
            let skip_ticks = game_loop.skip_ticks;
            let interpolation = ((render_time + skip_ticks).saturating_sub(next_tick.get()) as f64)
                / (skip_ticks as f64);

            return Some(FrameAction::Render { interpolation });
        }

        None
    }
}

impl Clock for InstantClock {
    fn elapsed_micros(&self) -> u64 {
        self.0.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ManualClock(Rc<Cell<u64>>);

    impl Clock for ManualClock {
        fn elapsed_micros(&self) -> u64 {
            self.0.get()
        }
    }

    impl ManualClock {
        fn advance_ms(&self, ms: u64) {
            self.0.set(self.0.get() + ms * 1000);
        }
    }

    fn count(actions: &[FrameAction]) -> (usize, usize) {
        let ticks = actions.iter().filter(|a| **a == FrameAction::Tick).count();
        (ticks, actions.len() - ticks)
    }

    #[test]
    fn bad_params() {
        assert!(matches!(
            GameLoop::new(0, 5),
            Err(GameLoopError::BadTicksPerSecond(0))
        ));
        assert!(matches!(GameLoop::new(20, 0), Err(GameLoopError::ZeroFrameskip)));
    }

    #[test]
    fn ticks_then_single_render() {
        let clock = ManualClock::default();
        let gl = GameLoop::with_clock(20, 5, clock.clone()).unwrap();

        // 50ms per tick, 120ms elapsed
        clock.advance_ms(120);
        let actions = gl.actions().collect_vec();
        assert_eq!(count(&actions), (3, 1));
        assert!(matches!(actions.last(), Some(FrameAction::Render { .. })));

        // no time passed, render only
        let actions = gl.actions().collect_vec();
        assert_eq!(count(&actions), (0, 1));
    }

    #[test]
    fn time_until_next_tick() {
        let clock = ManualClock::default();
        let gl = GameLoop::with_clock(20, 5, clock.clone()).unwrap();

        clock.advance_ms(120);
        gl.actions().for_each(drop);

        // ticked at 0, 50 and 100
        assert_eq!(gl.until_next_tick(), Duration::from_millis(30));

        clock.advance_ms(40);
        assert_eq!(gl.until_next_tick(), Duration::ZERO);
    }

    #[test]
    fn frameskip_limit() {
        let clock = ManualClock::default();
        let gl = GameLoop::with_clock(20, 5, clock.clone()).unwrap();

        // way behind
        clock.advance_ms(2000);
        assert_eq!(count(&gl.actions().collect_vec()), (5, 1));
        assert_eq!(count(&gl.actions().collect_vec()), (5, 1));
    }

    #[test]
    fn interpolation_in_range() {
        let clock = ManualClock::default();
        let gl = GameLoop::with_clock(10, 5, clock.clone()).unwrap();

        clock.advance_ms(150);
        let interpolation = gl
            .actions()
            .find_map(|a| match a {
                FrameAction::Render { interpolation } => Some(interpolation),
                _ => None,
            })
            .unwrap();

        // ticks at 0 and 100, render at 150
        assert!(interpolation.approx_eq(0.5, (1e-9, 2)));
    }
}
