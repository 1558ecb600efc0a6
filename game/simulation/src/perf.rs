//! Rolling frame timings, shown in the window title and headless reports

use std::time::Duration;

use arraydeque::{Array, ArrayDeque, Wrapping};

/// The most recent samples, the oldest is dropped once full
pub struct Window<A: Array<Item = f32>> {
    samples: ArrayDeque<A, Wrapping>,
}

/// Samples kept per measurement, a second of ticks
type Samples = Window<[f32; 60]>;

#[derive(Default)]
pub struct Perf {
    tick_ms: Samples,
    render_ms: Samples,
    /// Ticks run before each render, above 1 while catching up
    frame_ticks: Samples,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PerfSummary {
    pub tick_ms: f32,
    pub render_ms: f32,
    pub render_max_ms: f32,
    pub ticks_per_frame: f32,
}

impl<A: Array<Item = f32>> Default for Window<A> {
    fn default() -> Self {
        Self {
            samples: ArrayDeque::new(),
        }
    }
}

impl<A: Array<Item = f32>> Window<A> {
    pub fn push(&mut self, sample: f32) {
        self.samples.push_back(sample);
    }

    /// 0 while empty
    pub fn mean(&self) -> f32 {
        match self.samples.len() {
            0 => 0.0,
            n => self.samples.iter().sum::<f32>() / n as f32,
        }
    }

    /// 0 while empty
    pub fn max(&self) -> f32 {
        self.samples.iter().copied().fold(0.0, f32::max)
    }
}

fn millis(duration: Duration) -> f32 {
    duration.as_secs_f32() * 1000.0
}

impl Perf {
    pub fn record_tick(&mut self, took: Duration) {
        self.tick_ms.push(millis(took));
    }

    /// `ticks` is the number of ticks run since the last frame
    pub fn record_frame(&mut self, render_took: Duration, ticks: u32) {
        self.render_ms.push(millis(render_took));
        self.frame_ticks.push(ticks as f32);
    }

    pub fn summary(&self) -> PerfSummary {
        PerfSummary {
            tick_ms: self.tick_ms.mean(),
            render_ms: self.render_ms.mean(),
            render_max_ms: self.render_ms.max(),
            ticks_per_frame: self.frame_ticks.mean(),
        }
    }
}
