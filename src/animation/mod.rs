//! Drives the numbers from where they are to a new set of random targets.
//!
//! Each trigger starts a pass. A pass owns a generation number and every frame it requests is
//! tagged with it, so a frame left over from an older pass can never move the numbers once a
//! newer pass has started.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use crate::grid::{Cells, Grid};

pub mod easing;
pub mod scheduler;

use easing::{ease_out_cubic, interpolate, progress};
use scheduler::{FrameHandle, FrameScheduler};

/// Default length of a pass.
pub const PASS_DURATION: Duration = Duration::from_millis(900);

/// One run from the trigger to the targets.
#[derive(Debug, Clone)]
struct Pass {
    generation: u64,
    start: Cells<i32>,
    targets: Cells<i32>,
    started: Instant,
}

pub struct Driver<R: Rng> {
    grid: Grid,
    rng: R,
    duration: Duration,

    generation: u64,
    pass: Option<Pass>,
    animating: bool,
    frames: FrameScheduler,
}

impl<R: Rng> Driver<R> {
    /// New driver with a random starting grid.
    pub fn new(mut rng: R, duration: Duration) -> Self {
        let grid = Grid::random(&mut rng);
        Self::with_grid(grid, rng, duration)
    }

    pub fn with_grid(grid: Grid, rng: R, duration: Duration) -> Self {
        Self {
            grid,
            rng,
            duration,
            generation: 0,
            pass: None,
            animating: false,
            frames: FrameScheduler::new(),
        }
    }

    /// Starts a new pass from whatever is currently shown.
    /// Any pass already running is superseded and its pending frame replaced.
    pub fn trigger(&mut self, now: Instant) -> FrameHandle {
        let targets = Grid::targets(&mut self.rng);
        self.generation += 1;

        debug!(generation = self.generation, ?targets, "Starting pass");
        self.pass = Some(Pass {
            generation: self.generation,
            start: *self.grid.values(),
            targets,
            started: now,
        });

        self.grid.set_active(true);
        self.animating = true;
        self.frames.request(self.generation)
    }

    /// Runs one frame of the pass `handle` belongs to.
    /// Returns true if the grid changed.
    pub fn frame(&mut self, handle: FrameHandle, now: Instant) -> bool {
        self.frames.cancel(handle);

        let pass = match &self.pass {
            Some(pass) if pass.generation == handle.generation() => pass,
            _ => return false,
        };

        let elapsed = now.saturating_duration_since(pass.started);
        let progress = progress(elapsed, self.duration);
        let eased = ease_out_cubic(progress);

        let values = std::array::from_fn(|i| interpolate(pass.start[i], pass.targets[i], eased));
        let changed = values != *self.grid.values();
        self.grid.set_values(values);

        if progress < 1.0 {
            self.frames.request(handle.generation());
            return changed;
        }

        // Active flags are left set, the next trigger sets them again anyway
        debug!(generation = handle.generation(), "Pass finished");
        self.pass = None;
        self.animating = false;
        true
    }

    /// Runs the pending frame, if there is one.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.frames.take() {
            Some(handle) => self.frame(handle, now),
            None => false,
        }
    }

    /// Stops everything. Called on teardown.
    pub fn cancel(&mut self) {
        self.frames.cancel_all();
        self.pass = None;
        self.animating = false;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Targets of the pass in flight.
    #[cfg(test)]
    pub fn targets(&self) -> Option<&Cells<i32>> {
        self.pass.as_ref().map(|x| &x.targets)
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }
}
