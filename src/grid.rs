//! The 4x4 grid of numbers.

use std::ops::Range;

use rand::Rng;

pub const GRID_SIZE: usize = 16;
pub const GRID_COLUMNS: usize = 4;

/// Values the grid starts out with.
pub const INITIAL_RANGE: Range<i32> = 0..20;
/// Values every trigger animates towards.
pub const TARGET_RANGE: Range<i32> = 10..100;

pub type Cells<T> = [T; GRID_SIZE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    values: Cells<i32>,
    active: Cells<bool>,
}

impl Grid {
    pub fn new(values: Cells<i32>) -> Self {
        Self {
            values,
            active: [false; GRID_SIZE],
        }
    }

    /// A grid of random values in [`INITIAL_RANGE`], nothing active.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(draw(rng, INITIAL_RANGE))
    }

    /// A fresh set of targets in [`TARGET_RANGE`].
    pub fn targets(rng: &mut impl Rng) -> Cells<i32> {
        draw(rng, TARGET_RANGE)
    }

    pub fn values(&self) -> &Cells<i32> {
        &self.values
    }

    #[cfg(test)]
    pub fn active(&self) -> &Cells<bool> {
        &self.active
    }

    /// Iterates over the rows of the grid, each row being `(value, active)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = Vec<(i32, bool)>> + '_ {
        self.values
            .chunks(GRID_COLUMNS)
            .zip(self.active.chunks(GRID_COLUMNS))
            .map(|(v, a)| v.iter().copied().zip(a.iter().copied()).collect())
    }

    pub(crate) fn set_values(&mut self, values: Cells<i32>) {
        self.values = values;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = [active; GRID_SIZE];
    }
}

fn draw(rng: &mut impl Rng, range: Range<i32>) -> Cells<i32> {
    std::array::from_fn(|_| rng.gen_range(range.clone()))
}
