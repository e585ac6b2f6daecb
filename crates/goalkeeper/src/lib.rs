//! Deterministic keeper AI for the penalty-shootout challenge. Owns
//! a private seedable RNG so dive predictions and save rolls are
//! reproducible under test; never reaches for a global thread-local
//! source.

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use types::{project_direction_to_cell, GridCell, SkeletonFrame};

/// A shot faster than this halves the keeper's effective save probability.
const FAST_SHOT_THRESHOLD_MPS: f32 = 30.0;

pub struct GoalkeeperAI {
    reaction_time_s: f32,
    coverage: f32,
    randomness: f32,
    rng: ChaCha8Rng,
    last_dive: Option<GridCell>,
}

impl GoalkeeperAI {
    pub fn new(reaction_time_s: f32, coverage: f32, randomness: f32, seed: u64) -> Self {
        Self {
            reaction_time_s,
            coverage: coverage.clamp(0.0, 1.0),
            randomness: randomness.clamp(0.0, 1.0),
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_dive: None,
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn reaction_time_s(&self) -> f32 {
        self.reaction_time_s
    }

    pub fn last_dive(&self) -> Option<GridCell> {
        self.last_dive
    }

    /// Projects `kick_direction` onto the goal plane to pick a cell; with
    /// probability `randomness`, dives to a random cell instead. The
    /// skeleton parameter is accepted for interface symmetry with the
    /// detectors (a future reach model could use keeper body state) but is
    /// not consulted by this heuristic.
    pub fn predict_dive(&mut self, _skeleton: &SkeletonFrame, kick_direction: Vector3<f32>) -> GridCell {
        let predicted = project_direction_to_cell(kick_direction);
        let dive = if self.rng.random::<f32>() < self.randomness {
            GridCell::ALL[self.rng.random_range(0..GridCell::ALL.len())]
        } else {
            predicted
        };
        self.last_dive = Some(dive);
        dive
    }

    /// Rolls whether the dive reaches the shot. Same cell: `coverage`.
    /// Adjacent cell (Chebyshev distance 1): `coverage * 0.5`. Otherwise no
    /// chance. A shot faster than 30 m/s halves the effective probability.
    pub fn will_save(&mut self, kick_zone: GridCell, dive_zone: GridCell, velocity_mps: f32) -> bool {
        let distance = kick_zone.chebyshev_distance(dive_zone);
        let mut probability = match distance {
            0 => self.coverage,
            1 => self.coverage * 0.5,
            _ => 0.0,
        };
        if velocity_mps > FAST_SHOT_THRESHOLD_MPS {
            probability *= 0.5;
        }
        self.rng.random::<f32>() < probability
    }
}
