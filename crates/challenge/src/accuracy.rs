use std::collections::HashSet;

use types::{project_direction_to_cell, ChallengeResult, Grade, GridCell, KickResult};

use crate::config::AccuracyConfig;
use crate::{Challenge, ChallengeState};

/// 3x3 target-zone grid: each `KickResult` is projected onto a goal cell
/// by its `direction`; a zone counts once, the first time it's hit. Score
/// accumulates `base * multiplier * quality_factor` per newly-hit zone,
/// plus a completion bonus once all nine are hit.
pub struct AccuracyChallenge {
    config: AccuracyConfig,
    state: ChallengeState,
    elapsed_s: f32,
    attempts: u32,
    hit_zones: HashSet<GridCell>,
    score: f32,
    velocities_kmh: Vec<f32>,
    result: Option<ChallengeResult>,
}

impl AccuracyChallenge {
    pub fn new(config: AccuracyConfig) -> Self {
        Self {
            config,
            state: ChallengeState::Idle,
            elapsed_s: 0.0,
            attempts: 0,
            hit_zones: HashSet::new(),
            score: 0.0,
            velocities_kmh: Vec::new(),
            result: None,
        }
    }

    fn max_possible_score(&self) -> f32 {
        let multiplier_sum: f32 = GridCell::ALL.iter().map(|cell| cell.position_multiplier()).sum();
        self.config.base_score * multiplier_sum + self.config.completion_bonus
    }

    fn all_zones_hit(&self) -> bool {
        self.hit_zones.len() == GridCell::ALL.len()
    }

    fn complete(&mut self) {
        if self.state == ChallengeState::Complete {
            return;
        }
        let accuracy = self.hit_zones.len() as f32 / GridCell::ALL.len() as f32;
        let final_score = self.score
            + if self.all_zones_hit() {
                self.config.completion_bonus
            } else {
                0.0
            };
        let max_velocity_kmh = self.velocities_kmh.iter().cloned().fold(0.0_f32, f32::max);
        let avg_velocity_kmh = if self.velocities_kmh.is_empty() {
            0.0
        } else {
            self.velocities_kmh.iter().sum::<f32>() / self.velocities_kmh.len() as f32
        };
        let ratio = final_score / self.max_possible_score();
        self.result = Some(ChallengeResult {
            final_score,
            attempts: self.attempts,
            successes: self.hit_zones.len() as u32,
            accuracy,
            max_velocity_kmh,
            avg_velocity_kmh,
            duration_s: self.elapsed_s,
            passed: accuracy >= self.config.minimum_accuracy_for_pass,
            grade: Grade::from_score_ratio(ratio),
            unlocked_achievements: if self.all_zones_hit() {
                vec!["accuracy_perfect_grid".to_string()]
            } else {
                Vec::new()
            },
        });
        self.state = ChallengeState::Complete;
    }
}

impl Challenge for AccuracyChallenge {
    fn state(&self) -> ChallengeState {
        self.state
    }

    fn start(&mut self) {
        if matches!(self.state, ChallengeState::Idle) {
            self.state = ChallengeState::Instructions;
        }
        if matches!(self.state, ChallengeState::Instructions) {
            self.state = ChallengeState::Countdown;
        }
        if matches!(self.state, ChallengeState::Countdown) {
            self.state = ChallengeState::Active;
        }
    }

    fn tick(&mut self, elapsed_s: f32) {
        self.elapsed_s = elapsed_s;
        if self.state == ChallengeState::Active && elapsed_s >= self.config.time_limit_s {
            self.complete();
        }
    }

    fn on_kick(&mut self, kick: &KickResult) {
        if self.state != ChallengeState::Active || !kick.valid {
            return;
        }
        self.attempts += 1;
        self.velocities_kmh.push(kick.quality.estimated_ball_speed_kmh);

        let cell = project_direction_to_cell(kick.direction);
        if self.hit_zones.insert(cell) {
            let quality_factor = (kick.quality.overall_score / 100.0).clamp(0.0, 1.0);
            self.score += self.config.base_score * cell.position_multiplier() * quality_factor;
        }

        if self.all_zones_hit() || self.attempts >= self.config.max_attempts {
            self.complete();
        }
    }

    fn result(&self) -> Option<ChallengeResult> {
        self.result.clone()
    }
}
