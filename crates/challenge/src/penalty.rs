use goalkeeper::GoalkeeperAI;
use types::geometry::{angle_between_deg, FORWARD};
use types::{project_direction_to_cell, ChallengeResult, Grade, KickResult};

use crate::config::PenaltyConfig;
use crate::{Challenge, ChallengeState};

/// Outcome of a single penalty round, as recorded by `PenaltyShootoutChallenge`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PenaltyOutcome {
    Goal,
    Saved,
    Missed,
}

/// Up to `kicks_per_player` rounds against a `GoalkeeperAI`.
/// Each `KickResult` either misses the goal outright (direction too far
/// off-target), is saved by the keeper's dive, or scores. Sudden death
/// (when enabled) extends play one round at a time while the shootout is
/// still exactly tied between goals and non-goals.
pub struct PenaltyShootoutChallenge {
    config: PenaltyConfig,
    keeper: GoalkeeperAI,
    state: ChallengeState,
    elapsed_s: f32,
    outcomes: Vec<PenaltyOutcome>,
    velocities_kmh: Vec<f32>,
    result: Option<ChallengeResult>,
}

impl PenaltyShootoutChallenge {
    pub fn new(config: PenaltyConfig) -> Self {
        let keeper = GoalkeeperAI::new(
            config.goalkeeper_reaction_time_s,
            config.goalkeeper_coverage,
            config.goalkeeper_randomness,
            config.goalkeeper_seed,
        );
        Self {
            config,
            keeper,
            state: ChallengeState::Idle,
            elapsed_s: 0.0,
            outcomes: Vec::new(),
            velocities_kmh: Vec::new(),
            result: None,
        }
    }

    pub fn outcomes(&self) -> &[PenaltyOutcome] {
        &self.outcomes
    }

    fn goals(&self) -> u32 {
        self.outcomes.iter().filter(|o| **o == PenaltyOutcome::Goal).count() as u32
    }

    /// Still exactly split between goals and everything else: sudden
    /// death keeps play alive while the outcome is undecided.
    fn is_tied(&self) -> bool {
        if self.outcomes.is_empty() {
            return false;
        }
        let goals = self.goals() as usize;
        let non_goals = self.outcomes.len() - goals as usize;
        goals == non_goals
    }

    fn should_continue(&self) -> bool {
        let regulation_remaining = (self.outcomes.len() as u32) < self.config.kicks_per_player;
        if regulation_remaining {
            return true;
        }
        self.config.sudden_death && self.is_tied()
    }

    fn complete(&mut self) {
        if self.state == ChallengeState::Complete {
            return;
        }
        let goals = self.goals();
        let attempts = self.outcomes.len() as u32;
        let clean_sheet = attempts > 0 && goals == attempts;
        let final_score = goals as f32 * self.config.points_per_goal
            + if clean_sheet { self.config.clean_sheet_bonus } else { 0.0 };
        let max_velocity_kmh = self.velocities_kmh.iter().cloned().fold(0.0_f32, f32::max);
        let avg_velocity_kmh = if self.velocities_kmh.is_empty() {
            0.0
        } else {
            self.velocities_kmh.iter().sum::<f32>() / self.velocities_kmh.len() as f32
        };
        let ratio = final_score / self.config.max_possible_score();

        self.result = Some(ChallengeResult {
            final_score,
            attempts,
            successes: goals,
            accuracy: if attempts == 0 { 0.0 } else { goals as f32 / attempts as f32 },
            max_velocity_kmh,
            avg_velocity_kmh,
            duration_s: self.elapsed_s,
            passed: goals > 0,
            grade: Grade::from_score_ratio(ratio),
            unlocked_achievements: if clean_sheet {
                vec!["penalty_clean_sheet".to_string()]
            } else {
                Vec::new()
            },
        });
        self.state = ChallengeState::Complete;
    }
}

impl Challenge for PenaltyShootoutChallenge {
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
    }

    fn on_kick(&mut self, kick: &KickResult) {
        if self.state != ChallengeState::Active || !kick.valid {
            return;
        }
        self.velocities_kmh.push(kick.quality.estimated_ball_speed_kmh);

        let angle_off_target = angle_between_deg(kick.direction, FORWARD);
        let outcome = if angle_off_target > self.config.miss_angle_threshold_deg {
            PenaltyOutcome::Missed
        } else {
            let kick_zone = project_direction_to_cell(kick.direction);
            // `predict_dive` needs a skeleton only for a future reach
            // model; the keeper has none to consult here, so it reasons
            // purely from the kick direction it was just handed.
            let blank_skeleton = types::SkeletonFrame::new(kick.timestamp_us);
            let dive_zone = self.keeper.predict_dive(&blank_skeleton, kick.direction);
            let saved = self.keeper.will_save(kick_zone, dive_zone, kick.quality.foot_velocity_mps);
            if saved {
                PenaltyOutcome::Saved
            } else {
                PenaltyOutcome::Goal
            }
        };
        self.outcomes.push(outcome);

        if !self.should_continue() {
            self.complete();
        }
    }

    fn result(&self) -> Option<ChallengeResult> {
        self.result.clone()
    }
}
