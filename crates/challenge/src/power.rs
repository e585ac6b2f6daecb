use types::{ChallengeResult, Grade, KickResult};

use crate::config::PowerConfig;
use crate::{Challenge, ChallengeState};

/// Up to `max_attempts` kicks, tracking the maximum foot velocity reached.
/// Final score is computed from that maximum once attempts are exhausted.
pub struct PowerChallenge {
    config: PowerConfig,
    state: ChallengeState,
    elapsed_s: f32,
    attempts: u32,
    velocities_kmh: Vec<f32>,
    result: Option<ChallengeResult>,
}

impl PowerChallenge {
    pub fn new(config: PowerConfig) -> Self {
        Self {
            config,
            state: ChallengeState::Idle,
            elapsed_s: 0.0,
            attempts: 0,
            velocities_kmh: Vec::new(),
            result: None,
        }
    }

    fn max_velocity_kmh(&self) -> f32 {
        self.velocities_kmh.iter().cloned().fold(0.0_f32, f32::max)
    }

    /// Tier bonus unlocked by the best attempt: "good" at 70
    /// km/h (label only, no bonus points), "excellent" at 100 (+500),
    /// "world class" at 120 (+1500). Bonuses don't stack; the highest
    /// tier reached wins.
    fn tier_bonus_and_achievements(&self, max_velocity_kmh: f32) -> (f32, Vec<String>) {
        let mut achievements = Vec::new();
        let mut bonus = 0.0;
        if max_velocity_kmh >= self.config.good_threshold_kmh {
            achievements.push("power_good".to_string());
        }
        if max_velocity_kmh >= self.config.excellent_threshold_kmh {
            achievements.push("power_excellent".to_string());
            bonus = self.config.excellent_bonus;
        }
        if max_velocity_kmh >= self.config.world_class_threshold_kmh {
            achievements.push("power_world_class".to_string());
            bonus = self.config.world_class_bonus;
        }
        (bonus, achievements)
    }

    fn complete(&mut self) {
        if self.state == ChallengeState::Complete {
            return;
        }
        let max_velocity_kmh = self.max_velocity_kmh();
        let avg_velocity_kmh = if self.velocities_kmh.is_empty() {
            0.0
        } else {
            self.velocities_kmh.iter().sum::<f32>() / self.velocities_kmh.len() as f32
        };
        let (bonus, achievements) = self.tier_bonus_and_achievements(max_velocity_kmh);
        let final_score = max_velocity_kmh * self.config.points_per_kmh + bonus;
        let ratio = final_score / self.config.max_possible_score();

        self.result = Some(ChallengeResult {
            final_score,
            attempts: self.attempts,
            successes: self.attempts,
            accuracy: 1.0,
            max_velocity_kmh,
            avg_velocity_kmh,
            duration_s: self.elapsed_s,
            passed: max_velocity_kmh >= self.config.good_threshold_kmh,
            grade: Grade::from_score_ratio(ratio),
            unlocked_achievements: achievements,
        });
        self.state = ChallengeState::Complete;
    }
}

impl Challenge for PowerChallenge {
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
        self.attempts += 1;
        self.velocities_kmh.push(kick.quality.estimated_ball_speed_kmh);

        if self.attempts >= self.config.max_attempts {
            self.complete();
        }
    }

    fn result(&self) -> Option<ChallengeResult> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use types::{KickQuality, KickType, Side};

    fn kick_at_kmh(kmh: f32) -> KickResult {
        KickResult {
            kick_type: KickType::Instep,
            foot: Side::Right,
            direction: Vector3::new(0.0, 0.0, 1.0),
            timestamp_us: 0,
            valid: true,
            quality: KickQuality {
                estimated_ball_speed_kmh: kmh,
                ..Default::default()
            },
        }
    }

    #[test]
    fn three_attempts_complete_the_challenge_using_the_best() {
        let mut challenge = PowerChallenge::new(PowerConfig::default());
        challenge.start();
        challenge.on_kick(&kick_at_kmh(60.0));
        challenge.on_kick(&kick_at_kmh(95.0));
        challenge.on_kick(&kick_at_kmh(80.0));

        let result = challenge.result().expect("challenge should be complete after max_attempts");
        assert_eq!(result.attempts, 3);
        assert_eq!(result.max_velocity_kmh, 95.0);
        assert!(result.unlocked_achievements.contains(&"power_good".to_string()));
        assert!(!result.unlocked_achievements.contains(&"power_excellent".to_string()));
    }

    #[test]
    fn world_class_velocity_unlocks_its_bonus_and_achievement() {
        let mut challenge = PowerChallenge::new(PowerConfig {
            max_attempts: 1,
            ..PowerConfig::default()
        });
        challenge.start();
        challenge.on_kick(&kick_at_kmh(125.0));

        let result = challenge.result().unwrap();
        assert!(result.unlocked_achievements.contains(&"power_world_class".to_string()));
        let expected = 125.0 * PowerConfig::default().points_per_kmh + PowerConfig::default().world_class_bonus;
        assert!((result.final_score - expected).abs() < 1e-3);
    }
}
