use serde::{Deserialize, Serialize};

/// The §6 configuration table, one variant per challenge, deserializable
/// from a single TOML file (`motion_core::config::load_toml`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChallengeConfig {
    Accuracy(AccuracyConfig),
    Power(PowerConfig),
    Penalty(PenaltyConfig),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyConfig {
    pub time_limit_s: f32,
    pub max_attempts: u32,
    pub minimum_accuracy_for_pass: f32,
    pub base_score: f32,
    pub completion_bonus: f32,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            time_limit_s: 60.0,
            max_attempts: 12,
            minimum_accuracy_for_pass: 0.5,
            base_score: 100.0,
            completion_bonus: 500.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    pub max_attempts: u32,
    pub points_per_kmh: f32,
    pub good_threshold_kmh: f32,
    pub excellent_threshold_kmh: f32,
    pub excellent_bonus: f32,
    pub world_class_threshold_kmh: f32,
    pub world_class_bonus: f32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            points_per_kmh: 10.0,
            good_threshold_kmh: 70.0,
            excellent_threshold_kmh: 100.0,
            excellent_bonus: 500.0,
            world_class_threshold_kmh: 120.0,
            world_class_bonus: 1500.0,
        }
    }
}

impl PowerConfig {
    /// Score ceiling used to turn `final_score` into a grading ratio: the
    /// world-class velocity plus its bonus, the best a single attempt can
    /// realistically post.
    pub fn max_possible_score(&self) -> f32 {
        self.world_class_threshold_kmh * self.points_per_kmh + self.world_class_bonus
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub kicks_per_player: u32,
    pub points_per_goal: f32,
    pub clean_sheet_bonus: f32,
    pub sudden_death: bool,
    pub miss_angle_threshold_deg: f32,
    pub goalkeeper_reaction_time_s: f32,
    pub goalkeeper_coverage: f32,
    pub goalkeeper_randomness: f32,
    pub goalkeeper_seed: u64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            kicks_per_player: 5,
            points_per_goal: 200.0,
            clean_sheet_bonus: 500.0,
            sudden_death: true,
            miss_angle_threshold_deg: 35.0,
            goalkeeper_reaction_time_s: 0.3,
            goalkeeper_coverage: 0.6,
            goalkeeper_randomness: 0.2,
            goalkeeper_seed: 0,
        }
    }
}

impl PenaltyConfig {
    pub fn max_possible_score(&self) -> f32 {
        self.kicks_per_player as f32 * self.points_per_goal + self.clean_sheet_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_accuracy_variant_from_toml() {
        let toml = r#"
            type = "accuracy"
            time_limit_s = 45.0
            max_attempts = 9
            minimum_accuracy_for_pass = 0.6
            base_score = 100.0
            completion_bonus = 500.0
        "#;
        let config: ChallengeConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config,
            ChallengeConfig::Accuracy(AccuracyConfig {
                time_limit_s: 45.0,
                max_attempts: 9,
                minimum_accuracy_for_pass: 0.6,
                base_score: 100.0,
                completion_bonus: 500.0,
            })
        );
    }

    #[test]
    fn accuracy_defaults_fill_unspecified_fields() {
        let config: ChallengeConfig = toml::from_str("type = \"power\"\nmax_attempts = 5").unwrap();
        assert_eq!(
            config,
            ChallengeConfig::Power(PowerConfig {
                max_attempts: 5,
                ..PowerConfig::default()
            })
        );
    }
}
