use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::joint::Side;

/// Heuristic kick classification. The detector only ever assembles
/// `Unknown`/a placeholder; `KickAnalyzer::classify` is the authority.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum KickType {
    Instep,
    SideFootPass,
    Outside,
    Toe,
    Volley,
    Header,
    #[default]
    Unknown,
}

/// Biomechanical score vector for one completed kick. All scores are
/// clamped to `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KickQuality {
    pub foot_velocity_mps: f32,
    pub estimated_ball_speed_kmh: f32,
    pub power_score: f32,
    pub direction_angle_deg: f32,
    pub accuracy_score: f32,
    pub knee_angle_deg: f32,
    pub hip_rotation_deg: f32,
    pub follow_through_m: f32,
    pub technique_score: f32,
    pub body_lean_deg: f32,
    pub balance_score: f32,
    pub overall_score: f32,
}

impl KickQuality {
    /// `0.30*power + 0.25*accuracy + 0.25*technique + 0.20*balance`.
    pub fn weighted_overall(power: f32, accuracy: f32, technique: f32, balance: f32) -> f32 {
        0.30 * power + 0.25 * accuracy + 0.25 * technique + 0.20 * balance
    }
}

/// Emitted once per detected kick, at the end of FollowThrough.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KickResult {
    pub kick_type: KickType,
    pub foot: Side,
    /// Unit vector, latched at Contact entry.
    pub direction: Vector3<f32>,
    pub timestamp_us: u64,
    pub valid: bool,
    pub quality: KickQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_overall_matches_documented_weights() {
        let overall = KickQuality::weighted_overall(100.0, 0.0, 0.0, 0.0);
        assert!((overall - 30.0).abs() < 1e-3);
        let overall = KickQuality::weighted_overall(0.0, 100.0, 0.0, 0.0);
        assert!((overall - 25.0).abs() < 1e-3);
        let overall = KickQuality::weighted_overall(0.0, 0.0, 100.0, 0.0);
        assert!((overall - 25.0).abs() < 1e-3);
        let overall = KickQuality::weighted_overall(0.0, 0.0, 0.0, 100.0);
        assert!((overall - 20.0).abs() < 1e-3);
    }
}
