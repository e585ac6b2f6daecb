use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum HeaderType {
    PowerHeader,
    GlidingHeader,
    FlickOn,
    DefensiveClear,
    #[default]
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderQuality {
    pub head_velocity_mps: f32,
    pub neck_angle_deg: f32,
    pub body_alignment_score: f32,
    pub timing_score: f32,
    pub power_score: f32,
    pub overall_score: f32,
}

impl HeaderQuality {
    /// `0.4*power + 0.3*timing + 0.3*alignment`.
    pub fn weighted_overall(power: f32, timing: f32, alignment: f32) -> f32 {
        0.4 * power + 0.3 * timing + 0.3 * alignment
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaderResult {
    pub header_type: HeaderType,
    pub direction: Vector3<f32>,
    pub timestamp_us: u64,
    pub valid: bool,
    pub quality: HeaderQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_overall_matches_documented_weights() {
        assert!((HeaderQuality::weighted_overall(100.0, 0.0, 0.0) - 40.0).abs() < 1e-3);
        assert!((HeaderQuality::weighted_overall(0.0, 100.0, 0.0) - 30.0).abs() < 1e-3);
        assert!((HeaderQuality::weighted_overall(0.0, 0.0, 100.0) - 30.0).abs() < 1e-3);
    }
}
