//! Post-hoc biomechanical scoring of a completed kick. Consumes the
//! `KickContactSnapshot` the detector captured plus its provisional
//! `KickResult`, and returns a refined `KickResult` with a real
//! classification and quality vector.

use kick_detector::KickContactSnapshot;
use nalgebra::Vector3;
use types::geometry::{angle_between_deg, angle_from_vertical_deg, joint_angle_deg};
use types::{KickQuality, KickResult, KickType, TargetZone};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KickAnalyzerTuning {
    pub max_ball_speed_kmh: f32,
    pub ideal_knee_angle_deg: f32,
    pub max_hip_rotation_deg: f32,
    pub follow_through_score_cap_m: f32,
    /// Heuristic classifier thresholds.
    pub instep_knee_angle_threshold_deg: f32,
    pub instep_peak_speed_threshold_mps: f32,
    pub outside_lateral_offset_threshold_m: f32,
    pub toe_windup_time_s: f32,
    pub volley_pelvis_height_m: f32,
}

impl Default for KickAnalyzerTuning {
    fn default() -> Self {
        Self {
            max_ball_speed_kmh: 120.0,
            ideal_knee_angle_deg: 135.0,
            max_hip_rotation_deg: 90.0,
            follow_through_score_cap_m: 0.8,
            instep_knee_angle_threshold_deg: 110.0,
            instep_peak_speed_threshold_mps: 2.5,
            outside_lateral_offset_threshold_m: 0.15,
            toe_windup_time_s: 0.250,
            volley_pelvis_height_m: 1.0,
        }
    }
}

pub struct KickAnalyzer {
    tuning: KickAnalyzerTuning,
}

impl Default for KickAnalyzer {
    fn default() -> Self {
        Self::new(KickAnalyzerTuning::default())
    }
}

impl KickAnalyzer {
    pub fn new(tuning: KickAnalyzerTuning) -> Self {
        Self { tuning }
    }

    /// Refines a detector-assembled `KickResult` with the real
    /// classification and quality vector. `target` is `None` when the
    /// active challenge has no accuracy objective (e.g. a power drill).
    pub fn analyze(&self, provisional: &KickResult, contact: &KickContactSnapshot, target: Option<&TargetZone>) -> KickResult {
        let quality = self.score(contact, target);
        KickResult {
            kick_type: self.classify(contact),
            quality,
            ..*provisional
        }
    }

    fn score(&self, contact: &KickContactSnapshot, target: Option<&TargetZone>) -> KickQuality {
        let foot_velocity_mps = contact.peak_foot_speed_mps;
        let estimated_ball_speed_kmh = foot_velocity_mps * 3.6;
        let power_score = 100.0 * (estimated_ball_speed_kmh / self.tuning.max_ball_speed_kmh).min(1.0);

        let (direction_angle_deg, accuracy_score) = match target.filter(|zone| zone.is_valid()) {
            Some(zone) => {
                let ideal = zone.center - contact.foot_position_at_contact_m;
                if ideal.norm() > f32::EPSILON {
                    let angle = angle_between_deg(ideal, contact.latched_direction);
                    (angle, 100.0 * (1.0 - angle / 45.0).max(0.0))
                } else {
                    (0.0, 100.0)
                }
            }
            None => (0.0, 0.0),
        };

        let knee_angle_deg = joint_angle_deg(contact.hip_position_m, contact.knee_position_m, contact.ankle_position_m);
        let knee_score = 100.0 * (1.0 - (knee_angle_deg - self.tuning.ideal_knee_angle_deg).abs() / 45.0).max(0.0);

        let hip_vector = contact.right_hip_position_m - contact.left_hip_position_m;
        let hip_rotation_deg = angle_between_deg(hip_vector, Vector3::x()).min(self.tuning.max_hip_rotation_deg);
        let hip_score = 100.0 * hip_rotation_deg / self.tuning.max_hip_rotation_deg;

        let follow_through_m = (contact.foot_position_at_followthrough_exit_m - contact.foot_position_at_contact_m).norm();
        let follow_through_score = 100.0 * (follow_through_m / self.tuning.follow_through_score_cap_m).min(1.0);

        let technique_score = (knee_score + hip_score + follow_through_score) / 3.0;

        let body_lean_deg = angle_from_vertical_deg(contact.spine_chest_position_m - contact.pelvis_position_m);
        let balance_score = 100.0 * (1.0 - body_lean_deg / 45.0).max(0.0);

        let overall_score = KickQuality::weighted_overall(power_score, accuracy_score, technique_score, balance_score);

        KickQuality {
            foot_velocity_mps,
            estimated_ball_speed_kmh,
            power_score,
            direction_angle_deg,
            accuracy_score,
            knee_angle_deg,
            hip_rotation_deg,
            follow_through_m,
            technique_score,
            body_lean_deg,
            balance_score,
            overall_score,
        }
    }

    /// Heuristic classifier; rules are evaluated in a fixed priority order,
    /// first match wins, `Instep` is the fallback.
    fn classify(&self, contact: &KickContactSnapshot) -> KickType {
        let knee_angle_deg = joint_angle_deg(contact.hip_position_m, contact.knee_position_m, contact.ankle_position_m);
        if knee_angle_deg < self.tuning.instep_knee_angle_threshold_deg
            && contact.peak_foot_speed_mps > self.tuning.instep_peak_speed_threshold_mps
        {
            return KickType::Instep;
        }

        let lateral = contact.latched_direction.x.abs();
        let forward = contact.latched_direction.z.abs();
        if lateral > forward {
            return KickType::SideFootPass;
        }

        let ankle_hip_offset = (contact.ankle_position_m.x - contact.hip_position_m.x).abs();
        if ankle_hip_offset > self.tuning.outside_lateral_offset_threshold_m {
            return KickType::Outside;
        }

        if contact.windup_duration_s < self.tuning.toe_windup_time_s {
            return KickType::Toe;
        }

        let foot_height_m = contact.foot_position_at_contact_m.y;
        let knee_height_m = contact.knee_position_m.y;
        if contact.pelvis_position_m.y > self.tuning.volley_pelvis_height_m && foot_height_m > knee_height_m {
            return KickType::Volley;
        }

        KickType::Instep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use types::Side;

    fn base_contact() -> KickContactSnapshot {
        KickContactSnapshot {
            foot: Side::Right,
            peak_foot_speed_mps: 3.0,
            latched_direction: Vector3::new(0.0, 0.0, 1.0),
            windup_duration_s: 0.4,
            contact_timestamp_us: 1_000_000,
            completion_timestamp_us: 1_300_000,
            hip_position_m: Point3::new(0.1, 1.0, 0.0),
            knee_position_m: Point3::new(0.1, 0.5, 0.1),
            ankle_position_m: Point3::new(0.1, 0.1, 0.2),
            foot_position_at_contact_m: Point3::new(0.1, 0.05, 0.3),
            foot_position_at_followthrough_exit_m: Point3::new(0.1, 0.05, 0.7),
            left_hip_position_m: Point3::new(-0.1, 1.0, 0.0),
            right_hip_position_m: Point3::new(0.1, 1.0, 0.0),
            pelvis_position_m: Point3::new(0.0, 0.95, 0.0),
            spine_chest_position_m: Point3::new(0.0, 1.4, 0.0),
        }
    }

    fn provisional(contact: &KickContactSnapshot) -> KickResult {
        KickResult {
            kick_type: KickType::Instep,
            foot: contact.foot,
            direction: contact.latched_direction,
            timestamp_us: contact.completion_timestamp_us,
            valid: true,
            quality: KickQuality {
                foot_velocity_mps: contact.peak_foot_speed_mps,
                estimated_ball_speed_kmh: contact.peak_foot_speed_mps * 3.6,
                ..Default::default()
            },
        }
    }

    #[test]
    fn on_target_kick_scores_full_accuracy() {
        let analyzer = KickAnalyzer::default();
        let contact = base_contact();
        let target = TargetZone::new(Point3::new(0.1, 0.05, 10.0), 0.5);
        let result = analyzer.analyze(&provisional(&contact), &contact, Some(&target));
        assert_relative_eq!(result.quality.accuracy_score, 100.0, epsilon = 1.0);
    }

    #[test]
    fn no_target_zone_yields_zero_accuracy() {
        let analyzer = KickAnalyzer::default();
        let contact = base_contact();
        let result = analyzer.analyze(&provisional(&contact), &contact, None);
        assert_relative_eq!(result.quality.accuracy_score, 0.0);
    }

    #[test]
    fn overall_matches_weighted_formula() {
        let analyzer = KickAnalyzer::default();
        let contact = base_contact();
        let result = analyzer.analyze(&provisional(&contact), &contact, None);
        let expected = KickQuality::weighted_overall(
            result.quality.power_score,
            result.quality.accuracy_score,
            result.quality.technique_score,
            result.quality.balance_score,
        );
        assert_relative_eq!(result.quality.overall_score, expected, epsilon = 1e-3);
    }

    #[test]
    fn lateral_dominant_direction_classifies_as_side_foot_pass() {
        let analyzer = KickAnalyzer::default();
        let mut contact = base_contact();
        contact.latched_direction = Vector3::new(1.0, 0.0, 0.2);
        let result = analyzer.analyze(&provisional(&contact), &contact, None);
        assert_eq!(result.kick_type, KickType::SideFootPass);
    }

    #[test]
    fn short_windup_moderate_speed_classifies_as_toe() {
        let analyzer = KickAnalyzer::default();
        let mut contact = base_contact();
        contact.windup_duration_s = 0.1;
        contact.peak_foot_speed_mps = 1.5;
        contact.knee_position_m = Point3::new(0.1, 0.5, 0.15);
        contact.hip_position_m = Point3::new(0.1, 1.0, -0.15);
        contact.ankle_position_m = Point3::new(0.1, 0.1, 0.4);
        let result = analyzer.analyze(&provisional(&contact), &contact, None);
        assert_eq!(result.kick_type, KickType::Toe);
    }

    #[test]
    fn high_pelvis_and_foot_above_knee_classifies_as_volley() {
        let analyzer = KickAnalyzer::default();
        let mut contact = base_contact();
        contact.peak_foot_speed_mps = 1.0;
        contact.windup_duration_s = 0.4;
        contact.knee_position_m = Point3::new(0.1, 0.9, 0.1);
        contact.hip_position_m = Point3::new(0.1, 1.2, -0.1);
        contact.ankle_position_m = Point3::new(0.1, 1.1, 0.2);
        contact.foot_position_at_contact_m = Point3::new(0.1, 1.1, 0.3);
        contact.pelvis_position_m = Point3::new(0.0, 1.1, 0.0);
        let result = analyzer.analyze(&provisional(&contact), &contact, None);
        assert_eq!(result.kick_type, KickType::Volley);
    }
}
