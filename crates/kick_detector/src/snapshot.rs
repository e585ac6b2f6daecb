use nalgebra::{Point3, Vector3};
use types::Side;

/// Minimal sufficient statistics captured by the detector across a kick's
/// five phases, handed to `KickAnalyzer` in place of the raw histories
/// (which stay exclusively owned by the detector, per §9).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KickContactSnapshot {
    pub foot: Side,
    pub peak_foot_speed_mps: f32,
    pub latched_direction: Vector3<f32>,
    pub windup_duration_s: f32,
    pub contact_timestamp_us: u64,
    pub completion_timestamp_us: u64,

    pub hip_position_m: Point3<f32>,
    pub knee_position_m: Point3<f32>,
    pub ankle_position_m: Point3<f32>,
    pub foot_position_at_contact_m: Point3<f32>,
    pub foot_position_at_followthrough_exit_m: Point3<f32>,

    pub left_hip_position_m: Point3<f32>,
    pub right_hip_position_m: Point3<f32>,
    pub pelvis_position_m: Point3<f32>,
    pub spine_chest_position_m: Point3<f32>,
}
