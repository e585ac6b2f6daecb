use nalgebra::{Point3, Vector3};

/// Minimal sufficient statistics captured across a header's four phases,
/// handed to the quality/classification step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderContactSnapshot {
    pub peak_head_speed_mps: f32,
    pub latched_direction: Vector3<f32>,
    /// Head velocity at the Preparation -> Contact transition, used by the
    /// lean/vx/vy/vz classifier.
    pub latched_velocity: Vector3<f32>,
    pub contact_timestamp_us: u64,
    pub completion_timestamp_us: u64,

    pub head_position_m: Point3<f32>,
    pub neck_position_m: Point3<f32>,
    pub spine_chest_position_m: Point3<f32>,
    pub pelvis_position_m: Point3<f32>,
}
