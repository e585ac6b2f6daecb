#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderTuning {
    pub v_preparation: f32,
    pub preparation_min_time_s: f32,
    pub preparation_timeout_s: f32,
    pub prior_speed_deceleration_ratio: f32,
    pub contact_duration_s: f32,
    pub recovery_duration_s: f32,
    pub recovery_speed_exit_mps: f32,
    pub lean_threshold_deg: f32,
    pub power_header_speed_mps: f32,
}

impl Default for HeaderTuning {
    fn default() -> Self {
        Self {
            v_preparation: 1.0,
            preparation_min_time_s: 0.150,
            preparation_timeout_s: 2.0,
            prior_speed_deceleration_ratio: 0.6,
            contact_duration_s: 0.050,
            recovery_duration_s: 0.300,
            recovery_speed_exit_mps: 0.5,
            lean_threshold_deg: 45.0,
            power_header_speed_mps: 2.5,
        }
    }
}
