/// Tunable thresholds for the kick phase state machine. Every
/// magic number the detector compares against lives here instead of as a
/// bare literal, so a tuning pass never has to go spelunking through the
/// FSM to find the number it wants to nudge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KickTuning {
    pub v_windup: f32,
    pub v_acceleration: f32,
    pub min_windup_time_s: f32,
    pub min_acceleration_time_s: f32,
    pub windup_timeout_s: f32,
    pub followthrough_duration_s: f32,
    /// Dominant foot must be this many times faster than the other to take
    /// over.
    pub dominant_foot_hysteresis_ratio: f32,
    /// `prior_foot_speed` must clear `prior_speed_floor_ratio * v_acceleration`
    /// before a deceleration can latch Contact.
    pub prior_speed_floor_ratio: f32,
    /// Contact latches when `current_speed < deceleration_ratio * prior_speed`.
    pub deceleration_ratio: f32,
}

impl Default for KickTuning {
    fn default() -> Self {
        Self {
            v_windup: 0.5,
            v_acceleration: 2.0,
            min_windup_time_s: 0.200,
            min_acceleration_time_s: 0.100,
            windup_timeout_s: 2.0,
            followthrough_duration_s: 0.300,
            dominant_foot_hysteresis_ratio: 1.5,
            prior_speed_floor_ratio: 0.8,
            deceleration_ratio: 0.7,
        }
    }
}
