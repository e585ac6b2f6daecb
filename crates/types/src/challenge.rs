use serde::{Deserialize, Serialize};

/// Letter grade derived from the score percentage a challenge achieved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// `ratio` is score achieved over score possible, in `[0, 1]` (can
    /// exceed 1 for bonus-heavy scoring; still grades S).
    pub fn from_score_ratio(ratio: f32) -> Self {
        match ratio {
            r if r >= 0.95 => Grade::S,
            r if r >= 0.85 => Grade::A,
            r if r >= 0.70 => Grade::B,
            r if r >= 0.55 => Grade::C,
            r if r >= 0.40 => Grade::D,
            _ => Grade::F,
        }
    }
}

/// Aggregate outcome of a completed challenge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub final_score: f32,
    pub attempts: u32,
    pub successes: u32,
    pub accuracy: f32,
    pub max_velocity_kmh: f32,
    pub avg_velocity_kmh: f32,
    pub duration_s: f32,
    pub passed: bool,
    pub grade: Grade,
    pub unlocked_achievements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries_are_inclusive_lower_bounds() {
        assert_eq!(Grade::from_score_ratio(1.0), Grade::S);
        assert_eq!(Grade::from_score_ratio(0.95), Grade::S);
        assert_eq!(Grade::from_score_ratio(0.9499), Grade::A);
        assert_eq!(Grade::from_score_ratio(0.85), Grade::A);
        assert_eq!(Grade::from_score_ratio(0.70), Grade::B);
        assert_eq!(Grade::from_score_ratio(0.55), Grade::C);
        assert_eq!(Grade::from_score_ratio(0.40), Grade::D);
        assert_eq!(Grade::from_score_ratio(0.39), Grade::F);
        assert_eq!(Grade::from_score_ratio(0.0), Grade::F);
    }
}
