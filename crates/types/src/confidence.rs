use serde::{Deserialize, Serialize};

/// Tracker confidence for a single joint sample, mapped to `[0, 1]`.
///
/// Samples below 0.5 may be stored but must not feed derivative queries,
/// so a dropout frame never produces a spurious velocity spike.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Confidence {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_f32(self) -> f32 {
        match self {
            Confidence::None => 0.0,
            Confidence::Low => 0.25,
            Confidence::Medium => 0.6,
            Confidence::High => 1.0,
        }
    }

    /// Clears the derivative-eligibility threshold.
    pub fn is_reliable(self) -> bool {
        self.as_f32() >= 0.5
    }
}
