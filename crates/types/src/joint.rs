use serde::{Deserialize, Serialize};

/// The 32 joints reported by the depth-camera body tracker, in the order
/// the acquisition collaborator emits them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum JointId {
    Pelvis,
    SpineNavel,
    SpineChest,
    Neck,
    ClavicleLeft,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    HandTipLeft,
    ThumbLeft,
    ClavicleRight,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HandTipRight,
    ThumbRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
    Head,
    Nose,
    EyeLeft,
    EarLeft,
    EyeRight,
    EarRight,
}

impl JointId {
    pub const COUNT: usize = 32;

    pub const ALL: [JointId; Self::COUNT] = [
        JointId::Pelvis,
        JointId::SpineNavel,
        JointId::SpineChest,
        JointId::Neck,
        JointId::ClavicleLeft,
        JointId::ShoulderLeft,
        JointId::ElbowLeft,
        JointId::WristLeft,
        JointId::HandLeft,
        JointId::HandTipLeft,
        JointId::ThumbLeft,
        JointId::ClavicleRight,
        JointId::ShoulderRight,
        JointId::ElbowRight,
        JointId::WristRight,
        JointId::HandRight,
        JointId::HandTipRight,
        JointId::ThumbRight,
        JointId::HipLeft,
        JointId::KneeLeft,
        JointId::AnkleLeft,
        JointId::FootLeft,
        JointId::HipRight,
        JointId::KneeRight,
        JointId::AnkleRight,
        JointId::FootRight,
        JointId::Head,
        JointId::Nose,
        JointId::EyeLeft,
        JointId::EarLeft,
        JointId::EyeRight,
        JointId::EarRight,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A side of the body, used for the dominant-foot selection and for
/// left/right joint pairs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    #[default]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_discriminant_once() {
        assert_eq!(JointId::ALL.len(), JointId::COUNT);
        assert_eq!(JointId::ALL[0], JointId::Pelvis);
        assert_eq!(JointId::ALL[JointId::COUNT - 1], JointId::EarRight);
    }

    #[test]
    fn index_matches_declaration_order() {
        assert_eq!(JointId::Pelvis.index(), 0);
        assert_eq!(JointId::EarRight.index(), 31);
    }
}
