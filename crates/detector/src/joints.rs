//! Lander joint table

use serde::{Deserialize, Serialize};

/// Number of joints in the fixed joint table
pub const NUM_JOINTS: usize = 9;

/// Logical joint identifiers, in joint table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointId {
    /// Antenna pan
    AntPan,
    /// Antenna tilt
    AntTilt,
    /// Distal pitch
    DistPitch,
    /// Grinder
    Grinder,
    /// Hand yaw (wrist)
    HandYaw,
    /// Proximal pitch
    ProxPitch,
    /// Scoop yaw
    ScoopYaw,
    /// Shoulder pitch
    ShouPitch,
    /// Shoulder yaw
    ShouYaw,
}

impl JointId {
    /// All joints in table order
    pub const ALL: [JointId; NUM_JOINTS] = [
        JointId::AntPan,
        JointId::AntTilt,
        JointId::DistPitch,
        JointId::Grinder,
        JointId::HandYaw,
        JointId::ProxPitch,
        JointId::ScoopYaw,
        JointId::ShouPitch,
        JointId::ShouYaw,
    ];

    /// Position in the joint table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name as it appears in joint state telemetry
    pub fn name(self) -> &'static str {
        match self {
            JointId::AntPan => "j_ant_pan",
            JointId::AntTilt => "j_ant_tilt",
            JointId::DistPitch => "j_dist_pitch",
            JointId::Grinder => "j_grinder",
            JointId::HandYaw => "j_hand_yaw",
            JointId::ProxPitch => "j_prox_pitch",
            JointId::ScoopYaw => "j_scoop_yaw",
            JointId::ShouPitch => "j_shou_pitch",
            JointId::ShouYaw => "j_shou_yaw",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|joint| joint.name() == name)
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_index() {
        for (i, joint) in JointId::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
            assert_eq!(JointId::from_index(i), Some(*joint));
            assert_eq!(JointId::from_name(joint.name()), Some(*joint));
        }
        assert_eq!(JointId::from_index(NUM_JOINTS), None);
        assert_eq!(JointId::from_name("j_elbow"), None);
    }

    #[test]
    fn test_display_uses_telemetry_name() {
        assert_eq!(JointId::ScoopYaw.to_string(), "j_scoop_yaw");
    }
}
