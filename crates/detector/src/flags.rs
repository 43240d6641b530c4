//! Fault bit definitions
//!
//! The system word has one bit per system-level fault category. Only four
//! of them are driven by the evaluators in this crate; the others are kept
//! so the encoded word stays compatible with downstream consumers.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// System-wide fault word (10 bits)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SystemFaultFlags: u16 {
        /// Generic system fault
        const SYSTEM = 1 << 0;
        /// Arm goal rejected
        const ARM_GOAL_ERROR = 1 << 1;
        /// Arm joint telemetry indicates a hardware fault
        const ARM_EXECUTION_ERROR = 1 << 2;
        /// Task goal rejected
        const TASK_GOAL_ERROR = 1 << 3;
        /// Camera goal rejected
        const CAMERA_GOAL_ERROR = 1 << 4;
        /// Camera trigger path diverged
        const CAMERA_EXECUTION_ERROR = 1 << 5;
        /// Pan/tilt goal rejected
        const PAN_TILT_GOAL_ERROR = 1 << 6;
        /// Antenna command did not reach its set-point
        const PAN_TILT_EXECUTION_ERROR = 1 << 7;
        /// Lander execution error
        const LANDER_EXECUTION_ERROR = 1 << 8;
        /// Battery thermal or state-of-charge fault
        const POWER_FAULT = 1 << 9;
    }
}

bitflags! {
    /// Power subsystem detail word (3 bits)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PowerFaultFlags: u8 {
        /// Bus voltage too low
        const LOW_VOLTAGE = 1 << 0;
        /// Battery capacity loss
        const CAPACITY_LOSS = 1 << 1;
        /// Battery temperature above limit
        const THERMAL = 1 << 2;
    }
}

/// Subsystems the detector evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    /// Robotic arm
    Arm,
    /// Antenna pan/tilt mechanism
    PanTilt,
    /// Stereo camera trigger path
    Camera,
    /// Battery and power system
    Power,
}

impl FaultCategory {
    /// Every evaluated category
    pub const ALL: [FaultCategory; 4] = [
        FaultCategory::Arm,
        FaultCategory::PanTilt,
        FaultCategory::Camera,
        FaultCategory::Power,
    ];

    /// Bit pattern this category owns in the system word
    pub fn flag(self) -> SystemFaultFlags {
        match self {
            FaultCategory::Arm => SystemFaultFlags::ARM_EXECUTION_ERROR,
            FaultCategory::PanTilt => SystemFaultFlags::PAN_TILT_EXECUTION_ERROR,
            FaultCategory::Camera => SystemFaultFlags::CAMERA_EXECUTION_ERROR,
            FaultCategory::Power => SystemFaultFlags::POWER_FAULT,
        }
    }

    /// Topic the subsystem record is published on
    pub fn topic(self) -> &'static str {
        match self {
            FaultCategory::Arm => "/faults/arm_faults_status",
            FaultCategory::PanTilt => "/faults/pt_faults_status",
            FaultCategory::Camera => "/faults/cam_faults_status",
            FaultCategory::Power => "/faults/power_faults_status",
        }
    }

    /// Short name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCategory::Arm => "arm",
            FaultCategory::PanTilt => "pan_tilt",
            FaultCategory::Camera => "camera",
            FaultCategory::Power => "power",
        }
    }
}

/// Per-component fault classification attached to subsystem records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u32)]
pub enum ComponentFaultCode {
    /// No fault present
    #[default]
    None = 0,
    /// Hardware fault present
    Hardware = 1,
}

impl ComponentFaultCode {
    /// Code for an evaluation outcome
    pub fn from_faulted(faulted: bool) -> Self {
        if faulted {
            ComponentFaultCode::Hardware
        } else {
            ComponentFaultCode::None
        }
    }

    /// Wire value
    pub fn value(self) -> u32 {
        self as u32
    }

    /// Decode a wire value
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(ComponentFaultCode::None),
            1 => Some(ComponentFaultCode::Hardware),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_word_layout() {
        assert_eq!(SystemFaultFlags::all().bits(), 0b11_1111_1111);
        assert_eq!(SystemFaultFlags::ARM_EXECUTION_ERROR.bits(), 4);
        assert_eq!(SystemFaultFlags::CAMERA_EXECUTION_ERROR.bits(), 32);
        assert_eq!(SystemFaultFlags::PAN_TILT_EXECUTION_ERROR.bits(), 128);
        assert_eq!(SystemFaultFlags::POWER_FAULT.bits(), 512);
        assert_eq!(PowerFaultFlags::all().bits(), 0b111);
    }

    #[test]
    fn test_categories_own_disjoint_bits() {
        let mut seen = SystemFaultFlags::empty();
        for category in FaultCategory::ALL {
            assert!(!seen.intersects(category.flag()));
            seen |= category.flag();
        }
        assert_eq!(seen.bits().count_ones(), 4);
    }

    #[test]
    fn test_component_code_values() {
        assert_eq!(ComponentFaultCode::from_faulted(true), ComponentFaultCode::Hardware);
        assert_eq!(ComponentFaultCode::from_faulted(false), ComponentFaultCode::None);
        assert_eq!(ComponentFaultCode::Hardware.value(), 1);
        assert_eq!(ComponentFaultCode::from_value(0), Some(ComponentFaultCode::None));
        assert_eq!(ComponentFaultCode::from_value(7), None);
    }
}
