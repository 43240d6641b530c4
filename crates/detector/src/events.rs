//! Inbound telemetry and command events
//!
//! Transport-agnostic shapes of everything the detector consumes. The
//! envelope is internally tagged by `type` so a host can feed JSON
//! directly, e.g. `{"type":"power_temperature","value":31.5}`.

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, DetectorResult};

/// Joint state telemetry: parallel name/position/effort sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmJointStates {
    /// Joint names
    pub name: Vec<String>,
    /// Joint positions, same order as `name`
    pub position: Vec<f64>,
    /// Joint efforts, same order as `name`
    pub effort: Vec<f64>,
}

impl ArmJointStates {
    /// Reject records whose sequences disagree in length.
    pub fn validate(&self) -> DetectorResult<()> {
        let names = self.name.len();
        for (field, values) in [("position", self.position.len()), ("effort", self.effort.len())] {
            if values != names {
                return Err(DetectorError::LengthMismatch {
                    record: "arm joint states",
                    field,
                    names,
                    values,
                });
            }
        }
        Ok(())
    }
}

/// Arm trajectory controller feedback
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmControllerState {
    /// Controlled joint names
    pub joint_names: Vec<String>,
    /// Actual positions, same order as `joint_names`
    pub actual_positions: Vec<f64>,
}

/// Antenna axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntennaAxis {
    /// Pan axis
    Pan,
    /// Tilt axis
    Tilt,
}

/// Every event the detector reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Joint state telemetry
    ArmJointStates(ArmJointStates),
    /// Arm controller feedback
    ArmControllerState(ArmControllerState),
    /// Commanded pan angle
    AntennaPanCommand {
        /// Command value
        value: f64,
    },
    /// Commanded tilt angle
    AntennaTiltCommand {
        /// Command value
        value: f64,
    },
    /// Pan controller state
    AntennaPanState {
        /// Accepted set-point
        set_point: f64,
    },
    /// Tilt controller state
    AntennaTiltState {
        /// Accepted set-point
        set_point: f64,
    },
    /// Upstream (reference) camera trigger
    CameraTriggerOriginal {
        /// Source timestamp; stamped on receipt when absent
        #[serde(default)]
        stamp_ns: Option<u64>,
    },
    /// Camera trigger as actually delivered
    CameraTrigger {
        /// Source timestamp; stamped on receipt when absent
        #[serde(default)]
        stamp_ns: Option<u64>,
    },
    /// Battery state of charge
    PowerStateOfCharge {
        /// Fractional charge
        value: f64,
    },
    /// Battery temperature
    PowerTemperature {
        /// Temperature in Celsius
        value: f64,
    },
}

impl TelemetryEvent {
    /// Event type name, as used in the `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            TelemetryEvent::ArmJointStates(_) => "arm_joint_states",
            TelemetryEvent::ArmControllerState(_) => "arm_controller_state",
            TelemetryEvent::AntennaPanCommand { .. } => "antenna_pan_command",
            TelemetryEvent::AntennaTiltCommand { .. } => "antenna_tilt_command",
            TelemetryEvent::AntennaPanState { .. } => "antenna_pan_state",
            TelemetryEvent::AntennaTiltState { .. } => "antenna_tilt_state",
            TelemetryEvent::CameraTriggerOriginal { .. } => "camera_trigger_original",
            TelemetryEvent::CameraTrigger { .. } => "camera_trigger",
            TelemetryEvent::PowerStateOfCharge { .. } => "power_state_of_charge",
            TelemetryEvent::PowerTemperature { .. } => "power_temperature",
        }
    }
}
