//! Faultwatch Detector
//!
//! Continuous fault aggregation for a multi-subsystem lander platform.
//!
//! This crate provides:
//! - Anomaly predicates (zero telemetry, thermal limit, state-of-charge volatility)
//! - Joint telemetry index tracking
//! - Per-subsystem evaluators (arm, antenna pan/tilt, camera trigger, power)
//! - Fault word aggregation and status record emission
//!
//! Transport, wiring and scheduling belong to the host; the detector only
//! consumes [`TelemetryEvent`]s and publishes [`StatusRecord`]s through a
//! [`StatusSink`].

pub mod aggregator;
pub mod clock;
pub mod detector;
pub mod error;
pub mod evaluators;
pub mod events;
pub mod flags;
pub mod gateway;
pub mod joints;
pub mod predicates;
pub mod tracker;

// Re-export key types for convenience
pub use aggregator::{FaultAggregator, Transition};
pub use clock::{Clock, ManualClock, SystemClock};
pub use detector::{FaultDetector, FaultSnapshot};
pub use error::{DetectorError, DetectorResult};
pub use events::{AntennaAxis, ArmControllerState, ArmJointStates, TelemetryEvent};
pub use flags::{ComponentFaultCode, FaultCategory, PowerFaultFlags, SystemFaultFlags};
pub use gateway::{MemorySink, StatusGateway, StatusRecord, StatusSink};
pub use joints::{JointId, NUM_JOINTS};
pub use tracker::{JointState, JointTelemetryTracker};
