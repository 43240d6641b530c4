//! Subsystem fault evaluators
//!
//! One evaluator per subsystem. Evaluators hold the cached inputs they need
//! but never touch fault bits; they only report whether their subsystem is
//! faulted right now.

pub mod antenna;
pub mod arm;
pub mod camera;
pub mod power;

pub use antenna::{evaluate_antenna, AntennaAxisState};
pub use arm::ArmEvaluator;
pub use camera::CameraTriggerState;
pub use power::PowerState;
