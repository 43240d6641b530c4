//! Arm fault evaluator
//!
//! A watched joint is faulted when its position or effort reads the
//! zero-telemetry sentinel. The arm as a whole is faulted only when every
//! watched joint is faulted at the same time.

use faultwatch_core::Thresholds;

use crate::error::{DetectorError, DetectorResult};
use crate::events::ArmJointStates;
use crate::joints::JointId;
use crate::predicates::is_zero_telemetry;
use crate::tracker::JointTelemetryTracker;

/// Evaluates joint state telemetry for the watched arm joints
#[derive(Debug, Clone)]
pub struct ArmEvaluator {
    watched: Vec<JointId>,
}

impl ArmEvaluator {
    /// Watch the wrist (hand yaw) and scoop yaw joints
    pub fn new() -> Self {
        Self {
            watched: vec![JointId::HandYaw, JointId::ScoopYaw],
        }
    }

    /// Watch the given joints
    pub fn with_joints(watched: Vec<JointId>) -> DetectorResult<Self> {
        if watched.is_empty() {
            return Err(DetectorError::NoWatchedJoints);
        }
        Ok(Self { watched })
    }

    /// Watch joints by telemetry name
    pub fn from_names<T: AsRef<str>>(names: &[T]) -> DetectorResult<Self> {
        let watched = names
            .iter()
            .map(|name| {
                JointId::from_name(name.as_ref())
                    .ok_or_else(|| DetectorError::UnknownJoint(name.as_ref().to_string()))
            })
            .collect::<DetectorResult<Vec<_>>>()?;
        Self::with_joints(watched)
    }

    pub fn watched(&self) -> &[JointId] {
        &self.watched
    }

    /// Whether the arm is faulted according to `msg`.
    pub fn evaluate(
        &self,
        tracker: &JointTelemetryTracker,
        msg: &ArmJointStates,
        thresholds: &Thresholds,
    ) -> bool {
        self.watched
            .iter()
            .all(|&joint| Self::joint_faulted(tracker, joint, msg, thresholds))
    }

    /// Whether a single joint shows the sentinel.
    ///
    /// Joints that cannot be evaluated (unresolved index, or a record whose
    /// name at the cached index no longer matches) count as not faulted.
    pub fn joint_faulted(
        tracker: &JointTelemetryTracker,
        joint: JointId,
        msg: &ArmJointStates,
        thresholds: &Thresholds,
    ) -> bool {
        let Some(index) = tracker.lookup_joint(joint) else {
            return false;
        };
        if msg.name.get(index).map(String::as_str) != Some(joint.name()) {
            return false;
        }

        let zero = |values: &[f64]| {
            values
                .get(index)
                .is_some_and(|&v| is_zero_telemetry(v, thresholds))
        };
        zero(msg.position.as_slice()) || zero(msg.effort.as_slice())
    }
}

impl Default for ArmEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
