//! Joint telemetry tracker
//!
//! Joint state telemetry carries parallel name/position/effort sequences.
//! The position of each logical joint in those sequences is resolved from the
//! first record and cached for the lifetime of the tracker; joint ordering is
//! assumed never to change afterwards.

use std::collections::HashMap;

use crate::error::{DetectorError, DetectorResult};
use crate::joints::{JointId, NUM_JOINTS};

/// Last observed telemetry for one joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointState {
    /// Logical joint
    pub id: JointId,
    /// Last observed position
    pub position: f64,
    /// Last observed effort
    pub effort: f64,
    /// Index of the joint within the telemetry record
    pub index: usize,
}

/// Tracks telemetry indices, last joint samples and commanded arm positions.
#[derive(Debug, Default)]
pub struct JointTelemetryTracker {
    indices: Option<[Option<usize>; NUM_JOINTS]>,
    joints: [Option<JointState>; NUM_JOINTS],
    commanded: HashMap<String, f64>,
}

impl JointTelemetryTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the index table has been resolved
    pub fn is_resolved(&self) -> bool {
        self.indices.is_some()
    }

    /// Resolve each joint's position in `names`.
    ///
    /// Only the first call has an effect. Joints missing from `names` stay
    /// unresolved. Returns `true` when this call performed the resolution.
    pub fn resolve_indices<T: AsRef<str>>(&mut self, names: &[T]) -> bool {
        if self.indices.is_some() {
            return false;
        }

        let mut table = [None; NUM_JOINTS];
        for joint in JointId::ALL {
            table[joint.index()] = names.iter().position(|name| name.as_ref() == joint.name());
        }
        self.indices = Some(table);
        true
    }

    /// Cached telemetry index of the joint at table position `joint`.
    ///
    /// `None` when `joint` is outside the table, indices are not resolved yet,
    /// or the joint was absent from the resolving record.
    pub fn lookup(&self, joint: usize) -> Option<usize> {
        if joint >= NUM_JOINTS {
            return None;
        }
        self.indices.as_ref().and_then(|table| table[joint])
    }

    /// Cached telemetry index of `joint`
    pub fn lookup_joint(&self, joint: JointId) -> Option<usize> {
        self.lookup(joint.index())
    }

    /// Refresh the last observed state of every resolved joint.
    ///
    /// Sequences must already be length-checked by the caller.
    pub fn observe<T: AsRef<str>>(&mut self, names: &[T], positions: &[f64], efforts: &[f64]) {
        for joint in JointId::ALL {
            let Some(index) = self.lookup_joint(joint) else {
                continue;
            };
            let name_matches = names
                .get(index)
                .is_some_and(|name| name.as_ref() == joint.name());
            if !name_matches {
                continue;
            }
            if let (Some(&position), Some(&effort)) = (positions.get(index), efforts.get(index)) {
                self.joints[joint.index()] = Some(JointState {
                    id: joint,
                    position,
                    effort,
                    index,
                });
            }
        }
    }

    /// Last observed state of `joint`
    pub fn joint(&self, joint: JointId) -> Option<&JointState> {
        self.joints[joint.index()].as_ref()
    }

    /// Record commanded positions reported by the arm controller.
    ///
    /// Names and positions are paired by position; a length mismatch rejects
    /// the whole update.
    pub fn update_commanded<T: AsRef<str>>(
        &mut self,
        names: &[T],
        positions: &[f64],
    ) -> DetectorResult<()> {
        if names.len() != positions.len() {
            return Err(DetectorError::LengthMismatch {
                record: "arm controller state",
                field: "position",
                names: names.len(),
                values: positions.len(),
            });
        }

        for (name, &position) in names.iter().zip(positions) {
            self.commanded.insert(name.as_ref().to_string(), position);
        }
        Ok(())
    }

    /// Last commanded position reported for `name`
    pub fn commanded_position(&self, name: &str) -> Option<f64> {
        self.commanded.get(name).copied()
    }

    /// Number of joints with a commanded position
    pub fn commanded_len(&self) -> usize {
        self.commanded.len()
    }
}
