//! Antenna pan/tilt evaluator

/// Cached command and set-point for one antenna axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AntennaAxisState {
    /// Set-point last reported by the axis controller
    pub set_point: Option<f64>,
    /// Last command value seen for the axis
    pub last_command: Option<f64>,
}

impl AntennaAxisState {
    pub fn record_set_point(&mut self, set_point: f64) {
        self.set_point = Some(set_point);
    }

    /// Store `command` and evaluate it against the current set-point.
    pub fn record_command(&mut self, command: f64) -> bool {
        self.last_command = Some(command);
        evaluate_antenna(command, self.set_point)
    }
}

/// Faulted when the command differs from the set-point. Both are compared
/// exactly at single precision, the resolution of the axis controller.
/// With no set-point reported yet the axis is not faulted.
pub fn evaluate_antenna(command: f64, set_point: Option<f64>) -> bool {
    set_point.is_some_and(|set_point| command as f32 != set_point as f32)
}
