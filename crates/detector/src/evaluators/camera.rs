//! Camera trigger evaluator
//!
//! The reference trigger and the delivered trigger are recorded as they
//! arrive; a periodic check compares the two latest timestamps.

/// Latest timestamps of the reference and delivered camera triggers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraTriggerState {
    /// Reference trigger time (ns)
    pub original_ns: Option<u64>,
    /// Delivered trigger time (ns)
    pub actual_ns: Option<u64>,
}

impl CameraTriggerState {
    pub fn record_original(&mut self, stamp_ns: u64) {
        self.original_ns = Some(stamp_ns);
    }

    pub fn record_actual(&mut self, stamp_ns: u64) {
        self.actual_ns = Some(stamp_ns);
    }

    /// Faulted when the two latest trigger timestamps differ.
    pub fn is_faulted(&self) -> bool {
        self.original_ns != self.actual_ns
    }
}
