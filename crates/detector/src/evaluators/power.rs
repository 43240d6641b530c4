//! Power system evaluator
//!
//! Tracks the thermal and state-of-charge conditions separately; the power
//! subsystem is faulted while either one holds.

use faultwatch_core::Thresholds;

use crate::predicates::{is_soc_fault, is_thermal_fault};

/// Cached power inputs and per-condition fault flags
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerState {
    /// Previous SOC sample; `None` before the first usable sample
    pub last_soc: Option<f64>,
    /// Battery temperature above limit
    pub temperature_fault: bool,
    /// SOC below minimum or changing too fast
    pub soc_fault: bool,
}

impl PowerState {
    pub fn record_temperature(&mut self, temperature: f64, thresholds: &Thresholds) {
        self.temperature_fault = is_thermal_fault(temperature, thresholds);
    }

    /// Evaluate `soc` against the previous sample, then keep it as the new
    /// previous sample. A NaN sample leaves no usable previous value.
    pub fn record_soc(&mut self, soc: f64, thresholds: &Thresholds) {
        self.soc_fault = is_soc_fault(self.last_soc, soc, thresholds);
        self.last_soc = (!soc.is_nan()).then_some(soc);
    }

    pub fn is_faulted(&self) -> bool {
        self.temperature_fault || self.soc_fault
    }
}
