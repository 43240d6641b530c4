//! System fault aggregator
//!
//! Sole owner of the system fault word and the power detail word. Each
//! category's bits mirror that category's latest evaluation: set when
//! faulted, cleared otherwise, with no latching between evaluations.

use crate::flags::{ComponentFaultCode, FaultCategory, PowerFaultFlags, SystemFaultFlags};

/// Effect of applying one evaluation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Bits went from clear to set
    Raised,
    /// Bits went from set to clear
    Cleared,
    /// Bits already matched the result
    Unchanged,
}

/// Owns the fault bitmasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultAggregator {
    system: SystemFaultFlags,
    power: PowerFaultFlags,
}

impl FaultAggregator {
    /// Create an aggregator with every bit clear
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear exactly the bits owned by `category`.
    pub fn apply_result(&mut self, category: FaultCategory, faulted: bool) -> Transition {
        let flag = category.flag();
        let was_set = self.system.contains(flag);
        self.system.set(flag, faulted);

        match (was_set, faulted) {
            (false, true) => Transition::Raised,
            (true, false) => Transition::Cleared,
            _ => Transition::Unchanged,
        }
    }

    /// Set or clear a power detail bit.
    pub fn apply_power_detail(&mut self, detail: PowerFaultFlags, present: bool) {
        self.power.set(detail, present);
    }

    /// Current system fault word
    pub fn current_mask(&self) -> SystemFaultFlags {
        self.system
    }

    /// Current power detail word
    pub fn power_mask(&self) -> PowerFaultFlags {
        self.power
    }

    pub fn is_faulted(&self, category: FaultCategory) -> bool {
        self.system.contains(category.flag())
    }

    /// Component code implied by the current bits of `category`
    pub fn component_code(&self, category: FaultCategory) -> ComponentFaultCode {
        ComponentFaultCode::from_faulted(self.is_faulted(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut agg = FaultAggregator::new();
        assert_eq!(agg.apply_result(FaultCategory::Arm, true), Transition::Raised);
        assert_eq!(agg.current_mask(), SystemFaultFlags::ARM_EXECUTION_ERROR);
        assert_eq!(agg.component_code(FaultCategory::Arm), ComponentFaultCode::Hardware);

        assert_eq!(agg.apply_result(FaultCategory::Arm, false), Transition::Cleared);
        assert!(agg.current_mask().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let mut agg = FaultAggregator::new();
        agg.apply_result(FaultCategory::Power, true);
        let mask = agg.current_mask();
        assert_eq!(agg.apply_result(FaultCategory::Power, true), Transition::Unchanged);
        assert_eq!(agg.current_mask(), mask);

        agg.apply_result(FaultCategory::Power, false);
        assert_eq!(agg.apply_result(FaultCategory::Power, false), Transition::Unchanged);
        assert!(agg.current_mask().is_empty());
    }

    #[test]
    fn test_categories_are_independent() {
        let mut agg = FaultAggregator::new();
        agg.apply_result(FaultCategory::Camera, true);
        agg.apply_result(FaultCategory::PanTilt, true);
        agg.apply_result(FaultCategory::Camera, false);

        assert_eq!(agg.current_mask(), SystemFaultFlags::PAN_TILT_EXECUTION_ERROR);
        assert!(!agg.is_faulted(FaultCategory::Camera));

        // Same final outcomes in a different order give the same word
        let mut other = FaultAggregator::new();
        other.apply_result(FaultCategory::PanTilt, true);
        other.apply_result(FaultCategory::Camera, false);
        assert_eq!(other.current_mask(), agg.current_mask());
    }

    #[test]
    fn test_clear_leaves_reserved_bits_alone() {
        let mut agg = FaultAggregator::new();
        agg.system = SystemFaultFlags::LANDER_EXECUTION_ERROR | SystemFaultFlags::ARM_EXECUTION_ERROR;
        agg.apply_result(FaultCategory::Arm, false);
        assert_eq!(agg.current_mask(), SystemFaultFlags::LANDER_EXECUTION_ERROR);
    }

    #[test]
    fn test_power_detail() {
        let mut agg = FaultAggregator::new();
        agg.apply_power_detail(PowerFaultFlags::THERMAL, true);
        assert_eq!(agg.power_mask(), PowerFaultFlags::THERMAL);
        agg.apply_power_detail(PowerFaultFlags::THERMAL, false);
        assert!(agg.power_mask().is_empty());
    }
}
