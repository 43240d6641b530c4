//! Anomaly predicates
//!
//! Pure comparisons of one or two telemetry values against the configured
//! thresholds. Non-finite inputs are compared numerically like any other
//! value and never raise an error.

use faultwatch_core::Thresholds;

/// True when a joint position or effort reads exactly the stuck-sensor sentinel.
pub fn is_zero_telemetry(value: f64, thresholds: &Thresholds) -> bool {
    value == thresholds.fault_zero_telemetry
}

/// True when the battery temperature exceeds the thermal limit.
pub fn is_thermal_fault(temperature: f64, thresholds: &Thresholds) -> bool {
    temperature > thresholds.thermal_max
}

/// True when the state of charge is at or below the minimum, or when it moved
/// by at least `soc_max_diff` relative to the previous sample.
///
/// Without a previous sample only the absolute minimum can fire. A previous
/// value of zero makes any change infinite and therefore a fault.
pub fn is_soc_fault(previous: Option<f64>, current: f64, thresholds: &Thresholds) -> bool {
    current <= thresholds.soc_min
        || previous.is_some_and(|prev| (prev - current).abs() / prev >= thresholds.soc_max_diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds {
            soc_min: 0.1,
            soc_max_diff: 0.5,
            ..Thresholds::default()
        }
    }

    #[test]
    fn test_zero_telemetry_is_exact() {
        let t = Thresholds::default();
        assert!(is_zero_telemetry(0.0, &t));
        assert!(is_zero_telemetry(-0.0, &t));
        assert!(!is_zero_telemetry(1e-12, &t));
        assert!(!is_zero_telemetry(f64::NAN, &t));
    }

    #[test]
    fn test_thermal_limit_is_exclusive() {
        let t = Thresholds::default();
        assert!(!is_thermal_fault(t.thermal_max, &t));
        assert!(is_thermal_fault(t.thermal_max + 0.1, &t));
        assert!(!is_thermal_fault(-20.0, &t));
    }

    #[test]
    fn test_soc_first_sample_only_checks_minimum() {
        let t = thresholds();
        assert!(!is_soc_fault(None, 0.5, &t));
        assert!(is_soc_fault(None, 0.1, &t));
        assert!(is_soc_fault(None, 0.05, &t));
    }

    #[test]
    fn test_soc_relative_jump_uses_previous_sample() {
        let t = thresholds();
        assert!(!is_soc_fault(Some(0.5), 0.3, &t));
        assert!(is_soc_fault(Some(0.5), 0.25, &t));
        // |0.05 - 0.5| / 0.05 = 9.0
        assert!(is_soc_fault(Some(0.05), 0.5, &t));
    }

    #[test]
    fn test_soc_nan_compares_false() {
        let t = thresholds();
        assert!(!is_soc_fault(Some(0.5), f64::NAN, &t));
        assert!(!is_soc_fault(None, f64::NAN, &t));
    }
}
