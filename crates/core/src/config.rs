//! Configuration management for Faultwatch.
//!
//! The detector only needs a handful of numeric thresholds, the set of
//! watched arm joints, and the frame label stamped on outgoing records.
//! All of them have compiled-in defaults; a TOML file may override any
//! subset.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sentinel reading reported by a stuck or disconnected joint sensor.
pub const FAULT_ZERO_TELEMETRY: f64 = 0.0;
/// Battery temperature above which the power system is faulted (Celsius).
pub const THERMAL_MAX: f64 = 50.0;
/// State of charge at or below which the power system is faulted.
pub const SOC_MIN: f64 = 0.1;
/// Relative SOC change between consecutive samples that counts as a fault.
pub const SOC_MAX_DIFF: f64 = 0.05;
/// Frame label stamped on every outgoing status record.
pub const DEFAULT_FRAME_ID: &str = "world";
/// Cadence of the camera trigger comparison.
pub const CAMERA_CHECK_INTERVAL_MS: u64 = 100;
/// Arm joints whose telemetry is checked for the zero sentinel.
pub const DEFAULT_WATCHED_JOINTS: [&str; 2] = ["j_hand_yaw", "j_scoop_yaw"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub detector: DetectorConfig,
    pub node: NodeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub thresholds: Thresholds,
    /// Joint names, resolved against the fixed joint table by the detector.
    pub watched_joints: Vec<String>,
    pub frame_id: String,
    pub camera_check_interval_ms: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            watched_joints: DEFAULT_WATCHED_JOINTS.iter().map(|j| j.to_string()).collect(),
            frame_id: DEFAULT_FRAME_ID.to_string(),
            camera_check_interval_ms: CAMERA_CHECK_INTERVAL_MS,
        }
    }
}

/// Numeric limits used by the anomaly predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub fault_zero_telemetry: f64,
    pub thermal_max: f64,
    pub soc_min: f64,
    pub soc_max_diff: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fault_zero_telemetry: FAULT_ZERO_TELEMETRY,
            thermal_max: THERMAL_MAX,
            soc_min: SOC_MIN,
            soc_max_diff: SOC_MAX_DIFF,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    /// Reject values the detector cannot run with.
    pub fn validate(&self) -> Result<()> {
        let d = &self.detector;
        let t = &d.thresholds;

        let finite = [
            ("fault_zero_telemetry", t.fault_zero_telemetry),
            ("thermal_max", t.thermal_max),
            ("soc_min", t.soc_min),
            ("soc_max_diff", t.soc_max_diff),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CoreError::InvalidConfig(format!("{name} must be finite")));
        }
        if t.soc_max_diff <= 0.0 {
            return Err(CoreError::InvalidConfig(
                "soc_max_diff must be positive".to_string(),
            ));
        }
        if d.watched_joints.is_empty() {
            return Err(CoreError::InvalidConfig(
                "watched_joints must name at least one joint".to_string(),
            ));
        }
        if d.frame_id.trim().is_empty() {
            return Err(CoreError::InvalidConfig("frame_id must not be empty".to_string()));
        }
        if d.camera_check_interval_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "camera_check_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.detector.frame_id, "world");
        assert_eq!(config.detector.camera_check_interval_ms, 100);
        assert_eq!(config.detector.watched_joints, vec!["j_hand_yaw", "j_scoop_yaw"]);
        assert_eq!(config.node.log_format, LogFormat::Text);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [detector.thresholds]
            thermal_max = 42.5

            [node]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.detector.thresholds.thermal_max, 42.5);
        assert_eq!(config.detector.thresholds.soc_min, SOC_MIN);
        assert_eq!(config.detector.frame_id, DEFAULT_FRAME_ID);
        assert_eq!(config.node.log_format, LogFormat::Json);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[detector]\nframe_id = \"lander\"\nwatched_joints = [\"j_grinder\"]"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.detector.frame_id, "lander");
        assert_eq!(config.detector.watched_joints, vec!["j_grinder"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_file("/nonexistent/faultwatch.toml").unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default_config();
        config.detector.thresholds.soc_max_diff = 0.0;
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));

        let mut config = Config::default_config();
        config.detector.thresholds.thermal_max = f64::NAN;
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));

        let mut config = Config::default_config();
        config.detector.watched_joints.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.detector.camera_check_interval_ms = 0;
        assert!(config.validate().is_err());

        assert!(matches!(
            Config::from_toml_str("detector = 3"),
            Err(CoreError::ConfigParse(_))
        ));
    }
}
