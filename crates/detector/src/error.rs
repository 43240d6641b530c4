//! Error types for the fault detector.
//!
//! Faults themselves are data, not errors. The variants here cover the
//! cases where an input cannot be evaluated at all or a record could not
//! be handed to the transport.

use thiserror::Error;

/// Errors raised by the detector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectorError {
    /// A record's parallel sequences disagree in length
    #[error("Malformed {record}: {names} names but {values} {field} values")]
    LengthMismatch {
        /// Record type that was rejected
        record: &'static str,
        /// Sequence that disagreed with the name list
        field: &'static str,
        /// Number of joint names
        names: usize,
        /// Number of values in the mismatching sequence
        values: usize,
    },

    /// Configured joint name is not part of the joint table
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    /// Detector configured without any watched arm joint
    #[error("No arm joints are watched")]
    NoWatchedJoints,

    /// Status record could not be handed to the transport
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for detector operations.
pub type DetectorResult<T> = Result<T, DetectorError>;
