//! Error types produced while configuring or running a structural analysis.

use thiserror::Error;

/// Error returned when an analysis cannot be run on the supplied input.
///
/// Capacity shortfalls are not errors: a failing design is reported through
/// [`CapacityTest::passed`](crate::CapacityTest::passed). These variants only
/// describe input the engine cannot interpret.
///
/// # Examples
///
/// ```
/// use cattree::{AnalysisError, PointLoads};
///
/// let error = PointLoads::new(vec![12.0, -3.0], 15.0).expect_err("negative load rejected");
/// assert_eq!(error, AnalysisError::InvalidPointLoad { index: 1, value: -3.0 });
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when two pieces in the same design share an identifier.
    #[error("piece id {0:?} is used more than once")]
    DuplicatePiece(String),
    /// Returned when a point load is zero, negative or not finite.
    #[error("point load #{index} must be a positive weight (received {value})")]
    InvalidPointLoad {
        /// Position of the rejected load in the supplied list.
        index: usize,
        /// Rejected load in pounds.
        value: f64,
    },
}

/// Error returned when loading or validating an analysis configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration document is not valid JSON for the schema.
    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when a tuning parameter is outside its meaningful range.
    #[error("parameter {name} is out of range (received {value})")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
