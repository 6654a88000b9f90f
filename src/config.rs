//! Tunable parameters and catalog tables shared by every analysis.

use serde::{Deserialize, Serialize};

use crate::connection::ConnectionCatalog;
use crate::errors::ConfigError;
use crate::material::MaterialTable;

/// Thresholds and tolerances for support inference and capacity checks.
///
/// # Example
///
/// ```
/// use cattree::AnalysisParams;
///
/// let params = AnalysisParams::default();
/// assert!((params.safety_factor - 2.0).abs() < 1e-10);
///
/// let strict = AnalysisParams::conservative();
/// assert!(strict.safety_factor > params.safety_factor);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisParams {
    /// Largest gap or embedding, in inches, between a top face and the bottom
    /// face resting on it.
    pub vertical_tolerance: f64,
    /// Smallest footprint overlap along each of X and Z, in inches, that counts
    /// as support.
    pub min_overlap: f64,
    /// Wall thickness of hollow pieces in inches.
    pub wall_thickness: f64,
    /// Multiple of the heaviest point load a resting surface must handle.
    pub safety_factor: f64,
    /// Load in pounds substituted when no point loads are supplied.
    pub default_point_load: f64,
    /// Stress ratio above which a piece gets a reinforcement recommendation.
    pub warning_stress: f64,
    /// Stress ratio above which that recommendation becomes critical.
    pub critical_stress: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            vertical_tolerance: 1.0,
            min_overlap: 2.0,
            wall_thickness: 0.75,
            safety_factor: 2.0,
            default_point_load: 15.0,
            warning_stress: 0.5,
            critical_stress: 0.75,
        }
    }
}

impl AnalysisParams {
    /// Parameters for households with several heavy, jumpy cats.
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            safety_factor: 3.0,
            default_point_load: 20.0,
            warning_stress: 0.4,
            critical_stress: 0.6,
            ..Self::default()
        }
    }

    /// Check that every parameter is within its meaningful range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("verticalTolerance", self.vertical_tolerance, self.vertical_tolerance >= 0.0),
            ("minOverlap", self.min_overlap, self.min_overlap >= 0.0),
            ("wallThickness", self.wall_thickness, self.wall_thickness >= 0.0),
            ("safetyFactor", self.safety_factor, self.safety_factor > 0.0),
            (
                "defaultPointLoad",
                self.default_point_load,
                self.default_point_load > 0.0,
            ),
            (
                "warningStress",
                self.warning_stress,
                (0.0..=1.0).contains(&self.warning_stress),
            ),
            (
                "criticalStress",
                self.critical_stress,
                (self.warning_stress..=1.0).contains(&self.critical_stress),
            ),
        ];
        // NaN fails every range check above.
        match checks.into_iter().find(|(_, _, ok)| !ok) {
            Some((name, value, _)) => Err(ConfigError::InvalidParameter { name, value }),
            None => Ok(()),
        }
    }
}

/// Everything an [`Analyzer`](crate::Analyzer) needs besides the design itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Tolerances and thresholds.
    pub params: AnalysisParams,
    /// Material constants.
    pub materials: MaterialTable,
    /// Hardware strengths and prices.
    pub connections: ConnectionCatalog,
}

impl AnalysisConfig {
    /// Parse and validate a configuration document. Omitted sections keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidParameter`] for out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use cattree::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::from_json_str(r#"{"params": {"safetyFactor": 2.5}}"#)
    ///     .expect("valid configuration");
    /// assert_eq!(config.params.safety_factor, 2.5);
    /// assert_eq!(config.params.min_overlap, 2.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.params.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AnalysisParams::default().validate().expect("defaults valid");
        AnalysisParams::conservative()
            .validate()
            .expect("conservative preset valid");
    }

    #[test]
    fn non_positive_safety_factor_is_rejected() {
        let params = AnalysisParams {
            safety_factor: 0.0,
            ..AnalysisParams::default()
        };
        match params.validate() {
            Err(ConfigError::InvalidParameter { name, .. }) => assert_eq!(name, "safetyFactor"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn critical_threshold_must_not_undercut_warning() {
        let params = AnalysisParams {
            warning_stress: 0.8,
            critical_stress: 0.7,
            ..AnalysisParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error = AnalysisConfig::from_json_str("{ params: ").expect_err("malformed");
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
