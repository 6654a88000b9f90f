//! Entry point that runs every analysis stage with one shared configuration.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::capacity::{CapacityTest, PointLoads};
use crate::config::AnalysisConfig;
use crate::connection::ConnectionPlan;
use crate::errors::{AnalysisError, ConfigError};
use crate::graph::SupportGraph;
use crate::piece::{Design, Piece};
use crate::report::Report;
use crate::weight::estimate_weight;

/// Structural analyzer for cat tree designs.
///
/// The configuration is validated once and shared immutably; every call builds
/// fresh results from its arguments, so one analyzer can serve any number of
/// designs and threads.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    /// Parameters and catalogs shared by every call.
    config: Arc<AnalysisConfig>,
}

impl Analyzer {
    /// Create an analyzer from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] when a parameter is out of range.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        Self::shared(Arc::new(config))
    }

    /// Create an analyzer that shares an existing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] when a parameter is out of range.
    pub fn shared(config: Arc<AnalysisConfig>) -> Result<Self, ConfigError> {
        config.params.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Estimated weight of `piece` in pounds.
    #[must_use]
    pub fn estimate_weight(&self, piece: &Piece) -> f64 {
        estimate_weight(
            piece,
            &self.config.materials,
            self.config.params.wall_thickness,
        )
    }

    /// Infer the support graph of `pieces` and propagate loads through it.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DuplicatePiece`] when two pieces share an id.
    ///
    /// # Examples
    /// ```
    /// use cattree::{Analyzer, Dimensions, Piece, Point};
    ///
    /// let pieces = [
    ///     Piece::new("a", Dimensions::new(12.0, 1.0, 12.0), Point::new(0.0, 0.0, 0.0)),
    ///     Piece::new("b", Dimensions::new(12.0, 1.0, 12.0), Point::new(0.0, 1.0, 0.0)),
    /// ];
    /// let graph = Analyzer::default().build_support_graph(&pieces)?;
    /// let a = graph.node("a").expect("a is analysed");
    /// assert_eq!(a.supporting, ["b"]);
    /// assert_eq!(a.total_load, 5.2);
    /// # Ok::<(), cattree::AnalysisError>(())
    /// ```
    pub fn build_support_graph(&self, pieces: &[Piece]) -> Result<SupportGraph, AnalysisError> {
        let mut graph = SupportGraph::build(pieces, &self.config)?;
        graph.propagate_loads(&self.config.materials);
        debug!(
            pieces = graph.len(),
            supports = graph.relation_count(),
            "support graph built"
        );
        Ok(graph)
    }

    /// Validate point loads, substituting the default load for an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidPointLoad`] for a non-positive or non-finite load.
    pub fn point_loads(&self, loads: &[f64]) -> Result<PointLoads, AnalysisError> {
        let default_load = self.config.params.default_point_load;
        if loads.is_empty() {
            warn!(default_load, "no point loads supplied; testing with the default load");
        }
        PointLoads::new(loads.to_vec(), default_load)
    }

    /// Test the resting surfaces of `pieces` against `loads`.
    #[must_use]
    pub fn test_point_loads(
        &self,
        pieces: &[Piece],
        loads: &PointLoads,
        graph: &SupportGraph,
    ) -> CapacityTest {
        CapacityTest::run(
            pieces,
            loads,
            graph,
            &self.config.materials,
            &self.config.params,
        )
    }

    /// Suggest hardware for every contact in `graph` and total its price.
    #[must_use]
    pub fn recommend_connections(&self, graph: &SupportGraph) -> ConnectionPlan {
        ConnectionPlan::from_graph(graph, &self.config.connections)
    }

    /// Run every stage on `pieces` and package the results.
    ///
    /// An empty `loads` slice is tested with the configured default load.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] for duplicate piece ids or invalid point loads.
    pub fn generate_report(&self, pieces: &[Piece], loads: &[f64]) -> Result<Report, AnalysisError> {
        let loads = self.point_loads(loads)?;
        let graph = self.build_support_graph(pieces)?;
        let test = self.test_point_loads(pieces, &loads, &graph);
        let connections = self.recommend_connections(&graph);
        let report = Report::assemble(graph, test, connections, &loads);
        info!(
            passed = report.summary.passed,
            weak_points = report.critical_points.len(),
            total_weight = report.summary.total_weight,
            "design analysed"
        );
        Ok(report)
    }

    /// Analyse a saved design with its own point loads.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] for duplicate piece ids or invalid point loads.
    pub fn analyze(&self, design: &Design) -> Result<Report, AnalysisError> {
        self.generate_report(&design.pieces, &design.point_loads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisParams;
    use crate::geometry::{Dimensions, Point};
    use crate::piece::PieceCategory;

    fn shelf() -> Piece {
        Piece::new("shelf", Dimensions::new(24.0, 0.75, 16.0), Point::default())
            .with_category(PieceCategory::Platform)
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = AnalysisConfig {
            params: AnalysisParams {
                safety_factor: -1.0,
                ..AnalysisParams::default()
            },
            ..AnalysisConfig::default()
        };
        assert!(Analyzer::new(config).is_err());
    }

    #[test]
    fn empty_loads_are_tested_with_default() {
        let report = Analyzer::default()
            .generate_report(&[shelf()], &[])
            .expect("analysis runs");
        assert_eq!(report.summary.point_load_count, 1);
        assert_eq!(report.summary.max_point_load, 15.0);
    }

    #[test]
    fn empty_design_passes_vacuously() {
        let report = Analyzer::default()
            .generate_report(&[], &[12.0])
            .expect("analysis runs");
        assert!(report.summary.passed);
        assert_eq!(report.summary.total_weight, 0.0);
        assert_eq!(report.summary.total_hardware_cost, 0.0);
        assert!(report.graph.is_empty());
    }

    #[test]
    fn safety_factor_comes_from_configuration() {
        let config = AnalysisConfig {
            params: AnalysisParams::conservative(),
            ..AnalysisConfig::default()
        };
        let analyzer = Analyzer::new(config).expect("valid configuration");
        let report = analyzer
            .generate_report(&[shelf()], &[12.0])
            .expect("analysis runs");
        assert_eq!(report.summary.safety_factor, 3.0);
        assert_eq!(report.test.safety_factor, 3.0);
    }

    #[test]
    fn shared_configuration_is_not_copied() {
        let config = Arc::new(AnalysisConfig::default());
        let first = Analyzer::shared(Arc::clone(&config)).expect("valid configuration");
        let second = first.clone();
        assert!(std::ptr::eq(first.config(), second.config()));
        assert_eq!(Arc::strong_count(&config), 3);
    }
}
