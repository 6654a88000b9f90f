//! Point-load checks for the surfaces cats rest on.

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisParams;
use crate::errors::AnalysisError;
use crate::graph::SupportGraph;
use crate::material::MaterialTable;
use crate::piece::Piece;
use crate::weight::round_tenths;

/// Non-empty list of positive point loads in pounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PointLoads {
    /// Loads in the order supplied.
    loads: Vec<f64>,
}

impl PointLoads {
    /// Validate `loads`, substituting `[default_load]` when the list is empty.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidPointLoad`] for the first load that is not
    /// a positive finite number.
    pub fn new(loads: Vec<f64>, default_load: f64) -> Result<Self, AnalysisError> {
        if let Some((index, &value)) = loads
            .iter()
            .enumerate()
            .find(|(_, load)| !(load.is_finite() && **load > 0.0))
        {
            return Err(AnalysisError::InvalidPointLoad { index, value });
        }
        if loads.is_empty() {
            return Self::new(vec![default_load], default_load);
        }
        Ok(Self { loads })
    }

    /// Heaviest single load.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.loads.iter().copied().fold(0.0, f64::max)
    }

    /// Sum of all loads.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.loads.iter().sum()
    }

    /// Number of loads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Whether there are no loads; never true for a constructed list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Loads in the order supplied.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.loads
    }
}

/// How much more a resting surface can take.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceCapacity {
    /// Piece id.
    pub piece_id: String,
    /// Display name.
    pub name: String,
    /// Raw footprint capacity in pounds.
    pub capacity: f64,
    /// Load already carried in pounds.
    pub existing_load: f64,
    /// Heaviest additional point load the surface can still take with the safety factor.
    pub max_cat_weight: f64,
    /// Whether the heaviest tested load fits.
    pub can_hold_cat: bool,
}

/// A resting surface that cannot take the heaviest tested load.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakPoint {
    /// Piece id.
    pub piece_id: String,
    /// Display name.
    pub name: String,
    /// Explanation of the shortfall.
    pub issue: String,
    /// Remaining headroom in pounds, floored at zero and rounded.
    pub current_capacity: f64,
    /// Load the surface would have to carry, rounded.
    pub required: f64,
}

/// Urgency of a recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// The design as a whole fails the load test.
    Design,
    /// Stress above the critical threshold.
    Critical,
    /// Stress above the warning threshold.
    Warning,
}

/// Advice attached to a stressed piece or to the design as a whole.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Affected piece, absent for design-wide advice.
    pub piece_id: Option<String>,
    /// Urgency.
    pub severity: Severity,
    /// Stress level of the piece, absent for design-wide advice.
    pub stress_level: Option<f64>,
    /// Advice text.
    pub message: String,
}

/// Outcome of testing a design against its point loads.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityTest {
    /// True unless some resting surface cannot hold the heaviest load.
    pub passed: bool,
    /// Failing resting surfaces.
    pub weak_points: Vec<WeakPoint>,
    /// Advice for stressed pieces, led by design-wide advice when the test failed.
    pub recommendations: Vec<Recommendation>,
    /// Headroom of every resting surface.
    pub cat_distribution: Vec<SurfaceCapacity>,
    /// Sum of raw capacities of all resting surfaces in pounds.
    pub total_capacity: f64,
    /// Safety factor the surfaces were tested with.
    pub safety_factor: f64,
}

impl CapacityTest {
    /// Test every resting surface in `pieces` against the heaviest of `loads`.
    ///
    /// `graph` must have been propagated so existing loads are current.
    ///
    /// # Panics
    ///
    /// Debug builds panic when `graph` has not been propagated.
    #[must_use]
    pub fn run(
        pieces: &[Piece],
        loads: &PointLoads,
        graph: &SupportGraph,
        materials: &MaterialTable,
        params: &AnalysisParams,
    ) -> Self {
        debug_assert!(
            graph.is_propagated(),
            "support graph must be propagated before testing point loads"
        );
        let safety_factor = params.safety_factor;
        let heaviest = loads.max();
        let mut weak_points = Vec::new();
        let mut cat_distribution = Vec::new();
        let mut total_capacity = 0.0;

        for piece in pieces.iter().filter(|piece| piece.category.is_resting_surface()) {
            let existing_load = graph.node(&piece.id).map_or(0.0, |node| node.total_load);
            let capacity = materials.profile(piece.material).base_capacity
                * piece.dimensions.footprint_area();
            let allowed = capacity / safety_factor;
            let required = existing_load + heaviest;
            let can_hold_cat = required < allowed;
            let headroom = (allowed - existing_load).max(0.0);
            debug!(piece = %piece.id, capacity, required, can_hold_cat, "resting surface tested");

            if !can_hold_cat {
                weak_points.push(WeakPoint {
                    piece_id: piece.id.clone(),
                    name: piece.display_name().to_owned(),
                    issue: format!("Cannot safely support a {heaviest} lb cat"),
                    current_capacity: headroom.round(),
                    required: required.round(),
                });
            }
            cat_distribution.push(SurfaceCapacity {
                piece_id: piece.id.clone(),
                name: piece.display_name().to_owned(),
                capacity,
                existing_load,
                max_cat_weight: round_tenths(headroom),
                can_hold_cat,
            });
            total_capacity += capacity;
        }

        let passed = weak_points.is_empty();
        let mut recommendations = Vec::new();
        if !passed {
            recommendations.push(Recommendation {
                piece_id: None,
                severity: Severity::Design,
                stress_level: None,
                message: format!(
                    "Overall design cannot safely hold a {heaviest} lb cat; \
                     add supports under the weak surfaces or use stronger materials"
                ),
            });
        }
        recommendations.extend(stress_recommendations(graph, params));

        Self {
            passed,
            weak_points,
            recommendations,
            cat_distribution,
            total_capacity,
            safety_factor,
        }
    }

    /// Piece-level recommendations, without the design-wide entry.
    pub fn piece_recommendations(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations
            .iter()
            .filter(|recommendation| recommendation.piece_id.is_some())
    }
}

/// One recommendation per piece whose stress exceeds the warning threshold.
fn stress_recommendations(graph: &SupportGraph, params: &AnalysisParams) -> Vec<Recommendation> {
    graph
        .nodes()
        .filter(|node| node.stress_level > params.warning_stress)
        .map(|node| {
            let percent = (node.stress_level * 100.0).round();
            let name = node.piece.display_name();
            let (severity, message) = if node.stress_level > params.critical_stress {
                (
                    Severity::Critical,
                    format!("{name}: critical stress ({percent}%), add reinforcement"),
                )
            } else {
                (
                    Severity::Warning,
                    format!("{name}: high stress ({percent}%), consider a bracket"),
                )
            };
            Recommendation {
                piece_id: Some(node.id().to_owned()),
                severity,
                stress_level: Some(node.stress_level),
                message,
            }
        })
        .collect()
}
