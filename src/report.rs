//! Combined analysis results and their text rendering.

use std::fmt::Write;

use serde::Serialize;

use crate::capacity::{CapacityTest, PointLoads, Recommendation, WeakPoint};
use crate::connection::ConnectionPlan;
use crate::graph::SupportGraph;
use crate::stress::stress_color;
use crate::weight::round_tenths;

/// Headline numbers of a report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Whether every resting surface can hold the heaviest load.
    pub passed: bool,
    /// Weight of the whole structure in pounds.
    pub total_weight: f64,
    /// Heaviest tested point load in pounds.
    pub max_point_load: f64,
    /// Sum of tested point loads in pounds.
    pub total_point_load: f64,
    /// Number of tested point loads.
    pub point_load_count: usize,
    /// Safety factor applied to resting surfaces.
    pub safety_factor: f64,
    /// Number of analysed pieces.
    pub piece_count: usize,
    /// Number of inferred support relations.
    pub support_count: usize,
    /// Price of all suggested hardware in dollars.
    pub total_hardware_cost: f64,
}

/// Everything the editor needs to display after an analysis.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Headline numbers.
    pub summary: ReportSummary,
    /// Support graph with propagated loads.
    pub graph: SupportGraph,
    /// Point-load test results.
    pub test: CapacityTest,
    /// Suggested hardware.
    pub connections: ConnectionPlan,
    /// Resting surfaces that failed the test.
    pub critical_points: Vec<WeakPoint>,
    /// Advice from the test, design-wide entry first.
    pub recommendations: Vec<Recommendation>,
    /// Pieces whose support relations formed a loop.
    pub unresolved_supports: Vec<String>,
}

impl Report {
    /// Package the stage outputs of one analysis.
    #[must_use]
    pub fn assemble(
        graph: SupportGraph,
        test: CapacityTest,
        connections: ConnectionPlan,
        loads: &PointLoads,
    ) -> Self {
        let summary = ReportSummary {
            passed: test.passed,
            total_weight: round_tenths(graph.total_weight()),
            max_point_load: loads.max(),
            total_point_load: loads.total(),
            point_load_count: loads.len(),
            safety_factor: test.safety_factor,
            piece_count: graph.len(),
            support_count: graph.relation_count(),
            total_hardware_cost: connections.total_hardware_cost,
        };
        Self {
            summary,
            critical_points: test.weak_points.clone(),
            recommendations: test.recommendations.clone(),
            unresolved_supports: graph.cyclic_pieces().to_vec(),
            graph,
            test,
            connections,
        }
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; plain data never fails in practice.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render a textual summary of a report.
#[must_use]
pub fn render_summary(report: &Report) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    writeln!(
        &mut output,
        "Cat tree load check: {} ({} pieces, {} supports)",
        if summary.passed { "PASSED" } else { "FAILED" },
        summary.piece_count,
        summary.support_count
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Structure weight: {:.1} lb; heaviest cat {:.1} lb of {} ({:.1} lb total); safety factor {:.1}",
        summary.total_weight,
        summary.max_point_load,
        summary.point_load_count,
        summary.total_point_load,
        summary.safety_factor
    )
    .expect("writing to string cannot fail");

    if let Some(node) = report.graph.most_stressed() {
        writeln!(
            &mut output,
            "Most stressed piece: {} at {:.0}% ({:?})",
            node.piece.display_name(),
            node.stress_level * 100.0,
            stress_color(node.stress_level)
        )
        .expect("writing to string cannot fail");
    }

    for weak in &report.critical_points {
        writeln!(
            &mut output,
            "  weak point {}: {} (headroom {:.0} lb, needs {:.0} lb)",
            weak.name, weak.issue, weak.current_capacity, weak.required
        )
        .expect("writing to string cannot fail");
    }

    for recommendation in &report.recommendations {
        writeln!(&mut output, "  - {}", recommendation.message)
            .expect("writing to string cannot fail");
    }

    if !report.unresolved_supports.is_empty() {
        writeln!(
            &mut output,
            "Pieces resting on each other in a loop: {}",
            report.unresolved_supports.join(", ")
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "Hardware: {} connections, ${:.2}",
        report.connections.connections.len(),
        summary.total_hardware_cost
    )
    .expect("writing to string cannot fail");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::geometry::{Dimensions, Point};
    use crate::material::MaterialKind;
    use crate::piece::{Piece, PieceCategory};

    #[test]
    fn formats_human_readable_report() {
        let pieces = [
            Piece::new("base", Dimensions::new(20.0, 1.0, 20.0), Point::default()),
            Piece::new("bed", Dimensions::new(16.0, 3.0, 16.0), Point::new(0.0, 1.0, 0.0))
                .with_name("Hammock")
                .with_material(MaterialKind::Fabric)
                .with_category(PieceCategory::Perch),
        ];
        let report = Analyzer::default()
            .generate_report(&pieces, &[30.0])
            .expect("analysis runs");
        let text = render_summary(&report);
        assert!(text.starts_with("Cat tree load check: FAILED (2 pieces, 1 supports)"));
        assert!(text.contains("weak point Hammock"));
        assert!(text.contains("heaviest cat 30.0 lb of 1"));
        assert!(text.contains("Hardware: 1 connections"));
    }
}
