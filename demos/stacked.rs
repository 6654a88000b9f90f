use cattree::{Analyzer, Dimensions, Piece, Point};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two identical boards, one resting directly on the other
    let lower = Piece::new("lower", Dimensions::new(12.0, 1.0, 12.0), Point::new(0.0, 0.0, 0.0));
    let upper = Piece::new("upper", Dimensions::new(12.0, 1.0, 12.0), Point::new(0.0, 1.0, 0.0));

    // Infer the support graph and propagate loads
    let graph = Analyzer::default().build_support_graph(&[lower, upper])?;

    // Print what each board carries
    for node in graph.nodes() {
        println!(
            "{}: weight {:.1} lb, carries {:.1} lb, stress {:.4}",
            node.id(),
            node.weight,
            node.total_load,
            node.stress_level
        );
    }

    Ok(())
}
