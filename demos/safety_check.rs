use cattree::{render_summary, Analyzer, Dimensions, MaterialKind, Piece, Point};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = Analyzer::default();

    // A post with a platform on top and a fabric hammock hung beside it
    let pieces = vec![
        Piece::new("post", Dimensions::new(4.0, 30.0, 4.0), Point::new(0.0, 0.0, 0.0))
            .with_variant("sisal-post")
            .with_material(MaterialKind::Sisal),
        Piece::new("top", Dimensions::new(16.0, 0.75, 16.0), Point::new(0.0, 30.0, 0.0))
            .with_variant("platform-square"),
        Piece::new("hammock", Dimensions::new(18.0, 3.0, 14.0), Point::new(20.0, 12.0, 0.0))
            .with_variant("hammock-perch")
            .with_material(MaterialKind::Fabric),
    ];

    // Two cats of 9 and 16 pounds
    let report = analyzer.generate_report(&pieces, &[9.0, 16.0])?;
    print!("{}", render_summary(&report));

    // Headroom left on every surface a cat can rest on
    for surface in &report.test.cat_distribution {
        println!("{} can take {:.1} lb more", surface.name, surface.max_cat_weight);
    }

    Ok(())
}
