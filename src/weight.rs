//! Weight estimates from geometry and material density.

use std::f64::consts::PI;

use crate::geometry::Dimensions;
use crate::material::MaterialTable;
use crate::piece::{Piece, PieceShape};

/// Round to one decimal place.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Volume in cubic inches of a solid with the given shape and extents.
fn solid_volume(shape: PieceShape, dimensions: Dimensions) -> f64 {
    match shape {
        PieceShape::Cylinder => {
            let radius = dimensions.width / 2.0;
            PI * radius * radius * dimensions.height
        }
        PieceShape::Box | PieceShape::Other => {
            dimensions.width * dimensions.height * dimensions.depth
        }
    }
}

/// Material volume of `piece` in cubic inches.
///
/// Hollow pieces are shells: the outer volume minus the volume left after
/// insetting every extent by `wall_thickness` on both sides.
#[must_use]
pub fn piece_volume(piece: &Piece, wall_thickness: f64) -> f64 {
    let outer = solid_volume(piece.shape, piece.dimensions);
    if piece.hollow {
        let inner = solid_volume(piece.shape, piece.dimensions.inset(wall_thickness));
        outer - inner.max(0.0)
    } else {
        outer
    }
}

/// Estimated weight of `piece` in pounds, rounded to one decimal place.
///
/// # Examples
/// ```
/// use cattree::{estimate_weight, Dimensions, MaterialTable, Piece, Point};
///
/// let board = Piece::new("board", Dimensions::new(12.0, 1.0, 12.0), Point::default());
/// // 144 cubic inches of wood at 0.018 lb per cubic inch.
/// assert_eq!(estimate_weight(&board, &MaterialTable::default(), 0.75), 2.6);
/// ```
#[must_use]
pub fn estimate_weight(piece: &Piece, materials: &MaterialTable, wall_thickness: f64) -> f64 {
    let density = materials.profile(piece.material).density;
    round_tenths(piece_volume(piece, wall_thickness) * density)
}
