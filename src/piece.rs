//! Placed parts of a cat tree design, as supplied by the editor.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::geometry::{Dimensions, Point};
use crate::material::MaterialKind;

/// Functional role of a piece in the design.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceCategory {
    /// Flat shelf a cat can stand on.
    Platform,
    /// Small top perch or cradle.
    Perch,
    /// Enclosed condo or cube.
    House,
    /// Vertical scratching post.
    Post,
    /// Floor base.
    Base,
    /// Ramp or ladder.
    Ramp,
    /// Decorative or unclassified part.
    #[default]
    #[serde(other)]
    Other,
}

impl PieceCategory {
    /// Derive a category from a catalog variant tag such as `"platform-round-18"`.
    ///
    /// Intended to be called once when a piece is created, not on every analysis.
    ///
    /// # Examples
    /// ```
    /// use cattree::PieceCategory;
    ///
    /// assert_eq!(PieceCategory::from_variant_id("sisal-post-24"), PieceCategory::Post);
    /// assert_eq!(PieceCategory::from_variant_id("Cat-House-Cube"), PieceCategory::House);
    /// assert_eq!(PieceCategory::from_variant_id("toy-ball"), PieceCategory::Other);
    /// ```
    #[must_use]
    pub fn from_variant_id(variant_id: &str) -> Self {
        let tag = variant_id.to_ascii_lowercase();
        [
            ("platform", PieceCategory::Platform),
            ("perch", PieceCategory::Perch),
            ("house", PieceCategory::House),
            ("post", PieceCategory::Post),
            ("base", PieceCategory::Base),
            ("ramp", PieceCategory::Ramp),
        ]
        .into_iter()
        .find(|(needle, _)| tag.contains(needle))
        .map_or(PieceCategory::Other, |(_, category)| category)
    }

    /// Whether a cat is expected to rest on pieces of this category.
    #[must_use]
    pub const fn is_resting_surface(self) -> bool {
        matches!(
            self,
            PieceCategory::Platform | PieceCategory::Perch | PieceCategory::House
        )
    }
}

/// Shape tag used when computing volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceShape {
    /// Rectangular block.
    #[default]
    Box,
    /// Upright cylinder whose diameter is the piece width.
    Cylinder,
    /// Any other shape, estimated as a block.
    #[serde(other)]
    Other,
}

/// A placed, dimensioned part. The engine never mutates pieces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    /// Unique identifier within a design.
    pub id: String,
    /// Display name. Empty names are reported using the id.
    #[serde(default)]
    pub name: String,
    /// Catalog variant tag.
    #[serde(default)]
    pub variant_id: String,
    /// Functional role.
    #[serde(default)]
    pub category: PieceCategory,
    /// Outer extents in inches.
    #[serde(flatten)]
    pub dimensions: Dimensions,
    /// Footprint centre and bottom elevation in inches.
    #[serde(flatten)]
    pub position: Point,
    /// Whether the piece is a shell rather than a solid block.
    #[serde(default)]
    pub hollow: bool,
    /// Shape tag.
    #[serde(default)]
    pub shape: PieceShape,
    /// Material; absent means the baseline material.
    #[serde(default)]
    pub material: Option<MaterialKind>,
    /// Catalog price, carried through untouched.
    #[serde(default)]
    pub cost: f64,
}

impl Piece {
    /// Create a solid wooden box piece with the given id, extents and position.
    ///
    /// # Examples
    /// ```
    /// use cattree::{Dimensions, Piece, PieceCategory, Point};
    ///
    /// let shelf = Piece::new("shelf", Dimensions::new(24.0, 0.75, 16.0), Point::new(0.0, 30.0, 0.0))
    ///     .with_category(PieceCategory::Platform);
    /// assert_eq!(shelf.top(), 30.75);
    /// assert_eq!(shelf.display_name(), "shelf");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, dimensions: Dimensions, position: Point) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            variant_id: String::new(),
            category: PieceCategory::Other,
            dimensions,
            position,
            hollow: false,
            shape: PieceShape::Box,
            material: None,
            cost: 0.0,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the catalog variant and derive the category from it.
    #[must_use]
    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = variant_id.into();
        self.category = PieceCategory::from_variant_id(&self.variant_id);
        self
    }

    /// Set the functional category explicitly.
    #[must_use]
    pub fn with_category(mut self, category: PieceCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the material.
    #[must_use]
    pub fn with_material(mut self, material: MaterialKind) -> Self {
        self.material = Some(material);
        self
    }

    /// Set the shape tag.
    #[must_use]
    pub fn with_shape(mut self, shape: PieceShape) -> Self {
        self.shape = shape;
        self
    }

    /// Mark the piece as hollow.
    #[must_use]
    pub fn hollow(mut self) -> Self {
        self.hollow = true;
        self
    }

    /// Elevation of the top face.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.position.y + self.dimensions.height
    }

    /// Name used in reports.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A saved design: the pieces plus the loads to test them with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    /// Placed pieces.
    #[serde(default)]
    pub pieces: Vec<Piece>,
    /// Point loads in pounds; empty means the configured default load.
    #[serde(default)]
    pub point_loads: Vec<f64>,
}

impl Design {
    /// Parse a design from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `json` does not describe a design.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
