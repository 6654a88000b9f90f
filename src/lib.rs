#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod analysis;
mod capacity;
mod config;
mod connection;
mod errors;
mod geometry;
mod graph;
mod material;
mod piece;
mod report;
mod stress;
mod weight;

pub use analysis::Analyzer;
pub use capacity::{
    CapacityTest, PointLoads, Recommendation, Severity, SurfaceCapacity, WeakPoint,
};
pub use config::{AnalysisConfig, AnalysisParams};
pub use connection::{
    ConnectionCatalog, ConnectionKind, ConnectionPlan, ConnectionRecommendation, ConnectionSpec,
};
pub use errors::{AnalysisError, ConfigError};
pub use geometry::{Dimensions, FootprintOverlap, Point, Span};
pub use graph::{stress_ratio, Contact, SupportGraph, SupportNode};
pub use material::{MaterialKind, MaterialProfile, MaterialTable};
pub use piece::{Design, Piece, PieceCategory, PieceShape};
pub use report::{render_summary, Report, ReportSummary};
pub use stress::{stress_color, StressBand};
pub use weight::{estimate_weight, piece_volume};
