//! Hardware suggestions for contacts between pieces.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::SupportGraph;

/// Ways of fastening one piece onto another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionKind {
    /// Resting without fasteners.
    #[default]
    None,
    /// Wood screws.
    Screws,
    /// Small L bracket.
    LightBracket,
    /// Heavy-duty angle bracket.
    HeavyBracket,
    /// Bolt through both pieces.
    ThroughBolt,
    /// Glue plus screws.
    GlueScrews,
    /// Metal mending plate.
    MetalPlate,
}

/// Area below which a contact counts as small, in square inches.
const SMALL_CONTACT: f64 = 4.0;
/// Area below which a contact counts as medium, in square inches.
const MEDIUM_CONTACT: f64 = 16.0;

impl ConnectionKind {
    /// Every kind in the catalog.
    pub const ALL: [ConnectionKind; 7] = [
        ConnectionKind::None,
        ConnectionKind::Screws,
        ConnectionKind::LightBracket,
        ConnectionKind::HeavyBracket,
        ConnectionKind::ThroughBolt,
        ConnectionKind::GlueScrews,
        ConnectionKind::MetalPlate,
    ];

    /// Suggest hardware for a contact of `overlap_area` square inches carrying a
    /// piece that weighs `upper_weight` pounds.
    ///
    /// Smaller contacts and heavier pieces get stronger hardware.
    ///
    /// # Examples
    /// ```
    /// use cattree::ConnectionKind;
    ///
    /// assert_eq!(ConnectionKind::suggest(3.0, 25.0), ConnectionKind::MetalPlate);
    /// assert_eq!(ConnectionKind::suggest(3.0, 5.0), ConnectionKind::HeavyBracket);
    /// assert_eq!(ConnectionKind::suggest(144.0, 2.6), ConnectionKind::Screws);
    /// ```
    #[must_use]
    pub fn suggest(overlap_area: f64, upper_weight: f64) -> Self {
        if overlap_area < SMALL_CONTACT {
            if upper_weight > 20.0 {
                ConnectionKind::MetalPlate
            } else {
                ConnectionKind::HeavyBracket
            }
        } else if overlap_area < MEDIUM_CONTACT {
            if upper_weight > 15.0 {
                ConnectionKind::HeavyBracket
            } else {
                ConnectionKind::LightBracket
            }
        } else if upper_weight > 10.0 {
            ConnectionKind::GlueScrews
        } else {
            ConnectionKind::Screws
        }
    }
}

/// Strength and price of one kind of hardware.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSpec {
    /// Human-readable label.
    pub label: String,
    /// Load rating in pounds.
    pub strength: f64,
    /// Price per connection in dollars.
    pub unit_cost: f64,
}

impl ConnectionSpec {
    /// Built-in rating and price for `kind`.
    #[must_use]
    pub fn builtin(kind: ConnectionKind) -> Self {
        let (label, strength, unit_cost) = match kind {
            ConnectionKind::None => ("No hardware", 0.0, 0.0),
            ConnectionKind::Screws => ("Wood screws", 20.0, 0.5),
            ConnectionKind::LightBracket => ("Light L-bracket", 40.0, 2.5),
            ConnectionKind::HeavyBracket => ("Heavy-duty bracket", 80.0, 5.0),
            ConnectionKind::ThroughBolt => ("Through-bolt", 120.0, 3.0),
            ConnectionKind::GlueScrews => ("Glue + screws", 50.0, 1.5),
            ConnectionKind::MetalPlate => ("Metal mending plate", 150.0, 8.0),
        };
        Self {
            label: label.to_owned(),
            strength,
            unit_cost,
        }
    }
}

/// Immutable hardware catalog keyed by connection kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionCatalog {
    /// Specs keyed by kind.
    specs: HashMap<ConnectionKind, ConnectionSpec>,
}

impl Default for ConnectionCatalog {
    fn default() -> Self {
        Self {
            specs: ConnectionKind::ALL
                .iter()
                .map(|&kind| (kind, ConnectionSpec::builtin(kind)))
                .collect(),
        }
    }
}

impl ConnectionCatalog {
    /// Spec for `kind`, falling back to the built-in entry when the catalog omits it.
    #[must_use]
    pub fn spec(&self, kind: ConnectionKind) -> ConnectionSpec {
        self.specs
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ConnectionSpec::builtin(kind))
    }
}

/// Hardware suggested for one contact.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecommendation {
    /// Piece underneath.
    pub lower: String,
    /// Piece resting on top.
    pub upper: String,
    /// Suggested kind.
    pub kind: ConnectionKind,
    /// Catalog label of the suggested kind.
    pub label: String,
    /// Contact area in square inches.
    pub overlap_area: f64,
    /// Price of this connection in dollars.
    pub unit_cost: f64,
}

/// All suggested hardware for a design and its total price.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPlan {
    /// One entry per contact, in graph order.
    pub connections: Vec<ConnectionRecommendation>,
    /// Sum of unit costs in dollars.
    pub total_hardware_cost: f64,
}

impl ConnectionPlan {
    /// Price every contact recorded in `graph`.
    #[must_use]
    pub fn from_graph(graph: &SupportGraph, catalog: &ConnectionCatalog) -> Self {
        let connections: Vec<ConnectionRecommendation> = graph
            .nodes()
            .flat_map(|node| node.connections.iter())
            .map(|contact| {
                let spec = catalog.spec(contact.connection);
                ConnectionRecommendation {
                    lower: contact.lower.clone(),
                    upper: contact.upper.clone(),
                    kind: contact.connection,
                    label: spec.label,
                    overlap_area: contact.overlap_area,
                    unit_cost: spec.unit_cost,
                }
            })
            .collect();
        let total_hardware_cost = connections.iter().map(|c| c.unit_cost).sum();
        Self {
            connections,
            total_hardware_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_boundaries() {
        assert_eq!(ConnectionKind::suggest(3.9, 20.0), ConnectionKind::HeavyBracket);
        assert_eq!(ConnectionKind::suggest(3.9, 20.1), ConnectionKind::MetalPlate);
        assert_eq!(ConnectionKind::suggest(4.0, 15.0), ConnectionKind::LightBracket);
        assert_eq!(ConnectionKind::suggest(4.0, 15.5), ConnectionKind::HeavyBracket);
        assert_eq!(ConnectionKind::suggest(15.9, 1.0), ConnectionKind::LightBracket);
        assert_eq!(ConnectionKind::suggest(16.0, 10.0), ConnectionKind::Screws);
        assert_eq!(ConnectionKind::suggest(16.0, 10.5), ConnectionKind::GlueScrews);
    }

    #[test]
    fn smaller_contacts_never_get_cheaper_hardware() {
        let catalog = ConnectionCatalog::default();
        for weight in [1.0, 12.0, 18.0, 30.0] {
            let costs: Vec<f64> = [2.0, 8.0, 40.0]
                .iter()
                .map(|&area| catalog.spec(ConnectionKind::suggest(area, weight)).unit_cost)
                .collect();
            assert!(costs[0] >= costs[1] && costs[1] >= costs[2], "{costs:?}");
        }
    }

    #[test]
    fn catalog_covers_every_kind() {
        let catalog = ConnectionCatalog::default();
        for kind in ConnectionKind::ALL {
            assert_eq!(catalog.spec(kind), ConnectionSpec::builtin(kind));
        }
        assert_eq!(catalog.spec(ConnectionKind::None).unit_cost, 0.0);
    }
}
