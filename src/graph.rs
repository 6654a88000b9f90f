//! Support graph inference and load propagation.
//!
//! A piece *supports* another when its top face meets the other's bottom face
//! within [`AnalysisParams::vertical_tolerance`] and their footprints overlap by
//! at least [`AnalysisParams::min_overlap`] along both horizontal axes. Edges
//! point from the lower piece to the upper one.

use std::collections::{HashMap, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction::{Incoming, Outgoing};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::connection::ConnectionKind;
use crate::errors::AnalysisError;
use crate::geometry::FootprintOverlap;
use crate::material::MaterialTable;
use crate::piece::Piece;
use crate::weight::estimate_weight;

/// Where one piece rests on another.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// X coordinate of the centre of the shared footprint.
    pub center_x: f64,
    /// Z coordinate of the centre of the shared footprint.
    pub center_z: f64,
    /// Elevation of the contact, the top face of the lower piece.
    pub elevation: f64,
    /// Shared footprint area in square inches.
    pub overlap_area: f64,
    /// Piece underneath.
    pub lower: String,
    /// Piece resting on top.
    pub upper: String,
    /// Hardware suggested for this contact.
    pub connection: ConnectionKind,
}

/// A piece together with its inferred support relations and load state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportNode {
    /// The analysed piece.
    pub piece: Piece,
    /// Own weight in pounds.
    pub weight: f64,
    /// Ids of pieces resting on this one.
    pub supporting: Vec<String>,
    /// Ids of pieces this one rests on.
    pub supported_by: Vec<String>,
    /// One contact per entry in `supporting`.
    pub connections: Vec<Contact>,
    /// Own weight plus everything resting on it, in pounds.
    pub total_load: f64,
    /// `total_load` over footprint capacity, clamped to `[0, 1]`.
    pub stress_level: f64,
}

impl SupportNode {
    /// Create an unconnected node for `piece`.
    fn new(piece: Piece, weight: f64) -> Self {
        Self {
            piece,
            weight,
            supporting: Vec::new(),
            supported_by: Vec::new(),
            connections: Vec::new(),
            total_load: 0.0,
            stress_level: 0.0,
        }
    }

    /// Identifier of the underlying piece.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.piece.id
    }
}

/// Ratio of `load` to `capacity`, clamped to `[0, 1]`.
///
/// Degenerate capacities (zero area) saturate at 1 and negative ones at 0.
#[must_use]
pub fn stress_ratio(load: f64, capacity: f64) -> f64 {
    (load / capacity).min(1.0).max(0.0)
}

/// Directed graph of which piece rests on which.
#[derive(Clone, Debug, Default)]
pub struct SupportGraph {
    /// Nodes in input order; edges run from supporter to supported piece.
    graph: DiGraph<SupportNode, ()>,
    /// Lookup from piece id to node.
    index: HashMap<String, NodeIndex>,
    /// Pieces whose dependents could not be ordered because they rest on each other.
    cyclic: Vec<String>,
    /// Whether `total_load` and `stress_level` are current.
    propagated: bool,
}

impl SupportGraph {
    /// Infer support relations between `pieces`.
    ///
    /// Loads are not propagated yet; call [`SupportGraph::propagate_loads`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DuplicatePiece`] when two pieces share an id.
    pub fn build(pieces: &[Piece], config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let params = &config.params;
        let mut graph = DiGraph::with_capacity(pieces.len(), pieces.len());
        let mut index = HashMap::with_capacity(pieces.len());
        for piece in pieces {
            let weight = estimate_weight(piece, &config.materials, params.wall_thickness);
            let node = graph.add_node(SupportNode::new(piece.clone(), weight));
            if index.insert(piece.id.clone(), node).is_some() {
                return Err(AnalysisError::DuplicatePiece(piece.id.clone()));
            }
        }

        let nodes: Vec<NodeIndex> = graph.node_indices().collect();
        for &lower in &nodes {
            for &upper in &nodes {
                if lower == upper {
                    continue;
                }
                let Some(contact) = Self::contact(&graph[lower], &graph[upper], config) else {
                    continue;
                };
                debug!(
                    lower = %contact.lower,
                    upper = %contact.upper,
                    area = contact.overlap_area,
                    "support detected"
                );
                graph.add_edge(lower, upper, ());
                let upper_id = graph[upper].piece.id.clone();
                let lower_id = graph[lower].piece.id.clone();
                graph[upper].supported_by.push(lower_id);
                let supporter = &mut graph[lower];
                supporter.supporting.push(upper_id);
                supporter.connections.push(contact);
            }
        }

        Ok(Self {
            graph,
            index,
            cyclic: Vec::new(),
            propagated: false,
        })
    }

    /// Contact record when `lower` supports `upper`.
    fn contact(lower: &SupportNode, upper: &SupportNode, config: &AnalysisConfig) -> Option<Contact> {
        let params = &config.params;
        let elevation = lower.piece.top();
        if (elevation - upper.piece.position.y).abs() > params.vertical_tolerance {
            return None;
        }
        let overlap = FootprintOverlap::between(
            (lower.piece.position, lower.piece.dimensions),
            (upper.piece.position, upper.piece.dimensions),
        )?;
        if !overlap.spans_at_least(params.min_overlap) {
            return None;
        }
        let (center_x, center_z) = overlap.center();
        let overlap_area = overlap.area();
        Some(Contact {
            center_x,
            center_z,
            elevation,
            overlap_area,
            lower: lower.piece.id.clone(),
            upper: upper.piece.id.clone(),
            connection: ConnectionKind::suggest(overlap_area, upper.weight),
        })
    }

    /// Accumulate loads from the top of each stack downwards.
    ///
    /// Nodes are finalised in topological order: a node is processed only after
    /// every piece resting on it. If pieces rest on each other in a loop, the
    /// first piece of that loop in input order is finalised without the loads it
    /// is still waiting for and recorded in [`SupportGraph::cyclic_pieces`].
    /// Pieces underneath a loop wait for it and receive its full load.
    pub fn propagate_loads(&mut self, materials: &MaterialTable) {
        let count = self.graph.node_count();
        let mut waiting_on: Vec<usize> = self
            .graph
            .node_indices()
            .map(|node| self.graph.neighbors_directed(node, Outgoing).count())
            .collect();
        let mut processed = vec![false; count];
        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|node| waiting_on[node.index()] == 0)
            .collect();
        let mut component = vec![0; count];
        for (id, members) in tarjan_scc(&self.graph).into_iter().enumerate() {
            for node in members {
                component[node.index()] = id;
            }
        }
        let mut remaining = count;
        self.cyclic.clear();

        while remaining > 0 {
            while let Some(node) = queue.pop_front() {
                if processed[node.index()] {
                    continue;
                }
                self.finalize(node, materials, &processed);
                processed[node.index()] = true;
                remaining -= 1;

                let below: Vec<NodeIndex> = self.graph.neighbors_directed(node, Incoming).collect();
                for supporter in below {
                    let pending = &mut waiting_on[supporter.index()];
                    *pending = pending.saturating_sub(1);
                    if *pending == 0 && !processed[supporter.index()] {
                        queue.push_back(supporter);
                    }
                }
            }

            // Only a piece whose unresolved loads all come from its own loop may be forced.
            let graph = &self.graph;
            let Some(stuck) = graph.node_indices().find(|&node| {
                !processed[node.index()]
                    && graph.neighbors_directed(node, Outgoing).all(|upper| {
                        processed[upper.index()]
                            || component[upper.index()] == component[node.index()]
                    })
            }) else {
                break;
            };
            let id = self.graph[stuck].piece.id.clone();
            warn!(piece = %id, "support cycle detected; finalising piece without unresolved loads");
            self.cyclic.push(id);
            queue.push_back(stuck);
        }
        self.propagated = true;
    }

    /// Compute the load and stress of `node` from the already processed pieces above it.
    fn finalize(&mut self, node: NodeIndex, materials: &MaterialTable, processed: &[bool]) {
        let above: f64 = self
            .graph
            .neighbors_directed(node, Outgoing)
            .filter(|upper| processed[upper.index()])
            .map(|upper| self.graph[upper].total_load)
            .sum();
        let entry = &mut self.graph[node];
        entry.total_load = entry.weight + above;
        let capacity = materials.profile(entry.piece.material).base_capacity
            * entry.piece.dimensions.footprint_area();
        entry.stress_level = stress_ratio(entry.total_load, capacity);
    }

    /// Whether loads have been propagated since the graph was built.
    #[must_use]
    pub fn is_propagated(&self) -> bool {
        self.propagated
    }

    /// Number of pieces in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph has no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of support relations.
    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node for the piece with identifier `id`.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&SupportNode> {
        self.index.get(id).map(|&node| &self.graph[node])
    }

    /// All nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &SupportNode> {
        self.graph.node_weights()
    }

    /// All contacts, grouped by supporting piece in input order.
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.nodes().flat_map(|node| node.connections.iter())
    }

    /// Pieces that rest on nothing.
    pub fn roots(&self) -> impl Iterator<Item = &SupportNode> {
        self.nodes().filter(|node| node.supported_by.is_empty())
    }

    /// Pieces with nothing resting on them.
    pub fn leaves(&self) -> impl Iterator<Item = &SupportNode> {
        self.nodes().filter(|node| node.supporting.is_empty())
    }

    /// Pieces that were finalised while part of a support cycle.
    #[must_use]
    pub fn cyclic_pieces(&self) -> &[String] {
        &self.cyclic
    }

    /// Node with the highest stress level; the first one wins ties.
    #[must_use]
    pub fn most_stressed(&self) -> Option<&SupportNode> {
        self.nodes().fold(None, |best: Option<&SupportNode>, node| match best {
            Some(current) if current.stress_level >= node.stress_level => Some(current),
            _ => Some(node),
        })
    }

    /// Sum of every piece's own weight in pounds.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.nodes().map(|node| node.weight).sum()
    }
}

impl Serialize for SupportGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for node in self.nodes() {
            map.serialize_entry(node.id(), node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{Dimensions, Point};

    fn board(id: &str, x: f64, y: f64, z: f64) -> Piece {
        Piece::new(id, Dimensions::new(12.0, 1.0, 12.0), Point::new(x, y, z))
    }

    fn analysed(pieces: &[Piece]) -> SupportGraph {
        let config = AnalysisConfig::default();
        let mut graph = SupportGraph::build(pieces, &config).expect("unique ids");
        graph.propagate_loads(&config.materials);
        graph
    }

    #[test]
    fn stacked_boards_form_one_relation() {
        let graph = analysed(&[board("a", 0.0, 0.0, 0.0), board("b", 0.0, 1.0, 0.0)]);
        let a = graph.node("a").expect("a present");
        let b = graph.node("b").expect("b present");
        assert_eq!(a.supporting, vec!["b".to_owned()]);
        assert_eq!(b.supported_by, vec!["a".to_owned()]);
        assert!(a.supported_by.is_empty());
        assert!(b.supporting.is_empty());
        assert_relative_eq!(b.total_load, b.weight);
        assert_relative_eq!(a.total_load, a.weight + b.weight);

        let contact = &a.connections[0];
        assert_eq!(contact.elevation, 1.0);
        assert_eq!(contact.overlap_area, 144.0);
        assert_eq!((contact.center_x, contact.center_z), (0.0, 0.0));
        assert_eq!(contact.connection, ConnectionKind::Screws);
    }

    #[test]
    fn gap_beyond_tolerance_breaks_support() {
        let graph = analysed(&[board("a", 0.0, 0.0, 0.0), board("b", 0.0, 2.5, 0.0)]);
        assert_eq!(graph.relation_count(), 0);
    }

    #[test]
    fn narrow_overlap_breaks_support() {
        let graph = analysed(&[board("a", 0.0, 0.0, 0.0), board("b", 10.5, 1.0, 0.0)]);
        assert_eq!(graph.relation_count(), 0);
    }

    #[test]
    fn diamond_accumulates_through_both_supports() {
        let base = Piece::new("base", Dimensions::new(30.0, 1.0, 12.0), Point::new(0.0, 0.0, 0.0));
        let left = Piece::new("left", Dimensions::new(4.0, 10.0, 4.0), Point::new(-8.0, 1.0, 0.0));
        let right = Piece::new("right", Dimensions::new(4.0, 10.0, 4.0), Point::new(8.0, 1.0, 0.0));
        let top = Piece::new("top", Dimensions::new(24.0, 1.0, 12.0), Point::new(0.0, 11.0, 0.0));
        let graph = analysed(&[base, left, right, top]);

        let top = graph.node("top").expect("top present");
        assert_eq!(top.supported_by, vec!["left".to_owned(), "right".to_owned()]);
        let left = graph.node("left").expect("left present");
        let right = graph.node("right").expect("right present");
        assert_relative_eq!(left.total_load, left.weight + top.total_load);
        assert_relative_eq!(right.total_load, right.weight + top.total_load);
        let base = graph.node("base").expect("base present");
        assert_relative_eq!(base.total_load, base.weight + left.total_load + right.total_load);
        assert!(graph.cyclic_pieces().is_empty());
        assert_eq!(graph.roots().count(), 1);
        assert_eq!(graph.leaves().count(), 1);
    }

    #[test]
    fn mutual_support_is_resolved_deterministically() {
        let a = Piece::new("a", Dimensions::new(12.0, 0.5, 12.0), Point::new(0.0, 3.0, 0.0));
        let b = Piece::new("b", Dimensions::new(12.0, 0.5, 12.0), Point::new(4.0, 3.0, 0.0));
        let graph = analysed(&[a, b]);
        assert_eq!(graph.relation_count(), 2);
        assert_eq!(graph.cyclic_pieces(), ["a".to_owned()]);
        let a = graph.node("a").expect("a present");
        let b = graph.node("b").expect("b present");
        assert_relative_eq!(a.total_load, a.weight);
        assert_relative_eq!(b.total_load, b.weight + a.total_load);
        assert!(graph.is_propagated());
    }

    #[test]
    fn post_under_mutual_support_carries_both_shelves() {
        let post = Piece::new("post", Dimensions::new(4.0, 20.0, 4.0), Point::new(0.0, 0.0, 0.0));
        let a = Piece::new("a", Dimensions::new(12.0, 0.75, 12.0), Point::new(0.0, 20.0, 0.0));
        let b = Piece::new("b", Dimensions::new(12.0, 0.75, 12.0), Point::new(1.0, 20.0, 0.0));
        let graph = analysed(&[post, a, b]);

        assert_eq!(graph.cyclic_pieces(), ["a".to_owned()]);
        let post = graph.node("post").expect("post present");
        let a = graph.node("a").expect("a present");
        let b = graph.node("b").expect("b present");
        assert_eq!(post.supporting, vec!["a".to_owned(), "b".to_owned()]);
        assert_relative_eq!(a.total_load, a.weight);
        assert_relative_eq!(b.total_load, b.weight + a.total_load);
        assert_relative_eq!(post.total_load, post.weight + a.total_load + b.total_load);
        assert!(post.total_load > post.weight);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = SupportGraph::build(
            &[board("a", 0.0, 0.0, 0.0), board("a", 0.0, 1.0, 0.0)],
            &AnalysisConfig::default(),
        )
        .expect_err("duplicate rejected");
        assert_eq!(error, AnalysisError::DuplicatePiece("a".to_owned()));
    }

    #[test]
    fn stress_is_clamped() {
        assert_eq!(stress_ratio(500.0, 10.0), 1.0);
        assert_eq!(stress_ratio(5.0, 10.0), 0.5);
        assert_eq!(stress_ratio(5.0, 0.0), 1.0);
        assert_eq!(stress_ratio(5.0, -10.0), 0.0);
    }

    #[test]
    fn serializes_as_map_keyed_by_id() {
        let graph = analysed(&[board("a", 0.0, 0.0, 0.0), board("b", 0.0, 1.0, 0.0)]);
        let json = serde_json::to_value(&graph).expect("graph serializes");
        assert_eq!(json["a"]["supporting"][0], "b");
        assert_eq!(json["b"]["supportedBy"][0], "a");
        assert!(json["a"]["totalLoad"].is_number());
    }
}
