//! Aggregation connectivity graph extraction.
//!
//! Builds an adjacency structure over the parts of an aggregation: one
//! node per part (at its center) and an edge for every pair of
//! connections on neighbouring parts whose origins coincide within a
//! fixed tolerance. Components only coerce inputs and call
//! [`extract_graph`]; all matching logic lives here.
//!
//! # Example
//!
//! ```ignore
//! use wasp_engine::core::{GraphOptions, extract_graph};
//!
//! let (graph, diag) = extract_graph(aggregation.parts(), GraphOptions::default())?;
//! ```

use crate::geom::{Line3, Point3};

use super::part::Part;

/// Connection origins closer than this count as touching.
pub const CONNECTION_TOLERANCE: f64 = 0.01;

/// Multiplier applied to the combined part dimensions in the coarse
/// neighbour filter.
pub const NEIGHBOUR_FACTOR: f64 = 1.5;

/// Options for graph extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    /// When true (the default), every matched connection pair is recorded
    /// from both endpoints, so each undirected adjacency appears as two
    /// directional edges. When false, a match is recorded once, from the
    /// part with the lower index to the part with the higher one.
    pub half_edge: bool,
}

impl GraphOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self { half_edge: true }
    }

    /// Set whether matches are recorded from both endpoints.
    #[must_use]
    pub const fn half_edge(mut self, half_edge: bool) -> Self {
        self.half_edge = half_edge;
        self
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during graph extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The input contains no parts at all.
    #[error("aggregation contains no parts")]
    EmptyAggregation,
}

/// Diagnostics for a graph extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDiagnostics {
    /// Number of input parts.
    pub part_count: usize,
    /// Number of part pairs that passed the coarse neighbour filter,
    /// counted once per direction.
    pub candidate_pairs: usize,
    /// Number of recorded edges.
    pub edge_count: usize,
    /// Parts that have no connections and therefore no edges.
    pub parts_without_connections: usize,
}

/// A single edge of the aggregation graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphEdge {
    /// Segment between the two part centers.
    pub line: Line3,
    /// Position of the part the edge starts from, in the input collection.
    pub start_part: usize,
    /// Position of the part the edge points to, in the input collection.
    pub end_part: usize,
    /// Index of the matched connection on the start part.
    pub start_connection: usize,
    /// Index of the matched connection on the end part.
    pub end_connection: usize,
}

/// Connectivity graph of an aggregation.
///
/// Node order mirrors the input part order; `edges[i]` holds the edges
/// recorded from part `i`'s perspective.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationGraph {
    pub nodes: Vec<Point3>,
    pub edges: Vec<Vec<GraphEdge>>,
}

impl AggregationGraph {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges over all per-part sublists.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Iterate over all edges regardless of their origin part.
    pub fn iter_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().flatten()
    }
}

/// Extracts the connectivity graph of a part collection.
///
/// Per part, a coarse bounding-sphere filter first selects the parts
/// whose centers lie within `NEIGHBOUR_FACTOR * (dim_a + dim_b)`; only
/// those survive into the pairwise connection comparison, where origins
/// closer than `CONNECTION_TOLERANCE` produce an edge. Quadratic in the
/// part count and in the connections per part, which is acceptable for
/// the aggregation sizes of interactive design exploration.
///
/// # Errors
/// Returns [`GraphError::EmptyAggregation`] when `parts` is empty.
pub fn extract_graph(
    parts: &[Part],
    options: GraphOptions,
) -> Result<(AggregationGraph, GraphDiagnostics), GraphError> {
    if parts.is_empty() {
        return Err(GraphError::EmptyAggregation);
    }

    let mut graph = AggregationGraph {
        nodes: parts.iter().map(|part| part.center).collect(),
        edges: vec![Vec::new(); parts.len()],
    };
    let mut diagnostics = GraphDiagnostics {
        part_count: parts.len(),
        ..GraphDiagnostics::default()
    };

    let tolerance_squared = CONNECTION_TOLERANCE * CONNECTION_TOLERANCE;

    // TODO: replace the pairwise center scan with a grid index once
    // aggregations grow beyond interactive sizes.
    for (i, part) in parts.iter().enumerate() {
        if part.connections.is_empty() {
            diagnostics.parts_without_connections += 1;
        }

        let neighbours: Vec<usize> = parts
            .iter()
            .enumerate()
            .filter(|(j, other)| {
                *j != i
                    && part.center.distance_to(other.center)
                        < NEIGHBOUR_FACTOR * (part.dim + other.dim)
            })
            .map(|(j, _)| j)
            .collect();
        diagnostics.candidate_pairs += neighbours.len();

        for (ci, connection) in part.connections.iter().enumerate() {
            for &j in &neighbours {
                if !options.half_edge && j < i {
                    continue;
                }
                let other = &parts[j];
                for (cj, other_connection) in other.connections.iter().enumerate() {
                    let gap = connection
                        .origin
                        .distance_squared_to(other_connection.origin);
                    if gap < tolerance_squared {
                        graph.edges[i].push(GraphEdge {
                            line: Line3::new(part.center, other.center),
                            start_part: i,
                            end_part: j,
                            start_connection: ci,
                            end_connection: cj,
                        });
                    }
                }
            }
        }
    }

    diagnostics.edge_count = graph.edge_count();
    Ok((graph, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::{AggregationGraph, GraphError, GraphOptions, extract_graph};
    use crate::core::part::{Connection, Part};
    use crate::geom::Point3;

    fn part(id: usize, center: [f64; 3], connections: &[[f64; 3]]) -> Part {
        Part::new(
            id,
            format!("part-{id}"),
            Point3::from_array(center),
            1.0,
            connections
                .iter()
                .map(|&origin| Connection::new(Point3::from_array(origin)))
                .collect(),
        )
    }

    fn extract(parts: &[Part]) -> AggregationGraph {
        extract_graph(parts, GraphOptions::default()).unwrap().0
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = extract_graph(&[], GraphOptions::default());
        assert_eq!(result.unwrap_err(), GraphError::EmptyAggregation);
    }

    #[test]
    fn nodes_mirror_part_order() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[]),
            part(1, [9.0, 0.0, 0.0], &[]),
            part(2, [0.0, 9.0, 0.0], &[]),
        ];
        let graph = extract(&parts);

        assert_eq!(graph.node_count(), 3);
        for (node, input) in graph.nodes.iter().zip(&parts) {
            assert_eq!(*node, input.center);
        }
    }

    #[test]
    fn touching_connections_produce_edges_both_ways() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[[1.0, 0.001, 0.0]]),
        ];
        let (graph, diagnostics) = extract_graph(&parts, GraphOptions::default()).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(diagnostics.edge_count, 2);
        assert_eq!(diagnostics.candidate_pairs, 2);

        let forward = &graph.edges[0][0];
        assert_eq!(
            (forward.start_part, forward.end_part),
            (0, 1),
        );
        assert_eq!(
            (forward.start_connection, forward.end_connection),
            (0, 0),
        );
        assert_eq!(forward.line.start, parts[0].center);
        assert_eq!(forward.line.end, parts[1].center);

        let backward = &graph.edges[1][0];
        assert_eq!((backward.start_part, backward.end_part), (1, 0));
        assert_eq!((backward.start_connection, backward.end_connection), (0, 0));
    }

    #[test]
    fn half_edge_false_records_each_match_once() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[[1.0, 0.001, 0.0]]),
        ];
        let options = GraphOptions::new().half_edge(false);
        let (graph, _) = extract_graph(&parts, options).unwrap();

        assert_eq!(graph.edge_count(), 1);
        let edge = &graph.edges[0][0];
        assert_eq!((edge.start_part, edge.end_part), (0, 1));
    }

    #[test]
    fn connection_gap_above_tolerance_yields_no_edges() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[[1.5, 0.0, 0.0]]),
        ];
        assert_eq!(extract(&parts).edge_count(), 0);
    }

    #[test]
    fn gap_exactly_at_tolerance_is_excluded() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[[1.01, 0.0, 0.0]]),
        ];
        assert_eq!(extract(&parts).edge_count(), 0);
    }

    #[test]
    fn neighbour_filter_blocks_distant_parts() {
        // Coincident connection origins, but the centers are far outside
        // the bounding-sphere radius of 1.5 * (1 + 1) = 3.
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[5.0, 0.0, 0.0]]),
            part(1, [10.0, 0.0, 0.0], &[[5.0, 0.0, 0.0]]),
        ];
        let (graph, diagnostics) = extract_graph(&parts, GraphOptions::default()).unwrap();

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(diagnostics.candidate_pairs, 0);
    }

    #[test]
    fn centers_exactly_at_neighbour_radius_are_not_neighbours() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.5, 0.0, 0.0]]),
            part(1, [3.0, 0.0, 0.0], &[[1.5, 0.0, 0.0]]),
        ];
        assert_eq!(extract(&parts).edge_count(), 0);
    }

    #[test]
    fn chain_links_only_adjacent_parts() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[[1.0, 0.0, 0.0], [3.0, 0.0, 0.0]]),
            part(2, [4.0, 0.0, 0.0], &[[3.0, 0.0, 0.0]]),
        ];
        let graph = extract(&parts);

        assert_eq!(graph.edge_count(), 4);
        for edge in graph.iter_edges() {
            let pair = (edge.start_part.min(edge.end_part), edge.start_part.max(edge.end_part));
            assert!(pair == (0, 1) || pair == (1, 2), "unexpected edge {pair:?}");
        }
    }

    #[test]
    fn overlapping_connections_each_produce_an_edge() {
        // Two coincident connections on part 0 both match the single
        // connection on part 1: two matches per direction.
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
        ];
        let graph = extract(&parts);

        assert_eq!(graph.edge_count(), 4);
        assert!(graph.iter_edges().all(|edge| edge.start_part != edge.end_part));
    }

    #[test]
    fn part_without_connections_contributes_node_only() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[]),
        ];
        let (graph, diagnostics) = extract_graph(&parts, GraphOptions::default()).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(diagnostics.parts_without_connections, 1);
    }

    #[test]
    fn extraction_is_deterministic() {
        let parts = vec![
            part(0, [0.0, 0.0, 0.0], &[[1.0, 0.0, 0.0]]),
            part(1, [2.0, 0.0, 0.0], &[[1.0, 0.0, 0.0], [3.0, 0.0, 0.0]]),
            part(2, [4.0, 0.0, 0.0], &[[3.0, 0.0, 0.0]]),
            part(3, [20.0, 0.0, 0.0], &[]),
        ];
        let first = extract_graph(&parts, GraphOptions::default()).unwrap();
        let second = extract_graph(&parts, GraphOptions::default()).unwrap();
        assert_eq!(first, second);
    }
}
