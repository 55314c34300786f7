//! Kern datastructuren voor discrete aggregaties van parts.

pub mod aggregation;
pub mod catalog;
pub mod graph;
pub mod part;

pub use aggregation::Aggregation;
pub use catalog::{CatalogError, PartCatalog};
pub use graph::{
    AggregationGraph, GraphDiagnostics, GraphEdge, GraphError, GraphOptions, extract_graph,
};
pub use part::{Connection, Part};
