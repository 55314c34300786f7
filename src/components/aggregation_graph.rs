//! Implementatie van het "Aggregation Graph" component.
//!
//! Extraheert de connectiviteitsgraaf van een aggregatie: één node per
//! part en een edge voor ieder paar rakende connecties tussen naburige
//! parts. De uitvoerpinnen `E`, `ES_ID`, `EE_ID`, `CS_ID` en `CE_ID`
//! zijn lijsten-van-lijsten, met één sublijst per part.

use std::collections::BTreeMap;

use crate::core::graph::{self, GraphOptions};

use super::coerce;
use super::value::Value;
use super::{Component, ComponentResult, OutputMap};

const PIN_OUTPUT_NODES: &str = "N";
const PIN_OUTPUT_EDGES: &str = "E";
const PIN_OUTPUT_EDGE_START_IDS: &str = "ES_ID";
const PIN_OUTPUT_EDGE_END_IDS: &str = "EE_ID";
const PIN_OUTPUT_CONN_START_IDS: &str = "CS_ID";
const PIN_OUTPUT_CONN_END_IDS: &str = "CE_ID";

/// Beschikbare componenten binnen deze module.
#[derive(Debug, Clone, Copy)]
pub enum ComponentKind {
    AggregationGraph,
}

/// Metadata voor registraties in de componentregistry.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub names: &'static [&'static str],
    pub kind: ComponentKind,
}

/// Volledige lijst van componentregistraties voor deze module.
pub const REGISTRATIONS: &[Registration] = &[Registration {
    names: &["Wasp_Aggregation Graph", "AggregationGraph"],
    kind: ComponentKind::AggregationGraph,
}];

impl Component for ComponentKind {
    fn evaluate(&self, inputs: &[Value]) -> ComponentResult {
        match self {
            Self::AggregationGraph => evaluate_aggregation_graph(inputs),
        }
    }
}

impl ComponentKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AggregationGraph => "Aggregation Graph",
        }
    }
}

/// Invoerpinnen: de aggregatie (`AGGR`) en optioneel de half-edge toggle
/// (`HE`, standaard true). Zonder aggregatie volgt een waarschuwing en
/// blijven alle uitvoerpinnen leeg.
fn evaluate_aggregation_graph(inputs: &[Value]) -> ComponentResult {
    let aggregation = match inputs.first() {
        None | Some(Value::Null) => {
            log::warn!("geen aggregatie opgegeven");
            return Ok(empty_outputs());
        }
        Some(value) => coerce::coerce_aggregation(value)?,
    };

    let half_edge = coerce::coerce_boolean_with_default(inputs.get(1));
    let options = GraphOptions::new().half_edge(half_edge);

    let (extracted, _diagnostics) = match graph::extract_graph(aggregation.parts(), options) {
        Ok(result) => result,
        Err(graph::GraphError::EmptyAggregation) => {
            log::warn!("aggregatie bevat geen parts");
            return Ok(empty_outputs());
        }
    };

    let nodes = extracted
        .nodes
        .iter()
        .map(|point| Value::Point(point.to_array()))
        .collect();

    let mut edges = Vec::with_capacity(extracted.edges.len());
    let mut edge_start_ids = Vec::with_capacity(extracted.edges.len());
    let mut edge_end_ids = Vec::with_capacity(extracted.edges.len());
    let mut conn_start_ids = Vec::with_capacity(extracted.edges.len());
    let mut conn_end_ids = Vec::with_capacity(extracted.edges.len());

    for per_part in &extracted.edges {
        edges.push(Value::List(
            per_part
                .iter()
                .map(|edge| Value::CurveLine {
                    p1: edge.line.start.to_array(),
                    p2: edge.line.end.to_array(),
                })
                .collect(),
        ));
        edge_start_ids.push(index_list(per_part.iter().map(|edge| edge.start_part)));
        edge_end_ids.push(index_list(per_part.iter().map(|edge| edge.end_part)));
        conn_start_ids.push(index_list(per_part.iter().map(|edge| edge.start_connection)));
        conn_end_ids.push(index_list(per_part.iter().map(|edge| edge.end_connection)));
    }

    let mut outputs = BTreeMap::new();
    outputs.insert(PIN_OUTPUT_NODES.to_owned(), Value::List(nodes));
    outputs.insert(PIN_OUTPUT_EDGES.to_owned(), Value::List(edges));
    outputs.insert(PIN_OUTPUT_EDGE_START_IDS.to_owned(), Value::List(edge_start_ids));
    outputs.insert(PIN_OUTPUT_EDGE_END_IDS.to_owned(), Value::List(edge_end_ids));
    outputs.insert(PIN_OUTPUT_CONN_START_IDS.to_owned(), Value::List(conn_start_ids));
    outputs.insert(PIN_OUTPUT_CONN_END_IDS.to_owned(), Value::List(conn_end_ids));
    Ok(outputs)
}

fn index_list(indices: impl Iterator<Item = usize>) -> Value {
    Value::List(indices.map(|index| Value::Number(index as f64)).collect())
}

fn empty_outputs() -> OutputMap {
    let mut outputs = BTreeMap::new();
    for pin in [
        PIN_OUTPUT_NODES,
        PIN_OUTPUT_EDGES,
        PIN_OUTPUT_EDGE_START_IDS,
        PIN_OUTPUT_EDGE_END_IDS,
        PIN_OUTPUT_CONN_START_IDS,
        PIN_OUTPUT_CONN_END_IDS,
    ] {
        outputs.insert(pin.to_owned(), Value::List(Vec::new()));
    }
    outputs
}
