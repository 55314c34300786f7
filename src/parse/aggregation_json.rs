//! Parser voor aggregatiedocumenten in JSON-vorm.
//!
//! Het formaat is een object met een optionele `name` en een lijst
//! `parts`; ieder part heeft een `center`, een `dim` en een lijst
//! `connections` met elk een `origin`. Ontbrekende part-ids vallen terug
//! op de recordindex.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::core::{Aggregation, Connection, Part};
use crate::geom::Point3;

/// Result type voor parsing van aggregatiedocumenten.
pub type ParseResult<T> = Result<T, ParseError>;

/// Beschrijft fouten tijdens het parsen.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Het JSON-document kon niet gede-serialiseerd worden.
    #[error("JSON parsefout: {0}")]
    Json(#[from] serde_json::Error),
    /// Twee parts delen dezelfde identifier.
    #[error("dubbele part-id: {0}")]
    DuplicateId(usize),
}

#[derive(Debug, Deserialize)]
struct AggregationDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    parts: Vec<PartRecord>,
}

#[derive(Debug, Deserialize)]
struct PartRecord {
    id: Option<usize>,
    name: Option<String>,
    center: [f64; 3],
    dim: f64,
    #[serde(default)]
    connections: Vec<ConnectionRecord>,
}

#[derive(Debug, Deserialize)]
struct ConnectionRecord {
    origin: [f64; 3],
}

/// Leest een aggregatiedocument en converteert het naar een
/// [`Aggregation`].
///
/// # Errors
/// Geeft een [`ParseError`] bij ongeldige JSON of dubbele part-ids.
pub fn parse_str(input: &str) -> ParseResult<Aggregation> {
    let document: AggregationDocument = serde_json::from_str(input)?;

    let mut seen = HashSet::new();
    let mut parts = Vec::with_capacity(document.parts.len());
    for (index, record) in document.parts.into_iter().enumerate() {
        let id = record.id.unwrap_or(index);
        if !seen.insert(id) {
            return Err(ParseError::DuplicateId(id));
        }

        let name = record.name.unwrap_or_else(|| format!("part_{index}"));
        let connections = record
            .connections
            .iter()
            .map(|connection| Connection::new(Point3::from_array(connection.origin)))
            .collect();

        parts.push(Part::new(
            id,
            name,
            Point3::from_array(record.center),
            record.dim,
            connections,
        ));
    }

    Ok(Aggregation::new(document.name, parts))
}

#[cfg(test)]
mod tests {
    use super::{ParseError, parse_str};

    #[test]
    fn parses_a_minimal_document() {
        let aggregation = parse_str(
            r#"{
                "name": "demo",
                "parts": [
                    {"center": [0.0, 0.0, 0.0], "dim": 1.0,
                     "connections": [{"origin": [1.0, 0.0, 0.0]}]},
                    {"center": [2.0, 0.0, 0.0], "dim": 1.0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(aggregation.name(), "demo");
        assert_eq!(aggregation.part_count(), 2);
        assert_eq!(aggregation.parts()[0].connection_count(), 1);
        assert_eq!(aggregation.parts()[1].connection_count(), 0);
    }

    #[test]
    fn missing_ids_fall_back_to_the_record_index() {
        let aggregation = parse_str(
            r#"{"parts": [
                {"center": [0.0, 0.0, 0.0], "dim": 1.0},
                {"id": 9, "center": [2.0, 0.0, 0.0], "dim": 1.0}
            ]}"#,
        )
        .unwrap();

        assert_eq!(aggregation.parts()[0].id, 0);
        assert_eq!(aggregation.parts()[1].id, 9);
        assert_eq!(aggregation.parts()[1].name, "part_1");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_str(
            r#"{"parts": [
                {"id": 4, "center": [0.0, 0.0, 0.0], "dim": 1.0},
                {"id": 4, "center": [2.0, 0.0, 0.0], "dim": 1.0}
            ]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, ParseError::DuplicateId(4)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_str("geen json").unwrap_err(),
            ParseError::Json(_)
        ));
        assert!(matches!(
            parse_str(r#"{"parts": [{"dim": 1.0}]}"#).unwrap_err(),
            ParseError::Json(_)
        ));
    }
}
