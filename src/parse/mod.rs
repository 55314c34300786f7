//! Parsers voor geserialiseerde aggregaties.

pub mod aggregation_json;
