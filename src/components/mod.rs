//! Component registry en evaluatie-logica.

use std::collections::HashMap;
use std::fmt;

pub mod aggregation_graph;
pub mod coerce;
pub mod parts_catalog;
pub mod value;

use value::Value;

/// Output-map van een component: pinnickname → waarde.
pub type OutputMap = std::collections::BTreeMap<String, Value>;

/// Fouttype voor component-evaluaties.
#[derive(Debug, Clone)]
pub struct ComponentError(String);

impl ComponentError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ComponentError {}

/// Resultaat van een component-executie.
pub type ComponentResult = Result<OutputMap, ComponentError>;

/// Trait die alle componentimplementaties dienen te implementeren.
pub trait Component {
    fn evaluate(&self, inputs: &[Value]) -> ComponentResult;
}

/// Beschikbare componenttypen binnen de registry.
#[derive(Debug, Clone, Copy)]
pub enum ComponentKind {
    AggregationGraph(aggregation_graph::ComponentKind),
    PartsCatalog(parts_catalog::ComponentKind),
}

impl ComponentKind {
    #[must_use]
    pub fn evaluate(&self, inputs: &[Value]) -> ComponentResult {
        match self {
            Self::AggregationGraph(component) => component.evaluate(inputs),
            Self::PartsCatalog(component) => component.evaluate(inputs),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AggregationGraph(component) => component.name(),
            Self::PartsCatalog(component) => component.name(),
        }
    }
}

/// Registry die componentimplementaties opzoekt op naam of nickname.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    by_name: HashMap<String, ComponentKind>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        for registration in aggregation_graph::REGISTRATIONS {
            registry.register_names(
                registration.names,
                ComponentKind::AggregationGraph(registration.kind),
            );
        }

        for registration in parts_catalog::REGISTRATIONS {
            registry.register_names(
                registration.names,
                ComponentKind::PartsCatalog(registration.kind),
            );
        }

        registry
    }
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    pub fn register_names(&mut self, names: &[&str], kind: ComponentKind) {
        for name in names {
            let key = normalize_name(name);
            self.by_name.insert(key, kind);
        }
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ComponentKind> {
        self.by_name.get(&normalize_name(name)).copied()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{ComponentKind, ComponentRegistry, aggregation_graph, parts_catalog};

    #[test]
    fn lookup_by_name_and_nickname() {
        let registry = ComponentRegistry::default();

        let by_name = registry.resolve("Wasp_Aggregation Graph").unwrap();
        assert!(matches!(
            by_name,
            ComponentKind::AggregationGraph(aggregation_graph::ComponentKind::AggregationGraph)
        ));

        let by_nickname = registry.resolve("partcat").unwrap();
        assert!(matches!(
            by_nickname,
            ComponentKind::PartsCatalog(parts_catalog::ComponentKind::PartsCatalog)
        ));

        assert!(registry.resolve("onbekend").is_none());
    }
}
