//! Implementatie van het "Parts Catalog" component.
//!
//! Bouwt een catalogus met een vast aantal exemplaren per parttype, voor
//! gebruik in stochastische aggregatie. Eén enkel aantal wordt naar alle
//! parts uitgesmeerd; een afwijkend aantal aantallen is een fout.

use std::collections::BTreeMap;

use crate::core::PartCatalog;

use super::coerce;
use super::value::Value;
use super::{Component, ComponentError, ComponentResult};

const PIN_OUTPUT_CATALOG: &str = "CAT";

/// Beschikbare componenten binnen deze module.
#[derive(Debug, Clone, Copy)]
pub enum ComponentKind {
    PartsCatalog,
}

/// Metadata voor registraties in de componentregistry.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub names: &'static [&'static str],
    pub kind: ComponentKind,
}

/// Volledige lijst van componentregistraties voor deze module.
pub const REGISTRATIONS: &[Registration] = &[Registration {
    names: &["Wasp_Parts Catalog", "PartCat"],
    kind: ComponentKind::PartsCatalog,
}];

impl Component for ComponentKind {
    fn evaluate(&self, inputs: &[Value]) -> ComponentResult {
        match self {
            Self::PartsCatalog => evaluate_parts_catalog(inputs),
        }
    }
}

impl ComponentKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PartsCatalog => "Parts Catalog",
        }
    }
}

/// Invoerpinnen: de parts (`PART`) en hun aantallen (`NUM`). Ontbreekt
/// een van beide, dan volgt een waarschuwing en blijft de uitvoer leeg.
fn evaluate_parts_catalog(inputs: &[Value]) -> ComponentResult {
    let parts = coerce::collect_parts(inputs.first())?;
    if parts.is_empty() {
        log::warn!("geen parts opgegeven");
        return Ok(BTreeMap::new());
    }

    let mut amounts = coerce::collect_amounts(inputs.get(1))?;
    if amounts.is_empty() {
        log::warn!("geen aantallen opgegeven");
        return Ok(BTreeMap::new());
    }

    if amounts.len() == 1 && parts.len() > 1 {
        amounts = vec![amounts[0]; parts.len()];
    }

    let names: Vec<String> = parts.iter().map(|part| part.name.clone()).collect();
    let catalog = PartCatalog::new(&names, &amounts)
        .map_err(|err| ComponentError::new(err.to_string()))?;

    let mut outputs = BTreeMap::new();
    outputs.insert(PIN_OUTPUT_CATALOG.to_owned(), Value::Catalog(catalog));
    Ok(outputs)
}
