//! Definitie van parts en hun connecties.

use crate::geom::Point3;

/// Een lokaal aanhechtingspunt waarmee een part aan een ander part kan
/// koppelen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Oorsprong van de connectie, in wereldcoördinaten.
    pub origin: Point3,
}

impl Connection {
    #[must_use]
    pub const fn new(origin: Point3) -> Self {
        Self { origin }
    }
}

/// Een geplaatst discreet part binnen een aggregatie.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Unieke identifier binnen een aggregatie.
    pub id: usize,
    /// Naam van het parttype. De catalogus telt exemplaren per naam.
    pub name: String,
    /// Centrum van het part.
    pub center: Point3,
    /// Karakteristieke maat, gebruikt door het neighbour-filter.
    pub dim: f64,
    /// Connecties, in definitievolgorde. De index van een connectie is
    /// haar positie in deze lijst.
    pub connections: Vec<Connection>,
}

impl Part {
    #[must_use]
    pub fn new(
        id: usize,
        name: impl Into<String>,
        center: Point3,
        dim: f64,
        connections: Vec<Connection>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            center,
            dim,
            connections,
        }
    }

    /// Aantal connecties op dit part.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
