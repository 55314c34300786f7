//! Aggregaties: geordende verzamelingen geplaatste parts.

use super::part::Part;

/// Een verzameling geplaatste, onderling verbonden parts. De volgorde van
/// de parts is betekenisvol: grafen en exports verwijzen naar parts via
/// hun positie in deze verzameling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    name: String,
    parts: Vec<Part>,
}

impl Aggregation {
    #[must_use]
    pub fn new(name: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    /// Bouw een naamloze aggregatie uit een losse partlijst.
    #[must_use]
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self::new(String::new(), parts)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
