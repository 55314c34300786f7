//! Catalogus van parttypes met gebonden aantallen, voor stochastische
//! aggregatie.

use rand::Rng;

/// Fouten bij het opbouwen of gebruiken van een catalogus.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// De lijsten van namen en aantallen hebben een verschillende lengte.
    #[error("aantal parts ({parts}) en aantal aantallen ({amounts}) verschillen")]
    AmountMismatch { parts: usize, amounts: usize },
    /// Het gevraagde parttype komt niet voor in de catalogus.
    #[error("part `{0}` komt niet voor in de catalogus")]
    UnknownPart(String),
    /// Alle exemplaren van het gevraagde parttype zijn al verbruikt.
    #[error("part `{0}` is uitgeput")]
    Exhausted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogEntry {
    name: String,
    remaining: usize,
}

/// Catalogus die per parttype bijhoudt hoeveel exemplaren nog geplaatst
/// mogen worden. Typevolgorde is de invoervolgorde; dubbele namen worden
/// samengevoegd door hun aantallen op te tellen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartCatalog {
    entries: Vec<CatalogEntry>,
}

impl PartCatalog {
    /// Bouw een catalogus uit parallelle lijsten van namen en aantallen.
    ///
    /// # Errors
    /// Geeft [`CatalogError::AmountMismatch`] als de lijsten niet even
    /// lang zijn.
    pub fn new(names: &[String], amounts: &[usize]) -> Result<Self, CatalogError> {
        if names.len() != amounts.len() {
            return Err(CatalogError::AmountMismatch {
                parts: names.len(),
                amounts: amounts.len(),
            });
        }

        let mut entries: Vec<CatalogEntry> = Vec::new();
        for (name, &amount) in names.iter().zip(amounts) {
            match entries.iter_mut().find(|entry| entry.name == *name) {
                Some(entry) => entry.remaining += amount,
                None => entries.push(CatalogEntry {
                    name: name.clone(),
                    remaining: amount,
                }),
            }
        }

        Ok(Self { entries })
    }

    /// Totaal aantal nog beschikbare exemplaren, over alle types heen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.remaining).sum()
    }

    /// Nog beschikbare exemplaren voor één parttype, of `None` als het
    /// type niet in de catalogus voorkomt.
    #[must_use]
    pub fn remaining(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.remaining)
    }

    /// True zodra geen enkel parttype nog exemplaren heeft.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.total() == 0
    }

    /// De parttypes in de catalogus, in invoervolgorde.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Verbruik één exemplaar van het gegeven parttype.
    ///
    /// # Errors
    /// [`CatalogError::UnknownPart`] voor een onbekend type,
    /// [`CatalogError::Exhausted`] als er geen exemplaren meer zijn.
    pub fn consume(&mut self, name: &str) -> Result<(), CatalogError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| CatalogError::UnknownPart(name.to_owned()))?;

        if entry.remaining == 0 {
            return Err(CatalogError::Exhausted(name.to_owned()));
        }
        entry.remaining -= 1;
        Ok(())
    }

    /// Kies een parttype, gewogen naar de resterende aantallen. Geeft
    /// `None` zodra de catalogus is uitgeput.
    pub fn pick_weighted<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let mut ticket = rng.random_range(0..total);
        for entry in &self.entries {
            if ticket < entry.remaining {
                return Some(&entry.name);
            }
            ticket -= entry.remaining;
        }
        None
    }

    /// Kies gewogen een parttype en verbruik meteen één exemplaar.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        let name = self.pick_weighted(rng)?.to_owned();
        self.consume(&name).ok().map(|()| name)
    }
}
