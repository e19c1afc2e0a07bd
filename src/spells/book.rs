//! Spell book: validated lookup of spells by incantation.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::effects::EffectCatalog;
use crate::error::{CatalogError, CatalogResult};

use super::spell::Spell;

/// Registry of spells keyed by lower-cased incantation.
///
/// ## Example
///
/// ```
/// use wizards_duel::effects::{EffectCatalog, EffectDef};
/// use wizards_duel::spells::{Spell, SpellBook};
///
/// let catalog = EffectCatalog::builder()
///     .effect(EffectDef::new("levitation"))
///     .build()
///     .unwrap();
///
/// let book = SpellBook::builder()
///     .spell(Spell::new("volito", "levitates").with_effect("levitation"))
///     .build(&catalog)
///     .unwrap();
///
/// assert!(book.find("Volito").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpellBook {
    spells: FxHashMap<String, Spell>,
    order: Vec<String>,
}

impl SpellBook {
    /// Start building a spell book.
    #[must_use]
    pub fn builder() -> SpellBookBuilder {
        SpellBookBuilder::default()
    }

    /// Find a spell by incantation, ignoring case.
    #[must_use]
    pub fn find(&self, incantation: &str) -> Option<&Spell> {
        self.spells.get(&incantation.trim().to_lowercase())
    }

    /// Number of spells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Spells in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.order.iter().filter_map(|key| self.spells.get(key))
    }

    /// Incantations in registration order.
    pub fn incantations(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|spell| spell.incantation.as_str())
    }
}

/// Builder that validates spells against a catalog.
#[derive(Debug, Default)]
pub struct SpellBookBuilder {
    spells: Vec<Spell>,
}

impl SpellBookBuilder {
    #[must_use]
    pub fn spell(mut self, spell: Spell) -> Self {
        self.spells.push(spell);
        self
    }

    #[must_use]
    pub fn spells(mut self, spells: impl IntoIterator<Item = Spell>) -> Self {
        self.spells.extend(spells);
        self
    }

    /// Validate and build.
    ///
    /// Fails on duplicate incantations and on effect names missing from
    /// `catalog`.
    pub fn build(self, catalog: &EffectCatalog) -> CatalogResult<SpellBook> {
        let mut spells = FxHashMap::default();
        let mut order = Vec::with_capacity(self.spells.len());

        for spell in self.spells {
            let key = spell.incantation.trim().to_lowercase();
            if spells.contains_key(&key) {
                return Err(CatalogError::DuplicateSpell(spell.incantation));
            }

            if let Some(missing) = spell.referenced_effects().find(|e| !catalog.contains(e)) {
                return Err(CatalogError::UnknownSpellEffect {
                    spell: spell.incantation.clone(),
                    effect: missing.to_string(),
                });
            }

            order.push(key.clone());
            spells.insert(key, spell);
        }

        debug!(spells = order.len(), "spell book built");
        Ok(SpellBook { spells, order })
    }
}
