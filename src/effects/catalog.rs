//! Effect catalog: the validated table of effect definitions and
//! combination rules.
//!
//! The catalog is an explicit value passed into the engine. Build one with
//! [`EffectCatalog::builder`]; `build` validates every cross-reference so
//! authoring defects surface at load time instead of mid-duel.
//!
//! ## Example
//!
//! ```
//! use wizards_duel::effects::{CombinationRule, EffectCatalog, EffectDef};
//!
//! let catalog = EffectCatalog::builder()
//!     .effect(EffectDef::new("water"))
//!     .effect(EffectDef::new("cold"))
//!     .effect(EffectDef::new("ice"))
//!     .combination(CombinationRule::new(["cold", "water"], ["ice"]))
//!     .build()
//!     .unwrap();
//!
//! assert!(catalog.contains("ice"));
//! assert_eq!(catalog.combinations().len(), 1);
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

use super::definition::{EffectDef, EffectRef};

/// Crafting rule: co-present ingredients turn into results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinationRule {
    pub ingredients: SmallVec<[String; 4]>,
    pub results: SmallVec<[String; 2]>,
    /// Custom narration; generic text is used when absent.
    pub narration: Option<String>,
}

impl CombinationRule {
    /// Create a rule without custom narration.
    pub fn new<I, R, S, T>(ingredients: I, results: R) -> Self
    where
        I: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            results: results.into_iter().map(Into::into).collect(),
            narration: None,
        }
    }

    /// Attach custom narration (builder pattern).
    #[must_use]
    pub fn narrated(mut self, text: impl Into<String>) -> Self {
        self.narration = Some(text.into());
        self
    }

    /// Whether every ingredient is in `names`.
    #[must_use]
    pub fn matches(&self, names: &[String]) -> bool {
        self.ingredients.iter().all(|i| names.contains(i))
    }

    /// Ingredients that the rule consumes (those not also results).
    pub fn consumed(&self) -> impl Iterator<Item = &str> {
        self.ingredients
            .iter()
            .filter(|i| !self.results.contains(i))
            .map(String::as_str)
    }

    /// Results that are not also ingredients.
    pub fn produced(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| !self.ingredients.contains(r))
            .map(String::as_str)
    }
}

/// Validated catalog of effects and combination rules.
#[derive(Clone, Debug, Default)]
pub struct EffectCatalog {
    effects: FxHashMap<String, EffectDef>,
    /// Registration order, for stable iteration.
    order: Vec<String>,
    combinations: Vec<CombinationRule>,
}

impl EffectCatalog {
    /// Start building a catalog.
    #[must_use]
    pub fn builder() -> EffectCatalogBuilder {
        EffectCatalogBuilder::default()
    }

    /// A catalog with no effects.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a definition.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EffectDef> {
        self.effects.get(name)
    }

    /// Look up a definition, failing with `UnknownEffect`.
    pub fn require(&self, name: &str) -> CatalogResult<&EffectDef> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownEffect(name.to_string()))
    }

    /// Check if an effect is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// Number of effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectDef> {
        self.order.iter().filter_map(|name| self.effects.get(name))
    }

    /// Combination rules in evaluation order.
    #[must_use]
    pub fn combinations(&self) -> &[CombinationRule] {
        &self.combinations
    }

    /// Narration noun of an effect. Unknown names render as themselves.
    #[must_use]
    pub fn noun<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).map_or(name, EffectDef::noun)
    }

    /// Nouns for a list of names, in order.
    pub fn nouns<'a, I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        names
            .into_iter()
            .map(|n| self.noun(n.as_ref()).to_string())
            .collect()
    }

    /// Objects ("the fog", "@bob's stench") for a list of names on `player`.
    pub fn objects<S: AsRef<str>>(&self, names: &[S], player: &str) -> Vec<String> {
        names
            .iter()
            .map(|n| {
                let name = n.as_ref();
                self.get(name)
                    .map_or_else(|| format!("the {name}"), |def| def.object(player))
            })
            .collect()
    }

    /// Whether `reference` matches the effect called `name`.
    #[must_use]
    pub fn ref_matches(&self, reference: &EffectRef, name: &str) -> bool {
        match reference {
            EffectRef::Name(target) => target == name,
            EffectRef::Attribute(attr) => self.get(name).is_some_and(|def| def.has_flag(attr)),
        }
    }

    /// Whether any of `references` matches `name`.
    #[must_use]
    pub fn any_ref_matches(&self, references: &[EffectRef], name: &str) -> bool {
        references.iter().any(|r| self.ref_matches(r, name))
    }

    /// Names in `names` carrying `attribute`, in order.
    pub fn filter_by_attribute<'a, S>(&self, names: &'a [S], attribute: &str) -> Vec<&'a str>
    where
        S: AsRef<str>,
    {
        names
            .iter()
            .map(|s| s.as_ref())
            .filter(|n| self.get(n).is_some_and(|def| def.has_flag(attribute)))
            .collect()
    }

    /// Split names into `(local, global)` lists, preserving order.
    pub fn split_global<'a, S>(&self, names: &'a [S]) -> (Vec<&'a str>, Vec<&'a str>)
    where
        S: AsRef<str>,
    {
        names
            .iter()
            .map(|s| s.as_ref())
            .partition(|n| !self.get(n).is_some_and(|def| def.global))
    }
}

/// Builder that validates references on `build`.
#[derive(Debug, Default)]
pub struct EffectCatalogBuilder {
    effects: Vec<EffectDef>,
    combinations: Vec<CombinationRule>,
}

impl EffectCatalogBuilder {
    /// Register an effect.
    #[must_use]
    pub fn effect(mut self, def: EffectDef) -> Self {
        self.effects.push(def);
        self
    }

    /// Register several effects.
    #[must_use]
    pub fn effects(mut self, defs: impl IntoIterator<Item = EffectDef>) -> Self {
        self.effects.extend(defs);
        self
    }

    /// Register a combination rule. Rules are evaluated in registration order.
    #[must_use]
    pub fn combination(mut self, rule: CombinationRule) -> Self {
        self.combinations.push(rule);
        self
    }

    /// Validate and build the catalog.
    ///
    /// Fails on duplicate names and on any name reference (relation lists,
    /// borrowed modifiers, synergy conditions, combination rules) that the
    /// catalog does not define. Attribute references are not checked.
    pub fn build(self) -> CatalogResult<EffectCatalog> {
        let mut effects = FxHashMap::default();
        let mut order = Vec::with_capacity(self.effects.len());

        for def in self.effects {
            if effects.contains_key(&def.name) {
                return Err(CatalogError::DuplicateEffect(def.name));
            }
            order.push(def.name.clone());
            effects.insert(def.name.clone(), def);
        }

        for name in &order {
            let Some(def) = effects.get(name) else {
                continue;
            };
            if let Some(missing) = def.referenced_names().find(|r| !effects.contains_key(*r)) {
                return Err(CatalogError::UnknownEffectReference {
                    effect: def.name.clone(),
                    reference: missing.to_string(),
                });
            }
        }

        for (index, rule) in self.combinations.iter().enumerate() {
            let names = rule.ingredients.iter().chain(&rule.results);
            if let Some(missing) = names.into_iter().find(|n| !effects.contains_key(*n)) {
                return Err(CatalogError::UnknownEffectReference {
                    effect: format!("combination #{index}"),
                    reference: missing.clone(),
                });
            }
        }

        debug!(
            effects = order.len(),
            combinations = self.combinations.len(),
            "effect catalog built"
        );

        Ok(EffectCatalog {
            effects,
            order,
            combinations: self.combinations,
        })
    }
}
