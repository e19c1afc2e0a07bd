//! Effect resolution - mutating a player's effect list.
//!
//! The `EffectResolver` implements adding and removing effects against a
//! validated catalog. It is pure: every call takes the current list and
//! returns a new one together with the narration events describing what
//! happened.
//!
//! ## Adding an effect
//!
//! 1. Already present: nothing happens.
//! 2. Blocked: an active effect `always_removes` or `repels` the name.
//! 3. Combination crafting is run to a fixpoint over the working list.
//! 4. Every newly introduced name is checked, in order, for negation
//!    (both sides removed), then removal, then counteraction (narrated only).

use std::fmt;

use tracing::{debug, trace};

use crate::core::EffectList;
use crate::error::{CatalogError, CatalogResult};
use crate::narration::oxford_join;

use super::catalog::{CombinationRule, EffectCatalog};
use super::definition::EffectRef;

/// Something the resolver wants narrated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NarrationEvent {
    /// An active effect kept a new one from being added.
    Blocked {
        blocker: String,
        verb: String,
        blocked: String,
    },
    /// A combination rule fired.
    Combined { narration: String },
    /// A new effect and the effects it negates were all removed.
    Negated {
        subject: String,
        verb: String,
        objects: Vec<String>,
    },
    /// A new effect removed existing ones.
    Removed {
        subject: String,
        verb: String,
        objects: Vec<String>,
    },
    /// A new effect suppresses existing ones without removing them.
    Counteracted {
        subject: String,
        objects: Vec<String>,
    },
    /// An effect was taken off a player.
    EffectRemoved { player: String, noun: String },
}

impl fmt::Display for NarrationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked {
                blocker,
                verb,
                blocked,
            } => write!(f, "{blocker} {verb} {blocked}."),
            Self::Combined { narration } => write!(f, "{narration}"),
            Self::Negated {
                subject,
                verb,
                objects,
            }
            | Self::Removed {
                subject,
                verb,
                objects,
            } => write!(f, "{subject} {verb} {}.", oxford_join(objects)),
            Self::Counteracted { subject, objects } => {
                write!(f, "{subject} counteracts {}.", oxford_join(objects))
            }
            Self::EffectRemoved { player, noun } => {
                write!(f, "@{player}'s {noun} has been removed.")
            }
        }
    }
}

/// Result of adding an effect.
#[derive(Clone, Debug, PartialEq)]
pub struct AddOutcome {
    /// The new list.
    pub effects: EffectList,
    /// Narration in the order it happened.
    pub events: Vec<NarrationEvent>,
}

impl AddOutcome {
    fn unchanged(effects: &EffectList) -> Self {
        Self {
            effects: effects.clone(),
            events: Vec::new(),
        }
    }
}

/// Result of removing effects.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoveOutcome {
    pub effects: EffectList,
    pub events: Vec<NarrationEvent>,
}

/// Applies catalog relations to effect lists.
#[derive(Clone, Copy, Debug)]
pub struct EffectResolver<'a> {
    catalog: &'a EffectCatalog,
    max_rounds: usize,
}

impl<'a> EffectResolver<'a> {
    /// Create a resolver with the default crafting bound (64 rounds).
    #[must_use]
    pub fn new(catalog: &'a EffectCatalog) -> Self {
        Self {
            catalog,
            max_rounds: 64,
        }
    }

    /// Override the crafting bound.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Add `name` to `active` for `player`.
    ///
    /// Fails if a name is not in the catalog or crafting does not converge.
    pub fn add_effect(
        &self,
        active: &EffectList,
        name: &str,
        player: &str,
    ) -> CatalogResult<AddOutcome> {
        if active.iter().any(|n| n == name) {
            return Ok(AddOutcome::unchanged(active));
        }

        let def = self.catalog.require(name)?;

        for existing in active {
            let current = self.catalog.require(existing)?;
            let verb = if self.catalog.any_ref_matches(&current.always_removes, name) {
                current.removal_verb()
            } else if self.catalog.any_ref_matches(&current.repels, name) {
                current.repelling_verb()
            } else {
                continue;
            };

            debug!(effect = name, blocker = %existing, player, "effect blocked");
            let event = NarrationEvent::Blocked {
                blocker: current.subject(player),
                verb: verb.to_string(),
                blocked: def.object(player),
            };
            return Ok(AddOutcome {
                effects: active.clone(),
                events: vec![event],
            });
        }

        let before: Vec<String> = active.iter().cloned().collect();
        let mut working = before.clone();
        working.push(name.to_string());

        let mut events = Vec::new();
        self.combine_to_fixpoint(&mut working, name, &mut events)?;

        let introduced: Vec<String> = working
            .iter()
            .filter(|n| !before.contains(n))
            .cloned()
            .collect();

        for new_name in &introduced {
            if !working.contains(new_name) {
                continue;
            }
            self.apply_relations(&mut working, new_name, player, &mut events)?;
        }

        debug!(effect = name, player, effects = ?working, "effect added");
        Ok(AddOutcome {
            effects: working.into_iter().collect(),
            events,
        })
    }

    /// Remove `name` from `active`. Absent names leave the list unchanged.
    #[must_use]
    pub fn remove_effect(&self, active: &EffectList, name: &str, player: &str) -> RemoveOutcome {
        self.remove_where(active, player, |n| n == name)
    }

    /// Remove every effect matched by `reference`.
    #[must_use]
    pub fn remove_matching(
        &self,
        active: &EffectList,
        reference: &EffectRef,
        player: &str,
    ) -> RemoveOutcome {
        self.remove_where(active, player, |n| self.catalog.ref_matches(reference, n))
    }

    /// Remove `name` if present, add it otherwise.
    pub fn toggle_effect(
        &self,
        active: &EffectList,
        name: &str,
        player: &str,
    ) -> CatalogResult<AddOutcome> {
        if active.iter().any(|n| n == name) {
            let removed = self.remove_effect(active, name, player);
            Ok(AddOutcome {
                effects: removed.effects,
                events: removed.events,
            })
        } else {
            self.add_effect(active, name, player)
        }
    }

    fn remove_where(
        &self,
        active: &EffectList,
        player: &str,
        matches: impl Fn(&str) -> bool,
    ) -> RemoveOutcome {
        let mut effects = EffectList::new();
        let mut events = Vec::new();

        for name in active {
            if matches(name.as_str()) {
                events.push(NarrationEvent::EffectRemoved {
                    player: player.to_string(),
                    noun: self.catalog.noun(name).to_string(),
                });
            } else {
                effects.push_back(name.clone());
            }
        }

        RemoveOutcome { effects, events }
    }

    /// Run combination rounds until one changes nothing.
    fn combine_to_fixpoint(
        &self,
        working: &mut Vec<String>,
        trigger: &str,
        events: &mut Vec<NarrationEvent>,
    ) -> CatalogResult<()> {
        for round in 0..self.max_rounds {
            if !self.combine_round(working, events) {
                trace!(trigger, round, "combinations settled");
                return Ok(());
            }
        }

        Err(CatalogError::NonConvergentCombination {
            effect: trigger.to_string(),
            rounds: self.max_rounds,
        })
    }

    /// One pass over the rules in catalog order. Returns whether anything fired.
    fn combine_round(&self, working: &mut Vec<String>, events: &mut Vec<NarrationEvent>) -> bool {
        let mut fired = false;

        for rule in self.catalog.combinations() {
            if !rule.matches(working) || !Self::changes(rule, working) {
                continue;
            }

            working.retain(|n| !rule.consumed().any(|c| c == n.as_str()));
            for result in rule.produced() {
                if !working.iter().any(|n| n == result) {
                    working.push(result.to_string());
                }
            }

            trace!(ingredients = ?rule.ingredients, results = ?rule.results, "combination fired");
            events.push(NarrationEvent::Combined {
                narration: self.combination_narration(rule),
            });
            fired = true;
        }

        fired
    }

    fn changes(rule: &CombinationRule, working: &[String]) -> bool {
        rule.consumed().next().is_some() || rule.produced().any(|r| !working.iter().any(|n| n == r))
    }

    fn combination_narration(&self, rule: &CombinationRule) -> String {
        if let Some(text) = &rule.narration {
            return text.clone();
        }

        let produced: Vec<&str> = rule.produced().collect();
        format!(
            "The {} combined, resulting in {}.",
            oxford_join(&self.catalog.nouns(&rule.ingredients)),
            oxford_join(&self.catalog.nouns(&produced))
        )
    }

    /// Negation, then removal, then counteraction for one new name.
    fn apply_relations(
        &self,
        working: &mut Vec<String>,
        new_name: &str,
        player: &str,
        events: &mut Vec<NarrationEvent>,
    ) -> CatalogResult<()> {
        let def = self.catalog.require(new_name)?;
        let others = |refs: &[EffectRef], working: &[String]| -> Vec<String> {
            working
                .iter()
                .filter(|n| n.as_str() != new_name && self.catalog.any_ref_matches(refs, n))
                .cloned()
                .collect()
        };

        let negated = others(def.negates.as_slice(), working.as_slice());
        if !negated.is_empty() {
            working.retain(|n| n != new_name && !negated.contains(n));
            events.push(NarrationEvent::Negated {
                subject: def.subject(player),
                verb: def.negating_verb().to_string(),
                objects: self.catalog.objects(&negated, player),
            });
            return Ok(());
        }

        let mut removed = others(def.removes.as_slice(), working.as_slice());
        for name in others(def.always_removes.as_slice(), working.as_slice()) {
            if !removed.contains(&name) {
                removed.push(name);
            }
        }
        if !removed.is_empty() {
            working.retain(|n| !removed.contains(n));
            events.push(NarrationEvent::Removed {
                subject: def.subject(player),
                verb: def.removal_verb().to_string(),
                objects: self.catalog.objects(&removed, player),
            });
        }

        let counteracted: Vec<String> = working
            .iter()
            .filter(|n| def.counteracts(n))
            .cloned()
            .collect();
        if !counteracted.is_empty() {
            events.push(NarrationEvent::Counteracted {
                subject: def.subject(player),
                objects: self.catalog.objects(&counteracted, player),
            });
        }

        Ok(())
    }
}
