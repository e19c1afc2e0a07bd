//! Player aggregate: a duelist's record plus derived stats.
//!
//! ## Active effects
//!
//! An effect is active unless another effect in the same list counteracts
//! it. Counteracted effects stay listed (they come back once the
//! counteracting effect goes) but never contribute stats or hooks.
//!
//! ## Affected state
//!
//! The player's turn stats with every active effect folded in, in insertion
//! order. Offense and defense passes are cached separately; any change to
//! the effect list or turn stats clears the cache.

use tracing::trace;

use crate::core::{BaseStats, EffectList, PlayerState, TurnStats};
use crate::effects::{EffectCatalog, FoldContext, StatModifierEngine};
use crate::error::CatalogResult;
use crate::narration::{advantage, degree, oxford_join, severity};

/// Names in `effects` not counteracted by any other listed effect.
pub fn active_effects(effects: &EffectList, catalog: &EffectCatalog) -> Vec<String> {
    effects
        .iter()
        .filter(|name| counteracted_by(effects, catalog, name).next().is_none())
        .cloned()
        .collect()
}

fn counteracted_by<'a>(
    effects: &'a EffectList,
    catalog: &'a EffectCatalog,
    name: &'a str,
) -> impl Iterator<Item = &'a str> {
    effects
        .iter()
        .filter_map(move |other| catalog.get(other))
        .filter(move |def| def.counteracts(name))
        .map(|def| def.noun())
}

/// A duelist during one incantation.
#[derive(Clone, Debug)]
pub struct Player {
    state: PlayerState,
    offense: Option<TurnStats>,
    defense: Option<TurnStats>,
}

impl Player {
    #[must_use]
    pub fn new(state: PlayerState) -> Self {
        Self {
            state,
            offense: None,
            defense: None,
        }
    }

    /// Player handle.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    #[must_use]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Mutable access to the record. Clears the stat cache.
    pub fn state_mut(&mut self) -> &mut PlayerState {
        self.invalidate();
        &mut self.state
    }

    #[must_use]
    pub fn into_state(self) -> PlayerState {
        self.state
    }

    #[must_use]
    pub fn effects(&self) -> &EffectList {
        &self.state.effects
    }

    /// Replace the effect list. Clears the stat cache.
    pub fn set_effects(&mut self, effects: EffectList) {
        self.state.effects = effects;
        self.invalidate();
    }

    /// Reset turn stats from the baseline. Clears the stat cache.
    pub fn reset_turn_stats(&mut self) {
        self.state.reset_turn_stats();
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.offense = None;
        self.defense = None;
    }

    /// Effects that are not counteracted.
    #[must_use]
    pub fn active_effects(&self, catalog: &EffectCatalog) -> Vec<String> {
        active_effects(&self.state.effects, catalog)
    }

    /// Turn stats with active effects folded in (cached).
    pub fn affected_state(
        &mut self,
        catalog: &EffectCatalog,
        opponent_active: &[String],
        is_defense: bool,
    ) -> CatalogResult<TurnStats> {
        let cached = if is_defense { self.defense } else { self.offense };
        if let Some(stats) = cached {
            return Ok(stats);
        }

        let stats = self.fold(catalog, opponent_active, is_defense, false)?.0;
        trace!(player = %self.state.name, is_defense, ?stats, "affected state computed");

        if is_defense {
            self.defense = Some(stats);
        } else {
            self.offense = Some(stats);
        }
        Ok(stats)
    }

    /// One sentence per narrated modifier, explaining the current stats.
    pub fn explain_effects(
        &self,
        catalog: &EffectCatalog,
        opponent_active: &[String],
    ) -> CatalogResult<Vec<String>> {
        Ok(self.fold(catalog, opponent_active, true, true)?.1)
    }

    fn fold(
        &self,
        catalog: &EffectCatalog,
        opponent_active: &[String],
        is_defense: bool,
        verbose: bool,
    ) -> CatalogResult<(TurnStats, Vec<String>)> {
        let own = self.active_effects(catalog);
        let ctx = FoldContext {
            player: &self.state.name,
            own: &own,
            opponent: opponent_active,
            is_defense,
        };
        let folded = StatModifierEngine::new(catalog).fold(&self.state.turn, &ctx, verbose)?;
        Ok((folded.stats, folded.explanations))
    }

    /// One line per listed effect; counteracted ones are struck through.
    #[must_use]
    pub fn effect_list(&self, catalog: &EffectCatalog) -> Vec<String> {
        let effects = &self.state.effects;
        effects
            .iter()
            .map(|name| {
                let noun = catalog.noun(name);
                let by: Vec<&str> = counteracted_by(effects, catalog, name).collect();
                if by.is_empty() {
                    noun.to_string()
                } else {
                    format!("~{noun}~ (counteracted by {})", oxford_join(&by))
                }
            })
            .collect()
    }

    /// Plain-language summary of the defensive affected state vs `baseline`.
    pub fn status(
        &mut self,
        catalog: &EffectCatalog,
        opponent_active: &[String],
        baseline: &BaseStats,
    ) -> CatalogResult<String> {
        let stats = self.affected_state(catalog, opponent_active, true)?;
        let attributes = [
            ("Spell-casting ability", stats.spellcasting, baseline.spellcasting),
            ("Accuracy", stats.accuracy, baseline.accuracy),
            ("Evasive ability", stats.evasion, baseline.evasion),
        ];

        let mut lines: Vec<String> = attributes
            .iter()
            .map(|&(label, value, initial)| {
                if value == initial {
                    format!("Your {label} is normal")
                } else if value > initial {
                    format!("Your {label} is {} improved", degree(value - initial).adverb)
                } else {
                    format!("Your {label} is {} diminished", severity(initial - value).adverb)
                }
            })
            .collect();

        if stats.pain > 0.0 {
            lines.push(format!("You are in {} pain", severity(stats.pain).adjective));
        } else {
            lines.push("You feel no pain".to_string());
        }

        if stats.shield > 0.0 {
            lines.push(format!(
                "and you have a {} shield.",
                advantage(stats.shield).adjective
            ));
        } else {
            lines.push("and you have no magical shield.".to_string());
        }

        Ok(lines.join(",\n"))
    }
}
