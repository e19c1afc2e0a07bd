//! Stat modifier engine.
//!
//! Folds active effects into a player's working stats. Each effect applies,
//! in order:
//!
//! 1. its literal modifiers (borrowed entries expand to the other effect's
//!    literal modifiers)
//! 2. its synergies, each applied as many times as its condition allows
//! 3. its `modify` hook, if any
//!
//! The fold always starts from the stats it is given and never mutates the
//! caller's copy, so it can be recomputed any number of times per turn.
//!
//! ## Verbose mode
//!
//! With `verbose` set the engine collects one sentence per narrated
//! modifier, e.g. "@bob has difficulty concentrating because of @bob's stench."

use tracing::trace;

use crate::core::TurnStats;
use crate::error::CatalogResult;

use super::catalog::EffectCatalog;
use super::condition::{ConditionEvaluator, EffectPool};
use super::definition::{EffectDef, Modifier, ModifierEntry};

/// Who is being folded and against what.
#[derive(Clone, Copy, Debug)]
pub struct FoldContext<'a> {
    /// Owner of the effects.
    pub player: &'a str,
    /// Owner's active effects.
    pub own: &'a [String],
    /// Opponent's active effects, for scoped synergies.
    pub opponent: &'a [String],
    /// Defensive pass (the player is being targeted).
    pub is_defense: bool,
}

impl<'a> FoldContext<'a> {
    fn pool(&self) -> EffectPool<'a> {
        EffectPool::new(self.own, self.opponent)
    }
}

/// Folded stats plus the explanations gathered in verbose mode.
#[derive(Clone, Debug, PartialEq)]
pub struct AffectedStats {
    pub stats: TurnStats,
    pub explanations: Vec<String>,
}

/// Applies effect modifiers to working stats.
#[derive(Clone, Copy, Debug)]
pub struct StatModifierEngine<'a> {
    catalog: &'a EffectCatalog,
}

impl<'a> StatModifierEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a EffectCatalog) -> Self {
        Self { catalog }
    }

    /// Fold every name in `ctx.own` into a copy of `base`, in order.
    pub fn fold(
        &self,
        base: &TurnStats,
        ctx: &FoldContext<'_>,
        verbose: bool,
    ) -> CatalogResult<AffectedStats> {
        let mut stats = *base;
        let mut explanations = Vec::new();

        for name in ctx.own {
            self.apply_effect(&mut stats, name, ctx, verbose, &mut explanations)?;
        }

        trace!(player = ctx.player, is_defense = ctx.is_defense, ?stats, "stats folded");
        Ok(AffectedStats {
            stats,
            explanations,
        })
    }

    /// Apply one effect to `stats`.
    pub fn apply_effect(
        &self,
        stats: &mut TurnStats,
        name: &str,
        ctx: &FoldContext<'_>,
        verbose: bool,
        explanations: &mut Vec<String>,
    ) -> CatalogResult<()> {
        let def = self.catalog.require(name)?;
        let mut narrate = |source: &EffectDef, modifier: &Modifier| {
            if let (true, Some(text)) = (verbose, &modifier.narration) {
                explanations.push(format!(
                    "@{} {} because of {}.",
                    ctx.player,
                    text,
                    source.object(ctx.player)
                ));
            }
        };

        for entry in &def.modifiers {
            self.apply_entry(stats, def, entry, &mut narrate)?;
        }

        let pool = ctx.pool();
        for synergy in &def.synergies {
            let times = ConditionEvaluator::repetitions(&synergy.condition, &pool);
            for _ in 0..times {
                for entry in &synergy.modifiers {
                    self.apply_entry(stats, def, entry, &mut narrate)?;
                }
            }
        }

        if let Some(hooks) = &def.hooks {
            hooks.modify(stats, ctx.is_defense);
        }

        Ok(())
    }

    fn apply_entry(
        &self,
        stats: &mut TurnStats,
        owner: &EffectDef,
        entry: &ModifierEntry,
        narrate: &mut impl FnMut(&EffectDef, &Modifier),
    ) -> CatalogResult<()> {
        match entry {
            ModifierEntry::Literal(modifier) => {
                stats.apply(modifier.stat, modifier.op, modifier.operand);
                narrate(owner, modifier);
            }
            ModifierEntry::Borrowed(other) => {
                let borrowed = self.catalog.require(other)?;
                for nested in &borrowed.modifiers {
                    if let ModifierEntry::Literal(modifier) = nested {
                        stats.apply(modifier.stat, modifier.op, modifier.operand);
                        narrate(borrowed, modifier);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BaseStats, Stat};
    use crate::effects::{EffectCondition, Synergy};

    fn catalog() -> EffectCatalog {
        EffectCatalog::builder()
            .effect(
                EffectDef::new("stench")
                    .possessive()
                    .with_modifier(
                        Modifier::sub(Stat::Spellcasting, 10.0)
                            .narrated("has difficulty concentrating"),
                    ),
            )
            .effect(EffectDef::new("bowel-stench").possessive().with_borrowed("stench"))
            .effect(
                EffectDef::new("large-nose").possessive().with_synergy(
                    Synergy::new(
                        EffectCondition::each_of(["stench", "bowel-stench"]).on_either_player(),
                    )
                    .with_borrowed("stench"),
                ),
            )
            .effect(EffectDef::new("water"))
            .effect(
                EffectDef::new("lightning")
                    .with_modifier(Modifier::add(Stat::Pain, 20.0))
                    .with_synergy(
                        Synergy::new(EffectCondition::any_of(["water"]))
                            .with_modifier(Modifier::add(Stat::Pain, 10.0)),
                    ),
            )
            .build()
            .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn base() -> TurnStats {
        TurnStats::from_base(&BaseStats::default())
    }

    fn bob<'a>(own: &'a [String], opponent: &'a [String], is_defense: bool) -> FoldContext<'a> {
        FoldContext {
            player: "bob",
            own,
            opponent,
            is_defense,
        }
    }

    #[test]
    fn test_literal_modifier() {
        let catalog = catalog();
        let engine = StatModifierEngine::new(&catalog);
        let own = names(&["stench"]);
        let ctx = bob(&own, &[], false);

        let folded = engine.fold(&base(), &ctx, false).unwrap();
        assert_eq!(folded.stats.spellcasting, 90.0);
        assert!(folded.explanations.is_empty());
    }

    #[test]
    fn test_borrowed_modifier() {
        let catalog = catalog();
        let engine = StatModifierEngine::new(&catalog);
        let own = names(&["bowel-stench"]);
        let ctx = bob(&own, &[], false);

        let folded = engine.fold(&base(), &ctx, true).unwrap();
        assert_eq!(folded.stats.spellcasting, 90.0);
        assert_eq!(
            folded.explanations,
            vec!["@bob has difficulty concentrating because of @bob's stench."]
        );
    }

    #[test]
    fn test_each_synergy_counts_both_players() {
        let catalog = catalog();
        let engine = StatModifierEngine::new(&catalog);
        let own = names(&["large-nose", "stench"]);
        let opponent = names(&["bowel-stench"]);
        let ctx = bob(&own, &opponent, false);

        // large-nose: stench twice (once per present name), stench itself once
        let folded = engine.fold(&base(), &ctx, false).unwrap();
        assert_eq!(folded.stats.spellcasting, 70.0);
    }

    #[test]
    fn test_each_synergy_zero_matches() {
        let catalog = catalog();
        let engine = StatModifierEngine::new(&catalog);
        let own = names(&["large-nose"]);
        let ctx = bob(&own, &[], false);

        let folded = engine.fold(&base(), &ctx, false).unwrap();
        assert_eq!(folded.stats, base());
    }

    #[test]
    fn test_or_synergy() {
        let catalog = catalog();
        let engine = StatModifierEngine::new(&catalog);

        let dry = names(&["lightning"]);
        let ctx = bob(&dry, &[], true);
        assert_eq!(engine.fold(&base(), &ctx, false).unwrap().stats.pain, 20.0);

        let wet = names(&["water", "lightning"]);
        let ctx = bob(&wet, &[], true);
        assert_eq!(engine.fold(&base(), &ctx, false).unwrap().stats.pain, 30.0);
    }

    #[test]
    fn test_fold_does_not_mutate_base() {
        let catalog = catalog();
        let engine = StatModifierEngine::new(&catalog);
        let own = names(&["stench"]);
        let ctx = bob(&own, &[], false);
        let start = base();

        let first = engine.fold(&start, &ctx, false).unwrap();
        let second = engine.fold(&start, &ctx, false).unwrap();

        assert_eq!(start, base());
        assert_eq!(first, second);
    }
}
