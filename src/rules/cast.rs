//! Spell cast resolution.
//!
//! One incantation moves through a fixed sequence of stages:
//!
//! ```text
//! gate -> success roll -> hit roll (skipped on self) -> apply -> narrate
//! ```
//!
//! ## Gate
//!
//! Every active effect on the caster may block the cast or redirect it to
//! another spell. A redirect is resolved as a nested cast (bounded by
//! `DuelConfig::max_redirects`); the outer cast still reports `Blocked`.
//!
//! ## Rolls
//!
//! Both rolls use affected stats with accuracy, evasion and pain clamped to
//! their configured bounds. Spells whose hit modifier reaches the auto-hit
//! sentinel skip the hit roll and the target's hit veto.
//!
//! ## Apply
//!
//! Added effects go through the [`EffectResolver`]; global effects land on
//! both duelists. Removals and toggles follow, then the spell's own hook.

use tracing::{debug, trace};

use crate::core::{DuelConfig, DuelRng, TurnStats};
use crate::effects::{
    CastAttempt, CastGate, EffectCatalog, EffectHooks, EffectResolver, HitAttempt, NarrationEvent,
};
use crate::error::CatalogResult;
use crate::narration::{oxford_join, OutputBuffer};
use crate::spells::{Spell, SpellBook, SpellCast, SpellFailure};

use super::player::Player;

/// How an incantation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastOutcome {
    /// An effect on the caster stopped the cast before any roll.
    Blocked,
    /// The success roll failed.
    Failed,
    /// The hit roll failed.
    Missed,
    /// The hit landed but an effect on the target vetoed it.
    Deflected,
    /// The spell took effect.
    Hit,
}

impl CastOutcome {
    /// Whether the caster got the spell off (hit, missed or deflected).
    #[must_use]
    pub fn succeeded(self) -> bool {
        matches!(self, Self::Hit | Self::Missed | Self::Deflected)
    }

    /// Whether the success roll failed.
    #[must_use]
    pub fn is_failure(self) -> bool {
        self == Self::Failed
    }
}

/// Success threshold on a 0-100 roll.
#[must_use]
pub fn cast_chance(config: &DuelConfig, caster: &TurnStats, success_rate: f64) -> f64 {
    (caster.spellcasting - config.pain_bounds.clamp(caster.pain)) * success_rate
}

/// Probability (0-1 before the modifier) that a cast lands on the defender.
///
/// Zero when the attacker's pain-adjusted accuracy is not positive.
#[must_use]
pub fn hit_chance(
    config: &DuelConfig,
    attacker: &TurnStats,
    defender: &TurnStats,
    hit_modifier: f64,
) -> f64 {
    let accuracy =
        config.accuracy_bounds.clamp(attacker.accuracy) - config.pain_bounds.clamp(attacker.pain);
    let evasion =
        config.evasion_bounds.clamp(defender.evasion) - config.pain_bounds.clamp(defender.pain);

    if accuracy <= 0.0 {
        return 0.0;
    }
    (accuracy - evasion) / accuracy + hit_modifier / 100.0
}

/// Resolves incantations for one duel.
pub struct CastResolver<'a> {
    catalog: &'a EffectCatalog,
    spells: &'a SpellBook,
    config: &'a DuelConfig,
    rng: &'a mut DuelRng,
    output: &'a mut OutputBuffer,
}

impl<'a> CastResolver<'a> {
    pub fn new(
        catalog: &'a EffectCatalog,
        spells: &'a SpellBook,
        config: &'a DuelConfig,
        rng: &'a mut DuelRng,
        output: &'a mut OutputBuffer,
    ) -> Self {
        Self {
            catalog,
            spells,
            config,
            rng,
            output,
        }
    }

    /// Resolve `spell` cast by `caster`, aimed at `opponent` unless `on_self`.
    ///
    /// Only catalog defects are errors; every game outcome is narrated.
    pub fn cast(
        &mut self,
        caster: &mut Player,
        opponent: &mut Player,
        spell: &Spell,
        on_self: bool,
    ) -> CatalogResult<CastOutcome> {
        self.cast_at_depth(caster, opponent, spell, on_self, 0)
    }

    fn cast_at_depth(
        &mut self,
        caster: &mut Player,
        opponent: &mut Player,
        spell: &Spell,
        on_self: bool,
        depth: u32,
    ) -> CatalogResult<CastOutcome> {
        if let Some(redirect) = self.gate(caster, spell, on_self) {
            let spells = self.spells;
            let next = redirect
                .filter(|_| depth < self.config.max_redirects)
                .and_then(|incantation| spells.find(&incantation));
            if let Some(next) = next {
                self.cast_at_depth(caster, opponent, next, on_self, depth + 1)?;
            }
            debug!(caster = caster.name(), spell = %spell.incantation, "cast blocked");
            return Ok(CastOutcome::Blocked);
        }

        let opponent_active = opponent.active_effects(self.catalog);
        let offense = caster.affected_state(self.catalog, &opponent_active, false)?;

        if !self.roll_success(&offense, spell) {
            self.fail(caster, spell, on_self);
            return Ok(CastOutcome::Failed);
        }
        caster.state_mut().num_failures = 0;

        if !on_self {
            let caster_active = caster.active_effects(self.catalog);
            let defense = opponent.affected_state(self.catalog, &caster_active, true)?;

            if !self.config.is_auto_hit(spell.hit_modifier) {
                let chance = hit_chance(self.config, &offense, &defense, spell.hit_modifier);
                if chance <= 0.0 || self.rng.roll_unit() > chance {
                    debug!(
                        caster = caster.name(),
                        spell = %spell.incantation,
                        chance,
                        "cast missed"
                    );
                    self.output.send(format!(
                        "@{} casts _{}_ but fails to hit @{}.",
                        caster.name(),
                        spell.incantation,
                        opponent.name()
                    ));
                    return Ok(CastOutcome::Missed);
                }

                if !self.allow_hit(caster, opponent, spell) {
                    debug!(caster = caster.name(), spell = %spell.incantation, "hit deflected");
                    return Ok(CastOutcome::Deflected);
                }
            }
        }

        self.land(caster, opponent, spell, on_self)?;
        Ok(CastOutcome::Hit)
    }

    /// `None` to proceed, `Some(redirect)` if blocked.
    fn gate(&mut self, caster: &Player, spell: &Spell, on_self: bool) -> Option<Option<String>> {
        let hooks: Vec<&'a dyn EffectHooks> = self.active_hooks(caster);

        let mut blocked = false;
        let mut redirect = None;
        for hook in hooks {
            let mut attempt = CastAttempt {
                caster: caster.name(),
                spell,
                on_self,
                spells: self.spells,
                rng: &mut *self.rng,
                output: &mut *self.output,
            };
            match hook.before_cast(&mut attempt) {
                CastGate::Proceed => {}
                CastGate::Block => blocked = true,
                CastGate::Redirect(incantation) => {
                    blocked = true;
                    redirect.get_or_insert(incantation);
                }
            }
        }

        blocked.then_some(redirect)
    }

    fn active_hooks(&self, player: &Player) -> Vec<&'a dyn EffectHooks> {
        let catalog = self.catalog;
        player
            .active_effects(catalog)
            .iter()
            .filter_map(|name| catalog.get(name))
            .filter_map(|def| def.hooks.as_deref())
            .collect()
    }

    fn roll_success(&mut self, offense: &TurnStats, spell: &Spell) -> bool {
        let threshold = cast_chance(self.config, offense, spell.base_success_rate);
        let roll = self.rng.roll_percent();
        trace!(roll, threshold, spell = %spell.incantation, "success roll");
        roll <= threshold
    }

    fn fail(&mut self, caster: &mut Player, spell: &Spell, on_self: bool) {
        let name = caster.name().to_string();
        let state = caster.state_mut();
        state.num_failures += 1;
        debug!(
            caster = %name,
            spell = %spell.incantation,
            failures = state.num_failures,
            "cast failed"
        );

        let narrated = match &spell.hooks {
            Some(hooks) => hooks.on_failure(&mut SpellFailure {
                caster: state,
                on_self,
                rng: &mut *self.rng,
                output: &mut *self.output,
            }),
            None => false,
        };
        if !narrated {
            self.output
                .send(format!("@{name} fails to cast _{}_.", spell.incantation));
        }
    }

    fn allow_hit(&mut self, caster: &Player, target: &Player, spell: &Spell) -> bool {
        let mut scratch = OutputBuffer::new();
        scratch.start_send();
        scratch.append(format!(
            "@{} casts _{}_ on @{}. ",
            caster.name(),
            spell.incantation,
            target.name()
        ));

        let mut allowed = true;
        for hook in self.active_hooks(target) {
            let mut attempt = HitAttempt {
                target: target.name(),
                caster: caster.name(),
                spell,
                rng: &mut *self.rng,
                output: &mut scratch,
            };
            allowed &= hook.before_hit(&mut attempt);
        }

        if !allowed {
            self.output.absorb(&mut scratch);
        }
        allowed
    }

    fn land(
        &mut self,
        caster: &mut Player,
        opponent: &mut Player,
        spell: &Spell,
        on_self: bool,
    ) -> CatalogResult<()> {
        let caster_name = caster.name().to_string();
        let (target, bystander) = if on_self {
            (caster, opponent)
        } else {
            (opponent, caster)
        };
        let target_name = target.name().to_string();

        debug!(
            caster = %caster_name,
            target = %target_name,
            spell = %spell.incantation,
            "cast hit"
        );
        self.output.start_send();
        self.output
            .append(format!("@{caster_name} casts _{}_", spell.incantation));
        if !on_self {
            self.output.append(format!(" on @{target_name}"));
        }
        self.output.append(format!(", which {}. ", spell.description));

        let before = target.effects().clone();
        self.apply(&caster_name, target, bystander, spell, on_self)?;

        if *target.effects() != before {
            let bystander_active = bystander.active_effects(self.catalog);
            let explanations = target.explain_effects(self.catalog, &bystander_active)?;
            for line in explanations {
                self.output.append(format!("{line} "));
            }
        }

        if let Some(narration) = spell.narration_for(&target_name) {
            self.output.append(narration);
        }
        self.output.end();
        Ok(())
    }

    fn apply(
        &mut self,
        caster_name: &str,
        target: &mut Player,
        bystander: &mut Player,
        spell: &Spell,
        on_self: bool,
    ) -> CatalogResult<()> {
        let resolver =
            EffectResolver::new(self.catalog).with_max_rounds(self.config.max_combination_rounds);

        if !spell.effects.is_empty() {
            self.output.append(format!(
                "_{}_ adds {} to @{}. ",
                spell.incantation,
                oxford_join(&self.catalog.nouns(&spell.effects)),
                target.name()
            ));
        }

        for name in &spell.effects {
            let is_global = self.catalog.require(name)?.global;
            let outcome = resolver.add_effect(target.effects(), name, target.name())?;
            self.narrate(&outcome.events);
            target.set_effects(outcome.effects);

            if is_global {
                let outcome = resolver.add_effect(bystander.effects(), name, bystander.name())?;
                self.narrate(&outcome.events);
                bystander.set_effects(outcome.effects);
            }
        }

        for reference in &spell.removed_effects {
            let outcome = resolver.remove_matching(target.effects(), reference, target.name());
            self.narrate(&outcome.events);
            target.set_effects(outcome.effects);
        }

        for name in &spell.toggled_effects {
            let outcome = resolver.toggle_effect(target.effects(), name, target.name())?;
            self.narrate(&outcome.events);
            target.set_effects(outcome.effects);
        }

        if let Some(hooks) = &spell.hooks {
            hooks.cast(&mut SpellCast {
                caster: caster_name,
                target: target.state_mut(),
                on_self,
                rng: &mut *self.rng,
                output: &mut *self.output,
            });
        }

        target.invalidate();
        bystander.invalidate();
        Ok(())
    }

    fn narrate(&mut self, events: &[NarrationEvent]) {
        for event in events {
            self.output.append(format!("{event} "));
        }
    }
}
