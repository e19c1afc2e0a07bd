//! Built-in effect behaviours.
//!
//! These are the strategy objects used by the standard catalog. Each one
//! narrates what happened before returning its verdict.

use tracing::debug;

use crate::narration::spoonerize;

use super::hooks::{CastAttempt, CastGate, EffectHooks, HitAttempt};

/// Sometimes utters a random spell instead of the intended one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Confusion {
    /// Probability of redirecting a cast.
    pub chance: f64,
}

impl Default for Confusion {
    fn default() -> Self {
        Self { chance: 0.25 }
    }
}

impl EffectHooks for Confusion {
    fn before_cast(&self, attempt: &mut CastAttempt<'_>) -> CastGate {
        if !attempt.rng.gen_bool(self.chance) {
            return CastGate::Proceed;
        }

        let incantations: Vec<&str> = attempt.spells.incantations().collect();
        let Some(&replacement) = attempt.rng.choose(&incantations) else {
            return CastGate::Proceed;
        };

        debug!(
            caster = attempt.caster,
            intended = %attempt.spell.incantation,
            replacement,
            "confused cast"
        );
        attempt.output.send(format!(
            "@{} attempts to utter the _{}_ but is confused and instead utters _{}_.",
            attempt.caster, attempt.spell.incantation, replacement
        ));
        CastGate::Redirect(replacement.to_string())
    }
}

/// Garbles multi-word incantations by swapping their beginnings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intoxication {
    /// Probability of garbling an eligible incantation.
    pub chance: f64,
}

impl Default for Intoxication {
    fn default() -> Self {
        Self { chance: 0.6 }
    }
}

impl EffectHooks for Intoxication {
    fn before_cast(&self, attempt: &mut CastAttempt<'_>) -> CastGate {
        let incantation = attempt.spell.incantation.as_str();
        let words: Vec<&str> = incantation.split(' ').collect();

        if words.len() < 2 || !attempt.rng.gen_bool(self.chance) {
            return CastGate::Proceed;
        }

        let garbled = spoonerize(&words).join(" ");
        if garbled == incantation {
            return CastGate::Proceed;
        }

        attempt.output.send(format!(
            "@{} tries to say _{}_ but drunkenly says _{}_ instead.",
            attempt.caster, incantation, garbled
        ));
        CastGate::Block
    }
}

/// Replaces one letter with another, spoiling any incantation containing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhonemicSwap {
    pub from: char,
    pub to: char,
}

impl Default for PhonemicSwap {
    fn default() -> Self {
        Self { from: 'b', to: 'd' }
    }
}

impl EffectHooks for PhonemicSwap {
    fn before_cast(&self, attempt: &mut CastAttempt<'_>) -> CastGate {
        let incantation = attempt.spell.incantation.as_str();
        if !incantation.contains(self.from) {
            return CastGate::Proceed;
        }

        let spoken = incantation.replacen(self.from, &self.to.to_string(), 1);
        attempt.output.send(format!(
            "@{} tries to say _{}_ but instead says _{}_.",
            attempt.caster, incantation, spoken
        ));
        CastGate::Block
    }
}

/// Incorporeal body: spells pass straight through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spectral;

impl EffectHooks for Spectral {
    fn before_hit(&self, attempt: &mut HitAttempt<'_>) -> bool {
        attempt.output.append(format!(
            "The {} passes straight through @{} with no effect.",
            attempt.spell.projectile(),
            attempt.target
        ));
        false
    }
}
