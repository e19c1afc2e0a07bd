//! Spell definitions.
//!
//! A `Spell` is declarative: the effects it adds, removes or toggles on its
//! target, its narration and its roll modifiers. Spells that need bespoke
//! behaviour attach [`SpellHooks`].

use std::fmt;
use std::sync::Arc;

use crate::core::{DuelRng, PlayerState};
use crate::effects::EffectRef;
use crate::narration::OutputBuffer;

/// Context handed to a spell's bespoke `cast` hook.
pub struct SpellCast<'a> {
    pub caster: &'a str,
    /// The player the spell landed on (the caster for self casts).
    pub target: &'a mut PlayerState,
    pub on_self: bool,
    pub rng: &'a mut DuelRng,
    pub output: &'a mut OutputBuffer,
}

/// Context handed to a spell's `on_failure` hook.
pub struct SpellFailure<'a> {
    pub caster: &'a mut PlayerState,
    pub on_self: bool,
    pub rng: &'a mut DuelRng,
    pub output: &'a mut OutputBuffer,
}

/// Imperative behaviour attached to a spell.
pub trait SpellHooks: Send + Sync + fmt::Debug {
    /// Runs after the declarative effects were applied.
    fn cast(&self, _cast: &mut SpellCast<'_>) {}

    /// Runs when the success roll fails. Return `true` if the failure was
    /// narrated; otherwise the generic message is used.
    fn on_failure(&self, _failure: &mut SpellFailure<'_>) -> bool {
        false
    }
}

/// A castable spell.
#[derive(Clone, Debug)]
pub struct Spell {
    /// Words that cast the spell; matched case-insensitively.
    pub incantation: String,

    /// Predicate used in "casts _x_, which {description}."
    pub description: String,

    /// What flies at the target; defaults to "bolt of magic".
    pub projectile: Option<String>,

    /// Extra narration; `@target` is replaced with the target handle.
    pub narration: Option<String>,

    /// Effects added to the target.
    pub effects: Vec<String>,

    /// Effects removed from the target (attribute references allowed).
    pub removed_effects: Vec<EffectRef>,

    /// Effects added if absent, removed if present.
    pub toggled_effects: Vec<String>,

    /// Multiplier on the caster's spellcasting for the success roll.
    pub base_success_rate: f64,

    /// Added to the hit chance, in percent.
    pub hit_modifier: f64,

    pub hooks: Option<Arc<dyn SpellHooks>>,
}

impl Spell {
    /// Create a spell with no effects.
    pub fn new(incantation: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            incantation: incantation.into(),
            description: description.into(),
            projectile: None,
            narration: None,
            effects: Vec::new(),
            removed_effects: Vec::new(),
            toggled_effects: Vec::new(),
            base_success_rate: 1.0,
            hit_modifier: 0.0,
            hooks: None,
        }
    }

    /// Projectile description.
    #[must_use]
    pub fn projectile(&self) -> &str {
        self.projectile.as_deref().unwrap_or("bolt of magic")
    }

    /// Custom narration for a cast landing on `target`.
    #[must_use]
    pub fn narration_for(&self, target: &str) -> Option<String> {
        self.narration
            .as_ref()
            .map(|text| text.replace("@target", &format!("@{target}")))
    }

    /// Effect names this spell adds, toggles or removes by name.
    pub fn referenced_effects(&self) -> impl Iterator<Item = &str> {
        self.effects
            .iter()
            .chain(&self.toggled_effects)
            .map(String::as_str)
            .chain(self.removed_effects.iter().filter_map(EffectRef::as_name))
    }

    // === Builder ===

    #[must_use]
    pub fn with_effect(mut self, name: impl Into<String>) -> Self {
        self.effects.push(name.into());
        self
    }

    #[must_use]
    pub fn removing(mut self, reference: impl Into<EffectRef>) -> Self {
        self.removed_effects.push(reference.into());
        self
    }

    #[must_use]
    pub fn toggling(mut self, name: impl Into<String>) -> Self {
        self.toggled_effects.push(name.into());
        self
    }

    #[must_use]
    pub fn with_projectile(mut self, projectile: impl Into<String>) -> Self {
        self.projectile = Some(projectile.into());
        self
    }

    #[must_use]
    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }

    #[must_use]
    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.base_success_rate = rate;
        self
    }

    #[must_use]
    pub fn with_hit_modifier(mut self, modifier: f64) -> Self {
        self.hit_modifier = modifier;
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: impl SpellHooks + 'static) -> Self {
        self.hooks = Some(Arc::new(hooks));
        self
    }
}
