//! Behaviour hooks for effects that need imperative logic.
//!
//! Most effects are pure data. The few that are not (confusion redirecting
//! a cast, a spectral body letting spells pass through) implement
//! [`EffectHooks`] and are attached to their definition with
//! [`EffectDef::with_hooks`](super::EffectDef::with_hooks).
//!
//! ## Hook points
//!
//! - `modify`: runs last when folding the effect into working stats
//! - `before_cast`: may block the owner's cast or redirect it to another spell
//! - `before_hit`: may veto an incoming hit on the owner

use std::fmt;

use crate::core::{DuelRng, TurnStats};
use crate::narration::OutputBuffer;
use crate::spells::{Spell, SpellBook};

/// Verdict of a `before_cast` hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastGate {
    /// Let the cast continue.
    Proceed,
    /// Abort the cast.
    Block,
    /// Abort the cast and attempt this incantation instead.
    Redirect(String),
}

/// Context handed to `before_cast`.
pub struct CastAttempt<'a> {
    /// Name of the caster (the hook's owner).
    pub caster: &'a str,
    pub spell: &'a Spell,
    pub on_self: bool,
    /// Spell book, for hooks that substitute another spell.
    pub spells: &'a SpellBook,
    pub rng: &'a mut DuelRng,
    pub output: &'a mut OutputBuffer,
}

/// Context handed to `before_hit`.
pub struct HitAttempt<'a> {
    /// Name of the player about to be hit (the hook's owner).
    pub target: &'a str,
    pub caster: &'a str,
    pub spell: &'a Spell,
    pub rng: &'a mut DuelRng,
    pub output: &'a mut OutputBuffer,
}

/// Imperative behaviour attached to an effect definition.
///
/// All methods have no-op defaults so implementors only override the hook
/// points they need.
pub trait EffectHooks: Send + Sync + fmt::Debug {
    /// Adjust working stats after the declarative modifiers.
    fn modify(&self, _stats: &mut TurnStats, _is_defense: bool) {}

    /// Inspect a cast by the owner before any roll is made.
    fn before_cast(&self, _attempt: &mut CastAttempt<'_>) -> CastGate {
        CastGate::Proceed
    }

    /// Inspect a hit on the owner. Returning `false` vetoes it.
    fn before_hit(&self, _attempt: &mut HitAttempt<'_>) -> bool {
        true
    }
}
