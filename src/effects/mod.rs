//! Effect system: status conditions on duelists.
//!
//! - `EffectDef`: static definition (narration, modifiers, relations, hooks)
//! - `EffectCatalog`: validated table of definitions and combination rules
//! - `EffectResolver`: adds and removes effects, crafting combinations
//! - `StatModifierEngine`: folds active effects into working stats
//!
//! ## Design Philosophy
//!
//! Effects are data. Modifier lists, synergies and relation lists cover
//! almost everything; the handful of effects that need imperative logic
//! implement [`EffectHooks`] and are attached as strategy objects.

mod behaviors;
mod catalog;
mod condition;
mod definition;
mod hooks;
mod modifiers;
mod resolver;
mod standard;

pub use behaviors::{Confusion, Intoxication, PhonemicSwap, Spectral};
pub use catalog::{CombinationRule, EffectCatalog, EffectCatalogBuilder};
pub use condition::{ConditionEvaluator, EffectCondition, EffectPool, SynergyScope};
pub use definition::{Determiner, EffectDef, EffectRef, Modifier, ModifierEntry, Synergy};
pub use hooks::{CastAttempt, CastGate, EffectHooks, HitAttempt};
pub use modifiers::{AffectedStats, FoldContext, StatModifierEngine};
pub use resolver::{AddOutcome, EffectResolver, NarrationEvent, RemoveOutcome};
pub use standard::standard_catalog;
