//! # wizards-duel
//!
//! Rules engine for a turn-based, narration-driven duel between two
//! wizards. Players cast spells by typing incantations; spells attach
//! effects; effects change stats, interact with each other and narrate
//! everything that happens.
//!
//! ## Design Principles
//!
//! 1. **Effects Are Data**: modifier lists, synergies and relation lists
//!    describe almost every effect. The few that need imperative logic
//!    attach behaviour hooks.
//!
//! 2. **Explicit Catalogs**: the effect catalog and spell book are values
//!    passed into the engine, validated when built. There is no global
//!    registry.
//!
//! 3. **Ordered Narration**: everything one command narrates is buffered
//!    and drained as a single ordered batch.
//!
//! ## Modules
//!
//! - `core`: stats, player records, turn records, configuration, RNG
//! - `effects`: effect definitions, catalog, resolver, stat folding
//! - `spells`: spell definitions and the spell book
//! - `rules`: cast resolution, player aggregate, duel manager
//! - `narration`: output buffer and wording helpers
//! - `command`: free-text command recognition
//! - `store`: persistence seam

pub mod command;
pub mod core;
pub mod effects;
pub mod error;
pub mod narration;
pub mod rules;
pub mod spells;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    BaseStats, Bounds, DuelConfig, DuelRng, DuelRngState, DuelStatus, EffectList, Operator,
    Phase, PlayerState, Stat, Turn, TurnStats,
};

pub use crate::effects::{
    standard_catalog, CastGate, CombinationRule, EffectCatalog, EffectCondition, EffectDef,
    EffectHooks, EffectRef, EffectResolver, Modifier, NarrationEvent, StatModifierEngine,
    Synergy,
};

pub use crate::spells::{standard_spells, Spell, SpellBook, SpellHooks};

pub use crate::rules::{
    CastOutcome, CastResolver, DuelManager, DuelOutcome, EndReason, Player, TurnReport,
};

pub use crate::narration::{Message, NarrationSink, OutputBuffer};

pub use crate::command::{Command, CommandParser};

pub use crate::store::{MemoryStore, StateStore};

pub use crate::error::{CatalogError, CatalogResult, DuelError, DuelResult};
