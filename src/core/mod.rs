//! Core engine types: stats, player records, duel state, RNG, configuration.
//!
//! This module holds the plain data the rest of the engine operates on.
//! Nothing here knows about specific effects or spells.

pub mod config;
pub mod player;
pub mod rng;
pub mod state;
pub mod stats;

pub use config::{Bounds, DuelConfig};
pub use player::{effect_list, EffectList, PlayerState};
pub use rng::{DuelRng, DuelRngState};
pub use state::{duel_key, player_key, turn_key, DuelStatus, Phase, Turn};
pub use stats::{BaseStats, Operator, Stat, TurnStats};
