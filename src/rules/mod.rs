//! Duel rules: turn flow, cast resolution and the player aggregate.
//!
//! - `DuelManager`: command dispatch, turn bookkeeping, duel lifecycle
//! - `CastResolver`: one incantation from gate to narration
//! - `Player`: a duelist's record with cached affected stats
//!
//! The manager is the only component that touches the
//! [`StateStore`](crate::store::StateStore); everything below it works on
//! in-memory records.

pub mod cast;
pub mod engine;
pub mod player;

pub use cast::{cast_chance, hit_chance, CastOutcome, CastResolver};
pub use engine::{DuelManager, DuelOutcome, EndReason, TurnReport};
pub use player::{active_effects, Player};
