//! Spells: declarative, effect-granting actions.
//!
//! - `Spell`: incantation, narration, effects, roll modifiers
//! - `SpellHooks`: bespoke `cast` / `on_failure` behaviour
//! - `SpellBook`: validated, case-insensitive lookup

mod book;
mod spell;
mod standard;

pub use book::{SpellBook, SpellBookBuilder};
pub use spell::{Spell, SpellCast, SpellFailure, SpellHooks};
pub use standard::{standard_spells, Backfire, Wound};
