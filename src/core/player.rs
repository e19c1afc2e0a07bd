//! Persistent per-duelist record.
//!
//! ## PlayerState
//!
//! Everything the store keeps about one duelist between incantations:
//! identity, baseline stats, the working turn stats, the ordered list of
//! effects and the consecutive-failure streak.
//!
//! ## EffectList
//!
//! Ordered, duplicate-free list of effect names backed by `im::Vector` so
//! the resolver can hand back new lists without deep copies. Insertion order
//! is narration and fold order.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::stats::{BaseStats, TurnStats};

/// Ordered list of effect names. Duplicates are never inserted.
pub type EffectList = Vector<String>;

/// Build an `EffectList` from names, skipping duplicates.
pub fn effect_list<I, S>(names: I) -> EffectList
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut list = EffectList::new();
    for name in names {
        let name = name.into();
        if !list.contains(&name) {
            list.push_back(name);
        }
    }
    list
}

/// A duelist's persistent state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Player handle (without `@`).
    pub name: String,

    /// Handle of the other duelist.
    pub opponent: String,

    /// Whether this player issued the challenge.
    pub is_challenger: bool,

    /// Baseline stats; persist across turns.
    pub base: BaseStats,

    /// Working stats for the current phase.
    pub turn: TurnStats,

    /// Active effect names in insertion order.
    pub effects: EffectList,

    /// Consecutive failed casts.
    pub num_failures: u32,
}

impl PlayerState {
    /// Create the starting record for a freshly accepted duel.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        is_challenger: bool,
        opponent: impl Into<String>,
        baseline: BaseStats,
    ) -> Self {
        Self {
            name: name.into(),
            opponent: opponent.into(),
            is_challenger,
            base: baseline,
            turn: TurnStats::from_base(&baseline),
            effects: EffectList::new(),
            num_failures: 0,
        }
    }

    /// Reset the working stats from the baseline. Effects are untouched.
    pub fn reset_turn_stats(&mut self) {
        self.turn = TurnStats::from_base(&self.base);
    }

    /// Whether the named effect is in this player's list (active or not).
    #[must_use]
    pub fn has_effect(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e == name)
    }

    /// The duel's `(challenger, challengee)` pair as seen from this player.
    #[must_use]
    pub fn duel_pair(&self) -> (&str, &str) {
        if self.is_challenger {
            (&self.name, &self.opponent)
        } else {
            (&self.opponent, &self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = PlayerState::new("alice", true, "bob", BaseStats::default());

        assert_eq!(state.name, "alice");
        assert_eq!(state.opponent, "bob");
        assert!(state.is_challenger);
        assert_eq!(state.turn.spellcasting, 100.0);
        assert_eq!(state.turn.accuracy, 95.0);
        assert_eq!(state.turn.evasion, 5.0);
        assert_eq!(state.turn.shield, 0.0);
        assert_eq!(state.turn.pain, 0.0);
        assert!(state.effects.is_empty());
        assert_eq!(state.num_failures, 0);
    }

    #[test]
    fn test_reset_turn_stats_keeps_effects() {
        let mut state = PlayerState::new("alice", true, "bob", BaseStats::default());
        state.base.accuracy = 50.0;
        state.base.pain = 20.0;
        state.turn.shield = 30.0;
        state.effects.push_back("fog".to_string());

        state.reset_turn_stats();

        assert_eq!(state.turn.accuracy, 50.0);
        assert_eq!(state.turn.pain, 20.0);
        assert_eq!(state.turn.shield, 0.0);
        assert!(state.has_effect("fog"));
    }

    #[test]
    fn test_duel_pair() {
        let alice = PlayerState::new("alice", true, "bob", BaseStats::default());
        let bob = PlayerState::new("bob", false, "alice", BaseStats::default());

        assert_eq!(alice.duel_pair(), ("alice", "bob"));
        assert_eq!(bob.duel_pair(), ("alice", "bob"));
    }

    #[test]
    fn test_effect_list_dedupes() {
        let list = effect_list(["fog", "water", "fog"]);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], "fog");
        assert_eq!(list[1], "water");
    }

    #[test]
    fn test_player_state_bincode() {
        let mut state = PlayerState::new("bob", false, "alice", BaseStats::default());
        state.effects = effect_list(["stench", "levitation"]);

        let bytes = bincode::serialize(&state).unwrap();
        let decoded: PlayerState = bincode::deserialize(&bytes).unwrap();

        assert_eq!(state, decoded);
    }
}
