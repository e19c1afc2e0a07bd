//! Duel-level state records and their store keys.
//!
//! ## DuelStatus
//!
//! Lifecycle of a challenge: `NotDueling` → `ChallengeSent` → `Dueling`.
//!
//! ## Turn
//!
//! Whose turn it is and which phase they are in. A turn is an optional
//! self-targeted `Passive` cast followed by a mandatory `Attack` cast.
//!
//! Store keys are deterministic strings derived from player handles so any
//! key/value backend can hold them.

use serde::{Deserialize, Serialize};

/// Status of a challenger/challengee pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelStatus {
    #[default]
    NotDueling,
    ChallengeSent,
    Dueling,
}

/// Phase of a player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Optional self-targeted cast.
    Passive,
    /// Mandatory cast on the opponent.
    Attack,
}

/// The current turn of a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Player allowed to act.
    pub player: String,
    /// Phase that player is in.
    pub phase: Phase,
}

impl Turn {
    /// Start a passive phase for `player`.
    pub fn passive(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            phase: Phase::Passive,
        }
    }

    /// Start an attack phase for `player`.
    pub fn attack(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            phase: Phase::Attack,
        }
    }

    /// Whether `player` holds this turn.
    #[must_use]
    pub fn is_held_by(&self, player: &str) -> bool {
        self.player == player
    }
}

/// Store key of the status record for a challenger/challengee pair.
#[must_use]
pub fn duel_key(challenger: &str, challengee: &str) -> String {
    format!("duel-status:{challenger}-{challengee}")
}

/// Store key of a player's duel record.
#[must_use]
pub fn player_key(name: &str) -> String {
    format!("{name}.duel-info")
}

/// Store key of the turn record for a challenger/challengee pair.
#[must_use]
pub fn turn_key(challenger: &str, challengee: &str) -> String {
    format!("duel-turn:{challenger}-{challengee}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(duel_key("alice", "bob"), "duel-status:alice-bob");
        assert_eq!(player_key("alice"), "alice.duel-info");
        assert_eq!(turn_key("alice", "bob"), "duel-turn:alice-bob");
    }

    #[test]
    fn test_turn_constructors() {
        let turn = Turn::attack("alice");
        assert_eq!(turn.phase, Phase::Attack);
        assert!(turn.is_held_by("alice"));
        assert!(!turn.is_held_by("bob"));

        assert_eq!(Turn::passive("bob").phase, Phase::Passive);
    }

    #[test]
    fn test_default_status() {
        assert_eq!(DuelStatus::default(), DuelStatus::NotDueling);
    }
}
