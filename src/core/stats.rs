//! Player statistics and the arithmetic applied to them.
//!
//! ## BaseStats
//!
//! Baseline values that persist across turns.
//!
//! ## TurnStats
//!
//! Per-phase working values. They are reset from `BaseStats` at the start of
//! each of a player's phases and then folded through the active effects.
//!
//! All values use a percentage-like scale (0-100), stored as `f64` so that
//! multiplicative modifiers compose without rounding.

use serde::{Deserialize, Serialize};

/// A working statistic that effect modifiers can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Chance factor for getting a spell off at all.
    Spellcasting,
    /// Chance factor for hitting the opponent.
    Accuracy,
    /// Chance factor for dodging the opponent's spells.
    Evasion,
    /// Magical shield strength.
    Shield,
    /// Pain; reduces both spellcasting and accuracy/evasion.
    Pain,
}

impl Stat {
    /// All stats in display order.
    pub const ALL: [Stat; 5] = [
        Stat::Spellcasting,
        Stat::Accuracy,
        Stat::Evasion,
        Stat::Shield,
        Stat::Pain,
    ];

    /// Human-readable label used in status reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Stat::Spellcasting => "Spell-casting ability",
            Stat::Accuracy => "Accuracy",
            Stat::Evasion => "Evasive ability",
            Stat::Shield => "Shield",
            Stat::Pain => "Pain",
        }
    }
}

/// Operator of a modifier tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `=`
    Set,
}

impl Operator {
    /// Apply this operator to `current` with `operand`.
    #[must_use]
    pub fn apply(self, current: f64, operand: f64) -> f64 {
        match self {
            Operator::Add => current + operand,
            Operator::Sub => current - operand,
            Operator::Mul => current * operand,
            Operator::Div => current / operand,
            Operator::Set => operand,
        }
    }

    /// Source-style symbol, for debugging output.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+=",
            Operator::Sub => "-=",
            Operator::Mul => "*=",
            Operator::Div => "/=",
            Operator::Set => "=",
        }
    }
}

/// Baseline statistics that persist across turns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub spellcasting: f64,
    pub accuracy: f64,
    pub evasion: f64,
    pub pain: f64,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            spellcasting: 100.0,
            accuracy: 95.0,
            evasion: 5.0,
            pain: 0.0,
        }
    }
}

/// Per-phase working statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnStats {
    pub spellcasting: f64,
    pub accuracy: f64,
    pub evasion: f64,
    pub shield: f64,
    pub pain: f64,
}

impl TurnStats {
    /// Fresh turn stats derived from a baseline. The shield always starts at 0.
    #[must_use]
    pub fn from_base(base: &BaseStats) -> Self {
        Self {
            spellcasting: base.spellcasting,
            accuracy: base.accuracy,
            evasion: base.evasion,
            shield: 0.0,
            pain: base.pain,
        }
    }

    /// Read a stat.
    #[must_use]
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Spellcasting => self.spellcasting,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
            Stat::Shield => self.shield,
            Stat::Pain => self.pain,
        }
    }

    /// Mutable access to a stat.
    pub fn get_mut(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Spellcasting => &mut self.spellcasting,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
            Stat::Shield => &mut self.shield,
            Stat::Pain => &mut self.pain,
        }
    }

    /// Apply `stat op= operand`.
    pub fn apply(&mut self, stat: Stat, op: Operator, operand: f64) {
        let slot = self.get_mut(stat);
        *slot = op.apply(*slot, operand);
    }
}

impl Default for TurnStats {
    fn default() -> Self {
        Self::from_base(&BaseStats::default())
    }
}
