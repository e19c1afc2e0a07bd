//! Synergy conditions.
//!
//! A condition looks at the names in an effect pool and decides how many
//! times a synergy applies: zero (it does not fire), once, or once per
//! matching name for `each` conditions.
//!
//! ## Pools
//!
//! The pool is chosen by [`SynergyScope`]: the owner's effects, the
//! opponent's effects, or both lists together.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which effects a condition inspects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynergyScope {
    /// The effect owner's own list.
    #[default]
    Own,
    /// The opponent's list.
    Opponent,
    /// Both lists.
    Either,
}

/// Condition of a synergy.
///
/// `any_of` and `all_of` gate the synergy; `each_of` turns it into a
/// repeat count. Empty lists impose no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectCondition {
    pub any_of: SmallVec<[String; 4]>,
    pub all_of: SmallVec<[String; 4]>,
    pub each_of: SmallVec<[String; 4]>,
    pub scope: SynergyScope,
}

impl EffectCondition {
    /// Fires when at least one of `names` is present.
    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            any_of: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Fires when every one of `names` is present.
    pub fn all_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all_of: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Fires once per present name in `names`.
    pub fn each_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            each_of: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add an AND constraint.
    #[must_use]
    pub fn and_all_of<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_of.extend(names.into_iter().map(Into::into));
        self
    }

    /// Inspect the opponent's effects.
    #[must_use]
    pub fn on_opponent(mut self) -> Self {
        self.scope = SynergyScope::Opponent;
        self
    }

    /// Inspect both players' effects.
    #[must_use]
    pub fn on_either_player(mut self) -> Self {
        self.scope = SynergyScope::Either;
        self
    }

    /// Every name this condition mentions.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.any_of
            .iter()
            .chain(&self.all_of)
            .chain(&self.each_of)
            .map(String::as_str)
    }
}

/// Effect lists visible to a condition.
#[derive(Clone, Copy, Debug)]
pub struct EffectPool<'a> {
    pub own: &'a [String],
    pub opponent: &'a [String],
}

impl<'a> EffectPool<'a> {
    pub fn new(own: &'a [String], opponent: &'a [String]) -> Self {
        Self { own, opponent }
    }

    fn contains(&self, scope: SynergyScope, name: &str) -> bool {
        let in_own = || self.own.iter().any(|n| n == name);
        let in_opponent = || self.opponent.iter().any(|n| n == name);
        match scope {
            SynergyScope::Own => in_own(),
            SynergyScope::Opponent => in_opponent(),
            SynergyScope::Either => in_own() || in_opponent(),
        }
    }
}

/// Evaluator for synergy conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Number of times the synergy applies. Zero means it does not fire.
    #[must_use]
    pub fn repetitions(condition: &EffectCondition, pool: &EffectPool<'_>) -> usize {
        let scope = condition.scope;

        if !condition.any_of.is_empty()
            && !condition.any_of.iter().any(|n| pool.contains(scope, n))
        {
            return 0;
        }

        if !condition.all_of.iter().all(|n| pool.contains(scope, n)) {
            return 0;
        }

        if condition.each_of.is_empty() {
            1
        } else {
            condition
                .each_of
                .iter()
                .filter(|n| pool.contains(scope, n))
                .count()
        }
    }

    /// Whether the synergy fires at all.
    #[must_use]
    pub fn evaluate(condition: &EffectCondition, pool: &EffectPool<'_>) -> bool {
        Self::repetitions(condition, pool) > 0
    }
}
