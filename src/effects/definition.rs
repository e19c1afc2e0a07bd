//! Effect definitions - static catalog data.
//!
//! An `EffectDef` holds everything the engine knows about a named status
//! effect: narration metadata, stat modifiers, synergies, the relations it
//! has with other effects (negation, removal, counteraction, repulsion) and
//! optional behaviour hooks.
//!
//! Definitions are pure data apart from `hooks`, which is reserved for the
//! few effects that need imperative logic.
//!
//! ```
//! use wizards_duel::core::Stat;
//! use wizards_duel::effects::{EffectDef, Modifier};
//!
//! let fog = EffectDef::new("fog")
//!     .with_modifier(Modifier::sub(Stat::Accuracy, 30.0).narrated("has difficulty aiming"))
//!     .with_modifier(Modifier::sub(Stat::Evasion, 15.0));
//!
//! assert_eq!(fog.noun(), "fog");
//! assert_eq!(fog.modifiers.len(), 2);
//! ```

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Operator, Stat};

use super::condition::EffectCondition;
use super::hooks::EffectHooks;

/// Reference to other effects from a relation list.
///
/// Written as a plain name (`"fire"`) or an attribute reference
/// (`":isWood"`), which matches every effect whose flag is set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectRef {
    /// A single effect by name.
    Name(String),
    /// Every effect carrying this boolean attribute.
    Attribute(String),
}

impl EffectRef {
    /// Parse the catalog notation.
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix(':') {
            Some(attr) => Self::Attribute(attr.to_string()),
            None => Self::Name(text.to_string()),
        }
    }

    /// The referenced name, if this is a plain name.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Attribute(_) => None,
        }
    }
}

impl From<&str> for EffectRef {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for EffectRef {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl std::fmt::Display for EffectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Attribute(attr) => write!(f, ":{attr}"),
        }
    }
}

/// A literal `stat op= operand` tuple with optional narration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub stat: Stat,
    pub op: Operator,
    pub operand: f64,
    /// Predicate phrase, e.g. "has difficulty seeing".
    pub narration: Option<String>,
}

impl Modifier {
    /// Create a modifier.
    pub fn new(stat: Stat, op: Operator, operand: f64) -> Self {
        Self {
            stat,
            op,
            operand,
            narration: None,
        }
    }

    /// `stat += operand`
    pub fn add(stat: Stat, operand: f64) -> Self {
        Self::new(stat, Operator::Add, operand)
    }

    /// `stat -= operand`
    pub fn sub(stat: Stat, operand: f64) -> Self {
        Self::new(stat, Operator::Sub, operand)
    }

    /// `stat *= operand`
    pub fn mul(stat: Stat, operand: f64) -> Self {
        Self::new(stat, Operator::Mul, operand)
    }

    /// `stat /= operand`
    pub fn div(stat: Stat, operand: f64) -> Self {
        Self::new(stat, Operator::Div, operand)
    }

    /// `stat = operand`
    pub fn set(stat: Stat, operand: f64) -> Self {
        Self::new(stat, Operator::Set, operand)
    }

    /// Attach narration (builder pattern).
    #[must_use]
    pub fn narrated(mut self, text: impl Into<String>) -> Self {
        self.narration = Some(text.into());
        self
    }
}

/// Entry of a modifier list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ModifierEntry {
    /// Apply this tuple.
    Literal(Modifier),
    /// Apply the named effect's own literal modifiers (one level deep).
    Borrowed(String),
}

impl From<Modifier> for ModifierEntry {
    fn from(modifier: Modifier) -> Self {
        Self::Literal(modifier)
    }
}

/// Conditional modifier bundle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Synergy {
    pub condition: EffectCondition,
    pub modifiers: Vec<ModifierEntry>,
}

impl Synergy {
    /// Create a synergy with no modifiers yet.
    pub fn new(condition: EffectCondition) -> Self {
        Self {
            condition,
            modifiers: Vec::new(),
        }
    }

    /// Add a literal modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(ModifierEntry::Literal(modifier));
        self
    }

    /// Re-apply another effect's modifiers when this fires (builder pattern).
    #[must_use]
    pub fn with_borrowed(mut self, effect: impl Into<String>) -> Self {
        self.modifiers.push(ModifierEntry::Borrowed(effect.into()));
        self
    }
}

/// How an effect is introduced in narration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Determiner {
    /// "the fog"
    #[default]
    Definite,
    /// "@alice's stench"
    Possessive,
    /// Fixed text, e.g. "Merlin's beard".
    Proper(String),
}

impl Determiner {
    /// Render for an effect on `player`.
    #[must_use]
    pub fn render(&self, player: &str) -> String {
        match self {
            Self::Definite => "the".to_string(),
            Self::Possessive => format!("@{player}'s"),
            Self::Proper(text) => text.clone(),
        }
    }
}

/// Static definition of a named effect.
#[derive(Clone, Debug)]
pub struct EffectDef {
    /// Unique catalog key.
    pub name: String,

    /// Narration noun; defaults to the name.
    pub noun: Option<String>,

    /// Narration adjective ("on fire").
    pub adjective: Option<String>,

    pub determiner: Determiner,

    /// Applies arena-wide rather than to one player.
    pub global: bool,

    /// Boolean attributes matched by `":attr"` references.
    pub flags: FxHashSet<String>,

    /// Unconditional modifiers, applied in order.
    pub modifiers: SmallVec<[ModifierEntry; 2]>,

    /// Conditional modifier bundles, evaluated in order.
    pub synergies: Vec<Synergy>,

    /// Mutually exclusive effects: both sides are removed.
    pub negates: Vec<EffectRef>,

    /// Effects deleted when this one is newly added.
    pub removes: Vec<EffectRef>,

    /// Like `removes`, and also blocks these from being added later.
    pub always_removes: Vec<EffectRef>,

    /// Effects made stat-inert while this one is present.
    pub counteracts: Vec<String>,

    /// Effects that cannot be added while this one is present.
    pub repels: Vec<EffectRef>,

    pub removal_verb: Option<String>,
    pub negating_verb: Option<String>,
    pub repelling_verb: Option<String>,

    /// Imperative behaviour, for the few effects that need it.
    pub hooks: Option<Arc<dyn EffectHooks>>,
}

impl EffectDef {
    /// Create a definition with no modifiers or relations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            noun: None,
            adjective: None,
            determiner: Determiner::Definite,
            global: false,
            flags: FxHashSet::default(),
            modifiers: SmallVec::new(),
            synergies: Vec::new(),
            negates: Vec::new(),
            removes: Vec::new(),
            always_removes: Vec::new(),
            counteracts: Vec::new(),
            repels: Vec::new(),
            removal_verb: None,
            negating_verb: None,
            repelling_verb: None,
            hooks: None,
        }
    }

    /// Narration noun, falling back to the name.
    #[must_use]
    pub fn noun(&self) -> &str {
        self.noun.as_deref().unwrap_or(&self.name)
    }

    /// Verb used when this effect removes or blocks another.
    #[must_use]
    pub fn removal_verb(&self) -> &str {
        self.removal_verb.as_deref().unwrap_or("removes")
    }

    /// Verb used when this effect negates another.
    #[must_use]
    pub fn negating_verb(&self) -> &str {
        self.negating_verb.as_deref().unwrap_or("negates")
    }

    /// Verb used when this effect repels another.
    #[must_use]
    pub fn repelling_verb(&self) -> &str {
        self.repelling_verb.as_deref().unwrap_or("repels")
    }

    /// "The flames", "@bob's stench", "Merlin's beard".
    #[must_use]
    pub fn subject(&self, player: &str) -> String {
        let determiner = crate::narration::capitalize(&self.determiner.render(player));
        format!("{} {}", determiner, self.noun())
    }

    /// Lower-case form of [`subject`](Self::subject).
    #[must_use]
    pub fn object(&self, player: &str) -> String {
        format!("{} {}", self.determiner.render(player), self.noun())
    }

    /// Whether a boolean attribute is set.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Whether this effect counteracts `name`.
    #[must_use]
    pub fn counteracts(&self, name: &str) -> bool {
        self.counteracts.iter().any(|c| c == name)
    }

    /// Names referenced by this definition (excluding attribute references).
    ///
    /// Used by catalog validation.
    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        let relation_names = self
            .negates
            .iter()
            .chain(&self.removes)
            .chain(&self.always_removes)
            .chain(&self.repels)
            .filter_map(EffectRef::as_name);

        let borrowed = self
            .modifiers
            .iter()
            .chain(self.synergies.iter().flat_map(|s| s.modifiers.iter()))
            .filter_map(|entry| match entry {
                ModifierEntry::Borrowed(name) => Some(name.as_str()),
                ModifierEntry::Literal(_) => None,
            });

        let conditions = self.synergies.iter().flat_map(|s| s.condition.names());

        relation_names
            .chain(self.counteracts.iter().map(String::as_str))
            .chain(borrowed)
            .chain(conditions)
    }

    // === Builder ===

    /// Set the narration noun.
    #[must_use]
    pub fn with_noun(mut self, noun: impl Into<String>) -> Self {
        self.noun = Some(noun.into());
        self
    }

    /// Set the narration adjective.
    #[must_use]
    pub fn with_adjective(mut self, adjective: impl Into<String>) -> Self {
        self.adjective = Some(adjective.into());
        self
    }

    /// Narrate as belonging to the player ("@bob's stench").
    #[must_use]
    pub fn possessive(mut self) -> Self {
        self.determiner = Determiner::Possessive;
        self
    }

    /// Narrate with a fixed determiner.
    #[must_use]
    pub fn with_determiner(mut self, determiner: Determiner) -> Self {
        self.determiner = determiner;
        self
    }

    /// Mark as arena-wide.
    #[must_use]
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    /// Set a boolean attribute.
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    /// Add a literal modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(ModifierEntry::Literal(modifier));
        self
    }

    /// Apply another effect's literal modifiers as part of this one.
    #[must_use]
    pub fn with_borrowed(mut self, effect: impl Into<String>) -> Self {
        self.modifiers.push(ModifierEntry::Borrowed(effect.into()));
        self
    }

    /// Add a synergy.
    #[must_use]
    pub fn with_synergy(mut self, synergy: Synergy) -> Self {
        self.synergies.push(synergy);
        self
    }

    #[must_use]
    pub fn negating<I, R>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<EffectRef>,
    {
        self.negates.extend(refs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn removing<I, R>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<EffectRef>,
    {
        self.removes.extend(refs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn always_removing<I, R>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<EffectRef>,
    {
        self.always_removes.extend(refs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn counteracting<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.counteracts.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn repelling<I, R>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<EffectRef>,
    {
        self.repels.extend(refs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_removal_verb(mut self, verb: impl Into<String>) -> Self {
        self.removal_verb = Some(verb.into());
        self
    }

    #[must_use]
    pub fn with_negating_verb(mut self, verb: impl Into<String>) -> Self {
        self.negating_verb = Some(verb.into());
        self
    }

    #[must_use]
    pub fn with_repelling_verb(mut self, verb: impl Into<String>) -> Self {
        self.repelling_verb = Some(verb.into());
        self
    }

    /// Attach behaviour hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl EffectHooks + 'static) -> Self {
        self.hooks = Some(Arc::new(hooks));
        self
    }
}
