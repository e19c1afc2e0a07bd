//! Error types for the duel engine.
//!
//! Two families:
//! - `CatalogError`: authoring defects in effect/spell data. These are fatal
//!   and surface at build time wherever possible.
//! - `DuelError`: failures of a duel command. Turn/ownership errors are
//!   recoverable (the manager replies and discards the command); the rest
//!   propagate to the caller.
//!
//! Failed casts, misses and blocked casts are game outcomes, not errors.

/// Defects in the effect catalog or spell book.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two effects were registered under the same name.
    #[error("effect '{0}' is defined more than once")]
    DuplicateEffect(String),

    /// An effect name was looked up that the catalog does not define.
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    /// A catalog entry references an effect the catalog does not define.
    #[error("effect '{effect}' references unknown effect '{reference}'")]
    UnknownEffectReference {
        /// The entry holding the dangling reference.
        effect: String,
        /// The missing name.
        reference: String,
    },

    /// Two spells share an incantation.
    #[error("spell '{0}' is defined more than once")]
    DuplicateSpell(String),

    /// A spell grants or removes an effect the catalog does not define.
    #[error("spell '{spell}' references unknown effect '{effect}'")]
    UnknownSpellEffect {
        /// Incantation of the offending spell.
        spell: String,
        /// The missing effect name.
        effect: String,
    },

    /// The command grammar for a spell book failed to compile.
    #[error("command pattern failed to compile: {0}")]
    CommandPattern(#[from] regex::Error),

    /// Combination crafting did not settle within the configured bound.
    #[error("combinations triggered by '{effect}' did not converge after {rounds} rounds")]
    NonConvergentCombination {
        /// The effect whose addition started the chain.
        effect: String,
        /// Rounds attempted.
        rounds: usize,
    },
}

/// Errors raised while handling a duel command.
#[derive(Debug, thiserror::Error)]
pub enum DuelError {
    /// The actor does not hold the current turn phase.
    #[error("It is not your turn.")]
    InvalidTurn,

    /// The actor has no active duel.
    #[error("Practice makes perfect.")]
    NotDueling,

    /// The actor tried to yield to someone they are not dueling.
    #[error("You are not dueling with @{opponent}.")]
    NotDuelingWith {
        /// The named opponent.
        opponent: String,
    },

    /// The actor tried to challenge while already in a duel.
    #[error("Thou art already dueling with @{opponent}!")]
    AlreadyDueling {
        /// The current opponent.
        opponent: String,
    },

    /// The actor accepted a challenge from someone now in another duel.
    #[error("@{challenger} is already dueling with @{opponent}.")]
    ChallengerBusy {
        /// The challenger who is busy.
        challenger: String,
        /// Their current opponent.
        opponent: String,
    },

    /// The actor tried to accept a challenge that was never sent.
    #[error("@{challenger} did not challenge you.")]
    NotChallenged {
        /// The supposed challenger.
        challenger: String,
    },

    /// The incantation does not name a known spell.
    #[error("unknown spell '{0}'")]
    UnknownSpell(String),

    /// A catalog defect surfaced during resolution.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A stored record could not be encoded or decoded.
    #[error("state record '{key}' is corrupt: {source}")]
    CorruptState {
        /// Store key of the record.
        key: String,
        /// Underlying codec error.
        #[source]
        source: bincode::Error,
    },
}

impl DuelError {
    /// Whether the manager should answer with a reply instead of failing.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidTurn
                | Self::NotDueling
                | Self::NotDuelingWith { .. }
                | Self::AlreadyDueling { .. }
                | Self::ChallengerBusy { .. }
                | Self::NotChallenged { .. }
                | Self::UnknownSpell(_)
        )
    }
}

/// Result alias for catalog construction and lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result alias for duel commands.
pub type DuelResult<T> = Result<T, DuelError>;
