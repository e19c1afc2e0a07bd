//! Duel manager: commands in, ordered narration out.
//!
//! `DuelManager` owns the catalog, spell book, configuration, RNG and a
//! [`StateStore`]. Each command is resolved completely (state read, rolls,
//! effect changes, state written) before its narration is drained, so the
//! messages of one command always come out together and in order.
//!
//! ## Turns
//!
//! A turn is an optional passive (self-targeted) cast followed by an
//! attack. Casting at the opponent during the passive phase skips straight
//! to the attack; casting during the attack hands the opponent their
//! passive phase.
//!
//! ## Errors
//!
//! Turn and ownership mistakes ([`DuelError::is_recoverable`]) become a
//! reply to the actor with no state change. Anything else propagates.

use tracing::{debug, info, warn};

use crate::command::{Command, CommandParser};
use crate::core::{
    duel_key, player_key, turn_key, DuelConfig, DuelRng, DuelRngState, DuelStatus, Phase,
    PlayerState, Turn,
};
use crate::effects::{standard_catalog, EffectCatalog};
use crate::error::{CatalogResult, DuelError, DuelResult};
use crate::narration::{number_word, Message, NarrationSink, OutputBuffer};
use crate::spells::{standard_spells, SpellBook};
use crate::store::{self, StateStore};

use super::cast::{CastOutcome, CastResolver};
use super::player::Player;

const RULES: &str = "```
Dueling Rules:

  Protocol:
    1. The starting combatant is determined by chance and begins with an offensive spell.
    2. The next combatant begins their turn with an optional passive spell on themselves and then an offensive spell on their opponent.
    3. It then becomes the opponent's turn, and the cycle repeats until one duelist is no longer able to cast spells.

  Directions:
    - To cast a spell on your opponent, type the spell's incantation followed by an exclamation point!
    - To cast a spell upon yourself, end your incantation with the word \"self\"
      Example: \"volito self!\"
    - To surrender, type \"I yield to @[opponent's name].\"
```";

/// Why a duel ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The loser yielded.
    Resigned,
    /// The loser failed too many casts in a row.
    FailureStreak,
}

/// Result of a finished duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuelOutcome {
    pub winner: String,
    pub loser: String,
    pub reason: EndReason,
}

impl DuelOutcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &str) -> bool {
        self.winner == player
    }

    fn announcement(&self, max_failures: u32) -> String {
        let Self { winner, loser, .. } = self;
        match self.reason {
            EndReason::Resigned => {
                format!("@{loser} yields to @{winner}. @{winner} wins the duel!")
            }
            EndReason::FailureStreak => format!(
                "@{loser} has failed to cast {} spells in a row. @{winner} wins the duel!",
                number_word(max_failures)
            ),
        }
    }
}

/// What an incantation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub cast: CastOutcome,
    /// Set if the cast ended the duel.
    pub ended: Option<DuelOutcome>,
}

/// Runs duels against a state store.
pub struct DuelManager<S: StateStore> {
    store: S,
    catalog: EffectCatalog,
    spells: SpellBook,
    parser: CommandParser,
    config: DuelConfig,
    rng: DuelRng,
    output: OutputBuffer,
}

impl<S: StateStore> DuelManager<S> {
    /// Fails only if the command grammar for `spells` cannot be compiled.
    pub fn new(
        store: S,
        catalog: EffectCatalog,
        spells: SpellBook,
        config: DuelConfig,
        rng: DuelRng,
    ) -> CatalogResult<Self> {
        let parser = CommandParser::new(&spells)?;
        Ok(Self {
            store,
            catalog,
            spells,
            parser,
            config,
            rng,
            output: OutputBuffer::new(),
        })
    }

    /// Manager with the standard catalog and spell book.
    pub fn standard(store: S, config: DuelConfig, rng: DuelRng) -> CatalogResult<Self> {
        let catalog = standard_catalog()?;
        let spells = standard_spells(&catalog)?;
        Self::new(store, catalog, spells, config, rng)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn spells(&self) -> &SpellBook {
        &self.spells
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Checkpoint of the dice, for replaying the rest of a duel.
    #[must_use]
    pub fn rng_state(&self) -> DuelRngState {
        self.rng.state()
    }

    /// Resume the dice from a checkpoint taken with [`rng_state`](Self::rng_state).
    pub fn restore_rng(&mut self, state: &DuelRngState) {
        self.rng = DuelRng::from_state(state);
    }

    // === Dispatch ===

    /// Parse and handle a chat message. Unrecognised text yields nothing.
    pub fn handle_text(&mut self, player: &str, text: &str) -> DuelResult<Vec<Message>> {
        match self.parser.parse(text) {
            Some(command) => self.handle(player, command),
            None => Ok(Vec::new()),
        }
    }

    /// Handle one command from `player` and drain its narration.
    pub fn handle(&mut self, player: &str, command: Command) -> DuelResult<Vec<Message>> {
        let result = match command {
            Command::Challenge { challengee } => self.challenge(player, &challengee),
            Command::Accept { challenger } => {
                self.accept_challenge(&challenger, player).map(|_| ())
            }
            Command::Yield { opponent } => self.resign(player, &opponent).map(|_| ()),
            Command::Rules => {
                self.rules();
                Ok(())
            }
            Command::ListSpells => {
                self.list_spells();
                Ok(())
            }
            Command::ListEffects => self.list_effects(player),
            Command::Status => self.status(player),
            Command::Cast {
                incantation,
                on_self,
            } => self
                .utter_incantation(player, &incantation, on_self)
                .map(|_| ()),
        };

        match result {
            Ok(()) => Ok(self.output.take()),
            Err(err) if err.is_recoverable() => {
                debug!(player, %err, "command rejected");
                self.output.reply(err.to_string());
                Ok(self.output.take())
            }
            Err(err) => {
                warn!(player, %err, "command failed");
                self.output.take();
                Err(err)
            }
        }
    }

    /// Drain narration queued by direct calls.
    pub fn take_output(&mut self) -> Vec<Message> {
        self.output.take()
    }

    /// Deliver queued narration to `sink`.
    pub fn flush(&mut self, sink: &mut impl NarrationSink) {
        self.output.flush(sink);
    }

    // === Duel lifecycle ===

    /// `challenger` challenges `challengee`.
    pub fn challenge(&mut self, challenger: &str, challengee: &str) -> DuelResult<()> {
        if let Some(state) = self.player_state(challenger)? {
            return Err(DuelError::AlreadyDueling {
                opponent: state.opponent,
            });
        }

        store::save(
            &mut self.store,
            &duel_key(challenger, challengee),
            &DuelStatus::ChallengeSent,
        )?;
        info!(challenger, challengee, "challenge sent");

        self.output.send(format!(
            "@{challenger} has challenged @{challengee} to a wizard's duel!  _Does @{challengee} accept?_\n\
             Type \"I accept @{challenger}'s challenge.\" to accept."
        ));
        Ok(())
    }

    /// `challengee` accepts. Returns the player who starts.
    pub fn accept_challenge(&mut self, challenger: &str, challengee: &str) -> DuelResult<String> {
        if self.duel_status(challenger, challengee)? != DuelStatus::ChallengeSent {
            return Err(DuelError::NotChallenged {
                challenger: challenger.to_string(),
            });
        }
        if let Some(state) = self.player_state(challengee)? {
            return Err(DuelError::AlreadyDueling {
                opponent: state.opponent,
            });
        }
        if let Some(state) = self.player_state(challenger)? {
            return Err(DuelError::ChallengerBusy {
                challenger: challenger.to_string(),
                opponent: state.opponent,
            });
        }

        let baseline = self.config.baseline;
        let records = [
            PlayerState::new(challenger, true, challengee, baseline),
            PlayerState::new(challengee, false, challenger, baseline),
        ];
        for record in &records {
            store::save(&mut self.store, &player_key(&record.name), record)?;
        }
        store::save(
            &mut self.store,
            &duel_key(challenger, challengee),
            &DuelStatus::Dueling,
        )?;

        let names = [challenger, challengee];
        let starter = self.rng.choose(&names).copied().unwrap_or(challenger).to_string();
        store::save(
            &mut self.store,
            &turn_key(challenger, challengee),
            &Turn::attack(starter.as_str()),
        )?;
        info!(challenger, challengee, starter = %starter, "duel started");

        self.output.send(format!(
            "*Hear ye! Hear ye!*\n\
             A duel shall now commence between @{challenger} and @{challengee}! \
             @{starter}, you have won the coin toss and may start your offensive turn.  \
             For a list of rules, type \"dueling rules\". \
             For the list of spells, type \"list spells\"."
        ));
        Ok(starter)
    }

    /// `player` yields to `opponent`.
    pub fn resign(&mut self, player: &str, opponent: &str) -> DuelResult<DuelOutcome> {
        let state = self
            .player_state(player)?
            .filter(|state| state.opponent == opponent)
            .ok_or_else(|| DuelError::NotDuelingWith {
                opponent: opponent.to_string(),
            })?;

        let outcome = DuelOutcome {
            winner: opponent.to_string(),
            loser: player.to_string(),
            reason: EndReason::Resigned,
        };
        self.end_duel(&state, &outcome)?;
        Ok(outcome)
    }

    /// `player` utters `incantation`, at themselves if `on_self`.
    pub fn utter_incantation(
        &mut self,
        player: &str,
        incantation: &str,
        on_self: bool,
    ) -> DuelResult<TurnReport> {
        let state = self.player_state(player)?.ok_or(DuelError::NotDueling)?;
        let (challenger, challengee) = {
            let (a, b) = state.duel_pair();
            (a.to_string(), b.to_string())
        };
        let key = turn_key(&challenger, &challengee);

        let turn: Turn = store::load(&self.store, &key)?.ok_or(DuelError::NotDueling)?;
        if !turn.is_held_by(player) {
            return Err(DuelError::InvalidTurn);
        }

        let spell = self
            .spells
            .find(incantation)
            .ok_or_else(|| DuelError::UnknownSpell(incantation.to_string()))?;
        let opponent_state: PlayerState =
            store::load(&self.store, &player_key(&state.opponent))?.ok_or(DuelError::NotDueling)?;

        let next = match (turn.phase, on_self) {
            (Phase::Passive, false) => {
                self.output.send(format!(
                    "@{player} skipped their passive turn and went right to the attack!"
                ));
                Turn::passive(state.opponent.as_str())
            }
            (Phase::Passive, true) => Turn::attack(player),
            (Phase::Attack, _) => Turn::passive(state.opponent.as_str()),
        };

        let mut caster = Player::new(state);
        let mut opponent = Player::new(opponent_state);
        caster.reset_turn_stats();
        opponent.reset_turn_stats();

        let cast = CastResolver::new(
            &self.catalog,
            &self.spells,
            &self.config,
            &mut self.rng,
            &mut self.output,
        )
        .cast(&mut caster, &mut opponent, spell, on_self)?;
        info!(player, spell = incantation, ?cast, "incantation resolved");

        store::save(&mut self.store, &key, &next)?;
        debug!(
            player,
            from = ?turn.phase,
            to = ?next.phase,
            next = %next.player,
            "turn advanced"
        );
        store::save(&mut self.store, &player_key(caster.name()), caster.state())?;
        store::save(&mut self.store, &player_key(opponent.name()), opponent.state())?;

        let mut ended = None;
        if caster.state().num_failures >= self.config.max_consecutive_failures {
            let outcome = DuelOutcome {
                winner: opponent.name().to_string(),
                loser: caster.name().to_string(),
                reason: EndReason::FailureStreak,
            };
            self.end_duel(caster.state(), &outcome)?;
            ended = Some(outcome);
        }

        Ok(TurnReport { cast, ended })
    }

    fn end_duel(&mut self, state: &PlayerState, outcome: &DuelOutcome) -> DuelResult<()> {
        let (challenger, challengee) = state.duel_pair();

        self.store.remove(&player_key(challenger));
        self.store.remove(&player_key(challengee));
        self.store.remove(&turn_key(challenger, challengee));
        store::save(
            &mut self.store,
            &duel_key(challenger, challengee),
            &DuelStatus::NotDueling,
        )?;
        info!(
            winner = %outcome.winner,
            loser = %outcome.loser,
            reason = ?outcome.reason,
            "duel ended"
        );

        self.output
            .send(outcome.announcement(self.config.max_consecutive_failures));
        Ok(())
    }

    // === Listings ===

    /// Broadcast the rules.
    pub fn rules(&mut self) {
        self.output.send(RULES);
    }

    /// Broadcast the spell list.
    pub fn list_spells(&mut self) {
        let lines: Vec<String> = self
            .spells
            .incantations()
            .map(|incantation| format!("  - _{incantation}_"))
            .collect();
        self.output.send(format!("Spells:\n{}", lines.join("\n")));
    }

    /// Broadcast `player`'s effects.
    pub fn list_effects(&mut self, player: &str) -> DuelResult<()> {
        let state = self.player_state(player)?.ok_or(DuelError::NotDueling)?;
        let lines = Player::new(state).effect_list(&self.catalog);

        if lines.is_empty() {
            self.output.send(format!("@{player} is not under any effects."));
        } else {
            self.output
                .send(format!("@{player}'s current effects:\n{}", lines.join("\n")));
        }
        Ok(())
    }

    /// Reply with `player`'s current condition.
    pub fn status(&mut self, player: &str) -> DuelResult<()> {
        let state = self.player_state(player)?.ok_or(DuelError::NotDueling)?;
        let opponent = self
            .player_state(&state.opponent)?
            .map(Player::new)
            .ok_or(DuelError::NotDueling)?;

        let opponent_active = opponent.active_effects(&self.catalog);
        let mut subject = Player::new(state);
        subject.reset_turn_stats();
        let text = subject.status(&self.catalog, &opponent_active, &self.config.baseline)?;
        self.output.reply(text);
        Ok(())
    }

    // === Queries ===

    /// Status of the duel between `challenger` and `challengee`.
    pub fn duel_status(&self, challenger: &str, challengee: &str) -> DuelResult<DuelStatus> {
        Ok(store::load(&self.store, &duel_key(challenger, challengee))?.unwrap_or_default())
    }

    /// `name`'s duel record, if dueling.
    pub fn player_state(&self, name: &str) -> DuelResult<Option<PlayerState>> {
        store::load(&self.store, &player_key(name))
    }

    /// Whose turn it is in the duel between `challenger` and `challengee`.
    pub fn current_turn(&self, challenger: &str, challengee: &str) -> DuelResult<Option<Turn>> {
        store::load(&self.store, &turn_key(challenger, challengee))
    }
}
