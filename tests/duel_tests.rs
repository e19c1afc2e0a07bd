//! Duel manager integration tests.
//!
//! These tests run whole duels through free-text commands:
//! - Challenge, acceptance and the coin toss
//! - Turn ownership and phase transitions
//! - Resignation and failure streaks
//! - Listings and status reports

use wizards_duel::core::{player_key, DuelConfig, DuelRng, DuelStatus, Phase, PlayerState, Turn};
use wizards_duel::effects::{CombinationRule, EffectCatalog, EffectDef};
use wizards_duel::error::{CatalogError, DuelError};
use wizards_duel::narration::Message;
use wizards_duel::rules::{DuelManager, EndReason};
use wizards_duel::spells::{Spell, SpellBook};
use wizards_duel::store::{self, MemoryStore};

fn manager(seed: u64) -> DuelManager<MemoryStore> {
    DuelManager::standard(MemoryStore::new(), DuelConfig::default(), DuelRng::new(seed)).unwrap()
}

/// Start a duel between alice and bob. Returns (starter, other).
fn start_duel(manager: &mut DuelManager<MemoryStore>) -> (String, String) {
    manager
        .handle_text("alice", "I challenge @bob to a wizards duel!")
        .unwrap();
    manager
        .handle_text("bob", "I accept @alice's challenge")
        .unwrap();

    let turn = manager.current_turn("alice", "bob").unwrap().unwrap();
    let other = if turn.player == "alice" { "bob" } else { "alice" };
    (turn.player, other.to_string())
}

fn edit_player(
    manager: &mut DuelManager<MemoryStore>,
    name: &str,
    edit: impl FnOnce(&mut PlayerState),
) {
    let key = player_key(name);
    let mut state: PlayerState = store::load(manager.store(), &key).unwrap().unwrap();
    edit(&mut state);
    store::save(manager.store_mut(), &key, &state).unwrap();
}

fn texts(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(Message::text).collect()
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Accepting a challenge starts the duel with one player attacking.
#[test]
fn test_challenge_accept_scenario() {
    let mut manager = manager(42);

    let messages = manager
        .handle_text("alice", "I challenge @bob to a wizards duel!")
        .unwrap();
    assert_eq!(
        texts(&messages),
        vec![
            "@alice has challenged @bob to a wizard's duel!  _Does @bob accept?_\n\
             Type \"I accept @alice's challenge.\" to accept."
        ]
    );
    assert_eq!(manager.duel_status("alice", "bob").unwrap(), DuelStatus::ChallengeSent);

    let messages = manager
        .handle_text("bob", "I accept @alice's challenge")
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text().starts_with("*Hear ye! Hear ye!*\n"));
    assert_eq!(manager.duel_status("alice", "bob").unwrap(), DuelStatus::Dueling);

    let turn = manager.current_turn("alice", "bob").unwrap().unwrap();
    assert_eq!(turn.phase, Phase::Attack);
    assert!(turn.player == "alice" || turn.player == "bob");
}

/// Accepting a challenge that was never sent is answered with a reply.
#[test]
fn test_accept_unsent_challenge() {
    let mut manager = manager(1);

    let messages = manager
        .handle_text("bob", "I accept @alice's challenge")
        .unwrap();

    assert_eq!(messages, vec![Message::Reply("@alice did not challenge you.".into())]);
    assert_eq!(manager.duel_status("alice", "bob").unwrap(), DuelStatus::NotDueling);
}

/// A duelist cannot issue a second challenge.
#[test]
fn test_already_dueling() {
    let mut manager = manager(1);
    start_duel(&mut manager);

    let messages = manager
        .handle_text("alice", "I challenge @carol to a wizard's duel!")
        .unwrap();

    assert_eq!(messages, vec![Message::Reply("Thou art already dueling with @bob!".into())]);
}

/// A challenger who started another duel cannot be accepted a second time.
#[test]
fn test_accept_from_busy_challenger() {
    let mut manager = manager(1);
    manager
        .handle_text("alice", "I challenge @bob to a wizards duel!")
        .unwrap();
    manager
        .handle_text("alice", "I challenge @carol to a wizards duel!")
        .unwrap();
    manager
        .handle_text("carol", "I accept @alice's challenge")
        .unwrap();

    let messages = manager
        .handle_text("bob", "I accept @alice's challenge")
        .unwrap();

    assert_eq!(
        messages,
        vec![Message::Reply("@alice is already dueling with @carol.".into())]
    );
    assert_eq!(
        manager.duel_status("alice", "carol").unwrap(),
        DuelStatus::Dueling
    );
    assert_eq!(
        manager.duel_status("alice", "bob").unwrap(),
        DuelStatus::ChallengeSent
    );
    assert_eq!(
        manager.player_state("alice").unwrap().unwrap().opponent,
        "carol"
    );
    assert!(manager.player_state("bob").unwrap().is_none());
}

/// A duelist cannot accept another challenge.
#[test]
fn test_busy_challengee_cannot_accept() {
    let mut manager = manager(1);
    manager
        .handle_text("carol", "I challenge @alice to a wizards duel!")
        .unwrap();
    start_duel(&mut manager);

    let messages = manager
        .handle_text("alice", "I accept @carol's challenge")
        .unwrap();

    assert_eq!(
        messages,
        vec![Message::Reply("Thou art already dueling with @bob!".into())]
    );
    assert_eq!(
        manager.player_state("alice").unwrap().unwrap().opponent,
        "bob"
    );
    assert!(manager.player_state("carol").unwrap().is_none());
}

/// Yielding ends the duel and clears both records.
#[test]
fn test_resign() {
    let mut manager = manager(1);
    start_duel(&mut manager);

    let messages = manager.handle_text("bob", "I yield to @alice").unwrap();

    assert_eq!(texts(&messages), vec!["@bob yields to @alice. @alice wins the duel!"]);
    assert_eq!(manager.duel_status("alice", "bob").unwrap(), DuelStatus::NotDueling);
    assert!(manager.player_state("alice").unwrap().is_none());
    assert!(manager.player_state("bob").unwrap().is_none());
    assert!(manager.current_turn("alice", "bob").unwrap().is_none());
}

/// Yielding to someone you are not dueling is rejected.
#[test]
fn test_resign_wrong_opponent() {
    let mut manager = manager(1);
    start_duel(&mut manager);

    let messages = manager.handle_text("bob", "I yield to @carol").unwrap();

    assert_eq!(messages, vec![Message::Reply("You are not dueling with @carol.".into())]);
    assert_eq!(manager.duel_status("alice", "bob").unwrap(), DuelStatus::Dueling);
}

// =============================================================================
// Turns
// =============================================================================

/// Casting out of turn is rejected without state change.
#[test]
fn test_out_of_turn() {
    let mut manager = manager(3);
    let (_, waiting) = start_duel(&mut manager);
    let before = manager.player_state(&waiting).unwrap();

    let messages = manager.handle_text(&waiting, "volito self!").unwrap();

    assert_eq!(messages, vec![Message::Reply("It is not your turn.".into())]);
    assert_eq!(manager.player_state(&waiting).unwrap(), before);
}

/// Casting without a duel is practice.
#[test]
fn test_not_dueling() {
    let mut manager = manager(3);

    let messages = manager.handle_text("carol", "nebulus!").unwrap();

    assert_eq!(messages, vec![Message::Reply("Practice makes perfect.".into())]);
}

/// An attack hands the opponent their passive phase.
#[test]
fn test_attack_passes_turn() {
    let mut manager = manager(5);
    let (starter, other) = start_duel(&mut manager);

    manager.handle_text(&starter, "nebulus!").unwrap();

    assert_eq!(
        manager.current_turn("alice", "bob").unwrap(),
        Some(Turn::passive(other.as_str()))
    );
}

/// A passive self cast leads to the same player's attack.
#[test]
fn test_passive_self_cast_then_attack() {
    let mut manager = manager(5);
    let (starter, other) = start_duel(&mut manager);
    manager.handle_text(&starter, "nebulus!").unwrap();

    manager.handle_text(&other, "scutum self!").unwrap();
    assert_eq!(
        manager.current_turn("alice", "bob").unwrap(),
        Some(Turn::attack(other.as_str()))
    );

    manager.handle_text(&other, "nebulus!").unwrap();
    assert_eq!(
        manager.current_turn("alice", "bob").unwrap(),
        Some(Turn::passive(starter.as_str()))
    );
}

/// Attacking during the passive phase skips it.
#[test]
fn test_skip_passive() {
    let mut manager = manager(5);
    let (starter, other) = start_duel(&mut manager);
    manager.handle_text(&starter, "nebulus!").unwrap();

    let messages = manager.handle_text(&other, "nebulus!").unwrap();

    assert_eq!(
        messages[0].text(),
        format!("@{other} skipped their passive turn and went right to the attack!")
    );
    assert_eq!(
        manager.current_turn("alice", "bob").unwrap(),
        Some(Turn::passive(starter.as_str()))
    );
}

/// Effects persist across commands.
#[test]
fn test_effects_persist() {
    let mut manager = manager(5);
    let (starter, _) = start_duel(&mut manager);

    manager.handle_text(&starter, "scutum self!").unwrap();

    let state = manager.player_state(&starter).unwrap().unwrap();
    assert!(state.has_effect("magic-shield-10"));
}

/// Restoring the dice checkpoint and the store replays a turn exactly.
#[test]
fn test_checkpoint_replays_turn() {
    let mut original = manager(21);
    let (starter, _) = start_duel(&mut original);
    let checkpoint = original.rng_state();
    let snapshot = original.store().clone();

    let first = original.handle_text(&starter, "nebulus!").unwrap();

    let mut replay =
        DuelManager::standard(snapshot, DuelConfig::default(), DuelRng::new(0)).unwrap();
    replay.restore_rng(&checkpoint);
    let second = replay.handle_text(&starter, "nebulus!").unwrap();

    assert_eq!(first, second);
    assert_eq!(
        original.player_state("alice").unwrap(),
        replay.player_state("alice").unwrap()
    );
}

/// A cast that fails with a catalog defect leaves turn and records untouched.
#[test]
fn test_failed_resolution_keeps_turn() {
    let catalog = EffectCatalog::builder()
        .effects([EffectDef::new("a"), EffectDef::new("b")])
        .combination(CombinationRule::new(["a"], ["b"]))
        .combination(CombinationRule::new(["b"], ["a"]))
        .build()
        .unwrap();
    let spells = SpellBook::builder()
        .spell(Spell::new("loopio", "loops forever").with_effect("a"))
        .build(&catalog)
        .unwrap();
    let config = DuelConfig::default().with_max_combination_rounds(8);
    let mut manager =
        DuelManager::new(MemoryStore::new(), catalog, spells, config, DuelRng::new(4)).unwrap();
    let (starter, other) = start_duel(&mut manager);
    let turn_before = manager.current_turn("alice", "bob").unwrap();
    let starter_before = manager.player_state(&starter).unwrap();
    let other_before = manager.player_state(&other).unwrap();

    let err = manager.handle_text(&starter, "loopio self!").unwrap_err();

    assert!(matches!(
        err,
        DuelError::Catalog(CatalogError::NonConvergentCombination { .. })
    ));
    assert_eq!(manager.current_turn("alice", "bob").unwrap(), turn_before);
    assert_eq!(manager.player_state(&starter).unwrap(), starter_before);
    assert_eq!(manager.player_state(&other).unwrap(), other_before);
    assert!(manager.take_output().is_empty());
}

// =============================================================================
// Failure streak
// =============================================================================

/// Five failures in a row lose the duel.
#[test]
fn test_failure_streak_ends_duel() {
    let mut manager = manager(8);
    let (starter, other) = start_duel(&mut manager);
    edit_player(&mut manager, &starter, |state| state.base.spellcasting = -50.0);

    for round in 1..=5 {
        let messages = manager.handle_text(&starter, "volito!").unwrap();
        assert!(
            texts(&messages).contains(&format!("@{starter} fails to cast _volito_.").as_str()),
            "round {round}"
        );

        if round < 5 {
            assert_eq!(
                manager.player_state(&starter).unwrap().unwrap().num_failures,
                round
            );
            manager.handle_text(&other, "scutum self!").unwrap();
            manager.handle_text(&other, "mentis clarus self!").unwrap();
        } else {
            assert_eq!(
                messages.last().map(Message::text),
                Some(
                    format!(
                        "@{starter} has failed to cast five spells in a row. \
                         @{other} wins the duel!"
                    )
                    .as_str()
                )
            );
        }
    }

    assert_eq!(manager.duel_status("alice", "bob").unwrap(), DuelStatus::NotDueling);
    assert!(manager.player_state(&starter).unwrap().is_none());
    assert!(manager.player_state(&other).unwrap().is_none());
}

/// The failure streak is reported through `utter_incantation` too.
#[test]
fn test_failure_streak_report() {
    let config = DuelConfig::default().with_max_consecutive_failures(1);
    let mut manager =
        DuelManager::standard(MemoryStore::new(), config, DuelRng::new(8)).unwrap();
    let (starter, other) = start_duel(&mut manager);
    edit_player(&mut manager, &starter, |state| state.base.spellcasting = -50.0);

    let report = manager.utter_incantation(&starter, "volito", false).unwrap();

    let ended = report.ended.unwrap();
    assert!(ended.is_winner(&other));
    assert_eq!(ended.reason, EndReason::FailureStreak);
}

// =============================================================================
// Listings
// =============================================================================

/// Unrelated chatter produces nothing.
#[test]
fn test_chatter_ignored() {
    let mut manager = manager(1);

    assert!(manager.handle_text("alice", "good morning").unwrap().is_empty());
}

/// Rules and spells are broadcast.
#[test]
fn test_rules_and_spells() {
    let mut manager = manager(1);

    let rules = manager.handle_text("alice", "dueling rules").unwrap();
    assert!(rules[0].text().contains("Dueling Rules:"));
    assert!(!rules[0].is_reply());

    let spells = manager.handle_text("alice", "list spells").unwrap();
    assert!(spells[0].text().contains("  - _caseum foetidum_"));
}

/// Effect lists mark counteracted effects.
#[test]
fn test_list_effects() {
    let mut manager = manager(1);
    start_duel(&mut manager);
    edit_player(&mut manager, "bob", |state| {
        state.effects.push_back("stench".into());
        state.effects.push_back("small-nose".into());
    });

    let messages = manager.handle_text("bob", "list effects").unwrap();

    assert_eq!(
        texts(&messages),
        vec!["@bob's current effects:\n~stench~ (counteracted by small nose)\nsmall nose"]
    );
}

/// Status is a private reply.
#[test]
fn test_status_reply() {
    let mut manager = manager(1);
    start_duel(&mut manager);
    edit_player(&mut manager, "bob", |state| state.effects.push_back("fog".into()));

    let messages = manager.handle_text("bob", "duel status").unwrap();

    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_reply());
    assert!(messages[0].text().starts_with("Your Spell-casting ability is normal,\n"));
    assert!(messages[0].text().contains("Your Accuracy is"));
    assert!(messages[0].text().ends_with("and you have no magical shield."));
}
