//! Effect resolver integration tests.
//!
//! These tests verify how effects interact when added to a player:
//! - Combination crafting and its fixpoint bound
//! - Negation, removal and counteraction
//! - Blocking by existing effects
//! - Stat folding of the resulting lists

use wizards_duel::core::{effect_list, EffectList, Stat, TurnStats};
use wizards_duel::effects::{
    standard_catalog, CombinationRule, EffectCatalog, EffectDef, EffectResolver, FoldContext,
    Modifier, NarrationEvent, StatModifierEngine,
};
use wizards_duel::error::CatalogError;
use wizards_duel::rules::active_effects;

fn names(list: &EffectList) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

fn texts(events: &[NarrationEvent]) -> Vec<String> {
    events.iter().map(ToString::to_string).collect()
}

// =============================================================================
// Combinations
// =============================================================================

/// Cold plus water freezes into ice.
#[test]
fn test_cold_and_water_make_ice() {
    let catalog = EffectCatalog::builder()
        .effects([EffectDef::new("water"), EffectDef::new("cold"), EffectDef::new("ice")])
        .combination(CombinationRule::new(["cold", "water"], ["ice"]))
        .build()
        .unwrap();
    let resolver = EffectResolver::new(&catalog);

    let outcome = resolver
        .add_effect(&effect_list(["cold"]), "water", "bob")
        .unwrap();

    assert_eq!(names(&outcome.effects), vec!["ice"]);
    assert_eq!(
        texts(&outcome.events),
        vec!["The cold and water combined, resulting in ice."]
    );
}

/// A chain of rules settles once nothing changes.
#[test]
fn test_combination_chain_converges() {
    let catalog = EffectCatalog::builder()
        .effects(["a", "b", "c", "d", "e"].map(EffectDef::new))
        .combination(CombinationRule::new(["a", "b"], ["c"]))
        .combination(CombinationRule::new(["c", "d"], ["e", "c"]))
        .build()
        .unwrap();
    let resolver = EffectResolver::new(&catalog);

    let outcome = resolver
        .add_effect(&effect_list(["a", "d"]), "b", "bob")
        .unwrap();
    let result = names(&outcome.effects);

    assert!(result.contains(&"c"));
    assert!(result.contains(&"e"));
    for gone in ["a", "b", "d"] {
        assert!(!result.contains(&gone), "{gone} should be consumed");
    }
    assert_eq!(outcome.events.len(), 2);
}

/// Rules that keep undoing each other are an authoring defect.
#[test]
fn test_runaway_combinations_fail() {
    let catalog = EffectCatalog::builder()
        .effects([EffectDef::new("a"), EffectDef::new("b")])
        .combination(CombinationRule::new(["a"], ["b"]))
        .combination(CombinationRule::new(["b"], ["a"]))
        .build()
        .unwrap();
    let resolver = EffectResolver::new(&catalog).with_max_rounds(8);

    let err = resolver
        .add_effect(&EffectList::new(), "a", "bob")
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::NonConvergentCombination { ref effect, rounds: 8 } if effect == "a"
    ));
}

/// Peanut butter and ropes are eaten by mice in the standard catalog.
#[test]
fn test_standard_mice_eat_peanut_butter_and_ropes() {
    let catalog = standard_catalog().unwrap();
    let resolver = EffectResolver::new(&catalog);

    let outcome = resolver
        .add_effect(&effect_list(["hemp-ropes", "peanut-butter"]), "mice", "bob")
        .unwrap();

    assert_eq!(names(&outcome.effects), vec!["mice"]);
}

// =============================================================================
// Relations
// =============================================================================

/// Adding an effect that is already present changes nothing.
#[test]
fn test_no_op_add() {
    let catalog = standard_catalog().unwrap();
    let resolver = EffectResolver::new(&catalog);
    let active = effect_list(["fog", "stench"]);

    let outcome = resolver.add_effect(&active, "fog", "bob").unwrap();

    assert_eq!(outcome.effects, active);
    assert!(outcome.events.is_empty());
}

/// Negation removes both sides.
#[test]
fn test_negation_removes_both() {
    let catalog = EffectCatalog::builder()
        .effect(EffectDef::new("sunlight").negating(["fog"]))
        .effect(EffectDef::new("fog"))
        .effect(EffectDef::new("stench"))
        .build()
        .unwrap();
    let resolver = EffectResolver::new(&catalog);

    let outcome = resolver
        .add_effect(&effect_list(["fog", "stench"]), "sunlight", "bob")
        .unwrap();

    assert_eq!(names(&outcome.effects), vec!["stench"]);
    assert_eq!(texts(&outcome.events), vec!["The sunlight negates the fog."]);
}

/// Removal by attribute takes every flagged effect and keeps the new one.
#[test]
fn test_attribute_removal() {
    let catalog = EffectCatalog::builder()
        .effect(
            EffectDef::new("fire")
                .removing([":isFlammable"])
                .with_removal_verb("burns away"),
        )
        .effect(EffectDef::new("hemp-ropes").with_noun("hemp ropes").with_flag("isFlammable"))
        .effect(EffectDef::new("straw-hat").with_noun("straw hat").with_flag("isFlammable"))
        .effect(EffectDef::new("fog"))
        .build()
        .unwrap();
    let resolver = EffectResolver::new(&catalog);

    let outcome = resolver
        .add_effect(&effect_list(["hemp-ropes", "fog", "straw-hat"]), "fire", "bob")
        .unwrap();

    assert_eq!(names(&outcome.effects), vec!["fog", "fire"]);
    assert_eq!(
        texts(&outcome.events),
        vec!["The fire burns away the hemp ropes and the straw hat."]
    );
}

/// Counteraction keeps the effect listed but inert.
#[test]
fn test_counteraction_keeps_effect() {
    let catalog = EffectCatalog::builder()
        .effect(
            EffectDef::new("stench")
                .possessive()
                .with_modifier(Modifier::sub(Stat::Spellcasting, 20.0)),
        )
        .effect(EffectDef::new("small-nose").possessive().counteracting(["stench"]))
        .build()
        .unwrap();
    let resolver = EffectResolver::new(&catalog);

    let outcome = resolver
        .add_effect(&effect_list(["stench"]), "small-nose", "bob")
        .unwrap();

    assert_eq!(names(&outcome.effects), vec!["stench", "small-nose"]);
    assert_eq!(
        texts(&outcome.events),
        vec!["@bob's small-nose counteracts @bob's stench."]
    );
    assert_eq!(active_effects(&outcome.effects, &catalog), vec!["small-nose"]);
}

/// Existing effects that always remove a name block it from being added.
#[test]
fn test_blocked_by_existing_effect() {
    let catalog = standard_catalog().unwrap();
    let resolver = EffectResolver::new(&catalog);
    let active = effect_list(["termites"]);

    let outcome = resolver
        .add_effect(&active, "entangling-roots", "bob")
        .unwrap();

    assert_eq!(outcome.effects, active);
    assert_eq!(outcome.events.len(), 1);
    assert!(matches!(outcome.events[0], NarrationEvent::Blocked { .. }));
}

/// Removing an absent effect is silent.
#[test]
fn test_remove_absent_effect() {
    let catalog = standard_catalog().unwrap();
    let resolver = EffectResolver::new(&catalog);
    let active = effect_list(["fog"]);

    let outcome = resolver.remove_effect(&active, "stench", "bob");

    assert_eq!(outcome.effects, active);
    assert!(outcome.events.is_empty());
}

/// Toggling adds then removes.
#[test]
fn test_toggle() {
    let catalog = standard_catalog().unwrap();
    let resolver = EffectResolver::new(&catalog);

    let added = resolver.toggle_effect(&EffectList::new(), "wings", "bob").unwrap();
    assert_eq!(names(&added.effects), vec!["wings"]);

    let removed = resolver.toggle_effect(&added.effects, "wings", "bob").unwrap();
    assert!(removed.effects.is_empty());
    assert_eq!(texts(&removed.events), vec!["@bob's wings has been removed."]);
}

// =============================================================================
// Stat folding
// =============================================================================

/// Folding applies modifiers in list order.
#[test]
fn test_fold_order_matters() {
    let catalog = EffectCatalog::builder()
        .effect(EffectDef::new("halve").with_modifier(Modifier::div(Stat::Accuracy, 2.0)))
        .effect(EffectDef::new("minus").with_modifier(Modifier::sub(Stat::Accuracy, 10.0)))
        .build()
        .unwrap();
    let engine = StatModifierEngine::new(&catalog);
    let base = TurnStats {
        accuracy: 90.0,
        ..TurnStats::default()
    };

    let fold = |own: &[String]| {
        let ctx = FoldContext {
            player: "bob",
            own,
            opponent: &[],
            is_defense: false,
        };
        engine.fold(&base, &ctx, false).unwrap().stats.accuracy
    };

    assert_eq!(fold(&["halve".to_string(), "minus".to_string()]), 35.0);
    assert_eq!(fold(&["minus".to_string(), "halve".to_string()]), 40.0);
}
