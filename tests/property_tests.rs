//! Property tests for the effect resolver, stat folding and hit math.

use std::sync::OnceLock;

use proptest::prelude::*;

use wizards_duel::core::{effect_list, DuelConfig, TurnStats};
use wizards_duel::effects::{
    standard_catalog, EffectCatalog, EffectResolver, FoldContext, StatModifierEngine,
};
use wizards_duel::rules::{active_effects, hit_chance};

fn catalog() -> &'static EffectCatalog {
    static CATALOG: OnceLock<EffectCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| standard_catalog().unwrap())
}

fn effect_names() -> Vec<String> {
    catalog().iter().map(|def| def.name.clone()).collect()
}

fn effect_set() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(effect_names(), 0..=6)
}

fn effect_name() -> impl Strategy<Value = String> {
    prop::sample::select(effect_names())
}

proptest! {
    /// Adding a present effect changes nothing and narrates nothing.
    #[test]
    fn prop_no_op_add_is_identity(start in effect_set(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!start.is_empty());
        let active = effect_list(start.iter().cloned());
        let name = pick.get(&start);

        let outcome = EffectResolver::new(catalog()).add_effect(&active, name, "bob").unwrap();

        prop_assert_eq!(outcome.effects, active);
        prop_assert!(outcome.events.is_empty());
    }

    /// Resolution always settles into a duplicate-free list of known effects.
    #[test]
    fn prop_add_settles_without_duplicates(start in effect_set(), name in effect_name()) {
        let active = effect_list(start.iter().cloned());

        let outcome = EffectResolver::new(catalog()).add_effect(&active, &name, "bob").unwrap();

        let mut seen = Vec::new();
        for effect in &outcome.effects {
            prop_assert!(catalog().contains(effect));
            prop_assert!(!seen.contains(effect), "duplicate {}", effect);
            seen.push(effect.clone());
        }
    }

    /// Folding the same list twice is bit-identical.
    #[test]
    fn prop_fold_is_deterministic(start in effect_set(), opponent in effect_set()) {
        let engine = StatModifierEngine::new(catalog());
        let own = active_effects(&effect_list(start.iter().cloned()), catalog());
        let ctx = FoldContext {
            player: "bob",
            own: &own,
            opponent: &opponent,
            is_defense: true,
        };

        let first = engine.fold(&TurnStats::default(), &ctx, true).unwrap();
        let second = engine.fold(&TurnStats::default(), &ctx, true).unwrap();

        prop_assert_eq!(first.stats.spellcasting.to_bits(), second.stats.spellcasting.to_bits());
        prop_assert_eq!(first.stats.accuracy.to_bits(), second.stats.accuracy.to_bits());
        prop_assert_eq!(first.stats.evasion.to_bits(), second.stats.evasion.to_bits());
        prop_assert_eq!(first.stats.shield.to_bits(), second.stats.shield.to_bits());
        prop_assert_eq!(first.stats.pain.to_bits(), second.stats.pain.to_bits());
        prop_assert_eq!(first.explanations, second.explanations);
    }

    /// Evasion at or above accuracy is never a hit without a modifier.
    #[test]
    fn prop_evasion_at_least_accuracy_misses(accuracy in -50.0f64..150.0, margin in 0.0f64..100.0) {
        let config = DuelConfig::default();
        let attacker = TurnStats {
            accuracy,
            pain: 0.0,
            ..TurnStats::default()
        };
        let defender = TurnStats {
            evasion: accuracy + margin,
            pain: 0.0,
            ..TurnStats::default()
        };

        prop_assert!(hit_chance(&config, &attacker, &defender, 0.0) <= 0.0);
    }

    /// Hit chance without a modifier never exceeds certainty.
    #[test]
    fn prop_hit_chance_at_most_one(
        accuracy in -50.0f64..150.0,
        evasion in -50.0f64..150.0,
        pain in 0.0f64..200.0,
    ) {
        let config = DuelConfig::default();
        let attacker = TurnStats {
            accuracy,
            pain,
            ..TurnStats::default()
        };
        let defender = TurnStats {
            evasion,
            ..TurnStats::default()
        };

        prop_assert!(hit_chance(&config, &attacker, &defender, 0.0) <= 1.0);
    }
}
