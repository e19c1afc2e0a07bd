//! The standard effect catalog.
//!
//! Effects are grouped the way a duel uses them: elements, body changes,
//! mental states, creatures, protections, hindrances and arena-wide
//! weather. Some effects carry no modifiers and exist only to take part in
//! synergies and combinations.

use crate::core::Stat;
use crate::error::CatalogResult;

use super::behaviors::{Confusion, Intoxication, PhonemicSwap, Spectral};
use super::catalog::{CombinationRule, EffectCatalog};
use super::condition::EffectCondition;
use super::definition::{Determiner, EffectDef, Modifier, Synergy};

/// Build the standard catalog.
pub fn standard_catalog() -> CatalogResult<EffectCatalog> {
    EffectCatalog::builder()
        .effects(elemental())
        .effects(body())
        .effects(mental())
        .effects(creatures())
        .effects(protection())
        .effects(hindrances())
        .effects(arena())
        .combination(
            CombinationRule::new(["hemp-ropes", "peanut-butter", "mice"], ["mice"])
                .narrated("The mice, eating the peanut butter, chew through the ropes."),
        )
        .combination(
            CombinationRule::new(["peanut-butter", "mice"], ["mice"])
                .narrated("The mice eat the peanut butter."),
        )
        .combination(
            CombinationRule::new(["hemp-ropes", "peanut-butter", "rats"], ["rats"])
                .narrated("The rats, eating the peanut butter, chew through the ropes."),
        )
        .combination(
            CombinationRule::new(["peanut-butter", "rats"], ["rats"])
                .narrated("The rats eat the peanut butter."),
        )
        .combination(
            CombinationRule::new(["cold", "water"], ["ice"])
                .narrated("The water freezes into ice."),
        )
        .combination(
            CombinationRule::new(["cold", "rain"], ["hail"])
                .narrated("The rain freezes and turns to hail."),
        )
        .combination(
            CombinationRule::new(["arena-cold", "arena-rain"], ["arena-hail"])
                .narrated("The rain freezes and turns to hail."),
        )
        .build()
}

fn elemental() -> Vec<EffectDef> {
    vec![
        EffectDef::new("fire")
            .with_noun("flames")
            .with_adjective("on fire")
            .negating(["fog", "cold", "frost", "ice"])
            .removing([":isFlammable"]),
        EffectDef::new("burns"),
        EffectDef::new("water")
            .with_adjective("soaking wet")
            .with_flag("isWater")
            .negating(["fire"]),
        EffectDef::new("cold").with_adjective("cold"),
        EffectDef::new("frost").with_adjective("frozen"),
        EffectDef::new("ice")
            .with_adjective("frozen solid")
            .with_modifier(Modifier::sub(Stat::Evasion, 15.0).narrated("is frozen in place")),
        EffectDef::new("hail")
            .with_modifier(Modifier::add(Stat::Pain, 10.0).narrated("is pelted by hail")),
        EffectDef::new("fog")
            .with_modifier(
                Modifier::sub(Stat::Accuracy, 30.0)
                    .narrated("has difficulty aiming and avoiding shots"),
            )
            .with_modifier(Modifier::sub(Stat::Evasion, 15.0)),
        EffectDef::new("sunlight").negating(["fog"]),
        EffectDef::new("rain").with_flag("isWater"),
        EffectDef::new("blizzard")
            .with_modifier(
                Modifier::sub(Stat::Accuracy, 15.0).narrated("can barely see through the snow"),
            ),
        EffectDef::new("lightning")
            .with_modifier(Modifier::add(Stat::Pain, 20.0).narrated("is struck by lightning"))
            .with_synergy(
                Synergy::new(EffectCondition::any_of(["water", "arena-flood"])).with_modifier(
                    Modifier::add(Stat::Pain, 10.0)
                        .narrated("is more susceptible to lightning strikes"),
                ),
            ),
    ]
}

fn body() -> Vec<EffectDef> {
    vec![
        EffectDef::new("hairless").possessive().removing(["merlins-beard"]),
        EffectDef::new("frog-vomitting")
            .with_noun("vomitting up of frogs")
            .with_adjective("vomitting frogs")
            .possessive()
            .with_flag("isIllness")
            .with_modifier(
                Modifier::sub(Stat::Spellcasting, 20.0).narrated("has difficulty speaking"),
            ),
        EffectDef::new("stench")
            .possessive()
            .counteracting(["fragrance"])
            .with_modifier(
                Modifier::sub(Stat::Spellcasting, 10.0).narrated("has difficulty concentrating"),
            ),
        EffectDef::new("fragrance").possessive().counteracting(["stench"]),
        EffectDef::new("large-nose")
            .with_noun("enlarged nose")
            .possessive()
            .negating(["small-nose"])
            .with_synergy(
                Synergy::new(
                    EffectCondition::each_of(["stench", "bowel-stench"]).on_either_player(),
                )
                .with_borrowed("stench"),
            ),
        EffectDef::new("small-nose")
            .with_noun("small nose")
            .possessive()
            .counteracting(["stench", "fragrance", "bowel-stench"])
            .negating(["large-nose"]),
        EffectDef::new("merlins-beard")
            .with_noun("beard")
            .with_determiner(Determiner::Proper("Merlin's".into()))
            .with_flag("isFlammable")
            .with_modifier(
                Modifier::add(Stat::Spellcasting, 20.0).narrated("receives arcane wisdom"),
            ),
        EffectDef::new("bowel-slickery")
            .with_noun("bowel slickery")
            .possessive()
            .with_flag("isIllness")
            .with_modifier(Modifier::add(Stat::Evasion, 5.0).narrated("has lubricated legs")),
        EffectDef::new("bowel-stench")
            .with_noun("bowel stench")
            .possessive()
            .with_flag("isIllness")
            .with_borrowed("stench"),
        EffectDef::new("small-feet")
            .with_noun("small feet")
            .possessive()
            .negating(["large-feet"])
            .with_modifier(
                Modifier::sub(Stat::Evasion, 10.0).narrated("moves with greater difficulty"),
            ),
        EffectDef::new("tiny-feet")
            .with_noun("tiny feet")
            .possessive()
            .negating(["large-feet"])
            .removing(["small-feet"])
            .with_modifier(Modifier::sub(Stat::Evasion, 30.0).narrated("cannot stand")),
        EffectDef::new("large-feet")
            .with_noun("large feet")
            .possessive()
            .negating(["small-feet", "tiny-feet"])
            .with_modifier(
                Modifier::sub(Stat::Evasion, 5.0).narrated("keeps tripping over their feet"),
            ),
        EffectDef::new("swollen-tongue")
            .with_noun("swollen tongue")
            .possessive()
            .with_modifier(
                Modifier::sub(Stat::Spellcasting, 15.0).narrated("has difficulty speaking"),
            ),
        EffectDef::new("swollen-eyes")
            .with_noun("swollen eyes")
            .possessive()
            .with_modifier(Modifier::sub(Stat::Accuracy, 10.0).narrated("has difficulty seeing"))
            .with_modifier(Modifier::sub(Stat::Evasion, 5.0)),
        EffectDef::new("wings")
            .possessive()
            .with_flag("isFlammable")
            .counteracting(["small-feet", "tiny-feet"]),
        EffectDef::new("bat-ears").with_noun("bat ears").possessive(),
        EffectDef::new("noodle-arms").with_noun("noodle arms").possessive(),
        EffectDef::new("skin-irritation")
            .with_noun("skin irritation")
            .possessive()
            .with_flag("isIllness"),
        EffectDef::new("eagle-head")
            .with_noun("eagle head")
            .possessive()
            .with_modifier(Modifier::add(Stat::Accuracy, 10.0).narrated("has eagle vision"))
            .with_synergy(
                Synergy::new(
                    EffectCondition::each_of(["mice", "rats", "snakes"]).on_either_player(),
                )
                .with_modifier(
                    Modifier::sub(Stat::Spellcasting, 5.0)
                        .narrated("is distracted by the small prey"),
                ),
            ),
        EffectDef::new("elephant-form")
            .with_noun("elephant form")
            .possessive()
            .with_synergy(
                Synergy::new(EffectCondition::any_of(["mice"]).on_either_player())
                    .with_borrowed("fear"),
            ),
        EffectDef::new("marionette").possessive(),
        EffectDef::new("mer-tail")
            .possessive()
            .removing(["small-feet", "tiny-feet", "large-feet"])
            .with_modifier(
                Modifier::sub(Stat::Evasion, 20.0).narrated("cannot move effectively on land"),
            )
            .with_synergy(
                Synergy::new(EffectCondition::any_of(["arena-flood"])).with_modifier(
                    Modifier::add(Stat::Evasion, 20.0).narrated("is very agile in the water"),
                ),
            ),
    ]
}

fn mental() -> Vec<EffectDef> {
    vec![
        EffectDef::new("confusion")
            .possessive()
            .negating(["clarity"])
            .with_hooks(Confusion::default()),
        EffectDef::new("clarity")
            .with_noun("mental clarity")
            .possessive()
            .negating(["confusion", "intoxication"])
            .with_modifier(
                Modifier::add(Stat::Spellcasting, 10.0).narrated("can think more clearly"),
            ),
        EffectDef::new("intoxication")
            .possessive()
            .negating(["clarity"])
            .with_hooks(Intoxication::default()),
        EffectDef::new("phonemic-confusion")
            .with_noun("phonemic confusion")
            .possessive()
            .with_hooks(PhonemicSwap::default()),
        EffectDef::new("fear-of-snakes")
            .with_noun("fear of snakes")
            .possessive()
            .with_synergy(
                Synergy::new(EffectCondition::each_of(["snakes"]).on_either_player())
                    .with_borrowed("fear"),
            ),
        EffectDef::new("fear-of-rats")
            .with_noun("fear of rats")
            .possessive()
            .with_synergy(
                Synergy::new(EffectCondition::each_of(["rats"]).on_either_player())
                    .with_borrowed("fear"),
            ),
        EffectDef::new("fear")
            .possessive()
            .with_modifier(Modifier::add(Stat::Pain, 10.0).narrated("is in mental anguish")),
        EffectDef::new("inverted-vision")
            .with_noun("inverted vision")
            .possessive()
            .with_modifier(Modifier::sub(Stat::Accuracy, 40.0).narrated("is very confused"))
            .with_modifier(Modifier::sub(Stat::Evasion, 10.0)),
    ]
}

fn creatures() -> Vec<EffectDef> {
    vec![
        EffectDef::new("brain-parasite")
            .with_noun("brain parasite")
            .possessive()
            .with_modifier(
                Modifier::sub(Stat::Spellcasting, 10.0).narrated("has decreased brain capacity"),
            ),
        EffectDef::new("friendly-bard").with_noun("friendly bard").with_modifier(
            Modifier::sub(Stat::Pain, 10.0)
                .narrated("can bear the pain of this world a little better"),
        ),
        EffectDef::new("unfriendly-bard")
            .with_noun("unfriendly bard")
            .with_modifier(Modifier::add(Stat::Pain, 10.0).narrated("feels worse")),
        EffectDef::new("rats").with_noun("mischief of rats"),
        EffectDef::new("mice").with_noun("nest of mice"),
        EffectDef::new("snakes")
            .with_noun("nest of snakes")
            .removing(["mice", "rats"])
            .with_removal_verb("eat"),
        EffectDef::new("termites")
            .with_noun("colony of termites")
            .always_removing([":isWood"])
            .with_removal_verb("eat"),
        EffectDef::new("spiders").with_noun("cluster of spiders").with_borrowed("fear"),
        EffectDef::new("bees")
            .with_noun("swarm of bees")
            .with_modifier(
                Modifier::add(Stat::Pain, 10.0).narrated("is covered in painful bee stings"),
            ),
        EffectDef::new("crows")
            .with_noun("murder of crows")
            .always_removing(["spiders", "termites"])
            .with_removal_verb("eat"),
        EffectDef::new("mongoose")
            .always_removing(["spiders", "termites"])
            .with_removal_verb("eat")
            .negating(["snakes"])
            .with_negating_verb("succeeds in but dies fighting"),
    ]
}

fn protection() -> Vec<EffectDef> {
    vec![
        EffectDef::new("magic-shield-10").with_noun("protective aura I").with_modifier(
            Modifier::add(Stat::Shield, 10.0).narrated("is provided with a minor magical shield"),
        ),
        EffectDef::new("magic-shield-20")
            .with_noun("protective aura II")
            .removing(["magic-shield-10"])
            .with_modifier(
                Modifier::add(Stat::Shield, 20.0)
                    .narrated("is provided with a good magical shield"),
            ),
        EffectDef::new("magic-shield-30")
            .with_noun("protective aura III")
            .removing(["magic-shield-20"])
            .with_modifier(
                Modifier::add(Stat::Shield, 30.0)
                    .narrated("is provided with a greater magical shield"),
            ),
        EffectDef::new("levitation")
            .with_adjective("floating in the air")
            .counteracting(["arena-flood"])
            .repelling(["entangling-roots"])
            .with_repelling_verb("is out of reach of"),
        EffectDef::new("spectral").with_hooks(Spectral),
    ]
}

fn hindrances() -> Vec<EffectDef> {
    vec![
        EffectDef::new("metal-cage")
            .with_noun("metal cage")
            .with_flag("isMetal")
            .counteracting(["levitation", "lightning", "arena-thunderstorm"])
            .with_modifier(
                Modifier::sub(Stat::Evasion, 40.0)
                    .narrated("is trapped and can't dodge effectively"),
            )
            .with_modifier(
                Modifier::add(Stat::Shield, 5.0)
                    .narrated("has a small chance of protection against spells"),
            ),
        EffectDef::new("entangling-roots")
            .with_noun("entangling roots")
            .with_flag("isWood")
            .counteracting(["levitation"])
            .with_modifier(
                Modifier::sub(Stat::Evasion, 40.0)
                    .narrated("is entangled at the feet and cannot move"),
            ),
        EffectDef::new("hemp-ropes")
            .with_noun("hemp ropes")
            .with_flag("isFlammable")
            .with_modifier(
                Modifier::sub(Stat::Evasion, 40.0).narrated("is bound and can't dodge effectively"),
            ),
        EffectDef::new("peanut-butter")
            .with_noun("peanut butter coating")
            .with_adjective("peanut-buttered"),
    ]
}

fn arena() -> Vec<EffectDef> {
    vec![
        EffectDef::new("arena-flood").with_noun("flood").global(),
        EffectDef::new("arena-rain").with_noun("rain").global().with_borrowed("rain"),
        EffectDef::new("arena-thunderstorm")
            .with_noun("thunderstorm")
            .global()
            .with_borrowed("lightning"),
        EffectDef::new("arena-blizzard")
            .with_noun("blizzard")
            .global()
            .with_borrowed("blizzard"),
        EffectDef::new("arena-cold").with_noun("cold").global().with_borrowed("cold"),
        EffectDef::new("arena-hail").with_noun("hail").global().with_borrowed("hail"),
    ]
}
