//! The standard spell book.

use tracing::debug;

use crate::effects::EffectCatalog;
use crate::error::CatalogResult;

use super::book::SpellBook;
use super::spell::{Spell, SpellCast, SpellFailure, SpellHooks};

/// Support spells that always land.
const AUTO_HIT: f64 = 99999.0;

/// Permanently raises the target's baseline pain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wound {
    pub pain: f64,
}

impl SpellHooks for Wound {
    fn cast(&self, cast: &mut SpellCast<'_>) {
        cast.target.base.pain += self.pain;
        debug!(target = %cast.target.name, pain = cast.target.base.pain, "baseline pain raised");
        cast.output.append(format!(
            "@{} will carry this wound for the rest of the duel. ",
            cast.target.name
        ));
    }
}

/// A failed cast scorches the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backfire;

impl SpellHooks for Backfire {
    fn on_failure(&self, failure: &mut SpellFailure<'_>) -> bool {
        failure.output.send(format!(
            "@{}'s _fulmen_ fizzles and sparks crackle harmlessly around their fingers.",
            failure.caster.name
        ));
        true
    }
}

/// Build the standard spell book against `catalog`.
pub fn standard_spells(catalog: &EffectCatalog) -> CatalogResult<SpellBook> {
    SpellBook::builder()
        .spell(Spell::new("volito", "levitates").with_effect("levitation"))
        .spell(Spell::new("madefio", "soaks with water").with_effect("water"))
        .spell(Spell::new("confundo", "confuses").with_effect("confusion"))
        .spell(
            Spell::new("caseum foetidum", "makes one smell like stinky cheese")
                .with_effect("stench")
                .with_narration("@target smelleth like stinky cheese."),
        )
        .spell(
            Spell::new("incendio", "sets ablaze")
                .with_effect("fire")
                .with_projectile("ball of fire"),
        )
        .spell(Spell::new("nebulus", "summons a thick fog").with_effect("fog"))
        .spell(Spell::new("frigidus", "chills to the bone").with_effect("cold"))
        .spell(
            Spell::new("fulmen", "calls down lightning")
                .with_effect("lightning")
                .with_projectile("lightning bolt")
                .with_success_rate(0.8)
                .with_hooks(Backfire),
        )
        .spell(Spell::new("mentis clarus", "clears the mind").with_effect("clarity"))
        .spell(Spell::new("ebrius", "intoxicates").with_effect("intoxication"))
        .spell(Spell::new("lingua nodosa", "ties the tongue").with_effect("phonemic-confusion"))
        .spell(Spell::new("nasus magnus", "enlarges the nose").with_effect("large-nose"))
        .spell(Spell::new("pedes minimi", "shrinks the feet").with_effect("tiny-feet"))
        .spell(Spell::new("alae", "sprouts or sheds wings").toggling("wings"))
        .spell(Spell::new("radices", "binds with roots").with_effect("entangling-roots"))
        .spell(Spell::new("funis", "binds with hemp ropes").with_effect("hemp-ropes"))
        .spell(Spell::new("arachide", "coats in peanut butter").with_effect("peanut-butter"))
        .spell(
            Spell::new("mures", "summons a nest of mice")
                .with_effect("mice")
                .with_hit_modifier(AUTO_HIT),
        )
        .spell(
            Spell::new("serpentes", "summons a nest of snakes")
                .with_effect("snakes")
                .with_hit_modifier(AUTO_HIT),
        )
        .spell(
            Spell::new("termites", "summons a colony of termites")
                .with_effect("termites")
                .with_hit_modifier(AUTO_HIT),
        )
        .spell(
            Spell::new("bardus amicus", "summons a friendly bard")
                .with_effect("friendly-bard")
                .with_hit_modifier(AUTO_HIT),
        )
        .spell(
            Spell::new("scutum", "conjures a protective aura")
                .with_effect("magic-shield-10")
                .with_hit_modifier(AUTO_HIT),
        )
        .spell(Spell::new("spectralis", "makes incorporeal").with_effect("spectral"))
        .spell(Spell::new("sano", "cures illness").removing(":isIllness"))
        .spell(
            Spell::new("vulnero", "inflicts a lasting wound")
                .with_success_rate(0.7)
                .with_hooks(Wound { pain: 5.0 }),
        )
        .spell(
            Spell::new("diluvium", "floods the arena")
                .with_effect("arena-flood")
                .with_hit_modifier(AUTO_HIT),
        )
        .spell(
            Spell::new("pluvia", "brings rain upon the arena")
                .with_effect("arena-rain")
                .with_hit_modifier(AUTO_HIT),
        )
        .spell(
            Spell::new("tonitrus", "summons a thunderstorm over the arena")
                .with_effect("arena-thunderstorm")
                .with_hit_modifier(AUTO_HIT),
        )
        .build(catalog)
}
