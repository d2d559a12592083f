use std::collections::HashSet;

use crate::data::species::Species;
use crate::data::Dex;
use crate::id::to_id;
use crate::team::PokemonSet;
use crate::validate::{FormatContext, LegalityCheck};

/// Evolution chains are never longer than this; guards against a malformed `prevo` loop.
const MAX_PREVO_STEPS: usize = 8;

/// Checks each move against the learnsets of the species, its base forme and its
/// pre-evolutions. A species is only checked when it, or its base forme, carries
/// learnset data.
#[derive(Debug, Clone, Copy, Default)]
pub struct LearnsetCheck;

impl LearnsetCheck {
    pub const NAME: &'static str = "learnset";

    fn learnable(species: &Species, dex: &Dex) -> Option<HashSet<String>> {
        let base = species.base_species.as_deref().and_then(|base| dex.species(base));
        if species.learnset.is_empty() && base.map_or(true, |base| base.learnset.is_empty()) {
            return None;
        }

        let mut learnable: HashSet<String> = HashSet::new();
        let mut add = |species: &Species| learnable.extend(species.learnset.iter().map(|mv| to_id(mv)));
        add(species);
        if let Some(base) = base {
            add(base);
        }
        let mut current = species.prevo.as_deref();
        for _ in 0..MAX_PREVO_STEPS {
            let Some(prevo) = current.and_then(|name| dex.species(name)) else {
                break;
            };
            add(prevo);
            current = prevo.prevo.as_deref();
        }
        Some(learnable)
    }
}

impl LegalityCheck for LearnsetCheck {
    fn check_set(&self, set: &PokemonSet, species: &Species, ctx: &FormatContext<'_>) -> Vec<String> {
        let Some(learnable) = Self::learnable(species, ctx.dex) else {
            return Vec::new();
        };
        set.moves
            .iter()
            .filter_map(|raw| ctx.dex.move_(raw))
            .filter(|mv| {
                let id = mv.id();
                // Typed Hidden Power variants are learned as plain Hidden Power.
                let id = if id.as_str().starts_with("hiddenpower") {
                    "hiddenpower"
                } else {
                    id.as_str()
                };
                !learnable.contains(id)
            })
            .map(|mv| format!("{} can't learn {}.", set.display_name(), mv.name))
            .collect()
    }
}
