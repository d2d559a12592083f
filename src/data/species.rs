//! Species records: one entry per forme, keyed by the normalized forme name.

use serde::{Deserialize, Serialize};

use crate::data::stats::Gender;
use crate::id::{to_id, Id};

pub(crate) fn default_gen() -> u8 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesAbilities {
    #[serde(rename = "0")]
    pub primary: String,
    #[serde(rename = "1", default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(rename = "H", default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<String>,
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
}

impl SpeciesAbilities {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str())
            .chain(self.secondary.as_deref())
            .chain(self.hidden.as_deref())
            .chain(self.special.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderRatio {
    #[serde(rename = "M")]
    pub male: f64,
    #[serde(rename = "F")]
    pub female: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub num: i32,
    #[serde(default = "default_gen")]
    pub gen: u8,
    #[serde(default)]
    pub base_species: Option<String>,
    #[serde(default)]
    pub forme: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub abilities: SpeciesAbilities,
    /// Fixed gender, for single-gender and genderless species.
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub gender_ratio: Option<GenderRatio>,
    #[serde(default)]
    pub egg_groups: Vec<String>,
    #[serde(default)]
    pub prevo: Option<String>,
    #[serde(default)]
    pub evos: Vec<String>,
    #[serde(default)]
    pub other_formes: Vec<String>,
    #[serde(default)]
    pub battle_only: bool,
    #[serde(default)]
    pub required_ability: Option<String>,
    #[serde(default)]
    pub required_items: Vec<String>,
    #[serde(default)]
    pub required_move: Option<String>,
    #[serde(default)]
    pub unreleased_hidden: bool,
    #[serde(default)]
    pub male_only_hidden: bool,
    #[serde(default)]
    pub is_nonstandard: Option<String>,
    /// Move names this forme can learn. Empty when the dex carries no learnset for it.
    #[serde(default)]
    pub learnset: Vec<String>,
}

impl Species {
    pub fn id(&self) -> Id {
        Id::new(&self.name)
    }

    pub fn base_species_name(&self) -> &str {
        self.base_species.as_deref().unwrap_or(&self.name)
    }

    pub fn base_species_id(&self) -> Id {
        Id::new(self.base_species_name())
    }

    pub fn tier_id(&self) -> String {
        to_id(&self.tier)
    }

    pub fn nfe(&self) -> bool {
        !self.evos.is_empty()
    }

    pub fn is_mega(&self) -> bool {
        self.forme
            .as_deref()
            .is_some_and(|forme| forme.starts_with("Mega"))
    }

    pub fn is_cap(&self) -> bool {
        self.tier.starts_with("CAP")
    }

    /// Legendaries and mythicals: Undiscovered egg group (or Manaphy), fully evolved,
    /// minus Unown, the Pikachu formes and shiny Diancie.
    pub fn is_legendary(&self, shiny: bool) -> bool {
        let undiscovered = self
            .egg_groups
            .first()
            .is_some_and(|group| group == "Undiscovered");
        (undiscovered || self.name == "Manaphy")
            && self.prevo.is_none()
            && !self.nfe()
            && self.name != "Unown"
            && self.base_species_name() != "Pikachu"
            && (self.base_species_name() != "Diancie" || !shiny)
    }

    /// Share of females, used by the generation 2 Atk DV gender rule.
    pub fn female_ratio(&self) -> f64 {
        match (self.gender, self.gender_ratio) {
            (Some(Gender::Female), _) => 1.0,
            (Some(_), _) => 0.0,
            (None, Some(ratio)) => ratio.female,
            (None, None) => 0.5,
        }
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        let id = to_id(ability);
        self.abilities.iter().any(|name| to_id(name) == id)
    }

    pub fn is_hidden_ability(&self, ability: &str) -> bool {
        self.abilities
            .hidden
            .as_deref()
            .is_some_and(|hidden| to_id(hidden) == to_id(ability))
    }
}
