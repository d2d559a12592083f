//! User-supplied sets and teams. These are plain inputs: validators read them and never
//! mutate them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::data::stats::{Gender, StatsTable, MAX_IV};
use crate::error::{Error, Result};

pub const MAX_TEAM_SIZE: usize = 6;

/// One Pokémon as the user built it. Missing IVs default to 31, missing EVs to 0, and
/// a missing level to the format's maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonSet {
    /// Nickname.
    pub name: Option<String>,
    pub species: String,
    pub item: String,
    pub ability: String,
    pub moves: Vec<String>,
    pub nature: Option<String>,
    pub gender: Option<Gender>,
    pub level: Option<i32>,
    pub shiny: bool,
    pub evs: StatsTable,
    #[serde(deserialize_with = "deserialize_ivs")]
    pub ivs: StatsTable,
    /// Declared Hidden Power type.
    pub hp_type: Option<String>,
}

#[derive(Deserialize)]
struct PartialStats {
    hp: Option<i32>,
    atk: Option<i32>,
    def: Option<i32>,
    spa: Option<i32>,
    spd: Option<i32>,
    spe: Option<i32>,
}

/// IV tables may list only some stats; the rest are 31.
fn deserialize_ivs<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<StatsTable, D::Error> {
    let partial = PartialStats::deserialize(deserializer)?;
    Ok(StatsTable {
        hp: partial.hp.unwrap_or(MAX_IV),
        atk: partial.atk.unwrap_or(MAX_IV),
        def: partial.def.unwrap_or(MAX_IV),
        spa: partial.spa.unwrap_or(MAX_IV),
        spd: partial.spd.unwrap_or(MAX_IV),
        spe: partial.spe.unwrap_or(MAX_IV),
    })
}

impl Default for PokemonSet {
    fn default() -> Self {
        PokemonSet {
            name: None,
            species: String::new(),
            item: String::new(),
            ability: String::new(),
            moves: Vec::new(),
            nature: None,
            gender: None,
            level: None,
            shiny: false,
            evs: StatsTable::default(),
            ivs: StatsTable::perfect_ivs(),
            hp_type: None,
        }
    }
}

impl PokemonSet {
    pub fn new(species: &str) -> Self {
        PokemonSet {
            species: species.to_string(),
            ..PokemonSet::default()
        }
    }

    /// The name problems are reported under: nickname if set, else species.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.species,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub sets: Vec<PokemonSet>,
}

impl Team {
    pub fn new(sets: Vec<PokemonSet>) -> Self {
        Team { format: None, sets }
    }
}

pub fn load_team_file(path: impl AsRef<Path>) -> Result<Team> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_stats_default_to_max_ivs_and_zero_evs() {
        let set: PokemonSet =
            serde_json::from_str(r#"{"species":"Pikachu","moves":["Thunderbolt"],"evs":{"spe":252}}"#)
                .expect("set json");
        assert_eq!(set.ivs, StatsTable::perfect_ivs());
        assert_eq!(set.evs.spe, 252);
        assert_eq!(set.evs.hp, 0);
        assert_eq!(set.level, None);
    }

    #[test]
    fn partial_ivs_fill_the_rest_with_31() {
        let set: PokemonSet =
            serde_json::from_str(r#"{"species":"Pikachu","ivs":{"atk":0}}"#).expect("set json");
        assert_eq!(set.ivs.atk, 0);
        assert_eq!(set.ivs.hp, 31);
        assert_eq!(set.ivs.spe, 31);
    }

    #[test]
    fn display_name_prefers_nickname() {
        let mut set = PokemonSet::new("Pikachu");
        assert_eq!(set.display_name(), "Pikachu");
        set.name = Some("Sparky".to_string());
        assert_eq!(set.display_name(), "Sparky");
    }
}
