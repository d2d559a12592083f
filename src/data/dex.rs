//! Per-generation entity databases ("mods"). Each mod lives in `data/dex/<mod>/` and may
//! inherit another mod's tables, overlaying its own records on top.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::abilities::{Ability, Nature};
use crate::data::items::Item;
use crate::data::moves::Move;
use crate::data::species::Species;
use crate::error::{Error, Result};
use crate::id::{to_id, Id};

pub const BASE_MOD: &str = "gen7";

#[derive(Debug, Deserialize)]
struct ModManifest {
    gen: u8,
    #[serde(default)]
    inherit: Option<String>,
}

/// Raw records of one mod directory, before inheritance is applied.
#[derive(Debug, Default)]
pub struct DexFiles {
    pub species: Vec<Species>,
    pub moves: Vec<Move>,
    pub items: Vec<Item>,
    pub abilities: Vec<Ability>,
    pub natures: Vec<Nature>,
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Dex {
    pub mod_id: String,
    pub gen: u8,
    species: HashMap<Id, Species>,
    moves: HashMap<Id, Move>,
    items: HashMap<Id, Item>,
    abilities: HashMap<Id, Ability>,
    natures: HashMap<Id, Nature>,
    aliases: HashMap<Id, String>,
}

fn index_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> Id, table: &mut HashMap<Id, T>) {
    for record in records {
        table.insert(id(&record), record);
    }
}

impl Dex {
    /// Build a mod from its own records, overlaid on the parent's tables when it inherits.
    pub fn from_files(mod_id: &str, gen: u8, parent: Option<&Dex>, files: DexFiles) -> Dex {
        let mut dex = match parent {
            Some(parent) => Dex {
                mod_id: mod_id.to_string(),
                gen,
                ..parent.clone()
            },
            None => Dex {
                mod_id: mod_id.to_string(),
                gen,
                species: HashMap::new(),
                moves: HashMap::new(),
                items: HashMap::new(),
                abilities: HashMap::new(),
                natures: HashMap::new(),
                aliases: HashMap::new(),
            },
        };
        index_by_id(files.species, Species::id, &mut dex.species);
        index_by_id(files.moves, Move::id, &mut dex.moves);
        index_by_id(files.items, Item::id, &mut dex.items);
        index_by_id(files.abilities, Ability::id, &mut dex.abilities);
        index_by_id(files.natures, Nature::id, &mut dex.natures);
        for (alias, target) in files.aliases {
            dex.aliases.insert(Id::new(&alias), target);
        }
        dex
    }

    /// Follow the alias table once; unknown names normalize to themselves.
    pub fn resolve_alias(&self, name: &str) -> Id {
        let id = Id::new(name);
        match self.aliases.get(&id) {
            Some(target) => Id::new(target),
            None => id,
        }
    }

    pub fn alias(&self, id: &str) -> Option<&str> {
        self.aliases.get(id).map(String::as_str)
    }

    /// Species as they exist in this mod's generation.
    pub fn species(&self, name: &str) -> Option<&Species> {
        self.species
            .get(&self.resolve_alias(name))
            .filter(|species| species.gen <= self.gen)
    }

    pub fn move_(&self, name: &str) -> Option<&Move> {
        self.moves
            .get(&self.resolve_alias(name))
            .filter(|mv| mv.gen <= self.gen)
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items
            .get(&self.resolve_alias(name))
            .filter(|item| item.gen <= self.gen)
    }

    pub fn ability(&self, name: &str) -> Option<&Ability> {
        self.abilities
            .get(&self.resolve_alias(name))
            .filter(|ability| ability.gen <= self.gen)
    }

    pub fn nature(&self, name: &str) -> Option<&Nature> {
        self.natures.get(to_id(name).as_str())
    }

    // Unfiltered lookups by normalized id, for rule parsing.

    pub fn species_by_id(&self, id: &str) -> Option<&Species> {
        self.species.get(id)
    }

    pub fn has_move_id(&self, id: &str) -> bool {
        self.moves.contains_key(id)
    }

    pub fn has_item_id(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn has_ability_id(&self, id: &str) -> bool {
        self.abilities.contains_key(id)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Json {
        path: path.display().to_string(),
        source,
    })
}

fn read_optional_json<T: DeserializeOwned + Default>(path: PathBuf) -> Result<T> {
    if path.exists() {
        read_json(&path)
    } else {
        Ok(T::default())
    }
}

fn load_dex_files(dir: &Path) -> Result<DexFiles> {
    Ok(DexFiles {
        species: read_optional_json(dir.join("species.json"))?,
        moves: read_optional_json(dir.join("moves.json"))?,
        items: read_optional_json(dir.join("items.json"))?,
        abilities: read_optional_json(dir.join("abilities.json"))?,
        natures: read_optional_json(dir.join("natures.json"))?,
        aliases: read_optional_json(dir.join("aliases.json"))?,
    })
}

/// Every mod loaded from a dex directory, keyed by mod id.
#[derive(Debug, Clone, Default)]
pub struct Dexes {
    mods: HashMap<String, Arc<Dex>>,
}

impl Dexes {
    pub fn from_mods(mods: impl IntoIterator<Item = Dex>) -> Self {
        Dexes {
            mods: mods
                .into_iter()
                .map(|dex| (dex.mod_id.clone(), Arc::new(dex)))
                .collect(),
        }
    }

    /// Load every `<dir>/<mod>/mod.json` and resolve `inherit` chains.
    pub fn load(dir: impl AsRef<Path>) -> Result<Dexes> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| Error::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let mut manifests: HashMap<String, (ModManifest, PathBuf)> = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let manifest_path = path.join("mod.json");
            if !manifest_path.exists() {
                warn!(dir = %path.display(), "skipping dex directory without mod.json");
                continue;
            }
            let manifest: ModManifest = read_json(&manifest_path)?;
            let mod_id = entry.file_name().to_string_lossy().to_string();
            manifests.insert(mod_id, (manifest, path));
        }

        let mut dexes = Dexes::default();
        let mut mod_ids: Vec<String> = manifests.keys().cloned().collect();
        mod_ids.sort();
        for mod_id in mod_ids {
            let mut in_progress = HashSet::new();
            dexes.load_mod(&mod_id, &manifests, &mut in_progress)?;
        }
        Ok(dexes)
    }

    fn load_mod(
        &mut self,
        mod_id: &str,
        manifests: &HashMap<String, (ModManifest, PathBuf)>,
        in_progress: &mut HashSet<String>,
    ) -> Result<Arc<Dex>> {
        if let Some(dex) = self.mods.get(mod_id) {
            return Ok(Arc::clone(dex));
        }
        let Some((manifest, path)) = manifests.get(mod_id) else {
            return Err(Error::UnknownMod {
                format: String::new(),
                mod_id: mod_id.to_string(),
            });
        };
        in_progress.insert(mod_id.to_string());

        let parent = match &manifest.inherit {
            Some(parent) if in_progress.contains(parent) || !manifests.contains_key(parent) => {
                return Err(Error::UnknownParentMod {
                    mod_id: mod_id.to_string(),
                    parent: parent.clone(),
                });
            }
            Some(parent) => Some(self.load_mod(parent, manifests, in_progress)?),
            None => None,
        };

        let files = load_dex_files(path)?;
        let dex = Dex::from_files(mod_id, manifest.gen, parent.as_deref(), files);
        debug!(
            mod_id,
            gen = dex.gen,
            species = dex.species_count(),
            inherit = ?manifest.inherit,
            "loaded dex mod"
        );
        let dex = Arc::new(dex);
        self.mods.insert(mod_id.to_string(), Arc::clone(&dex));
        in_progress.remove(mod_id);
        Ok(dex)
    }

    pub fn get(&self, mod_id: &str) -> Option<Arc<Dex>> {
        self.mods.get(mod_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(species: &str, moves: &str) -> DexFiles {
        DexFiles {
            species: serde_json::from_str(species).expect("species"),
            moves: serde_json::from_str(moves).expect("moves"),
            ..DexFiles::default()
        }
    }

    #[test]
    fn child_mod_overlays_parent_and_filters_by_gen() {
        let base = Dex::from_files(
            "gen7",
            7,
            None,
            files(
                r#"[{"name":"Bulbasaur","num":1,"gen":1,"tier":"LC"},
                    {"name":"Rowlet","num":722,"gen":7,"tier":"LC"}]"#,
                r#"[{"name":"Tackle","type":"Normal"}]"#,
            ),
        );
        let gen1 = Dex::from_files(
            "gen1",
            1,
            Some(&base),
            files(r#"[{"name":"Bulbasaur","num":1,"gen":1,"tier":"NFE"}]"#, "[]"),
        );

        assert_eq!(base.species("Bulbasaur").map(|s| s.tier.as_str()), Some("LC"));
        assert_eq!(gen1.species("Bulbasaur").map(|s| s.tier.as_str()), Some("NFE"));
        assert!(gen1.species("Rowlet").is_none());
        assert!(gen1.species_by_id("rowlet").is_some());
        assert!(gen1.move_("tackle").is_some());
    }

    #[test]
    fn aliases_resolve_before_lookup() {
        let mut dex_files = files(r#"[{"name":"Landorus-Therian","num":645,"gen":5}]"#, "[]");
        dex_files
            .aliases
            .insert("landot".to_string(), "Landorus-Therian".to_string());
        let dex = Dex::from_files("gen7", 7, None, dex_files);
        assert_eq!(dex.species("Lando-T").map(|s| s.num), Some(645));
        assert_eq!(dex.alias("landot"), Some("Landorus-Therian"));
    }
}
