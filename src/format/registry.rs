use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::data::dex::{Dexes, BASE_MOD};
use crate::error::{Error, Result};
use crate::format::{
    tier_from_name, Format, FormatDefinition, CUSTOM_RULES_SEPARATOR, DEFAULT_MAX_LEVEL,
};
use crate::id::to_id;

/// Every known format, keyed by id, plus the alias table used for lookups.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, Arc<Format>>,
    order: Vec<String>,
    aliases: HashMap<String, String>,
}

impl FormatRegistry {
    /// Validate the raw list: section-only entries are skipped, names must normalize to a
    /// non-empty unique id, and every mod must exist. Section and column carry over from
    /// the last entry that set them.
    pub fn from_definitions(
        definitions: Vec<FormatDefinition>,
        aliases: HashMap<String, String>,
        dexes: &Dexes,
    ) -> Result<FormatRegistry> {
        let mut registry = FormatRegistry {
            aliases: aliases
                .into_iter()
                .map(|(alias, target)| (to_id(&alias), target))
                .collect(),
            ..FormatRegistry::default()
        };

        let mut section = String::new();
        let mut column = 1;
        for (index, definition) in definitions.into_iter().enumerate() {
            if let Some(s) = &definition.section {
                section = s.clone();
            }
            if let Some(c) = definition.column {
                column = c;
            }
            if definition.name.is_empty() && definition.section.is_some() {
                continue;
            }

            let id = to_id(&definition.name);
            if id.is_empty() {
                return Err(Error::MissingFormatName {
                    index: index + 1,
                    name: definition.name,
                });
            }
            if registry.formats.contains_key(&id) {
                return Err(Error::DuplicateFormat { index: index + 1, id });
            }
            let mod_id = definition
                .mod_id
                .unwrap_or_else(|| BASE_MOD.to_string());
            let Some(dex) = dexes.get(&mod_id) else {
                return Err(Error::UnknownMod {
                    format: definition.name,
                    mod_id,
                });
            };

            let format = Format {
                id: id.clone(),
                tier: tier_from_name(&definition.name),
                gen: dex.gen,
                mod_id,
                effect_type: definition.effect_type.unwrap_or_default(),
                desc: definition.desc,
                section: definition.section.unwrap_or_else(|| section.clone()),
                column: definition.column.unwrap_or(column),
                ruleset: definition.ruleset,
                banlist: definition.banlist,
                unbanlist: definition.unbanlist,
                custom_rules: Vec::new(),
                team: definition.team,
                legality_check: definition.legality_check,
                max_level: definition.max_level.unwrap_or(DEFAULT_MAX_LEVEL),
                name: definition.name,
            };
            registry.order.push(id.clone());
            registry.formats.insert(id, Arc::new(format));
        }
        debug!(formats = registry.order.len(), "format registry built");
        Ok(registry)
    }

    /// Look up a trusted format name. Aliases are followed, a bare tier falls back to its
    /// generation 7 format, and a `@@@` suffix yields a derived format carrying those
    /// custom rules unchecked.
    pub fn get(&self, name: &str) -> Option<Arc<Format>> {
        let name = name.trim();
        let (base, custom) = match name.split_once(CUSTOM_RULES_SEPARATOR) {
            Some((base, custom)) => (base, Some(custom)),
            None => (name, None),
        };
        let format = self.get_by_id(&self.canonical_id(base))?;

        let rules: Vec<String> = custom
            .map(|custom| {
                custom
                    .split(',')
                    .map(str::trim)
                    .filter(|rule| !rule.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if rules.is_empty() {
            return Some(format);
        }
        Some(Arc::new(format.with_custom_rules(rules)))
    }

    /// Normalize a base format name the way lookups do: alias, then `gen7` prefix.
    pub fn canonical_id(&self, name: &str) -> String {
        let mut id = to_id(name);
        if let Some(target) = self.aliases.get(&id) {
            id = to_id(target);
        }
        let gen7 = format!("gen7{id}");
        if self.formats.contains_key(&gen7) {
            id = gen7;
        }
        id
    }

    pub fn get_by_id(&self, id: &str) -> Option<Arc<Format>> {
        self.formats.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.formats.contains_key(id)
    }

    /// Formats in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Format>> {
        self.order.iter().filter_map(|id| self.formats.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
