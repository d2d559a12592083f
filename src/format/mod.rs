//! Format definitions: named, inheritable rulesets bound to a generation mod.
//!
//! Definitions are read from `data/formats.yaml` and validated once by
//! [FormatRegistry]; the resulting [Format] descriptors are immutable.

mod registry;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use registry::FormatRegistry;

pub const CUSTOM_RULES_SEPARATOR: &str = "@@@";
pub const DEFAULT_MAX_LEVEL: i32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectType {
    #[default]
    Format,
    Ruleset,
    Rule,
    ValidatorRule,
}

/// Root of `formats.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatsFile {
    /// Alias id -> format name, e.g. `ou: "[Gen 7] OU"`.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    #[serde(default)]
    pub formats: Vec<FormatDefinition>,
}

/// One entry of the format list as written. An entry with only `section` starts a new
/// menu section and defines no format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(rename = "mod", default)]
    pub mod_id: Option<String>,
    #[serde(default)]
    pub effect_type: Option<EffectType>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub ruleset: Vec<String>,
    #[serde(default)]
    pub banlist: Vec<String>,
    #[serde(default)]
    pub unbanlist: Vec<String>,
    /// Name of the team generator; marks a generated-team format.
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub legality_check: Option<String>,
    #[serde(default)]
    pub max_level: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Format {
    pub id: String,
    pub name: String,
    pub mod_id: String,
    pub gen: u8,
    pub tier: String,
    pub effect_type: EffectType,
    pub desc: Option<String>,
    pub section: String,
    pub column: u32,
    pub ruleset: Vec<String>,
    pub banlist: Vec<String>,
    pub unbanlist: Vec<String>,
    pub custom_rules: Vec<String>,
    pub team: Option<String>,
    pub legality_check: Option<String>,
    pub max_level: i32,
}

/// `"[Gen 7] OU"` -> `"OU"`; names without a generation prefix are their own tier.
pub fn tier_from_name(name: &str) -> String {
    match name.split_once(']') {
        Some((_, tier)) => tier.trim().to_string(),
        None => name.trim().to_string(),
    }
}

impl Format {
    pub fn is_generated_team(&self) -> bool {
        self.team.is_some()
    }

    /// Little Cup and LC Uber restrict sets to level 5 first-stage Pokémon.
    pub fn is_little_cup_tier(&self) -> bool {
        self.tier == "LC" || self.tier == "LC Uber"
    }

    /// A derived format carrying extra rules, keyed `<id>@@@<rule>,<rule>`.
    pub fn with_custom_rules(&self, rules: Vec<String>) -> Format {
        Format {
            id: format!("{}{}{}", self.id, CUSTOM_RULES_SEPARATOR, rules.join(",")),
            custom_rules: rules,
            ..self.clone()
        }
    }
}

pub fn load_formats_file(path: impl AsRef<Path>) -> Result<FormatsFile> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| Error::Yaml {
        path: path.display().to_string(),
        source,
    })
}
