//! Set and team validation against a resolved [RuleTable].
//!
//! Configuration errors (a broken format list, an unregistered legality hook) come back
//! as `Err`; everything wrong with the user's sets is reported as problem strings.

pub mod boosts;
mod learnset;
mod set;
mod team;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::data::species::Species;
use crate::data::{Catalog, Dex};
use crate::error::{Error, Result};
use crate::format::{Format, CUSTOM_RULES_SEPARATOR};
use crate::rules::{RuleResolver, RuleTable};
use crate::team::{PokemonSet, Team};

pub use learnset::LearnsetCheck;

/// Format used for a team that names none.
pub const DEFAULT_FORMAT: &str = "gen7ou";

pub const SPECIES_CLAUSE: &str = "speciesclause";
pub const NICKNAME_CLAUSE: &str = "nicknameclause";
pub const OHKO_CLAUSE: &str = "ohkoclause";
pub const EVASION_MOVES_CLAUSE: &str = "evasionmovesclause";
pub const EVASION_ABILITIES_CLAUSE: &str = "evasionabilitiesclause";
pub const MOODY_CLAUSE: &str = "moodyclause";
pub const SWAGGER_CLAUSE: &str = "swaggerclause";
pub const BATON_PASS_CLAUSE: &str = "batonpassclause";
pub const LITTLE_CUP: &str = "littlecup";
pub const ALLOW_CAP: &str = "allowcap";

/// Everything a check needs to know about the format a set is validated under.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    pub format: &'a Format,
    pub table: &'a RuleTable,
    pub dex: &'a Dex,
}

impl FormatContext<'_> {
    pub fn gen(&self) -> u8 {
        self.format.gen
    }

    pub fn has(&self, rule: &str) -> bool {
        self.table.has(rule)
    }
}

/// A named, format-selected legality hook. Its problems are appended to the built-in ones.
pub trait LegalityCheck: Send + Sync {
    fn check_set(&self, set: &PokemonSet, species: &Species, ctx: &FormatContext<'_>) -> Vec<String>;
}

/// A format resolved and ready to validate against.
pub struct PreparedFormat {
    pub format: Arc<Format>,
    pub table: Arc<RuleTable>,
    pub dex: Arc<Dex>,
    check: Option<Arc<dyn LegalityCheck>>,
}

impl PreparedFormat {
    pub fn context(&self) -> FormatContext<'_> {
        FormatContext {
            format: &self.format,
            table: &self.table,
            dex: &self.dex,
        }
    }

    pub fn check_set(&self, set: &PokemonSet) -> Vec<String> {
        set::validate_set(set, &self.context(), self.check.as_deref())
    }

    pub fn check_team(&self, team: &Team) -> Vec<String> {
        team::validate_team(team, self)
    }
}

impl fmt::Debug for PreparedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedFormat")
            .field("format", &self.format.id)
            .field("rules", &self.table.len())
            .field("legality_check", &self.check.is_some())
            .finish()
    }
}

/// Validates sets and teams. Cheap to share across threads; rule tables are cached by
/// the resolver.
pub struct Validator {
    resolver: Arc<RuleResolver>,
    checks: HashMap<String, Arc<dyn LegalityCheck>>,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hooks: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        hooks.sort_unstable();
        f.debug_struct("Validator")
            .field("resolver", &self.resolver)
            .field("legality_checks", &hooks)
            .finish()
    }
}

impl Validator {
    /// A validator with the built-in `learnset` hook registered.
    pub fn new(resolver: Arc<RuleResolver>) -> Self {
        Validator {
            resolver,
            checks: HashMap::new(),
        }
        .with_legality_check(LearnsetCheck::NAME, LearnsetCheck)
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(Arc::new(RuleResolver::from_catalog(catalog)))
    }

    /// Register (or replace) the hook a format selects through `legality_check: <name>`.
    pub fn with_legality_check(mut self, name: &str, check: impl LegalityCheck + 'static) -> Self {
        self.checks.insert(name.to_string(), Arc::new(check));
        self
    }

    pub fn resolver(&self) -> &RuleResolver {
        &self.resolver
    }

    /// Resolve a user-supplied format name. An unknown format, or custom rules that fail
    /// to apply, come back as a single problem in the inner `Err`.
    pub fn prepare(&self, name: &str) -> Result<std::result::Result<PreparedFormat, String>> {
        let (base_name, custom) = name
            .split_once(CUSTOM_RULES_SEPARATOR)
            .unwrap_or((name, ""));
        let Some(base) = self.resolver.formats().get(base_name) else {
            return Ok(Err(format!("{} is not a valid format.", name.trim())));
        };

        let format = if custom.trim().is_empty() {
            base
        } else {
            match self.resolver.format(name) {
                Ok(format) => format,
                Err(err) => {
                    debug!(format = %base.id, error = %err, "custom rules rejected");
                    return Ok(Err(err.to_string()));
                }
            }
        };

        let table = self.resolver.resolve(&format)?;
        let dex = self.resolver.dex_for(&format)?;
        let check = match table.legality_check() {
            Some(hook) => Some(
                self.checks
                    .get(&hook.hook)
                    .cloned()
                    .ok_or_else(|| Error::UnknownLegalityCheck(hook.hook.clone()))?,
            ),
            None => None,
        };
        Ok(Ok(PreparedFormat {
            format,
            table,
            dex,
            check,
        }))
    }

    pub fn validate_set(&self, set: &PokemonSet, format: &str) -> Result<Vec<String>> {
        Ok(match self.prepare(format)? {
            Ok(prepared) => prepared.check_set(set),
            Err(problem) => vec![problem],
        })
    }

    /// Validate a team under `format`, else the team's own format, else [DEFAULT_FORMAT].
    pub fn validate_team(&self, team: &Team, format: Option<&str>) -> Result<Vec<String>> {
        let name = format
            .or(team.format.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_FORMAT);
        Ok(match self.prepare(name)? {
            Ok(prepared) => prepared.check_team(team),
            Err(problem) => vec![problem],
        })
    }
}
