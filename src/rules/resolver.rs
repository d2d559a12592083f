//! Resolves a format's inheritable rule list into a cached [RuleTable].

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::data::{Catalog, Dex, Dexes};
use crate::error::{Error, Result};
use crate::format::{Format, FormatRegistry, CUSTOM_RULES_SEPARATOR};
use crate::rules::parser::{RuleParser, RuleSpec};
use crate::rules::table::RuleTable;

/// Sub-format references nested deeper than this are an error.
pub const MAX_RULE_DEPTH: usize = 16;

/// Owns the format list and dexes, and memoizes one rule table per format id.
#[derive(Debug)]
pub struct RuleResolver {
    formats: Arc<FormatRegistry>,
    dexes: Arc<Dexes>,
    cache: RwLock<HashMap<String, Arc<RuleTable>>>,
}

impl RuleResolver {
    pub fn new(formats: Arc<FormatRegistry>, dexes: Arc<Dexes>) -> Self {
        RuleResolver {
            formats,
            dexes,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(Arc::clone(&catalog.formats), Arc::clone(&catalog.dexes))
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    pub fn dex_for(&self, format: &Format) -> Result<Arc<Dex>> {
        self.dexes.get(&format.mod_id).ok_or_else(|| Error::UnknownMod {
            format: format.name.clone(),
            mod_id: format.mod_id.clone(),
        })
    }

    /// Parse one rule in the context of `format` (its dex, its generated-team flag).
    pub fn parse_rule(&self, raw: &str, format: &Format) -> Result<RuleSpec> {
        let dex = self.dex_for(format)?;
        RuleParser::new(&self.formats, &dex).parse_rule(raw, Some(format))
    }

    fn cached(&self, id: &str) -> Option<Arc<RuleTable>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Resolve `format` into its rule table, computing it on first use.
    pub fn resolve(&self, format: &Format) -> Result<Arc<RuleTable>> {
        let mut stack = Vec::new();
        self.resolve_at(format, 0, &mut stack)
    }

    fn resolve_at(&self, format: &Format, depth: usize, stack: &mut Vec<String>) -> Result<Arc<RuleTable>> {
        if let Some(table) = self.cached(&format.id) {
            trace!(format = %format.id, "rule table cache hit");
            return Ok(table);
        }
        if stack.contains(&format.id) {
            let mut chain = stack.clone();
            chain.push(format.id.clone());
            return Err(Error::CyclicReference(chain.join(" -> ")));
        }

        stack.push(format.id.clone());
        let computed = self.compute(format, depth, stack);
        stack.pop();
        let table = Arc::new(computed?);

        debug!(
            format = %format.id,
            depth,
            rules = table.len(),
            complex_bans = table.complex_bans().len(),
            complex_team_bans = table.complex_team_bans().len(),
            "resolved rule table"
        );
        // Another caller may have raced us here; keep whichever table landed first.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(format.id.clone()).or_insert(table)))
    }

    fn working_rules(format: &Format) -> Vec<String> {
        let (suppressions, additions): (Vec<&String>, Vec<&String>) = format
            .custom_rules
            .iter()
            .partition(|rule| rule.starts_with('!'));

        suppressions
            .into_iter()
            .cloned()
            .chain(format.ruleset.iter().cloned())
            .chain(format.banlist.iter().map(|ban| format!("-{ban}")))
            .chain(format.unbanlist.iter().map(|ban| format!("+{ban}")))
            .chain(additions.into_iter().cloned())
            .collect()
    }

    fn compute(&self, format: &Format, depth: usize, stack: &mut Vec<String>) -> Result<RuleTable> {
        let dex = self.dex_for(format)?;
        let parser = RuleParser::new(&self.formats, &dex);

        let mut table = RuleTable::default();
        if let Some(hook) = &format.legality_check {
            table.set_legality_check(hook, &format.name);
        }

        for rule in Self::working_rules(format) {
            match parser.parse_rule(&rule, Some(format))? {
                RuleSpec::ComplexBan(ban) => table.add_complex_ban(ban),
                RuleSpec::ComplexTeamBan(ban) => table.add_complex_team_ban(ban),
                RuleSpec::Ban(target) => table.set(format!("-{target}"), ""),
                RuleSpec::Unban(target) => {
                    table.delete(&format!("-{target}"));
                    table.set(format!("+{target}"), "");
                }
                RuleSpec::Rule {
                    id,
                    suppressed: true,
                } => {
                    table.delete(&id);
                    table.set(format!("!{id}"), "");
                }
                RuleSpec::Rule {
                    id,
                    suppressed: false,
                } => {
                    let sub = self.formats.get(&id);
                    let sub_id = sub.as_ref().map_or(id, |sub| sub.id.clone());
                    if table.has(&format!("!{sub_id}")) {
                        continue;
                    }
                    table.set(sub_id.as_str(), "");
                    let Some(sub) = sub else {
                        continue;
                    };

                    let sub_table = match self.cached(&sub.id) {
                        Some(sub_table) => sub_table,
                        None if depth > MAX_RULE_DEPTH => {
                            return Err(Error::ExcessiveRecursion {
                                format: format.name.clone(),
                                rule,
                            });
                        }
                        None => self.resolve_at(&sub, depth + 1, stack)?,
                    };
                    table.merge_inherited(&sub_table, &sub.name, &format.name)?;
                }
            }
        }
        Ok(table)
    }

    /// Check a user-supplied `<format>@@@<rules>` name and return its canonical id. Rules
    /// already in effect are dropped; if none remain that is an error.
    pub fn validate_format(&self, name: &str) -> Result<String> {
        let (base_name, custom) = match name.split_once(CUSTOM_RULES_SEPARATOR) {
            Some((base, custom)) => (base, custom),
            None => (name, ""),
        };
        let format = self
            .formats
            .get(base_name)
            .ok_or_else(|| Error::UnknownFormat(base_name.trim().to_string()))?;
        if custom.trim().is_empty() {
            return Ok(format.id.clone());
        }

        let table = self.resolve(&format)?;
        let mut kept = Vec::new();
        for rule in custom.split(',') {
            let rule: String = rule
                .chars()
                .filter(|ch| !matches!(ch, '\r' | '\n' | '|'))
                .collect();
            let rule = rule.trim();
            if rule.is_empty() {
                continue;
            }
            let spec = self.parse_rule(rule, &format)?;
            if spec.key().is_some_and(|key| table.has(&key)) {
                continue;
            }
            kept.push(rule.to_string());
        }
        if kept.is_empty() {
            return Err(Error::RedundantCustomRules);
        }

        let derived = format.with_custom_rules(kept);
        self.resolve(&derived)?;
        Ok(derived.id)
    }

    /// Look up a user-supplied format name, validating any custom rules it carries.
    pub fn format(&self, name: &str) -> Result<Arc<Format>> {
        let id = self.validate_format(name)?;
        self.formats
            .get(&id)
            .ok_or_else(|| Error::UnknownFormat(name.trim().to_string()))
    }
}
