//! The flattened, queryable view of a format.
//!
//! Keys are:
//! - `<ruleid>`: a rule or sub-format in effect
//! - `!<ruleid>`: a rule suppressed so it is not inherited
//! - `-<target>` / `+<target>`: a ban, or an unban overriding an inherited ban
//!
//! Values are the source: empty when declared directly, otherwise the name of the
//! sub-format the key was inherited from.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::id::to_id;
use crate::rules::ban::{BanTarget, ComplexBan};

/// A named legality hook and the format that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalityCheckRef {
    pub hook: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleTable {
    rules: BTreeMap<String, String>,
    complex_bans: Vec<ComplexBan>,
    complex_team_bans: Vec<ComplexBan>,
    legality_check: Option<LegalityCheckRef>,
}

fn add_complex(list: &mut Vec<ComplexBan>, ban: ComplexBan) {
    let key = to_id(&ban.rule);
    match list.iter_mut().find(|existing| to_id(&existing.rule) == key) {
        Some(existing) if existing.limit.is_unbounded() => {}
        Some(existing) => *existing = ban,
        None => list.push(ban),
    }
}

impl RuleTable {
    pub fn has(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.rules.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, source: impl Into<String>) {
        self.rules.insert(key.into(), source.into());
    }

    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.rules.remove(key)
    }

    /// `None` if the target is not banned, else `"banned by <source>"` or `"banned"`.
    pub fn check(&self, target: &BanTarget) -> Option<String> {
        self.get(&format!("-{target}")).map(|source| {
            if source.is_empty() {
                "banned".to_string()
            } else {
                format!("banned by {source}")
            }
        })
    }

    /// Add a combination ban. An entry with the same rule text is replaced unless its
    /// limit is unbounded, in which case the new entry is dropped.
    pub fn add_complex_ban(&mut self, ban: ComplexBan) {
        add_complex(&mut self.complex_bans, ban);
    }

    pub fn add_complex_team_ban(&mut self, ban: ComplexBan) {
        add_complex(&mut self.complex_team_bans, ban);
    }

    pub fn complex_bans(&self) -> &[ComplexBan] {
        &self.complex_bans
    }

    pub fn complex_team_bans(&self) -> &[ComplexBan] {
        &self.complex_team_bans
    }

    pub fn legality_check(&self) -> Option<&LegalityCheckRef> {
        self.legality_check.as_ref()
    }

    pub fn set_legality_check(&mut self, hook: &str, source: &str) {
        self.legality_check = Some(LegalityCheckRef {
            hook: hook.to_string(),
            source: source.to_string(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merge a resolved sub-format's table. Keys suppressed here are skipped, and keys
    /// already present keep their source. An inherited `!<ruleid>` also drops `<ruleid>`.
    /// Complex bans follow [`Self::add_complex_ban`].
    /// Two different legality hooks are an error.
    pub fn merge_inherited(&mut self, sub: &RuleTable, sub_name: &str, format_name: &str) -> Result<()> {
        for (key, source) in &sub.rules {
            if self.rules.contains_key(&format!("!{key}")) || self.rules.contains_key(key) {
                continue;
            }
            if let Some(suppressed) = key.strip_prefix('!') {
                self.rules.remove(suppressed);
            }
            let source = if source.is_empty() { sub_name } else { source.as_str() };
            self.rules.insert(key.clone(), source.to_string());
        }

        let inherit = |ban: &ComplexBan| ComplexBan {
            source: if ban.source.is_empty() {
                sub_name.to_string()
            } else {
                ban.source.clone()
            },
            ..ban.clone()
        };
        for ban in &sub.complex_bans {
            self.add_complex_ban(inherit(ban));
        }
        for ban in &sub.complex_team_bans {
            self.add_complex_team_ban(inherit(ban));
        }

        if let Some(theirs) = &sub.legality_check {
            match &self.legality_check {
                None => self.legality_check = Some(theirs.clone()),
                Some(ours) if ours.hook == theirs.hook => {}
                Some(ours) => {
                    return Err(Error::ConflictingLegalityCheck {
                        format: format_name.to_string(),
                        first: ours.source.clone(),
                        second: theirs.source.clone(),
                    })
                }
            }
        }
        Ok(())
    }
}
