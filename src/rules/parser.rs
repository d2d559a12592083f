//! Parses one textual rule (`Standard`, `!Team Preview`, `-Gengarite`, `+pokemontag:mega`,
//! `-Baton Pass ++ Shell Smash>1`) into a [RuleSpec].

use crate::data::dex::Dex;
use crate::error::{Error, Result};
use crate::format::{Format, FormatRegistry};
use crate::id::{to_id, Id};
use crate::rules::ban::{BanLimit, BanTarget, ComplexBan};

/// Tags accepted after `pokemontag:` or as a bare ban name.
pub const VALID_TAGS: &[&str] = &[
    // singles tiers
    "uber", "ou", "uubl", "uu", "rubl", "ru", "nubl", "nu", "publ", "pu", "zu", "nfe", "lcuber",
    "lc", "cap", "caplc", "capnfe",
    // doubles tiers
    "duber", "dou", "dbl", "duu",
    "mega",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Pokemon,
    Move,
    Ability,
    Item,
    PokemonTag,
}

impl MatchKind {
    const ALL: [MatchKind; 5] = [
        MatchKind::Pokemon,
        MatchKind::Move,
        MatchKind::Ability,
        MatchKind::Item,
        MatchKind::PokemonTag,
    ];

    fn prefix(self) -> &'static str {
        match self {
            Self::Pokemon => "pokemon",
            Self::Move => "move",
            Self::Ability => "ability",
            Self::Item => "item",
            Self::PokemonTag => "pokemontag",
        }
    }
}

/// A parsed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSpec {
    /// A reference to another format or rule by id; `suppressed` for the `!id` form.
    Rule { id: String, suppressed: bool },
    Ban(BanTarget),
    Unban(BanTarget),
    ComplexBan(ComplexBan),
    ComplexTeamBan(ComplexBan),
}

impl RuleSpec {
    /// Rule-table key for simple rules: `id`, `!id`, `-target` or `+target`.
    pub fn key(&self) -> Option<String> {
        match self {
            Self::Rule {
                id,
                suppressed: false,
            } => Some(id.clone()),
            Self::Rule {
                id,
                suppressed: true,
            } => Some(format!("!{id}")),
            Self::Ban(target) => Some(format!("-{target}")),
            Self::Unban(target) => Some(format!("+{target}")),
            Self::ComplexBan(_) | Self::ComplexTeamBan(_) => None,
        }
    }
}

/// Parses rules against one format list and one dex.
pub struct RuleParser<'a> {
    formats: &'a FormatRegistry,
    dex: &'a Dex,
}

impl<'a> RuleParser<'a> {
    pub fn new(formats: &'a FormatRegistry, dex: &'a Dex) -> Self {
        RuleParser { formats, dex }
    }

    /// Parse one rule. `context` is the format whose rule list is being read; bans are
    /// rejected when it builds its own teams.
    pub fn parse_rule(&self, raw: &str, context: Option<&Format>) -> Result<RuleSpec> {
        let raw = raw.trim();
        let sign = match raw.chars().next() {
            Some(sign @ ('-' | '+')) => sign,
            _ => return self.parse_reference(raw),
        };
        if context.is_some_and(Format::is_generated_team) {
            return Err(Error::BansInGeneratedTeam);
        }

        let body = &raw[1..];
        if !body.contains('>') && !body.contains('+') {
            let target = self.resolve_ban_target(body)?;
            return Ok(if sign == '-' {
                RuleSpec::Ban(target)
            } else {
                RuleSpec::Unban(target)
            });
        }

        let mut buf = body;
        let mut limit = if sign == '+' {
            BanLimit::Allowed
        } else {
            BanLimit::Forbidden { limit: 0 }
        };
        if let Some(gt) = buf.rfind('>') {
            let bound = buf[gt + 1..].trim();
            if !bound.is_empty() && bound.chars().all(|ch| ch.is_ascii_digit()) {
                if sign == '-' {
                    limit = BanLimit::Forbidden {
                        limit: bound.parse().unwrap_or(u32::MAX),
                    };
                }
                buf = &buf[..gt];
            }
        }

        let mut team = buf.contains("++");
        let names: Vec<&str> = buf
            .split(if team { "++" } else { "+" })
            .map(str::trim)
            .collect();
        if names.len() == 1 && limit.is_positive() {
            team = true;
        }
        let rule = names.join(if team { " ++ " } else { " + " });
        let targets = names
            .iter()
            .map(|name| self.resolve_ban_target(name))
            .collect::<Result<Vec<_>>>()?;

        if team {
            return Ok(RuleSpec::ComplexTeamBan(ComplexBan::new(rule, limit, &targets)));
        }
        if names.len() > 1 {
            return Ok(RuleSpec::ComplexBan(ComplexBan::new(rule, limit, &targets)));
        }
        Err(Error::ConfusingRule(raw.to_string()))
    }

    fn parse_reference(&self, raw: &str) -> Result<RuleSpec> {
        let id = to_id(raw);
        if !self.formats.contains(&id) {
            return Err(Error::UnknownRule(raw.to_string()));
        }
        Ok(RuleSpec::Rule {
            id,
            suppressed: raw.starts_with('!'),
        })
    }

    /// Resolve a ban name to exactly one target. `category:name` restricts the search;
    /// otherwise species, moves, abilities, items and tags are all probed and more than
    /// one hit is ambiguous.
    pub fn resolve_ban_target(&self, raw: &str) -> Result<BanTarget> {
        let mut id = to_id(raw);
        if id == "unreleased" {
            return Ok(BanTarget::Unreleased);
        }
        if id == "illegal" {
            return Ok(BanTarget::Illegal);
        }

        let lowered = raw.trim().to_ascii_lowercase();
        let mut kinds: &[MatchKind] = &MatchKind::ALL;
        for kind in MatchKind::ALL.iter() {
            let prefix = kind.prefix();
            if lowered.starts_with(prefix) && lowered[prefix.len()..].starts_with(':') {
                kinds = std::slice::from_ref(kind);
                id = id[prefix.len()..].to_string();
                break;
            }
        }

        let rule_id = id.clone();
        if let Some(target) = self.dex.alias(&id) {
            id = to_id(target);
        }

        let mut matches = Vec::new();
        for kind in kinds {
            match kind {
                MatchKind::Pokemon => {
                    if let Some(species) = self.dex.species_by_id(&id) {
                        if species.other_formes.is_empty() {
                            matches.push(BanTarget::Species(Id::new(&id)));
                        } else {
                            matches.push(BanTarget::BaseSpecies(Id::new(&id)));
                        }
                    } else if let Some(base) = id.strip_suffix("base") {
                        if self.dex.species_by_id(base).is_some() {
                            matches.push(BanTarget::Species(Id::new(base)));
                        }
                    }
                }
                MatchKind::Move => {
                    if self.dex.has_move_id(&id) {
                        matches.push(BanTarget::Move(Id::new(&id)));
                    }
                }
                MatchKind::Ability => {
                    if self.dex.has_ability_id(&id) {
                        matches.push(BanTarget::Ability(Id::new(&id)));
                    }
                }
                MatchKind::Item => {
                    if self.dex.has_item_id(&id) {
                        matches.push(BanTarget::Item(Id::new(&id)));
                    }
                }
                MatchKind::PokemonTag => {
                    if VALID_TAGS.contains(&rule_id.as_str()) {
                        matches.push(BanTarget::Tag(Id::new(&rule_id)));
                    }
                }
            }
        }

        match matches.len() {
            0 => Err(Error::NothingMatches(raw.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::AmbiguousBan(raw.to_string())),
        }
    }
}
