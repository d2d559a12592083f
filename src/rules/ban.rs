//! Ban targets and complex (multi-target) bans.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::id::Id;

/// One thing a rule can ban or unban. Displays as its rule-table key, e.g. `move:batonpass`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BanTarget {
    Species(Id),
    /// Every forme of a species with alternate formes.
    BaseSpecies(Id),
    Move(Id),
    Ability(Id),
    Item(Id),
    Tag(Id),
    Unreleased,
    Illegal,
}

impl fmt::Display for BanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Species(id) => write!(f, "pokemon:{id}"),
            Self::BaseSpecies(id) => write!(f, "basespecies:{id}"),
            Self::Move(id) => write!(f, "move:{id}"),
            Self::Ability(id) => write!(f, "ability:{id}"),
            Self::Item(id) => write!(f, "item:{id}"),
            Self::Tag(id) => write!(f, "pokemontag:{id}"),
            Self::Unreleased => f.write_str("unreleased"),
            Self::Illegal => f.write_str("illegal"),
        }
    }
}

impl Serialize for BanTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How many of a complex ban's targets may co-occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BanLimit {
    /// `limit == 0`: the full combination is banned. Otherwise at most `limit` matches.
    Forbidden { limit: u32 },
    /// Declared through `+`: never fires and can't be overridden by a later bounded ban.
    Allowed,
}

impl BanLimit {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// True for `Allowed` and for a nonzero `Forbidden` limit.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Forbidden { limit } => *limit > 0,
            Self::Allowed => true,
        }
    }
}

/// What one set brings to a ban check: its species, forme family, tags and loadout.
#[derive(Debug, Clone, Default)]
pub struct SetFeatures {
    pub species: Id,
    pub base_species: Id,
    pub tags: BTreeSet<Id>,
    pub ability: Id,
    pub item: Id,
    pub moves: BTreeSet<Id>,
}

/// Targets grouped by category. Unreleased and Illegal targets live with the tags, matching
/// species whose tier is `Unreleased` or `Illegal`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ban {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub species: BTreeSet<Id>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub base_species: BTreeSet<Id>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub moves: BTreeSet<Id>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub abilities: BTreeSet<Id>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub items: BTreeSet<Id>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<Id>,
}

impl Ban {
    pub fn from_targets(targets: &[BanTarget]) -> Ban {
        let mut ban = Ban::default();
        for target in targets {
            match target {
                BanTarget::Species(id) => ban.species.insert(id.clone()),
                BanTarget::BaseSpecies(id) => ban.base_species.insert(id.clone()),
                BanTarget::Move(id) => ban.moves.insert(id.clone()),
                BanTarget::Ability(id) => ban.abilities.insert(id.clone()),
                BanTarget::Item(id) => ban.items.insert(id.clone()),
                BanTarget::Tag(id) => ban.tags.insert(id.clone()),
                BanTarget::Unreleased => ban.tags.insert(Id::new("unreleased")),
                BanTarget::Illegal => ban.tags.insert(Id::new("illegal")),
            };
        }
        ban
    }

    pub fn len(&self) -> usize {
        self.species.len()
            + self.base_species.len()
            + self.moves.len()
            + self.abilities.len()
            + self.items.len()
            + self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count how many targets the given sets hit. With `per_occurrence` a target held by
    /// three sets counts three times; otherwise once.
    pub fn count_matches(&self, sets: &[SetFeatures], per_occurrence: bool) -> usize {
        let tally = |ids: &BTreeSet<Id>, has: fn(&SetFeatures, &Id) -> bool| -> usize {
            ids.iter()
                .map(|id| {
                    let hits = sets.iter().filter(|set| has(set, id)).count();
                    if per_occurrence {
                        hits
                    } else {
                        hits.min(1)
                    }
                })
                .sum()
        };
        tally(&self.species, |set, id| set.species == *id)
            + tally(&self.base_species, |set, id| set.base_species == *id)
            + tally(&self.moves, |set, id| set.moves.contains(id))
            + tally(&self.abilities, |set, id| set.ability == *id)
            + tally(&self.items, |set, id| set.item == *id)
            + tally(&self.tags, |set, id| set.tags.contains(id))
    }
}

/// A ban on a combination, e.g. `-Gengarite + Hypnosis` or `-Baton Pass ++ Shell Smash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexBan {
    /// Target names joined by `" + "` or `" ++ "`; identifies the ban when merging.
    pub rule: String,
    /// Format the ban was inherited from; empty when declared directly.
    pub source: String,
    pub limit: BanLimit,
    pub ban: Ban,
}

impl ComplexBan {
    pub fn new(rule: String, limit: BanLimit, targets: &[BanTarget]) -> Self {
        ComplexBan {
            rule,
            source: String::new(),
            limit,
            ban: Ban::from_targets(targets),
        }
    }

    /// Whether one set violates this ban. Returns the problem text.
    pub fn check_set(&self, set: &SetFeatures, pokemon: &str) -> Option<String> {
        let count = self.ban.count_matches(std::slice::from_ref(set), false);
        match self.limit {
            BanLimit::Allowed => None,
            BanLimit::Forbidden { limit: 0 } if count >= self.ban.len() => Some(format!(
                "{pokemon} has the combination of {}, which is banned{}.",
                self.rule,
                self.attribution()
            )),
            BanLimit::Forbidden { limit } if limit > 0 && count > limit as usize => Some(format!(
                "{pokemon} is limited to {limit} of {}{}.",
                self.rule,
                self.attribution()
            )),
            BanLimit::Forbidden { .. } => None,
        }
    }

    /// Whether a whole team violates this ban, counting occurrences when limited.
    pub fn check_team(&self, sets: &[SetFeatures]) -> Option<String> {
        let count = self.ban.count_matches(sets, self.limit.is_positive());
        match self.limit {
            BanLimit::Allowed => None,
            BanLimit::Forbidden { limit: 0 } if count >= self.ban.len() => Some(format!(
                "Your team has the combination of {}, which is banned{}.",
                self.rule,
                self.attribution()
            )),
            BanLimit::Forbidden { limit } if limit > 0 && count > limit as usize => Some(format!(
                "You are limited to {limit} of {}{}.",
                self.rule,
                self.attribution()
            )),
            BanLimit::Forbidden { .. } => None,
        }
    }

    fn attribution(&self) -> String {
        if self.source.is_empty() {
            String::new()
        } else {
            format!(" by {}", self.source)
        }
    }
}
