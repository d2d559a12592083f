//! Per-set legality: species, forme, level, gender, stats, nature, item, ability, moves
//! and Hidden Power, followed by complex bans and the format's legality hook.

use std::collections::{BTreeSet, HashSet};

use crate::data::abilities::Ability;
use crate::data::items::Item;
use crate::data::moves::Move;
use crate::data::species::Species;
use crate::data::stats::{self, Gender, MAX_EV, MAX_IV, MAX_TOTAL_EVS};
use crate::data::Dex;
use crate::id::{to_id, Id};
use crate::rules::{BanTarget, SetFeatures};
use crate::team::PokemonSet;
use crate::validate::boosts;
use crate::validate::{
    FormatContext, LegalityCheck, ALLOW_CAP, BATON_PASS_CLAUSE, EVASION_ABILITIES_CLAUSE,
    EVASION_MOVES_CLAUSE, LITTLE_CUP, MOODY_CLAUSE, OHKO_CLAUSE, SWAGGER_CLAUSE,
};

const GIRATINA: i32 = 487;
const MAX_MOVES: usize = 4;
const LITTLE_CUP_LEVEL: i32 = 5;
const HIDDEN_ABILITY_MIN_LEVEL: i32 = 10;
const GEN2_ONLY: &str = "Gen 2";

fn non_empty(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|raw| !raw.is_empty())
}

/// The forme a set battles as: its Mega Evolution when holding the matching stone.
pub(crate) fn effective_species<'d>(set: &PokemonSet, dex: &'d Dex) -> Option<&'d Species> {
    let species = dex.species(&set.species)?;
    let mega = non_empty(&set.item)
        .and_then(|item| dex.item(item))
        .and_then(|item| item.mega_stone.as_deref())
        .and_then(|mega| dex.species(mega))
        .filter(|mega| mega.base_species_name() == species.name);
    Some(mega.unwrap_or(species))
}

/// Normalized species, forme family, tags and loadout for complex-ban matching.
pub(crate) fn set_features(set: &PokemonSet, species: &Species, dex: &Dex) -> SetFeatures {
    let mut tags = BTreeSet::new();
    if !species.tier.is_empty() {
        tags.insert(Id::new(&species.tier));
    }
    if species.is_mega() {
        tags.insert(Id::new("mega"));
    }
    SetFeatures {
        species: species.id(),
        base_species: species.base_species_id(),
        tags,
        ability: dex
            .ability(&set.ability)
            .map_or_else(|| Id::new(&set.ability), Ability::id),
        item: dex.item(&set.item).map_or_else(|| Id::new(&set.item), Item::id),
        moves: set
            .moves
            .iter()
            .map(|raw| dex.move_(raw).map_or_else(|| Id::new(raw), Move::id))
            .collect(),
    }
}

/// "X", or "either X or Y" for several alternatives.
fn one_of(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("either {} or {last}", init.join(", ")),
    }
}

pub(crate) fn validate_set(
    set: &PokemonSet,
    ctx: &FormatContext<'_>,
    hook: Option<&dyn LegalityCheck>,
) -> Vec<String> {
    let gen = ctx.gen();
    let Some(species) = ctx.dex.species(&set.species) else {
        return vec![format!("{} is not a valid species for generation {gen}.", set.species.trim())];
    };
    let tier_species = effective_species(set, ctx.dex).unwrap_or(species);
    let name = set.display_name();
    let level = set.level.unwrap_or(ctx.format.max_level);
    let item = non_empty(&set.item).and_then(|item| ctx.dex.item(item));

    let mut problems = Vec::new();
    check_species(&mut problems, name, species, tier_species, ctx);
    check_forme(&mut problems, set, name, species);
    check_level(&mut problems, name, level, species, ctx);
    check_gender(&mut problems, set, name, species, gen);
    check_ivs(&mut problems, set, name, species, gen);
    check_evs(&mut problems, set, name, gen);
    check_nature(&mut problems, set, name, ctx);
    check_item(&mut problems, set, name, species, ctx);
    check_ability(&mut problems, set, name, species, level, ctx);
    let moves = check_moves(&mut problems, set, name, item, ctx);
    check_hidden_power(&mut problems, set, name, species, level, &moves, gen);

    let features = set_features(set, tier_species, ctx.dex);
    problems.extend(
        ctx.table
            .complex_bans()
            .iter()
            .filter_map(|ban| ban.check_set(&features, name)),
    );

    if let Some(hook) = hook {
        problems.extend(hook.check_set(set, species, ctx));
    }
    problems
}

fn check_species(
    problems: &mut Vec<String>,
    name: &str,
    species: &Species,
    tier_species: &Species,
    ctx: &FormatContext<'_>,
) {
    if species.is_nonstandard.is_some() && !(species.is_cap() && ctx.has(ALLOW_CAP)) {
        problems.push(format!("{} does not exist.", species.name));
    }

    let exact = BanTarget::Species(tier_species.id());
    let base = BanTarget::BaseSpecies(tier_species.base_species_id());
    let banned = ctx
        .table
        .check(&exact)
        .or_else(|| ctx.table.check(&BanTarget::Species(species.id())))
        .or_else(|| ctx.table.check(&base));
    if let Some(reason) = banned {
        problems.push(format!("{} is {reason}.", tier_species.name));
    } else if !ctx.has(&format!("+{exact}")) && !ctx.has(&format!("+{base}")) {
        let tier = Some(tier_species.tier.as_str())
            .filter(|tier| !tier.is_empty())
            .and_then(|tier| ctx.table.check(&BanTarget::Tag(Id::new(tier))));
        if let Some(reason) = tier {
            problems.push(format!(
                "{} is in {}, which is {reason}.",
                tier_species.name, tier_species.tier
            ));
        } else if tier_species.is_mega() {
            if let Some(reason) = ctx.table.check(&BanTarget::Tag(Id::new("mega"))) {
                problems.push(format!("{} is a Mega Evolution, which is {reason}.", tier_species.name));
            }
        }
    }

    match tier_species.tier_id().as_str() {
        "illegal" if ctx.has(&format!("-{}", BanTarget::Illegal)) => problems.push(format!(
            "{name} does not exist outside of generation {}.",
            tier_species.gen
        )),
        "unreleased" if ctx.has(&format!("-{}", BanTarget::Unreleased)) => problems.push(format!(
            "{name} is unreleased in generation {}.",
            ctx.gen()
        )),
        _ => {}
    }
}

fn check_forme(problems: &mut Vec<String>, set: &PokemonSet, name: &str, species: &Species) {
    if species.battle_only {
        let trigger = species
            .required_ability
            .clone()
            .or_else(|| (!species.required_items.is_empty()).then(|| one_of(&species.required_items)))
            .or_else(|| species.required_move.clone());
        problems.push(match trigger {
            Some(trigger) => format!("{} transforms in-battle with {trigger}.", species.name),
            None => format!("{} only exists in battle.", species.name),
        });
        return;
    }

    if let Some(ability) = &species.required_ability {
        if to_id(ability) != to_id(&set.ability) {
            problems.push(format!("{name} needs the ability {ability}."));
        }
    }
    if !species.required_items.is_empty() {
        let item = to_id(&set.item);
        if !species.required_items.iter().any(|required| to_id(required) == item) {
            problems.push(format!(
                "{name} needs to hold {}.",
                one_of(&species.required_items)
            ));
        }
    }
    if let Some(required) = &species.required_move {
        let required_id = to_id(required);
        if !set.moves.iter().any(|mv| to_id(mv) == required_id) {
            problems.push(format!("{name} needs to have the move {required}."));
        }
    }
}

fn check_level(problems: &mut Vec<String>, name: &str, level: i32, species: &Species, ctx: &FormatContext<'_>) {
    if level < 1 {
        problems.push(format!("{name} must be at least level 1."));
    }
    if ctx.has(LITTLE_CUP) || ctx.format.is_little_cup_tier() {
        if species.prevo.is_some() {
            problems.push(format!("{name} isn't the first in its evolution family."));
        } else if !species.nfe() {
            problems.push(format!("{name} doesn't have an evolution family."));
        }
        if level > LITTLE_CUP_LEVEL {
            problems.push(format!("{name} must be level 5 or under in Little Cup."));
        }
    } else if level > ctx.format.max_level {
        problems.push(format!("{name} is higher than level {}.", ctx.format.max_level));
    }
}

fn check_gender(problems: &mut Vec<String>, set: &PokemonSet, name: &str, species: &Species, gen: u8) {
    let Some(gender) = set.gender else {
        return;
    };
    if let Some(fixed) = species.gender {
        if gender != fixed {
            problems.push(format!(
                "{name} is the wrong gender for its species ({gender} vs. {fixed})."
            ));
        }
    } else if gen == 2 {
        // Gender is derived from the Atk DV: high means male.
        let expected = stats::gen2_gender(set.ivs.atk, species.female_ratio());
        if gender != expected {
            problems.push(format!(
                "{name} is {gender}, but it has an Atk DV of {}, which makes its gender {expected}.",
                stats::iv_to_dv(set.ivs.atk)
            ));
        }
    }
}

fn check_ivs(problems: &mut Vec<String>, set: &PokemonSet, name: &str, species: &Species, gen: u8) {
    for (stat, value) in set.ivs.iter() {
        if !(0..=MAX_IV).contains(&value) {
            problems.push(format!(
                "{name} has {value} {stat} IVs, which must be between 0 and {MAX_IV}."
            ));
        }
    }

    if gen >= 6 && species.is_legendary(set.shiny) {
        let perfect = set.ivs.iter().filter(|(_, value)| *value >= MAX_IV).count();
        if perfect < 3 {
            problems.push(format!(
                "{name} must have at least three perfect IVs because it's a legendary in generation {gen}."
            ));
        }
    }

    if gen >= 3 {
        return;
    }
    if set.ivs.spa != set.ivs.spd {
        problems.push(format!(
            "Before generation 3, SpA and SpD IVs must match ({name} has {} SpA and {} SpD IVs).",
            set.ivs.spa, set.ivs.spd
        ));
    }
    if gen == 2 {
        let dvs = stats::ivs_to_dvs(&set.ivs);
        let expected_hp = stats::expected_hp_dv(&set.ivs);
        if dvs.hp != expected_hp {
            problems.push(format!(
                "{name} has an HP DV of {}, but its Atk, Def, Spe and Spc DVs give it an HP DV of {expected_hp}.",
                dvs.hp
            ));
        }
        if stats::dvs_are_shiny(&set.ivs) != set.shiny {
            let is = if set.shiny { "is" } else { "is not" };
            problems.push(format!("{name} {is} shiny, which does not match its DVs."));
        }
    }
}

fn check_evs(problems: &mut Vec<String>, set: &PokemonSet, name: &str, gen: u8) {
    for (stat, value) in set.evs.iter() {
        if !(0..=MAX_EV).contains(&value) {
            problems.push(format!(
                "{name} has {value} {stat} EVs, which must be between 0 and {MAX_EV}."
            ));
        }
    }
    if gen >= 3 {
        if set.evs.total() > i64::from(MAX_TOTAL_EVS) {
            problems.push(format!("{name} has more than {MAX_TOTAL_EVS} total EVs."));
        }
    } else if set.evs.spa != set.evs.spd {
        problems.push(format!(
            "Before generation 3, SpA and SpD EVs must match ({name} has {} SpA and {} SpD EVs).",
            set.evs.spa, set.evs.spd
        ));
    }
}

fn check_nature(problems: &mut Vec<String>, set: &PokemonSet, name: &str, ctx: &FormatContext<'_>) {
    let gen = ctx.gen();
    match set.nature.as_deref().and_then(non_empty) {
        Some(raw) if gen < 3 => {
            let nature = ctx.dex.nature(raw).map_or(raw, |nature| nature.name.as_str());
            problems.push(format!(
                "Natures do not exist in generation {gen} ({name} has {nature})."
            ));
        }
        Some(raw) => {
            if ctx.dex.nature(raw).is_none() {
                problems.push(format!("{raw} is not a valid nature in generation {gen}."));
            }
        }
        None if gen >= 3 => {
            problems.push(format!("{name} requires a nature in generation {gen}."));
        }
        None => {}
    }
}

fn check_item(problems: &mut Vec<String>, set: &PokemonSet, name: &str, species: &Species, ctx: &FormatContext<'_>) {
    let gen = ctx.gen();
    let Some(raw) = non_empty(&set.item) else {
        return;
    };
    if gen < 2 {
        problems.push(format!(
            "Held items do not exist in generation {gen} ({name} has item {raw})."
        ));
        return;
    }
    let Some(item) = ctx.dex.item(raw) else {
        problems.push(format!("{raw} is not a valid item for generation {gen}."));
        return;
    };

    match item.is_nonstandard.as_deref() {
        Some(GEN2_ONLY) if gen != 2 => {
            problems.push(format!("{} does not exist outside of generation 2.", item.name));
        }
        Some(GEN2_ONLY) | None => {}
        Some(_) if !ctx.has(ALLOW_CAP) => problems.push(format!("{} does not exist.", item.name)),
        Some(_) => {}
    }

    let id = item.id();
    if let Some(reason) = ctx.table.check(&BanTarget::Item(id.clone())) {
        problems.push(format!("{name}'s item {} is {reason}.", item.name));
    }
    if gen == 4 && id.as_str() == "griseousorb" && species.num != GIRATINA {
        problems.push("Griseous Orb can only be held by Giratina in generation 4.".to_string());
    }
}

fn check_ability(
    problems: &mut Vec<String>,
    set: &PokemonSet,
    name: &str,
    species: &Species,
    level: i32,
    ctx: &FormatContext<'_>,
) {
    let gen = ctx.gen();
    let raw = non_empty(&set.ability);
    if gen < 3 {
        if let Some(raw) = raw {
            problems.push(format!(
                "Abilities do not exist in generation {gen} ({name} has ability {raw})."
            ));
        }
        return;
    }
    let Some(raw) = raw else {
        problems.push(format!("{name} needs to have an ability."));
        return;
    };
    let Some(ability) = ctx.dex.ability(raw) else {
        problems.push(format!("{raw} is not a valid ability for generation {gen}."));
        return;
    };
    if ability.is_nonstandard.is_some() && !ctx.has(ALLOW_CAP) {
        problems.push(format!("{} does not exist.", ability.name));
    }

    let id = ability.id();
    if let Some(reason) = ctx.table.check(&BanTarget::Ability(id.clone())) {
        problems.push(format!("{name}'s ability {} is {reason}.", ability.name));
    }
    if !species.has_ability(&ability.name) {
        problems.push(format!("{name} can't have {}.", ability.name));
    }
    if id.as_str() == "battlebond"
        && species.base_species_name() == "Greninja"
        && set.gender.is_some_and(|gender| gender != Gender::Male)
    {
        problems.push("Battle Bond Greninja must be male.".to_string());
    }

    if species.is_hidden_ability(&ability.name) {
        let unreleased = ctx.has(&format!("-{}", BanTarget::Unreleased));
        let orange_or_white = matches!(species.forme.as_deref(), Some("Orange" | "White"));
        if unreleased && species.unreleased_hidden {
            problems.push(format!("{name}'s Hidden Ability is unreleased."));
        } else if unreleased && id.as_str() == "symbiosis" && orange_or_white {
            problems.push(format!(
                "{name}'s Hidden Ability is unreleased for the Orange and White forms."
            ));
        } else if gen == 5
            && level < HIDDEN_ABILITY_MIN_LEVEL
            && (species.male_only_hidden || species.gender == Some(Gender::Genderless))
        {
            problems.push(format!(
                "{name} must be at least level {HIDDEN_ABILITY_MIN_LEVEL} with its Hidden Ability."
            ));
        }
    }

    match id.as_str() {
        "sandveil" | "snowcloak" if ctx.has(EVASION_ABILITIES_CLAUSE) => problems.push(format!(
            "{} is banned by Evasion Abilities Clause.",
            ability.name
        )),
        "moody" if ctx.has(MOODY_CLAUSE) => {
            problems.push(format!("{} is banned by Moody Clause.", ability.name))
        }
        _ => {}
    }
}

/// Move checks; returns the moves that resolved, deduplicated, in set order.
fn check_moves<'d>(
    problems: &mut Vec<String>,
    set: &PokemonSet,
    name: &str,
    item: Option<&Item>,
    ctx: &FormatContext<'d>,
) -> Vec<&'d Move> {
    let gen = ctx.gen();
    if set.moves.is_empty() {
        problems.push(format!("{name} must have at least one move."));
    } else if set.moves.len() > MAX_MOVES {
        problems.push(format!("{name} has more than four moves."));
    }

    let mut seen = HashSet::new();
    let mut moves = Vec::new();
    for raw in &set.moves {
        let Some(mv) = ctx.dex.move_(raw) else {
            problems.push(format!("{} is not a valid move for generation {gen}.", raw.trim()));
            continue;
        };
        if mv.is_nonstandard.is_some() && !ctx.has(ALLOW_CAP) {
            problems.push(format!("{} does not exist.", mv.name));
            continue;
        }
        let id = mv.id();
        if !seen.insert(id.clone()) {
            problems.push(format!(
                "{name} may not have duplicate moves ({} is duplicated).",
                mv.name
            ));
            continue;
        }
        moves.push(mv);

        if let Some(reason) = ctx.table.check(&BanTarget::Move(id.clone())) {
            problems.push(format!("{name}'s move {} is {reason}.", mv.name));
            continue;
        }
        if mv.ohko && ctx.has(OHKO_CLAUSE) {
            problems.push(format!("{} is banned by OHKO Clause.", mv.name));
            continue;
        }
        match id.as_str() {
            "minimize" | "doubleteam" if ctx.has(EVASION_MOVES_CLAUSE) => {
                problems.push(format!("{} is banned by Evasion Moves Clause.", mv.name));
            }
            "swagger" if ctx.has(SWAGGER_CLAUSE) => {
                problems.push(format!("{} is banned by Swagger Clause.", mv.name));
            }
            _ => {}
        }
    }

    if gen == 2 && boosts::has_sleep_trap(&moves) {
        problems.push(format!(
            "{name} has both a sleeping and a trapping move, a combination which is banned in generation {gen}."
        ));
    }
    let baton_pass = moves.iter().any(|mv| mv.id().as_str() == "batonpass");
    if baton_pass
        && ctx.has(BATON_PASS_CLAUSE)
        && boosts::passes_speed_and_other_boost(&set.ability, item, &moves)
    {
        problems.push(format!(
            "{name} can Baton Pass both Speed and a different stat, which is banned by Baton Pass Clause."
        ));
    }
    moves
}

fn check_hidden_power(
    problems: &mut Vec<String>,
    set: &PokemonSet,
    name: &str,
    species: &Species,
    level: i32,
    moves: &[&Move],
    gen: u8,
) {
    let Some(hidden_power) = moves
        .iter()
        .find(|mv| mv.id().as_str().starts_with("hiddenpower"))
    else {
        return;
    };
    let declared = set.hp_type.as_deref().and_then(non_empty);
    let hp_type = match (hidden_power.hidden_power_type(), declared) {
        (Some(ty), Some(declared)) if to_id(ty) != to_id(declared) => {
            problems.push(format!(
                "{name}'s Hidden Power type ({declared}) doesn't match its move ({}).",
                hidden_power.name
            ));
            ty
        }
        (Some(ty), _) => ty,
        (None, Some(declared)) => declared,
        (None, None) => return,
    };

    // Hyper Training makes IVs irrelevant at level 100 from generation 7.
    if !(gen >= 7 && level == 100) {
        let from_ivs = stats::hidden_power_type(&set.ivs, gen);
        if to_id(from_ivs) != to_id(hp_type) {
            problems.push(format!(
                "{name} has Hidden Power {hp_type}, but its IVs are for Hidden Power {from_ivs}."
            ));
        }
    }
    if gen >= 6 && species.is_legendary(set.shiny) && to_id(hp_type) == "fighting" {
        problems.push(format!(
            "{name} can't use Hidden Power Fighting because it must have at least three perfect IVs."
        ));
    }
}
