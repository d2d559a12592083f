//! Team-wide checks layered over the per-set ones.

use std::collections::HashSet;

use crate::format::CUSTOM_RULES_SEPARATOR;
use crate::id::to_id;
use crate::team::{Team, MAX_TEAM_SIZE};
use crate::validate::set::{effective_species, set_features};
use crate::validate::{PreparedFormat, BATON_PASS_CLAUSE, NICKNAME_CLAUSE, SPECIES_CLAUSE};

/// Formes limited to one per team, and how the problem names them.
const UNIQUE_FORMES: &[(&[&str], &str)] = &[
    (&["Kyurem-Black", "Kyurem-White"], "Kyurem-Black/Kyurem-White"),
    (&["Necrozma-Dusk-Mane"], "Necrozma-Dusk-Mane"),
    (&["Necrozma-Dawn-Wings"], "Necrozma-Dawn-Wings"),
];

/// Weather setters and the abilities they power up, banned together in Gen 5 OU.
const GEN5_WEATHER_PAIRS: &[(&str, &str, &str, &str)] = &[
    ("drizzle", "swiftswim", "Drizzle", "Swift Swim"),
    ("drought", "chlorophyll", "Drought", "Chlorophyll"),
];

pub(crate) fn validate_team(team: &Team, prepared: &PreparedFormat) -> Vec<String> {
    let ctx = prepared.context();
    let mut problems = Vec::new();
    if team.sets.len() > MAX_TEAM_SIZE {
        problems.push("Your team has more than six Pokémon.".to_string());
    }

    let mut nicknames = HashSet::new();
    let mut species_nums = HashSet::new();
    let mut abilities = HashSet::new();
    let mut forme_counts = vec![0usize; UNIQUE_FORMES.len()];
    let mut baton_passers = 0;
    let mut features = Vec::with_capacity(team.sets.len());

    for set in &team.sets {
        problems.extend(prepared.check_set(set));
        let Some(species) = ctx.dex.species(&set.species) else {
            continue;
        };

        if ctx.has(NICKNAME_CLAUSE) {
            let nickname = set.name.as_deref().map(str::trim).filter(|name| !name.is_empty());
            if let Some(nickname) = nickname {
                if nickname != species.base_species_name() && !nicknames.insert(nickname) {
                    problems.push(format!(
                        "Your Pokémon must have different nicknames (you have more than one {nickname})."
                    ));
                }
            }
        }
        if ctx.has(SPECIES_CLAUSE) && !species_nums.insert(species.num) {
            problems.push(format!(
                "You are limited to one of each Pokémon by Species Clause (you have more than one {}).",
                species.base_species_name()
            ));
        }

        for ((formes, _), count) in UNIQUE_FORMES.iter().zip(forme_counts.iter_mut()) {
            if formes.contains(&species.name.as_str()) {
                *count += 1;
            }
        }
        abilities.insert(to_id(&set.ability));
        let passes = set
            .moves
            .iter()
            .filter_map(|mv| ctx.dex.move_(mv))
            .any(|mv| mv.id().as_str() == "batonpass");
        if passes {
            baton_passers += 1;
        }

        let battling = effective_species(set, ctx.dex).unwrap_or(species);
        features.push(set_features(set, battling, ctx.dex));
    }

    for ((_, label), count) in UNIQUE_FORMES.iter().zip(&forme_counts) {
        if *count > 1 {
            problems.push(format!("You cannot have more than one {label}."));
        }
    }
    if ctx.has(BATON_PASS_CLAUSE) && baton_passers > 1 {
        problems.push(format!(
            "Your team has {baton_passers} Pokémon with Baton Pass despite Baton Pass Clause's limit of 1."
        ));
    }

    let base_id = ctx
        .format
        .id
        .split(CUSTOM_RULES_SEPARATOR)
        .next()
        .unwrap_or_default();
    if base_id == "gen5ou" {
        for (setter, abuser, setter_name, abuser_name) in GEN5_WEATHER_PAIRS {
            if abilities.contains(*setter) && abilities.contains(*abuser) {
                problems.push(format!(
                    "{setter_name} and {abuser_name} may not be used on the same team."
                ));
            }
        }
    }

    problems.extend(
        ctx.table
            .complex_team_bans()
            .iter()
            .filter_map(|ban| ban.check_team(&features)),
    );
    problems
}
