mod common;

use serde_json::json;

use common::{count, set, validator};

const BATON_PASS_CLAUSE_PROBLEM: &str =
    "can Baton Pass both Speed and a different stat, which is banned by Baton Pass Clause";

fn porygon_z(ability: &str) -> serde_json::Value {
    json!({
        "species": "Porygon-Z",
        "ability": ability,
        "item": "Salac Berry",
        "nature": "Timid",
        "moves": ["Baton Pass", "Substitute", "Thunderbolt", "Ice Beam"],
        "evs": {"hp": 4, "spa": 252, "spe": 252}
    })
}

#[test]
fn baton_pass_with_only_a_speed_boost_is_allowed() {
    let problems = validator()
        .validate_set(&set(porygon_z("Adaptability")), "gen7ou")
        .expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn baton_pass_with_speed_and_another_boost_is_rejected() {
    let problems = validator()
        .validate_set(&set(porygon_z("Download")), "gen7ou")
        .expect("validate");
    assert_eq!(
        problems,
        vec![format!("Porygon-Z {BATON_PASS_CLAUSE_PROBLEM}.")]
    );
}

#[test]
fn baton_pass_clause_only_applies_where_the_format_has_it() {
    let problems = validator()
        .validate_set(&set(porygon_z("Download")), "gen7ou@@@!Baton Pass Clause")
        .expect("validate");
    assert_eq!(count(&problems, BATON_PASS_CLAUSE_PROBLEM), 0, "{problems:?}");
}

#[test]
fn ev_total_is_capped_from_generation_3() {
    let validator = validator();
    let pikachu = set(json!({
        "species": "Pikachu",
        "ability": "Static",
        "nature": "Timid",
        "moves": ["Thunderbolt"],
        "evs": {"hp": 252, "atk": 252, "spe": 252}
    }));
    let problems = validator.validate_set(&pikachu, "gen7ou").expect("validate");
    assert_eq!(problems, vec!["Pikachu has more than 510 total EVs."]);

    let gen1 = set(json!({
        "species": "Pikachu",
        "moves": ["Thunderbolt"],
        "evs": {"hp": 252, "atk": 252, "spe": 252}
    }));
    let problems = validator.validate_set(&gen1, "gen1ou").expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn stat_values_out_of_range_are_reported() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Garchomp",
                "ability": "Rough Skin",
                "nature": "Jolly",
                "moves": ["Earthquake"],
                "ivs": {"spe": 40},
                "evs": {"atk": 300}
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Garchomp has 40 Spe IVs, which must be between 0 and 31.",
            "Garchomp has 300 Atk EVs, which must be between 0 and 255.",
        ]
    );
}

#[test]
fn gen2_gender_follows_the_attack_dv() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Snorlax",
                "gender": "F",
                "moves": ["Body Slam", "Rest", "Curse", "Earthquake"]
            })),
            "gen2ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Snorlax is F, but it has an Atk DV of 15, which makes its gender M."]
    );
}

#[test]
fn gen2_hp_dv_must_match_the_other_dvs() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Snorlax",
                "moves": ["Body Slam", "Rest"],
                "ivs": {"atk": 28}
            })),
            "gen2ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Snorlax has an HP DV of 15, but its Atk, Def, Spe and Spc DVs give it an HP DV of 7."]
    );
}

#[test]
fn gen2_bans_sleep_plus_trap() {
    let problems = validator()
        .validate_set(
            &set(json!({"species": "Gengar", "moves": ["Hypnosis", "Mean Look", "Shadow Ball"]})),
            "gen2ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Gengar has both a sleeping and a trapping move, a combination which is banned in generation 2."]
    );
}

#[test]
fn natures_abilities_and_items_depend_on_generation() {
    let validator = validator();
    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Snorlax",
                "nature": "Adamant",
                "ability": "Thick Fat",
                "moves": ["Body Slam"]
            })),
            "gen2ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Natures do not exist in generation 2 (Snorlax has Adamant).",
            "Abilities do not exist in generation 2 (Snorlax has ability Thick Fat).",
        ]
    );

    let problems = validator
        .validate_set(
            &set(json!({"species": "Starmie", "item": "Leftovers", "moves": ["Surf"]})),
            "gen1ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Held items do not exist in generation 1 (Starmie has item Leftovers)."]
    );

    let problems = validator
        .validate_set(
            &set(json!({"species": "Garchomp", "moves": ["Earthquake"]})),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Garchomp requires a nature in generation 7.",
            "Garchomp needs to have an ability.",
        ]
    );
}

#[test]
fn gen2_only_items_are_rejected_elsewhere() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Snorlax",
                "ability": "Thick Fat",
                "nature": "Adamant",
                "item": "Berserk Gene",
                "moves": ["Body Slam"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Berserk Gene does not exist outside of generation 2."]);
}

#[test]
fn moves_outside_the_learnset_are_rejected() {
    let validator = validator();
    let pikachu = |moves: serde_json::Value| {
        set(json!({"species": "Pikachu", "ability": "Static", "nature": "Timid", "moves": moves}))
    };

    let problems = validator
        .validate_set(&pikachu(json!(["Volt Tackle", "Thunderbolt", "Hidden Power Ice"])), "gen7ou")
        .expect("validate");
    assert!(problems.is_empty(), "{problems:?}");

    let problems = validator
        .validate_set(&pikachu(json!(["Thunderbolt", "Swords Dance"])), "gen7ou")
        .expect("validate");
    assert_eq!(problems, vec!["Pikachu can't learn Swords Dance."]);

    // Anything Goes has no learnset hook.
    let problems = validator
        .validate_set(&pikachu(json!(["Thunderbolt", "Swords Dance"])), "gen7anythinggoes")
        .expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn move_list_shape_is_checked() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Garchomp",
                "ability": "Rough Skin",
                "nature": "Jolly",
                "moves": ["Earthquake", "earthquake", "Outrage", "Swords Dance", "Stealth Rock", "Teleport"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Garchomp has more than four moves.",
            "Garchomp may not have duplicate moves (Earthquake is duplicated).",
            "Teleport is not a valid move for generation 7.",
        ]
    );

    let problems = validator()
        .validate_set(
            &set(json!({"species": "Garchomp", "ability": "Rough Skin", "nature": "Jolly"})),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Garchomp must have at least one move."]);
}

#[test]
fn mega_stone_puts_the_set_in_the_mega_tier() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Gengar",
                "ability": "Cursed Body",
                "item": "Gengarite",
                "nature": "Timid",
                "moves": ["Shadow Ball", "Sludge Bomb"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Gengar-Mega is in Uber, which is banned."]);
}

#[test]
fn sleep_clause_mod_bans_hypnosis_mega_gengar() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Gengar",
                "ability": "Cursed Body",
                "item": "Gengarite",
                "nature": "Timid",
                "moves": ["Hypnosis", "Shadow Ball", "Sludge Bomb"]
            })),
            "gen7ubers",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Gengar has the combination of Hypnosis + Gengarite, which is banned by Sleep Clause Mod."]
    );
}

#[test]
fn complex_ban_declared_by_the_format() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Smeargle",
                "ability": "Own Tempo",
                "nature": "Jolly",
                "moves": ["Ingrain", "Spore"]
            })),
            "gen3ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Smeargle has the combination of Smeargle + Ingrain, which is banned."]
    );
}

#[test]
fn battle_only_formes_are_rejected() {
    let validator = validator();
    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Gengar-Mega",
                "ability": "Shadow Tag",
                "nature": "Timid",
                "moves": ["Shadow Ball"]
            })),
            "gen7ubers",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Gengar-Mega transforms in-battle with Gengarite."]);

    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Greninja-Ash",
                "ability": "Battle Bond",
                "nature": "Timid",
                "moves": ["Water Shuriken"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(count(&problems, "Greninja-Ash transforms in-battle with Battle Bond."), 1);
}

#[test]
fn battle_bond_greninja_must_be_male() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Greninja",
                "ability": "Battle Bond",
                "gender": "F",
                "nature": "Timid",
                "moves": ["Water Shuriken", "Dark Pulse"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Battle Bond Greninja must be male."]);
}

#[test]
fn griseous_orb_rules_in_generation_4() {
    let validator = validator();
    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Giratina-Origin",
                "ability": "Levitate",
                "nature": "Adamant",
                "moves": ["Shadow Ball", "Outrage"]
            })),
            "gen4ubers",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Giratina-Origin needs to hold Griseous Orb."]);

    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Mewtwo",
                "ability": "Pressure",
                "item": "Griseous Orb",
                "nature": "Timid",
                "moves": ["Psychic"]
            })),
            "gen4ubers",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Griseous Orb can only be held by Giratina in generation 4."]);
}

#[test]
fn legendaries_need_three_perfect_ivs_from_generation_6() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Mewtwo",
                "ability": "Pressure",
                "nature": "Timid",
                "level": 100,
                "moves": ["Psychic", "Hidden Power Fighting"],
                "ivs": {"hp": 30, "atk": 30, "def": 30, "spa": 30, "spd": 31, "spe": 31}
            })),
            "gen7ubers",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Mewtwo must have at least three perfect IVs because it's a legendary in generation 7.",
            "Mewtwo can't use Hidden Power Fighting because it must have at least three perfect IVs.",
        ]
    );
}

#[test]
fn hidden_power_type_must_match_ivs_below_level_100() {
    let validator = validator();
    let pikachu = |level: i32| {
        set(json!({
            "species": "Pikachu",
            "ability": "Static",
            "nature": "Timid",
            "level": level,
            "moves": ["Thunderbolt", "Hidden Power Ice"]
        }))
    };
    let problems = validator.validate_set(&pikachu(50), "gen7ou").expect("validate");
    assert_eq!(
        problems,
        vec!["Pikachu has Hidden Power Ice, but its IVs are for Hidden Power Dark."]
    );

    let problems = validator.validate_set(&pikachu(100), "gen7ou").expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn declared_hidden_power_type_must_match_the_move() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Garchomp",
                "ability": "Rough Skin",
                "nature": "Jolly",
                "moves": ["Earthquake", "Hidden Power Fire"],
                "hp_type": "Ice",
                "ivs": {"atk": 30, "spa": 30, "spe": 30}
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Garchomp's Hidden Power type (Ice) doesn't match its move (Hidden Power Fire)."]
    );
}

#[test]
fn clause_bans_report_the_clause() {
    let validator = validator();
    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Garchomp",
                "ability": "Rough Skin",
                "nature": "Jolly",
                "moves": ["Earthquake", "Fissure", "Double Team"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Fissure is banned by OHKO Clause.",
            "Double Team is banned by Evasion Moves Clause.",
        ]
    );

    let problems = validator
        .validate_set(
            &set(json!({"species": "Glalie", "ability": "Moody", "nature": "Jolly", "moves": ["Protect"]})),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Moody is banned by Moody Clause."]);

    let sand_veil = set(json!({
        "species": "Garchomp",
        "ability": "Sand Veil",
        "nature": "Jolly",
        "moves": ["Earthquake"]
    }));
    let problems = validator.validate_set(&sand_veil, "gen5ou").expect("validate");
    assert_eq!(problems, vec!["Sand Veil is banned by Evasion Abilities Clause."]);
    let problems = validator.validate_set(&sand_veil, "gen7ou").expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn banned_ability_item_and_move_name_the_source() {
    let validator = validator();
    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Politoed",
                "ability": "Drizzle",
                "nature": "Bold",
                "moves": ["Scald"]
            })),
            "gen7uu",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Politoed's ability Drizzle is banned."]);

    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Jolteon",
                "ability": "Volt Absorb",
                "nature": "Timid",
                "moves": ["Thunderbolt", "Baton Pass"]
            })),
            "gen6ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Jolteon's move Baton Pass is banned."]);

    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Mewtwo",
                "ability": "Pressure",
                "item": "Soul Dew",
                "nature": "Timid",
                "moves": ["Psychic"]
            })),
            "gen6ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Mewtwo is in Uber, which is banned.",
            "Mewtwo's item Soul Dew is banned.",
        ]
    );
}

#[test]
fn inherited_tier_ban_names_the_parent_format() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Mewtwo",
                "ability": "Pressure",
                "nature": "Timid",
                "moves": ["Psychic"]
            })),
            "gen7uu",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Mewtwo is in Uber, which is banned by [Gen 7] OU."]);
}

#[test]
fn species_existence_tiers() {
    let validator = validator();
    let problems = validator
        .validate_set(
            &set(json!({"species": "Zeraora", "ability": "Volt Absorb", "nature": "Jolly", "moves": ["Knock Off"]})),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Zeraora is unreleased in generation 7."]);

    let problems = validator
        .validate_set(
            &set(json!({
                "species": "Pikachu-Cosplay",
                "ability": "Lightning Rod",
                "nature": "Timid",
                "moves": ["Thunderbolt"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Pikachu-Cosplay does not exist outside of generation 6."]);

    let problems = validator
        .validate_set(&set(json!({"species": "Missingno", "moves": ["Surf"]})), "gen7ou")
        .expect("validate");
    assert_eq!(problems, vec!["Missingno is not a valid species for generation 7."]);

    let problems = validator
        .validate_set(
            &set(json!({"species": "Garchomp", "ability": "Rough Skin", "nature": "Jolly", "moves": ["Earthquake"]})),
            "gen3ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Garchomp is not a valid species for generation 3."]);
}

#[test]
fn cap_needs_allow_cap() {
    let validator = validator();
    let syclant = set(json!({
        "species": "Syclant",
        "ability": "Mountaineer",
        "nature": "Jolly",
        "moves": ["Ice Beam", "U-turn"]
    }));
    let problems = validator.validate_set(&syclant, "gen6ou").expect("validate");
    assert_eq!(
        problems,
        vec!["Syclant does not exist.", "Mountaineer does not exist."]
    );

    let problems = validator.validate_set(&syclant, "gen6cap").expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn little_cup_restricts_level_and_evolution_stage() {
    let validator = validator();
    let vulpix = |level: i32| {
        set(json!({
            "species": "Vulpix-Alola",
            "ability": "Snow Warning",
            "nature": "Timid",
            "level": level,
            "moves": ["Blizzard", "Aurora Veil"]
        }))
    };
    let problems = validator.validate_set(&vulpix(5), "gen7lc").expect("validate");
    assert!(problems.is_empty(), "{problems:?}");

    let problems = validator.validate_set(&vulpix(6), "gen7lc").expect("validate");
    assert_eq!(problems, vec!["Vulpix-Alola must be level 5 or under in Little Cup."]);

    let problems = validator
        .validate_set(
            &set(json!({"species": "Vulpix", "ability": "Flash Fire", "nature": "Timid", "level": 5, "moves": ["Will-O-Wisp"]})),
            "gen7lc",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Vulpix is banned."]);

    let problems = validator
        .validate_set(
            &set(json!({"species": "Pikachu", "ability": "Static", "nature": "Timid", "level": 5, "moves": ["Thunderbolt"]})),
            "gen7lc",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Pikachu isn't the first in its evolution family."]);

    let problems = validator
        .validate_set(
            &set(json!({"species": "Smeargle", "ability": "Own Tempo", "nature": "Jolly", "level": 5, "moves": ["Spore"]})),
            "gen7lc",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Smeargle doesn't have an evolution family."]);
}

#[test]
fn gen5_hidden_abilities_on_genderless_species_need_level_10() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Porygon-Z",
                "ability": "Analytic",
                "nature": "Modest",
                "level": 5,
                "moves": ["Thunderbolt"]
            })),
            "gen5ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Porygon-Z must be at least level 10 with its Hidden Ability."]);
}

#[test]
fn hidden_ability_unreleased_for_florges_colors() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Florges-Orange",
                "ability": "Symbiosis",
                "nature": "Calm",
                "moves": ["Protect"]
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec!["Florges-Orange's Hidden Ability is unreleased for the Orange and White forms."]
    );
}

#[test]
fn custom_rules_in_the_format_name() {
    let validator = validator();
    let pikachu = set(json!({"species": "Pikachu", "ability": "Static", "nature": "Timid", "moves": ["Thunderbolt"]}));
    let problems = validator.validate_set(&pikachu, "gen7ou@@@-Pikachu").expect("validate");
    assert_eq!(problems, vec!["Pikachu is banned."]);

    let problems = validator.validate_set(&pikachu, "gen7ou@@@-Missingno").expect("validate");
    assert_eq!(problems, vec![r#"Nothing matches "Missingno""#]);

    let problems = validator.validate_set(&pikachu, "gen9ou").expect("validate");
    assert_eq!(problems, vec!["gen9ou is not a valid format."]);
}

#[test]
fn huge_ev_values_are_reported_not_summed_into_overflow() {
    let problems = validator()
        .validate_set(
            &set(json!({
                "species": "Pikachu",
                "ability": "Static",
                "nature": "Timid",
                "moves": ["Thunderbolt"],
                "evs": {"hp": 2147483647, "atk": 1}
            })),
            "gen7ou",
        )
        .expect("validate");
    assert_eq!(
        problems,
        vec![
            "Pikachu has 2147483647 HP EVs, which must be between 0 and 255.",
            "Pikachu has more than 510 total EVs.",
        ]
    );
}

#[test]
fn level_must_be_between_1_and_the_format_cap() {
    let validator = validator();
    let garchomp = |level: i32| {
        set(json!({
            "species": "Garchomp",
            "ability": "Rough Skin",
            "nature": "Jolly",
            "moves": ["Earthquake"],
            "level": level
        }))
    };

    let problems = validator.validate_set(&garchomp(101), "gen7ou").expect("validate");
    assert_eq!(problems, vec!["Garchomp is higher than level 100."]);

    let problems = validator.validate_set(&garchomp(0), "gen7ou").expect("validate");
    assert_eq!(problems, vec!["Garchomp must be at least level 1."]);

    let problems = validator.validate_set(&garchomp(50), "gen7ou").expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn gen2_shininess_must_match_the_dvs() {
    let validator = validator();
    let problems = validator
        .validate_set(
            &set(json!({"species": "Snorlax", "shiny": true, "moves": ["Body Slam", "Rest"]})),
            "gen2ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Snorlax is shiny, which does not match its DVs."]);

    // 15 Atk and 10 Def/Spe/Special DVs are a shiny spread.
    let shiny_dvs = json!({"hp": 17, "atk": 31, "def": 21, "spa": 21, "spd": 21, "spe": 21});
    let problems = validator
        .validate_set(
            &set(json!({"species": "Snorlax", "moves": ["Body Slam", "Rest"], "ivs": shiny_dvs})),
            "gen2ou",
        )
        .expect("validate");
    assert_eq!(problems, vec!["Snorlax is not shiny, which does not match its DVs."]);

    let problems = validator
        .validate_set(
            &set(json!({"species": "Snorlax", "shiny": true, "moves": ["Body Slam", "Rest"], "ivs": shiny_dvs})),
            "gen2ou",
        )
        .expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn swagger_clause_bans_swagger() {
    let validator = validator();
    let swagger = set(json!({
        "species": "Garchomp",
        "ability": "Rough Skin",
        "nature": "Jolly",
        "moves": ["Earthquake", "Swagger"]
    }));
    let problems = validator.validate_set(&swagger, "gen6ou").expect("validate");
    assert_eq!(problems, vec!["Swagger is banned by Swagger Clause."]);

    let problems = validator.validate_set(&swagger, "gen7ou").expect("validate");
    assert!(problems.is_empty(), "{problems:?}");
}
