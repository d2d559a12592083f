//! Stat tables, gender and the generation 1–2 DV arithmetic the validators rely on.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_IV: i32 = 31;
pub const MAX_EV: i32 = 255;
pub const MAX_TOTAL_EVS: i32 = 510;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Atk => "Atk",
            Self::Def => "Def",
            Self::Spa => "SpA",
            Self::Spd => "SpD",
            Self::Spe => "Spe",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-stat values as supplied by the user. Signed so out-of-range input survives
/// deserialization and can be reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsTable {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spa: i32,
    pub spd: i32,
    pub spe: i32,
}

impl StatsTable {
    pub fn uniform(value: i32) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    /// All IVs at 31, the default for a set that omits them.
    pub fn perfect_ivs() -> Self {
        Self::uniform(MAX_IV)
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }

    /// Sum of all six values, widened so out-of-range input can't overflow.
    pub fn total(&self) -> i64 {
        self.iter().map(|(_, value)| i64::from(value)).sum()
    }
}

/// Stat-stage changes a move applies, either directly or as its Z-Move bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boosts {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl Boosts {
    pub fn raises_speed(&self) -> bool {
        self.spe > 0
    }

    /// Raises Atk, Def, SpA or SpD.
    pub fn raises_other_stat(&self) -> bool {
        self.atk > 0 || self.def > 0 || self.spa > 0 || self.spd > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "N")]
    Genderless,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Genderless => "N",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a modern 0–31 IV to the 0–15 DV used by generations 1 and 2.
pub fn iv_to_dv(iv: i32) -> i32 {
    iv.clamp(0, MAX_IV) / 2
}

/// DVs for every stat; special (SpA) stands in for both special stats.
pub fn ivs_to_dvs(ivs: &StatsTable) -> StatsTable {
    StatsTable {
        hp: iv_to_dv(ivs.hp),
        atk: iv_to_dv(ivs.atk),
        def: iv_to_dv(ivs.def),
        spa: iv_to_dv(ivs.spa),
        spd: iv_to_dv(ivs.spa),
        spe: iv_to_dv(ivs.spe),
    }
}

/// The HP DV implied by the low bits of the Atk, Def, Spe and Special DVs.
pub fn expected_hp_dv(ivs: &StatsTable) -> i32 {
    let dvs = ivs_to_dvs(ivs);
    (dvs.atk % 2) * 8 + (dvs.def % 2) * 4 + (dvs.spe % 2) * 2 + (dvs.spa % 2)
}

/// Generation 2 shininess is fixed by the DVs: 10 Def/Spe/Special and Atk in {2,3,6,7,10,11,14,15}.
pub fn dvs_are_shiny(ivs: &StatsTable) -> bool {
    let dvs = ivs_to_dvs(ivs);
    dvs.def == 10 && dvs.spe == 10 && dvs.spa == 10 && dvs.atk % 4 >= 2
}

/// Generation 2 gender from the Atk DV. `female_ratio` is the species' female share (0–1).
pub fn gen2_gender(atk_iv: i32, female_ratio: f64) -> Gender {
    let mut threshold = (female_ratio * 16.0).round() as i32;
    if threshold == 4 {
        threshold = 5;
    }
    if threshold == 8 {
        threshold = 7;
    }
    if iv_to_dv(atk_iv) >= threshold {
        Gender::Male
    } else {
        Gender::Female
    }
}

pub const HIDDEN_POWER_TYPES: [&str; 16] = [
    "Fighting", "Flying", "Poison", "Ground", "Rock", "Bug", "Ghost", "Steel", "Fire", "Water",
    "Grass", "Electric", "Psychic", "Ice", "Dragon", "Dark",
];

/// The Hidden Power type a spread of IVs produces in the given generation.
pub fn hidden_power_type(ivs: &StatsTable, gen: u8) -> &'static str {
    if gen <= 2 {
        let atk = iv_to_dv(ivs.atk);
        let def = iv_to_dv(ivs.def);
        return HIDDEN_POWER_TYPES[(4 * (atk % 4) + (def % 4)) as usize];
    }
    let bit = |value: i32| value.rem_euclid(2);
    let sum = bit(ivs.hp)
        + 2 * bit(ivs.atk)
        + 4 * bit(ivs.def)
        + 8 * bit(ivs.spe)
        + 16 * bit(ivs.spa)
        + 32 * bit(ivs.spd);
    HIDDEN_POWER_TYPES[(sum * 15 / 63) as usize]
}
