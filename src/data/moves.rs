use serde::{Deserialize, Serialize};

use crate::data::species::default_gen;
use crate::data::stats::Boosts;
use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(default)]
    pub num: i32,
    #[serde(default = "default_gen")]
    pub gen: u8,
    #[serde(rename = "type")]
    pub move_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ohko: bool,
    #[serde(default)]
    pub boosts: Option<Boosts>,
    /// Stat boost granted when the move is used as a Z-Move.
    #[serde(default)]
    pub z_move_boost: Option<Boosts>,
    #[serde(default)]
    pub is_nonstandard: Option<String>,
}

impl Move {
    pub fn id(&self) -> Id {
        Id::new(&self.name)
    }

    pub fn raises_speed(&self) -> bool {
        self.boosts.is_some_and(|boosts| boosts.raises_speed())
    }

    pub fn raises_other_stat(&self) -> bool {
        self.boosts.is_some_and(|boosts| boosts.raises_other_stat())
    }

    /// Hidden Power moves encode their type in the name, e.g. `Hidden Power Fire`.
    pub fn hidden_power_type(&self) -> Option<&str> {
        self.name
            .strip_prefix("Hidden Power ")
            .map(str::trim)
            .filter(|ty| !ty.is_empty())
    }
}
