use serde::{Deserialize, Serialize};

use crate::data::species::default_gen;
use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub num: i32,
    #[serde(default = "default_gen")]
    pub gen: u8,
    /// Type a Z-Crystal powers up; moves of this type become Z-Moves.
    #[serde(default)]
    pub z_move_type: Option<String>,
    #[serde(default)]
    pub mega_stone: Option<String>,
    /// `"Gen 2"` for items only obtainable in generation 2, other values for CAP items.
    #[serde(default)]
    pub is_nonstandard: Option<String>,
}

impl Item {
    pub fn id(&self) -> Id {
        Id::new(&self.name)
    }
}
