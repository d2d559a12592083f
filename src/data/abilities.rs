use serde::{Deserialize, Serialize};

use crate::data::species::default_gen;
use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub num: i32,
    #[serde(default = "default_gen")]
    pub gen: u8,
    #[serde(default)]
    pub is_nonstandard: Option<String>,
}

impl Ability {
    pub fn id(&self) -> Id {
        Id::new(&self.name)
    }
}

/// Natures only ever adjust two stats; neutral natures leave both empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nature {
    pub name: String,
    #[serde(default)]
    pub plus: Option<String>,
    #[serde(default)]
    pub minus: Option<String>,
}

impl Nature {
    pub fn id(&self) -> Id {
        Id::new(&self.name)
    }
}
