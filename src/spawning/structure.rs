use serde::{Deserialize, Serialize};

pub const WARG_LAIR: &str = "Warg Lair";

/// Building or landmark that sits on exactly one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    pub passable: bool,
    pub lootable: bool,
    pub sprite: String,
}

impl Structure {
    pub fn new(
        name: impl Into<String>,
        passable: bool,
        lootable: bool,
        sprite: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passable,
            lootable,
            sprite: sprite.into(),
        }
    }

    /// Neutral den that seeds warg guards around itself
    pub fn warg_lair() -> Self {
        Self::new(WARG_LAIR, false, false, "warg_lair")
    }

    pub fn is_lair(&self) -> bool {
        self.name == WARG_LAIR
    }
}
