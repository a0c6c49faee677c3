//! Match configuration with documented constants
//!
//! All setup numbers live here. `GameConfig::default()` reproduces the
//! shipped skirmish; `GameConfig::load` reads the same shape from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::actor::template::ActorTemplate;
use crate::core::error::{GameError, Result};
use crate::core::types::Rgb;
use crate::game::ai::AiConfig;
use crate::map::generation::{BiomeConfig, EdgePolicy};
use crate::map::terrain::TerrainKind;
use crate::skills::SkillDefinition;
use crate::spawning::Corner;

/// Upper bound on random retries for any placement search
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cells along x
    pub width: u32,
    /// Cells along y
    pub height: u32,
    /// Pixel size of one cell. Only the renderer cares about this.
    pub cell_size: u32,
}

impl GridConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 21,
            cell_size: 30,
        }
    }
}

/// Procedural terrain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Terrain every cell starts with before biomes are painted
    pub default_terrain: TerrainKind,
    /// How many times the full biome list is painted
    ///
    /// Each layer overwrites earlier ones where they overlap, so more layers
    /// give a busier, more fragmented map.
    pub layers: u32,
    /// Biomes painted in order within each layer (last writer wins)
    pub biomes: Vec<BiomeConfig>,
    /// How the deepening pass treats neighbors beyond the map edge
    pub edge_policy: EdgePolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_terrain: TerrainKind::Plains,
            layers: 7,
            biomes: BiomeConfig::defaults(),
            edge_policy: EdgePolicy::default(),
        }
    }
}

/// Corner spawn search settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Side length of the square searched inside each corner
    pub corner_area: u32,
    /// Random draws inside the corner before the deterministic scans kick in
    pub corner_attempts: u32,
    /// Random draws for an anywhere-on-the-board spawn
    pub random_attempts: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            corner_area: 4,
            corner_attempts: 16,
            random_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Lair placement and the neutral units that guard them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LairConfig {
    pub min_count: u32,
    pub max_count: u32,
    pub min_guards: u32,
    pub max_guards: u32,
    pub attempts: u32,
    /// Template used for lair guards
    pub guard_template: String,
    /// Faction that owns lair guards
    pub faction: String,
}

impl Default for LairConfig {
    fn default() -> Self {
        Self {
            min_count: 4,
            max_count: 6,
            min_guards: 2,
            max_guards: 3,
            attempts: MAX_PLACEMENT_ATTEMPTS,
            guard_template: "Warg".to_string(),
            faction: "Gaia".to_string(),
        }
    }
}

/// One faction seat at the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionConfig {
    pub name: String,
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    /// Human-controlled seat
    pub playable: bool,
    /// Starting troops, spawned in `corner`
    #[serde(default)]
    pub troops: u32,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub corner: Option<Corner>,
    /// Sprite key handed to the renderer for this faction's troops
    #[serde(default)]
    pub sprite: String,
}

impl FactionConfig {
    pub fn defaults() -> Vec<FactionConfig> {
        vec![
            FactionConfig {
                name: "Darkus".to_string(),
                primary_color: Rgb::PURPLE,
                secondary_color: Rgb::DARK_GRAY,
                playable: true,
                troops: 6,
                template: Some("Militia".to_string()),
                corner: Some(Corner::TopLeft),
                sprite: "darkus_militia".to_string(),
            },
            FactionConfig {
                name: "Ventus".to_string(),
                primary_color: Rgb::GREEN,
                secondary_color: Rgb::WHITE,
                playable: true,
                troops: 6,
                template: Some("Militia".to_string()),
                corner: Some(Corner::BottomRight),
                sprite: "ventus_militia".to_string(),
            },
            FactionConfig {
                name: "Gaia".to_string(),
                primary_color: Rgb::BROWN,
                secondary_color: Rgb::BLACK,
                playable: false,
                troops: 0,
                template: None,
                corner: None,
                sprite: "warg".to_string(),
            },
        ]
    }
}

/// Complete setup for one skirmish
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub generation: GenerationConfig,
    pub spawn: SpawnConfig,
    pub lairs: LairConfig,
    pub ai: AiConfig,
    pub factions: Vec<FactionConfig>,
    pub templates: Vec<ActorTemplate>,
    pub skills: Vec<SkillDefinition>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            generation: GenerationConfig::default(),
            spawn: SpawnConfig::default(),
            lairs: LairConfig::default(),
            ai: AiConfig::default(),
            factions: FactionConfig::defaults(),
            templates: vec![ActorTemplate::militia(), ActorTemplate::warg()],
            skills: SkillDefinition::defaults(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn template(&self, name: &str) -> Option<&ActorTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(GameError::EmptyMap {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        if self.ai.idle_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "ai.idle_percent must be at most 100 (got {})",
                self.ai.idle_percent
            )));
        }

        if self.factions.is_empty() {
            return Err(GameError::InvalidConfig("at least one faction is required".into()));
        }

        for biome in &self.generation.biomes {
            if biome.max_range == 0 {
                return Err(GameError::InvalidConfig(format!(
                    "biome {:?} needs max_range >= 1",
                    biome.terrain
                )));
            }
        }

        if self.lairs.min_count > self.lairs.max_count {
            return Err(GameError::InvalidConfig(format!(
                "lair count range {}..={} is empty",
                self.lairs.min_count, self.lairs.max_count
            )));
        }
        if self.lairs.min_guards > self.lairs.max_guards {
            return Err(GameError::InvalidConfig(format!(
                "lair guard range {}..={} is empty",
                self.lairs.min_guards, self.lairs.max_guards
            )));
        }
        // A lair can be ringed by at most its 8 neighbors
        if self.lairs.max_guards > 8 {
            return Err(GameError::InvalidConfig(format!(
                "at most 8 guards fit around a lair (got {})",
                self.lairs.max_guards
            )));
        }

        if self.lairs.max_count > 0 {
            if !self.factions.iter().any(|f| f.name == self.lairs.faction) {
                return Err(GameError::InvalidConfig(format!(
                    "lair faction '{}' is not in the faction list",
                    self.lairs.faction
                )));
            }
            if self.template(&self.lairs.guard_template).is_none() {
                return Err(GameError::UnknownTemplate(self.lairs.guard_template.clone()));
            }
        }

        for faction in &self.factions {
            if faction.troops == 0 {
                continue;
            }
            let Some(template) = &faction.template else {
                return Err(GameError::InvalidConfig(format!(
                    "faction '{}' has troops but no template",
                    faction.name
                )));
            };
            if self.template(template).is_none() {
                return Err(GameError::UnknownTemplate(template.clone()));
            }
        }

        for template in &self.templates {
            for skill in &template.skills {
                if !self.skills.iter().any(|s| s.id == *skill) {
                    return Err(GameError::UnknownSkill(skill.0));
                }
            }
        }

        Ok(())
    }
}
