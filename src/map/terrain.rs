//! Terrain table
//!
//! Every cell carries its own copy of a `Terrain` value. The table is fixed;
//! generation only swaps one kind for another.

use serde::{Deserialize, Deserializer, Serialize};

/// Terrain kinds known to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TerrainKind {
    /// Sentinel: "no terrain". Terminates every deep chain.
    None,
    #[default]
    Plains,
    Mountains,
    Sea,
    Hills,
    Forest,
    Base,
    DeepSea,
    DeepForest,
}

impl TerrainKind {
    pub fn all() -> [TerrainKind; 9] {
        [
            TerrainKind::None,
            TerrainKind::Plains,
            TerrainKind::Mountains,
            TerrainKind::Sea,
            TerrainKind::Hills,
            TerrainKind::Forest,
            TerrainKind::Base,
            TerrainKind::DeepSea,
            TerrainKind::DeepForest,
        ]
    }

    /// Stable numeric id
    pub fn id(&self) -> i32 {
        match self {
            TerrainKind::None => -1,
            TerrainKind::Plains => 0,
            TerrainKind::Mountains => 1,
            TerrainKind::Sea => 2,
            TerrainKind::Hills => 3,
            TerrainKind::Forest => 4,
            TerrainKind::Base => 6,
            TerrainKind::DeepSea => 21,
            TerrainKind::DeepForest => 41,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerrainKind::None => "None",
            TerrainKind::Plains => "Plains",
            TerrainKind::Mountains => "Mountains",
            TerrainKind::Sea => "Sea",
            TerrainKind::Hills => "Hills",
            TerrainKind::Forest => "Forest",
            TerrainKind::Base => "Base",
            TerrainKind::DeepSea => "DeepSea",
            TerrainKind::DeepForest => "DeepForest",
        }
    }

    /// Can a unit stand on or walk through this terrain?
    pub fn passable(&self) -> bool {
        matches!(
            self,
            TerrainKind::Plains | TerrainKind::Hills | TerrainKind::Forest | TerrainKind::Base
        )
    }

    /// What this terrain turns into when fully surrounded by itself
    pub fn deep_version(&self) -> TerrainKind {
        match self {
            TerrainKind::Sea => TerrainKind::DeepSea,
            TerrainKind::Hills => TerrainKind::Mountains,
            TerrainKind::Forest => TerrainKind::DeepForest,
            _ => TerrainKind::None,
        }
    }

    pub fn from_id(id: i32) -> Option<TerrainKind> {
        Self::all().into_iter().find(|kind| kind.id() == id)
    }

    /// Single glyph for text boards
    pub fn glyph(&self) -> char {
        match self {
            TerrainKind::None => ' ',
            TerrainKind::Plains => '.',
            TerrainKind::Mountains => '^',
            TerrainKind::Sea => '~',
            TerrainKind::Hills => 'n',
            TerrainKind::Forest => 't',
            TerrainKind::Base => 'B',
            TerrainKind::DeepSea => '=',
            TerrainKind::DeepForest => 'T',
        }
    }
}

/// Terrain record stored on each cell
///
/// Serialized as its kind; the remaining fields are looked up from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "TerrainKind")]
pub struct Terrain {
    pub kind: TerrainKind,
    pub id: i32,
    pub name: &'static str,
    pub passable: bool,
    pub deep_version: TerrainKind,
}

impl Terrain {
    pub fn of(kind: TerrainKind) -> Self {
        Self {
            kind,
            id: kind.id(),
            name: kind.name(),
            passable: kind.passable(),
            deep_version: kind.deep_version(),
        }
    }

    /// The deep terrain this one promotes to, if any
    pub fn deepened(&self) -> Option<Terrain> {
        match self.deep_version {
            TerrainKind::None => None,
            deep => Some(Terrain::of(deep)),
        }
    }

    pub fn has_deep_version(&self) -> bool {
        self.deep_version != TerrainKind::None
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Terrain::of(TerrainKind::default())
    }
}

impl From<TerrainKind> for Terrain {
    fn from(kind: TerrainKind) -> Self {
        Terrain::of(kind)
    }
}

impl<'de> Deserialize<'de> for Terrain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TerrainKind::deserialize(deserializer).map(Terrain::of)
    }
}

impl From<Terrain> for TerrainKind {
    fn from(terrain: Terrain) -> Self {
        terrain.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Coord;
    use crate::map::Cell;

    #[test]
    fn test_terrain_table() {
        assert_eq!(TerrainKind::Plains.id(), 0);
        assert_eq!(TerrainKind::DeepSea.id(), 21);
        assert_eq!(TerrainKind::DeepForest.id(), 41);
        assert!(TerrainKind::Forest.passable());
        assert!(!TerrainKind::Sea.passable());
        assert!(!TerrainKind::None.passable());
    }

    #[test]
    fn test_deep_chains_terminate() {
        for kind in TerrainKind::all() {
            let mut current = Terrain::of(kind);
            let mut steps = 0;
            while let Some(next) = current.deepened() {
                current = next;
                steps += 1;
                assert!(steps < 4, "deep chain from {:?} does not terminate", kind);
            }
        }
    }

    #[test]
    fn test_hills_deepen_to_mountains() {
        let hills = Terrain::of(TerrainKind::Hills);
        assert_eq!(hills.deepened().map(|t| t.kind), Some(TerrainKind::Mountains));
        assert_eq!(Terrain::of(TerrainKind::Plains).deepened(), None);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(TerrainKind::from_id(3), Some(TerrainKind::Hills));
        assert_eq!(TerrainKind::from_id(5), None);
    }

    #[test]
    fn test_terrain_serializes_as_kind() {
        let json = serde_json::to_string(&Terrain::of(TerrainKind::Sea)).unwrap();
        assert_eq!(json, "\"Sea\"");
        let back: Terrain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Terrain::of(TerrainKind::Sea));
    }

    #[test]
    fn test_cell_reads_back_from_owned_json() {
        let mut cell = Cell::new(Coord::new(2, 3), TerrainKind::Forest);
        cell.in_move_range = true;
        let json = serde_json::to_string(&cell).unwrap();

        // Owned buffer: the reader must not borrow terrain names from it
        let back: Cell = serde_json::from_reader(json.as_bytes()).unwrap();
        assert_eq!(back.terrain, Terrain::of(TerrainKind::Forest));
        assert_eq!(back.terrain.name, "Forest");
        assert_eq!(back.coord, Coord::new(2, 3));
    }
}
