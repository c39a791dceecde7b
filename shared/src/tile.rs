use serde::{Deserialize, Serialize};

/// Terrain category, fixed at map generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Sea,
    River,
    Forest,
    Plain,
    Desert,
    Mountain,
}

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::Sea,
        Terrain::River,
        Terrain::Forest,
        Terrain::Plain,
        Terrain::Desert,
        Terrain::Mountain,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Terrain::Sea => "sea",
            Terrain::River => "river",
            Terrain::Forest => "forest",
            Terrain::Plain => "plain",
            Terrain::Desert => "desert",
            Terrain::Mountain => "mountain",
        }
    }
}

/// A built power plant occupying a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Key into the building catalog.
    pub name: String,
    /// Starts at 1 on purchase.
    pub level: u32,
    pub durability: u32,
}

/// Tile lifecycle, discriminated by an explicit tag on the wire.
/// Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TileStatus {
    Locked,
    Buyable,
    Empty,
    Occupied { building: Building },
}

impl TileStatus {
    pub fn building(&self) -> Option<&Building> {
        match self {
            TileStatus::Occupied { building } => Some(building),
            _ => None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, TileStatus::Occupied { .. })
    }
}

/// One hex cell as the server reports it. Ids are stable within a session
/// and index the snapshot's tile vector; collection order is part of the
/// contract and must survive the round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    /// Axial column.
    pub q: i32,
    /// Axial row.
    pub r: i32,
    pub terrain: Terrain,
    pub status: TileStatus,
}

#[cfg(test)]
mod tests {
    use super::{Building, Terrain, Tile, TileStatus};

    #[test]
    fn status_tag_round_trips_through_json() {
        let tile = Tile {
            id: 7,
            q: 1,
            r: -2,
            terrain: Terrain::Desert,
            status: TileStatus::Occupied {
                building: Building {
                    name: "Solar".to_string(),
                    level: 2,
                    durability: 200,
                },
            },
        };

        let json = serde_json::to_string(&tile).expect("serialize tile");
        assert!(json.contains(r#""state":"occupied""#));

        let back: Tile = serde_json::from_str(&json).expect("deserialize tile");
        assert_eq!(back, tile);
    }

    #[test]
    fn plain_statuses_deserialize_from_bare_tags() {
        let json = r#"{"id":0,"q":0,"r":0,"terrain":"plain","status":{"state":"buyable"}}"#;
        let tile: Tile = serde_json::from_str(json).expect("deserialize tile");
        assert_eq!(tile.status, TileStatus::Buyable);
        assert!(tile.status.building().is_none());
    }
}
