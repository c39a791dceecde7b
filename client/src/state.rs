use hexawatt_shared::{
    BuildingCatalog, BuildingPreferences, Snapshot, TickUpdate, Tile, tile_price,
};

/// Client-side tile: the wire tile plus the pixel center written back by
/// the last render pass. The center is a rendering cache, not semantic
/// state, and is absent until the tile has been drawn at least once.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientTile {
    pub tile: Tile,
    pub center: Option<(f64, f64)>,
}

impl ClientTile {
    pub fn from_tile(tile: Tile) -> Self {
        Self { tile, center: None }
    }
}

/// The single in-memory snapshot of game state. The render layer only
/// ever reads it; mutation goes through `apply_snapshot` and `apply_tick`
/// so a half-updated tile collection can never be observed alongside a
/// half-updated counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameState {
    pub energy: i64,
    pub env_bar: f64,
    pub tile_price: f64,
    pub nb_bought_tiles: u32,
    pub building_pref: BuildingPreferences,
    pub buildings: BuildingCatalog,
    pub tiles: Vec<ClientTile>,
    /// Plant picked in the bottom panel while a purchase is being
    /// composed. Invalidated by every applied snapshot.
    pub pending_building: Option<String>,
}

impl GameState {
    /// Merge a partial snapshot: only the fields present in the payload
    /// are replaced. Always clears the pending building selection, since
    /// a new snapshot invalidates any in-progress purchase context.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        if let Some(tiles) = snapshot.tiles {
            self.tiles = tiles.into_iter().map(ClientTile::from_tile).collect();
        }
        if let Some(energy) = snapshot.energy {
            self.energy = energy;
        }
        if let Some(env_bar) = snapshot.env_bar {
            self.env_bar = env_bar;
        }
        if let Some(price) = snapshot.tile_price {
            self.tile_price = price;
        }
        if let Some(bought) = snapshot.nb_bought_tiles {
            self.nb_bought_tiles = bought;
        }
        if let Some(pref) = snapshot.building_pref {
            self.building_pref = pref;
        }
        if let Some(buildings) = snapshot.buildings {
            self.buildings = buildings;
        }
        self.pending_building = None;
    }

    /// Counter refresh only; tiles and catalog are never touched here.
    pub fn apply_tick(&mut self, tick: TickUpdate) {
        self.energy = tick.energy;
        self.env_bar = tick.env_bar;
    }

    pub fn tile(&self, id: u32) -> Option<&ClientTile> {
        self.tiles.iter().find(|t| t.tile.id == id)
    }

    /// Display mirror of the server's tile pricing; the response to a
    /// purchase is still the authoritative word.
    pub fn current_tile_price(&self) -> i64 {
        tile_price(self.tile_price, self.nb_bought_tiles)
    }
}
