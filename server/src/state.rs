use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::Rng;

use hexawatt_shared::{
    Building, BuildingCatalog, BuildingPreferences, Snapshot, Terrain, TickUpdate, Tile,
    TileStatus, catalog, tile_price,
};

use crate::config;

/// Flat-top axial neighbor offsets: E, NE, NW, W, SW, SE.
const HEX_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Authoritative per-player game state. All mutation happens behind the
/// session map's exclusive entry guard, so methods can take `&mut self`
/// without further locking.
#[derive(Debug, Clone)]
pub struct Game {
    pub energy: i64,
    pub env_bar: f64,
    pub tile_price: f64,
    pub nb_bought_tiles: u32,
    pub tiles: Vec<Tile>,
    coord_to_id: HashMap<(i32, i32), u32>,
    pub buildings: BuildingCatalog,
    pub building_pref: BuildingPreferences,
}

impl Game {
    pub fn new(rings: u32) -> Self {
        Self::with_rng(&mut rand::thread_rng(), rings)
    }

    pub fn with_rng<R: Rng>(rng: &mut R, rings: u32) -> Self {
        let (tiles, coord_to_id) = init_tiles(rng, rings);
        Self {
            energy: config::START_ENERGY,
            env_bar: config::START_ENV_BAR,
            tile_price: config::BASE_TILE_PRICE,
            nb_bought_tiles: 0,
            tiles,
            coord_to_id,
            buildings: catalog::default_catalog(),
            building_pref: catalog::building_preferences(),
        }
    }

    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    /// Price of the next tile at the current progression.
    pub fn current_tile_price(&self) -> i64 {
        tile_price(self.tile_price, self.nb_bought_tiles)
    }

    /// Locked tiles bordering owned ground become buyable. Changes are
    /// collected during the scan and applied afterwards so a tile
    /// unlocked this pass cannot cascade within the same pass.
    fn update_locked_tiles(&mut self) {
        let mut to_unlock = Vec::new();

        for tile in &self.tiles {
            if tile.status != TileStatus::Locked {
                continue;
            }

            for (dq, dr) in HEX_DIRECTIONS {
                let Some(&neighbor_id) = self.coord_to_id.get(&(tile.q + dq, tile.r + dr)) else {
                    continue;
                };
                let neighbor = &self.tiles[neighbor_id as usize];
                if !matches!(neighbor.status, TileStatus::Locked | TileStatus::Buyable) {
                    to_unlock.push(tile.id);
                    break;
                }
            }
        }

        for id in to_unlock {
            self.tiles[id as usize].status = TileStatus::Buyable;
        }
    }

    pub fn buy_tile(&mut self, id: u32) -> bool {
        let price = self.current_tile_price();
        let Some(tile) = self.tiles.get_mut(id as usize) else {
            return false;
        };
        if tile.status != TileStatus::Buyable || self.energy <= price {
            return false;
        }

        self.energy -= price;
        self.nb_bought_tiles += 1;
        tile.status = TileStatus::Empty;
        self.update_locked_tiles();
        true
    }

    pub fn buy_building(&mut self, id: u32, name: &str) -> bool {
        let Some(tile) = self.tiles.get_mut(id as usize) else {
            return false;
        };
        if tile.status != TileStatus::Empty {
            return false;
        }
        let Some(spec) = self.buildings.get_mut(name) else {
            return false;
        };

        let price = spec.purchase_price();
        if self.energy < price {
            return false;
        }

        self.energy -= price;
        self.env_bar += spec.env_build_cost();
        spec.built += 1;
        tile.status = TileStatus::Occupied {
            building: Building {
                name: name.to_string(),
                level: 1,
                durability: spec.durability,
            },
        };
        true
    }

    pub fn upgrade_building(&mut self, id: u32) -> bool {
        let Some(tile) = self.tiles.get_mut(id as usize) else {
            return false;
        };
        let TileStatus::Occupied { building } = &mut tile.status else {
            return false;
        };
        let Some(spec) = self.buildings.get(&building.name) else {
            return false;
        };

        let price = spec.upgrade_price(building.level);
        if self.energy < price {
            return false;
        }

        self.energy -= price;
        building.level += 1;
        building.durability = spec.durability_at(building.level);
        self.env_bar += spec.env_upgrade_cost(building.level);
        true
    }

    /// One production pass: every occupied tile yields energy and wears
    /// on the environment, both scaled by its level.
    pub fn apply_production(&mut self) {
        let mut energy_gain = 0i64;
        let mut env_cost = 0f64;

        for tile in &self.tiles {
            let Some(building) = tile.status.building() else {
                continue;
            };
            let Some(spec) = self.buildings.get(&building.name) else {
                continue;
            };
            energy_gain += spec.production_at(building.level);
            env_cost += spec.env_use_at(building.level);
        }

        self.energy += energy_gain;
        self.env_bar += env_cost;
    }

    pub fn full_snapshot(&self) -> Snapshot {
        Snapshot {
            tiles: Some(self.tiles.clone()),
            energy: Some(self.energy),
            env_bar: Some(self.env_bar),
            tile_price: Some(self.tile_price),
            nb_bought_tiles: Some(self.nb_bought_tiles),
            building_pref: Some(self.building_pref.clone()),
            buildings: Some(self.buildings.clone()),
        }
    }

    pub fn tick_update(&self) -> TickUpdate {
        TickUpdate {
            energy: self.energy,
            env_bar: self.env_bar,
        }
    }
}

/// Build the ring map: center tile first (buyable), then each ring walked
/// through the six directions from its south-west corner. Ids follow
/// generation order and double as indices into the tile vector.
fn init_tiles<R: Rng>(rng: &mut R, rings: u32) -> (Vec<Tile>, HashMap<(i32, i32), u32>) {
    let mut tiles = Vec::new();
    let mut coord_to_id = HashMap::new();

    place_tile(&mut tiles, &mut coord_to_id, rng, 0, 0, TileStatus::Buyable);

    for radius in 1..=rings as i32 {
        let (mut q, mut r) = (-radius, radius);
        for (dq, dr) in HEX_DIRECTIONS {
            for _ in 0..radius {
                place_tile(&mut tiles, &mut coord_to_id, rng, q, r, TileStatus::Locked);
                q += dq;
                r += dr;
            }
        }
    }

    (tiles, coord_to_id)
}

fn place_tile<R: Rng>(
    tiles: &mut Vec<Tile>,
    coord_to_id: &mut HashMap<(i32, i32), u32>,
    rng: &mut R,
    q: i32,
    r: i32,
    status: TileStatus,
) {
    let id = tiles.len() as u32;
    let terrain = Terrain::ALL[rng.gen_range(0..Terrain::ALL.len())];
    tiles.push(Tile {
        id,
        q,
        r,
        terrain,
        status,
    });
    coord_to_id.insert((q, r), id);
}

#[derive(Debug)]
pub struct PlayerSession {
    pub game: Game,
    pub last_seen: DateTime<Utc>,
}

impl PlayerSession {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            last_seen: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<DashMap<String, PlayerSession>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use hexawatt_shared::TileStatus;

    use super::{Game, HEX_DIRECTIONS};

    fn test_game(rings: u32) -> Game {
        let mut rng = StdRng::seed_from_u64(42);
        Game::with_rng(&mut rng, rings)
    }

    #[test]
    fn ring_map_has_centered_hexagonal_number_of_tiles() {
        // 1 + 3r(r+1)
        assert_eq!(test_game(1).tiles.len(), 7);
        assert_eq!(test_game(2).tiles.len(), 19);
        assert_eq!(test_game(4).tiles.len(), 61);
    }

    #[test]
    fn ids_are_generation_order_and_coords_are_unique() {
        let game = test_game(3);
        for (index, tile) in game.tiles.iter().enumerate() {
            assert_eq!(tile.id as usize, index);
            assert_eq!(game.coord_to_id[&(tile.q, tile.r)], tile.id);
        }
        assert_eq!(game.coord_to_id.len(), game.tiles.len());
    }

    #[test]
    fn only_the_center_starts_buyable() {
        let game = test_game(2);
        assert_eq!(game.tiles[0].status, TileStatus::Buyable);
        assert_eq!(game.tiles[0].q, 0);
        assert_eq!(game.tiles[0].r, 0);
        for tile in &game.tiles[1..] {
            assert_eq!(tile.status, TileStatus::Locked);
        }
    }

    #[test]
    fn first_tile_purchase_is_free_and_unlocks_the_ring() {
        let mut game = test_game(2);
        assert_eq!(game.current_tile_price(), 0);
        assert!(game.buy_tile(0));

        assert_eq!(game.tiles[0].status, TileStatus::Empty);
        assert_eq!(game.nb_bought_tiles, 1);

        // All six neighbors of the center are now buyable.
        for (dq, dr) in HEX_DIRECTIONS {
            let id = game.coord_to_id[&(dq, dr)];
            assert_eq!(game.tiles[id as usize].status, TileStatus::Buyable);
        }
        // The outer ring stays locked.
        let far = game.coord_to_id[&(-2, 2)];
        assert_eq!(game.tiles[far as usize].status, TileStatus::Locked);
    }

    #[test]
    fn tile_price_grows_with_each_purchase() {
        let mut game = test_game(2);
        assert!(game.buy_tile(0));
        let second = game.coord_to_id[&(1, 0)];

        let energy_before = game.energy;
        assert_eq!(game.current_tile_price(), 10);
        assert!(game.buy_tile(second));
        assert_eq!(game.energy, energy_before - 10);
        assert_eq!(game.nb_bought_tiles, 2);
        assert_eq!(game.current_tile_price(), 20);
    }

    #[test]
    fn locked_or_missing_tiles_cannot_be_bought() {
        let mut game = test_game(1);
        assert!(!game.buy_tile(3)); // locked
        assert!(!game.buy_tile(999)); // out of range
        assert_eq!(game.nb_bought_tiles, 0);
    }

    #[test]
    fn building_purchase_occupies_and_charges() {
        let mut game = test_game(1);
        assert!(game.buy_tile(0));

        let energy_before = game.energy;
        assert!(game.buy_building(0, "Coal"));

        let building = game.tiles[0].status.building().expect("occupied");
        assert_eq!(building.name, "Coal");
        assert_eq!(building.level, 1);
        assert_eq!(building.durability, 100);
        assert_eq!(game.energy, energy_before - 100);
        assert_eq!(game.env_bar, 1.0);
        assert_eq!(game.buildings["Coal"].built, 1);

        // Second plant of the same type costs more.
        assert_eq!(game.buildings["Coal"].purchase_price(), 150);
    }

    #[test]
    fn building_needs_an_empty_tile_and_a_known_name() {
        let mut game = test_game(1);
        assert!(!game.buy_building(0, "Coal")); // buyable, not empty
        assert!(game.buy_tile(0));
        assert!(!game.buy_building(0, "Perpetuum mobile"));
        assert!(game.buy_building(0, "Coal"));
        assert!(!game.buy_building(0, "Coal")); // already occupied
    }

    #[test]
    fn upgrade_raises_level_durability_and_env_bar() {
        let mut game = test_game(1);
        game.energy = 10_000;
        assert!(game.buy_tile(0));
        assert!(game.buy_building(0, "Solar"));

        let energy_before = game.energy;
        assert!(game.upgrade_building(0));

        let building = game.tiles[0].status.building().expect("occupied");
        assert_eq!(building.level, 2);
        assert_eq!(building.durability, 200);
        // 100 * 2^1.5 = 283
        assert_eq!(game.energy, energy_before - 283);
        assert_eq!(game.env_bar, 1.0 + 0.2);
    }

    #[test]
    fn upgrade_rejects_unaffordable_or_unbuilt_tiles() {
        let mut game = test_game(1);
        assert!(!game.upgrade_building(0));

        assert!(game.buy_tile(0));
        assert!(game.buy_building(0, "Wind"));
        game.energy = 0;
        assert!(!game.upgrade_building(0));
        let building = game.tiles[0].status.building().expect("occupied");
        assert_eq!(building.level, 1);
    }

    #[test]
    fn production_pass_scales_with_level() {
        let mut game = test_game(1);
        game.energy = 10_000;
        assert!(game.buy_tile(0));
        assert!(game.buy_building(0, "Tidal"));
        assert!(game.upgrade_building(0));

        let energy_before = game.energy;
        let env_before = game.env_bar;
        game.apply_production();

        // level 2: round(1 * 2.0) energy, round(0.1 * 1.4, 3) env
        assert_eq!(game.energy, energy_before + 2);
        assert!((game.env_bar - (env_before + 0.14)).abs() < 1e-9);
    }

    #[test]
    fn production_pass_without_buildings_is_a_no_op() {
        let mut game = test_game(1);
        let energy_before = game.energy;
        game.apply_production();
        assert_eq!(game.energy, energy_before);
        assert_eq!(game.env_bar, 0.0);
    }

    #[test]
    fn full_snapshot_carries_every_field() {
        let game = test_game(1);
        let snapshot = game.full_snapshot();
        assert_eq!(snapshot.tiles.map(|tiles| tiles.len()), Some(7));
        assert_eq!(snapshot.energy, Some(game.energy));
        assert_eq!(snapshot.env_bar, Some(game.env_bar));
        assert_eq!(snapshot.tile_price, Some(game.tile_price));
        assert_eq!(snapshot.nb_bought_tiles, Some(0));
        assert!(snapshot.building_pref.is_some());
        assert_eq!(snapshot.buildings.map(|b| b.len()), Some(16));
    }
}
