use serde::{Deserialize, Serialize};

use crate::catalog::{BuildingCatalog, BuildingPreferences};
use crate::tile::Tile;

/// Partial authoritative state payload. Every field is optional: absent
/// fields leave the corresponding client state untouched, so an action
/// response only carries what it changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<Tile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_bar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_bought_tiles: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_pref: Option<BuildingPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buildings: Option<BuildingCatalog>,
}

/// Lightweight counter refresh returned by the tick endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickUpdate {
    pub energy: i64,
    pub env_bar: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartRequest {
    pub player: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRequest {
    pub player: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyTileRequest {
    pub player: String,
    pub tile_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyBuildingRequest {
    pub player: String,
    pub tile_id: u32,
    pub building: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeBuildingRequest {
    pub player: String,
    pub tile_id: u32,
}
