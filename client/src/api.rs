use serde::Serialize;
use serde::de::DeserializeOwned;

use hexawatt_shared::{
    BuyBuildingRequest, BuyTileRequest, Snapshot, StartRequest, TickRequest, TickUpdate,
    UpgradeBuildingRequest,
};

async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, String> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| format!("encode error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<T>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Open (or restart) the session; the response is the full opening state.
pub async fn start(player: &str) -> Result<Snapshot, String> {
    post_json(
        "/api/start",
        &StartRequest {
            player: player.to_string(),
        },
    )
    .await
}

/// Lightweight counter poll.
pub async fn fetch_tick(player: &str) -> Result<TickUpdate, String> {
    post_json(
        "/api/tick",
        &TickRequest {
            player: player.to_string(),
        },
    )
    .await
}

pub async fn buy_tile(player: &str, tile_id: u32) -> Result<Snapshot, String> {
    post_json(
        "/api/buy-tile",
        &BuyTileRequest {
            player: player.to_string(),
            tile_id,
        },
    )
    .await
}

pub async fn buy_building(player: &str, tile_id: u32, building: &str) -> Result<Snapshot, String> {
    post_json(
        "/api/buy-building",
        &BuyBuildingRequest {
            player: player.to_string(),
            tile_id,
            building: building.to_string(),
        },
    )
    .await
}

pub async fn upgrade_building(player: &str, tile_id: u32) -> Result<Snapshot, String> {
    post_json(
        "/api/upgrade-building",
        &UpgradeBuildingRequest {
            player: player.to_string(),
            tile_id,
        },
    )
    .await
}
