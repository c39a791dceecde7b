use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hexawatt_shared::{
    BuyBuildingRequest, BuyTileRequest, Snapshot, StartRequest, TickRequest,
    UpgradeBuildingRequest,
};

use crate::config;
use crate::state::{AppState, Game, PlayerSession};

/// Create (or restart) a player session and return the full opening state.
pub async fn start(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> Json<Snapshot> {
    let game = Game::new(config::map_rings());
    let snapshot = game.full_snapshot();
    state
        .sessions
        .insert(req.player.clone(), PlayerSession::new(game));
    tracing::info!(player = %req.player, "session started");
    Json(snapshot)
}

/// Counter refresh only; the tile collection is never touched here.
pub async fn tick(State(state): State<AppState>, Json(req): Json<TickRequest>) -> Response {
    let Some(mut session) = state.sessions.get_mut(&req.player) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    session.touch();
    Json(session.game.tick_update()).into_response()
}

pub async fn buy_tile(State(state): State<AppState>, Json(req): Json<BuyTileRequest>) -> Response {
    let Some(mut session) = state.sessions.get_mut(&req.player) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    session.touch();

    // A rejected purchase still answers with the current fields; the
    // client treats the response as the authoritative word either way.
    if !session.game.buy_tile(req.tile_id) {
        tracing::debug!(player = %req.player, tile = req.tile_id, "tile purchase rejected");
    }

    let game = &session.game;
    Json(Snapshot {
        tiles: Some(game.tiles.clone()),
        energy: Some(game.energy),
        tile_price: Some(game.tile_price),
        nb_bought_tiles: Some(game.nb_bought_tiles),
        ..Snapshot::default()
    })
    .into_response()
}

pub async fn buy_building(
    State(state): State<AppState>,
    Json(req): Json<BuyBuildingRequest>,
) -> Response {
    let Some(mut session) = state.sessions.get_mut(&req.player) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    session.touch();

    if !session.game.buy_building(req.tile_id, &req.building) {
        tracing::debug!(
            player = %req.player,
            tile = req.tile_id,
            building = %req.building,
            "building purchase rejected"
        );
    }

    let game = &session.game;
    Json(Snapshot {
        tiles: Some(game.tiles.clone()),
        energy: Some(game.energy),
        env_bar: Some(game.env_bar),
        buildings: Some(game.buildings.clone()),
        ..Snapshot::default()
    })
    .into_response()
}

pub async fn upgrade_building(
    State(state): State<AppState>,
    Json(req): Json<UpgradeBuildingRequest>,
) -> Response {
    let Some(mut session) = state.sessions.get_mut(&req.player) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    session.touch();

    if !session.game.upgrade_building(req.tile_id) {
        tracing::debug!(player = %req.player, tile = req.tile_id, "upgrade rejected");
    }

    let game = &session.game;
    Json(Snapshot {
        tiles: Some(game.tiles.clone()),
        energy: Some(game.energy),
        env_bar: Some(game.env_bar),
        ..Snapshot::default()
    })
    .into_response()
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "sessions": state.sessions.len(),
    }))
}
