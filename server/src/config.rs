use std::time::Duration;

pub const SERVER_PORT: u16 = 3000;

/// Concentric rings around the center tile.
pub const DEFAULT_MAP_RINGS: u32 = 4;
pub const START_ENERGY: i64 = 1_000;
pub const START_ENV_BAR: f64 = 0.0;
pub const BASE_TILE_PRICE: f64 = 10.0;

pub const DEFAULT_PRODUCTION_INTERVAL_MS: u64 = 1_000;
/// Sessions idle for longer than this are evicted by the production pass.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 1_800;

pub fn server_port() -> u16 {
    std::env::var("HEXAWATT_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(SERVER_PORT)
}

pub fn map_rings() -> u32 {
    std::env::var("HEXAWATT_MAP_RINGS")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_MAP_RINGS)
}

pub fn production_interval() -> Duration {
    std::env::var("HEXAWATT_PRODUCTION_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_millis)
        .unwrap_or_else(|| Duration::from_millis(DEFAULT_PRODUCTION_INTERVAL_MS))
}

pub fn session_ttl_secs() -> i64 {
    std::env::var("HEXAWATT_SESSION_TTL_SECS")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_SECS)
}
