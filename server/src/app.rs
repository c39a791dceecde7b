use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    let static_assets = Router::new().fallback_service(
        ServeDir::new("client/dist")
            .precompressed_br()
            .precompressed_gzip(),
    );

    Router::new()
        .route("/api/start", post(routes::api::start))
        .route("/api/tick", post(routes::api::tick))
        .route("/api/buy-tile", post(routes::api::buy_tile))
        .route("/api/buy-building", post(routes::api::buy_building))
        .route("/api/upgrade-building", post(routes::api::upgrade_building))
        .route("/api/health", get(routes::api::health))
        .layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}
