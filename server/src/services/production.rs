use chrono::Utc;
use tracing::info;

use crate::config;
use crate::state::AppState;

/// Periodic production service: every interval, each live session earns
/// its plants' output and idle sessions are evicted.
pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(config::production_interval());
    let ttl_secs = config::session_ttl_secs();

    loop {
        interval.tick().await;
        run_pass(&state, ttl_secs);
    }
}

fn run_pass(state: &AppState, ttl_secs: i64) {
    let now = Utc::now();
    let mut expired = Vec::new();

    for mut entry in state.sessions.iter_mut() {
        if (now - entry.last_seen).num_seconds() > ttl_secs {
            expired.push(entry.key().clone());
            continue;
        }
        entry.game.apply_production();
    }

    for player in expired {
        state.sessions.remove(&player);
        info!(player = %player, "evicted idle session");
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::run_pass;
    use crate::state::{AppState, Game, PlayerSession};

    fn producing_session() -> PlayerSession {
        let mut rng = StdRng::seed_from_u64(7);
        let mut game = Game::with_rng(&mut rng, 1);
        assert!(game.buy_tile(0));
        assert!(game.buy_building(0, "Wind"));
        PlayerSession::new(game)
    }

    #[test]
    fn pass_applies_production_to_live_sessions() {
        let state = AppState::new();
        state
            .sessions
            .insert("p1".to_string(), producing_session());
        let energy_before = state.sessions.get("p1").expect("session").game.energy;

        run_pass(&state, 3_600);

        let session = state.sessions.get("p1").expect("session");
        // Level-1 plant produces round(1 * 1.5) per pass.
        assert_eq!(session.game.energy, energy_before + 2);
    }

    #[test]
    fn pass_evicts_idle_sessions_without_producing_for_them() {
        let state = AppState::new();
        let mut stale = producing_session();
        stale.last_seen = Utc::now() - Duration::seconds(600);
        state.sessions.insert("idle".to_string(), stale);
        state
            .sessions
            .insert("active".to_string(), producing_session());

        run_pass(&state, 300);

        assert!(state.sessions.get("idle").is_none());
        assert!(state.sessions.get("active").is_some());
    }
}
