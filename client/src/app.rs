use leptos::prelude::*;

use hexawatt_shared::GameOutcome;

use crate::canvas::MapCanvas;
use crate::panel::{BottomPanel, CountersHeader};
use crate::state::GameState;
use crate::sync::{self, SessionContext, SessionPhase};

/// Newtype wrappers so same-shaped signals stay distinct in context.
#[derive(Clone, Copy)]
pub(crate) struct Selected(pub RwSignal<Option<u32>>);
#[derive(Clone, Copy)]
pub(crate) struct LastHexSize(pub RwSignal<f64>);
#[derive(Clone, Copy)]
pub(crate) struct ResizeEpoch(pub RwSignal<u64>);

/// Per-tab player identity; the server keys sessions by it.
fn player_id() -> String {
    let stamp = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.time_origin() + p.now())
        .unwrap_or_default();
    format!("player-{}", stamp as u64)
}

/// Root application component. Owns the session context and switches the
/// visible page on the session phase.
#[component]
pub fn App() -> impl IntoView {
    let game = RwSignal::new(GameState::default());
    let selected = RwSignal::new(None::<u32>);
    let phase = RwSignal::new(SessionPhase::Idle);
    let player = StoredValue::new(player_id());

    let ctx = SessionContext {
        game,
        selected,
        phase,
        player,
    };

    provide_context(game);
    provide_context(ctx);
    provide_context(Selected(selected));
    provide_context(LastHexSize(RwSignal::new(0.0)));
    provide_context(ResizeEpoch(RwSignal::new(0)));

    on_cleanup(sync::stop_tick_loop);

    view! {
        <div class="app">
            {move || match phase.get() {
                SessionPhase::Idle | SessionPhase::Starting => {
                    view! { <MainMenu /> }.into_any()
                }
                SessionPhase::Playing | SessionPhase::ActionPending => {
                    view! { <GameView /> }.into_any()
                }
                SessionPhase::Ended(outcome) => view! { <EndScreen outcome /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn MainMenu() -> impl IntoView {
    let ctx: SessionContext = expect_context();
    let starting = move || ctx.phase.get() == SessionPhase::Starting;

    view! {
        <main class="menu">
            <h1>"Hexawatt"</h1>
            <p>"Buy land, build plants, keep the grid and the planet alive."</p>
            <button prop:disabled=starting on:click=move |_| sync::start_session(ctx)>
                {move || if starting() { "Starting..." } else { "Start game" }}
            </button>
        </main>
    }
}

#[component]
fn GameView() -> impl IntoView {
    view! {
        <div class="game-view">
            <CountersHeader />
            <div class="canvas-container">
                <MapCanvas />
            </div>
            <BottomPanel />
        </div>
    }
}

#[component]
fn EndScreen(outcome: GameOutcome) -> impl IntoView {
    let ctx: SessionContext = expect_context();
    let title = if outcome.is_win() { "You win" } else { "Game over" };

    view! {
        <main class="end-screen">
            <h1>{title}</h1>
            <p>{outcome.description()}</p>
            <button on:click=move |_| sync::leave_session(ctx)>"Back to menu"</button>
        </main>
    }
}
