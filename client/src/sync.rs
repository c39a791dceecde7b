use std::cell::{Cell, RefCell};

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use hexawatt_shared::{GameOutcome, evaluate_outcome};

use crate::api;
use crate::state::GameState;

pub const TICK_INTERVAL_MS: i32 = 1_000;

/// Session lifecycle. Actions are accepted only in `Playing`; an in-flight
/// action is a phase of its own so a future rollback (the optimistic clear
/// is currently kept on failure) has a transition to hook into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Starting,
    Playing,
    ActionPending,
    Ended(GameOutcome),
}

impl SessionPhase {
    /// True while the session is live and the tick poll should run.
    pub fn is_live(self) -> bool {
        matches!(self, SessionPhase::Playing | SessionPhase::ActionPending)
    }
}

/// Everything one game session owns: the reactive state handles plus the
/// player identity. Constructed once at mount, passed around by copy; no
/// module-level snapshot or selection globals.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub game: RwSignal<GameState>,
    pub selected: RwSignal<Option<u32>>,
    pub phase: RwSignal<SessionPhase>,
    pub player: StoredValue<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    BuyTile { tile_id: u32 },
    BuyBuilding { tile_id: u32, building: String },
    UpgradeBuilding { tile_id: u32 },
}

struct TickIntervalBinding {
    window: web_sys::Window,
    interval_id: i32,
    _callback: Closure<dyn Fn()>,
}

thread_local! {
    static TICK_INTERVAL_BINDING: RefCell<Option<TickIntervalBinding>> = const { RefCell::new(None) };
    static TICK_IN_FLIGHT: Cell<bool> = const { Cell::new(false) };
    static ACTION_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// `Idle -> Starting -> Playing`. On failure nothing is applied and the
/// session drops back to `Idle` for another attempt.
pub fn start_session(ctx: SessionContext) {
    if ctx.phase.get_untracked() != SessionPhase::Idle {
        return;
    }
    ctx.phase.set(SessionPhase::Starting);

    spawn_local(async move {
        match api::start(&ctx.player.get_value()).await {
            Ok(snapshot) => {
                ctx.game.update(|game| game.apply_snapshot(snapshot));
                ctx.selected.set(None);
                ctx.phase.set(SessionPhase::Playing);
                start_tick_loop(ctx);
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("start failed: {e}").into());
                ctx.phase.set(SessionPhase::Idle);
            }
        }
    });
}

/// Issue a purchase/upgrade. The current selection is cleared and
/// re-rendered before the request goes out, so stale prices never linger
/// during the round trip; on failure the post-clear state stays as-is (a
/// deliberate simplification, not a correctness guarantee).
pub fn dispatch(ctx: SessionContext, action: PlayerAction) {
    if ctx.phase.get_untracked() != SessionPhase::Playing {
        return;
    }

    ctx.selected.set(None);
    ctx.game.update(|game| game.pending_building = None);
    ctx.phase.set(SessionPhase::ActionPending);

    let seq = ACTION_SEQ.with(|counter| {
        let next = counter.get() + 1;
        counter.set(next);
        next
    });

    spawn_local(async move {
        let player = ctx.player.get_value();
        let result = match &action {
            PlayerAction::BuyTile { tile_id } => api::buy_tile(&player, *tile_id).await,
            PlayerAction::BuyBuilding { tile_id, building } => {
                api::buy_building(&player, *tile_id, building).await
            }
            PlayerAction::UpgradeBuilding { tile_id } => {
                api::upgrade_building(&player, *tile_id).await
            }
        };

        if ctx.phase.get_untracked() == SessionPhase::ActionPending {
            ctx.phase.set(SessionPhase::Playing);
        }

        match result {
            // A response that lost the race against a newer request must
            // not overwrite state that has moved on without it.
            Ok(_) if seq != ACTION_SEQ.with(Cell::get) => {
                web_sys::console::warn_1(&"discarding stale action response".into());
            }
            Ok(snapshot) => {
                if ctx.phase.get_untracked().is_live() {
                    ctx.game.update(|game| game.apply_snapshot(snapshot));
                }
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("action failed: {e}").into());
            }
        }
    });
}

/// Start (or restart) the periodic tick poll. Replaces any previous
/// interval so at most one is ever registered.
pub fn start_tick_loop(ctx: SessionContext) {
    stop_tick_loop();

    let Some(window) = web_sys::window() else {
        return;
    };

    let callback = Closure::<dyn Fn()>::new(move || poll_tick(ctx));
    let Ok(interval_id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        TICK_INTERVAL_MS,
    ) else {
        return;
    };

    TICK_INTERVAL_BINDING.with(|slot| {
        *slot.borrow_mut() = Some(TickIntervalBinding {
            window: window.clone(),
            interval_id,
            _callback: callback,
        });
    });
}

/// Idempotent: stopping an already-stopped loop is a no-op.
pub fn stop_tick_loop() {
    TICK_INTERVAL_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            old.window.clear_interval_with_handle(old.interval_id);
        }
    });
    TICK_IN_FLIGHT.with(|flag| flag.set(false));
}

fn poll_tick(ctx: SessionContext) {
    if !ctx.phase.get_untracked().is_live() {
        return;
    }
    // Single-flight: a slow response must not overlap the next firing.
    // A failed or skipped tick has no side effect; the next interval
    // simply tries again.
    if TICK_IN_FLIGHT.with(|flag| flag.replace(true)) {
        return;
    }

    spawn_local(async move {
        let result = api::fetch_tick(&ctx.player.get_value()).await;
        TICK_IN_FLIGHT.with(|flag| flag.set(false));

        let Ok(tick) = result else {
            return;
        };
        // Counters from a tick issued before an in-flight action resolved
        // would be stale against the action's snapshot; drop them.
        if ctx.phase.get_untracked() != SessionPhase::Playing {
            return;
        }

        ctx.game.update(|game| game.apply_tick(tick));

        let (energy, env_bar) = ctx.game.with_untracked(|game| (game.energy, game.env_bar));
        if let Some(outcome) = evaluate_outcome(energy, env_bar) {
            end_session(ctx, outcome);
        }
    });
}

/// `Playing -> Ended`: freeze actions, stop polling, present the outcome.
fn end_session(ctx: SessionContext, outcome: GameOutcome) {
    stop_tick_loop();
    ctx.selected.set(None);
    ctx.phase.set(SessionPhase::Ended(outcome));
}

/// Tear the session down and return to the menu.
pub fn leave_session(ctx: SessionContext) {
    stop_tick_loop();
    ctx.selected.set(None);
    ctx.game.set(GameState::default());
    ctx.phase.set(SessionPhase::Idle);
}
