use leptos::prelude::*;

use hexawatt_shared::{Building, Terrain, TileStatus};

use crate::app::Selected;
use crate::state::GameState;
use crate::sync::{self, PlayerAction, SessionContext, SessionPhase};

#[component]
pub fn CountersHeader() -> impl IntoView {
    let game: RwSignal<GameState> = expect_context();

    view! {
        <header class="counters">
            <span class="counter energy">
                {move || game.with(|g| format!("Energy: {}", g.energy))}
            </span>
            <span class="counter env">
                {move || game.with(|g| format!("Environment: {:+.1}", g.env_bar))}
            </span>
        </header>
    }
}

/// Presenter for the selected tile. Owns only formatting and module
/// switching; every price shown here is a display mirror of the server's
/// formulas, and every button hands off to the sync layer.
#[component]
pub fn BottomPanel() -> impl IntoView {
    let game: RwSignal<GameState> = expect_context();
    let Selected(selected) = expect_context();
    let ctx: SessionContext = expect_context();

    view! {
        <section class="bottom-panel">
            {move || panel_view(ctx, game, selected.get())}
        </section>
    }
}

fn panel_view(ctx: SessionContext, game: RwSignal<GameState>, selected: Option<u32>) -> AnyView {
    let tile = selected.and_then(|id| {
        game.with(|g| {
            g.tile(id)
                .map(|entry| (id, entry.tile.terrain, entry.tile.status.clone()))
        })
    });
    let Some((id, terrain, status)) = tile else {
        return view! { <p class="hint">"Select a tile."</p> }.into_any();
    };

    match status {
        TileStatus::Locked => {
            view! { <p class="hint">"This tile is out of reach for now."</p> }.into_any()
        }
        TileStatus::Buyable => buyable_module(ctx, game, id),
        TileStatus::Empty => empty_module(ctx, game, id, terrain),
        TileStatus::Occupied { building } => occupied_module(ctx, game, id, building),
    }
}

fn action_button(ctx: SessionContext, label: String, action: PlayerAction) -> impl IntoView {
    let disabled = move || ctx.phase.get() != SessionPhase::Playing;
    view! {
        <button
            class="action"
            prop:disabled=disabled
            on:click=move |_| sync::dispatch(ctx, action.clone())
        >
            {label}
        </button>
    }
}

fn buyable_module(ctx: SessionContext, game: RwSignal<GameState>, id: u32) -> AnyView {
    let price = game.with(|g| g.current_tile_price());
    view! {
        <div class="module buyable">
            <p>{format!("Unclaimed tile — price {price}")}</p>
            {action_button(
                ctx,
                "Buy tile".to_string(),
                PlayerAction::BuyTile { tile_id: id },
            )}
        </div>
    }
    .into_any()
}

fn empty_module(
    ctx: SessionContext,
    game: RwSignal<GameState>,
    id: u32,
    terrain: Terrain,
) -> AnyView {
    if let Some(name) = game.with(|g| g.pending_building.clone()) {
        let price = game.with(|g| {
            g.buildings
                .get(&name)
                .map(|spec| spec.purchase_price())
                .unwrap_or_default()
        });
        return view! {
            <div class="module build-confirm">
                <p>{format!("Build {name} for {price}?")}</p>
                {action_button(
                    ctx,
                    "Build".to_string(),
                    PlayerAction::BuyBuilding { tile_id: id, building: name },
                )}
                <button class="back" on:click=move |_| {
                    game.update(|g| g.pending_building = None)
                }>
                    "Back"
                </button>
            </div>
        }
        .into_any();
    }

    let options = game.with(|g| g.building_pref.get(&terrain).cloned().unwrap_or_default());
    view! {
        <div class="module empty">
            <p>{format!("Empty {} tile — pick a plant", terrain.name())}</p>
            <ul class="plant-list">
                {options
                    .into_iter()
                    .map(|name| {
                        let price = game.with(|g| {
                            g.buildings
                                .get(&name)
                                .map(|spec| spec.purchase_price())
                                .unwrap_or_default()
                        });
                        let label = format!("{name} ({price})");
                        view! {
                            <li>
                                <button on:click=move |_| {
                                    let pick = name.clone();
                                    game.update(|g| g.pending_building = Some(pick));
                                }>
                                    {label}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
    .into_any()
}

fn occupied_module(
    ctx: SessionContext,
    game: RwSignal<GameState>,
    id: u32,
    building: Building,
) -> AnyView {
    let upgrade_price = game.with(|g| {
        g.buildings
            .get(&building.name)
            .map(|spec| spec.upgrade_price(building.level))
            .unwrap_or_default()
    });
    view! {
        <div class="module occupied">
            <p>{format!("{} — level {}", building.name, building.level)}</p>
            <p class="durability">{format!("Durability {}", building.durability)}</p>
            {action_button(
                ctx,
                format!("Upgrade ({upgrade_price})"),
                PlayerAction::UpgradeBuilding { tile_id: id },
            )}
        </div>
    }
    .into_any()
}
