use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use hexawatt_shared::colors::{rgb_css, tile_fill};

use crate::app::{LastHexSize, ResizeEpoch, Selected};
use crate::geometry;
use crate::state::GameState;

/// Hex size as a fraction of the square canvas edge.
const HEX_SIZE_DIVISOR: f64 = 12.0;
const SELECTED_STROKE_WIDTH: f64 = 6.0;
const BASE_STROKE_WIDTH: f64 = 1.0;

struct ResizeBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn()>,
}

thread_local! {
    static RESIZE_BINDING: RefCell<Option<ResizeBinding>> = const { RefCell::new(None) };
}

/// Canvas map renderer plus the pointer input routing that feeds the
/// selection signal. Holds no state of its own beyond the last-used hex
/// size, which the click handler needs for the inverse mapping.
#[component]
pub fn MapCanvas() -> impl IntoView {
    let game: RwSignal<GameState> = expect_context();
    let Selected(selected) = expect_context();
    let LastHexSize(last_hex_size) = expect_context();
    let ResizeEpoch(resize_epoch) = expect_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Window resizes re-enter the draw effect through the epoch signal.
    Effect::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };

        RESIZE_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "resize",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler = Closure::<dyn Fn()>::new(move || {
            resize_epoch.update(|epoch| *epoch = epoch.wrapping_add(1));
        });
        if window
            .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            RESIZE_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(ResizeBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    // Draw effect: a pure projection of the store, re-run on every state,
    // selection, or layout change.
    Effect::new(move || {
        resize_epoch.track();
        selected.track();
        game.track();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        redraw(&canvas, game, selected.get_untracked(), last_hex_size);
    });

    let on_click = move |e: MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }

        // The canvas backing store and its CSS box can disagree; scale
        // client coordinates into canvas pixel space.
        let scale_x = canvas.width() as f64 / rect.width();
        let scale_y = canvas.height() as f64 / rect.height();
        let x = (e.client_x() as f64 - rect.left()) * scale_x;
        let y = (e.client_y() as f64 - rect.top()) * scale_y;

        let size = last_hex_size.get_untracked();
        let hit = game.with_untracked(|game| {
            geometry::unproject(
                (x, y),
                game.tiles.iter().map(|entry| (entry.tile.id, entry.center)),
                size,
            )
        });

        // The set() notifies unconditionally, so every click yields
        // exactly one redraw and one panel refresh.
        selected.set(next_selection(selected.get_untracked(), hit));
    };

    view! {
        <div
            class="canvas-shell"
            style="position: relative; width: 100%; height: 100%; overflow: hidden;"
        >
            <canvas node_ref=canvas_ref on:click=on_click style="display: block;" />
        </div>
    }
}

fn redraw(
    canvas: &HtmlCanvasElement,
    game: RwSignal<GameState>,
    selected: Option<u32>,
    last_hex_size: RwSignal<f64>,
) {
    // Square backing store fitted to the container before any draw call.
    if let Some(parent) = canvas.parent_element() {
        let edge = parent.client_width().min(parent.client_height()).max(0) as u32;
        if canvas.width() != edge {
            canvas.set_width(edge);
        }
        if canvas.height() != edge {
            canvas.set_height(edge);
        }
    }

    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    let size = width.min(height) / HEX_SIZE_DIVISOR;
    let origin = (width / 2.0, height / 2.0);

    // The pixel write-back is a cache update, not a state change; it must
    // not re-notify the draw effect.
    game.update_untracked(|game| {
        for entry in &mut game.tiles {
            let center = geometry::project(entry.tile.q, entry.tile.r, origin, size);
            let fill = tile_fill(entry.tile.terrain, &entry.tile.status);
            draw_hex(&ctx, center, size, fill, selected == Some(entry.tile.id));
            entry.center = Some(center);
        }
    });

    last_hex_size.set(size);
}

fn draw_hex(
    ctx: &CanvasRenderingContext2d,
    center: (f64, f64),
    size: f64,
    fill: (u8, u8, u8),
    selected: bool,
) {
    trace_hex(ctx, center, size);
    ctx.set_fill_style_str(&rgb_css(fill));
    ctx.fill();

    ctx.set_line_width(if selected {
        SELECTED_STROKE_WIDTH
    } else {
        BASE_STROKE_WIDTH
    });
    ctx.set_stroke_style_str("#000000");
    ctx.stroke();
}

fn trace_hex(ctx: &CanvasRenderingContext2d, center: (f64, f64), radius: f64) {
    ctx.begin_path();
    for (i, (x, y)) in geometry::hex_vertices(center, radius).into_iter().enumerate() {
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
}

/// Selection toggle rule: a miss or a repeat click deselects, anything
/// else selects the resolved tile.
fn next_selection(current: Option<u32>, hit: Option<u32>) -> Option<u32> {
    if hit.is_none() || hit == current {
        None
    } else {
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::next_selection;

    #[test]
    fn clicking_the_selected_tile_always_deselects() {
        assert_eq!(next_selection(Some(4), Some(4)), None);
        assert_eq!(next_selection(None, None), None);
    }

    #[test]
    fn misses_clear_and_hits_replace_the_selection() {
        assert_eq!(next_selection(Some(4), None), None);
        assert_eq!(next_selection(None, Some(2)), Some(2));
        assert_eq!(next_selection(Some(4), Some(2)), Some(2));
    }
}
