use crate::tile::{Terrain, TileStatus};

/// Base map palette per terrain.
pub const fn terrain_color(terrain: Terrain) -> (u8, u8, u8) {
    match terrain {
        Terrain::Sea => (0x00, 0x33, 0x66),
        Terrain::River => (0x66, 0xcc, 0xff),
        Terrain::Forest => (0x00, 0x66, 0x00),
        Terrain::Plain => (0x99, 0xff, 0x66),
        Terrain::Desert => (0xff, 0xcc, 0x00),
        Terrain::Mountain => (0x65, 0x43, 0x21),
    }
}

const LOCKED_SHADE: i16 = -80;
const BUYABLE_SHADE: i16 = -40;

/// Shift every channel by `delta`, clamped to the valid range.
pub fn shade((r, g, b): (u8, u8, u8), delta: i16) -> (u8, u8, u8) {
    let apply = |channel: u8| (channel as i16 + delta).clamp(0, 255) as u8;
    (apply(r), apply(g), apply(b))
}

/// Fill color for a tile. A pure function of terrain and status: Locked is
/// heavily darkened, Buyable moderately, Empty and Occupied keep the base
/// terrain color (the building itself does not change the tile tint).
pub fn tile_fill(terrain: Terrain, status: &TileStatus) -> (u8, u8, u8) {
    let base = terrain_color(terrain);
    match status {
        TileStatus::Locked => shade(base, LOCKED_SHADE),
        TileStatus::Buyable => shade(base, BUYABLE_SHADE),
        TileStatus::Empty | TileStatus::Occupied { .. } => base,
    }
}

/// Format RGB as a CSS color string.
pub fn rgb_css((r, g, b): (u8, u8, u8)) -> String {
    format!("rgb({r},{g},{b})")
}
