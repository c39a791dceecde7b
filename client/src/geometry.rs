/// Hit radius as a fraction of the hex size: clicks slightly outside the
/// inscribed circle still land on the tile.
pub const HIT_TOLERANCE: f64 = 1.1;

/// Flat-top axial-to-pixel projection. The same transform drives both the
/// render pass and (through the cached centers) hit-testing, so it must
/// never be re-derived elsewhere.
pub fn project(q: i32, r: i32, origin: (f64, f64), size: f64) -> (f64, f64) {
    (
        origin.0 + size * 1.5 * q as f64,
        origin.1 + size * 3.0_f64.sqrt() * (r as f64 + q as f64 / 2.0),
    )
}

/// Vertex ring of a flat-top hexagon, 60° steps starting on the +x axis.
pub fn hex_vertices(center: (f64, f64), radius: f64) -> [(f64, f64); 6] {
    std::array::from_fn(|i| {
        let angle = i as f64 * std::f64::consts::PI / 3.0;
        (
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        )
    })
}

/// Resolve the tile under a canvas-space point from the centers cached by
/// the last render pass. Scans in collection order and returns the FIRST
/// tile within `HIT_TOLERANCE * size`; overlap ties go to the earlier
/// tile, so the collection order is part of the contract. Tiles that have
/// never been drawn carry no center and are skipped.
pub fn unproject<I>(point: (f64, f64), tiles: I, size: f64) -> Option<u32>
where
    I: IntoIterator<Item = (u32, Option<(f64, f64)>)>,
{
    let hit_radius = size * HIT_TOLERANCE;
    for (id, center) in tiles {
        let Some((x, y)) = center else {
            continue;
        };
        if (point.0 - x).hypot(point.1 - y) <= hit_radius {
            return Some(id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{HIT_TOLERANCE, hex_vertices, project, unproject};

    const ORIGIN: (f64, f64) = (240.0, 240.0);
    const SIZE: f64 = 40.0;

    fn placed(coords: &[(i32, i32)]) -> Vec<(u32, Option<(f64, f64)>)> {
        coords
            .iter()
            .enumerate()
            .map(|(id, &(q, r))| (id as u32, Some(project(q, r, ORIGIN, SIZE))))
            .collect()
    }

    #[test]
    fn project_matches_the_flat_top_transform() {
        assert_eq!(project(0, 0, ORIGIN, SIZE), ORIGIN);

        let (x, y) = project(1, 0, ORIGIN, SIZE);
        assert_eq!(x, 300.0);
        assert!((y - 274.641).abs() < 1e-3);

        let (x, y) = project(0, -1, ORIGIN, SIZE);
        assert_eq!(x, 240.0);
        assert!((y - (240.0 - 40.0 * 3.0_f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn every_projected_center_unprojects_to_its_own_tile() {
        let coords = [(0, 0), (1, 0), (0, 1), (-1, 1), (2, -1)];
        let tiles = placed(&coords);
        for &(id, center) in &tiles {
            let center = center.expect("placed");
            assert_eq!(unproject(center, tiles.clone(), SIZE), Some(id));
        }
    }

    #[test]
    fn scenario_click_on_and_off_the_map() {
        // 480x480 canvas: origin (240,240), size 40, tile at axial (1,0).
        let tiles = placed(&[(0, 0), (1, 0)]);
        assert_eq!(unproject((300.0, 275.0), tiles.clone(), SIZE), Some(1));
        assert_eq!(unproject((400.0, 400.0), tiles, SIZE), None);
    }

    #[test]
    fn points_beyond_the_tolerance_miss() {
        let tiles = vec![(0u32, Some((100.0, 100.0)))];
        let inside = (100.0 + SIZE * HIT_TOLERANCE - 0.1, 100.0);
        let outside = (100.0 + SIZE * HIT_TOLERANCE + 0.1, 100.0);
        assert_eq!(unproject(inside, tiles.clone(), SIZE), Some(0));
        assert_eq!(unproject(outside, tiles, SIZE), None);
    }

    #[test]
    fn overlap_ties_resolve_to_collection_order() {
        let tiles = vec![
            (7u32, Some((100.0, 100.0))),
            (3u32, Some((110.0, 100.0))),
        ];
        // Both centers are within the hit radius of the probe point; the
        // earlier entry wins even though the later one is closer.
        assert_eq!(unproject((108.0, 100.0), tiles, SIZE), Some(7));
    }

    #[test]
    fn undrawn_tiles_are_skipped_and_empty_lists_miss() {
        let tiles = vec![(0u32, None), (1u32, Some((100.0, 100.0)))];
        assert_eq!(unproject((100.0, 100.0), tiles, SIZE), Some(1));
        assert_eq!(unproject((0.0, 0.0), Vec::new(), SIZE), None);
    }

    #[test]
    fn hexagon_vertices_sit_on_the_radius() {
        let verts = hex_vertices((50.0, 60.0), 10.0);
        assert_eq!(verts[0], (60.0, 60.0));
        for (x, y) in verts {
            let d = (x - 50.0).hypot(y - 60.0);
            assert!((d - 10.0).abs() < 1e-9);
        }
    }
}
