use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tile::Terrain;

/// Static per-type economics. Immutable for the session apart from `built`,
/// which counts purchases and drives the price curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    #[serde(default)]
    pub built: u32,
    pub buy_cost: i64,
    pub env_build_cost: f64,
    pub env_use_cost: f64,
    pub production: i64,
    pub durability: u32,
}

pub type BuildingCatalog = HashMap<String, BuildingSpec>;
pub type BuildingPreferences = HashMap<Terrain, Vec<String>>;

impl BuildingSpec {
    const fn base(buy_cost: i64) -> Self {
        Self {
            built: 0,
            buy_cost,
            env_build_cost: 1.0,
            env_use_cost: 0.1,
            production: 1,
            durability: 100,
        }
    }

    /// Purchase price scales with the number already built.
    pub fn purchase_price(&self) -> i64 {
        (self.buy_cost as f64 * (1.0 + self.built as f64 / 2.0)).round() as i64
    }

    /// Upgrade price scales only with the current level.
    pub fn upgrade_price(&self, level: u32) -> i64 {
        (self.buy_cost as f64 * ((level + 1) as f64).powf(1.5)).round() as i64
    }

    pub fn durability_at(&self, level: u32) -> u32 {
        (self.durability as f64 * (1.0 + level as f64 / 2.0)).round() as u32
    }

    pub fn production_at(&self, level: u32) -> i64 {
        (self.production as f64 * (1.0 + level as f64 / 2.0)).round() as i64
    }

    /// Per-production-pass environment usage.
    pub fn env_use_at(&self, level: u32) -> f64 {
        round_millis(self.env_use_cost * (1.0 + level as f64 / 5.0))
    }

    /// One-off environment impact of an upgrade to `level`.
    pub fn env_upgrade_cost(&self, level: u32) -> f64 {
        round_millis(self.env_use_cost * level as f64)
    }

    pub fn env_build_cost(&self) -> f64 {
        round_millis(self.env_build_cost)
    }
}

/// Current price of the next tile.
pub fn tile_price(base: f64, nb_bought_tiles: u32) -> i64 {
    (base * nb_bought_tiles as f64).round() as i64
}

/// Environment figures are kept to millibar precision.
fn round_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// The fixed roster of buildable plants.
pub fn default_catalog() -> BuildingCatalog {
    const NAMES: [&str; 16] = [
        // Fossil
        "Coal",
        "Offshore oil",
        "Fracking gas",
        "Lithium extraction",
        // Renewable
        "Hydro dam",
        "Geothermal",
        "Tidal",
        "Wood",
        // Green
        "Solar",
        "Wind",
        "Nuclear",
        "Gravity",
        // Alternative
        "Hydrogen",
        "Synthetic fuel",
        "Mirror plant",
        "Salinity gradient",
    ];

    NAMES
        .iter()
        .map(|name| (name.to_string(), BuildingSpec::base(100)))
        .collect()
}

/// Which plants each terrain supports.
pub fn building_preferences() -> BuildingPreferences {
    let prefs: [(Terrain, &[&str]); 6] = [
        (Terrain::Desert, &["Solar", "Mirror plant"]),
        (Terrain::Plain, &["Wind", "Fracking gas", "Hydrogen"]),
        (Terrain::Forest, &["Coal", "Wood", "Synthetic fuel"]),
        (
            Terrain::Mountain,
            &["Lithium extraction", "Geothermal", "Gravity"],
        ),
        (Terrain::Sea, &["Offshore oil", "Tidal", "Salinity gradient"]),
        (Terrain::River, &["Hydro dam", "Nuclear"]),
    ];

    prefs
        .iter()
        .map(|(terrain, names)| {
            (
                *terrain,
                names.iter().map(|name| name.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{building_preferences, default_catalog, tile_price};
    use crate::tile::Terrain;

    #[test]
    fn catalog_has_all_sixteen_plants() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 16);
        for spec in catalog.values() {
            assert_eq!(spec.built, 0);
            assert_eq!(spec.buy_cost, 100);
        }
    }

    #[test]
    fn every_preferred_plant_exists_in_the_catalog() {
        let catalog = default_catalog();
        for names in building_preferences().values() {
            for name in names {
                assert!(catalog.contains_key(name), "unknown plant {name}");
            }
        }
    }

    #[test]
    fn every_terrain_has_preferences() {
        let prefs = building_preferences();
        for terrain in Terrain::ALL {
            assert!(!prefs[&terrain].is_empty());
        }
    }

    #[test]
    fn purchase_price_scales_with_built_count() {
        let mut spec = default_catalog().remove("Coal").expect("coal spec");
        assert_eq!(spec.purchase_price(), 100);
        spec.built = 1;
        assert_eq!(spec.purchase_price(), 150);
        spec.built = 3;
        assert_eq!(spec.purchase_price(), 250);
    }

    #[test]
    fn upgrade_price_scales_with_level_only() {
        let spec = default_catalog().remove("Wind").expect("wind spec");
        // 100 * 2^1.5 and 100 * 3^1.5
        assert_eq!(spec.upgrade_price(1), 283);
        assert_eq!(spec.upgrade_price(2), 520);
    }

    #[test]
    fn env_figures_are_rounded_to_millis() {
        let spec = default_catalog().remove("Tidal").expect("tidal spec");
        assert_eq!(spec.env_use_at(1), 0.12);
        assert_eq!(spec.env_use_at(3), 0.16);
        assert_eq!(spec.env_upgrade_cost(2), 0.2);
    }

    #[test]
    fn tile_price_is_base_times_bought_count() {
        assert_eq!(tile_price(10.0, 0), 0);
        assert_eq!(tile_price(10.0, 3), 30);
        assert_eq!(tile_price(12.5, 3), 38);
    }
}
