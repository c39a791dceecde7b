pub mod catalog;
pub mod colors;
pub mod outcome;
pub mod snapshot;
pub mod tile;

pub use catalog::{BuildingCatalog, BuildingPreferences, BuildingSpec, tile_price};
pub use outcome::{GameOutcome, evaluate_outcome};
pub use snapshot::*;
pub use tile::*;
