//! Map topology engine
//!
//! Hex sides, tiles and their tracks, stops and their access rules, and the
//! board-wide adjacency and distance queries built on top of them. Everything
//! here is independent of the rest of the game and can be driven from tests
//! or the headless CLI.

mod hex;
mod hex_side;
mod hex_sides_set;
mod map_manager;
mod orientation;
mod station;
mod stop;
mod stop_type;
mod tile;
mod token;
mod track;
mod types;

pub use hex::{HomeReservation, MapHex};
pub use hex_side::{HexSide, SIDE_COUNT};
pub use hex_sides_set::{HexSidesSet, HexSidesSetBuilder};
pub use map_manager::{HexSetup, MapManager};
pub use orientation::{MapOrientation, TileOrientation};
pub use station::{Station, StationKind};
pub use stop::{AccessLayers, Stop};
pub use stop_type::{
    resolve, AccessSpec, Loop, RunThrough, RunTo, Score, StopType, StopTypeDefaults, CITY, NULL,
    OFFMAP, TOWN,
};
pub use tile::{Tile, TileColour, TileManager};
pub use token::{BaseToken, BonusToken};
pub use track::{Track, TrackConfig, TrackPoint};
pub use types::{CompanyId, HexCoordinates, StationNumber, StopId, TileId, TokenId};
