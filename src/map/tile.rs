//! Tile definitions and the tile registry

use anyhow::{bail, Context, Result};
use std::collections::HashMap;

use super::hex_side::HexSide;
use super::hex_sides_set::HexSidesSet;
use super::station::Station;
use super::stop_type::StopType;
use super::track::{Track, TrackConfig, TrackPoint};
use super::types::{StationNumber, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileColour {
    Red,
    Fixed,
    White,
    Yellow,
    Green,
    Brown,
    Grey,
}

impl TileColour {
    pub fn parse(text: &str) -> Result<Self> {
        let colour = match text.trim().to_ascii_lowercase().as_str() {
            "red" => TileColour::Red,
            "fixed" => TileColour::Fixed,
            "white" => TileColour::White,
            "yellow" => TileColour::Yellow,
            "green" => TileColour::Green,
            "brown" => TileColour::Brown,
            "grey" | "gray" => TileColour::Grey,
            _ => bail!("Unknown tile colour '{text}'"),
        };
        Ok(colour)
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    name: String,
    colour: TileColour,
    stations: Vec<Station>,
    /// Tracks of the tile, indexed by rotation
    rotated_tracks: [TrackConfig; 6],
    stop_type: StopType,
}

impl Tile {
    /// Builds a tile, parsing its track segments from `side<N>`/`city<N>` pairs
    pub fn build(
        id: TileId,
        name: &str,
        colour: TileColour,
        stations: Vec<Station>,
        track_specs: &[(String, String)],
        stop_type: StopType,
    ) -> Result<Tile> {
        let mut seen = Vec::with_capacity(stations.len());
        for station in &stations {
            if station.number().0 == 0 {
                bail!("Tile {id} has a station numbered 0, stations start at 1");
            }
            if seen.contains(&station.number()) {
                bail!("Tile {id} defines station {} twice", station.number());
            }
            seen.push(station.number());
        }

        let mut tile = Tile {
            id,
            name: name.to_string(),
            colour,
            stations,
            rotated_tracks: Default::default(),
            stop_type,
        };

        let mut tracks = Vec::with_capacity(track_specs.len());
        for (from, to) in track_specs {
            let start = TrackPoint::parse(&tile, from).with_context(|| format!("In tile {id}"))?;
            let end = TrackPoint::parse(&tile, to).with_context(|| format!("In tile {id}"))?;
            tracks.push(Track::new(start, end));
        }
        let base = TrackConfig::new(tracks);
        tile.rotated_tracks = HexSide::ALL.map(|rotation| base.create_by_rotation(rotation));
        Ok(tile)
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colour(&self) -> TileColour {
        self.colour
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get_station(&self, number: StationNumber) -> Option<&Station> {
        self.stations.iter().find(|station| station.number() == number)
    }

    pub fn has_stations(&self) -> bool {
        !self.stations.is_empty()
    }

    pub fn stop_type(&self) -> &StopType {
        &self.stop_type
    }

    pub fn base_tracks(&self) -> &TrackConfig {
        self.tracks(HexSide::DEFAULT_ROTATION)
    }

    /// Tracks as laid on the board with the given rotation
    pub fn tracks(&self, rotation: HexSide) -> &TrackConfig {
        &self.rotated_tracks[rotation.number() as usize]
    }

    pub fn track_sides(&self, rotation: HexSide) -> HexSidesSet {
        self.tracks(rotation).track_sides()
    }
}

/// Owns every tile definition of a game
#[derive(Debug, Clone, Default)]
pub struct TileManager {
    tiles: HashMap<TileId, Tile>,
}

impl TileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tile(&mut self, tile: Tile) -> Result<()> {
        if self.tiles.contains_key(&tile.id) {
            bail!("Duplicate tile id {}", tile.id);
        }
        self.tiles.insert(tile.id, tile);
        Ok(())
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}
