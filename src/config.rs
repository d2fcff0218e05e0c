//! Map definition files
//!
//! A map definition is a YAML document describing the grid orientation, the
//! named stop types, the tile set, the hexes with their preprinted tiles and
//! the company home and destination hexes. [`MapDefinition::build`] turns it
//! into a configured [`MapManager`].

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::map::{
    AccessSpec, CompanyId, HexSetup, MapManager, MapOrientation, Station, StationKind,
    StationNumber, StopTypeDefaults, Tile, TileColour, TileId, TileManager,
};

/// The board shipped with the binary
pub const DEMO_MAP: &str = include_str!("../data/demo_map.yaml");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrientationDefinition {
    pub tile_orientation: Option<String>,
    pub letter_orientation: Option<String>,
    pub even: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationDefinition {
    /// `city<N>`
    pub id: String,
    pub kind: String,
    #[serde(default = "default_slots")]
    pub slots: usize,
    #[serde(default)]
    pub value: i32,
    pub access: Option<AccessSpec>,
}

fn default_slots() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackDefinition {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileDefinition {
    pub id: i32,
    pub name: Option<String>,
    pub colour: String,
    #[serde(default)]
    pub stations: Vec<StationDefinition>,
    #[serde(default)]
    pub tracks: Vec<TrackDefinition>,
    pub access: Option<AccessSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HexDefinition {
    pub name: String,
    pub tile: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub impassable: Vec<i32>,
    pub access: Option<AccessSpec>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyHexDefinition {
    pub company: String,
    pub hex: String,
    pub city: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapDefinition {
    #[serde(default)]
    pub orientation: OrientationDefinition,
    #[serde(default)]
    pub stop_types: Vec<AccessSpec>,
    #[serde(default)]
    pub tiles: Vec<TileDefinition>,
    #[serde(default)]
    pub hexes: Vec<HexDefinition>,
    #[serde(default)]
    pub homes: Vec<CompanyHexDefinition>,
    #[serde(default)]
    pub destinations: Vec<CompanyHexDefinition>,
}

fn parse_station_number(id: &str) -> Result<StationNumber> {
    id.trim()
        .strip_prefix("city")
        .and_then(|number| number.parse::<u32>().ok())
        .filter(|number| *number > 0)
        .map(StationNumber)
        .ok_or_else(|| anyhow!("Invalid station id '{id}'"))
}

impl MapDefinition {
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Malformed map definition")
    }

    pub fn build_tiles(&self, stop_types: &StopTypeDefaults) -> Result<TileManager> {
        let mut tiles = TileManager::new();
        for definition in &self.tiles {
            let owner = format!("tile {}", definition.id);
            let mut stations = Vec::with_capacity(definition.stations.len());
            for station in &definition.stations {
                let number = parse_station_number(&station.id).context(owner.clone())?;
                let kind = StationKind::parse(&station.kind).context(owner.clone())?;
                let stop_type = stop_types
                    .parse_stop(&format!("{owner}/{}", station.id), station.access.as_ref())?;
                stations.push(
                    Station::new(number, kind, station.slots, station.value).with_stop_type(stop_type),
                );
            }
            let track_pairs: Vec<(String, String)> = definition
                .tracks
                .iter()
                .map(|track| (track.from.clone(), track.to.clone()))
                .collect();
            let colour = TileColour::parse(&definition.colour).context(owner.clone())?;
            let stop_type = stop_types.parse_stop(&owner, definition.access.as_ref())?;
            let name = definition
                .name
                .clone()
                .unwrap_or_else(|| definition.id.to_string());
            let tile = Tile::build(
                TileId(definition.id),
                &name,
                colour,
                stations,
                &track_pairs,
                stop_type,
            )?;
            tiles.add_tile(tile)?;
        }
        Ok(tiles)
    }

    /// Builds and configures the map; any error aborts the whole setup
    pub fn build(&self) -> Result<MapManager> {
        let orientation = MapOrientation::create(
            self.orientation.tile_orientation.as_deref(),
            self.orientation.letter_orientation.as_deref(),
            self.orientation.even.as_deref(),
        )?;
        let stop_types = StopTypeDefaults::parse_defaults(&self.stop_types)?;
        let tiles = self.build_tiles(&stop_types)?;

        let mut map = MapManager::new(orientation, tiles, stop_types);
        for hex in &self.hexes {
            let setup = HexSetup {
                name: hex.name.clone(),
                tile: TileId(hex.tile),
                rotation: hex.rotation,
                cost: hex.cost,
                impassable: hex.impassable.clone(),
                access: hex.access.clone(),
                label: hex.label.clone(),
            };
            map.add_hex(&setup)
                .with_context(|| format!("In hex {}", hex.name))?;
        }
        map.finish_configuration();

        for home in &self.homes {
            map.register_home(CompanyId(home.company.clone()), &home.hex, home.city.unwrap_or(1))?;
        }
        for destination in &self.destinations {
            map.register_destination(CompanyId(destination.company.clone()), &destination.hex)?;
        }
        Ok(map)
    }
}

pub fn load_map(path: &Path) -> Result<MapManager> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read map definition {}", path.display()))?;
    MapDefinition::parse(&yaml)?
        .build()
        .with_context(|| format!("Invalid map definition {}", path.display()))
}

pub fn demo_map() -> Result<MapManager> {
    MapDefinition::parse(DEMO_MAP)?.build()
}
