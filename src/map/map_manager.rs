//! The board: all hexes, their adjacency and cached hex distances
//!
//! Adjacency is built once by [`MapManager::finish_configuration`] and is
//! static afterwards, so distances computed from a hex stay valid for the
//! lifetime of the map.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};
use sorted_vec::SortedSet;
use std::collections::HashMap;

use super::hex::MapHex;
use super::hex_side::HexSide;
use super::hex_sides_set::HexSidesSet;
use super::orientation::MapOrientation;
use super::stop_type::{AccessSpec, StopTypeDefaults};
use super::tile::TileManager;
use super::token::{BaseToken, BonusToken};
use super::track::TrackConfig;
use super::types::{CompanyId, HexCoordinates, StationNumber, StopId, TileId, TokenId};

/// Everything needed to place one hex on the board
#[derive(Debug, Clone, Default)]
pub struct HexSetup {
    pub name: String,
    pub tile: TileId,
    pub rotation: i32,
    pub cost: i32,
    /// Board side numbers across which no track may be built
    pub impassable: Vec<i32>,
    pub access: Option<AccessSpec>,
    pub label: Option<String>,
}

/// Owns the hex map of one game and answers topology queries on it
#[derive(Debug)]
pub struct MapManager {
    orientation: MapOrientation,
    tiles: TileManager,
    stop_types: StopTypeDefaults,

    hexes: HashMap<HexCoordinates, MapHex>,
    names: HashMap<String, HexCoordinates>,

    /// (hex, side) -> neighbour across that side
    adjacency: HashMap<(HexCoordinates, HexSide), HexCoordinates>,

    /// Directed hex graph mirroring `adjacency`, edges weighted by side
    graph: DiGraph<HexCoordinates, HexSide>,
    hex_to_node: HashMap<HexCoordinates, NodeIndex>,
    node_to_hex: HashMap<NodeIndex, HexCoordinates>,

    tile_costs: SortedSet<i32>,

    /// source hex -> (reachable hex -> hop count)
    distance_cache: HashMap<HexCoordinates, HashMap<HexCoordinates, u32>>,

    configured: bool,
}

impl MapManager {
    pub fn new(orientation: MapOrientation, tiles: TileManager, stop_types: StopTypeDefaults) -> Self {
        Self {
            orientation,
            tiles,
            stop_types,
            hexes: HashMap::new(),
            names: HashMap::new(),
            adjacency: HashMap::new(),
            graph: DiGraph::new(),
            hex_to_node: HashMap::new(),
            node_to_hex: HashMap::new(),
            tile_costs: SortedSet::new(),
            distance_cache: HashMap::new(),
            configured: false,
        }
    }

    pub fn orientation(&self) -> &MapOrientation {
        &self.orientation
    }

    pub fn tiles(&self) -> &TileManager {
        &self.tiles
    }

    pub fn stop_types(&self) -> &StopTypeDefaults {
        &self.stop_types
    }

    /// Places a hex with its preprinted tile
    pub fn add_hex(&mut self, setup: &HexSetup) -> Result<HexCoordinates> {
        if self.configured {
            bail!("Cannot add hex {} after the map is configured", setup.name);
        }
        let coordinates = self.orientation.parse_hex_name(&setup.name)?;
        if self.hexes.contains_key(&coordinates) {
            bail!("Duplicate hex {}", setup.name);
        }
        let tile = self
            .tiles
            .get(setup.tile)
            .ok_or_else(|| anyhow!("Hex {} refers to unknown tile {}", setup.name, setup.tile))?;
        let stop_type = self
            .stop_types
            .parse_stop(&setup.name, setup.access.as_ref())?;
        let impassable: HexSidesSet = setup.impassable.iter().map(|n| HexSide::get(*n)).collect();

        let hex = MapHex::new(
            coordinates,
            &setup.name,
            setup.label.clone(),
            tile,
            HexSide::get(setup.rotation),
            setup.cost,
            stop_type,
            impassable,
            &self.stop_types,
        );
        self.hexes.insert(coordinates, hex);
        self.names.insert(setup.name.clone(), coordinates);
        Ok(coordinates)
    }

    /// Builds the adjacency table; call once after all hexes are added
    ///
    /// Sides without a hex across them become invalid. Impassable sides are
    /// mirrored onto the neighbour and left out of the adjacency.
    pub fn finish_configuration(&mut self) {
        let mut coordinates: Vec<HexCoordinates> = self.hexes.keys().copied().collect();
        coordinates.sort();

        let declared: Vec<(HexCoordinates, HexSide)> = coordinates
            .iter()
            .flat_map(|c| {
                self.hexes[c]
                    .impassable_sides()
                    .iter()
                    .map(move |side| (*c, side))
            })
            .collect();
        for (origin, side) in declared {
            let across = self.orientation.get_adjacent_coordinates(origin, side);
            match self.hexes.get_mut(&across) {
                Some(neighbour) if !neighbour.is_impassable_side(side.opposite()) => {
                    warn!(
                        "Impassable {} of {} not mirrored on {}, adding it",
                        side,
                        origin,
                        neighbour.name()
                    );
                    neighbour.add_impassable_side(side.opposite());
                }
                Some(_) => {}
                None => warn!("Impassable {} of {} leads off the board", side, origin),
            }
        }

        self.adjacency.clear();
        self.graph = DiGraph::new();
        self.hex_to_node.clear();
        self.node_to_hex.clear();
        self.distance_cache.clear();
        for c in &coordinates {
            let node = self.graph.add_node(*c);
            self.hex_to_node.insert(*c, node);
            self.node_to_hex.insert(node, *c);
        }

        for c in &coordinates {
            for side in HexSide::ALL {
                let across = self.orientation.get_adjacent_coordinates(*c, side);
                if !self.hexes.contains_key(&across) {
                    if let Some(hex) = self.hexes.get_mut(c) {
                        hex.add_invalid_side(side);
                    }
                    debug!("{} of {} is invalid", side, c);
                    continue;
                }
                if self.hexes[c].is_impassable_side(side) {
                    debug!("{} of {} is impassable", side, c);
                    continue;
                }
                self.adjacency.insert((*c, side), across);
                self.graph
                    .add_edge(self.hex_to_node[c], self.hex_to_node[&across], side);
            }
        }

        self.tile_costs = SortedSet::new();
        for hex in self.hexes.values() {
            if hex.cost() > 0 {
                self.tile_costs.push(hex.cost());
            }
        }

        self.configured = true;
        info!(
            "Map configured: {} hexes, {} adjacencies",
            self.hexes.len(),
            self.adjacency.len()
        );
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn hex_count(&self) -> usize {
        self.hexes.len()
    }

    pub fn adjacency_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn hexes(&self) -> impl Iterator<Item = &MapHex> {
        self.hexes.values()
    }

    pub fn get_hex(&self, coordinates: HexCoordinates) -> Option<&MapHex> {
        self.hexes.get(&coordinates)
    }

    pub fn get_hex_mut(&mut self, coordinates: HexCoordinates) -> Option<&mut MapHex> {
        self.hexes.get_mut(&coordinates)
    }

    pub fn hex_by_name(&self, name: &str) -> Option<&MapHex> {
        self.names.get(name).and_then(|c| self.hexes.get(c))
    }

    /// Coordinates of a named hex on this board
    pub fn locate(&self, name: &str) -> Result<HexCoordinates> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("Unknown hex {name}"))
    }

    pub fn hex_name(&self, coordinates: HexCoordinates) -> String {
        self.hexes
            .get(&coordinates)
            .map(|hex| hex.name().to_string())
            .unwrap_or_else(|| self.orientation.hex_name(coordinates))
    }

    /// The hex across `side`, if there is one and the side is passable
    pub fn get_neighbour(&self, hex: HexCoordinates, side: HexSide) -> Option<HexCoordinates> {
        self.adjacency.get(&(hex, side)).copied()
    }

    /// All neighbours in side order
    pub fn neighbours(&self, hex: HexCoordinates) -> Vec<(HexSide, HexCoordinates)> {
        HexSide::ALL
            .into_iter()
            .filter_map(|side| self.get_neighbour(hex, side).map(|n| (side, n)))
            .collect()
    }

    /// Terrain costs on the map, ascending and distinct
    pub fn tile_costs(&self) -> Vec<i32> {
        self.tile_costs.iter().copied().collect()
    }

    fn distances_from(&mut self, source: HexCoordinates) -> Option<&HashMap<HexCoordinates, u32>> {
        if !self.distance_cache.contains_key(&source) {
            let node = *self.hex_to_node.get(&source)?;
            let row: HashMap<HexCoordinates, u32> = dijkstra(&self.graph, node, None, |_| 1u32)
                .into_iter()
                .filter_map(|(n, hops)| self.node_to_hex.get(&n).map(|hex| (*hex, hops)))
                .collect();
            debug!("Distances from {} cached for {} hexes", source, row.len());
            self.distance_cache.insert(source, row);
        }
        self.distance_cache.get(&source)
    }

    /// Fewest hex steps between two hexes, `None` if unreachable
    pub fn get_hex_distance(&mut self, a: HexCoordinates, b: HexCoordinates) -> Option<u32> {
        if a == b {
            return self.hexes.contains_key(&a).then_some(0);
        }
        if let Some(hops) = self.distance_cache.get(&b).and_then(|row| row.get(&a)) {
            return Some(*hops);
        }
        self.distances_from(a)?.get(&b).copied()
    }

    /// Distinct, ascending distances from `hex` to every other hex that
    /// still has stops
    pub fn get_city_distances(&mut self, hex: HexCoordinates) -> Vec<u32> {
        let Some(row) = self.distances_from(hex).cloned() else {
            return Vec::new();
        };
        let mut distances = SortedSet::new();
        for (target, hops) in row {
            if target == hex {
                continue;
            }
            if self.hexes.get(&target).is_some_and(MapHex::has_stops) {
                distances.push(hops);
            }
        }
        distances.iter().copied().collect()
    }

    pub fn get_stop_distance(&mut self, a: StopId, b: StopId) -> Option<u32> {
        self.get_hex_distance(a.hex, b.hex)
    }

    /// Tracks currently on a hex, in board sides
    pub fn current_tracks(&self, hex: HexCoordinates) -> Option<TrackConfig> {
        let hex = self.hexes.get(&hex)?;
        let tile = self.tiles.get(hex.current_tile())?;
        Some(hex.current_tracks(tile))
    }

    pub fn lay_tile(
        &mut self,
        hex: HexCoordinates,
        tile: TileId,
        rotation: HexSide,
        station_mapping: &HashMap<StationNumber, StationNumber>,
    ) -> Result<()> {
        let tile = self
            .tiles
            .get(tile)
            .ok_or_else(|| anyhow!("Unknown tile {tile}"))?;
        let map_hex = self
            .hexes
            .get_mut(&hex)
            .ok_or_else(|| anyhow!("Unknown hex {hex}"))?;
        map_hex
            .lay_tile(tile, rotation, station_mapping, &self.stop_types)
            .with_context(|| format!("Laying tile {} on {}", tile.id(), map_hex.name()))?;
        debug!("Tile {} laid on {} with {}", tile.id(), map_hex.name(), rotation);
        Ok(())
    }

    pub fn downgrade_station(&mut self, hex: HexCoordinates, station: StationNumber) -> Result<()> {
        let map_hex = self
            .hexes
            .get_mut(&hex)
            .ok_or_else(|| anyhow!("Unknown hex {hex}"))?;
        let tile = self
            .tiles
            .get(map_hex.current_tile())
            .ok_or_else(|| anyhow!("Unknown tile {}", map_hex.current_tile()))?;
        map_hex.downgrade_station(tile, station)
    }

    pub fn place_token(&mut self, stop: StopId, token: BaseToken) -> Result<()> {
        self.hexes
            .get_mut(&stop.hex)
            .ok_or_else(|| anyhow!("Unknown hex {}", stop.hex))?
            .place_token(stop.number, token)
    }

    pub fn remove_token(&mut self, hex: HexCoordinates, token: TokenId) -> Option<BaseToken> {
        self.hexes.get_mut(&hex)?.remove_token(token)
    }

    pub fn place_bonus_token(&mut self, hex: HexCoordinates, token: BonusToken) -> Result<()> {
        self.hexes
            .get_mut(&hex)
            .ok_or_else(|| anyhow!("Unknown hex {hex}"))?
            .add_bonus_token(token);
        Ok(())
    }

    /// Reserves stop `city` of `hex` as the home of `company`
    pub fn register_home(&mut self, company: CompanyId, hex: &str, city: u32) -> Result<()> {
        let coordinates = self.locate(hex)?;
        self.hexes
            .get_mut(&coordinates)
            .ok_or_else(|| anyhow!("Unknown hex {hex}"))?
            .add_home(company, city)
    }

    pub fn register_destination(&mut self, company: CompanyId, hex: &str) -> Result<()> {
        let coordinates = self.locate(hex)?;
        if let Some(map_hex) = self.hexes.get_mut(&coordinates) {
            map_hex.add_destination(company);
        }
        Ok(())
    }

    pub fn home_hexes(&self, company: &CompanyId) -> Vec<HexCoordinates> {
        let mut homes: Vec<HexCoordinates> = self
            .hexes
            .values()
            .filter(|hex| hex.is_home_of(company))
            .map(MapHex::coordinates)
            .collect();
        homes.sort();
        homes
    }

    pub fn destination_hexes(&self, company: &CompanyId) -> Vec<HexCoordinates> {
        let mut destinations: Vec<HexCoordinates> = self
            .hexes
            .values()
            .filter(|hex| hex.is_destination_of(company))
            .map(MapHex::coordinates)
            .collect();
        destinations.sort();
        destinations
    }
}
