//! A hex of the board: its current tile, stops, tokens and side flags

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use std::collections::HashMap;

use super::hex_side::HexSide;
use super::hex_sides_set::HexSidesSet;
use super::stop::{AccessLayers, Stop};
use super::stop_type::{StopType, StopTypeDefaults};
use super::station::Station;
use super::tile::Tile;
use super::token::{BaseToken, BonusToken};
use super::track::TrackConfig;
use super::types::{CompanyId, HexCoordinates, StationNumber, StopId, TileId, TokenId};

/// A company's reserved home station on this hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeReservation {
    pub company: CompanyId,
    pub city: u32,
}

#[derive(Debug, Clone)]
pub struct MapHex {
    coordinates: HexCoordinates,
    name: String,
    label: Option<String>,
    preprinted_tile: TileId,
    current_tile: TileId,
    rotation: HexSide,
    /// Terrain cost of the first tile lay
    cost: i32,
    stop_type: StopType,
    impassable_sides: HexSidesSet,
    invalid_sides: HexSidesSet,
    stops: Vec<Stop>,
    /// Tracks left behind by removing a station, until the next tile lay
    downgraded_tracks: Option<TrackConfig>,
    bonus_tokens: Vec<BonusToken>,
    homes: Vec<HomeReservation>,
    destinations: Vec<CompanyId>,
}

/// Builds the access layers of a stop bound to `station` of `tile`
fn access_layers(
    hex_type: &StopType,
    tile: &Tile,
    station: &Station,
    defaults: &StopTypeDefaults,
) -> AccessLayers {
    let kind_default = station
        .kind()
        .default_stop_type()
        .and_then(|name| defaults.get(name))
        .cloned()
        .unwrap_or_else(StopType::null);
    AccessLayers {
        hex: hex_type.clone(),
        tile: tile.stop_type().clone(),
        station: station.stop_type().clone(),
        kind_default,
    }
}

impl MapHex {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        coordinates: HexCoordinates,
        name: &str,
        label: Option<String>,
        tile: &Tile,
        rotation: HexSide,
        cost: i32,
        stop_type: StopType,
        impassable_sides: HexSidesSet,
        defaults: &StopTypeDefaults,
    ) -> Self {
        let stops = tile
            .stations()
            .iter()
            .map(|station| {
                let id = StopId {
                    hex: coordinates,
                    number: station.number().0,
                };
                Stop::new(id, station, access_layers(&stop_type, tile, station, defaults))
            })
            .collect();

        Self {
            coordinates,
            name: name.to_string(),
            label,
            preprinted_tile: tile.id(),
            current_tile: tile.id(),
            rotation,
            cost,
            stop_type,
            impassable_sides,
            invalid_sides: HexSidesSet::empty(),
            stops,
            downgraded_tracks: None,
            bonus_tokens: Vec::new(),
            homes: Vec::new(),
            destinations: Vec::new(),
        }
    }

    pub fn coordinates(&self) -> HexCoordinates {
        self.coordinates
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn preprinted_tile(&self) -> TileId {
        self.preprinted_tile
    }

    pub fn current_tile(&self) -> TileId {
        self.current_tile
    }

    pub fn rotation(&self) -> HexSide {
        self.rotation
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn stop_type(&self) -> &StopType {
        &self.stop_type
    }

    pub fn impassable_sides(&self) -> HexSidesSet {
        self.impassable_sides
    }

    pub fn is_impassable_side(&self, side: HexSide) -> bool {
        self.impassable_sides.contains(side)
    }

    pub(crate) fn add_impassable_side(&mut self, side: HexSide) {
        self.impassable_sides = self.impassable_sides.with(side);
    }

    pub fn invalid_sides(&self) -> HexSidesSet {
        self.invalid_sides
    }

    pub fn is_invalid_side(&self, side: HexSide) -> bool {
        self.invalid_sides.contains(side)
    }

    pub(crate) fn add_invalid_side(&mut self, side: HexSide) {
        self.invalid_sides = self.invalid_sides.with(side);
    }

    /// Tracks currently on the hex, rotated into board sides
    pub fn current_tracks(&self, tile: &Tile) -> TrackConfig {
        match &self.downgraded_tracks {
            Some(tracks) => tracks.clone(),
            None => tile.tracks(self.rotation).clone(),
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, number: u32) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.number() == number)
    }

    pub fn stop_mut(&mut self, number: u32) -> Option<&mut Stop> {
        self.stops.iter_mut().find(|stop| stop.number() == number)
    }

    pub fn stop_for_station(&self, station: StationNumber) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.related_station() == station)
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }

    /// Lays `tile` with `rotation`, moving stops along `station_mapping`
    ///
    /// Stations missing from the mapping keep their number if the new tile has
    /// it. Stops whose stations merge share one stop and keep all tokens. New
    /// stations get fresh stops. A stop without successor station must be
    /// empty.
    pub fn lay_tile(
        &mut self,
        tile: &Tile,
        rotation: HexSide,
        station_mapping: &HashMap<StationNumber, StationNumber>,
        defaults: &StopTypeDefaults,
    ) -> Result<()> {
        let old_stops = self.stops.clone();
        let mut new_stops: Vec<Stop> = Vec::with_capacity(tile.stations().len());

        for mut stop in old_stops {
            let target = station_mapping
                .get(&stop.related_station())
                .copied()
                .or_else(|| Some(stop.related_station()).filter(|s| tile.get_station(*s).is_some()));
            let Some(target) = target else {
                if stop.has_tokens() {
                    bail!(
                        "Laying tile {} on {} would remove stop {} with tokens",
                        tile.id(),
                        self.name,
                        stop.number()
                    );
                }
                debug!("Stop {} on {} dropped by tile {}", stop.number(), self.name, tile.id());
                continue;
            };
            let station = tile.get_station(target).ok_or_else(|| {
                anyhow!("Tile {} has no station {} to map onto", tile.id(), target)
            })?;

            match new_stops
                .iter()
                .position(|existing| existing.related_station() == target)
            {
                Some(index) => new_stops[index].absorb_tokens(stop.take_tokens()),
                None => {
                    let layers = access_layers(&self.stop_type, tile, station, defaults);
                    stop.set_related_station(station, layers);
                    new_stops.push(stop);
                }
            }
        }

        for station in tile.stations() {
            if new_stops.iter().any(|stop| stop.related_station() == station.number()) {
                continue;
            }
            let number = (1..)
                .find(|n| new_stops.iter().all(|stop| stop.number() != *n))
                .unwrap_or(1);
            let id = StopId {
                hex: self.coordinates,
                number,
            };
            let layers = access_layers(&self.stop_type, tile, station, defaults);
            new_stops.push(Stop::new(id, station, layers));
        }
        new_stops.sort_by_key(Stop::number);

        self.stops = new_stops;
        self.current_tile = tile.id();
        self.rotation = rotation;
        self.downgraded_tracks = None;
        Ok(())
    }

    /// Removes a station from the current tile, joining its tracks directly
    pub fn downgrade_station(&mut self, tile: &Tile, station: StationNumber) -> Result<()> {
        let index = self
            .stops
            .iter()
            .position(|stop| stop.related_station() == station)
            .ok_or_else(|| anyhow!("No stop for station {station} on {}", self.name))?;
        if self.stops[index].has_tokens() {
            bail!("Cannot remove station {station} with tokens on {}", self.name);
        }
        let tracks = self.current_tracks(tile).create_by_downgrade(station);
        self.stops.remove(index);
        self.downgraded_tracks = Some(tracks);
        Ok(())
    }

    pub fn has_token_of(&self, company: &CompanyId) -> bool {
        self.stops.iter().any(|stop| stop.has_token_of(company))
    }

    /// Whether laying a token for `company` in stop `number` would take a
    /// slot reserved for another company's home token
    pub fn is_blocked_for_token_lay(&self, company: &CompanyId, number: u32) -> bool {
        let Some(stop) = self.stop(number) else {
            return true;
        };
        self.homes.iter().any(|home| {
            &home.company != company
                && home.city == number
                && !self.has_token_of(&home.company)
                && stop.free_slots() <= 1
        })
    }

    pub fn place_token(&mut self, number: u32, token: BaseToken) -> Result<()> {
        if self.has_token_of(&token.company) {
            bail!("{} already has a token on {}", token.company, self.name);
        }
        if self.stop(number).is_none() {
            bail!("No stop {number} on {}", self.name);
        }
        if self.is_blocked_for_token_lay(&token.company, number) {
            bail!("Stop {number} on {} is reserved for a home token", self.name);
        }
        let name = self.name.clone();
        self.stop_mut(number)
            .ok_or_else(|| anyhow!("No stop {number} on {name}"))?
            .add_token(token)
            .with_context(|| format!("Placing token on {name}"))
    }

    pub fn remove_token(&mut self, token_id: TokenId) -> Option<BaseToken> {
        self.stops
            .iter_mut()
            .find_map(|stop| stop.remove_token(token_id))
    }

    pub fn bonus_tokens(&self) -> &[BonusToken] {
        &self.bonus_tokens
    }

    pub fn add_bonus_token(&mut self, token: BonusToken) {
        self.bonus_tokens.push(token);
    }

    pub fn remove_bonus_token(&mut self, token_id: TokenId) -> Option<BonusToken> {
        let index = self.bonus_tokens.iter().position(|token| token.id == token_id)?;
        Some(self.bonus_tokens.remove(index))
    }

    /// Revenue added by the bonus tokens on this hex
    pub fn bonus_value(&self) -> i32 {
        self.bonus_tokens.iter().map(|token| token.value).sum()
    }

    pub(crate) fn add_home(&mut self, company: CompanyId, city: u32) -> Result<()> {
        if self.stop(city).is_none() {
            bail!(
                "Invalid home city number {city} for {company} on {} ({} stops)",
                self.name,
                self.stops.len()
            );
        }
        self.homes.push(HomeReservation { company, city });
        Ok(())
    }

    pub fn homes(&self) -> &[HomeReservation] {
        &self.homes
    }

    pub fn is_home_of(&self, company: &CompanyId) -> bool {
        self.homes.iter().any(|home| &home.company == company)
    }

    pub(crate) fn add_destination(&mut self, company: CompanyId) {
        if !self.destinations.contains(&company) {
            self.destinations.push(company);
        }
    }

    pub fn destinations(&self) -> &[CompanyId] {
        &self.destinations
    }

    pub fn is_destination_of(&self, company: &CompanyId) -> bool {
        self.destinations.contains(company)
    }
}
