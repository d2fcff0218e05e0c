//! Track segments drawn on a tile
//!
//! A [`TrackConfig`] is immutable: rotating a tile, renumbering its stations or
//! removing a station always derives a fresh config and leaves the base
//! definition untouched.

use anyhow::{anyhow, bail, Context, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use super::hex_side::HexSide;
use super::hex_sides_set::HexSidesSet;
use super::tile::Tile;
use super::types::StationNumber;

/// An addressable endpoint on a tile: a hex edge or a station inside the tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackPoint {
    Side(HexSide),
    Station(StationNumber),
}

impl TrackPoint {
    /// Sides map to 0..6, stations to negative numbers, so the two never overlap
    pub fn number(&self) -> i32 {
        match self {
            TrackPoint::Side(side) => side.number(),
            TrackPoint::Station(station) => -(station.0 as i32),
        }
    }

    pub fn is_side(&self) -> bool {
        matches!(self, TrackPoint::Side(_))
    }

    pub fn is_station(&self) -> bool {
        matches!(self, TrackPoint::Station(_))
    }

    /// Sides turn with the tile, stations stay where they are
    pub fn rotate(&self, rotation: HexSide) -> TrackPoint {
        match self {
            TrackPoint::Side(side) => TrackPoint::Side(side.rotate(rotation)),
            station => *station,
        }
    }

    /// Parses `side<N>` or `city<N>` as used in tile definitions
    ///
    /// Side numbers in tile definitions are offset by three from board sides.
    pub fn parse(tile: &Tile, text: &str) -> Result<TrackPoint> {
        let text = text.trim();
        if let Some(number) = text.strip_prefix("side") {
            let number: i32 = number
                .parse()
                .with_context(|| format!("Invalid side in track point '{text}'"))?;
            return Ok(TrackPoint::Side(HexSide::get(number + 3)));
        }
        if let Some(number) = text.strip_prefix("city") {
            let number: u32 = number
                .parse()
                .with_context(|| format!("Invalid station in track point '{text}'"))?;
            if number == 0 {
                bail!("Station numbers start at 1 (track point '{text}')");
            }
            let station = tile.get_station(StationNumber(number)).ok_or_else(|| {
                anyhow!("Tile {} has no station {} (track point '{text}')", tile.id(), number)
            })?;
            return Ok(TrackPoint::Station(station.number()));
        }
        bail!("Unknown track point '{text}'")
    }
}

impl PartialOrd for TrackPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TrackPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number().cmp(&other.number())
    }
}

impl fmt::Display for TrackPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackPoint::Side(side) => write!(f, "{side}"),
            TrackPoint::Station(station) => write!(f, "{station}"),
        }
    }
}

/// One drawn track segment, stored with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Track {
    start: TrackPoint,
    end: TrackPoint,
}

impl Track {
    pub fn new(a: TrackPoint, b: TrackPoint) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> TrackPoint {
        self.start
    }

    pub fn end(&self) -> TrackPoint {
        self.end
    }

    /// The endpoint opposite `point`, if `point` is on this track
    pub fn other_end(&self, point: TrackPoint) -> Option<TrackPoint> {
        if point == self.start {
            Some(self.end)
        } else if point == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    pub fn contains(&self, point: TrackPoint) -> bool {
        self.start == point || self.end == point
    }

    pub fn create_by_rotation(&self, rotation: HexSide) -> Track {
        Track::new(self.start.rotate(rotation), self.end.rotate(rotation))
    }

    /// Renumbers stations through `mapping`; unmapped stations keep their number
    pub fn create_by_station_mapping(&self, mapping: &HashMap<StationNumber, StationNumber>) -> Track {
        let remap = |point: TrackPoint| match point {
            TrackPoint::Station(station) => {
                TrackPoint::Station(mapping.get(&station).copied().unwrap_or(station))
            }
            side => side,
        };
        Track::new(remap(self.start), remap(self.end))
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The complete set of tracks of one tile configuration
///
/// Every track is indexed twice, once under each endpoint, in either the
/// station index or the side index.
#[derive(Debug, Clone, Default)]
pub struct TrackConfig {
    tracks: Vec<Track>,
    station_tracks: HashMap<StationNumber, Vec<TrackPoint>>,
    side_tracks: HashMap<HexSide, Vec<TrackPoint>>,
}

impl TrackConfig {
    pub fn new(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut tracks: Vec<Track> = tracks.into_iter().collect();
        tracks.sort();
        tracks.dedup();

        let mut station_tracks: HashMap<StationNumber, Vec<TrackPoint>> = HashMap::new();
        let mut side_tracks: HashMap<HexSide, Vec<TrackPoint>> = HashMap::new();
        for track in &tracks {
            for (from, to) in [(track.start, track.end), (track.end, track.start)] {
                match from {
                    TrackPoint::Station(station) => station_tracks.entry(station).or_default().push(to),
                    TrackPoint::Side(side) => side_tracks.entry(side).or_default().push(to),
                }
            }
        }

        Self {
            tracks,
            station_tracks,
            side_tracks,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Endpoints reachable in one step from `station`
    pub fn station_tracks(&self, station: StationNumber) -> &[TrackPoint] {
        self.station_tracks
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Endpoints reachable in one step from `side`
    pub fn side_tracks(&self, side: HexSide) -> &[TrackPoint] {
        self.side_tracks
            .get(&side)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn point_tracks(&self, point: TrackPoint) -> &[TrackPoint] {
        match point {
            TrackPoint::Side(side) => self.side_tracks(side),
            TrackPoint::Station(station) => self.station_tracks(station),
        }
    }

    pub fn has_side(&self, side: HexSide) -> bool {
        self.side_tracks.contains_key(&side)
    }

    /// Sides that carry at least one track
    pub fn track_sides(&self) -> HexSidesSet {
        self.side_tracks.keys().copied().collect()
    }

    pub fn create_by_rotation(&self, rotation: HexSide) -> TrackConfig {
        TrackConfig::new(self.tracks.iter().map(|track| track.create_by_rotation(rotation)))
    }

    /// Renumbers stations; tracks between two stations that merge are dropped
    pub fn create_by_station_mapping(
        &self,
        mapping: &HashMap<StationNumber, StationNumber>,
    ) -> TrackConfig {
        TrackConfig::new(
            self.tracks
                .iter()
                .map(|track| track.create_by_station_mapping(mapping))
                .filter(|track| !(track.start.is_station() && track.start == track.end)),
        )
    }

    /// Removes `station` and joins all of its former neighbours pairwise
    pub fn create_by_downgrade(&self, station: StationNumber) -> TrackConfig {
        let removed = TrackPoint::Station(station);
        let mut neighbours: Vec<TrackPoint> = self
            .station_tracks(station)
            .iter()
            .copied()
            .filter(|point| *point != removed)
            .collect();
        neighbours.sort();
        neighbours.dedup();

        let kept = self
            .tracks
            .iter()
            .copied()
            .filter(|track| !track.contains(removed));
        let joined = neighbours.iter().enumerate().flat_map(|(index, a)| {
            neighbours[index + 1..]
                .iter()
                .map(move |b| Track::new(*a, *b))
        });
        TrackConfig::new(kept.chain(joined).collect::<Vec<_>>())
    }
}

impl PartialEq for TrackConfig {
    fn eq(&self, other: &Self) -> bool {
        self.tracks == other.tracks
    }
}

impl Eq for TrackConfig {}

impl fmt::Display for TrackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tracks: Vec<String> = self.tracks.iter().map(Track::to_string).collect();
        write!(f, "[{}]", tracks.join(", "))
    }
}
