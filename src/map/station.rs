//! Stations: the nodes inside a tile

use anyhow::{bail, Result};

use super::stop_type::{StopType, CITY, OFFMAP, TOWN};
use super::types::StationNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationKind {
    City,
    Town,
    Halt,
    OffMapCity,
    Port,
    Pass,
    Junction,
}

impl StationKind {
    pub fn parse(text: &str) -> Result<Self> {
        let kind = match text.trim().to_ascii_lowercase().as_str() {
            "city" => StationKind::City,
            "town" => StationKind::Town,
            "halt" => StationKind::Halt,
            "offmapcity" | "offmap" => StationKind::OffMapCity,
            "port" => StationKind::Port,
            "pass" => StationKind::Pass,
            "junction" => StationKind::Junction,
            _ => bail!("Unknown station kind '{text}'"),
        };
        Ok(kind)
    }

    /// The named stop type that supplies this kind's access rules
    pub fn default_stop_type(&self) -> Option<&'static str> {
        match self {
            StationKind::City => Some(CITY),
            StationKind::Town | StationKind::Halt => Some(TOWN),
            StationKind::OffMapCity => Some(OFFMAP),
            StationKind::Port | StationKind::Pass | StationKind::Junction => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Station {
    number: StationNumber,
    kind: StationKind,
    /// Number of base tokens the station can hold
    slots: usize,
    value: i32,
    stop_type: StopType,
}

impl Station {
    pub fn new(number: StationNumber, kind: StationKind, slots: usize, value: i32) -> Self {
        Self {
            number,
            kind,
            slots,
            value,
            stop_type: StopType::null(),
        }
    }

    pub fn with_stop_type(mut self, stop_type: StopType) -> Self {
        self.stop_type = stop_type;
        self
    }

    pub fn number(&self) -> StationNumber {
        self.number
    }

    pub fn kind(&self) -> StationKind {
        self.kind
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Explicit per-station access rules (NULL when unset)
    pub fn stop_type(&self) -> &StopType {
        &self.stop_type
    }
}
