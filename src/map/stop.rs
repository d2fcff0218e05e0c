//! Stops: the scoring locations of a hex, bound to a station of its current tile

use anyhow::{bail, Result};

use super::station::{Station, StationKind};
use super::stop_type::{resolve, Loop, RunThrough, RunTo, Score, StopType};
use super::token::BaseToken;
use super::types::{CompanyId, StationNumber, StopId, TokenId};

/// The access rules a stop inherits, most specific first
#[derive(Debug, Clone)]
pub struct AccessLayers {
    pub hex: StopType,
    pub tile: StopType,
    pub station: StopType,
    /// The map's named default for the station's kind
    pub kind_default: StopType,
}

impl AccessLayers {
    fn levels(&self) -> [&StopType; 4] {
        [&self.hex, &self.tile, &self.station, &self.kind_default]
    }
}

#[derive(Debug, Clone)]
pub struct Stop {
    id: StopId,
    related_station: StationNumber,
    kind: StationKind,
    slots: usize,
    value: i32,
    tokens: Vec<BaseToken>,
    access: AccessLayers,
}

impl Stop {
    pub fn new(id: StopId, station: &Station, access: AccessLayers) -> Self {
        Self {
            id,
            related_station: station.number(),
            kind: station.kind(),
            slots: station.slots(),
            value: station.value(),
            tokens: Vec::new(),
            access,
        }
    }

    pub fn id(&self) -> StopId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.id.number
    }

    pub fn related_station(&self) -> StationNumber {
        self.related_station
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

    /// Rebinds the stop after a tile lay; tokens stay in place
    pub fn set_related_station(&mut self, station: &Station, access: AccessLayers) {
        self.related_station = station.number();
        self.kind = station.kind();
        self.slots = station.slots();
        self.value = station.value();
        self.access = access;
    }

    pub fn access(&self) -> &AccessLayers {
        &self.access
    }

    pub fn run_to(&self) -> RunTo {
        resolve(&self.access.levels(), StopType::run_to, RunTo::Yes)
    }

    pub fn run_through(&self) -> RunThrough {
        resolve(&self.access.levels(), StopType::run_through, RunThrough::Yes)
    }

    pub fn loop_allowed(&self) -> bool {
        resolve(&self.access.levels(), StopType::loop_allowed, Loop::Yes) == Loop::Yes
    }

    pub fn score_type(&self) -> Score {
        resolve(&self.access.levels(), StopType::score, Score::Major)
    }

    pub fn is_run_to_allowed_for(&self, company: &CompanyId) -> bool {
        match self.run_to() {
            RunTo::Yes => true,
            RunTo::No => false,
            RunTo::TokenOnly => self.has_token_of(company),
        }
    }

    pub fn is_run_through_allowed_for(&self, company: &CompanyId) -> bool {
        match self.run_through() {
            RunThrough::Yes => true,
            RunThrough::No => false,
            RunThrough::TokenOnly => self.has_token_of(company),
        }
    }

    pub fn tokens(&self) -> &[BaseToken] {
        &self.tokens
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    pub fn has_token_of(&self, company: &CompanyId) -> bool {
        self.tokens.iter().any(|token| &token.company == company)
    }

    pub fn free_slots(&self) -> usize {
        self.slots.saturating_sub(self.tokens.len())
    }

    pub fn add_token(&mut self, token: BaseToken) -> Result<()> {
        if self.has_token_of(&token.company) {
            bail!("{} already has a token in stop {}", token.company, self.id);
        }
        if self.free_slots() == 0 {
            bail!("No free slot in stop {} for {}", self.id, token.company);
        }
        self.tokens.push(token);
        Ok(())
    }

    pub fn remove_token(&mut self, token_id: TokenId) -> Option<BaseToken> {
        let index = self.tokens.iter().position(|token| token.id == token_id)?;
        Some(self.tokens.remove(index))
    }

    /// Takes over the tokens of a stop merged into this one, ignoring slot limits
    pub(crate) fn absorb_tokens(&mut self, tokens: Vec<BaseToken>) {
        self.tokens.extend(tokens);
    }

    pub(crate) fn take_tokens(&mut self) -> Vec<BaseToken> {
        std::mem::take(&mut self.tokens)
    }
}
