//! Access rules for stops: may a train start/end here, pass through, revisit,
//! and how the stop scores
//!
//! Each field is optional. An unset field at the hex level falls through to
//! the tile, then the station, then the system CITY default.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

pub const CITY: &str = "CITY";
pub const TOWN: &str = "TOWN";
pub const OFFMAP: &str = "OFFMAP";
pub const NULL: &str = "NULL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunTo {
    Yes,
    No,
    /// Only for companies holding a token on the stop
    TokenOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunThrough {
    Yes,
    No,
    TokenOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loop {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Score {
    Major,
    Minor,
}

fn parse_access_word(text: &str) -> Option<&'static str> {
    match text.trim().to_ascii_lowercase().as_str() {
        "yes" => Some("yes"),
        "no" => Some("no"),
        "tokenonly" => Some("tokenonly"),
        _ => None,
    }
}

impl RunTo {
    pub fn parse(text: &str) -> Result<Self> {
        match parse_access_word(text) {
            Some("yes") => Ok(RunTo::Yes),
            Some("no") => Ok(RunTo::No),
            Some("tokenonly") => Ok(RunTo::TokenOnly),
            _ => bail!("Invalid runTo value '{text}'"),
        }
    }
}

impl RunThrough {
    pub fn parse(text: &str) -> Result<Self> {
        match parse_access_word(text) {
            Some("yes") => Ok(RunThrough::Yes),
            Some("no") => Ok(RunThrough::No),
            Some("tokenonly") => Ok(RunThrough::TokenOnly),
            _ => bail!("Invalid runThrough value '{text}'"),
        }
    }
}

impl Loop {
    pub fn parse(text: &str) -> Result<Self> {
        match parse_access_word(text) {
            Some("yes") => Ok(Loop::Yes),
            Some("no") => Ok(Loop::No),
            _ => bail!("Invalid loop value '{text}'"),
        }
    }
}

impl Score {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(Score::Major),
            "minor" => Ok(Score::Minor),
            _ => bail!("Invalid score type '{text}'"),
        }
    }
}

/// Textual access rules as they appear in a map definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessSpec {
    /// Named stop type to start from
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub run_to: Option<String>,
    pub run_through: Option<String>,
    #[serde(rename = "loop")]
    pub loop_allowed: Option<String>,
    pub score: Option<String>,
}

/// A named set of access rules; fields left `None` are inherited
#[derive(Debug, Clone)]
pub struct StopType {
    id: String,
    run_to: Option<RunTo>,
    run_through: Option<RunThrough>,
    loop_allowed: Option<Loop>,
    score: Option<Score>,
}

impl PartialEq for StopType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StopType {}

impl StopType {
    pub fn new(
        id: &str,
        run_to: Option<RunTo>,
        run_through: Option<RunThrough>,
        loop_allowed: Option<Loop>,
        score: Option<Score>,
    ) -> Self {
        Self {
            id: id.to_string(),
            run_to,
            run_through,
            loop_allowed,
            score,
        }
    }

    /// The sentinel type that sets nothing
    pub fn null() -> Self {
        Self::new(NULL, None, None, None, None)
    }

    pub fn city() -> Self {
        Self::new(
            CITY,
            Some(RunTo::Yes),
            Some(RunThrough::Yes),
            Some(Loop::Yes),
            Some(Score::Major),
        )
    }

    pub fn town() -> Self {
        Self::new(
            TOWN,
            Some(RunTo::Yes),
            Some(RunThrough::Yes),
            Some(Loop::Yes),
            Some(Score::Minor),
        )
    }

    pub fn offmap() -> Self {
        Self::new(
            OFFMAP,
            Some(RunTo::Yes),
            Some(RunThrough::No),
            Some(Loop::No),
            Some(Score::Major),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_null(&self) -> bool {
        self.run_to.is_none()
            && self.run_through.is_none()
            && self.loop_allowed.is_none()
            && self.score.is_none()
    }

    pub fn run_to(&self) -> Option<RunTo> {
        self.run_to
    }

    pub fn run_through(&self) -> Option<RunThrough> {
        self.run_through
    }

    pub fn loop_allowed(&self) -> Option<Loop> {
        self.loop_allowed
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Layers the explicit fields of `rules` over `self`
    fn overlay(&self, id: String, rules: &AccessSpec) -> Result<StopType> {
        Ok(StopType {
            id,
            run_to: rules.run_to.as_deref().map(RunTo::parse).transpose()?.or(self.run_to),
            run_through: rules
                .run_through
                .as_deref()
                .map(RunThrough::parse)
                .transpose()?
                .or(self.run_through),
            loop_allowed: rules
                .loop_allowed
                .as_deref()
                .map(Loop::parse)
                .transpose()?
                .or(self.loop_allowed),
            score: rules.score.as_deref().map(Score::parse).transpose()?.or(self.score),
        })
    }
}

/// Picks the first level that sets a field, or `fallback`
pub fn resolve<T>(levels: &[&StopType], field: impl Fn(&StopType) -> Option<T>, fallback: T) -> T {
    levels.iter().find_map(|level| field(*level)).unwrap_or(fallback)
}

/// The named stop types of one map
#[derive(Debug, Clone)]
pub struct StopTypeDefaults {
    types: HashMap<String, StopType>,
}

impl Default for StopTypeDefaults {
    fn default() -> Self {
        let types = [StopType::city(), StopType::town(), StopType::offmap()]
            .into_iter()
            .map(|stop_type| (stop_type.id.clone(), stop_type))
            .collect();
        Self { types }
    }
}

impl StopTypeDefaults {
    /// Seeds CITY, TOWN and OFFMAP, then applies the map's own definitions
    ///
    /// Each entry must name its type. Naming an existing type overrides the
    /// fields it sets, naming a new one creates a type built on NULL.
    pub fn parse_defaults(entries: &[AccessSpec]) -> Result<Self> {
        let mut defaults = Self::default();
        for rules in entries {
            let name = rules
                .type_name
                .as_deref()
                .ok_or_else(|| anyhow!("Default stop type without a type name"))?;
            let base = defaults.types.get(name).cloned().unwrap_or_else(StopType::null);
            let stop_type = base
                .overlay(name.to_string(), rules)
                .with_context(|| format!("In default stop type {name}"))?;
            defaults.types.insert(name.to_string(), stop_type);
        }
        Ok(defaults)
    }

    pub fn get(&self, name: &str) -> Option<&StopType> {
        self.types.get(name)
    }

    /// Resolves the stop type of one hex, tile or station
    ///
    /// `owner` names the element for error messages and for the id of a type
    /// that carries local overrides.
    pub fn parse_stop(&self, owner: &str, rules: Option<&AccessSpec>) -> Result<StopType> {
        let Some(rules) = rules else {
            return Ok(StopType::null());
        };
        let base = match rules.type_name.as_deref() {
            Some(name) => self
                .types
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow!("Unknown stop type '{name}' in {owner}"))?,
            None => StopType::null(),
        };
        let has_overrides = rules.run_to.is_some()
            || rules.run_through.is_some()
            || rules.loop_allowed.is_some()
            || rules.score.is_some();
        if !has_overrides {
            return Ok(base);
        }
        base.overlay(format!("{owner}/{}", base.id), rules)
            .with_context(|| format!("In stop type of {owner}"))
    }
}
