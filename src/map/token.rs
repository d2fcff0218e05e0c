//! Tokens placed on the board

use super::types::{CompanyId, TokenId};

/// A company's station marker; occupies one slot of the station it sits in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseToken {
    pub id: TokenId,
    pub company: CompanyId,
}

impl BaseToken {
    pub fn new(id: TokenId, company: CompanyId) -> Self {
        Self { id, company }
    }
}

/// A revenue bonus placed on a hex, counted by every run through that hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusToken {
    pub id: TokenId,
    pub name: String,
    pub value: i32,
    pub owner: Option<CompanyId>,
}

impl BonusToken {
    pub fn new(id: TokenId, name: &str, value: i32, owner: Option<CompanyId>) -> Self {
        Self {
            id,
            name: name.to_string(),
            value,
            owner,
        }
    }
}
