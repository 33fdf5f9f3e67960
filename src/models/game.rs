//! Match, MatchId, and the small value types a match is made of.

use crate::models::bracket::BracketError;
use crate::models::opponent::Opponent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a match in the bracket. Serialized as `R1M2`, `L3M1` or `GF`.
///
/// Ordering follows play order: upper before lower before the grand final, then by
/// round and match number.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MatchId {
    /// Upper bracket, or the only bracket in single elimination.
    Upper { round: u32, number: u32 },
    /// Lower bracket. `round` counts from 1 within the lower bracket.
    Lower { round: u32, number: u32 },
    GrandFinal,
}

impl MatchId {
    pub fn upper(round: u32, number: u32) -> Self {
        MatchId::Upper { round, number }
    }

    pub fn lower(round: u32, number: u32) -> Self {
        MatchId::Lower { round, number }
    }

    /// Match number within its round (the grand final is match 1).
    pub fn number(&self) -> u32 {
        match *self {
            MatchId::Upper { number, .. } | MatchId::Lower { number, .. } => number,
            MatchId::GrandFinal => 1,
        }
    }

    pub fn is_upper(&self) -> bool {
        matches!(self, MatchId::Upper { .. })
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchId::Upper { round, number } => write!(f, "R{}M{}", round, number),
            MatchId::Lower { round, number } => write!(f, "L{}M{}", round, number),
            MatchId::GrandFinal => f.write_str("GF"),
        }
    }
}

impl FromStr for MatchId {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BracketError::InvalidMatchId(s.to_string());
        if s == "GF" {
            return Ok(MatchId::GrandFinal);
        }
        let (rest, upper) = if let Some(rest) = s.strip_prefix('R') {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix('L') {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let (round, number) = rest.split_once('M').ok_or_else(invalid)?;
        let round = parse_index(round).ok_or_else(invalid)?;
        let number = parse_index(number).ok_or_else(invalid)?;
        if upper {
            Ok(MatchId::upper(round, number))
        } else {
            Ok(MatchId::lower(round, number))
        }
    }
}

/// Positive decimal with no sign or leading zero, so the id prints back unchanged.
fn parse_index(digits: &str) -> Option<u32> {
    if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for MatchId {
    type Error = BracketError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One of the two opponent slots of a match. JSON: `1` or `2`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }

    /// Odd match numbers feed slot one of the next match, even numbers slot two.
    pub fn from_parity(number: u32) -> Self {
        if number % 2 == 1 {
            Slot::One
        } else {
            Slot::Two
        }
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            other => Err(format!("invalid slot {}, expected 1 or 2", other)),
        }
    }
}

/// Series length. JSON: `1`, `3`, `5` or `7`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BestOf {
    Bo1,
    #[default]
    Bo3,
    Bo5,
    Bo7,
}

impl From<BestOf> for u8 {
    fn from(bestof: BestOf) -> Self {
        match bestof {
            BestOf::Bo1 => 1,
            BestOf::Bo3 => 3,
            BestOf::Bo5 => 5,
            BestOf::Bo7 => 7,
        }
    }
}

impl TryFrom<u8> for BestOf {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BestOf::Bo1),
            3 => Ok(BestOf::Bo3),
            5 => Ok(BestOf::Bo5),
            7 => Ok(BestOf::Bo7),
            other => Err(format!("invalid best-of {}, expected 1, 3, 5 or 7", other)),
        }
    }
}

/// Result of one map inside a series.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MapResult {
    pub map: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score1: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score2: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vod: Option<String>,
}

impl MapResult {
    /// Drop the played result, keeping the map name.
    pub fn clear_result(&mut self) {
        self.score1 = None;
        self.score2 = None;
        self.winner = None;
        self.vod = None;
    }
}

/// A single series between two opponents.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(rename = "bracketId")]
    pub bracket_id: String,
    /// Global round index (lower rounds follow the upper rounds).
    pub round: u32,
    /// Match number within its round.
    #[serde(rename = "match")]
    pub number: u32,
    /// None until the opponent is known (TBD).
    pub opponent1: Option<Opponent>,
    pub opponent2: Option<Opponent>,
    pub winner: Option<Slot>,
    /// Where the winner goes next.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winnerto: Option<MatchId>,
    /// Where the loser goes next (double elimination).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loserto: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub finished: bool,
    pub bestof: BestOf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maps: Vec<MapResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vod: Option<String>,
}

impl Match {
    /// Create an empty, unplayed match.
    pub fn new(id: MatchId, bracket_id: impl Into<String>, round: u32, bestof: BestOf) -> Self {
        Self {
            id,
            bracket_id: bracket_id.into(),
            round,
            number: id.number(),
            opponent1: None,
            opponent2: None,
            winner: None,
            winnerto: None,
            loserto: None,
            date: None,
            finished: false,
            bestof,
            maps: Vec::new(),
            stream: None,
            vod: None,
        }
    }

    pub fn opponent(&self, slot: Slot) -> Option<&Opponent> {
        match slot {
            Slot::One => self.opponent1.as_ref(),
            Slot::Two => self.opponent2.as_ref(),
        }
    }

    pub fn opponent_mut(&mut self, slot: Slot) -> Option<&mut Opponent> {
        match slot {
            Slot::One => self.opponent1.as_mut(),
            Slot::Two => self.opponent2.as_mut(),
        }
    }

    pub fn set_opponent(&mut self, slot: Slot, opponent: Option<Opponent>) {
        match slot {
            Slot::One => self.opponent1 = opponent,
            Slot::Two => self.opponent2 = opponent,
        }
    }

    pub fn has_both_opponents(&self) -> bool {
        self.opponent1.is_some() && self.opponent2.is_some()
    }

    /// The winning opponent, once a winner is recorded.
    pub fn winning_opponent(&self) -> Option<&Opponent> {
        self.winner.and_then(|slot| self.opponent(slot))
    }

    pub fn losing_opponent(&self) -> Option<&Opponent> {
        self.winner.and_then(|slot| self.opponent(slot.other()))
    }
}
