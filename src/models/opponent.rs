//! Opponent (a team entered in the bracket) and standings rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend team id: numeric for stored teams, free text for ad-hoc entries.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpponentId {
    Number(i64),
    Text(String),
}

impl From<i64> for OpponentId {
    fn from(id: i64) -> Self {
        OpponentId::Number(id)
    }
}

impl From<&str> for OpponentId {
    fn from(id: &str) -> Self {
        OpponentId::Text(id.to_string())
    }
}

impl From<String> for OpponentId {
    fn from(id: String) -> Self {
        OpponentId::Text(id)
    }
}

impl fmt::Display for OpponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpponentId::Number(n) => write!(f, "{}", n),
            OpponentId::Text(s) => f.write_str(s),
        }
    }
}

/// Outcome marker shown next to an opponent in a finished match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum OpponentStatus {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "FF")]
    Forfeit,
    #[serde(rename = "DQ")]
    Disqualified,
}

/// A team occupying a match slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub id: OpponentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Series score in the match this copy sits in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OpponentStatus>,
    /// Initial rank; positive and unique within the bracket's team list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Opponent {
    /// Create an unseeded opponent with the given id and display name.
    pub fn new(id: impl Into<OpponentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: None,
            logo: None,
            score: None,
            status: None,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Copy of this opponent as it enters its next match: no score, no status.
    pub fn advanced(&self) -> Self {
        Self {
            score: None,
            status: None,
            ..self.clone()
        }
    }

    /// Forget the result of the current match.
    pub fn clear_result(&mut self) {
        self.score = None;
        self.status = None;
    }
}

/// One row of the Swiss stage standings returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwissStanding {
    pub team: Opponent,
    pub wins: u32,
    pub losses: u32,
    /// Tiebreaker score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buchholz: Option<f64>,
    pub position: u32,
}
