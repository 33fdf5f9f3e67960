//! Bracket, Round, and BracketError.

use crate::models::game::{BestOf, Match, MatchId};
use crate::models::opponent::Opponent;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Length of a bracket id.
pub const BRACKET_ID_LEN: usize = 10;

/// Errors that can occur while building or updating a bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// A bracket needs at least two teams.
    NotEnoughTeams { count: usize },
    /// Seeds start at 1.
    InvalidSeed { team: String },
    /// Two teams were given the same seed.
    DuplicateSeed(u32),
    /// No seed number is left above the highest explicit seed for this unseeded team.
    SeedOverflow { team: String },
    /// No match with this id in the bracket.
    MatchNotFound(MatchId),
    /// The match does not have both opponents yet.
    OpponentsMissing(MatchId),
    /// A match fed by this one is already finished, so its result can no longer change.
    ResultLocked { id: MatchId, downstream: MatchId },
    /// Not of the form `R<round>M<match>`, `L<round>M<match>` or `GF`.
    InvalidMatchId(String),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::NotEnoughTeams { count } => {
                write!(f, "Need at least 2 teams to build a bracket (got {})", count)
            }
            BracketError::InvalidSeed { team } => write!(f, "Team {} has seed 0; seeds start at 1", team),
            BracketError::DuplicateSeed(seed) => write!(f, "Seed {} is assigned to more than one team", seed),
            BracketError::SeedOverflow { team } => {
                write!(f, "No seed left for team {} after seed {}", team, u32::MAX)
            }
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            BracketError::OpponentsMissing(id) => write!(f, "Match {} does not have both opponents yet", id),
            BracketError::ResultLocked { id, downstream } => {
                write!(f, "Result of {} is locked: {} is already finished", id, downstream)
            }
            BracketError::InvalidMatchId(raw) => write!(f, "Invalid match id {:?}", raw),
        }
    }
}

impl std::error::Error for BracketError {}

/// Bracket format.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketType {
    #[default]
    Single,
    Double,
    Swiss,
    RoundRobin,
}

/// Current phase of the bracket.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketStatus {
    /// Generated, no result recorded yet.
    #[default]
    Setup,
    Ongoing,
    /// The final match is finished.
    Completed,
}

/// A column of the bracket: its display name and the matches played in it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round: u32,
    pub name: String,
    /// Match ids in display order.
    pub matches: Vec<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bestof: Option<BestOf>,
}

/// Full bracket: every match keyed by id plus the ordered rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BracketType,
    pub matches: HashMap<MatchId, Match>,
    /// Rounds in play order; every listed match exists in `matches`.
    pub rounds: Vec<Round>,
    pub teamcount: usize,
    pub status: BracketStatus,
}

/// Random 10-character alphanumeric bracket id.
pub fn generate_bracket_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BRACKET_ID_LEN)
        .map(char::from)
        .collect()
}

impl Bracket {
    /// Create an empty bracket in Setup with a fresh id.
    pub fn new(name: impl Into<String>, kind: BracketType, teamcount: usize) -> Self {
        Self {
            id: generate_bracket_id(),
            name: name.into(),
            kind,
            matches: HashMap::new(),
            rounds: Vec::new(),
            teamcount,
            status: BracketStatus::Setup,
        }
    }

    pub fn get_match(&self, id: &MatchId) -> Option<&Match> {
        self.matches.get(id)
    }

    pub fn get_match_mut(&mut self, id: &MatchId) -> Option<&mut Match> {
        self.matches.get_mut(id)
    }

    /// Append a round together with its matches.
    pub fn push_round(&mut self, round: Round, matches: Vec<Match>) {
        for m in matches {
            self.matches.insert(m.id, m);
        }
        self.rounds.push(round);
    }

    /// Match ids in play order (round by round).
    pub fn match_order(&self) -> Vec<MatchId> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter().copied())
            .collect()
    }

    /// The match that decides the bracket: the only match of the last round.
    pub fn final_match_id(&self) -> Option<MatchId> {
        self.rounds.last().and_then(|r| r.matches.first()).copied()
    }

    /// Number of upper-bracket rounds.
    pub fn upper_rounds(&self) -> u32 {
        self.matches
            .keys()
            .filter_map(|id| match id {
                MatchId::Upper { round, .. } => Some(*round),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Teams as entered in round 1, in match order.
    pub fn initial_teams(&self) -> Vec<&Opponent> {
        let mut first_round: Vec<&Match> = self
            .matches
            .values()
            .filter(|m| matches!(m.id, MatchId::Upper { round: 1, .. }))
            .collect();
        first_round.sort_by_key(|m| m.number);
        first_round
            .into_iter()
            .flat_map(|m| m.opponent1.iter().chain(m.opponent2.iter()))
            .collect()
    }

    pub fn is_completed(&self) -> bool {
        self.status == BracketStatus::Completed
    }
}
