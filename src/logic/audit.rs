//! Integrity audit for brackets loaded from the backend or from disk.

use crate::models::{Bracket, MatchId, BRACKET_ID_LEN};
use std::collections::HashSet;
use std::fmt;

/// A broken bracket invariant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuditIssue {
    /// Bracket id is not 10 alphanumeric characters.
    InvalidBracketId(String),
    /// A round lists a match that is not in `matches`.
    MissingRoundMatch { round: u32, id: MatchId },
    /// `winnerto` / `loserto` points at a match that does not exist.
    DanglingPointer { from: MatchId, to: MatchId },
    FinishedWithoutWinner(MatchId),
    FinishedWithoutOpponents(MatchId),
    /// Two initial teams share a seed.
    DuplicateSeed(u32),
    /// An initial team has seed 0.
    InvalidSeed { team: String },
}

impl fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditIssue::InvalidBracketId(id) => write!(f, "Bracket id {:?} is not 10 alphanumeric characters", id),
            AuditIssue::MissingRoundMatch { round, id } => {
                write!(f, "Round {} lists {} but the match does not exist", round, id)
            }
            AuditIssue::DanglingPointer { from, to } => write!(f, "{} points to missing match {}", from, to),
            AuditIssue::FinishedWithoutWinner(id) => write!(f, "{} is finished but has no winner", id),
            AuditIssue::FinishedWithoutOpponents(id) => {
                write!(f, "{} is finished but does not have both opponents", id)
            }
            AuditIssue::DuplicateSeed(seed) => write!(f, "Seed {} is used by more than one team", seed),
            AuditIssue::InvalidSeed { team } => write!(f, "Team {} has seed 0", team),
        }
    }
}

/// Check a bracket against its structural invariants. Issues come back in play order.
pub fn audit_bracket(bracket: &Bracket) -> Vec<AuditIssue> {
    let mut issues = Vec::new();

    if bracket.id.len() != BRACKET_ID_LEN || !bracket.id.chars().all(|c| c.is_ascii_alphanumeric()) {
        issues.push(AuditIssue::InvalidBracketId(bracket.id.clone()));
    }

    for round in &bracket.rounds {
        for id in &round.matches {
            if !bracket.matches.contains_key(id) {
                issues.push(AuditIssue::MissingRoundMatch {
                    round: round.round,
                    id: *id,
                });
            }
        }
    }

    let mut ids: Vec<&MatchId> = bracket.matches.keys().collect();
    ids.sort();
    for id in ids {
        let m = &bracket.matches[id];
        for to in [m.winnerto, m.loserto].into_iter().flatten() {
            if !bracket.matches.contains_key(&to) {
                issues.push(AuditIssue::DanglingPointer { from: *id, to });
            }
        }
        if m.finished {
            if m.winner.is_none() {
                issues.push(AuditIssue::FinishedWithoutWinner(*id));
            }
            if !m.has_both_opponents() {
                issues.push(AuditIssue::FinishedWithoutOpponents(*id));
            }
        }
    }

    let mut seen = HashSet::new();
    for team in bracket.initial_teams() {
        match team.seed {
            Some(0) => issues.push(AuditIssue::InvalidSeed {
                team: team.name.clone(),
            }),
            Some(seed) if !seen.insert(seed) => issues.push(AuditIssue::DuplicateSeed(seed)),
            _ => {}
        }
    }

    issues
}
