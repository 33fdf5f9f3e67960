//! Progression: record match results and move teams along `winnerto` / `loserto`.

use crate::models::{Bracket, BracketError, BracketStatus, MatchId, Opponent, OpponentStatus, Slot};
use std::collections::HashMap;

/// Which team of a match is being moved on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Advance {
    Winner,
    Loser,
}

/// Record the result of a match and advance its teams.
///
/// Sets winner, scores and W/L status on the match, then places a fresh copy of the winner
/// into `winnerto` and of the loser into `loserto`. Upper bracket winners keep the parity
/// rule (odd match number -> slot 1, even -> slot 2); in lower drop-in rounds the lower
/// survivor takes slot 1 and the upper dropout slot 2. Byes are re-resolved and the bracket
/// status refreshed afterwards.
///
/// A result can be corrected until a match it fed has finished. On error nothing changes.
pub fn update_match_result<'a>(
    bracket: &'a mut Bracket,
    match_id: &MatchId,
    winner: Slot,
    score1: u32,
    score2: u32,
) -> Result<&'a mut Bracket, BracketError> {
    let id = *match_id;
    let m = bracket
        .get_match(&id)
        .ok_or(BracketError::MatchNotFound(id))?;
    if !m.has_both_opponents() {
        return Err(BracketError::OpponentsMissing(id));
    }

    // Targets must exist and be unplayed, following byes since they pass teams straight on.
    let live = live_slots(bracket);
    let mut pending: Vec<MatchId> = [m.winnerto, m.loserto].into_iter().flatten().collect();
    while let Some(target) = pending.pop() {
        let next = bracket
            .get_match(&target)
            .ok_or(BracketError::MatchNotFound(target))?;
        if next.finished {
            return Err(BracketError::ResultLocked {
                id,
                downstream: target,
            });
        }
        if is_bye(&live, &target) {
            pending.extend(next.winnerto);
        }
    }

    let (winning, losing, winnerto, loserto) = {
        let m = bracket
            .get_match_mut(&id)
            .ok_or(BracketError::MatchNotFound(id))?;
        m.winner = Some(winner);
        m.finished = true;
        for (slot, score) in [(Slot::One, score1), (Slot::Two, score2)] {
            if let Some(opponent) = m.opponent_mut(slot) {
                opponent.score = Some(score);
                opponent.status = Some(if slot == winner {
                    OpponentStatus::Win
                } else {
                    OpponentStatus::Loss
                });
            }
        }
        (
            m.winning_opponent().map(Opponent::advanced),
            m.losing_opponent().map(Opponent::advanced),
            m.winnerto,
            m.loserto,
        )
    };

    if let (Some(team), Some(target)) = (winning, winnerto) {
        place(bracket, id, target, Advance::Winner, team);
    }
    if let (Some(team), Some(target)) = (losing, loserto) {
        place(bracket, id, target, Advance::Loser, team);
    }

    resolve_byes(bracket);
    refresh_status(bracket);
    log::debug!("Bracket {}: {} finished {}-{}", bracket.id, id, score1, score2);
    Ok(bracket)
}

/// Clear every result and return the bracket to Setup.
///
/// Winners, finished flags, scores, statuses and map results go away; opponents are removed
/// from every match after round 1. Byes are forwarded again, so replaying the same results
/// reproduces the same bracket.
pub fn reset_bracket(bracket: &mut Bracket) -> &mut Bracket {
    for m in bracket.matches.values_mut() {
        m.winner = None;
        m.finished = false;
        for map in &mut m.maps {
            map.clear_result();
        }
        if m.round > 1 {
            m.opponent1 = None;
            m.opponent2 = None;
        } else {
            for opponent in [m.opponent1.as_mut(), m.opponent2.as_mut()].into_iter().flatten() {
                opponent.clear_result();
            }
        }
    }
    resolve_byes(bracket);
    bracket.status = BracketStatus::Setup;
    bracket
}

/// Matches where only one slot can ever be filled. Their team moves on without playing.
pub fn bye_matches(bracket: &Bracket) -> Vec<MatchId> {
    let live = live_slots(bracket);
    bracket
        .match_order()
        .into_iter()
        .filter(|id| is_bye(&live, id))
        .collect()
}

/// Forward the lone team of every bye match to its `winnerto` target.
pub(crate) fn resolve_byes(bracket: &mut Bracket) {
    let live = live_slots(bracket);
    for id in bracket.match_order() {
        let Some([one, two]) = live.get(&id).copied() else {
            continue;
        };
        if one == two {
            continue;
        }
        let slot = if one { Slot::One } else { Slot::Two };
        let Some(m) = bracket.get_match(&id) else {
            continue;
        };
        if let (Some(team), Some(target)) = (m.opponent(slot).map(Opponent::advanced), m.winnerto) {
            log::trace!("{} is a bye, {} advances to {}", id, team.name, target);
            place(bracket, id, target, Advance::Winner, team);
        }
    }
}

/// Which slots of each match can ever receive a team.
///
/// Filled slots are live. An empty slot is live when the match feeding it can produce the
/// team: any live slot produces a winner, two live slots produce a loser. Feeders always sit
/// in earlier rounds, so one pass in play order is enough.
fn live_slots(bracket: &Bracket) -> HashMap<MatchId, [bool; 2]> {
    let mut live: HashMap<MatchId, [bool; 2]> = bracket
        .matches
        .iter()
        .map(|(id, m)| (*id, [m.opponent1.is_some(), m.opponent2.is_some()]))
        .collect();

    for id in bracket.match_order() {
        let Some(m) = bracket.get_match(&id) else {
            continue;
        };
        let [one, two] = live.get(&id).copied().unwrap_or_default();
        let mut feed = |target: Option<MatchId>, advance: Advance| {
            if let Some(target) = target {
                if let Some(slots) = live.get_mut(&target) {
                    slots[slot_index(target_slot(id, target, advance))] = true;
                }
            }
        };
        if one || two {
            feed(m.winnerto, Advance::Winner);
        }
        if one && two {
            feed(m.loserto, Advance::Loser);
        }
    }
    live
}

fn is_bye(live: &HashMap<MatchId, [bool; 2]>, id: &MatchId) -> bool {
    live.get(id).is_some_and(|[one, two]| one != two)
}

/// Slot of `target` taken by the team coming from `source`.
fn target_slot(source: MatchId, target: MatchId, advance: Advance) -> Slot {
    match target {
        MatchId::GrandFinal => {
            if advance == Advance::Winner && source.is_upper() {
                Slot::One
            } else {
                Slot::Two
            }
        }
        MatchId::Lower { round, .. } if round % 2 == 0 => match advance {
            Advance::Winner => Slot::One,
            Advance::Loser => Slot::Two,
        },
        _ => Slot::from_parity(source.number()),
    }
}

fn slot_index(slot: Slot) -> usize {
    match slot {
        Slot::One => 0,
        Slot::Two => 1,
    }
}

fn place(bracket: &mut Bracket, source: MatchId, target: MatchId, advance: Advance, team: Opponent) {
    if let Some(next) = bracket.get_match_mut(&target) {
        next.set_opponent(target_slot(source, target, advance), Some(team));
    }
}

fn refresh_status(bracket: &mut Bracket) {
    let final_finished = bracket
        .final_match_id()
        .and_then(|id| bracket.get_match(&id))
        .is_some_and(|m| m.finished);
    bracket.status = if final_finished {
        BracketStatus::Completed
    } else if bracket.matches.values().any(|m| m.finished) {
        BracketStatus::Ongoing
    } else {
        BracketStatus::Setup
    };
}
