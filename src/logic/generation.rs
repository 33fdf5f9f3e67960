//! Bracket generation: single and double elimination graphs from a team list.
//!
//! Teams are seeded, padded to the next power of two and paired by adjacent seeds in
//! round 1 (1 vs 2, 3 vs 4, ...). Every match is wired to its successors through
//! `winnerto` / `loserto` at creation; later rounds start empty and are filled by
//! progression. Padding slots become byes.

use super::progression::resolve_byes;
use super::seeding::seed_teams;
use crate::models::{BestOf, Bracket, BracketError, BracketType, Match, MatchId, Opponent, Round};

const ROUND_NAMES: [&str; 6] = [
    "Final",
    "Semifinals",
    "Quarterfinals",
    "Round of 16",
    "Round of 32",
    "Round of 64",
];

const LOWER_ROUND_NAMES: [&str; 3] = ["Lower Final", "Lower Semifinals", "Lower Quarterfinals"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RoundNaming {
    Single,
    Upper,
    Lower,
}

/// Build a single elimination bracket.
///
/// `ceil(log2(n))` rounds, round r has `2^(rounds - r)` matches, the final is best-of-5 and
/// every other round best-of-3.
pub fn create_single_elimination_bracket(teams: Vec<Opponent>) -> Result<Bracket, BracketError> {
    let (seeded, rounds) = prepare(teams)?;
    let mut bracket = Bracket::new("Single Elimination", BracketType::Single, seeded.len());
    push_upper_rounds(&mut bracket, &seeded, rounds, None);
    resolve_byes(&mut bracket);
    log::debug!(
        "Generated single elimination bracket {} ({} teams, {} matches)",
        bracket.id,
        bracket.teamcount,
        bracket.matches.len()
    );
    Ok(bracket)
}

/// Build a double elimination bracket: upper bracket, `2 * (rounds - 1)` lower rounds and a
/// best-of-7 grand final between the two bracket champions.
///
/// Upper round 1 losers pair up in lower round 1. Every even lower round is a drop-in round
/// where lower survivors (slot 1) meet the losers of the next upper round (slot 2); odd lower
/// rounds after the first halve the field. With two teams there is no lower bracket and the
/// upper final loser goes straight to the grand final.
pub fn create_double_elimination_bracket(teams: Vec<Opponent>) -> Result<Bracket, BracketError> {
    let (seeded, upper_rounds) = prepare(teams)?;
    let lower_rounds = (upper_rounds - 1) * 2;
    let mut bracket = Bracket::new("Double Elimination", BracketType::Double, seeded.len());
    push_upper_rounds(&mut bracket, &seeded, upper_rounds, Some(lower_rounds));

    for round in 1..=lower_rounds {
        let bestof = if round == lower_rounds { BestOf::Bo5 } else { BestOf::Bo3 };
        let global_round = upper_rounds + round;
        let matches = (1..=lower_bracket_match_count(round, upper_rounds))
            .map(|number| {
                let mut m = Match::new(MatchId::lower(round, number), &bracket.id, global_round, bestof);
                m.winnerto = Some(if round < lower_rounds {
                    lower_bracket_progression(round, number)
                } else {
                    MatchId::GrandFinal
                });
                m
            })
            .collect();
        let name = round_name(round, lower_rounds, RoundNaming::Lower);
        push_round(&mut bracket, global_round, name, bestof, matches);
    }

    let final_round = upper_rounds + lower_rounds + 1;
    let grand_final = Match::new(MatchId::GrandFinal, &bracket.id, final_round, BestOf::Bo7);
    push_round(
        &mut bracket,
        final_round,
        "Grand Final".to_string(),
        BestOf::Bo7,
        vec![grand_final],
    );

    resolve_byes(&mut bracket);
    log::debug!(
        "Generated double elimination bracket {} ({} teams, {} matches)",
        bracket.id,
        bracket.teamcount,
        bracket.matches.len()
    );
    Ok(bracket)
}

/// Number of matches in lower round `lower_round` for an upper bracket of `upper_rounds`.
///
/// Lower rounds come in pairs of equal size that halve after each drop-in round
/// (8 teams: 2, 2, 1, 1). Returns 0 outside the lower bracket, and when the round would not
/// fit in a `u32`.
pub fn lower_bracket_match_count(lower_round: u32, upper_rounds: u32) -> u32 {
    let halvings = lower_round.saturating_add(1) / 2 + 1;
    if lower_round == 0 || halvings > upper_rounds {
        return 0;
    }
    1u32.checked_shl(upper_rounds - halvings).unwrap_or(0)
}

/// Where the winner of a lower bracket match (other than the lower final) plays next.
///
/// Odd rounds feed the drop-in round at the same index; even rounds pair up.
pub fn lower_bracket_progression(lower_round: u32, number: u32) -> MatchId {
    let next = lower_round.saturating_add(1);
    if lower_round % 2 == 0 {
        MatchId::lower(next, number / 2 + number % 2)
    } else {
        MatchId::lower(next, number)
    }
}

/// Validate and seed the teams; returns them with the number of (upper) rounds.
fn prepare(teams: Vec<Opponent>) -> Result<(Vec<Opponent>, u32), BracketError> {
    if teams.len() < 2 {
        return Err(BracketError::NotEnoughTeams { count: teams.len() });
    }
    let seeded = seed_teams(teams)?;
    let rounds = seeded.len().next_power_of_two().trailing_zeros();
    Ok((seeded, rounds))
}

/// Add the upper (or only) bracket. `lower_rounds` is Some for double elimination.
fn push_upper_rounds(
    bracket: &mut Bracket,
    seeded: &[Opponent],
    rounds: u32,
    lower_rounds: Option<u32>,
) {
    let naming = if lower_rounds.is_some() {
        RoundNaming::Upper
    } else {
        RoundNaming::Single
    };

    for round in 1..=rounds {
        let bestof = if round == rounds { BestOf::Bo5 } else { BestOf::Bo3 };
        let matches = (1..=1u32 << (rounds - round))
            .map(|number| {
                let mut m = Match::new(MatchId::upper(round, number), &bracket.id, round, bestof);
                if round == 1 {
                    let first = (number as usize - 1) * 2;
                    m.opponent1 = seeded.get(first).cloned();
                    m.opponent2 = seeded.get(first + 1).cloned();
                }
                m.winnerto = if round < rounds {
                    Some(MatchId::upper(round + 1, (number + 1) / 2))
                } else if lower_rounds.is_some() {
                    Some(MatchId::GrandFinal)
                } else {
                    None
                };
                m.loserto = lower_rounds.map(|lower| upper_loser_target(round, number, lower));
                m
            })
            .collect();
        let name = round_name(round, rounds, naming);
        push_round(bracket, round, name, bestof, matches);
    }
}

/// Lower bracket destination of the loser of upper match `R<round>M<number>`.
fn upper_loser_target(round: u32, number: u32, lower_rounds: u32) -> MatchId {
    if lower_rounds == 0 {
        MatchId::GrandFinal
    } else if round == 1 {
        MatchId::lower(1, (number + 1) / 2)
    } else {
        MatchId::lower(2 * (round - 1), number)
    }
}

fn push_round(bracket: &mut Bracket, round: u32, name: String, bestof: BestOf, matches: Vec<Match>) {
    let ids = matches.iter().map(|m| m.id).collect();
    bracket.push_round(
        Round {
            round,
            name,
            matches: ids,
            bestof: Some(bestof),
        },
        matches,
    );
}

/// Display name of `round` out of `total`, counted back from the last round.
fn round_name(round: u32, total: u32, naming: RoundNaming) -> String {
    let from_end = (total - round) as usize;
    let named = match naming {
        RoundNaming::Single => ROUND_NAMES.get(from_end),
        RoundNaming::Upper => match from_end {
            0 => Some(&"Upper Final"),
            1 => Some(&"Upper Semifinals"),
            _ => ROUND_NAMES.get(from_end),
        },
        RoundNaming::Lower => LOWER_ROUND_NAMES.get(from_end),
    };
    match (named, naming) {
        (Some(name), _) => name.to_string(),
        (None, RoundNaming::Single) => format!("Round {}", round),
        (None, RoundNaming::Upper) => format!("Upper Round {}", round),
        (None, RoundNaming::Lower) => format!("Lower Round {}", round),
    }
}
