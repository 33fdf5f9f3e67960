//! Helpers shared by the bracket integration tests.
#![allow(dead_code)]

use esports_bracket::{update_match_result, Bracket, Match, MatchId, Opponent, Slot};

/// `n` unseeded teams with ids 1..=n; seeding keeps list order.
pub fn teams(n: i64) -> Vec<Opponent> {
    (1..=n).map(|i| Opponent::new(i, format!("Team {i}"))).collect()
}

pub fn seed_in(m: &Match, slot: Slot) -> Option<u32> {
    m.opponent(slot).and_then(|o| o.seed)
}

pub fn seeds_of(bracket: &Bracket, id: MatchId) -> (Option<u32>, Option<u32>) {
    let m = &bracket.matches[&id];
    (seed_in(m, Slot::One), seed_in(m, Slot::Two))
}

/// Play every match that has both opponents, in play order, with the better seed winning 2-0.
pub fn play_favorites(bracket: &mut Bracket) {
    for id in bracket.match_order() {
        let m = &bracket.matches[&id];
        if !m.has_both_opponents() {
            continue;
        }
        let winner = if seed_in(m, Slot::One) < seed_in(m, Slot::Two) {
            Slot::One
        } else {
            Slot::Two
        };
        let (score1, score2) = if winner == Slot::One { (2, 0) } else { (0, 2) };
        update_match_result(bracket, &id, winner, score1, score2).unwrap();
    }
}
