//! Integration tests for double elimination: layout, loser wiring and full playthroughs.

mod common;

use common::{play_favorites, seeds_of, teams};
use esports_bracket::{
    bye_matches, create_double_elimination_bracket, lower_bracket_match_count,
    lower_bracket_progression, update_match_result, BestOf, BracketStatus, BracketType, MatchId,
    Slot,
};

#[test]
fn eight_teams_layout() {
    let b = create_double_elimination_bracket(teams(8)).unwrap();
    assert_eq!(b.kind, BracketType::Double);
    assert_eq!(b.name, "Double Elimination");
    assert_eq!(b.matches.len(), 14);
    assert_eq!(b.rounds.len(), 8);
    let sizes: Vec<usize> = b.rounds.iter().map(|r| r.matches.len()).collect();
    assert_eq!(sizes, [4, 2, 1, 2, 2, 1, 1, 1]);

    let names: Vec<&str> = b.rounds.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Quarterfinals",
            "Upper Semifinals",
            "Upper Final",
            "Lower Round 1",
            "Lower Quarterfinals",
            "Lower Semifinals",
            "Lower Final",
            "Grand Final",
        ]
    );

    // Lower rounds continue the global round numbering.
    assert_eq!(b.matches[&MatchId::lower(1, 1)].round, 4);
    assert_eq!(b.matches[&MatchId::GrandFinal].round, 8);
    assert_eq!(b.final_match_id(), Some(MatchId::GrandFinal));
}

#[test]
fn sixteen_teams_name_lower_rounds_from_the_end() {
    let b = create_double_elimination_bracket(teams(16)).unwrap();
    assert_eq!(b.upper_rounds(), 4);
    let lower: Vec<&str> = b.rounds[4..10].iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        lower,
        [
            "Lower Round 1",
            "Lower Round 2",
            "Lower Round 3",
            "Lower Quarterfinals",
            "Lower Semifinals",
            "Lower Final",
        ]
    );
    assert_eq!(b.rounds[10].name, "Grand Final");
}

#[test]
fn series_lengths() {
    let b = create_double_elimination_bracket(teams(8)).unwrap();
    assert_eq!(b.matches[&MatchId::upper(1, 1)].bestof, BestOf::Bo3);
    assert_eq!(b.matches[&MatchId::upper(3, 1)].bestof, BestOf::Bo5);
    assert_eq!(b.matches[&MatchId::lower(3, 1)].bestof, BestOf::Bo3);
    assert_eq!(b.matches[&MatchId::lower(4, 1)].bestof, BestOf::Bo5);
    assert_eq!(b.matches[&MatchId::GrandFinal].bestof, BestOf::Bo7);
}

#[test]
fn loser_wiring() {
    let b = create_double_elimination_bracket(teams(8)).unwrap();
    let loserto = |id: MatchId| b.matches[&id].loserto;
    let winnerto = |id: MatchId| b.matches[&id].winnerto;

    assert_eq!(loserto(MatchId::upper(1, 1)), Some(MatchId::lower(1, 1)));
    assert_eq!(loserto(MatchId::upper(1, 2)), Some(MatchId::lower(1, 1)));
    assert_eq!(loserto(MatchId::upper(1, 3)), Some(MatchId::lower(1, 2)));
    assert_eq!(loserto(MatchId::upper(1, 4)), Some(MatchId::lower(1, 2)));
    assert_eq!(loserto(MatchId::upper(2, 1)), Some(MatchId::lower(2, 1)));
    assert_eq!(loserto(MatchId::upper(2, 2)), Some(MatchId::lower(2, 2)));
    assert_eq!(loserto(MatchId::upper(3, 1)), Some(MatchId::lower(4, 1)));

    assert_eq!(winnerto(MatchId::upper(3, 1)), Some(MatchId::GrandFinal));
    assert_eq!(winnerto(MatchId::lower(1, 2)), Some(MatchId::lower(2, 2)));
    assert_eq!(winnerto(MatchId::lower(2, 2)), Some(MatchId::lower(3, 1)));
    assert_eq!(winnerto(MatchId::lower(4, 1)), Some(MatchId::GrandFinal));
    assert_eq!(winnerto(MatchId::GrandFinal), None);
    assert_eq!(loserto(MatchId::lower(1, 1)), None);
}

#[test]
fn favorites_reach_the_grand_final() {
    let mut b = create_double_elimination_bracket(teams(8)).unwrap();
    play_favorites(&mut b);

    assert_eq!(seeds_of(&b, MatchId::lower(1, 1)), (Some(2), Some(4)));
    assert_eq!(seeds_of(&b, MatchId::lower(1, 2)), (Some(6), Some(8)));
    assert_eq!(seeds_of(&b, MatchId::lower(2, 1)), (Some(2), Some(3)));
    assert_eq!(seeds_of(&b, MatchId::lower(4, 1)), (Some(2), Some(5)));
    assert_eq!(seeds_of(&b, MatchId::GrandFinal), (Some(1), Some(2)));
    assert_eq!(b.status, BracketStatus::Completed);
    assert!(b.matches.values().all(|m| m.finished));
}

#[test]
fn drop_in_slots_do_not_depend_on_arrival_order() {
    let mut upper_first = create_double_elimination_bracket(teams(8)).unwrap();
    for n in 1..=4 {
        update_match_result(&mut upper_first, &MatchId::upper(1, n), Slot::One, 2, 1).unwrap();
    }
    let mut lower_first = upper_first.clone();

    update_match_result(&mut upper_first, &MatchId::upper(2, 1), Slot::One, 2, 0).unwrap();
    update_match_result(&mut upper_first, &MatchId::lower(1, 1), Slot::One, 2, 0).unwrap();

    update_match_result(&mut lower_first, &MatchId::lower(1, 1), Slot::One, 2, 0).unwrap();
    update_match_result(&mut lower_first, &MatchId::upper(2, 1), Slot::One, 2, 0).unwrap();

    // Lower survivor in slot 1, upper dropout in slot 2.
    assert_eq!(seeds_of(&upper_first, MatchId::lower(2, 1)), (Some(2), Some(3)));
    assert_eq!(
        upper_first.matches[&MatchId::lower(2, 1)],
        lower_first.matches[&MatchId::lower(2, 1)]
    );
}

#[test]
fn two_teams_have_no_lower_bracket() {
    let mut b = create_double_elimination_bracket(teams(2)).unwrap();
    assert_eq!(b.matches.len(), 2);
    assert_eq!(b.upper_rounds(), 1);
    let names: Vec<&str> = b.rounds.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Upper Final", "Grand Final"]);
    assert_eq!(b.matches[&MatchId::upper(1, 1)].loserto, Some(MatchId::GrandFinal));

    update_match_result(&mut b, &MatchId::upper(1, 1), Slot::Two, 1, 3).unwrap();
    assert_eq!(seeds_of(&b, MatchId::GrandFinal), (Some(2), Some(1)));
    update_match_result(&mut b, &MatchId::GrandFinal, Slot::One, 4, 2).unwrap();
    assert_eq!(b.status, BracketStatus::Completed);
}

#[test]
fn five_teams_with_byes_play_to_completion() {
    let mut b = create_double_elimination_bracket(teams(5)).unwrap();
    assert_eq!(
        bye_matches(&b),
        [MatchId::upper(1, 3), MatchId::upper(2, 2), MatchId::lower(3, 1)]
    );
    assert_eq!(seeds_of(&b, MatchId::upper(3, 1)), (None, Some(5)));

    play_favorites(&mut b);
    // Seed 2 skips the empty lower match through the L3M1 bye.
    assert_eq!(seeds_of(&b, MatchId::lower(3, 1)), (Some(2), None));
    assert_eq!(seeds_of(&b, MatchId::lower(4, 1)), (Some(2), Some(5)));
    assert_eq!(seeds_of(&b, MatchId::GrandFinal), (Some(1), Some(2)));
    assert!(b.is_completed());
}

#[test]
fn lower_round_sizes() {
    let sizes: Vec<u32> = (1..=4).map(|r| lower_bracket_match_count(r, 3)).collect();
    assert_eq!(sizes, [2, 2, 1, 1]);
    let sizes: Vec<u32> = (1..=6).map(|r| lower_bracket_match_count(r, 4)).collect();
    assert_eq!(sizes, [4, 4, 2, 2, 1, 1]);
    assert_eq!(lower_bracket_match_count(0, 3), 0);
    assert_eq!(lower_bracket_match_count(5, 3), 0);
}

#[test]
fn lower_round_helpers_accept_any_input() {
    assert_eq!(lower_bracket_match_count(1, 32), 1 << 30);
    assert_eq!(lower_bracket_match_count(1, 33), 1 << 31);
    assert_eq!(lower_bracket_match_count(1, 40), 0);
    assert_eq!(lower_bracket_match_count(u32::MAX, 3), 0);
    assert_eq!(lower_bracket_match_count(u32::MAX, u32::MAX), 0);

    assert_eq!(lower_bracket_progression(u32::MAX, 4), MatchId::lower(u32::MAX, 4));
    assert_eq!(lower_bracket_progression(2, u32::MAX), MatchId::lower(3, 1 << 31));
}

#[test]
fn lower_progression() {
    assert_eq!(lower_bracket_progression(1, 2), MatchId::lower(2, 2));
    assert_eq!(lower_bracket_progression(2, 1), MatchId::lower(3, 1));
    assert_eq!(lower_bracket_progression(2, 2), MatchId::lower(3, 1));
    assert_eq!(lower_bracket_progression(4, 3), MatchId::lower(5, 2));
}
