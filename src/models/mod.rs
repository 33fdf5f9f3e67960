//! Data structures for tournament brackets: brackets, rounds, matches, opponents.

mod bracket;
mod game;
mod opponent;

pub use bracket::{
    generate_bracket_id, Bracket, BracketError, BracketStatus, BracketType, Round, BRACKET_ID_LEN,
};
pub use game::{BestOf, MapResult, Match, MatchId, Slot};
pub use opponent::{Opponent, OpponentId, OpponentStatus, SwissStanding};
