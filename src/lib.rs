//! Esports tournament brackets: models, generation and progression logic, and a cached
//! client for the bracket REST backend.

pub mod api;
pub mod logic;
pub mod models;

pub use api::{ApiConfig, ApiError, ApiResult, BracketApi, BracketCache, CachedBracketApi};
pub use logic::{
    audit_bracket, bye_matches, create_double_elimination_bracket,
    create_single_elimination_bracket, lower_bracket_match_count, lower_bracket_progression,
    reset_bracket, seed_teams, update_match_result, AuditIssue,
};
pub use models::{
    BestOf, Bracket, BracketError, BracketStatus, BracketType, MapResult, Match, MatchId, Opponent,
    OpponentId, OpponentStatus, Round, Slot, SwissStanding,
};
