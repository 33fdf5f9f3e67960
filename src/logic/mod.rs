//! Bracket business logic: seeding, generation, progression, audit.

mod audit;
mod generation;
mod progression;
mod seeding;

pub use audit::{audit_bracket, AuditIssue};
pub use generation::{
    create_double_elimination_bracket, create_single_elimination_bracket,
    lower_bracket_match_count, lower_bracket_progression,
};
pub use progression::{bye_matches, reset_bracket, update_match_result};
pub use seeding::seed_teams;
