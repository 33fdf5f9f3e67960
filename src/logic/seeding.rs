//! Seeding: order the team list before it is laid out in round 1.

use crate::models::{BracketError, Opponent};
use std::collections::HashSet;

/// Assign seeds and sort ascending.
///
/// Teams that already carry a seed keep it. Unseeded teams rank after every seeded team,
/// in list order, and get the next free seed numbers. Seed 0, repeated seeds and running out of
/// seed numbers are rejected.
pub fn seed_teams(teams: Vec<Opponent>) -> Result<Vec<Opponent>, BracketError> {
    let mut seen = HashSet::new();
    for team in &teams {
        if let Some(seed) = team.seed {
            if seed == 0 {
                return Err(BracketError::InvalidSeed {
                    team: team.name.clone(),
                });
            }
            if !seen.insert(seed) {
                return Err(BracketError::DuplicateSeed(seed));
            }
        }
    }

    let mut next_seed = seen.iter().copied().max().unwrap_or(0);
    let mut seeded: Vec<Opponent> = teams
        .into_iter()
        .map(|mut team| -> Result<Opponent, BracketError> {
            if team.seed.is_none() {
                next_seed = next_seed.checked_add(1).ok_or_else(|| BracketError::SeedOverflow {
                    team: team.name.clone(),
                })?;
                team.seed = Some(next_seed);
            }
            Ok(team)
        })
        .collect::<Result<_, BracketError>>()?;
    seeded.sort_by_key(|t| t.seed);
    Ok(seeded)
}
