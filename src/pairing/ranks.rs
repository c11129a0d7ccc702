//! Rank-pairing generation for a single match

use crate::error::{EntityKind, RatingError, Result};
use crate::types::{Pairing, RankedGroup, TeamId, TeamRanks, TEAMS_PER_MATCH};
use std::collections::HashSet;

/// Expand one ranked match into every implied (winner, loser) team pairing.
///
/// Teams are ordered by rank and every better-placed team is recorded as
/// beating every worse-placed team, so a four-team match yields six pairings
/// in the order (1,2) (1,3) (1,4) (2,3) (2,4) (3,4).
///
/// Fails with [`RatingError::UnknownEntity`] when a team has no rank and with
/// [`RatingError::InvalidRankedGroup`] when the ranks are not a permutation
/// of `1..=4`.
pub fn team_pairings(group: &RankedGroup, ranks: &TeamRanks) -> Result<Vec<Pairing<TeamId>>> {
    if group.teams.len() != TEAMS_PER_MATCH {
        return Err(RatingError::InvalidRankedGroup {
            reason: format!(
                "expected {} teams, got {} ({})",
                TEAMS_PER_MATCH,
                group.teams.len(),
                group.teams.join(", ")
            ),
        }
        .into());
    }

    let mut ranked = Vec::with_capacity(group.teams.len());
    let mut seen_ranks = HashSet::new();
    for team in &group.teams {
        let rank = *ranks.get(team).ok_or_else(|| RatingError::UnknownEntity {
            kind: EntityKind::Team,
            name: team.clone(),
        })?;

        if rank == 0 || rank as usize > TEAMS_PER_MATCH {
            return Err(RatingError::InvalidRankedGroup {
                reason: format!("team {} has out-of-range rank {}", team, rank),
            }
            .into());
        }
        if !seen_ranks.insert(rank) {
            return Err(RatingError::InvalidRankedGroup {
                reason: format!("rank {} assigned twice (team {})", rank, team),
            }
            .into());
        }

        ranked.push((team, rank));
    }

    ranked.sort_by_key(|(_, rank)| *rank);

    let mut pairings = Vec::with_capacity(ranked.len() * (ranked.len() - 1) / 2);
    for (i, (winner, _)) in ranked.iter().enumerate() {
        for (loser, _) in &ranked[i + 1..] {
            pairings.push(Pairing::new((*winner).clone(), (*loser).clone()));
        }
    }

    Ok(pairings)
}

/// Team pairings for every match of a round, in match order
pub fn team_pairings_for_round(
    groups: &[RankedGroup],
    ranks: &TeamRanks,
) -> Result<Vec<Pairing<TeamId>>> {
    let mut pairings = Vec::with_capacity(groups.len() * 6);
    for group in groups {
        pairings.extend(team_pairings(group, ranks)?);
    }
    Ok(pairings)
}
