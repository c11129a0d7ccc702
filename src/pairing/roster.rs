//! Spreading team results over individual competitors

use crate::types::{Entrant, Pairing, Roster, SwingSlot, TeamId};
use tracing::debug;

/// Individual pairings produced for every team pairing
pub const PAIRINGS_PER_TEAM_PAIRING: usize = 4;

/// First two members of a team, padded with swings when the roster is short
fn team_side(team: &str, roster: &Roster) -> [Entrant; 2] {
    let mut members: Vec<Entrant> = roster
        .members_of(team)
        .take(2)
        .cloned()
        .map(Entrant::Competitor)
        .collect();

    if members.is_empty() {
        debug!("No roster entries for team {}, using two swings", team);
        members.push(Entrant::Swing(SwingSlot::First));
        members.push(Entrant::Swing(SwingSlot::Second));
    }
    if members.len() < 2 {
        debug!("Team {} has a single known member, adding a swing", team);
        members.push(Entrant::Swing(SwingSlot::Single));
    }

    let second = members.pop().unwrap_or(Entrant::Swing(SwingSlot::Second));
    let first = members.pop().unwrap_or(Entrant::Swing(SwingSlot::First));
    [first, second]
}

/// Expand one team win into four individual wins.
///
/// Every one of the first two winners is paired against every one of the
/// first two losers, emitted as (w0,l0) (w1,l1) (w0,l1) (w1,l0).
pub fn expand_pairing(pairing: &Pairing<TeamId>, roster: &Roster) -> [Pairing<Entrant>; 4] {
    let [w0, w1] = team_side(&pairing.winner, roster);
    let [l0, l1] = team_side(&pairing.loser, roster);

    [
        Pairing::new(w0.clone(), l0.clone()),
        Pairing::new(w1.clone(), l1.clone()),
        Pairing::new(w0, l1),
        Pairing::new(w1, l0),
    ]
}

/// Expand a round's team pairings, preserving their order
pub fn expand_pairings(pairings: &[Pairing<TeamId>], roster: &Roster) -> Vec<Pairing<Entrant>> {
    pairings
        .iter()
        .flat_map(|pairing| expand_pairing(pairing, roster))
        .collect()
}
