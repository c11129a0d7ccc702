//! Test fixtures and mock implementations for integration testing

use mockall::mock;
use tab_rating::ingest::{RoundData, RoundSource, SpeakerTab};
use tab_rating::{PerformanceRecord, RankedGroup, TeamRanks};

// Mock round source that hands out prepared round data
mock! {
    pub Source {}

    impl RoundSource for Source {
        fn speaker_tab(&self) -> tab_rating::Result<SpeakerTab>;
        fn round(&self, round: usize) -> tab_rating::Result<RoundData>;
    }
}

/// Two matches of four teams. Team D has one known speaker and team H none,
/// so both need swings.
pub fn speaker_tab() -> SpeakerTab {
    let speakers = [
        ("a1", "A", [76, 75]),
        ("a2", "A", [74, 77]),
        ("b1", "B", [75, 74]),
        ("b2", "B", [75, 72]),
        ("c1", "C", [73, 76]),
        ("c2", "C", [71, 75]),
        ("d1", "D", [70, 73]),
        ("e1", "E", [78, 70]),
        ("e2", "E", [72, 71]),
        ("f1", "F", [74, 74]),
        ("f2", "F", [73, 76]),
        ("g1", "G", [69, 72]),
        ("g2", "G", [72, 70]),
    ];

    let mut tab = SpeakerTab::default();
    for (name, team, scores) in speakers {
        let average = scores.iter().sum::<i32>() as f64 / scores.len() as f64;
        tab.roster.insert(name, team);
        tab.performance
            .insert(name, PerformanceRecord::new(team, scores.to_vec(), average));
    }
    tab
}

/// Build round data from matches listed best team first
pub fn round_data(matches: &[[&str; 4]]) -> RoundData {
    let mut ranks = TeamRanks::new();
    let mut groups = Vec::new();
    for teams in matches {
        for (place, team) in teams.iter().enumerate() {
            ranks.insert(team.to_string(), place as u32 + 1);
        }
        // reversed so the group order differs from rank order
        groups.push(RankedGroup::new(teams.iter().rev().copied()));
    }
    RoundData { groups, ranks }
}

pub fn round_one() -> RoundData {
    round_data(&[["A", "B", "C", "D"], ["E", "F", "G", "H"]])
}

pub fn round_two() -> RoundData {
    round_data(&[["G", "C", "E", "A"], ["H", "D", "B", "F"]])
}

/// Tab-separated exports matching `speaker_tab`, `round_one` and `round_two`
pub fn speaker_tab_export() -> String {
    let mut text = String::from("rank\tname\tinstitution\tteam\tr1\tr2\tavg\n");
    for (index, (name, record)) in speaker_tab().performance.iter().enumerate() {
        text.push_str(&format!(
            "{}\t{}\tUni\t{}\t{}\t{}\t{}\n",
            index + 1,
            name,
            record.team,
            record.scores[0],
            record.scores[1],
            record.average
        ));
    }
    text
}

pub fn ranks_export(data: &RoundData) -> String {
    let mut text = String::from("team\tresult\n");
    for group in &data.groups {
        for team in &group.teams {
            let ordinal = match data.ranks[team] {
                1 => "1st",
                2 => "2nd",
                3 => "3rd",
                _ => "4th",
            };
            text.push_str(&format!("{}\t{}\n", team, ordinal));
        }
    }
    text
}

pub fn debates_export(data: &RoundData) -> String {
    let mut text = String::from("room\tOG\tOO\tCG\tCO\n");
    for (room, group) in data.groups.iter().enumerate() {
        text.push_str(&format!("Room {}\t{}\n", room + 1, group.teams.join("\t")));
    }
    text
}
