//! Speaker performance data and the per-round performance modifier

use crate::types::{CompetitorId, PerformanceRecord};
use std::collections::HashMap;

/// Upper bound of the performance modifier
pub const MAX_MODIFIER: f64 = 2.0;

/// Lower bound of the performance modifier
pub const MIN_MODIFIER: f64 = 0.1;

/// Speaker results for every competitor, in speaker-tab order
#[derive(Debug, Clone, Default)]
pub struct PerformanceTable {
    records: Vec<(CompetitorId, PerformanceRecord)>,
    index: HashMap<CompetitorId, usize>,
}

impl PerformanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record; replacement keeps the original position
    pub fn insert(&mut self, competitor: impl Into<CompetitorId>, record: PerformanceRecord) {
        let competitor = competitor.into();
        match self.position(&competitor) {
            Some(position) => self.records[position].1 = record,
            None => {
                self.index.insert(competitor.clone(), self.records.len());
                self.records.push((competitor, record));
            }
        }
    }

    pub fn get(&self, competitor: &str) -> Option<&PerformanceRecord> {
        self.position(competitor).map(|position| &self.records[position].1)
    }

    pub fn contains(&self, competitor: &str) -> bool {
        self.position(competitor).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompetitorId, &PerformanceRecord)> {
        self.records.iter().map(|(id, record)| (id, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, competitor: &str) -> Option<usize> {
        self.index.get(competitor).copied()
    }

    /// First other competitor on the same team, or the competitor itself when
    /// they spoke alone. `None` if the competitor has no record.
    pub fn partner_of<'a>(&'a self, competitor: &'a str) -> Option<&'a str> {
        let team = &self.get(competitor)?.team;
        let partner = self
            .records
            .iter()
            .find(|(id, record)| record.team == *team && id != competitor)
            .map(|(id, _)| id.as_str())
            .unwrap_or(competitor);
        Some(partner)
    }

    /// Multiplier in `[0.1, 2]` from how a competitor spoke against their partner.
    ///
    /// Winners who outspoke their partner and losers who were outspoken get a
    /// larger swing. Competitors without a record (swings, unregistered
    /// speakers) are neutral.
    pub fn modifier(&self, competitor: &str, won: bool, round: usize) -> f64 {
        let (Some(own), Some(partner)) = (
            self.get(competitor),
            self.partner_of(competitor).and_then(|partner| self.get(partner)),
        ) else {
            return 1.0;
        };

        let delta = f64::from(own.round_score(round) - partner.round_score(round));
        let modifier = if won {
            1.0 + delta / 10.0
        } else {
            1.0 - delta / 10.0
        };

        if modifier > MAX_MODIFIER {
            return MAX_MODIFIER;
        }
        if modifier < MIN_MODIFIER {
            return MIN_MODIFIER;
        }
        modifier
    }
}

impl<C> FromIterator<(C, PerformanceRecord)> for PerformanceTable
where
    C: Into<CompetitorId>,
{
    fn from_iter<I: IntoIterator<Item = (C, PerformanceRecord)>>(iter: I) -> Self {
        let mut table = PerformanceTable::new();
        for (competitor, record) in iter {
            table.insert(competitor, record);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(entries: &[(&str, &str, i32)]) -> PerformanceTable {
        entries
            .iter()
            .map(|(name, team, score)| {
                (
                    name.to_string(),
                    PerformanceRecord::new(*team, vec![*score], *score as f64),
                )
            })
            .collect()
    }

    #[test]
    fn test_partner_lookup() {
        let speakers = table(&[("alice", "Team", 70), ("bob", "Team", 60), ("cara", "Other", 75)]);
        assert_eq!(speakers.partner_of("alice"), Some("bob"));
        assert_eq!(speakers.partner_of("bob"), Some("alice"));
        assert_eq!(speakers.partner_of("cara"), Some("cara"));
        assert_eq!(speakers.partner_of("dave"), None);
    }

    #[test]
    fn test_partner_is_first_teammate() {
        let speakers = table(&[("a", "T", 70), ("b", "T", 71), ("c", "T", 72)]);
        assert_eq!(speakers.partner_of("c"), Some("a"));
        assert_eq!(speakers.partner_of("a"), Some("b"));
    }

    #[test]
    fn test_modifier_direction() {
        let speakers = table(&[("alice", "Team", 75), ("bob", "Team", 72)]);

        assert!((speakers.modifier("alice", true, 1) - 1.3).abs() < 1e-12);
        assert!((speakers.modifier("alice", false, 1) - 0.7).abs() < 1e-12);
        assert!((speakers.modifier("bob", true, 1) - 0.7).abs() < 1e-12);
        assert!((speakers.modifier("bob", false, 1) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_modifier_neutral_cases() {
        let speakers = table(&[("alice", "Team", 75), ("solo", "Alone", 80)]);
        assert_eq!(speakers.modifier("ghost", true, 1), 1.0);
        assert_eq!(speakers.modifier("solo", true, 1), 1.0);
        assert_eq!(speakers.modifier("solo", false, 1), 1.0);
    }

    #[test]
    fn test_modifier_clamps() {
        let speakers = table(&[("big", "T", 80), ("small", "T", 60)]);
        assert_eq!(speakers.modifier("big", true, 1), 2.0);
        assert_eq!(speakers.modifier("small", true, 1), 0.1);
    }

    #[test]
    fn test_modifier_floor() {
        let speakers = table(&[("a", "T", 79), ("b", "T", 70)]);
        assert_eq!(speakers.modifier("a", false, 1), 0.1);

        let speakers = table(&[("a", "T", 80), ("b", "T", 70)]);
        assert_eq!(speakers.modifier("a", false, 1), 0.1);

        let speakers = table(&[("a", "T", 78), ("b", "T", 70)]);
        assert!((speakers.modifier("a", false, 1) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_modifier_uses_requested_round() {
        let speakers: PerformanceTable = vec![
            ("a", PerformanceRecord::new("T", vec![70, 78], 74.0)),
            ("b", PerformanceRecord::new("T", vec![70, 73], 71.5)),
        ]
        .into_iter()
        .collect();

        assert_eq!(speakers.modifier("a", true, 1), 1.0);
        assert!((speakers.modifier("a", true, 2) - 1.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_modifier_bounded(own in 0i32..100, other in 0i32..100, won in any::<bool>()) {
            let speakers = table(&[("a", "T", own), ("b", "T", other)]);
            let modifier = speakers.modifier("a", won, 1);
            prop_assert!(modifier <= MAX_MODIFIER);
            prop_assert!(modifier >= MIN_MODIFIER);
        }
    }
}
