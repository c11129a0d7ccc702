//! The rating table carried from round to round

use crate::types::{CompetitorId, Entrant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rating and number of rated matches for one competitor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub rating: f64,
    pub experience: u32,
}

impl RatingEntry {
    pub fn new(rating: f64, experience: u32) -> Self {
        Self { rating, experience }
    }
}

/// What the table knows about one side of a pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    /// Listed in the table; rating will be adjusted
    Known(RatingEntry),
    /// Swing or unlisted competitor; used only as an opponent
    Unknown,
}

/// Competitor -> rating entry, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingTable {
    entries: BTreeMap<CompetitorId, RatingEntry>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, competitor: &str) -> Option<&RatingEntry> {
        self.entries.get(competitor)
    }

    pub fn contains(&self, competitor: &str) -> bool {
        self.entries.contains_key(competitor)
    }

    pub fn standing(&self, entrant: &Entrant) -> Standing {
        entrant
            .competitor_id()
            .and_then(|id| self.entries.get(id))
            .map_or(Standing::Unknown, |entry| Standing::Known(*entry))
    }

    pub fn insert(&mut self, competitor: impl Into<CompetitorId>, entry: RatingEntry) {
        self.entries.insert(competitor.into(), entry);
    }

    /// Add a competitor at `(initial_rating, 0)` unless already listed.
    /// Returns whether the competitor was added.
    pub fn enroll(&mut self, competitor: &str, initial_rating: f64) -> bool {
        if self.entries.contains_key(competitor) {
            return false;
        }
        self.entries
            .insert(competitor.to_string(), RatingEntry::new(initial_rating, 0));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompetitorId, &RatingEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> FromIterator<(C, RatingEntry)> for RatingTable
where
    C: Into<CompetitorId>,
{
    fn from_iter<I: IntoIterator<Item = (C, RatingEntry)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(competitor, entry)| (competitor.into(), entry))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SwingSlot;

    #[test]
    fn test_standing() {
        let table: RatingTable = vec![("ana", RatingEntry::new(1100.0, 4))]
            .into_iter()
            .collect();

        assert_eq!(
            table.standing(&Entrant::competitor("ana")),
            Standing::Known(RatingEntry::new(1100.0, 4))
        );
        assert_eq!(
            table.standing(&Entrant::competitor("boris")),
            Standing::Unknown
        );
        assert_eq!(
            table.standing(&Entrant::Swing(SwingSlot::First)),
            Standing::Unknown
        );
    }

    #[test]
    fn test_enroll_keeps_existing_entries() {
        let mut table = RatingTable::new();
        table.insert("ana", RatingEntry::new(1200.0, 9));

        assert!(!table.enroll("ana", 1000.0));
        assert!(table.enroll("boris", 1000.0));

        assert_eq!(table.get("ana"), Some(&RatingEntry::new(1200.0, 9)));
        assert_eq!(table.get("boris"), Some(&RatingEntry::new(1000.0, 0)));
        assert_eq!(table.len(), 2);
    }
}
