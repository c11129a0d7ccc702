//! Integration tests for tab-rating
//!
//! These tests run whole tournaments through the public API:
//! - Round ordering and the table carried between rounds
//! - Swing handling for incomplete rosters
//! - Error propagation from bad round data
//! - File-backed ingest and storage end to end

mod fixtures;

use mockall::predicate::eq;
use mockall::Sequence;
use std::fs;
use tab_rating::ingest::TabDirectorySource;
use tab_rating::rating::{
    FileRatingStorage, NoOpRatingCalculator, RatingEntry, RatingStorage,
};
use tab_rating::{EloRatingCalculator, RatingError, RatingTable, Tournament};
use tempfile::TempDir;

use fixtures::{round_one, round_two, speaker_tab, MockSource};

fn elo_tournament(rounds: usize) -> Tournament {
    Tournament::new(Box::new(EloRatingCalculator::default()), rounds)
}

/// Source that serves the two fixture rounds in order
fn two_round_source() -> MockSource {
    let mut source = MockSource::new();
    let mut seq = Sequence::new();

    source
        .expect_speaker_tab()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(speaker_tab()));
    source
        .expect_round()
        .with(eq(1))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(round_one()));
    source
        .expect_round()
        .with(eq(2))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(round_two()));

    source
}

#[test]
fn test_rounds_are_requested_in_order() {
    let source = two_round_source();

    let report = elo_tournament(2).run(&source, RatingTable::new()).unwrap();

    assert_eq!(report.rounds.len(), 2);
    assert_eq!(report.rounds[0].round, 1);
    assert_eq!(report.rounds[1].round, 2);
    for summary in &report.rounds {
        assert_eq!(summary.matches, 2);
        assert_eq!(summary.team_pairings, 12);
        assert_eq!(summary.individual_pairings, 48);
        assert_eq!(summary.competitors_rated, 13);
    }
}

#[test]
fn test_first_place_gains_and_last_place_loses() {
    let mut source = MockSource::new();
    source.expect_speaker_tab().returning(|| Ok(speaker_tab()));
    source.expect_round().with(eq(1)).returning(|_| Ok(round_one()));

    let report = elo_tournament(1).run(&source, RatingTable::new()).unwrap();
    let table = &report.table;

    for winner in ["a1", "a2", "e1", "e2"] {
        assert!(table.get(winner).unwrap().rating > 1000.0, "{}", winner);
    }
    for loser in ["d1", "g1", "g2"] {
        assert!(table.get(loser).unwrap().rating < 1000.0, "{}", loser);
    }
}

#[test]
fn test_every_competitor_plays_six_individual_pairings_per_match() {
    let mut source = MockSource::new();
    source.expect_speaker_tab().returning(|| Ok(speaker_tab()));
    source.expect_round().with(eq(1)).returning(|_| Ok(round_one()));

    let report = elo_tournament(1).run(&source, RatingTable::new()).unwrap();

    assert_eq!(report.enrolled, 13);
    assert_eq!(report.table.len(), 13);
    for (name, entry) in report.table.iter() {
        assert_eq!(entry.experience, 6, "{}", name);
    }
}

#[test]
fn test_existing_ratings_carry_into_the_run() {
    let mut source = MockSource::new();
    source.expect_speaker_tab().returning(|| Ok(speaker_tab()));
    source.expect_round().with(eq(1)).returning(|_| Ok(round_one()));

    let mut table = RatingTable::new();
    table.insert("a1", RatingEntry::new(1600.0, 40));
    table.insert("retired", RatingEntry::new(1234.0, 80));

    let report = elo_tournament(1).run(&source, table).unwrap();

    let a1 = report.table.get("a1").unwrap();
    assert_eq!(a1.experience, 46);
    assert!(a1.rating > 1600.0);
    // a1 is expected to win, so it gains less than a fresh teammate
    let a2 = report.table.get("a2").unwrap();
    assert!(a1.rating - 1600.0 < a2.rating - 1000.0);
    assert_eq!(
        report.table.get("retired"),
        Some(&RatingEntry::new(1234.0, 80))
    );
}

#[test]
fn test_unknown_team_aborts_the_run() {
    let mut source = MockSource::new();
    source.expect_speaker_tab().returning(|| Ok(speaker_tab()));
    source.expect_round().with(eq(1)).returning(|_| {
        let mut data = round_one();
        data.ranks.remove("C");
        Ok(data)
    });
    source.expect_round().with(eq(2)).times(0);

    let err = elo_tournament(2)
        .run(&source, RatingTable::new())
        .unwrap_err();

    match err.downcast_ref::<RatingError>() {
        Some(RatingError::UnknownEntity { name, .. }) => assert_eq!(name, "C"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_duplicate_rank_aborts_the_run() {
    let mut source = MockSource::new();
    source.expect_speaker_tab().returning(|| Ok(speaker_tab()));
    source.expect_round().with(eq(1)).returning(|_| {
        let mut data = round_one();
        data.ranks.insert("D".to_string(), 1);
        Ok(data)
    });

    let err = elo_tournament(1)
        .run(&source, RatingTable::new())
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RatingError>(),
        Some(RatingError::InvalidRankedGroup { .. })
    ));
}

#[test]
fn test_dry_run_leaves_ratings_unchanged() {
    let source = two_round_source();
    let tournament = Tournament::new(Box::new(NoOpRatingCalculator::new(1000.0)), 2);

    let report = tournament.run(&source, RatingTable::new()).unwrap();

    assert_eq!(report.table.len(), 13);
    for (_, entry) in report.table.iter() {
        assert_eq!(*entry, RatingEntry::new(1000.0, 0));
    }
}

#[test]
fn test_directory_run_matches_in_memory_run() {
    let temp = TempDir::new().expect("temp dir");
    let data_dir = temp.path().join("tournament_files");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(data_dir.join("speakers.csv"), fixtures::speaker_tab_export()).unwrap();
    for (round, data) in [(1, round_one()), (2, round_two())] {
        fs::write(
            data_dir.join(format!("teams_ranks_round_{}.csv", round)),
            fixtures::ranks_export(&data),
        )
        .unwrap();
        fs::write(
            data_dir.join(format!("teams_debates_round_{}.csv", round)),
            fixtures::debates_export(&data),
        )
        .unwrap();
    }

    let storage = FileRatingStorage::new(temp.path().join("elo.csv"));
    let directory_source = TabDirectorySource::new(&data_dir, "speakers.csv", 2, false);
    let from_files = elo_tournament(2)
        .run(&directory_source, storage.load().unwrap())
        .unwrap();
    storage.save(&from_files.table).unwrap();

    let from_memory = elo_tournament(2)
        .run(&two_round_source(), RatingTable::new())
        .unwrap();

    let reloaded = storage.load().unwrap();
    assert_eq!(reloaded.len(), from_memory.table.len());
    for (name, entry) in from_memory.table.iter() {
        let stored = reloaded.get(name).unwrap();
        assert!((stored.rating - entry.rating).abs() < 1e-9, "{}", name);
        assert_eq!(stored.experience, entry.experience);
    }
}
