//! Integration tests for the bracket engine
//!
//! Tests the full stack: generation for every format, result reporting,
//! snapshots through JSON, standings and sessions

use bracket_core::{
    generate, generate_with, resolve_byes, standings, update_match_result, BracketConfig,
    BracketData, BracketSession, BracketType, MatchResult, MatchState, Seed, SubBracket, Team,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn teams(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("T{}", i), format!("Team {}", i)))
        .collect()
}

fn expected_rounds(n: usize) -> usize {
    let mut rounds = 1;
    while (1usize << rounds) < n {
        rounds += 1;
    }
    rounds
}

/// Report every ready match, team1 always winning, until nothing is ready
fn play_out(mut bracket: BracketData) -> BracketData {
    loop {
        let ready: Vec<_> = bracket
            .matches()
            .filter(|m| m.state() == MatchState::Ready)
            .map(|m| (m.id.clone(), m.team1.as_ref().map(|t| t.id.clone())))
            .collect();
        if ready.is_empty() {
            return bracket;
        }
        for (id, winner) in ready {
            let result = MatchResult {
                winner,
                ..Default::default()
            };
            bracket = update_match_result(&bracket, id.as_str(), result);
        }
    }
}

// ============================================================================
// SINGLE ELIMINATION
// ============================================================================

#[test]
fn test_single_elimination_shape_for_all_sizes() {
    for n in 1..=40 {
        let bracket = generate(BracketType::SingleElimination, &teams(n), false);
        let rounds = expected_rounds(n);
        let size = 1usize << rounds;

        assert_eq!(bracket.rounds().len(), rounds, "n={}", n);
        let first: Vec<_> = bracket.round_matches(&bracket.rounds()[0]).collect();
        assert_eq!(first.len(), size / 2, "n={}", n);

        let seated: usize = first.iter().map(|m| m.teams().count()).sum();
        assert_eq!(seated, n, "n={}", n);
        // every first-round slot exists, filled or empty
        assert_eq!(first.len() * 2, size);

        if !n.is_power_of_two() {
            assert!(first.iter().any(|m| m.bye), "n={} should have a bye", n);
        }
        for m in first.iter().filter(|m| m.bye) {
            assert!(m.teams().count() <= 1);
        }
    }
}

#[test]
fn test_eight_seeded_teams() {
    let bracket = generate(BracketType::SingleElimination, &teams(8), true);
    assert_eq!(bracket.rounds().len(), 3);
    let first: Vec<_> = bracket.round_matches(&bracket.rounds()[0]).collect();
    assert_eq!(first.len(), 4);
    assert!(first.iter().all(|m| !m.bye && m.state() == MatchState::Ready));
}

#[test]
fn test_five_teams_three_byes() {
    let bracket = generate(BracketType::SingleElimination, &teams(5), false);
    assert_eq!(bracket.rounds().len(), 3);
    let first: Vec<_> = bracket.round_matches(&bracket.rounds()[0]).collect();
    assert_eq!(first.len(), 4);
    assert_eq!(first.iter().filter(|m| m.bye).count(), 3);
}

#[test]
fn test_single_elimination_plays_to_a_champion() {
    let bracket = resolve_byes(&generate(BracketType::SingleElimination, &teams(6), false));
    let done = play_out(bracket);
    assert!(done.is_finished());
    assert_eq!(done.champion().map(|t| t.id.as_str()), Some("T1"));
}

// ============================================================================
// DOUBLE ELIMINATION
// ============================================================================

#[test]
fn test_double_elimination_finals_and_consolation() {
    for n in 2..=20 {
        let bracket = generate(BracketType::DoubleElimination, &teams(n), false);
        let finals: Vec<_> = bracket.rounds().iter().filter(|r| r.is_finals).collect();
        assert_eq!(finals.len(), 1, "n={}", n);
        if n > 2 {
            assert!(
                bracket.rounds().iter().any(|r| r.is_consolation),
                "n={}",
                n
            );
        }
    }
}

#[test]
fn test_double_elimination_grand_finals() {
    let bracket = generate(BracketType::DoubleElimination, &teams(8), false);
    let grand = bracket
        .rounds()
        .iter()
        .find(|r| r.name == "Grand Finals")
        .unwrap();
    assert_eq!(grand.match_ids.len(), 1);
    assert_eq!(grand.sub_bracket(), SubBracket::GrandFinals);

    // Winners and losers both have a round 0; key by sub-bracket
    let winners0 = bracket.round_at(SubBracket::Main, 0).unwrap();
    let losers0 = bracket.round_at(SubBracket::Losers, 0).unwrap();
    assert_ne!(winners0.id, losers0.id);
    assert_eq!(bracket.round_matches(losers0).count(), 2);
}

#[test]
fn test_winners_champion_reaches_grand_finals() {
    let bracket = generate(BracketType::DoubleElimination, &teams(4), false);
    let done = play_out(bracket);
    let grand = done.match_by_id("grand-finals-match").unwrap();
    assert_eq!(grand.team1.as_ref().map(|t| t.id.as_str()), Some("T1"));
    assert!(grand.team2.is_none());
    assert!(done.champion().is_none());
}

#[test]
fn test_losers_bracket_feeds_grand_finals() {
    use std::sync::Arc;

    let list = teams(8);
    let bracket = generate(BracketType::DoubleElimination, &list, false);

    // Seat first-round losers by hand, as a caller would
    let mut rounds = bracket.to_round_data();
    let losers0 = rounds
        .iter_mut()
        .find(|r| r.id.0 == "losers-round-0")
        .unwrap();
    let mut dropped = list[4..].iter().cloned().map(Arc::new);
    for m in losers0.matches.iter_mut() {
        m.team1 = dropped.next();
        m.team2 = dropped.next();
    }
    let bracket = BracketData::assemble(bracket.bracket_type(), bracket.total_teams(), rounds)
        .unwrap();

    let bracket = update_match_result(&bracket, "losers-match-0-0", MatchResult::won_by("T5"));
    let bracket = update_match_result(&bracket, "losers-match-0-1", MatchResult::won_by("T8"));

    let losers_final = bracket.match_by_id("losers-match-1-0").unwrap();
    assert_eq!(losers_final.team1.as_ref().map(|t| t.id.as_str()), Some("T5"));
    assert_eq!(losers_final.team2.as_ref().map(|t| t.id.as_str()), Some("T8"));
    assert_eq!(losers_final.state(), MatchState::Ready);

    let bracket = update_match_result(
        &bracket,
        "losers-match-1-0",
        MatchResult::won_by("T8").with_scores(1, 2),
    );
    let grand = bracket.match_by_id("grand-finals-match").unwrap();
    assert!(grand.team1.is_none());
    assert_eq!(grand.team2.as_ref().map(|t| t.id.as_str()), Some("T8"));
    assert!(bracket.champion().is_none());
}

// ============================================================================
// ROUND ROBIN
// ============================================================================

#[test]
fn test_round_robin_eight_teams() {
    let bracket = generate(BracketType::RoundRobin, &teams(8), false);
    assert_eq!(bracket.rounds().len(), 7);
    for round in bracket.rounds() {
        assert_eq!(round.match_ids.len(), 4);
    }
    assert_eq!(bracket.match_count(), 28);

    let mut pairs = HashSet::new();
    for m in bracket.matches() {
        let mut pair = [
            m.team1.as_ref().unwrap().id.clone(),
            m.team2.as_ref().unwrap().id.clone(),
        ];
        pair.sort();
        assert!(pairs.insert(pair), "pair scheduled twice");
    }
    assert_eq!(pairs.len(), 28);
}

#[test]
fn test_round_robin_standings_after_full_play() {
    let bracket = play_out(generate(BracketType::RoundRobin, &teams(4), false));
    assert!(bracket.is_finished());

    let table = standings(&bracket);
    assert_eq!(table.len(), 4);
    let total_wins: u32 = table.iter().map(|r| r.wins).sum();
    assert_eq!(total_wins, 6);
    assert!(table.iter().all(|r| r.played == 3));
    assert!(table.windows(2).all(|w| w[0].differential() >= w[1].differential()));
}

// ============================================================================
// SWISS
// ============================================================================

#[test]
fn test_swiss_round_count_and_byes() {
    let bracket = generate(BracketType::Swiss, &teams(7), false);
    assert_eq!(bracket.rounds().len(), 3);
    for round in bracket.rounds() {
        let matches: Vec<_> = bracket.round_matches(round).collect();
        assert_eq!(matches.len(), 4);
        assert_eq!(matches.iter().filter(|m| m.bye).count(), 1);
    }
}

// ============================================================================
// ADVANCEMENT
// ============================================================================

#[test]
fn test_update_never_mutates_input() {
    let bracket = generate(BracketType::SingleElimination, &teams(8), true);
    let snapshot = serde_json::to_string(&bracket).unwrap();

    let m = bracket.match_by_id("match-0-0").unwrap();
    let winner = m.team1.as_ref().unwrap().id.clone();
    let next = update_match_result(&bracket, "match-0-0", MatchResult::won_by(winner.clone()));

    assert_eq!(serde_json::to_string(&bracket).unwrap(), snapshot);
    let target = next.match_by_id("match-1-0").unwrap();
    assert_eq!(target.team1.as_ref().map(|t| &t.id), Some(&winner));

    let again = update_match_result(&next, "match-0-0", MatchResult::won_by(winner));
    assert_eq!(
        again.match_by_id("match-0-0").unwrap(),
        next.match_by_id("match-0-0").unwrap()
    );
}

#[test]
fn test_snapshot_survives_json_between_reports() {
    let bracket = generate(BracketType::SingleElimination, &teams(4), false);
    let bracket = update_match_result(&bracket, "match-0-0", MatchResult::won_by("T1"));

    let json = serde_json::to_string_pretty(&bracket).unwrap();
    let loaded: BracketData = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, bracket);

    let loaded = update_match_result(&loaded, "match-0-1", MatchResult::won_by("T4"));
    assert_eq!(
        loaded.match_by_id("match-1-0").unwrap().state(),
        MatchState::Ready
    );
}

#[test]
fn test_snapshot_with_duplicate_ids_is_rejected() {
    let json = r#"{
        "type": "single",
        "totalTeams": 0,
        "rounds": [{
            "id": "round-0", "roundIndex": 0, "name": "Finals",
            "matches": [
                {"id": "m", "roundId": "round-0", "roundIndex": 0, "matchIndex": 0},
                {"id": "m", "roundId": "round-0", "roundIndex": 0, "matchIndex": 1}
            ]
        }]
    }"#;
    assert!(serde_json::from_str::<BracketData>(json).is_err());
}

#[test]
fn test_session_collects_completion_history() {
    use std::sync::{Arc, Mutex};

    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();

    let mut session = BracketSession::new(generate(BracketType::SingleElimination, &teams(4), false));
    session.on_match_completed(move |m, result| {
        sink.lock()
            .unwrap()
            .push((m.id.to_string(), result.winner.clone()));
    });

    session.report("match-0-0", MatchResult::won_by("T1"));
    session.report("match-0-1", MatchResult::won_by("T3"));
    session.report("match-1-0", MatchResult::won_by("T3"));

    assert_eq!(log.lock().unwrap().len(), 3);
    assert_eq!(
        session.current().champion().map(|t| t.id.as_str()),
        Some("T3")
    );

    session.undo();
    assert!(session.current().champion().is_none());
}

#[test]
fn test_shuffled_seed_order_is_stable_for_unseeded_teams() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut list = teams(12);
    list.shuffle(&mut rng);
    for (i, t) in list.iter_mut().enumerate().take(4) {
        t.seed = Some(Seed::from(4 - i as u32));
    }
    let unseeded: Vec<_> = list[4..].iter().map(|t| t.id.clone()).collect();

    let bracket = generate_with(
        BracketType::SingleElimination,
        &list,
        &BracketConfig::seeded(true),
    );
    let first: Vec<_> = bracket.round_matches(&bracket.rounds()[0]).collect();
    // Sequential placement: top seed in slot 0, next in slot 1
    assert_eq!(first[0].team1.as_ref().unwrap().id, list[3].id);
    assert_eq!(first[0].team2.as_ref().unwrap().id, list[2].id);

    // Unseeded teams keep their relative order through the slot layout
    let slots: Vec<_> = first
        .iter()
        .flat_map(|m| [m.team1.clone(), m.team2.clone()])
        .collect();
    let mut seated_order = Vec::new();
    for cursor in odd_then_even(slots.len()) {
        if let Some(team) = &slots[cursor] {
            seated_order.push(team.id.clone());
        }
    }
    assert_eq!(seated_order[4..].to_vec(), unseeded);
}

/// Slot write order of sequential placement: 0, 1, 3, 5, ..., then 2, 4, ...
fn odd_then_even(size: usize) -> Vec<usize> {
    let mut order = vec![0];
    order.extend((1..size).step_by(2));
    order.extend((2..size).step_by(2));
    order
}
