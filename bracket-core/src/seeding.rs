//! Seeding - ordering teams and placing them into first-round slots

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::config::SeedPlacement;
use crate::team::Team;

/// Smallest power of two that holds `team_count` teams, and at least 2
pub fn bracket_size(team_count: usize) -> usize {
    1 << rounds_for(team_count)
}

/// `max(1, ceil(log2(team_count)))`
pub fn rounds_for(team_count: usize) -> usize {
    let mut rounds = 1;
    while (1usize << rounds) < team_count {
        rounds += 1;
    }
    rounds
}

/// Stable sort by seed, unseeded teams last in their original order
pub fn seed_order(teams: &[Arc<Team>]) -> Vec<Arc<Team>> {
    let mut ordered = teams.to_vec();
    ordered.sort_by_key(|t| (t.seed.is_none(), t.seed));
    ordered
}

/// Deterministic random draw of the input order
pub fn shuffled(teams: &[Arc<Team>], seed: u64) -> Vec<Arc<Team>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut drawn = teams.to_vec();
    drawn.shuffle(&mut rng);
    drawn
}

/// Write an ordered team list into `size` first-round slots
pub fn place(ordered: &[Arc<Team>], size: usize, placement: SeedPlacement) -> Vec<Option<Arc<Team>>> {
    match placement {
        SeedPlacement::Sequential => place_sequential(ordered, size),
        SeedPlacement::Standard => place_standard(ordered, size),
    }
}

fn place_sequential(ordered: &[Arc<Team>], size: usize) -> Vec<Option<Arc<Team>>> {
    let mut slots = vec![None; size];
    let mut teams = ordered.iter().take(size);

    if let Some(top) = teams.next() {
        slots[0] = Some(top.clone());
    }

    let mut cursor = 1;
    for team in teams {
        slots[cursor] = Some(team.clone());
        cursor += 2;
        if cursor >= size {
            cursor = 2;
        }
    }
    slots
}

fn place_standard(ordered: &[Arc<Team>], size: usize) -> Vec<Option<Arc<Team>>> {
    standard_positions(size)
        .into_iter()
        .map(|seed| ordered.get(seed - 1).cloned())
        .collect()
}

/// 1-based seed for each slot: [1, 8, 4, 5, 2, 7, 3, 6] for 8 slots
fn standard_positions(size: usize) -> Vec<usize> {
    let mut positions = vec![1];
    while positions.len() < size {
        let total = positions.len() * 2 + 1;
        positions = positions
            .into_iter()
            .flat_map(|seed| [seed, total - seed])
            .collect();
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(n: usize) -> Vec<Arc<Team>> {
        (1..=n)
            .map(|i| Arc::new(Team::new(format!("t{}", i), format!("Team {}", i))))
            .collect()
    }

    fn ids(slots: &[Option<Arc<Team>>]) -> Vec<Option<&str>> {
        slots.iter().map(|s| s.as_ref().map(|t| t.id.as_str())).collect()
    }

    #[test]
    fn test_rounds_and_size() {
        assert_eq!(rounds_for(0), 1);
        assert_eq!(rounds_for(1), 1);
        assert_eq!(rounds_for(2), 1);
        assert_eq!(rounds_for(3), 2);
        assert_eq!(rounds_for(8), 3);
        assert_eq!(rounds_for(9), 4);
        assert_eq!(bracket_size(5), 8);
        assert_eq!(bracket_size(16), 16);
    }

    #[test]
    fn test_seed_order_unseeded_last_and_stable() {
        let mut list = teams(5);
        list[1] = Arc::new(Team::new("t2", "Team 2").with_seed(2));
        list[3] = Arc::new(Team::new("t4", "Team 4").with_seed(1));

        let ordered: Vec<_> = seed_order(&list).iter().map(|t| t.id.0.clone()).collect();
        assert_eq!(ordered, vec!["t4", "t2", "t1", "t3", "t5"]);
    }

    #[test]
    fn test_seed_order_fractional_and_negative() {
        let list = vec![
            Arc::new(Team::new("a", "A").with_seed(2.5)),
            Arc::new(Team::new("b", "B")),
            Arc::new(Team::new("c", "C").with_seed(-1.0)),
            Arc::new(Team::new("d", "D").with_seed(2)),
        ];
        let ordered: Vec<_> = seed_order(&list).iter().map(|t| t.id.0.clone()).collect();
        assert_eq!(ordered, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_sequential_placement_full() {
        let slots = place(&teams(8), 8, SeedPlacement::Sequential);
        assert_eq!(
            ids(&slots),
            vec![
                Some("t1"),
                Some("t2"),
                Some("t6"),
                Some("t3"),
                Some("t7"),
                Some("t4"),
                Some("t8"),
                Some("t5"),
            ]
        );
    }

    #[test]
    fn test_sequential_placement_with_byes() {
        let slots = place(&teams(5), 8, SeedPlacement::Sequential);
        assert_eq!(
            ids(&slots),
            vec![Some("t1"), Some("t2"), None, Some("t3"), None, Some("t4"), None, Some("t5")]
        );
    }

    #[test]
    fn test_standard_placement() {
        assert_eq!(standard_positions(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);

        let slots = place(&teams(6), 8, SeedPlacement::Standard);
        assert_eq!(
            ids(&slots),
            vec![Some("t1"), None, Some("t4"), Some("t5"), Some("t2"), None, Some("t3"), Some("t6")]
        );
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let list = teams(10);
        let a = shuffled(&list, 42);
        let b = shuffled(&list, 42);
        assert_eq!(a, b);

        let mut sorted: Vec<_> = a.iter().map(|t| t.id.0.clone()).collect();
        sorted.sort();
        let mut expected: Vec<_> = list.iter().map(|t| t.id.0.clone()).collect();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
