use rand::Rng;
use tracing::trace;

use super::types::TeamRecord;

/// Exclusive upper bound of the score delta applied by one tick
pub const MAX_TICK_DELTA: i64 = 20;

/// Source of randomness for a tick. Any `rand::Rng` works; tests pin the
/// pick with a fixed implementation.
pub trait TickRng {
    /// Uniform index in `0..len`. Only called with `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
    /// Uniform delta in `0..MAX_TICK_DELTA`.
    fn score_delta(&mut self) -> i64;
}

impl<R: Rng> TickRng for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn score_delta(&mut self) -> i64 {
        self.gen_range(0..MAX_TICK_DELTA)
    }
}

/// Runs one tick over a leaderboard and returns the re-ranked copy.
/// An empty leaderboard comes back empty.
pub fn tick<R: TickRng + ?Sized>(leaderboard: &[TeamRecord], rng: &mut R) -> Vec<TeamRecord> {
    if leaderboard.is_empty() {
        return Vec::new();
    }
    let index = rng.pick_index(leaderboard.len());
    let delta = rng.score_delta();
    apply_tick(leaderboard, index, delta)
}

/// Deterministic core of `tick`: marks `index` live, adds `delta` to its
/// score, then stable-sorts by score descending and reassigns ranks.
pub fn apply_tick(leaderboard: &[TeamRecord], index: usize, delta: i64) -> Vec<TeamRecord> {
    let mut teams = leaderboard.to_vec();
    if teams.is_empty() {
        return teams;
    }
    let index = index.min(teams.len() - 1);

    for team in teams.iter_mut() {
        team.live = false;
    }
    let picked = &mut teams[index];
    picked.live = true;
    picked.score += delta;
    trace!(team = %picked.name, delta, score = picked.score, "live score update");

    rerank(&mut teams);
    teams
}

/// Stable sort by score descending, then `rank = position + 1`.
/// Teams with equal scores keep their relative order.
pub fn rerank(teams: &mut [TeamRecord]) {
    teams.sort_by(|a, b| b.score.cmp(&a.score));
    for (i, team) in teams.iter_mut().enumerate() {
        team.rank = i as u32 + 1;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Pins the tick to a known team and delta
    pub(crate) struct FixedPick {
        pub index: usize,
        pub delta: i64,
    }

    impl TickRng for FixedPick {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.index
        }

        fn score_delta(&mut self) -> i64 {
            self.delta
        }
    }

    fn board(scores: &[(&str, i64)]) -> Vec<TeamRecord> {
        let mut teams: Vec<TeamRecord> = scores
            .iter()
            .enumerate()
            .map(|(i, (name, score))| TeamRecord::new(i as u32 + 1, name, *score))
            .collect();
        rerank(&mut teams);
        teams
    }

    #[test]
    fn test_forced_pick_reorders_and_marks_live() {
        let teams = board(&[("A", 100), ("B", 90)]);
        let next = tick(&teams, &mut FixedPick { index: 1, delta: 15 });

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].name, "B");
        assert_eq!(next[0].score, 105);
        assert_eq!(next[0].rank, 1);
        assert!(next[0].live);
        assert_eq!(next[1].name, "A");
        assert_eq!(next[1].score, 100);
        assert_eq!(next[1].rank, 2);
        assert!(!next[1].live);

        // input untouched
        assert_eq!(teams[0].name, "A");
        assert_eq!(teams[1].score, 90);
    }

    #[test]
    fn test_empty_leaderboard_is_noop() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(tick(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_rank_consistency_and_single_live_over_many_ticks() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut teams = board(&[("Spades", 2850), ("Hearts", 2400), ("Clover", 1980), ("Diamonds", 1850)]);
        teams[0].live = true;

        for _ in 0..500 {
            let before = teams.clone();
            teams = tick(&teams, &mut rng);

            for (i, pair) in teams.windows(2).enumerate() {
                assert!(pair[0].score >= pair[1].score);
                assert_eq!(pair[0].rank, i as u32 + 1);
            }
            assert_eq!(teams.last().map(|t| t.rank), Some(teams.len() as u32));
            assert_eq!(teams.iter().filter(|t| t.live).count(), 1);

            let live = teams.iter().find(|t| t.live).unwrap();
            let old = before.iter().find(|t| t.name == live.name).unwrap();
            assert!(live.score >= old.score);
            assert!(live.score - old.score < MAX_TICK_DELTA);
            // every other team keeps its score
            for team in teams.iter().filter(|t| !t.live) {
                let old = before.iter().find(|t| t.name == team.name).unwrap();
                assert_eq!(team.score, old.score);
            }
        }
    }

    #[test]
    fn test_equal_scores_keep_prior_order() {
        let teams = board(&[("A", 50), ("B", 50), ("C", 10)]);
        let next = apply_tick(&teams, 2, 0);
        let names: Vec<&str> = next.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        // C catches up exactly: stays behind A and B
        let next = apply_tick(&teams, 2, 40);
        let names: Vec<&str> = next.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(next[2].rank, 3);
    }

    #[test]
    fn test_previous_scores_and_details_untouched() {
        let mut teams = board(&[("A", 10), ("B", 5)]);
        teams[1].previous_scores = vec![4, 3];
        let next = apply_tick(&teams, 1, 19);
        assert_eq!(next[0].name, "B");
        assert_eq!(next[0].previous_scores, vec![4, 3]);
        assert_eq!(next[0].details, teams[1].details);
    }
}
