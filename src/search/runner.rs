//! Beam search execution loop.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::SearchConfig;
use crate::candidate::Candidate;
use crate::error::ConfigError;
use crate::objective::Scorer;

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Pool holds only the seed.
    Seeded,
    /// At least one generation has run and budget remains.
    Iterating,
    /// The iteration or time budget ran out. Further steps do nothing.
    Exhausted,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// `max_iterations` generations completed.
    IterationLimit,
    /// `max_time` elapsed before the next generation.
    TimeLimit,
}

/// A candidate together with its total score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// The assignment.
    pub candidate: Candidate,
    /// Its total score under the search's objective.
    pub score: f64,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best candidate found.
    pub best: Candidate,

    /// Total score of `best`.
    pub best_score: f64,

    /// Total score of the seed.
    pub seed_score: f64,

    /// Number of completed generations.
    pub iterations: usize,

    /// Number of children generated and scored.
    pub evaluations: usize,

    /// Wall-clock time from start to termination.
    pub elapsed: Duration,

    /// Which budget ended the run.
    pub termination: Termination,

    /// Best pool score after each generation; index 0 is the seed.
    pub score_history: Vec<f64>,
}

/// One pending mutation call.
struct Job {
    parent: usize,
    entry: usize,
    seed: u64,
}

/// Step-wise beam search over candidates.
///
/// The pool starts as the seed alone. Every [`step`](Self::step) expands
/// each retained candidate through the mutation plan, scores the children,
/// and keeps the `max_keep` best of parents and children together. Parents
/// are listed before children and the sort is stable, so of equally scored
/// candidates the older one wins, then the earlier generated one.
///
/// The clock starts when the search is created.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_teamform::candidate::Candidate;
/// use u_teamform::model::{Member, MemberId, Roster, Team, TeamId};
/// use u_teamform::mutation::{MutationPlan, RandomSwap};
/// use u_teamform::objective::{Objective, RequirementPriority, Scorer, WeightScheme};
/// use u_teamform::search::{Search, SearchConfig, SearchState};
///
/// let members = (0..4).map(|i| Member::new(MemberId(i))).collect();
/// let teams = (0..2).map(|i| Team::new(TeamId(i))).collect();
/// let mut roster = Roster::new(members, teams).unwrap();
/// for i in 0..4 {
///     roster.assign(MemberId(i), TeamId(i % 2)).unwrap();
/// }
///
/// let objective = Objective::new(vec![Box::new(RequirementPriority)], WeightScheme::Linear).unwrap();
/// let scorer = Scorer::new(&objective, &roster);
/// let plan = MutationPlan::new().with(RandomSwap, 2);
/// let config = SearchConfig::new(1, 2, 3, Duration::from_secs(10), plan).unwrap().with_seed(1);
///
/// let mut search = Search::new(Candidate::from_roster(&roster).unwrap(), scorer, &config).unwrap();
/// assert_eq!(search.state(), SearchState::Seeded);
/// assert!(search.step().is_none());
/// assert_eq!(search.state(), SearchState::Iterating);
///
/// let result = search.run();
/// assert_eq!(result.iterations, 3);
/// assert_eq!(result.best_score, 2.0);
/// ```
pub struct Search<'a> {
    scorer: Scorer<'a>,
    config: &'a SearchConfig,
    pool: Vec<ScoredCandidate>,
    rng: StdRng,
    state: SearchState,
    termination: Option<Termination>,
    iterations: usize,
    evaluations: usize,
    seed_score: f64,
    score_history: Vec<f64>,
    started: Instant,
}

impl<'a> Search<'a> {
    /// Validates `config` and scores the seed.
    pub fn new(
        seed: Candidate,
        scorer: Scorer<'a>,
        config: &'a SearchConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let seed_score = scorer.score(&seed);
        let mut score_history = Vec::with_capacity(config.max_iterations.min(1024) + 1);
        score_history.push(seed_score);

        Ok(Self {
            scorer,
            config,
            pool: vec![ScoredCandidate {
                candidate: seed,
                score: seed_score,
            }],
            rng,
            state: SearchState::Seeded,
            termination: None,
            iterations: 0,
            evaluations: 0,
            seed_score,
            score_history,
            started: Instant::now(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Completed generations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Retained candidates, best first.
    pub fn pool(&self) -> &[ScoredCandidate] {
        &self.pool
    }

    /// Best retained candidate.
    pub fn best(&self) -> &ScoredCandidate {
        // The pool always holds at least one candidate.
        &self.pool[0]
    }

    /// Runs one generation.
    ///
    /// Checks the budget first. Returns `None` after a completed
    /// generation and the termination reason once the budget is spent.
    pub fn step(&mut self) -> Option<Termination> {
        if let Some(reason) = self.check_budget() {
            return Some(reason);
        }

        let children = self.generate();
        self.evaluations += children.len();

        let mut merged = std::mem::take(&mut self.pool);
        merged.extend(children);
        merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        merged.truncate(self.config.max_keep);
        self.pool = merged;

        self.iterations += 1;
        self.state = SearchState::Iterating;
        let best = self.best().score;
        self.score_history.push(best);

        debug!(
            iteration = self.iterations,
            pool = self.pool.len(),
            best_score = best,
            "generation complete"
        );
        None
    }

    /// Steps until the budget is spent and returns the result.
    pub fn run(mut self) -> SearchResult {
        info!(
            teams = self.best().candidate.team_count(),
            members = self.best().candidate.member_count(),
            max_keep = self.config.max_keep,
            max_spread = self.config.max_spread,
            max_iterations = self.config.max_iterations,
            seed_score = self.seed_score,
            "search started"
        );

        let termination = loop {
            if let Some(reason) = self.step() {
                break reason;
            }
        };
        let elapsed = self.started.elapsed();
        let best = self.pool.swap_remove(0);

        info!(
            iterations = self.iterations,
            evaluations = self.evaluations,
            elapsed_ms = elapsed.as_millis() as u64,
            best_score = best.score,
            ?termination,
            "search finished"
        );

        SearchResult {
            best: best.candidate,
            best_score: best.score,
            seed_score: self.seed_score,
            iterations: self.iterations,
            evaluations: self.evaluations,
            elapsed,
            termination,
            score_history: self.score_history,
        }
    }

    fn check_budget(&mut self) -> Option<Termination> {
        if self.termination.is_none() {
            self.termination = if self.iterations >= self.config.max_iterations {
                Some(Termination::IterationLimit)
            } else if self.started.elapsed() >= self.config.max_time {
                Some(Termination::TimeLimit)
            } else {
                None
            };
            if self.termination.is_some() {
                self.state = SearchState::Exhausted;
            }
        }
        self.termination
    }

    /// Expands every retained candidate through the mutation plan.
    ///
    /// Each call gets its own RNG seeded from the main one, in plan order,
    /// so the children do not depend on how the calls are scheduled.
    fn generate(&mut self) -> Vec<ScoredCandidate> {
        let entries = self.config.mutation_plan.entries();
        let mut jobs = Vec::with_capacity(self.pool.len() * self.config.max_spread);
        for parent in 0..self.pool.len() {
            for (entry, plan_entry) in entries.iter().enumerate() {
                for _ in 0..plan_entry.count() {
                    jobs.push(Job {
                        parent,
                        entry,
                        seed: self.rng.random(),
                    });
                }
            }
        }

        let pool = &self.pool;
        let scorer = self.scorer;
        let spawn = |job: &Job| {
            let mut rng = StdRng::seed_from_u64(job.seed);
            let candidate =
                entries[job.entry]
                    .operator()
                    .mutate(&pool[job.parent].candidate, &scorer, &mut rng);
            let score = scorer.score(&candidate);
            ScoredCandidate { candidate, score }
        };

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return jobs.par_iter().map(&spawn).collect();
        }
        jobs.iter().map(&spawn).collect()
    }
}

/// Runs a search to completion.
pub struct SearchRunner;

impl SearchRunner {
    /// Searches from `seed` under `config`.
    ///
    /// Fails only if `config` does not validate.
    pub fn run(
        seed: Candidate,
        scorer: &Scorer<'_>,
        config: &SearchConfig,
    ) -> Result<SearchResult, ConfigError> {
        Ok(Search::new(seed, *scorer, config)?.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, Team, TeamId};
    use crate::mutation::test_support::{fixture, fixture_with, sorted_ids, Fixture};
    use crate::mutation::{
        GreedyRandomLocalMax, LocalMax, LocalMaxDoubleRandom, LocalMaxRandom, MutationPlan,
        RandomSlice, RandomSwap, Robinhood, RobinhoodHolistic,
    };
    use crate::objective::{Objective, Priority, WeightScheme};
    use proptest::prelude::*;

    fn mixed_plan() -> MutationPlan {
        MutationPlan::new()
            .with(RandomSwap, 3)
            .with(LocalMax, 1)
            .with(LocalMaxRandom, 1)
            .with(LocalMaxDoubleRandom, 1)
            .with(Robinhood, 1)
            .with(RobinhoodHolistic, 1)
            .with(RandomSlice, 1)
            .with(GreedyRandomLocalMax, 1)
    }

    fn config(max_keep: usize, max_iterations: usize, seed: u64) -> SearchConfig {
        SearchConfig::new(max_keep, 10, max_iterations, Duration::from_secs(60), mixed_plan())
            .unwrap()
            .with_seed(seed)
    }

    fn run(f: &Fixture, config: &SearchConfig) -> SearchResult {
        SearchRunner::run(f.seed.clone(), &f.scorer(), config).unwrap()
    }

    #[test]
    fn test_zero_iterations_returns_seed() {
        let f = fixture(&[3, 3, 3], &[]);
        let result = run(&f, &config(3, 0, 1));
        assert_eq!(result.best, f.seed);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.evaluations, 0);
        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.score_history, vec![result.seed_score]);
    }

    #[test]
    fn test_zero_time_returns_seed() {
        let f = fixture(&[3, 3, 3], &[]);
        let config = SearchConfig::new(3, 10, 1000, Duration::ZERO, mixed_plan()).unwrap();
        let result = run(&f, &config);
        assert_eq!(result.best, f.seed);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination, Termination::TimeLimit);
    }

    #[test]
    fn test_runs_exactly_max_iterations() {
        let f = fixture(&[3, 3, 3], &[]);
        let result = run(&f, &config(2, 7, 3));
        assert_eq!(result.iterations, 7);
        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.score_history.len(), 8);
        // 1 parent in generation 1, then 2 retained parents.
        assert_eq!(result.evaluations, 10 + 6 * 20);
    }

    #[test]
    fn test_gender_scenario() {
        // Team 0 has no member with value 2, team 1 has four.
        let f = fixture_with(&[5, 5], &[], &[1, 1, 1, 1, 1, 2, 2, 2, 2, 1]);
        let scorer = f.scorer();
        assert_eq!(scorer.score(&f.seed), 1.0);

        let plan = MutationPlan::new().with(RandomSwap, 5);
        let config = SearchConfig::new(1, 5, 20, Duration::from_secs(60), plan)
            .unwrap()
            .with_seed(11);
        let result = SearchRunner::run(f.seed.clone(), &scorer, &config).unwrap();

        assert!(result.iterations >= 1);
        assert!(result.best_score >= result.seed_score);
        assert_eq!(result.best_score, scorer.score(&result.best));
    }

    #[derive(Debug)]
    struct AlwaysTrue;

    impl Priority for AlwaysTrue {
        fn name(&self) -> &str {
            "always_true"
        }
        fn satisfaction(&self, _: &[&Member], _: &Team) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_always_true_scores_team_count() {
        let f = fixture(&[2, 3, 4, 1], &[2]);
        let objective =
            Objective::new(vec![Box::new(AlwaysTrue)], WeightScheme::Exponential).unwrap();
        let scorer = Scorer::new(&objective, &f.roster);

        let plans = [
            MutationPlan::new().with(RandomSwap, 4),
            MutationPlan::new().with(Robinhood, 2).with(RandomSlice, 2),
            MutationPlan::new().with(LocalMax, 1).with(GreedyRandomLocalMax, 3),
        ];
        for plan in plans {
            let config = SearchConfig::new(2, 4, 5, Duration::from_secs(60), plan)
                .unwrap()
                .with_seed(5);
            let result = SearchRunner::run(f.seed.clone(), &scorer, &config).unwrap();
            assert_eq!(result.best_score, 4.0);
        }
    }

    #[test]
    fn test_best_score_is_monotonic() {
        let f = fixture_with(
            &[4, 4, 4, 4],
            &[],
            &[1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 1, 1, 2, 2, 1, 1],
        );
        let result = run(&f, &config(3, 25, 8));
        for pair in result.score_history.windows(2) {
            assert!(pair[1] >= pair[0], "history decreased: {:?}", result.score_history);
        }
        assert_eq!(result.score_history.last().copied(), Some(result.best_score));
        assert!(result.best_score >= result.seed_score);
    }

    #[test]
    fn test_same_seed_same_result() {
        let f = fixture(&[3, 4, 2, 5], &[]);
        let a = run(&f, &config(3, 10, 99));
        let b = run(&f, &config(3, 10, 99));
        assert_eq!(a.best, b.best);
        assert_eq!(a.score_history, b.score_history);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let f = fixture(&[3, 4, 2, 5], &[1]);
        let sequential = run(&f, &config(3, 10, 99));
        let parallel = run(&f, &config(3, 10, 99).with_parallel(true));
        assert_eq!(sequential.best, parallel.best);
        assert_eq!(sequential.score_history, parallel.score_history);
    }

    #[test]
    fn test_step_states() {
        let f = fixture(&[2, 2], &[]);
        let config = config(1, 2, 4);
        let mut search = Search::new(f.seed.clone(), f.scorer(), &config).unwrap();
        assert_eq!(search.state(), SearchState::Seeded);
        assert_eq!(search.pool().len(), 1);

        assert_eq!(search.step(), None);
        assert_eq!(search.state(), SearchState::Iterating);
        assert_eq!(search.step(), None);
        assert_eq!(search.step(), Some(Termination::IterationLimit));
        assert_eq!(search.state(), SearchState::Exhausted);
        assert_eq!(search.step(), Some(Termination::IterationLimit));
        assert_eq!(search.iterations(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let f = fixture(&[2, 2], &[]);
        let mut config = config(1, 2, 4);
        config.max_spread = 11;
        assert!(matches!(
            Search::new(f.seed.clone(), f.scorer(), &config),
            Err(ConfigError::PlanMismatch { .. })
        ));
    }

    #[test]
    fn test_pool_sorted_and_bounded() {
        let f = fixture(&[3, 3, 3, 3], &[]);
        let config = config(4, 5, 21);
        let mut search = Search::new(f.seed.clone(), f.scorer(), &config).unwrap();
        while search.step().is_none() {
            assert!(search.pool().len() <= 4);
            for pair in search.pool().windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_search_preserves_invariants(
            sizes in proptest::collection::vec(1usize..5, 2..6),
            locked_mask in any::<u8>(),
            seed in any::<u64>(),
        ) {
            let locked: Vec<usize> = (0..sizes.len())
                .filter(|i| locked_mask & (1 << i) != 0)
                .collect();
            let f = fixture(&sizes, &locked);
            let config = config(3, 4, seed);
            let mut search = Search::new(f.seed.clone(), f.scorer(), &config).unwrap();

            let expected_ids = sorted_ids(&f.seed);
            let mut best = search.best().score;
            while search.step().is_none() {
                prop_assert!(search.best().score >= best);
                best = search.best().score;
                for scored in search.pool() {
                    let candidate = &scored.candidate;
                    prop_assert_eq!(sorted_ids(candidate), expected_ids.clone());
                    prop_assert!(candidate.has_unique_members());
                    prop_assert_eq!(candidate.team_count(), f.seed.team_count());
                    for &idx in &locked {
                        let team = TeamId(idx as u64);
                        prop_assert_eq!(candidate.member_ids_of(team), f.seed.member_ids_of(team));
                    }
                }
            }
        }
    }
}
