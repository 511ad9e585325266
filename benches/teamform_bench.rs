//! Criterion benchmarks for u-teamform searches.
//!
//! Uses synthetic rosters with random attributes to measure one search run
//! per operator family.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_teamform::candidate::Candidate;
use u_teamform::model::{Member, MemberId, ProjectId, Roster, Team, TeamId};
use u_teamform::mutation::{
    GreedyRandomLocalMax, LocalMax, LocalMaxRandom, MutationPlan, RandomSlice, RandomSwap,
    Robinhood, RobinhoodHolistic,
};
use u_teamform::objective::{
    DiversityPriority, DiversityStrategy, Objective, ProjectPreferencePriority, Scorer,
    TokenizationDirection, TokenizationPriority, WeightScheme,
};
use u_teamform::search::{SearchConfig, SearchRunner};

// ===========================================================================
// Synthetic roster: round-robin seed, three attributes, project preferences
// ===========================================================================

fn roster(members: usize, teams: usize) -> Roster {
    let mut rng = StdRng::seed_from_u64(7);
    let people = (0..members as u64)
        .map(|i| {
            let prefs = (0..3).map(|_| ProjectId(rng.random_range(0..teams as u64))).collect();
            Member::new(MemberId(i))
                .with_attribute(0, vec![rng.random_range(0..2)])
                .with_attribute(1, vec![rng.random_range(0..5)])
                .with_project_preferences(prefs)
        })
        .collect();
    let groups = (0..teams as u64)
        .map(|t| Team::new(TeamId(t)).with_project(ProjectId(t)))
        .collect();

    let mut roster = Roster::new(people, groups).expect("unique ids");
    for i in 0..members as u64 {
        roster
            .assign(MemberId(i), TeamId(i % teams as u64))
            .expect("known ids");
    }
    roster
}

fn objective() -> Objective {
    Objective::new(
        vec![
            Box::new(TokenizationPriority {
                attribute: 0,
                value: 1,
                direction: TokenizationDirection::MinOf,
                threshold: 2,
            }),
            Box::new(DiversityPriority {
                attribute: 1,
                strategy: DiversityStrategy::Diversify,
            }),
            Box::new(ProjectPreferencePriority { max_preferences: 3 }),
        ],
        WeightScheme::Exponential,
    )
    .expect("valid priorities")
}

fn plans() -> Vec<(&'static str, MutationPlan)> {
    vec![
        ("swap", MutationPlan::new().with(RandomSwap, 8)),
        (
            "local_max",
            MutationPlan::new().with(LocalMax, 4).with(LocalMaxRandom, 4),
        ),
        (
            "robinhood",
            MutationPlan::new().with(Robinhood, 4).with(RobinhoodHolistic, 4),
        ),
        (
            "slice",
            MutationPlan::new().with(RandomSlice, 4).with(GreedyRandomLocalMax, 4),
        ),
    ]
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let objective = objective();
    for (members, teams) in [(40usize, 8usize), (120, 24)] {
        let roster = roster(members, teams);
        let scorer = Scorer::new(&objective, &roster);
        let seed = Candidate::from_roster(&roster).expect("fully assigned");

        for (family, plan) in plans() {
            let config = SearchConfig::new(3, 8, 30, Duration::from_secs(60), plan)
                .expect("valid config")
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(family, format!("m{}_t{}", members, teams)),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result =
                            SearchRunner::run(black_box(seed.clone()), &scorer, black_box(config));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let objective = objective();
    let roster = roster(120, 24);
    let scorer = Scorer::new(&objective, &roster);
    let seed = Candidate::from_roster(&roster).expect("fully assigned");

    c.bench_function("score_m120_t24", |b| {
        b.iter(|| black_box(scorer.score(black_box(&seed))))
    });
}

criterion_group!(benches, bench_search, bench_score);
criterion_main!(benches);
