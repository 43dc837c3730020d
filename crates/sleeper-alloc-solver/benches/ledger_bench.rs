use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sleeper_alloc_core::station::Journey;
use sleeper_alloc_model::{
    berth::BerthLayout,
    catalog::{BerthCatalog, BerthCatalogBuilder},
    generator::{ScenarioConfig, ScenarioGenerator},
    id::BerthId,
    req::Request,
    station::StationSequence,
};
use sleeper_alloc_solver::{
    allocator::Allocator,
    ledger::{Allocation, ResourceLedger},
    search::SearchPolicy,
    verify::verify,
};

// ---------- Scenario knobs ----------
const SEED: u64 = 0x5EE_9E12;

// One long-haul route, a full rake of sleeper and AC coaches.
const SLEEPER_COACHES: usize = 9;
const AC_COACHES: usize = 2;
const REQUESTS: usize = 1_376;

// Probe workload for the raw free check
const STATIONS: usize = 28;
const PROBES: usize = 20_000;

fn catalog() -> BerthCatalog {
    let mut builder = BerthCatalogBuilder::new();
    for i in 1..=SLEEPER_COACHES {
        builder = builder.coach(format!("S{i}"), "Sleeper", &BerthLayout::sleeper());
    }
    for i in 1..=AC_COACHES {
        builder = builder.coach(format!("B{i}"), "AC_3_Tier", &BerthLayout::ac_three_tier());
    }
    builder.build().expect("valid rake")
}

fn scenario() -> (StationSequence, Vec<Request>) {
    let config = ScenarioConfig::builder()
        .request_count(REQUESTS)
        .seed(SEED)
        .build()
        .expect("valid scenario");
    let mut generator = ScenarioGenerator::new(config);
    let requests = generator.generate();
    (generator.stations().clone(), requests)
}

fn random_journey<R: Rng + ?Sized>(rng: &mut R) -> Journey {
    let board = rng.random_range(0..STATIONS - 1);
    let alight = rng.random_range(board + 1..STATIONS);
    Journey::from_indices(board, alight).expect("forward journey")
}

// Each berth carries a handful of short, mostly disjoint stays.
fn fragmented_ledger(berths: usize) -> ResourceLedger {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut ledger = ResourceLedger::new(berths);
    let mut n = 0usize;
    for berth in 0..berths {
        let mut at = rng.random_range(0..4);
        while at + 1 < STATIONS {
            let alight = (at + rng.random_range(1..=5)).min(STATIONS - 1);
            let journey = Journey::from_indices(at, alight).expect("forward journey");
            ledger
                .record_unchecked(Allocation::new(
                    BerthId::new(berth as u32),
                    journey,
                    format!("P{n:05}").into(),
                    false,
                ))
                .expect("berth in range");
            n += 1;
            at = alight + rng.random_range(0..3);
        }
    }
    ledger
}

fn bench_allocate_scenario(c: &mut Criterion) {
    let catalog = catalog();
    let (stations, requests) = scenario();
    let policy = SearchPolicy::coach_major(&catalog);

    c.bench_function("allocate_default_scenario_coach_major", |b| {
        b.iter(|| {
            let mut alloc = Allocator::new(&stations, &catalog, &policy);
            black_box(alloc.allocate_all(&requests));
            black_box(alloc.stats().allocated)
        });
    });
}

fn bench_free_check(c: &mut Criterion) {
    let berths = 72 * SLEEPER_COACHES;
    let ledger = fragmented_ledger(berths);
    c.bench_function("is_free_for_exclusive_fragmented", |b| {
        b.iter_batched(
            || ChaCha8Rng::seed_from_u64(SEED ^ 0xBEEF),
            |mut rng| {
                let mut free = 0usize;
                for _ in 0..PROBES {
                    let berth = BerthId::new(rng.random_range(0..berths as u32));
                    if ledger.is_free_for_exclusive(berth, &random_journey(&mut rng)) {
                        free += 1;
                    }
                }
                black_box(free)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_verify(c: &mut Criterion) {
    let catalog = catalog();
    let (stations, requests) = scenario();
    let mut alloc = Allocator::new(&stations, &catalog, &SearchPolicy::coach_major(&catalog));
    alloc.allocate_all(&requests);
    let ledger = alloc.into_ledger();

    c.bench_function("verify_default_scenario", |b| {
        b.iter(|| black_box(verify(&ledger, &catalog)));
    });
}

criterion_group!(
    ledger,
    bench_allocate_scenario,
    bench_free_check,
    bench_verify
);
criterion_main!(ledger);
