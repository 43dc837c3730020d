// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::Serialize;
use sleeper_alloc_model::{
    generator::{ScenarioConfig, ScenarioGenerator},
    prelude::*,
};
use sleeper_alloc_solver::prelude::*;
use std::{
    env,
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    time::Instant,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_REPORT_PATH: &str = "allocation_report.json";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

// Nine sleeper coaches and two AC three-tier coaches.
fn amaravati_rake() -> Result<BerthCatalog, CatalogBuildError> {
    let mut builder = BerthCatalogBuilder::new();
    for i in 1..=9 {
        builder = builder.coach(format!("S{i}"), "Sleeper", &BerthLayout::sleeper());
    }
    for i in 1..=2 {
        builder = builder.coach(format!("B{i}"), "AC_3_Tier", &BerthLayout::ac_three_tier());
    }
    builder.build()
}

#[derive(Debug, Clone, Serialize)]
struct ScenarioInfo {
    stations: usize,
    request_count: usize,
    shared_fraction: f64,
    alighting: String,
    seed: u64,
}

#[derive(Debug, Clone, Serialize)]
struct RequestCounts {
    requests: usize,
    exclusive_requests: usize,
    shared_pair_requests: usize,
    passengers: usize,
    allocated: usize,
    unallocated: usize,
    invalid: usize,
    rejected_checks: usize,
}

#[derive(Debug, Clone, Serialize)]
struct LedgerSummary {
    total_allocations: usize,
    exclusive_allocations: usize,
    shared_allocations: usize,
    shared_pairs: usize,
    berths_used: usize,
    berths_in_catalog: usize,
    occupied_berth_legs: usize,
    passenger_legs: usize,
    utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
struct CoachSummary {
    coach: String,
    class: String,
    berths: usize,
    berths_used: usize,
    allocations: usize,
}

#[derive(Debug, Clone, Serialize)]
struct LegLoad {
    from: String,
    to: String,
    aboard: usize,
}

#[derive(Debug, Clone, Serialize)]
struct OnboardSummary {
    legs: Vec<LegLoad>,
    peak_leg: Option<usize>,
    peak_aboard: usize,
}

#[derive(Debug, Clone, Serialize)]
struct RunReport {
    description: String,
    scenario: ScenarioInfo,
    counts: RequestCounts,
    ledger: LedgerSummary,
    coaches: Vec<CoachSummary>,
    onboard: OnboardSummary,
    unallocated: Vec<String>,
    violations: Vec<String>,
    elapsed_ms: u128,
}

fn coach_summaries(catalog: &BerthCatalog, ledger: &ResourceLedger) -> Vec<CoachSummary> {
    catalog
        .coaches()
        .map(|(_, coach)| {
            let (used, allocations) = coach.berth_ids().fold((0, 0), |(used, total), berth| {
                let n = ledger.allocations(berth).len();
                (used + usize::from(n > 0), total + n)
            });
            CoachSummary {
                coach: coach.id().to_string(),
                class: coach.class().to_string(),
                berths: coach.berth_count(),
                berths_used: used,
                allocations,
            }
        })
        .collect()
}

fn onboard_summary(ledger: &ResourceLedger, stations: &StationSequence) -> OnboardSummary {
    let profile = OnboardProfile::from_ledger(ledger, stations);
    let names: Vec<&str> = stations.iter().map(|(_, name)| name).collect();
    let legs = profile
        .counts()
        .iter()
        .enumerate()
        .map(|(i, &aboard)| LegLoad {
            from: names[i].to_string(),
            to: names[i + 1].to_string(),
            aboard,
        })
        .collect();
    let (peak_leg, peak_aboard) = match profile.peak() {
        Some((leg, aboard)) => (Some(leg.value()), aboard),
        None => (None, 0),
    };
    OnboardSummary {
        legs,
        peak_leg,
        peak_aboard,
    }
}

/// Writes `report` as pretty JSON. Buffered bytes are flushed before
/// returning so a failed final write surfaces as an error.
fn write_report<W: Write>(sink: W, report: &RunReport) -> Result<(), Box<dyn Error>> {
    let mut writer = BufWriter::new(sink);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let output = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string());

    let catalog = amaravati_rake()?;
    let config = ScenarioConfig::default();
    info!(%config, berths = catalog.len(), coaches = catalog.coach_count(), "scenario");

    let scenario = ScenarioInfo {
        stations: config.stations().len(),
        request_count: config.request_count(),
        shared_fraction: config.shared_fraction(),
        alighting: config.alighting().to_string(),
        seed: config.seed(),
    };

    let mut generator = ScenarioGenerator::new(config);
    let requests = generator.generate();
    let stations = generator.stations();

    let t0 = Instant::now();
    let mut allocator = Allocator::new(stations, &catalog, &SearchPolicy::coach_major(&catalog));
    let outcomes = allocator.allocate_all(&requests);
    let stats = *allocator.stats();
    let ledger = allocator.into_ledger();
    let violations = verify(&ledger, &catalog);
    let elapsed = t0.elapsed();

    if !violations.is_empty() {
        warn!(count = violations.len(), "allocation produced violations");
    }

    let unallocated: Vec<String> = requests
        .iter()
        .zip(&outcomes)
        .filter(|(_, outcome)| matches!(outcome, Ok(RequestOutcome::Unallocated)))
        .flat_map(|(request, _)| request.occupants().map(|o| o.id().to_string()))
        .collect();

    let shared_pair_requests = requests.iter().filter(|r| r.is_shared()).count();
    let ledger_stats = LedgerStats::from_ledger(&ledger);
    let report = RunReport {
        description: "Greedy first-fit berth allocation over a seeded request stream.".into(),
        scenario,
        counts: RequestCounts {
            requests: requests.len(),
            exclusive_requests: requests.len() - shared_pair_requests,
            shared_pair_requests,
            passengers: requests.iter().map(Request::occupant_count).sum(),
            allocated: stats.allocated,
            unallocated: stats.unallocated,
            invalid: stats.invalid,
            rejected_checks: stats.rejected_checks,
        },
        ledger: LedgerSummary {
            total_allocations: ledger_stats.total_allocations,
            exclusive_allocations: ledger_stats.exclusive_allocations,
            shared_allocations: ledger_stats.shared_allocations,
            shared_pairs: ledger_stats.shared_pairs,
            berths_used: ledger_stats.berths_used,
            berths_in_catalog: ledger_stats.berths_in_catalog,
            occupied_berth_legs: ledger_stats.occupied_berth_legs,
            passenger_legs: ledger_stats.passenger_legs,
            utilization: ledger_stats.utilization(stations.leg_count()),
        },
        coaches: coach_summaries(&catalog, &ledger),
        onboard: onboard_summary(&ledger, stations),
        unallocated,
        violations: violations.iter().map(ToString::to_string).collect(),
        elapsed_ms: elapsed.as_millis(),
    };

    write_report(File::create(&output)?, &report)?;

    info!(%ledger_stats, %stats, "run finished");
    println!();
    println!("Allocated {} of {} requests", stats.allocated, stats.requests);
    println!("Violations: {}", violations.len());
    println!("Wrote: {}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // Accepts nothing; every write fails.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn tiny_report() -> RunReport {
        let catalog = BerthCatalogBuilder::new()
            .coach("S1", "Sleeper", &BerthLayout::sleeper())
            .build()
            .unwrap();
        let stations = StationSequence::new(["A", "B", "C"]).unwrap();
        let ledger = ResourceLedger::for_catalog(&catalog);
        let ledger_stats = LedgerStats::from_ledger(&ledger);
        RunReport {
            description: "empty run".into(),
            scenario: ScenarioInfo {
                stations: stations.len(),
                request_count: 0,
                shared_fraction: 0.0,
                alighting: "Uniform".into(),
                seed: 1,
            },
            counts: RequestCounts {
                requests: 0,
                exclusive_requests: 0,
                shared_pair_requests: 0,
                passengers: 0,
                allocated: 0,
                unallocated: 0,
                invalid: 0,
                rejected_checks: 0,
            },
            ledger: LedgerSummary {
                total_allocations: 0,
                exclusive_allocations: 0,
                shared_allocations: 0,
                shared_pairs: 0,
                berths_used: 0,
                berths_in_catalog: ledger_stats.berths_in_catalog,
                occupied_berth_legs: 0,
                passenger_legs: 0,
                utilization: ledger_stats.utilization(stations.leg_count()),
            },
            coaches: coach_summaries(&catalog, &ledger),
            onboard: onboard_summary(&ledger, &stations),
            unallocated: Vec::new(),
            violations: Vec::new(),
            elapsed_ms: 0,
        }
    }

    #[test]
    fn test_report_is_written_as_json() {
        let mut out = Vec::new();
        write_report(&mut out, &tiny_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["ledger"]["berths_in_catalog"], 72);
        assert_eq!(value["coaches"][0]["coach"], "S1");
        assert_eq!(value["onboard"]["legs"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_failed_buffered_write_is_reported() {
        // The report fits the buffer, so the failure only shows on flush.
        assert!(write_report(FullDisk, &tiny_report()).is_err());
    }
}
