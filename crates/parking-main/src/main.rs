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

use parking_core::{
    fee::Fee,
    time::{TimeDelta, TimePoint},
};
use parking_facility::prelude::{
    BestFit, FacilityReport, FirstFit, LotSelectionPolicy, ManualClock, ParkingFacility,
    RandomFit,
};
use parking_model::err::ParkingError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::{error::Error, fs::File, io::BufWriter, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

const SEED: u64 = 42;
const LOT_COUNT: i64 = 60;
const LOT_WIDTH_MIN: i64 = 5;
const LOT_WIDTH_MAX: i64 = 12;
const CAR_WIDTH_MIN: i64 = 2;
const CAR_WIDTH_MAX: i64 = 11;
const STAY_MIN_MINUTES: i64 = 5;
const STAY_MAX_MINUTES: i64 = 300;
const MAX_ARRIVALS_PER_TICK: usize = 4;
const TICK_MINUTES: i64 = 10;
const TICKS: usize = 6 * 24;
const REPORT_PATH: &str = "parking_report.json";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct PolicyRun {
    policy: String,
    arrivals: usize,
    parked: usize,
    turned_away: usize,
    departures: usize,
    revenue: i64,
    peak_occupancy_percent: u32,
    elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    description: String,
    seed: u64,
    lot_count: i64,
    simulated_minutes: i64,
    runs: Vec<PolicyRun>,
    final_state: Vec<FacilityReport>,
}

fn lot_layout() -> (Vec<i64>, Vec<i64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let numbers: Vec<i64> = (1..=LOT_COUNT).collect();
    let widths = numbers
        .iter()
        .map(|_| rng.random_range(LOT_WIDTH_MIN..=LOT_WIDTH_MAX))
        .collect();
    (numbers, widths)
}

/// Runs one day of traffic against a fresh facility using `policy` for
/// automatic check-ins. Every policy sees the same arrivals.
fn simulate<P: LotSelectionPolicy>(policy: P) -> Result<(PolicyRun, FacilityReport), ParkingError> {
    let (numbers, widths) = lot_layout();
    let clock = ManualClock::new(TimePoint::new(0));
    let mut facility = ParkingFacility::from_parallel(&numbers, &widths)?
        .with_clock(clock.clone())
        .with_policy(policy);
    let policy_name = facility.policy().name().to_owned();

    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 0xCA75);
    let mut leaving: Vec<(String, TimePoint<i64>)> = Vec::new();
    let mut run = PolicyRun {
        policy: policy_name,
        arrivals: 0,
        parked: 0,
        turned_away: 0,
        departures: 0,
        revenue: 0,
        peak_occupancy_percent: 0,
        elapsed_ms: 0,
    };

    let t0 = Instant::now();
    let mut revenue = Fee::new(0_i64);
    let mut next_plate = 0usize;
    for _ in 0..TICKS {
        let now = clock.advance(TimeDelta::minutes(TICK_MINUTES));

        let (due, staying): (Vec<_>, Vec<_>) =
            leaving.into_iter().partition(|(_, until)| *until <= now);
        leaving = staying;
        for (plate, _) in due {
            let fee = facility.depart(&plate)?;
            run.departures += 1;
            revenue = revenue.saturating_add(fee);
        }

        for _ in 0..rng.random_range(0..=MAX_ARRIVALS_PER_TICK) {
            let plate = format!("SIM{next_plate:05}");
            next_plate += 1;
            let width = rng.random_range(CAR_WIDTH_MIN..=CAR_WIDTH_MAX);
            let stay = TimeDelta::minutes(rng.random_range(STAY_MIN_MINUTES..=STAY_MAX_MINUTES));
            run.arrivals += 1;

            match facility.park(&plate, width) {
                Ok(_) => {
                    run.parked += 1;
                    leaving.push((plate, now + stay));
                }
                Err(e) if e.is_conflict() => run.turned_away += 1,
                Err(e) => return Err(e),
            }
        }

        run.peak_occupancy_percent = run
            .peak_occupancy_percent
            .max(facility.occupancy_percent());
    }
    run.elapsed_ms = t0.elapsed().as_millis();
    run.revenue = revenue.value();

    if let Err(violation) = facility.check_invariants() {
        warn!(policy = %run.policy, %violation, "Facility ended in an inconsistent state");
    }
    info!(
        policy = %run.policy,
        parked = run.parked,
        turned_away = run.turned_away,
        revenue = run.revenue,
        peak = run.peak_occupancy_percent,
        "Simulation finished"
    );
    Ok((run, facility.report()))
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let mut runs = Vec::new();
    let mut final_state = Vec::new();
    for (run, report) in [
        simulate(FirstFit)?,
        simulate(BestFit)?,
        simulate(RandomFit::seeded(SEED))?,
    ] {
        runs.push(run);
        final_state.push(report);
    }

    let report = SimulationReport {
        description: "One simulated day of arrivals and departures, compared across lot selection policies.".into(),
        seed: SEED,
        lot_count: LOT_COUNT,
        simulated_minutes: TICK_MINUTES * TICKS as i64,
        runs,
        final_state,
    };

    let file = File::create(REPORT_PATH)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;

    println!();
    for run in &report.runs {
        println!(
            "{:<10} parked {:>4} / {:<4} turned away {:>4}  revenue {:>6}  peak {:>3}%",
            run.policy,
            run.parked,
            run.arrivals,
            run.turned_away,
            run.revenue,
            run.peak_occupancy_percent
        );
    }
    if let Some(snapshot) = report.final_state.first() {
        println!();
        print!("{}", snapshot);
    }
    println!();
    println!("Wrote: {}", REPORT_PATH);
    Ok(())
}
