use approx::assert_relative_eq;

use crate::analysis::critical_temperature;
use crate::lattice::{initialize, InitStrategy, Lattice, SPIN_DOWN, SPIN_UP};
use crate::observables::{entropy, magnetization, ObservableSeries, RunSummary, Sample};
use crate::rng::seeded_rng;
use crate::sampling::{metropolis_step, run, SamplingMode, SimulationParameters, SweepController};
use rand::Rng;

type Flip = (usize, usize, i8);

fn run_recorded(lattice: &mut Lattice, params: &SimulationParameters) -> (Vec<Flip>, Vec<Sample>) {
    let mut flips = Vec::new();
    let mut samples = Vec::new();
    run(
        lattice,
        params,
        |row, col, spin| flips.push((row, col, spin)),
        |s| samples.push(*s),
    )
    .unwrap();
    (flips, samples)
}

#[test]
fn test_initialized_lattices_hold_only_spins() {
    for size in 1..=9 {
        for strategy in [InitStrategy::Random, InitStrategy::AllUp, InitStrategy::Checkerboard] {
            let lat = initialize(strategy, size, Some(size as u64)).unwrap();
            assert_eq!(lat.iter().count(), size * size);
            assert!(lat.iter().all(|s| s == SPIN_UP || s == SPIN_DOWN));
        }
    }
}

#[test]
fn test_checkerboard_even_sizes_have_zero_magnetization() {
    for size in [2, 4, 6, 10, 32] {
        let lat = initialize(InitStrategy::Checkerboard, size, None).unwrap();
        assert_eq!(magnetization(&lat), 0.0);
    }
}

#[test]
fn test_all_up_is_frozen_at_zero_temperature() {
    for size in [2, 3, 8] {
        let initial = initialize(InitStrategy::AllUp, size, None).unwrap();
        assert_eq!(magnetization(&initial), 1.0);

        let mut lat = initial.clone();
        let params = SimulationParameters::new(size, 0.0, 25)
            .with_model(1.0, 0.0)
            .with_seed(12)
            .with_sampling(SamplingMode::PerFlip);
        let (flips, samples) = run_recorded(&mut lat, &params);

        assert!(flips.is_empty());
        assert_eq!(lat, initial);
        assert_eq!(samples.len() as u64, params.total_trials());
        assert!(samples.iter().all(|s| s.magnetization == 1.0 && s.entropy == 0.0));
    }
}

#[test]
fn test_entropy_bounds() {
    assert_relative_eq!(entropy(0.0), 1.0, epsilon = 1e-12);
    assert_eq!(entropy(1.0), 0.0);
    assert_eq!(entropy(-1.0), 0.0);
    for i in -10..=10 {
        let h = entropy(i as f64 / 10.0);
        assert!((0.0..=1.0).contains(&h));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let params = SimulationParameters::new(10, 2.3, 20)
        .with_model(1.0, 0.1)
        .with_seed(2014);

    let mut a = initialize(InitStrategy::Random, 10, Some(5)).unwrap();
    let mut b = initialize(InitStrategy::Random, 10, Some(5)).unwrap();
    let (flips_a, samples_a) = run_recorded(&mut a, &params);
    let (flips_b, samples_b) = run_recorded(&mut b, &params);

    assert!(!flips_a.is_empty());
    assert_eq!(flips_a, flips_b);
    assert_eq!(samples_a, samples_b);
    assert_eq!(a, b);

    let mut c = initialize(InitStrategy::Random, 10, Some(5)).unwrap();
    let (flips_c, _) = run_recorded(&mut c, &params.with_seed(2015));
    assert_ne!(flips_a, flips_c);
}

#[test]
fn test_explicit_rng_matches_seeded_controller() {
    let params = SimulationParameters::new(6, 1.5, 5).with_seed(77);
    let mut a = initialize(InitStrategy::AllUp, 6, None).unwrap();
    let mut b = a.clone();

    let mut series_a = ObservableSeries::new();
    SweepController::new(params).unwrap().run(&mut a, &mut series_a).unwrap();

    let mut series_b = ObservableSeries::new();
    SweepController::with_rng(params, seeded_rng(Some(77)))
        .unwrap()
        .run(&mut b, &mut series_b)
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(series_a, series_b);
}

/// Redo a seeded run by hand: row, then column, then the Metropolis step.
fn replay_by_hand(initial: &Lattice, params: &SimulationParameters) -> (Lattice, Vec<Flip>) {
    let mut lattice = initial.clone();
    let mut rng = seeded_rng(params.seed);
    let mut flips = Vec::new();
    let n = lattice.size();
    for _ in 0..params.total_trials() {
        let row = rng.gen_range(0..n);
        let col = rng.gen_range(0..n);
        let outcome = metropolis_step(
            &mut lattice,
            row,
            col,
            &params.model,
            params.temperature,
            &mut rng,
        );
        if outcome.trial.is_accepted() {
            flips.push((row, col, lattice.spin(row, col)));
        }
    }
    (lattice, flips)
}

#[test]
fn test_random_stream_order_matches_hand_replay() {
    let params = SimulationParameters::new(5, 1.7, 6)
        .with_model(0.7, 0.3)
        .with_seed(2024);
    let initial = initialize(InitStrategy::Random, 5, Some(11)).unwrap();

    let mut lat = initial.clone();
    let (flips, samples) = run_recorded(&mut lat, &params);
    let (replayed, replayed_flips) = replay_by_hand(&initial, &params);

    assert!(!flips.is_empty());
    assert_eq!(flips, replayed_flips);
    assert_eq!(lat, replayed);
    assert_eq!(samples.len(), 6);
}

#[test]
fn test_small_lattices_replay_at_zero_temperature() {
    for (size, sweeps) in [(1, 10), (2, 10)] {
        let params = SimulationParameters::new(size, 0.0, sweeps)
            .with_model(1.0, 0.5)
            .with_seed(3)
            .with_sampling(SamplingMode::PerFlip);
        let initial = initialize(InitStrategy::Checkerboard, size, None).unwrap();

        let mut lat = initial.clone();
        let (flips, samples) = run_recorded(&mut lat, &params);
        let (replayed, replayed_flips) = replay_by_hand(&initial, &params);

        assert_eq!(samples.len() as u64, params.total_trials());
        assert_eq!(flips, replayed_flips);
        assert_eq!(lat, replayed);
    }
}

#[test]
fn test_low_temperature_orders_ferromagnet() {
    let size = 16;
    let params = SimulationParameters::new(size, 1.0, 400).with_seed(8);
    let mut lat = initialize(InitStrategy::AllUp, size, None).unwrap();
    let mut series = ObservableSeries::new();
    SweepController::new(params).unwrap().run(&mut lat, &mut series).unwrap();

    let summary = RunSummary::from_series(&series, lat.n_sites(), params.temperature, 100).unwrap();
    // Spontaneous magnetization at T = 1 is about 0.9993
    assert!(summary.mean_abs_magnetization > 0.99);
    assert_relative_eq!(summary.mean_energy, -2.0, epsilon = 0.02);
}

#[test]
fn test_high_temperature_disorders_ferromagnet() {
    let size = 16;
    let params = SimulationParameters::new(size, 2.0 * critical_temperature(), 600).with_seed(21);
    let mut lat = initialize(InitStrategy::AllUp, size, None).unwrap();
    let mut series = ObservableSeries::new();
    SweepController::new(params).unwrap().run(&mut lat, &mut series).unwrap();

    let summary = RunSummary::from_series(&series, lat.n_sites(), params.temperature, 100).unwrap();
    assert!(summary.mean_abs_magnetization < 0.3);
    assert!(summary.mean_entropy > 0.8);
    assert!(summary.mean_energy > -1.0);
}

#[test]
fn test_antiferromagnet_keeps_checkerboard_at_zero_temperature() {
    let initial = initialize(InitStrategy::Checkerboard, 6, None).unwrap();
    let mut lat = initial.clone();
    let params = SimulationParameters::new(6, 0.0, 30).with_model(-1.0, 0.0).with_seed(4);
    let (flips, samples) = run_recorded(&mut lat, &params);
    assert!(flips.is_empty());
    assert_eq!(lat, initial);
    assert!(samples.iter().all(|s| (s.energy + 2.0).abs() < 1e-12));
}

#[test]
fn test_strong_field_aligns_spins() {
    let params = SimulationParameters::new(8, 1.0, 200).with_model(1.0, 4.0).with_seed(31);
    let mut lat = initialize(InitStrategy::Checkerboard, 8, None).unwrap();
    let (_, samples) = run_recorded(&mut lat, &params);
    let last = samples.last().unwrap();
    assert!(last.magnetization > 0.95);
}
