//! Sweep controller driving the single-spin-flip Markov chain.
//!
//! One sweep is N² trials; each trial draws a row, then a column, uniformly
//! with replacement, and then hands the site to the Metropolis rule. The
//! acceptance draw is only taken when ΔE > 0, so a seeded run consumes the
//! random stream in a fixed order.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::metropolis::{metropolis_step, StepOutcome};
use super::traits::{Callbacks, SimulationObserver};
use crate::energy::EnergyModel;
use crate::error::{IsingError, Result};
use crate::lattice::Lattice;
use crate::observables::Sample;
use crate::rng::{seeded_rng, IsingRng};

/// When observables are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// After every trial, accepted or not. Costs O(N²) per trial.
    PerFlip,
    /// Once after each completed sweep.
    #[default]
    PerSweep,
}

/// Parameters for one run. Fixed for the run's duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Lattice dimension N.
    pub size: usize,
    /// Temperature in units of J/k_B, >= 0.
    pub temperature: f64,
    pub model: EnergyModel,
    /// Number of sweeps S.
    pub sweeps: usize,
    pub sampling: SamplingMode,
    /// Seed of the Markov chain's random stream; `None` uses OS entropy.
    pub seed: Option<u64>,
    /// Report every trial at debug level instead of trace level.
    pub verbose: bool,
}

impl SimulationParameters {
    /// Ferromagnetic defaults (J = 1, h = 0, per-sweep sampling).
    pub fn new(size: usize, temperature: f64, sweeps: usize) -> Self {
        Self {
            size,
            temperature,
            model: EnergyModel::default(),
            sweeps,
            sampling: SamplingMode::default(),
            seed: None,
            verbose: false,
        }
    }

    pub fn with_model(mut self, coupling: f64, field: f64) -> Self {
        self.model = EnergyModel::new(coupling, field);
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(IsingError::invalid("lattice dimension must be positive"));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(IsingError::invalid(format!(
                "temperature must be finite and >= 0, got {}",
                self.temperature
            )));
        }
        if !self.model.coupling.is_finite() || !self.model.field.is_finite() {
            return Err(IsingError::invalid(format!(
                "coupling and field must be finite, got J={} h={}",
                self.model.coupling, self.model.field
            )));
        }
        Ok(())
    }

    /// Total number of trial flips, S·N².
    pub fn total_trials(&self) -> u64 {
        self.sweeps as u64 * (self.size * self.size) as u64
    }
}

/// Counters of a finished (or ongoing) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    pub trials: u64,
    pub accepted: u64,
    pub sweeps: usize,
}

impl RunReport {
    pub fn acceptance_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.accepted as f64 / self.trials as f64
        }
    }
}

/// Drives the Markov chain over a borrowed lattice.
pub struct SweepController<R: Rng = IsingRng> {
    params: SimulationParameters,
    rng: R,
    report: RunReport,
}

impl SweepController<IsingRng> {
    /// Controller whose random stream is seeded from `params.seed`.
    pub fn new(params: SimulationParameters) -> Result<Self> {
        Self::with_rng(params, seeded_rng(params.seed))
    }
}

impl<R: Rng> SweepController<R> {
    pub fn with_rng(params: SimulationParameters, rng: R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            rng,
            report: RunReport::default(),
        })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn report(&self) -> RunReport {
        self.report
    }

    /// One trial: pick a random site, propose a flip, notify observers.
    pub fn trial<O>(&mut self, lattice: &mut Lattice, observer: &mut O) -> StepOutcome
    where
        O: SimulationObserver + ?Sized,
    {
        let n = lattice.size();
        let row = self.rng.gen_range(0..n);
        let col = self.rng.gen_range(0..n);

        let outcome = metropolis_step(
            lattice,
            row,
            col,
            &self.params.model,
            self.params.temperature,
            &mut self.rng,
        );

        let step = self.report.trials;
        self.report.trials += 1;
        if self.params.verbose {
            debug!(
                step,
                row,
                col,
                delta_e = outcome.delta_energy,
                boltzmann = ?outcome.boltzmann_factor,
                trial = ?outcome.trial
            );
        } else {
            trace!(step, row, col, delta_e = outcome.delta_energy, trial = ?outcome.trial);
        }

        if outcome.trial.is_accepted() {
            self.report.accepted += 1;
            observer.on_flip(row, col, lattice.spin(row, col));
        }
        if self.params.sampling == SamplingMode::PerFlip {
            observer.on_sample(&Sample::measure(lattice, &self.params.model));
        }
        outcome
    }

    /// N² trials, followed by a sample in per-sweep mode.
    pub fn sweep<O>(&mut self, lattice: &mut Lattice, observer: &mut O)
    where
        O: SimulationObserver + ?Sized,
    {
        let accepted_before = self.report.accepted;
        for _ in 0..lattice.n_sites() {
            self.trial(lattice, observer);
        }
        self.report.sweeps += 1;
        debug!(
            sweep = self.report.sweeps,
            accepted = self.report.accepted - accepted_before,
            "sweep finished"
        );

        if self.params.sampling == SamplingMode::PerSweep {
            observer.on_sample(&Sample::measure(lattice, &self.params.model));
        }
    }

    /// Run the configured number of sweeps, exactly S·N² trials.
    pub fn run<O>(&mut self, lattice: &mut Lattice, observer: &mut O) -> Result<RunReport>
    where
        O: SimulationObserver + ?Sized,
    {
        if lattice.size() != self.params.size {
            return Err(IsingError::invalid(format!(
                "lattice is {n}x{n} but parameters ask for N={}",
                self.params.size,
                n = lattice.size()
            )));
        }

        info!(
            size = self.params.size,
            temperature = self.params.temperature,
            coupling = self.params.model.coupling,
            field = self.params.model.field,
            sweeps = self.params.sweeps,
            sampling = ?self.params.sampling,
            "starting Metropolis run"
        );
        for _ in 0..self.params.sweeps {
            self.sweep(lattice, observer);
        }
        info!(
            trials = self.report.trials,
            accepted = self.report.accepted,
            acceptance_rate = self.report.acceptance_rate(),
            "run finished"
        );
        Ok(self.report)
    }
}

/// Run a seeded Markov chain on `lattice`, forwarding flips and samples to
/// the two callbacks.
pub fn run<F, G>(
    lattice: &mut Lattice,
    params: &SimulationParameters,
    on_flip: F,
    on_sample: G,
) -> Result<RunReport>
where
    F: FnMut(usize, usize, i8),
    G: FnMut(&Sample),
{
    let mut controller = SweepController::new(*params)?;
    let mut callbacks = Callbacks { on_flip, on_sample };
    controller.run(lattice, &mut callbacks)
}
