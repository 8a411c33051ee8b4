//! Metropolis acceptance rule for single-spin flips.

use rand::Rng;

use crate::energy::EnergyModel;
use crate::lattice::Lattice;

/// Outcome of one proposed flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trial {
    Accepted,
    Rejected,
}

impl Trial {
    pub fn is_accepted(self) -> bool {
        self == Trial::Accepted
    }
}

/// Result of [`metropolis_step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub delta_energy: f64,
    /// Boltzmann factor, only evaluated when ΔE > 0.
    pub boltzmann_factor: Option<f64>,
    pub trial: Trial,
}

/// exp(-ΔE / T), or exactly 0 at T = 0.
#[inline]
pub fn boltzmann_factor(delta_energy: f64, temperature: f64) -> f64 {
    if temperature > 0.0 {
        (-delta_energy / temperature).exp()
    } else {
        0.0
    }
}

/// Probability that a flip costing `delta_energy` is accepted.
pub fn acceptance_probability(delta_energy: f64, temperature: f64) -> f64 {
    if delta_energy <= 0.0 {
        1.0
    } else {
        boltzmann_factor(delta_energy, temperature)
    }
}

/// Decide a proposed flip costing `delta_energy`.
///
/// ΔE <= 0 is accepted without touching `rng`; otherwise exactly one
/// uniform draw u is taken and the flip is accepted iff u < exp(-ΔE / T).
pub fn accept<R: Rng + ?Sized>(
    delta_energy: f64,
    temperature: f64,
    rng: &mut R,
) -> (Trial, Option<f64>) {
    if delta_energy <= 0.0 {
        return (Trial::Accepted, None);
    }
    let u: f64 = rng.gen();
    let b = boltzmann_factor(delta_energy, temperature);
    let trial = if u < b { Trial::Accepted } else { Trial::Rejected };
    (trial, Some(b))
}

/// Propose flipping `(row, col)` and apply it if accepted.
pub fn metropolis_step<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    row: usize,
    col: usize,
    model: &EnergyModel,
    temperature: f64,
    rng: &mut R,
) -> StepOutcome {
    let delta_energy = model.delta_energy(lattice, row, col);
    let (trial, boltzmann_factor) = accept(delta_energy, temperature, rng);
    if trial.is_accepted() {
        lattice.flip(row, col);
    }
    StepOutcome {
        delta_energy,
        boltzmann_factor,
        trial,
    }
}
