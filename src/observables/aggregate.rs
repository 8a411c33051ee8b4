//! Whole-lattice observables: energy, magnetization and entropy per site.

use serde::{Deserialize, Serialize};

use crate::energy::EnergyModel;
use crate::lattice::Lattice;

/// One sampled data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub energy: f64,
    pub magnetization: f64,
    pub entropy: f64,
}

impl Sample {
    /// Evaluate all observables for the current configuration. O(N²).
    pub fn measure(lattice: &Lattice, model: &EnergyModel) -> Self {
        let magnetization = magnetization(lattice);
        Self {
            energy: energy(lattice, model),
            magnetization,
            entropy: entropy(magnetization),
        }
    }
}

/// Energy per site.
///
/// Sums `J s (Σn + h)` over every site of the unflipped lattice, halves it
/// since each bond is visited from both ends, normalizes by N² and negates.
/// This is the Hamiltonian of [`EnergyModel`] per site, not the flip cost
/// `2 J s Σn + J s h`: the all-up lattice at h = 0 gives -2J, and
/// [`EnergyModel::delta_energy`] equals N² times the change of this value.
pub fn energy(lattice: &Lattice, model: &EnergyModel) -> f64 {
    let n = lattice.size();
    let mut total = 0.0;
    for row in 0..n {
        for col in 0..n {
            total += model.site_term(lattice, row, col);
        }
    }
    -total / (2.0 * lattice.n_sites() as f64)
}

/// Mean spin, in [-1, 1].
pub fn magnetization(lattice: &Lattice) -> f64 {
    lattice.total_spin() as f64 / lattice.n_sites() as f64
}

/// Two-state mean-field entropy in bits.
///
/// With p = (1 - m) / 2 this is -p log2 p - (1 - p) log2 (1 - p), taken as
/// 0 at the fully ordered boundaries p = 0 and p = 1.
pub fn entropy(magnetization: f64) -> f64 {
    let p = (1.0 - magnetization) / 2.0;
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    let q = 1.0 - p;
    -(p * p.log2()) - q * q.log2()
}
