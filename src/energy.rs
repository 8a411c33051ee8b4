//! Local energy of the 2D Ising Hamiltonian.
//!
//! H = -J Σ_<ij> s_i s_j - (J h / 2) Σ_i s_i
//!
//! With this normalization the cost of flipping site i is
//! ΔE = 2 J s_i Σn_i + J h s_i, where Σn_i is the sum of the four periodic
//! neighbors. A spin aligned with its neighborhood (J > 0) or with the
//! field (J h > 0) pays a positive ΔE to flip.

use serde::{Deserialize, Serialize};

use crate::lattice::Lattice;

/// Interaction energy J and external field h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyModel {
    pub coupling: f64,
    pub field: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self {
            coupling: 1.0,
            field: 0.0,
        }
    }
}

impl EnergyModel {
    pub fn new(coupling: f64, field: f64) -> Self {
        Self { coupling, field }
    }

    /// Energy change if the spin at `(row, col)` were flipped. Does not mutate.
    #[inline]
    pub fn delta_energy(&self, lattice: &Lattice, row: usize, col: usize) -> f64 {
        let s = lattice.spin(row, col) as f64;
        let neighbors = lattice.neighbor_sum(row, col) as f64;
        2.0 * s * neighbors * self.coupling + s * self.coupling * self.field
    }

    /// Twice the (negated) energy owned by `(row, col)`: J s (Σn + h).
    ///
    /// Summing over all sites counts every bond twice; see
    /// [`crate::observables::energy`].
    #[inline]
    pub fn site_term(&self, lattice: &Lattice, row: usize, col: usize) -> f64 {
        let s = lattice.spin(row, col) as f64;
        let neighbors = lattice.neighbor_sum(row, col) as f64;
        self.coupling * s * (neighbors + self.field)
    }
}
