//! Initial spin configurations.

use std::fmt;
use std::str::FromStr;

use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{Lattice, SPIN_DOWN, SPIN_UP};
use crate::error::{IsingError, Result};
use crate::rng::seeded_rng;

/// Strategy used to seed the lattice before the Markov chain starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStrategy {
    /// Each site independently +1 or -1 with equal probability.
    #[default]
    Random,
    /// Every site +1. Fully ordered, the frozen state of a ferromagnet at T = 0.
    #[serde(alias = "most_energetic")]
    AllUp,
    /// +1 where `row + col` is even, -1 elsewhere. Ground state for J < 0.
    Checkerboard,
}

impl InitStrategy {
    /// Spin assigned to `(row, col)` by the deterministic strategies.
    fn ordered_spin(self, row: usize, col: usize) -> i8 {
        match self {
            InitStrategy::Checkerboard if (row + col) % 2 == 1 => SPIN_DOWN,
            _ => SPIN_UP,
        }
    }
}

impl FromStr for InitStrategy {
    type Err = IsingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(Self::Random),
            "all_up" | "most_energetic" => Ok(Self::AllUp),
            "checkerboard" => Ok(Self::Checkerboard),
            _ => Err(IsingError::invalid(format!(
                "unknown initialization strategy '{s}', expected 'random', 'all_up' or 'checkerboard'"
            ))),
        }
    }
}

impl fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitStrategy::Random => "random",
            InitStrategy::AllUp => "all_up",
            InitStrategy::Checkerboard => "checkerboard",
        };
        f.write_str(name)
    }
}

/// Create an N x N lattice following `strategy`.
///
/// `seed` only affects [`InitStrategy::Random`]; `None` draws from OS entropy.
pub fn initialize(strategy: InitStrategy, size: usize, seed: Option<u64>) -> Result<Lattice> {
    if size == 0 {
        return Err(IsingError::invalid("lattice dimension must be positive"));
    }
    debug!(%strategy, size, ?seed, "initializing lattice");

    let lattice = match strategy {
        InitStrategy::Random => {
            let mut rng = seeded_rng(seed);
            let coin = Bernoulli::new(0.5).map_err(|e| IsingError::invalid(e.to_string()))?;
            let draws: Vec<i8> = (0..size * size)
                .map(|_| if coin.sample(&mut rng) { SPIN_UP } else { SPIN_DOWN })
                .collect();
            Lattice::from_spins(size, &draws)?
        }
        ordered => Lattice::from_fn(size, |row, col| ordered.ordered_spin(row, col)),
    };
    Ok(lattice)
}
