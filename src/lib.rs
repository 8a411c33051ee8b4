//! Rust Ising - Metropolis Monte Carlo for the 2D Ising model in Rust
//!
//! This crate evolves an N x N spin lattice with periodic boundaries toward
//! thermal equilibrium one single-spin trial flip at a time, and measures
//! energy, magnetization and entropy along the way.
//!
//! ```no_run
//! use rust_ising::{initialize, run, InitStrategy, SimulationParameters};
//!
//! let params = SimulationParameters::new(16, 2.0, 100).with_seed(42);
//! let mut lattice = initialize(InitStrategy::Random, 16, Some(42))?;
//! let report = run(&mut lattice, &params, |_, _, _| {}, |s| println!("{:?}", s))?;
//! println!("acceptance rate {:.3}", report.acceptance_rate());
//! # Ok::<(), rust_ising::IsingError>(())
//! ```

pub mod analysis;
pub mod energy;
pub mod error;
pub mod io;
pub mod lattice;
pub mod observables;
pub mod rng;
pub mod sampling;

// Re-export commonly used types at crate root
pub use energy::EnergyModel;
pub use error::{IsingError, Result};
pub use lattice::{initialize, InitStrategy, Lattice, SPIN_DOWN, SPIN_UP};
pub use observables::{energy, entropy, magnetization, ObservableSeries, RunSummary, Sample};
pub use sampling::{
    run, RunReport, SamplingMode, SimulationObserver, SimulationParameters, SweepController, Trial,
};

#[cfg(test)]
mod tests;
