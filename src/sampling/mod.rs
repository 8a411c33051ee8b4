//! Sampling module - Metropolis Markov chain over the spin lattice.

mod metropolis;
mod sweep;
mod traits;

pub use metropolis::{
    accept, acceptance_probability, boltzmann_factor, metropolis_step, StepOutcome, Trial,
};
pub use sweep::{run, RunReport, SamplingMode, SimulationParameters, SweepController};
pub use traits::{Callbacks, SimulationObserver};
