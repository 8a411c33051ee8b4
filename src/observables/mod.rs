//! Observables module - lattice aggregates and their time series.

mod aggregate;
mod series;
pub mod stats;

pub use aggregate::{energy, entropy, magnetization, Sample};
pub use series::ObservableSeries;
pub use stats::RunSummary;
