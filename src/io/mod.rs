//! IO module - configuration, logging and output files.

mod config;
mod output;

pub use config::RunConfig;
pub use output::{setup_logging, write_series, write_series_to};
