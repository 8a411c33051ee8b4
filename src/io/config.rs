//! YAML run configuration.
//!
//! ```yaml
//! size: 32
//! temperature: 2.0
//! field: 0.0
//! coupling: 1.0
//! sweeps: 1000
//! strategy: random      # random | all_up | checkerboard
//! sampling: per_sweep   # per_sweep | per_flip
//! seed: 42
//! verbose: false
//! warmup: 100
//! series_output: series.dat
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::energy::EnergyModel;
use crate::error::{IsingError, Result};
use crate::lattice::InitStrategy;
use crate::sampling::{SamplingMode, SimulationParameters};

fn default_coupling() -> f64 {
    1.0
}

fn default_strategy() -> String {
    InitStrategy::default().to_string()
}

/// Raw configuration as read from disk.
///
/// `size` and `sweeps` are signed so that negative values are reported as
/// invalid parameters by [`RunConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub size: i64,
    pub temperature: f64,
    #[serde(default)]
    pub field: f64,
    #[serde(default = "default_coupling")]
    pub coupling: f64,
    pub sweeps: i64,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default)]
    pub sampling: SamplingMode,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub verbose: bool,
    /// Leading samples excluded from the run summary.
    #[serde(default)]
    pub warmup: usize,
    /// Where to write the observable series, if anywhere.
    #[serde(default)]
    pub series_output: Option<String>,
}

impl RunConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a YAML configuration file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Check every setting and build the immutable run parameters.
    pub fn validate(&self) -> Result<(SimulationParameters, InitStrategy)> {
        if self.size <= 0 {
            return Err(IsingError::invalid(format!(
                "lattice dimension must be positive, got {}",
                self.size
            )));
        }
        if self.sweeps < 0 {
            return Err(IsingError::invalid(format!(
                "sweep count must be >= 0, got {}",
                self.sweeps
            )));
        }
        let strategy: InitStrategy = self.strategy.parse()?;

        let size = usize::try_from(self.size)
            .map_err(|_| IsingError::invalid(format!("lattice dimension {} too large", self.size)))?;
        let sweeps = usize::try_from(self.sweeps)
            .map_err(|_| IsingError::invalid(format!("sweep count {} too large", self.sweeps)))?;

        let params = SimulationParameters {
            size,
            temperature: self.temperature,
            model: EnergyModel::new(self.coupling, self.field),
            sweeps,
            sampling: self.sampling,
            seed: self.seed,
            verbose: self.verbose,
        };
        params.validate()?;
        Ok((params, strategy))
    }
}
