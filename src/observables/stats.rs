//! Summary statistics over an observable time series.

use serde::Serialize;

use super::series::ObservableSeries;

/// Averages and fluctuation measures of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of samples retained after the warm-up cut.
    pub n_samples: usize,
    pub mean_energy: f64,
    /// Blocking estimate of the standard error of `mean_energy`.
    pub energy_error: f64,
    /// Integrated autocorrelation time of the energy series, in samples.
    pub autocorrelation_time: f64,
    pub mean_magnetization: f64,
    pub mean_abs_magnetization: f64,
    pub mean_entropy: f64,
    /// C = N² Var(e) / T², per site.
    pub specific_heat: f64,
    /// χ = N² Var(m) / T, per site.
    pub susceptibility: f64,
}

impl RunSummary {
    /// Summarize `series`, skipping the first `warmup` samples.
    ///
    /// Returns `None` when no sample survives the cut.
    pub fn from_series(
        series: &ObservableSeries,
        n_sites: usize,
        temperature: f64,
        warmup: usize,
    ) -> Option<Self> {
        if warmup >= series.len() {
            return None;
        }

        let energies = series.energies().split_off(warmup);
        let mags = series.magnetizations().split_off(warmup);
        let abs_mags: Vec<f64> = mags.iter().map(|m| m.abs()).collect();
        let entropies = series.entropies().split_off(warmup);
        let n_samples = energies.len();

        let autocorrelation_time = autocorrelation_time(&energies);
        let n_sites = n_sites as f64;

        let (specific_heat, susceptibility) = if temperature > 0.0 && n_samples > 1 {
            (
                n_sites * variance(&energies) / (temperature * temperature),
                n_sites * variance(&mags) / temperature,
            )
        } else {
            (0.0, 0.0)
        };

        Some(Self {
            n_samples,
            mean_energy: mean(&energies),
            energy_error: blocking_error(&energies, autocorrelation_time),
            autocorrelation_time,
            mean_magnetization: mean(&mags),
            mean_abs_magnetization: mean(&abs_mags),
            mean_entropy: mean(&entropies),
            specific_heat,
            susceptibility,
        })
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Estimate autocorrelation time using initial positive sequence.
pub fn autocorrelation_time(values: &[f64]) -> f64 {
    let n = values.len();
    let var = variance(values);
    if var == 0.0 {
        return 1.0;
    }
    let m = mean(values);

    let mut tau = 1.0;
    for t in 1..n / 2 {
        let auto_t: f64 = values[..n - t]
            .iter()
            .zip(values[t..].iter())
            .map(|(&x, &y)| (x - m) * (y - m))
            .sum::<f64>()
            / ((n - t) as f64 * var);

        if auto_t < 0.0 {
            break;
        }
        tau += 2.0 * auto_t;
    }
    tau
}

/// Standard error of the mean from blocks of length ceil(2 tau).
pub fn blocking_error(values: &[f64], autocorrelation_time: f64) -> f64 {
    let block_size = ((2.0 * autocorrelation_time).ceil() as usize).max(1);
    let n_blocks = values.len() / block_size;
    if n_blocks < 2 {
        return 0.0;
    }

    let block_means: Vec<f64> = values
        .chunks_exact(block_size)
        .map(|block| block.iter().sum::<f64>() / block_size as f64)
        .collect();

    let m = mean(&block_means);
    let var = block_means.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (n_blocks - 1) as f64;
    (var / n_blocks as f64).sqrt()
}
