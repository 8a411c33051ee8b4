//! Ising Metropolis command-line interface
//!
//! Reads a YAML run configuration, applies command-line overrides, runs the
//! Markov chain and reports observables.

use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;

use rust_ising::analysis::{
    critical_temperature, energy_per_site_at_zero_temp, magnetization_at_zero_temp,
};
use rust_ising::io::{setup_logging, write_series, RunConfig};
use rust_ising::{initialize, ObservableSeries, RunSummary, SamplingMode, SweepController};

/// Decorrelates the initial configuration from the Markov chain's stream.
const INIT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Largest lattice whose final configuration is printed.
const MAX_PRINTED_SIZE: usize = 32;

/// 2D Ising model Metropolis simulation with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yml")]
    config: String,

    /// Write logs to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Override lattice dimension N
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,

    /// Override temperature T
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Override external field h
    #[arg(long, allow_negative_numbers = true)]
    field: Option<f64>,

    /// Override interaction energy J
    #[arg(long, allow_negative_numbers = true)]
    coupling: Option<f64>,

    /// Override number of sweeps
    #[arg(short, long, allow_negative_numbers = true)]
    sweeps: Option<i64>,

    /// Override initialization strategy (random, all_up, checkerboard)
    #[arg(long)]
    strategy: Option<String>,

    /// Override random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Sample after every trial flip instead of after every sweep
    #[arg(long)]
    per_flip: bool,

    /// Log every trial flip at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Override series output file
    #[arg(long)]
    series: Option<String>,
}

impl Args {
    fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(size) = self.size {
            info!("Overriding size with: {}", size);
            config.size = size;
        }
        if let Some(t) = self.temperature {
            info!("Overriding temperature with: {}", t);
            config.temperature = t;
        }
        if let Some(h) = self.field {
            info!("Overriding field with: {}", h);
            config.field = h;
        }
        if let Some(j) = self.coupling {
            info!("Overriding coupling with: {}", j);
            config.coupling = j;
        }
        if let Some(s) = self.sweeps {
            info!("Overriding sweeps with: {}", s);
            config.sweeps = s;
        }
        if let Some(strategy) = &self.strategy {
            info!("Overriding strategy with: {}", strategy);
            config.strategy = strategy.clone();
        }
        if let Some(seed) = self.seed {
            info!("Overriding seed with: {}", seed);
            config.seed = Some(seed);
        }
        if self.per_flip {
            config.sampling = SamplingMode::PerFlip;
        }
        if self.verbose {
            config.verbose = true;
        }
        if let Some(path) = &self.series {
            config.series_output = Some(path.clone());
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.output.as_deref().map(Path::new), args.log_level)
        .wrap_err("Unable to set up logging")?;

    info!("Reading configuration from: {}", args.config);
    let mut config = RunConfig::read(&args.config)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config))?;
    args.apply_overrides(&mut config);

    let (params, strategy) = config
        .validate()
        .wrap_err("Invalid simulation parameters")?;
    info!("Configuration loaded:\n{:?}", config);
    info!(
        "T = {:.4}, T/T_c = {:.4} (T_c = {:.4} for J = 1)",
        params.temperature,
        params.temperature / critical_temperature(),
        critical_temperature()
    );

    let init_seed = params.seed.map(|seed| seed ^ INIT_SEED_SALT);
    let mut lattice = initialize(strategy, params.size, init_seed)
        .wrap_err_with(|| format!("Unable to initialize {} lattice", strategy))?;

    let mut series = match params.sampling {
        SamplingMode::PerSweep => ObservableSeries::with_capacity(params.sweeps),
        SamplingMode::PerFlip => ObservableSeries::new(),
    };
    let mut controller = SweepController::new(params)?;
    let report = controller.run(&mut lattice, &mut series)?;

    info!(
        "Accepted {} of {} trial flips ({:.2}%)",
        report.accepted,
        report.trials,
        100.0 * report.acceptance_rate()
    );

    match RunSummary::from_series(&series, lattice.n_sites(), params.temperature, config.warmup) {
        Some(summary) => {
            info!("Samples used: {} (warm-up discarded: {})", summary.n_samples, config.warmup);
            info!(
                "Energy per site: {:.6} ± {:.6} (autocorrelation time {:.2} samples)",
                summary.mean_energy, summary.energy_error, summary.autocorrelation_time
            );
            info!(
                "Magnetization per site: {:.6} (|m| = {:.6})",
                summary.mean_magnetization, summary.mean_abs_magnetization
            );
            info!("Entropy per site: {:.6} bits", summary.mean_entropy);
            info!("Specific heat: {:.6}", summary.specific_heat);
            info!("Susceptibility: {:.6}", summary.susceptibility);
            if params.model.coupling > 0.0 && params.model.field == 0.0 {
                info!(
                    "Ordered ground state: energy per site {:.6}, |m| = {:.6}",
                    energy_per_site_at_zero_temp() * params.model.coupling,
                    magnetization_at_zero_temp()
                );
            }
        }
        None => warn!(
            "No samples left after discarding {} warm-up samples of {}",
            config.warmup,
            series.len()
        ),
    }

    if let Some(path) = &config.series_output {
        write_series(path, &series)
            .wrap_err_with(|| format!("Unable to write observable series to {}", path))?;
    }

    if lattice.size() <= MAX_PRINTED_SIZE {
        info!("Final configuration:\n{}", lattice);
    }

    Ok(())
}
