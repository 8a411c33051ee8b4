//! Logging setup and series output.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{format::Writer, layer, time::FormatTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::error::Result;
use crate::observables::ObservableSeries;

/// Wall-clock timestamps as HH:MM:SS.
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let total_seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;
        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Install the global tracing subscriber, logging to `log_path` or stdout.
pub fn setup_logging(log_path: Option<&Path>, level: LevelFilter) -> Result<()> {
    match log_path {
        Some(path) => {
            let file = File::create(path)?;
            let file_layer = layer()
                .with_writer(Mutex::new(file))
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false)
                .with_filter(level);
            Registry::default().with(file_layer).init();
            info!("logging to {}", path.display());
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default().with(stdout_layer).init();
        }
    }
    Ok(())
}

/// Write one `index energy magnetization entropy` line per sample.
pub fn write_series(path: impl AsRef<Path>, series: &ObservableSeries) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_series_to(&mut writer, series)?;
    writer.flush()?;
    info!(
        samples = series.len(),
        "observable series written to {}",
        path.as_ref().display()
    );
    Ok(())
}

pub fn write_series_to<W: Write>(writer: &mut W, series: &ObservableSeries) -> Result<()> {
    writeln!(writer, "# index energy magnetization entropy")?;
    for (i, s) in series.samples().iter().enumerate() {
        writeln!(writer, "{} {} {} {}", i, s.energy, s.magnetization, s.entropy)?;
    }
    Ok(())
}
