use anyhow::Context;
use trip_features::batch;
use trip_features::config::ReportConfig;
use trip_features::distance::FlatEarth;
use trip_features::report::{CsvSink, ReportSink};
use trip_features::source::{DirectorySource, TripSource};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = ReportConfig::from_env()?;
    tracing::info!(
        "scanning {} for {}*.{}",
        cfg.input_dir.display(),
        cfg.file_prefix,
        cfg.file_extension
    );

    let source = DirectorySource::new(&cfg.input_dir, &cfg.file_prefix, &cfg.file_extension);
    let inputs = source.load_all()?;
    if inputs.is_empty() {
        tracing::error!("no trip files found in {}", source.dir().display());
        return Ok(());
    }

    let report = batch::process(inputs, &FlatEarth);

    let written = CsvSink::create(&cfg.output_path).and_then(|mut sink| sink.write_rows(&report.rows));
    if let Err(e) = written {
        tracing::error!("CSV write error: {}", e);
        return Err(e).with_context(|| format!("failed to write {}", cfg.output_path.display()));
    }

    tracing::info!(
        "feature extraction complete: {} ({} of {} trips, {} failed)",
        cfg.output_path.display(),
        report.rows.len(),
        report.total(),
        report.failures.len()
    );
    Ok(())
}
