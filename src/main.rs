use anyhow::Context;
use clap::Parser;
use log::info;
use oncoxtract::oncoxtract::OncoXtract;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "oncoxtract",
    version,
    about = "Turn oncology treatment-line spreadsheets into cleaned tables and survival reports"
)]
struct Cli {
    /// Path to the YAML, JSON, TOML or RON configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: PathBuf,

    /// Run every stage but do not write any output files.
    #[arg(long = "no-write")]
    no_write: bool,

    /// Raise the log level (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_level(cli.verbose)),
    )
    .init();

    let oncoxtract = OncoXtract::from_config_file(&cli.config)
        .with_context(|| format!("Could not set up the pipeline from {}", cli.config.display()))?;
    let output = oncoxtract.run(!cli.no_write).context("Pipeline run failed")?;

    let summary = &output.report.summary;
    info!("Patients in cohort: {}", summary.total_patients);
    info!("Flagged patients:   {}", output.report.flagged_patients);
    match summary.median_age {
        Some(age) => info!("Median age:         {age:.1}"),
        None => info!("Median age:         n/a"),
    }
    info!("Female / Male:      {} / {}", summary.female, summary.male);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["oncoxtract", "--config", "run.yaml", "--no-write", "-vv"]);
        assert_eq!(cli.config, PathBuf::from("run.yaml"));
        assert!(cli.no_write);
        assert_eq!(default_log_level(cli.verbose), "trace");
    }
}
