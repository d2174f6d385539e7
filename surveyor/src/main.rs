use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use airframe::AirframeDecoder;
use radio_sim::SimRadio;
use session::config::SurveyConfig;
use session::report;
use session::runner::run_session;

mod airframe;
mod radio_sim;
mod session;

#[derive(Parser)]
#[command(author, version, about = "Passive 802.11 survey driver over a simulated radio")]
struct Args {
    /// Load a survey config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// How long to scan before reporting
    #[arg(long, default_value_t = 12)]
    duration_secs: u64,
    /// Override the per-channel dwell time
    #[arg(long)]
    dwell_ms: Option<u64>,
    /// Override the station table bound
    #[arg(long)]
    max_stations: Option<usize>,
    /// Emit the final report as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut survey_config = if let Some(path) = args.config {
        SurveyConfig::load(path)?
    } else {
        SurveyConfig::default()
    };
    if let Some(dwell_ms) = args.dwell_ms {
        survey_config.dwell_ms = dwell_ms;
    }
    if let Some(max_stations) = args.max_stations {
        survey_config.max_stations = max_stations;
    }

    let scan_config = survey_config.to_scan_config();
    let radio = Arc::new(SimRadio::new(
        &survey_config.airwaves,
        scan_config.min_channel,
        scan_config.max_channel,
    ));

    let outcome = run_session(
        &scan_config,
        radio,
        AirframeDecoder::new(),
        Duration::from_secs(args.duration_secs),
    )
    .await
    .context("running survey session")?;

    if args.json {
        println!("{}", report::to_json(&outcome)?);
    } else {
        println!();
        report::print_station_table(&outcome.stations);
        report::print_counters(&outcome.counters);
    }

    Ok(())
}
