// Daily rotisserie report entry point.
//
// Usage: roto-daily [YYYY-MM-DD]   (defaults to yesterday)
//
// Startup sequence:
// 1. Initialize tracing (log to file)
// 2. Load config
// 3. Resolve the date to process
// 4. Run the day: stats, roster sheet, free agents, reports

use roto_daily::config;
use roto_daily::pipeline;
use roto_daily::source::RawDirSource;

use anyhow::Context;
use chrono::{Duration, Local, NaiveDate};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("roto-daily starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, data in {}",
        config.league.name, config.paths.data_dir
    );

    let date = match std::env::args().nth(1) {
        Some(arg) => NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
            .with_context(|| format!("`{arg}` is not a YYYY-MM-DD date"))?,
        None => Local::now().date_naive() - Duration::days(1),
    };
    info!("Processing {}", date);

    let source = RawDirSource::new(config.raw_dir());
    let summary = pipeline::run_day(&config, &source, date)
        .with_context(|| format!("daily run for {date} failed"))?;

    println!(
        "{}: {} player lines, {} free-agent batters, {} free-agent pitchers",
        summary.date,
        summary.players,
        summary.free_agents.batters.len(),
        summary.free_agents.pitchers.len()
    );
    info!("roto-daily finished");
    Ok(())
}

/// Initialize tracing to log to `logs/roto-daily.log`.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("roto-daily.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roto_daily=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
