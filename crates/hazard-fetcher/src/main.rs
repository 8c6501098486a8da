//! Hazard Data CLI
//!
//! Usage:
//!   hazard-fetch volcanoes --output noaa_volcanoes.json
//!   hazard-fetch earthquakes --days 7 --min-mag 4.5 --output earthquakes.json --geojson
//!   hazard-fetch classify --lat 61.2 --lon -149.9 --mag 7.1 --depth 40
//!   hazard-fetch summary noaa_volcanoes.json

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use hazard_fetcher::{
    fetch_all_pages, load_snapshot, save_snapshot, write_json, EventQuery, FetcherConfig,
    HttpPageSource, UsgsClient, UsgsConfig, DEFAULT_SNAPSHOT_PATH, NOAA_VOLCANOES_URL,
    USGS_QUERY_URL,
};
use seismic_classifier::{
    classify, export, timeline, ClassifiedRecord, ImpactLevel, RiskLabel, SafetyTip,
    SeismicRecord,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "hazard-fetch",
    about = "Fetch volcano listings and classify recent earthquakes"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Per-request timeout in seconds (HTTP client default when omitted)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the full paged volcano listing into one JSON file
    Volcanoes {
        /// Listing endpoint
        #[arg(long, env = "HAZARD_VOLCANO_URL", default_value = NOAA_VOLCANOES_URL)]
        url: String,

        /// Output JSON file
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
        output: PathBuf,
    },

    /// Query recent earthquakes and classify each event
    Earthquakes {
        /// Show events from the past N days
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=30))]
        days: u32,

        /// Minimum magnitude
        #[arg(long, default_value_t = 4.5, allow_negative_numbers = true)]
        min_mag: f64,

        /// Maximum magnitude
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        max_mag: f64,

        /// Minimum depth in km
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        min_depth: f64,

        /// Maximum depth in km
        #[arg(long, default_value_t = 700.0, allow_negative_numbers = true)]
        max_depth: f64,

        /// Event query endpoint
        #[arg(long, env = "HAZARD_USGS_URL", default_value = USGS_QUERY_URL)]
        url: String,

        /// Output JSON file
        #[arg(short, long, default_value = "earthquakes.json")]
        output: PathBuf,

        /// Also output GeoJSON
        #[arg(long)]
        geojson: bool,
    },

    /// Classify a single event
    Classify {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, allow_negative_numbers = true)]
        mag: f64,
        /// Depth in km
        #[arg(long, allow_negative_numbers = true)]
        depth: f64,
    },

    /// Report the contents of a saved snapshot
    Summary {
        /// Snapshot JSON file
        #[arg(default_value = DEFAULT_SNAPSHOT_PATH)]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let timeout = args.timeout_secs.map(Duration::from_secs);

    match args.command {
        Command::Volcanoes { url, output } => run_volcanoes(url, output, timeout).await,
        Command::Earthquakes {
            days,
            min_mag,
            max_mag,
            min_depth,
            max_depth,
            url,
            output,
            geojson,
        } => {
            let query = EventQuery::past_days(days, Utc::now().date_naive())
                .with_magnitude(min_mag, max_mag)
                .with_depth(min_depth, max_depth);
            run_earthquakes(query, UsgsConfig { base_url: url, timeout }, output, geojson).await
        }
        Command::Classify { lat, lon, mag, depth } => {
            let classified = classify(SeismicRecord::new(lat, lon, mag, depth));
            println!("{}", serde_json::to_string_pretty(&classified)?);
            Ok(())
        }
        Command::Summary { path } => {
            let items = load_snapshot(&path)?;
            info!("{:?}: {} records", path, items.len());
            Ok(())
        }
    }
}

async fn run_volcanoes(url: String, output: PathBuf, timeout: Option<Duration>) -> Result<()> {
    let source = HttpPageSource::new(FetcherConfig { base_url: url, timeout })?;
    info!("Fetching volcano listing from {}", source.base_url());

    let outcome = fetch_all_pages(&source).await;
    if let Some(failure) = &outcome.failure {
        warn!(
            "Listing incomplete: stopped at page {} ({}); saving {} items fetched so far",
            failure.page,
            failure.error,
            outcome.items.len()
        );
    }

    let saved = save_snapshot(&output, &outcome.items)?;
    info!("{}", saved_message(saved, &output));

    Ok(())
}

fn saved_message(count: usize, path: &Path) -> String {
    format!("Saved {} volcanoes to {}", count, path.display())
}

async fn run_earthquakes(
    query: EventQuery,
    config: UsgsConfig,
    output: PathBuf,
    geojson: bool,
) -> Result<()> {
    let client = UsgsClient::new(config)?;
    let records = client.fetch_classified(&query).await?;

    info!("{} earthquakes found", records.len());
    log_summary(&records);

    // Disaster alert timeline
    for (day, count) in timeline::daily_counts(records.iter().map(|c| &c.record)) {
        info!("  {}: {} events", day, count);
    }

    info!("Writing output to {:?}", output);
    write_json(&output, &records)?;

    if geojson {
        let geojson_path = output.with_extension("geojson");
        info!("Writing GeoJSON to {:?}", geojson_path);
        write_json(&geojson_path, &export::to_geojson(&records))?;
    }

    Ok(())
}

fn log_summary(records: &[ClassifiedRecord]) {
    let mut risk: BTreeMap<RiskLabel, usize> = BTreeMap::new();
    let mut tips: BTreeMap<SafetyTip, usize> = BTreeMap::new();
    let mut impact: BTreeMap<ImpactLevel, usize> = BTreeMap::new();

    for c in records {
        *risk.entry(c.risk_score).or_default() += 1;
        *tips.entry(c.safety_tip).or_default() += 1;
        *impact.entry(c.impact_level).or_default() += 1;
    }

    for label in RiskLabel::ALL {
        info!("  {:24} {}", label.as_str(), risk.get(&label).copied().unwrap_or(0));
    }
    for tip in SafetyTip::ALL {
        info!("  {:24} {}", tip.as_str(), tips.get(&tip).copied().unwrap_or(0));
    }
    for level in ImpactLevel::ALL {
        info!("  {:24} {}", level.as_str(), impact.get(&level).copied().unwrap_or(0));
    }
}
