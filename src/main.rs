use rosterlink::config::ResolutionConfig;
use rosterlink::fixtures::load_fixtures;
use rosterlink::pipeline::EnrichmentPipeline;
use rosterlink::registry::IdentityRegistry;
use rosterlink::resolver::Resolver;
use rosterlink::store::{ArtifactStore, DatasetKind, FsArtifactStore};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rosterlink")]
#[command(about = "Daily mention-to-identity enrichment for prediction batches")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the day's prediction batch against the identity registry
    Enrich {
        /// Batch date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Path to data directory (default: ./results)
        #[arg(long, default_value = "results")]
        data_dir: PathBuf,

        /// Path to the identity registry CSV (default: <data_dir>/registry.csv)
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Acceptance threshold on the 0-100 similarity scale
        #[arg(long)]
        threshold: Option<f64>,

        /// Name of the batch column carrying the mention text
        #[arg(long)]
        mention_column: Option<String>,
    },
    /// Resolve a single mention against the registry and print the outcome
    Resolve {
        /// The mention text to resolve
        name: String,

        /// Path to data directory (default: ./results)
        #[arg(long, default_value = "results")]
        data_dir: PathBuf,

        /// Path to the identity registry CSV (default: <data_dir>/registry.csv)
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Acceptance threshold on the 0-100 similarity scale
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print the day's match fixtures
    Fixtures {
        /// Fixture date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Path to data directory (default: ./results)
        #[arg(long, default_value = "results")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match args.command {
        Commands::Enrich {
            date,
            data_dir,
            registry,
            threshold,
            mention_column,
        } => run_enrich(date, data_dir, registry, threshold, mention_column),
        Commands::Resolve {
            name,
            data_dir,
            registry,
            threshold,
        } => run_resolve(name, data_dir, registry, threshold),
        Commands::Fixtures { date, data_dir } => run_fixtures(date, data_dir),
    }
}

fn run_enrich(
    date: Option<String>,
    data_dir: PathBuf,
    registry: Option<PathBuf>,
    threshold: Option<f64>,
    mention_column: Option<String>,
) -> Result<()> {
    let date = parse_date(date)?;
    let config = build_config(threshold, mention_column)?;
    let store = build_store(data_dir, registry);
    let output_path = store.path_for(DatasetKind::Enriched, date);

    let pipeline = EnrichmentPipeline::new(store, config);
    let enriched = pipeline.run(date)?;

    println!(
        "Enriched {} records for {} -> {}",
        enriched.height(),
        date,
        output_path.display()
    );
    Ok(())
}

fn run_resolve(
    name: String,
    data_dir: PathBuf,
    registry_path: Option<PathBuf>,
    threshold: Option<f64>,
) -> Result<()> {
    let config = build_config(threshold, None)?;
    let store = build_store(data_dir, registry_path);

    // The registry artifact is dateless; today's key works for any run
    let today = Local::now().date_naive();
    let registry_csv = store.read_text(DatasetKind::Registry, today)?;
    let registry = IdentityRegistry::from_csv(&registry_csv)?;
    info!("Loaded registry with {} identities", registry.len());

    let resolver = Resolver::new(&registry, config.threshold);
    let outcome = resolver.resolve(Some(&name));
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn run_fixtures(date: Option<String>, data_dir: PathBuf) -> Result<()> {
    let date = parse_date(date)?;
    let store = FsArtifactStore::new(data_dir);

    let fixtures = load_fixtures(&store, date)?;
    println!("{}", serde_json::to_string_pretty(&fixtures)?);
    Ok(())
}

fn build_store(data_dir: PathBuf, registry: Option<PathBuf>) -> FsArtifactStore {
    let store = FsArtifactStore::new(data_dir);
    match registry {
        Some(path) => store.with_registry_path(path),
        None => store,
    }
}

fn build_config(threshold: Option<f64>, mention_column: Option<String>) -> Result<ResolutionConfig> {
    let mut config = ResolutionConfig::from_env()?;
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    if let Some(column) = mention_column {
        config.mention_column = column;
    }
    config.validate()?;
    Ok(config)
}

fn parse_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", raw, e)),
        None => Ok(Local::now().date_naive()),
    }
}
