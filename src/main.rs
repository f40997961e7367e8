//! druidq CLI
//!
//! Command-line interface for working with saved query targets:
//! - Validate and normalize a target document
//! - Browse datasources and their columns
//! - Look up filter values for a dimension
//! - Generate a default config file

use anyhow::Context;
use chrono::Duration;
use clap::{Parser, Subcommand};
use druidq::config::{generate_default_config, Config, LoggingConfig};
use druidq::datasource::{BrokerClient, Lookups, TimeRange};
use druidq::editor::QueryEditor;
use druidq::target::QueryTarget;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "druidq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and validate native Druid query targets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Broker URL, overriding the config
    #[arg(long, global = true)]
    pub broker_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a target JSON document
    Validate {
        /// Path to the target
        file: PathBuf,
        /// Write the normalized target back to the file
        #[arg(short, long)]
        write: bool,
    },

    /// List datasources on the broker
    Datasources,

    /// List the dimensions and metrics of a datasource
    Columns {
        /// Datasource name
        datasource: String,
    },

    /// Look up values of a dimension for the target's datasource
    Values {
        /// Path to the target
        file: PathBuf,
        /// Dimension to list values for
        dimension: String,
        /// Only values containing this text
        #[arg(short, long, default_value = "")]
        query: String,
        /// Time range (e.g., 15m, 1h, 7d, 2w)
        #[arg(short, long, default_value = "1h")]
        last: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.broker_url {
        config.broker.url = url;
    }

    init_logging(&config.logging);

    match cli.command {
        Commands::Validate { file, write } => {
            let mut target = QueryTarget::load(&file)?;
            let mut editor = QueryEditor::new(config.editor.clone());
            let errors = editor.init(&mut target).clone();

            if write {
                target.save(&file)?;
                tracing::info!(path = %file.display(), "wrote normalized target");
            }

            if errors.is_empty() {
                println!("{}: ok", file.display());
            } else {
                println!("{}", errors);
                std::process::exit(1);
            }
        }

        Commands::Datasources => {
            let lookups = lookups(&config)?;
            for name in lookups.data_sources().await? {
                println!("{}", name);
            }
        }

        Commands::Columns { datasource } => {
            let lookups = lookups(&config)?;
            let target = QueryTarget::new().with_datasource(datasource);
            let columns = lookups.dimensions_and_metrics(&target).await?;

            println!("Dimensions:");
            for name in &columns.dimensions {
                println!("  {}", name);
            }
            println!("Metrics:");
            for name in &columns.metrics {
                println!("  {}", name);
            }
        }

        Commands::Values {
            file,
            dimension,
            query,
            last,
        } => {
            let mut target = QueryTarget::load(&file)?;
            target.current_filter.dimension = Some(dimension);

            let range = TimeRange::last(parse_duration(&last)?)
                .with_context(|| format!("time range too large: {}", last))?;
            let lookups = lookups(&config)?;
            for value in lookups.filter_values(&target, &range, &query).await? {
                println!("{}", value);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("druidq={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn lookups(config: &Config) -> anyhow::Result<Lookups<BrokerClient>> {
    let client = BrokerClient::new(config.broker.clone())?;
    Ok(if config.broker.cache_lookups {
        Lookups::cached(client)
    } else {
        Lookups::new(client)
    })
}

fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim().to_lowercase();

    let duration = if let Some(minutes) = s.strip_suffix('m') {
        Duration::try_minutes(minutes.parse()?)
    } else if let Some(hours) = s.strip_suffix('h') {
        Duration::try_hours(hours.parse()?)
    } else if let Some(days) = s.strip_suffix('d') {
        Duration::try_days(days.parse()?)
    } else if let Some(weeks) = s.strip_suffix('w') {
        Duration::try_weeks(weeks.parse()?)
    } else {
        anyhow::bail!("Invalid duration format: {}. Use: 15m, 1h, 7d, 2w", s)
    };

    duration.with_context(|| format!("Duration out of range: {}", s))
}
