use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fight_outcomes::api::{build_router, state::AppState};
use fight_outcomes::config::AppConfig;
use fight_outcomes::dashboard::{Dashboard, DivisionDetail};
use fight_outcomes::ingest::{ConsistencyPolicy, CsvLoader};

#[derive(Parser)]
#[command(name = "fight-outcomes")]
#[command(about = "Fight outcome statistics by weight division")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Count-consistency policy (tolerate, warn, strict)
    #[arg(long)]
    policy: Option<ConsistencyPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// CSV to load before accepting uploads
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print derived rates for a CSV
    Report {
        /// CSV file to read
        #[arg(long)]
        input: PathBuf,

        /// Show the detail view for one division
        #[arg(long)]
        division: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check that a CSV loads and derives cleanly
    Validate {
        /// CSV file to read
        #[arg(long)]
        input: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(policy) = cli.policy {
        config.validation.policy = policy;
    }
    Ok(config)
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_dashboard(loader: &CsvLoader, path: &Path) -> Result<Dashboard> {
    let dataset = loader
        .load_path(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let dashboard = Dashboard::build(dataset)
        .with_context(|| format!("Failed to derive metrics for {}", path.display()))?;
    Ok(dashboard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting fight-outcomes v{}", env!("CARGO_PKG_VERSION"));

    let loader = CsvLoader::new(config.validation.policy);

    match cli.command {
        Commands::Serve { host, port, input } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::new(config);

            if let Some(path) = input {
                let dashboard = load_dashboard(&loader, &path)?;
                tracing::info!(
                    "Preloaded {} divisions from {}",
                    dashboard.dataset().len(),
                    path.display()
                );
                state.replace(dashboard).await;
            }

            let app = build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report {
            input,
            division,
            json,
        } => {
            let dashboard = load_dashboard(&loader, &input)?;
            match division {
                Some(name) => {
                    let detail = dashboard.select(&name)?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&detail)?);
                    } else {
                        print_detail(&detail);
                    }
                }
                None => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&dashboard.rows())?);
                    } else {
                        print_table(&dashboard);
                    }
                }
            }
        }
        Commands::Validate { input } => {
            let dashboard = load_dashboard(&loader, &input)?;
            let summary = dashboard.summary();

            println!("\n=== Validation ===");
            println!("Dataset:          {}", summary.id);
            println!("Divisions:        {}", summary.division_count);
            println!("Total fights:     {}", summary.total_fights);
            println!("Policy:           {}", loader.policy());
            if summary.inconsistent_divisions.is_empty() {
                println!("\nAll divisions account for every fight.");
            } else {
                println!("\nCounts not matching total fights:");
                for name in &summary.inconsistent_divisions {
                    println!("  - {}", name);
                }
            }
        }
    }

    Ok(())
}

fn print_table(dashboard: &Dashboard) {
    let width = dashboard
        .divisions()
        .iter()
        .map(|d| d.len())
        .max()
        .unwrap_or(0)
        .max("Division".len());

    println!(
        "{:<width$}  {:>7}  {:>7}  {:>7}  {:>7}  {:>7}",
        "Division",
        "Fights",
        "KO/TKO",
        "Sub",
        "Dec",
        "Other",
        width = width
    );
    for row in dashboard.rows() {
        let p = row.percentages;
        println!(
            "{:<width$}  {:>7}  {:>6.1}%  {:>6.1}%  {:>6.1}%  {:>6.1}%",
            row.record.division,
            row.record.total_fights,
            p.ko,
            p.submission,
            p.decision,
            p.other,
            width = width
        );
    }
}

fn print_detail(detail: &DivisionDetail) {
    println!(
        "\n=== {} ({} fights) ===",
        detail.record.division, detail.record.total_fights
    );
    for tile in &detail.tiles {
        println!("{:<16}  {}", tile.label, tile.display);
    }
    println!("\nOutcome distribution:");
    for slice in &detail.breakdown {
        println!("  {:<12} {}", slice.outcome.label(), slice.count);
    }
}
