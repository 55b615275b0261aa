use std::sync::Arc;

use clap::{Parser, Subcommand};
use pagewatch::{
    config::AppConfig,
    fetcher::{HttpPageFetcher, PageFetcher},
    http_client::create_base_http_client,
    http_server::{self, ApiState},
    monitor::MonitorManager,
    notification::{EmailNotifier, NotificationSink},
    persistence::{MonitorStore, SqliteStore},
    sweep::SweepRunner,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration directory.
    #[arg(long)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the HTTP server.
    Serve,
    /// Runs a single change-detection sweep and reports the summary.
    Sweep,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(cli.config_dir.as_deref())?;
    tracing::debug!(database_url = %config.database_url, "Configuration loaded.");

    tracing::debug!("Initializing key-value store...");
    let kv = Arc::new(SqliteStore::new(&config.database_url).await?);
    kv.run_migrations().await?;
    tracing::info!("Database migrations completed.");

    let store = MonitorStore::new(kv);

    let base_client = create_base_http_client(&config.http_base)?;
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpPageFetcher::new(base_client.clone()));
    let sink: Arc<dyn NotificationSink> =
        Arc::new(EmailNotifier::new(base_client, &config.email)?);

    let manager = Arc::new(MonitorManager::new(
        store.clone(),
        Arc::clone(&fetcher),
        Arc::clone(&sink),
        config.free_monitor_limit,
    ));
    let sweep = Arc::new(SweepRunner::new(store, fetcher, sink, config.sweep.clone()));

    match cli.command {
        Commands::Serve => {
            let state = ApiState { config: Arc::new(config), manager, sweep };
            http_server::run_server(state).await;
        }
        Commands::Sweep => {
            let summary = sweep.run().await?;
            tracing::info!(
                checked = summary.checked,
                changed = summary.changed,
                errors = summary.errors,
                "Sweep finished."
            );
        }
    }

    Ok(())
}
