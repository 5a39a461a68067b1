use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use botindex::{
    Classifier, Config, GeminiProvider, GitHubClient, Persistence, Summarizer, SyncConfig,
    SyncOrchestrator,
};
use botindex::models::BotRecord;
use botindex::storage::Store;

#[derive(Parser, Debug)]
#[command(name = "botindex")]
#[command(version = "0.1.0")]
#[command(about = "Discover GitHub bots and enrich them with AI summaries")]
struct Args {
    /// Search query (defaults to SEARCH_QUERY or "telegram bot")
    #[arg(short, long)]
    query: Option<String>,

    /// Cap the number of repositories processed this run
    #[arg(short, long)]
    limit: Option<usize>,

    /// SQLite database path (defaults to DATABASE_PATH; omit for snapshot-only)
    #[arg(long)]
    database: Option<String>,

    /// Base path for the local JSON/CSV snapshot
    #[arg(long)]
    snapshot: Option<String>,

    /// Print the currently persisted records instead of syncing
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("botindex=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env();

    let database_path = args.database.clone().or(config.database_path.clone());
    let store = match &database_path {
        None => None,
        Some(path) => match Store::new(path) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("Durable store unavailable ({}), continuing without it", e);
                None
            }
        },
    };

    let snapshot_base = args
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot_base.clone());
    let persistence = Persistence::new(store, snapshot_base);

    if args.list {
        print_records(&persistence.fetch_all());
        return Ok(());
    }

    let github = GitHubClient::new(config.github_token.as_deref())?;

    let provider: Option<Arc<dyn Summarizer>> = match config.gemini_api_key.clone() {
        Some(key) => Some(Arc::new(GeminiProvider::new(key, None)?)),
        None => {
            tracing::warn!("GEMINI_API_KEY not set, using heuristic classification only");
            None
        }
    };

    let orchestrator = SyncOrchestrator::new(
        Arc::new(github),
        Classifier::new(provider),
        persistence,
        SyncConfig::from(&config),
    );

    let records = orchestrator.run(args.query.as_deref(), args.limit).await?;
    println!("Synced {} repositories", records.len());

    Ok(())
}

fn print_records(records: &[BotRecord]) {
    if records.is_empty() {
        println!("No records persisted yet. Run a sync first.");
        return;
    }

    for record in records {
        println!(
            "{:<40} {:>6}★  {:<16} {}",
            record.full_name, record.stars, record.repo_type, record.what_it_does
        );
    }
    println!("\n{} records total", records.len());
}
