use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use api::AppState;
use common::Config;
use store::{connect, run_migrations, SqliteStore};

/// Read-only market data API with layer and sector strength scores.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations and start the HTTP API (default).
    Serve,
    /// Apply pending migrations and exit.
    Migrate,
    /// Replace all stocks and prices with generated sample data.
    Seed(SeedArgs),
    /// Check that the required tables and indexes exist.
    Verify,
}

#[derive(Parser)]
struct SeedArgs {
    /// Calendar days of prices to generate [default: SEED_DAYS]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(seed::MAX_DAYS)))]
    days: Option<u32>,

    /// RNG seed; the same seed always yields the same data.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Last generated date (format: YYYY-MM-DD) [default: today]
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // ── Logging ──────────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("FinLens exited with an error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;

    // ── Database ──────────────────────────────────────────────────────────────
    let pool = connect(&cfg.db)
        .await
        .context("Failed to connect to database")?;
    let store = SqliteStore::new(pool);

    let outcome = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cfg, &store).await,
        Command::Migrate => migrate(&store).await,
        Command::Seed(args) => seed(&cfg, &store, args).await,
        Command::Verify => verify(&store).await,
    };

    store.close().await;
    outcome
}

async fn migrate(store: &SqliteStore) -> anyhow::Result<ExitCode> {
    run_migrations(store.pool())
        .await
        .context("Database migration failed")?;
    info!("Database ready");
    Ok(ExitCode::SUCCESS)
}

async fn serve(cfg: &Config, store: &SqliteStore) -> anyhow::Result<ExitCode> {
    migrate(store).await?;

    let state = AppState::new(Arc::new(store.clone()));
    api::serve(state, cfg.port)
        .await
        .context("API server failed")?;
    Ok(ExitCode::SUCCESS)
}

async fn seed(cfg: &Config, store: &SqliteStore, args: SeedArgs) -> anyhow::Result<ExitCode> {
    migrate(store).await?;

    let days = args.days.unwrap_or(cfg.seed_days);
    anyhow::ensure!(
        (1..=seed::MAX_DAYS).contains(&days),
        "Seed window must be between 1 and {} days, got {days}",
        seed::MAX_DAYS
    );
    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    info!(days, %end, seed = args.seed, "Generating sample data");

    let data = seed::generate(end, days, args.seed);
    let report = store
        .replace_all(&data.stocks, &data.prices)
        .await
        .context("Seeding failed")?;

    info!(stocks = report.stocks, prices = report.prices, "Database seeded");
    for sector in &report.sectors {
        info!(sector = %sector.sector, stocks = sector.stock_count, "Seeded sector");
    }
    Ok(ExitCode::SUCCESS)
}

async fn verify(store: &SqliteStore) -> anyhow::Result<ExitCode> {
    let report = store.verify_schema().await?;

    for table in &report.tables {
        info!(table = %table.name, rows = table.rows, "Table present");
    }
    for index in &report.indexes {
        info!(%index, "Index present");
    }

    if report.is_complete() {
        info!("Schema verified");
        Ok(ExitCode::SUCCESS)
    } else {
        for table in &report.missing {
            warn!(%table, "Required table missing");
        }
        Ok(ExitCode::FAILURE)
    }
}
