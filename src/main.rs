use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use psbmon::config::{poll_interval, Config};
use psbmon::db::{self, SqliteLedger};
use psbmon::feed::FeedClient;
use psbmon::forward::EventForwarder;
use psbmon::pipeline::poll;

/// psbmon: watches psbdmp.cc for new pastes and forwards their IDs.
///
/// Polls the daily feed on a fixed interval, remembers every ID it has
/// seen in a local SQLite ledger, and POSTs each new one to
/// `$DG_HOST/event`.
#[derive(Parser)]
#[command(name = "psbmon", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
    /// Time in minutes to wait before checking feeds
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the feed forever (the default when no subcommand is given)
    Run(RunArgs),

    /// Create the ledger database if it doesn't exist
    Init,

    /// Show ledger size and the most recently recorded paste IDs
    Status {
        /// How many recent IDs to list
        #[arg(long, default_value = "10")]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("psbmon=info")),
        )
        .init();

    let cli = parse_cli();
    let config = Config::load()?;

    match cli.command {
        None => run_monitor(&config, &cli.run).await,
        Some(Commands::Run(args)) => run_monitor(&config, &args).await,

        Some(Commands::Init) => {
            let conn = db::initialize(&config.db_path)?;
            let table_count = db::schema::table_count(&conn)?;
            println!("Ledger initialized at: {}", config.db_path);
            println!("Tables: {table_count}");
            if config.require_destination().is_err() {
                println!(
                    "{}",
                    "\nSet DG_HOST (in .env or the environment) before running `psbmon`.".yellow()
                );
            }
            Ok(())
        }

        Some(Commands::Status { limit }) => {
            if !psbmon::status::ledger_exists(&config.db_path) {
                println!("Ledger: not initialized");
                println!("{}", "\nRun `psbmon init` to create it.".dimmed());
                return Ok(());
            }
            let ledger = SqliteLedger::new(db::open(&config.db_path)?);
            psbmon::status::show(&ledger, &config.db_path, limit).await
        }
    }
}

/// Parse arguments, exiting 0 for help/version and 1 for anything invalid.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

async fn run_monitor(config: &Config, args: &RunArgs) -> Result<()> {
    let interval = poll_interval(args.interval)?;

    // Ledger first: without it there is nothing to dedupe against.
    let ledger = SqliteLedger::new(db::initialize(&config.db_path)?);
    config.require_destination()?;

    let feed = FeedClient::new(&config.feed_url, config.http_timeout, config.retry_policy())?;
    let sink = EventForwarder::new(&config.destination_host, config.http_timeout)?;

    info!(
        interval_minutes = args.interval,
        db_path = %config.db_path,
        destination = sink.event_url(),
        fetch_attempts = config.fetch_attempts,
        "Starting psbdmp.cc Monitor"
    );

    poll::run(interval, &feed, &ledger, &sink).await;

    Ok(())
}
