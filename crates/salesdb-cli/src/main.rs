mod stats;

use clap::{Parser, Subcommand};
use salesdb_core::Month;
use salesdb_feed::FeedClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "salesdb-cli")]
#[command(about = "Sales database command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Replace stored products with the current feed contents
    Seed,
    /// Show combined sales statistics for a month
    Stats {
        /// Month name, three-letter abbreviation, or number (e.g. March, mar, 3)
        month: Month,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = salesdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = salesdb_db::PoolConfig::from_app_config(&config);
    let pool = salesdb_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            salesdb_db::ping(&pool).await?;
            println!("database ok");
        }
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let applied = salesdb_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Seed => {
            let feed = FeedClient::from_app_config(&config)?;
            let report = salesdb_feed::seed_products(&pool, &feed).await?;
            println!("seeded {} products from {}", report.inserted, feed.url());
        }
        Commands::Stats { month, json } => stats::run_stats(&pool, month, json).await?,
    }

    Ok(())
}
