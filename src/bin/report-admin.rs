use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use reportshare::config::{Config, DatabaseBackend};
use reportshare::storage::{PostgresStore, SnapshotStore, SqliteStore};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "report-admin")]
#[command(about = "Report snapshot management CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete all snapshots whose expiry lies in the past
    Sweep,
    /// Print one snapshot by id
    Inspect {
        /// Snapshot id (the token in the shared URL)
        id: String,
    },
    /// List recent snapshots, newest first
    List {
        /// Maximum number of snapshots to show
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store: Arc<dyn SnapshotStore> = match config.database.backend {
        DatabaseBackend::Sqlite => {
            Arc::new(SqliteStore::new(&config.database.url, config.database.max_connections).await?)
        }
        DatabaseBackend::Postgres => Arc::new(
            PostgresStore::new(&config.database.url, config.database.max_connections).await?,
        ),
    };

    // Ensure database is initialized
    store.init().await?;

    match cli.command {
        Commands::Sweep => {
            let removed = store.delete_expired(Utc::now()).await?;
            println!("✓ Removed {} expired snapshot(s)", removed);
        }
        Commands::Inspect { id } => match store.get(&id).await? {
            Some(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            None => {
                println!("⚠ No snapshot found with id '{}'", id);
            }
        },
        Commands::List { limit } => {
            let reports = store.list(limit, 0).await?;
            if reports.is_empty() {
                println!("No snapshots found.");
            } else {
                println!("{:<14} {:<25} {:<25} {}", "Id", "Created", "Expires", "Title");
                println!("{}", "-".repeat(90));
                for report in reports {
                    println!(
                        "{:<14} {:<25} {:<25} {}",
                        report.id,
                        report.created_at.to_rfc3339(),
                        report.expires.to_rfc3339(),
                        report.title
                    );
                }
            }
        }
    }

    Ok(())
}
