//! roster binary.
//!
//! Reads `roster.toml` (or the path specified with `--config`) and opens an
//! in-process SQLite store, then either serves the JSON API over HTTP or
//! imports CSV files from disk.
//!
//! ```text
//! roster serve
//! roster import students.csv more.csv --created-by admin
//! roster import students.csv --dry-run
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use roster_core::clock::SystemClock;
use roster_server::{
  ServerConfig,
  import::{ImportOptions, import_paths, summary},
  load_config,
};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster student-records service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API.
  Serve,
  /// Validate CSV files and store the valid rows.
  Import {
    #[arg(required = true)]
    paths:      Vec<PathBuf>,
    /// Report what would be imported without saving anything.
    #[arg(long)]
    dry_run:    bool,
    /// Recorded as the creator of every imported row.
    #[arg(long)]
    created_by: Option<String>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = load_config(&cli.config)?;

  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.command {
    Command::Serve => serve(store, &cfg).await,
    Command::Import { paths, dry_run, created_by } => {
      let opts = ImportOptions {
        dry_run,
        created_by: created_by.or_else(|| cfg.default_creator.clone()),
      };
      let report = import_paths(&store, paths, &opts, Arc::new(SystemClock)).await?;
      print!("{}", summary(&report));
      Ok(())
    }
  }
}

async fn serve(store: SqliteStore, cfg: &ServerConfig) -> anyhow::Result<()> {
  let app = roster_api::api_router(Arc::new(store), Arc::new(SystemClock));
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
