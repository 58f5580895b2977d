//! glossa-migrate binary.
//!
//! Reads `glossa.toml` (or the path given with `--config`), opens the target
//! locale store and migrates into it either the locale files under a base
//! directory or, without one, the legacy database.
//!
//! ```text
//! glossa-migrate /srv/app          # locale files
//! glossa-migrate --config prod.toml  # legacy database
//! ```
//!
//! Only one run may target a given store at a time.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use glossa_migrate::{MigrateConfig, Migrator, config::expand_tilde};
use glossa_store_sqlite::{SqliteLegacySource, SqliteStore};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Migrate locale strings into the definition/translation store")]
struct Cli {
  /// Base directory of the application whose locale files to migrate.
  /// Without it, strings are read from the legacy database.
  base_dir: Option<PathBuf>,

  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "glossa.toml")]
  config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = MigrateConfig::load(&cli.config)
    .with_context(|| format!("failed to read config {:?}", cli.config))?;

  let target_path = expand_tilde(&cfg.target_path);
  let store = SqliteStore::open(&target_path)
    .await
    .with_context(|| format!("failed to open store at {target_path:?}"))?;
  let migrator = Migrator::new(store, &cfg);

  let report = match &cli.base_dir {
    Some(base) => {
      let base = expand_tilde(base);
      tracing::info!("Importing from files under {}", base.display());
      migrator
        .migrate_tree(&cfg.directory_reader(), &base, &cfg.language_dirs)
        .await
        .context("file migration failed")?
    }
    None => {
      let source_path = expand_tilde(&cfg.source_path);
      let source = SqliteLegacySource::open(&source_path)
        .await
        .with_context(|| format!("failed to open legacy database at {source_path:?}"))?;
      migrator
        .migrate_database(&source, cfg.english_language_id)
        .await
        .context("database migration failed")?
    }
  };

  tracing::info!(
    definitions_inserted = report.definitions_inserted,
    translations_inserted = report.translations_inserted,
    translations_updated = report.translations_updated,
    "migration complete",
  );
  println!("Finished importing {report}");

  Ok(())
}
