//! [`Migrator`] — drives locale files or legacy rows into a [`LocaleStore`].

use std::path::{Path, PathBuf};

use glossa_core::{
  definition::{DefinitionId, NewDefinition},
  legacy::{EventDetailRow, EventField, LegacySource, ProgramRow},
  report::MigrationReport,
  resolve::Resolver,
  store::LocaleStore,
};
use glossa_files::{DirectoryReader, LocaleFile, MappingFormat};

use crate::{EnglishIdentity, Error, MigrateConfig, Result};

fn store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

fn source_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Source(Box::new(e))
}

/// Migration driver. Owns the target store; every write goes through
/// [`Migrator::save_definition`] or [`Migrator::save_translation`].
pub struct Migrator<S> {
  store:            S,
  english_locale:   String,
  english_identity: EnglishIdentity,
}

impl<S: LocaleStore> Migrator<S> {
  pub fn new(store: S, config: &MigrateConfig) -> Self {
    Self {
      store,
      english_locale: config.english_locale.clone(),
      english_identity: config.english_identity,
    }
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Write path ────────────────────────────────────────────────────────────

  /// Save a definition and count it if it was new.
  pub async fn save_definition(
    &self,
    report: &mut MigrationReport,
    input: NewDefinition,
  ) -> Result<DefinitionId> {
    if input.variant.is_none() && input.value.is_empty() {
      tracing::debug!("storing definition with empty value");
    }
    let saved = self.store.save_definition(input).await.map_err(store_err)?;
    report.record_definition(saved);
    Ok(saved.id)
  }

  /// Save a translation and count the outcome.
  pub async fn save_translation(
    &self,
    report: &mut MigrationReport,
    definition_id: DefinitionId,
    text: &str,
    locale: &str,
  ) -> Result<()> {
    let write = self
      .store
      .save_translation(definition_id, text, locale)
      .await
      .map_err(store_err)?;
    tracing::trace!(%definition_id, locale, ?write, "translation saved");
    report.record_translation(write);
    Ok(())
  }

  // ── File path ─────────────────────────────────────────────────────────────

  /// Migrate one loaded locale file.
  ///
  /// Non-English entries are keyed by their file key, which doubles as the
  /// display value until English text exists for it. Every entry, English
  /// included, is also stored as a translation in its own locale.
  pub async fn migrate_file(
    &self,
    report: &mut MigrationReport,
    file: &LocaleFile,
  ) -> Result<()> {
    let is_english = file.locale == self.english_locale;
    tracing::debug!(locale = %file.locale, entries = file.entries.len(), "migrating {}", file.path.display());

    for (key, value) in &file.entries {
      let input = match (is_english, self.english_identity) {
        (true, EnglishIdentity::Key) => NewDefinition::keyed(value, key),
        (true, EnglishIdentity::Value) => NewDefinition::text(value),
        (false, _) => NewDefinition::keyed(key, key),
      };
      let id = self.save_definition(report, input).await?;
      self.save_translation(report, id, value, &file.locale).await?;
    }
    Ok(())
  }

  /// Migrate every locale file of one directory.
  pub async fn migrate_dir<F: MappingFormat>(
    &self,
    reader: &DirectoryReader<F>,
    dir: &Path,
  ) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();
    for path in reader.select(dir)? {
      let file = reader.load(&path)?;
      self.migrate_file(&mut report, &file).await?;
    }
    Ok(report)
  }

  /// Migrate each of `dirs`, resolved against `base`, in order.
  pub async fn migrate_tree<F: MappingFormat>(
    &self,
    reader: &DirectoryReader<F>,
    base: &Path,
    dirs: &[PathBuf],
  ) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();
    for dir in dirs {
      let dir = base.join(dir);
      tracing::info!("Importing from files in {}", dir.display());
      report += self.migrate_dir(reader, &dir).await?;
    }
    Ok(report)
  }

  // ── Database path ─────────────────────────────────────────────────────────

  /// Migrate programs, program tiers and event details from `source`.
  ///
  /// Every event with non-English details must have exactly one English
  /// detail row; otherwise the run stops with a data-integrity error.
  pub async fn migrate_database<L: LegacySource>(
    &self,
    source: &L,
    english_language_id: i64,
  ) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    tracing::info!("Importing from database for programs");
    let programs = source.programs().await.map_err(source_err)?;
    self.migrate_programs(&mut report, &programs).await?;

    tracing::info!("Importing from database for program tiers");
    let tiers = source.program_tiers().await.map_err(source_err)?;
    self.migrate_programs(&mut report, &tiers).await?;

    tracing::info!("Importing from database for events");
    let details = source.event_details().await.map_err(source_err)?;
    let mut resolver = Resolver::new(source, english_language_id);
    for row in &details {
      self.migrate_event_detail(&mut report, &mut resolver, row).await?;
    }

    Ok(report)
  }

  /// Program and tier text is single-language: definitions only.
  async fn migrate_programs(
    &self,
    report: &mut MigrationReport,
    rows: &[ProgramRow],
  ) -> Result<()> {
    for row in rows {
      for text in [&row.name, &row.description].into_iter().flatten() {
        if !text.is_empty() {
          self.save_definition(report, NewDefinition::text(text)).await?;
        }
      }
    }
    Ok(())
  }

  async fn migrate_event_detail<L: LegacySource>(
    &self,
    report: &mut MigrationReport,
    resolver: &mut Resolver<'_, L>,
    row: &EventDetailRow,
  ) -> Result<()> {
    for field in EventField::ALL {
      let Some(text) = row.field(field).filter(|t| !t.is_empty()) else {
        continue;
      };

      if row.language_id == resolver.english_language_id() {
        self.save_definition(report, NewDefinition::text(text)).await?;
        continue;
      }

      // Every language of a field collapses onto the definition keyed by
      // the English sibling's text.
      let anchor = resolver.anchor(row.event_id).await?;
      let english = anchor.field(field).unwrap_or_default().to_owned();
      if english.is_empty() {
        tracing::warn!(
          event_id = row.event_id,
          field = field.as_str(),
          "English detail has no text; anchoring to an empty definition",
        );
      }
      let id = self.save_definition(report, NewDefinition::text(english)).await?;

      let locale = resolver.language(row.language_id).await?.to_owned();
      self.save_translation(report, id, text, &locale).await?;
    }
    Ok(())
  }
}
