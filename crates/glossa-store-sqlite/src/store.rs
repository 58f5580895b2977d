//! [`SqliteStore`] — the SQLite implementation of [`LocaleStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use glossa_core::{
  definition::{Definition, DefinitionId, Identity, NewDefinition, Saved},
  store::LocaleStore,
  translation::{Translation, TranslationWrite},
};

use crate::{
  Error, Result,
  encode::{DEFINITION_COLUMNS, RawDefinition, RawTranslation, TRANSLATION_COLUMNS, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The target locale store, backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of rows in `locale_translation`.
  pub async fn count_translations(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM locale_translation", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n as u64)
  }
}

/// Id of the definition matching `identity`, if any.
fn lookup_definition_id(
  conn: &rusqlite::Connection,
  identity: Identity<'_>,
) -> rusqlite::Result<Option<i64>> {
  match identity {
    Identity::Variant(key) => conn
      .query_row(
        "SELECT definition_id FROM locale_definition WHERE variant = ?1",
        rusqlite::params![key],
        |r| r.get(0),
      )
      .optional(),
    Identity::Value(value) => conn
      .query_row(
        "SELECT definition_id FROM locale_definition
         WHERE value = ?1 AND variant IS NULL",
        rusqlite::params![value],
        |r| r.get(0),
      )
      .optional(),
  }
}

fn is_foreign_key_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
  )
}

// ─── LocaleStore impl ────────────────────────────────────────────────────────

impl LocaleStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn save_definition(&self, input: NewDefinition) -> Result<Saved> {
    let now = encode_dt(Utc::now());

    let (id, inserted): (i64, bool) = self
      .conn
      .call(move |conn| {
        // The partial unique indexes turn a duplicate into a no-op.
        let changed = conn.execute(
          "INSERT OR IGNORE INTO locale_definition (value, variant, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)",
          rusqlite::params![input.value, input.variant, now],
        )?;
        if changed == 1 {
          return Ok((conn.last_insert_rowid(), true));
        }

        let id = lookup_definition_id(conn, input.identity())?
          .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok((id, false))
      })
      .await?;

    let saved = Saved { id: DefinitionId(id), inserted };
    tracing::trace!(id = %saved.id, inserted, "definition saved");
    Ok(saved)
  }

  async fn save_translation<'a>(
    &'a self,
    definition_id: DefinitionId,
    text: &'a str,
    locale: &'a str,
  ) -> Result<TranslationWrite> {
    let now    = encode_dt(Utc::now());
    let text   = text.to_owned();
    let locale = locale.to_owned();

    let write: Option<TranslationWrite> = self
      .conn
      .call(move |conn| {
        let inserted = match conn.execute(
          "INSERT OR IGNORE INTO locale_translation
             (locale, definition_id, translation, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)",
          rusqlite::params![locale, definition_id.0, text, now],
        ) {
          Ok(changed) => changed == 1,
          Err(e) if is_foreign_key_violation(&e) => return Ok(None),
          Err(e) => return Err(e.into()),
        };
        if inserted {
          return Ok(Some(TranslationWrite::Inserted));
        }

        conn.execute(
          "UPDATE locale_translation SET translation = ?3, updated_at = ?4
           WHERE definition_id = ?2 AND locale = ?1",
          rusqlite::params![locale, definition_id.0, text, now],
        )?;
        Ok(Some(TranslationWrite::Updated))
      })
      .await?;

    write.ok_or(Error::DefinitionNotFound(definition_id))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_definition(&self, id: DefinitionId) -> Result<Option<Definition>> {
    let raw: Option<RawDefinition> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {DEFINITION_COLUMNS} FROM locale_definition WHERE definition_id = ?1"),
              rusqlite::params![id.0],
              RawDefinition::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDefinition::into_definition).transpose()
  }

  async fn find_definition(&self, input: NewDefinition) -> Result<Option<Definition>> {
    let id: Option<i64> = self
      .conn
      .call(move |conn| Ok(lookup_definition_id(conn, input.identity())?))
      .await?;

    match id {
      Some(id) => self.get_definition(DefinitionId(id)).await,
      None => Ok(None),
    }
  }

  async fn list_definitions(&self) -> Result<Vec<Definition>> {
    let raws: Vec<RawDefinition> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DEFINITION_COLUMNS} FROM locale_definition ORDER BY definition_id"
        ))?;
        let rows = stmt
          .query_map([], RawDefinition::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDefinition::into_definition).collect()
  }

  async fn get_translation<'a>(
    &'a self,
    definition_id: DefinitionId,
    locale: &'a str,
  ) -> Result<Option<Translation>> {
    let locale = locale.to_owned();

    let raw: Option<RawTranslation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {TRANSLATION_COLUMNS} FROM locale_translation
                 WHERE definition_id = ?1 AND locale = ?2"
              ),
              rusqlite::params![definition_id.0, locale],
              RawTranslation::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTranslation::into_translation).transpose()
  }

  async fn list_translations(&self, definition_id: DefinitionId) -> Result<Vec<Translation>> {
    let raws: Vec<RawTranslation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TRANSLATION_COLUMNS} FROM locale_translation
           WHERE definition_id = ?1 ORDER BY locale"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![definition_id.0], RawTranslation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTranslation::into_translation).collect()
  }
}
