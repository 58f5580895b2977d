//! Conversion between domain types and the plain values stored in SQLite.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use glossa_core::{
  definition::{Definition, DefinitionId},
  translation::{Translation, TranslationId},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub const DEFINITION_COLUMNS: &str =
  "definition_id, value, variant, created_at, updated_at";

pub const TRANSLATION_COLUMNS: &str =
  "translation_id, locale, definition_id, translation, created_at, updated_at";

/// A `locale_definition` row exactly as read from SQLite.
pub struct RawDefinition {
  pub definition_id: i64,
  pub value:         String,
  pub variant:       Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawDefinition {
  /// Map a row selected with [`DEFINITION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      definition_id: row.get(0)?,
      value:         row.get(1)?,
      variant:       row.get(2)?,
      created_at:    row.get(3)?,
      updated_at:    row.get(4)?,
    })
  }

  pub fn into_definition(self) -> Result<Definition> {
    Ok(Definition {
      definition_id: DefinitionId(self.definition_id),
      value:         self.value,
      variant:       self.variant,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

/// A `locale_translation` row exactly as read from SQLite.
pub struct RawTranslation {
  pub translation_id: i64,
  pub locale:         String,
  pub definition_id:  i64,
  pub translation:    String,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawTranslation {
  /// Map a row selected with [`TRANSLATION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      translation_id: row.get(0)?,
      locale:         row.get(1)?,
      definition_id:  row.get(2)?,
      translation:    row.get(3)?,
      created_at:     row.get(4)?,
      updated_at:     row.get(5)?,
    })
  }

  pub fn into_translation(self) -> Result<Translation> {
    Ok(Translation {
      translation_id: TranslationId(self.translation_id),
      locale:         self.locale,
      definition_id:  DefinitionId(self.definition_id),
      translation:    self.translation,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}
