//! [`SqliteLegacySource`] — read-only access to the legacy relational
//! database the migration pulls program and event text from.

use std::path::Path;

use glossa_core::legacy::{EventDetailRow, LanguageRow, LegacySource, ProgramRow};
use rusqlite::OpenFlags;

use crate::{Error, Result};

/// The subset of the legacy schema this source reads.
///
/// The legacy database owns its schema; this DDL only documents the columns
/// queried here and seeds fixtures.
pub const LEGACY_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS program (
    program_id  INTEGER PRIMARY KEY,
    name        TEXT,
    description TEXT
);

CREATE TABLE IF NOT EXISTS program_tier (
    program_tier_id INTEGER PRIMARY KEY,
    name            TEXT,
    description     TEXT
);

CREATE TABLE IF NOT EXISTS lms_language (
    language_id      INTEGER NOT NULL,
    language_acronym TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS lms_event (
    event_id        INTEGER PRIMARY KEY,
    event_legacy_id INTEGER          -- set on events imported from the old system
);

CREATE TABLE IF NOT EXISTS lms_event_detail (
    event_detail_id          INTEGER PRIMARY KEY,
    event_detail_event_id    INTEGER NOT NULL,
    event_detail_language_id INTEGER NOT NULL,
    event_detail_title       TEXT,
    event_detail_description TEXT
);
";

const EVENT_DETAIL_COLUMNS: &str = "ed.event_detail_event_id, ed.event_detail_language_id,
  ed.event_detail_title, ed.event_detail_description";

fn event_detail_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventDetailRow> {
  Ok(EventDetailRow {
    event_id:    row.get(0)?,
    language_id: row.get(1)?,
    title:       row.get(2)?,
    description: row.get(3)?,
  })
}

/// Legacy source backed by a SQLite file, opened read-only.
#[derive(Clone)]
pub struct SqliteLegacySource {
  conn: tokio_rusqlite::Connection,
}

impl SqliteLegacySource {
  /// Open the legacy database at `path` without write access.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .await?;
    Ok(Self { conn })
  }

  /// Wrap an already-open connection.
  pub fn from_connection(conn: tokio_rusqlite::Connection) -> Self { Self { conn } }

  async fn program_rows(&self, table: &'static str) -> Result<Vec<ProgramRow>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!("SELECT name, description FROM {table}"))?;
        let rows = stmt
          .query_map([], |row| {
            Ok(ProgramRow {
              name:        row.get(0)?,
              description: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

impl LegacySource for SqliteLegacySource {
  type Error = Error;

  async fn programs(&self) -> Result<Vec<ProgramRow>> { self.program_rows("program").await }

  async fn program_tiers(&self) -> Result<Vec<ProgramRow>> {
    self.program_rows("program_tier").await
  }

  async fn event_details(&self) -> Result<Vec<EventDetailRow>> {
    let rows = self
      .conn
      .call(|conn| {
        // Events carrying a legacy id predate the current system and are
        // left behind.
        let mut stmt = conn.prepare(&format!(
          "SELECT {EVENT_DETAIL_COLUMNS}
           FROM lms_event_detail ed
           INNER JOIN lms_event e
             ON ed.event_detail_event_id = e.event_id AND e.event_legacy_id IS NULL
           ORDER BY ed.event_detail_event_id, ed.event_detail_language_id"
        ))?;
        let rows = stmt
          .query_map([], event_detail_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn event_details_in(
    &self,
    event_id: i64,
    language_id: i64,
  ) -> Result<Vec<EventDetailRow>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EVENT_DETAIL_COLUMNS}
           FROM lms_event_detail ed
           WHERE ed.event_detail_language_id = ?1 AND ed.event_detail_event_id = ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![language_id, event_id], event_detail_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn languages(&self, language_id: i64) -> Result<Vec<LanguageRow>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT language_id, language_acronym FROM lms_language WHERE language_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![language_id], |row| {
            Ok(LanguageRow {
              language_id: row.get(0)?,
              acronym:     row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}
