//! Language and anchor resolution over a [`LegacySource`].
//!
//! Both lookups expect exactly one row. Zero or several rows are
//! data-integrity faults and are returned as errors, never skipped.

use std::collections::HashMap;

use crate::{
  Error, Result,
  legacy::{EventDetailRow, LegacySource},
};

fn source_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Source(Box::new(e))
}

/// Resolve a numeric language id to its locale acronym.
pub async fn language_acronym<S: LegacySource>(
  source: &S,
  language_id: i64,
) -> Result<String> {
  let mut rows = source.languages(language_id).await.map_err(source_err)?;
  match rows.len() {
    0 => Err(Error::LanguageNotFound(language_id)),
    1 => Ok(rows.remove(0).acronym),
    n => Err(Error::AmbiguousLanguage { language_id, rows: n }),
  }
}

/// Fetch the English detail row of `event_id`.
pub async fn anchor_detail<S: LegacySource>(
  source: &S,
  event_id: i64,
  english_language_id: i64,
) -> Result<EventDetailRow> {
  let mut rows = source
    .event_details_in(event_id, english_language_id)
    .await
    .map_err(source_err)?;
  match rows.len() {
    0 => Err(Error::MissingAnchor(event_id)),
    1 => Ok(rows.remove(0)),
    n => Err(Error::AmbiguousAnchor { event_id, rows: n }),
  }
}

// ─── Memoising resolver ──────────────────────────────────────────────────────

/// Caches successful resolutions for the lifetime of one run.
///
/// Event detail tables list every language of an event, so the same anchor
/// and the same handful of languages are asked for over and over.
#[derive(Debug)]
pub struct Resolver<'a, S> {
  source:              &'a S,
  english_language_id: i64,
  languages:           HashMap<i64, String>,
  anchors:             HashMap<i64, EventDetailRow>,
}

impl<'a, S: LegacySource> Resolver<'a, S> {
  pub fn new(source: &'a S, english_language_id: i64) -> Self {
    Self {
      source,
      english_language_id,
      languages: HashMap::new(),
      anchors: HashMap::new(),
    }
  }

  pub fn english_language_id(&self) -> i64 { self.english_language_id }

  pub async fn language(&mut self, language_id: i64) -> Result<&str> {
    if !self.languages.contains_key(&language_id) {
      let acronym = language_acronym(self.source, language_id).await?;
      self.languages.insert(language_id, acronym);
    }
    Ok(self.languages[&language_id].as_str())
  }

  pub async fn anchor(&mut self, event_id: i64) -> Result<&EventDetailRow> {
    if !self.anchors.contains_key(&event_id) {
      let row =
        anchor_detail(self.source, event_id, self.english_language_id).await?;
      self.anchors.insert(event_id, row);
    }
    Ok(&self.anchors[&event_id])
  }
}
