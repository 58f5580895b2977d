//! Aggregate counts of a migration run.

use std::{fmt, ops::AddAssign};

use serde::{Deserialize, Serialize};

use crate::{definition::Saved, translation::TranslationWrite};

/// What a run wrote. Built from the outcome of each write rather than kept
/// as state on the store, so a store can be reused across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
  pub definitions_inserted:  u64,
  pub translations_inserted: u64,
  pub translations_updated:  u64,
}

impl MigrationReport {
  pub fn record_definition(&mut self, saved: Saved) {
    if saved.inserted {
      self.definitions_inserted += 1;
    }
  }

  pub fn record_translation(&mut self, write: TranslationWrite) {
    match write {
      TranslationWrite::Inserted => self.translations_inserted += 1,
      TranslationWrite::Updated => self.translations_updated += 1,
    }
  }

  /// `true` when the run created no rows at all.
  pub fn is_noop(&self) -> bool {
    self.definitions_inserted == 0 && self.translations_inserted == 0
  }
}

impl AddAssign for MigrationReport {
  fn add_assign(&mut self, rhs: Self) {
    self.definitions_inserted += rhs.definitions_inserted;
    self.translations_inserted += rhs.translations_inserted;
    self.translations_updated += rhs.translations_updated;
  }
}

impl fmt::Display for MigrationReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} new definitions and {} new translations ({} updated)",
      self.definitions_inserted, self.translations_inserted, self.translations_updated,
    )
  }
}
