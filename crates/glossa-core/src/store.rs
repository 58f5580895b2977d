//! The `LocaleStore` trait — the sole write path into the target store.
//!
//! Implemented by storage backends (e.g. `glossa-store-sqlite`). The
//! migration driver depends on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::{
  definition::{Definition, DefinitionId, NewDefinition, Saved},
  translation::{Translation, TranslationWrite},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the two-table locale store.
///
/// Both writes are idempotent: calling them again with the same arguments
/// never creates a second row. Uniqueness must be enforced by the backend
/// itself (constraints, not a prior read), so a write is an atomic
/// insert-if-absent.
pub trait LocaleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Return the definition matching `input`'s identity, inserting it first
  /// if none exists.
  ///
  /// With a variant, the match is on the variant alone and an existing row
  /// is returned unchanged even if its value differs. Without one, the match
  /// is on exact value among variant-less rows.
  fn save_definition(
    &self,
    input: NewDefinition,
  ) -> impl Future<Output = Result<Saved, Self::Error>> + Send + '_;

  /// Insert the translation for `(definition_id, locale)`, or overwrite the
  /// text of the existing one (last write wins).
  fn save_translation<'a>(
    &'a self,
    definition_id: DefinitionId,
    text: &'a str,
    locale: &'a str,
  ) -> impl Future<Output = Result<TranslationWrite, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a definition by id. Returns `None` if not found.
  fn get_definition(
    &self,
    id: DefinitionId,
  ) -> impl Future<Output = Result<Option<Definition>, Self::Error>> + Send + '_;

  /// Look up a definition by identity without inserting.
  fn find_definition(
    &self,
    input: NewDefinition,
  ) -> impl Future<Output = Result<Option<Definition>, Self::Error>> + Send + '_;

  /// All definitions, in id order.
  fn list_definitions(
    &self,
  ) -> impl Future<Output = Result<Vec<Definition>, Self::Error>> + Send + '_;

  /// The translation of a definition into `locale`, if any.
  fn get_translation<'a>(
    &'a self,
    definition_id: DefinitionId,
    locale: &'a str,
  ) -> impl Future<Output = Result<Option<Translation>, Self::Error>> + Send + 'a;

  /// Every translation attached to a definition, ordered by locale.
  fn list_translations(
    &self,
    definition_id: DefinitionId,
  ) -> impl Future<Output = Result<Vec<Translation>, Self::Error>> + Send + '_;
}
