//! SQL schema for the target locale store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// The two partial unique indexes are what make definition writes an atomic
/// insert-if-absent: a definition is unique by variant when it has one, and
/// by value among rows without one.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Definitions are append-only; only timestamps are ever rewritten.
CREATE TABLE IF NOT EXISTS locale_definition (
    definition_id INTEGER PRIMARY KEY AUTOINCREMENT,
    value         TEXT NOT NULL,
    variant       TEXT,            -- explicit identity key or NULL
    created_at    TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at    TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS locale_definition_variant_uq
    ON locale_definition(variant) WHERE variant IS NOT NULL;
CREATE UNIQUE INDEX IF NOT EXISTS locale_definition_value_uq
    ON locale_definition(value) WHERE variant IS NULL;

CREATE TABLE IF NOT EXISTS locale_translation (
    translation_id INTEGER PRIMARY KEY AUTOINCREMENT,
    locale         TEXT NOT NULL,
    definition_id  INTEGER NOT NULL REFERENCES locale_definition(definition_id),
    translation    TEXT NOT NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL,
    UNIQUE (definition_id, locale)
);

CREATE INDEX IF NOT EXISTS locale_translation_locale_idx ON locale_translation(locale);

PRAGMA user_version = 1;
";
