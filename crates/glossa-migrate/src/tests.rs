//! End-to-end migration tests against in-memory SQLite stores.

use std::{collections::BTreeMap, fs, path::PathBuf};

use glossa_core::{
  definition::NewDefinition, report::MigrationReport, store::LocaleStore,
};
use glossa_files::{FileFormat, LocaleFile};
use glossa_store_sqlite::{SqliteLegacySource, SqliteStore, legacy::LEGACY_SCHEMA};
use tempfile::TempDir;

use crate::{EnglishIdentity, Error, MigrateConfig, Migrator};

async fn migrator(identity: EnglishIdentity) -> Migrator<SqliteStore> {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  let config = MigrateConfig { english_identity: identity, ..Default::default() };
  Migrator::new(store, &config)
}

fn locale_file(locale: &str, entries: &[(&str, &str)]) -> LocaleFile {
  LocaleFile {
    path:    PathBuf::from(format!("{locale}.lang")),
    locale:  locale.to_owned(),
    entries: entries
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<BTreeMap<_, _>>(),
  }
}

// ─── File path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn english_then_french_share_one_definition() {
  let m = migrator(EnglishIdentity::Key).await;
  let mut report = MigrationReport::default();

  m.migrate_file(&mut report, &locale_file("en", &[("greeting", "Hello")]))
    .await
    .unwrap();
  m.migrate_file(&mut report, &locale_file("fr", &[("greeting", "Bonjour")]))
    .await
    .unwrap();

  let defs = m.store().list_definitions().await.unwrap();
  assert_eq!(defs.len(), 1);
  assert_eq!(defs[0].value, "Hello");
  assert_eq!(defs[0].variant.as_deref(), Some("greeting"));

  let translations = m.store().list_translations(defs[0].definition_id).await.unwrap();
  let by_locale: Vec<_> = translations
    .iter()
    .map(|t| (t.locale.as_str(), t.translation.as_str()))
    .collect();
  assert_eq!(by_locale, [("en", "Hello"), ("fr", "Bonjour")]);

  assert_eq!(report.definitions_inserted, 1);
  assert_eq!(report.translations_inserted, 2);
}

#[tokio::test]
async fn french_then_english_share_one_definition_keyed_text() {
  let m = migrator(EnglishIdentity::Key).await;
  let mut report = MigrationReport::default();

  m.migrate_file(&mut report, &locale_file("fr", &[("greeting", "Bonjour")]))
    .await
    .unwrap();
  m.migrate_file(&mut report, &locale_file("en", &[("greeting", "Hello")]))
    .await
    .unwrap();

  let defs = m.store().list_definitions().await.unwrap();
  assert_eq!(defs.len(), 1);
  // The first writer fixed the value; definitions are never rewritten.
  assert_eq!(defs[0].value, "greeting");

  let en = m.store().get_translation(defs[0].definition_id, "en").await.unwrap().unwrap();
  assert_eq!(en.translation, "Hello");
  assert_eq!(report.translations_inserted, 2);
}

#[tokio::test]
async fn value_identity_fragments_across_locales() {
  let m = migrator(EnglishIdentity::Value).await;
  let mut report = MigrationReport::default();

  m.migrate_file(&mut report, &locale_file("en", &[("greeting", "Hello")]))
    .await
    .unwrap();
  m.migrate_file(&mut report, &locale_file("fr", &[("greeting", "Bonjour")]))
    .await
    .unwrap();

  let defs = m.store().list_definitions().await.unwrap();
  assert_eq!(defs.len(), 2);

  let english = m
    .store()
    .find_definition(NewDefinition::text("Hello"))
    .await
    .unwrap()
    .unwrap();
  assert!(english.variant.is_none());
  let keyed = m
    .store()
    .find_definition(NewDefinition::keyed("", "greeting"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(keyed.value, "greeting");
  assert!(m.store().get_translation(keyed.definition_id, "fr").await.unwrap().is_some());
}

#[tokio::test]
async fn english_values_not_keys_become_definition_values() {
  let m = migrator(EnglishIdentity::Value).await;
  let mut report = MigrationReport::default();

  m.migrate_file(
    &mut report,
    &locale_file("en", &[("a", "Apple"), ("b", "Banana")]),
  )
  .await
  .unwrap();

  let mut values: Vec<_> = m
    .store()
    .list_definitions()
    .await
    .unwrap()
    .into_iter()
    .map(|d| d.value)
    .collect();
  values.sort();
  assert_eq!(values, ["Apple", "Banana"]);
}

#[tokio::test]
async fn rerun_changes_text_but_inserts_nothing() {
  let m = migrator(EnglishIdentity::Key).await;

  let mut first = MigrationReport::default();
  m.migrate_file(&mut first, &locale_file("fr", &[("greeting", "Bonjour")]))
    .await
    .unwrap();

  let mut second = MigrationReport::default();
  m.migrate_file(&mut second, &locale_file("fr", &[("greeting", "Salut")]))
    .await
    .unwrap();

  assert!(second.is_noop());
  assert_eq!(second.translations_updated, 1);

  let def = m.store().list_definitions().await.unwrap().remove(0);
  let fr = m.store().get_translation(def.definition_id, "fr").await.unwrap().unwrap();
  assert_eq!(fr.translation, "Salut");
}

fn write_tree(base: &std::path::Path) {
  let app = base.join("app/application/language");
  let front = base.join("app/customer/application/language/front");
  fs::create_dir_all(app.join("front")).unwrap();
  fs::create_dir_all(&front).unwrap();

  fs::write(app.join("en.lang"), r#"{"save": "Save", "cancel": "Cancel"}"#).unwrap();
  fs::write(app.join("fr.lang"), r#"{"save": "Enregistrer"}"#).unwrap();
  fs::write(app.join("programsen.lang"), r#"{"ignored": "Ignored"}"#).unwrap();
  fs::write(app.join("front/en.lang"), r#"{"merged": "Merged elsewhere"}"#).unwrap();
  fs::write(front.join("de.lang"), r#"{"save": "Speichern", "home": ""}"#).unwrap();
}

#[tokio::test]
async fn tree_migration_is_idempotent() {
  let tmp = TempDir::new().unwrap();
  write_tree(tmp.path());

  let m = migrator(EnglishIdentity::Key).await;
  let config = MigrateConfig::default();
  let reader = config.directory_reader();

  let first = m
    .migrate_tree(&reader, tmp.path(), &config.language_dirs)
    .await
    .unwrap();
  // save, cancel, home
  assert_eq!(first.definitions_inserted, 3);
  // en: 2, fr: 1, de: 2
  assert_eq!(first.translations_inserted, 5);

  let defs = m.store().list_definitions().await.unwrap();
  assert!(defs.iter().all(|d| d.variant.is_some()));
  assert!(!defs.iter().any(|d| d.value == "Ignored" || d.value == "Merged elsewhere"));

  let home = m
    .store()
    .find_definition(NewDefinition::keyed("", "home"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(home.value, "home");

  let second = m
    .migrate_tree(&reader, tmp.path(), &config.language_dirs)
    .await
    .unwrap();
  assert!(second.is_noop());
  assert_eq!(second.translations_updated, 5);
  assert_eq!(m.store().list_definitions().await.unwrap().len(), 3);
  assert_eq!(m.store().count_translations().await.unwrap(), 5);
}

#[tokio::test]
async fn toml_format_is_pluggable() {
  let tmp = TempDir::new().unwrap();
  fs::write(tmp.path().join("en.lang"), "greeting = \"Hello\"\n").unwrap();

  let m = migrator(EnglishIdentity::Key).await;
  let config = MigrateConfig { file_format: FileFormat::Toml, ..Default::default() };
  let report = m
    .migrate_dir(&config.directory_reader(), tmp.path())
    .await
    .unwrap();

  assert_eq!(report.definitions_inserted, 1);
}

#[tokio::test]
async fn missing_language_dir_aborts() {
  let tmp = TempDir::new().unwrap();
  let m = migrator(EnglishIdentity::Key).await;
  let config = MigrateConfig::default();

  let err = m
    .migrate_tree(&config.directory_reader(), tmp.path(), &config.language_dirs)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Files(glossa_files::Error::Io { .. })));
}

// ─── Database path ───────────────────────────────────────────────────────────

async fn legacy(seed: &'static str) -> SqliteLegacySource {
  let conn = tokio_rusqlite::Connection::open_in_memory()
    .await
    .expect("in-memory legacy db");
  conn
    .call(move |conn| {
      conn.execute_batch(LEGACY_SCHEMA)?;
      conn.execute_batch(seed)?;
      Ok(())
    })
    .await
    .expect("seed legacy db");
  SqliteLegacySource::from_connection(conn)
}

const LEGACY_SEED: &str = "
INSERT INTO lms_language (language_id, language_acronym)
VALUES (1, 'en'), (2, 'fr'), (3, 'de');

INSERT INTO program (name, description)
VALUES ('Safety', 'Workplace safety'), ('Safety', ''), (NULL, 'Orphan text');
INSERT INTO program_tier (name, description) VALUES ('Gold', NULL);

INSERT INTO lms_event (event_id, event_legacy_id) VALUES (1, NULL), (2, NULL), (3, 99);
INSERT INTO lms_event_detail
  (event_detail_event_id, event_detail_language_id, event_detail_title, event_detail_description)
VALUES
  (1, 1, 'Welcome', 'Introduction day'),
  (1, 2, 'Bienvenue', 'Journée d''introduction'),
  (1, 3, 'Willkommen', NULL),
  (2, 2, 'Clôture', NULL),
  (2, 1, 'Closing', ''),
  (3, 2, 'Ancien', NULL);
";

#[tokio::test]
async fn database_migration_anchors_foreign_rows_to_english() {
  let m = migrator(EnglishIdentity::Key).await;
  let src = legacy(LEGACY_SEED).await;

  let report = m.migrate_database(&src, 1).await.unwrap();

  // Safety, Workplace safety, Orphan text, Gold, Welcome,
  // Introduction day, Closing
  assert_eq!(report.definitions_inserted, 7);
  // fr + de title, fr description, fr closing title
  assert_eq!(report.translations_inserted, 4);

  let welcome = m
    .store()
    .find_definition(NewDefinition::text("Welcome"))
    .await
    .unwrap()
    .unwrap();
  let titles: Vec<_> = m
    .store()
    .list_translations(welcome.definition_id)
    .await
    .unwrap()
    .into_iter()
    .map(|t| (t.locale, t.translation))
    .collect();
  assert_eq!(
    titles,
    [
      ("de".to_owned(), "Willkommen".to_owned()),
      ("fr".to_owned(), "Bienvenue".to_owned()),
    ]
  );

  let intro = m
    .store()
    .find_definition(NewDefinition::text("Introduction day"))
    .await
    .unwrap()
    .unwrap();
  let fr = m.store().get_translation(intro.definition_id, "fr").await.unwrap().unwrap();
  assert_eq!(fr.translation, "Journée d'introduction");

  // Rows of legacy-flagged events are never read.
  let defs = m.store().list_definitions().await.unwrap();
  assert!(defs.iter().all(|d| d.value != "Ancien" && d.variant.is_none()));
}

#[tokio::test]
async fn every_foreign_translation_has_an_english_definition() {
  let m = migrator(EnglishIdentity::Key).await;
  let src = legacy(LEGACY_SEED).await;
  m.migrate_database(&src, 1).await.unwrap();

  let english_texts = ["Welcome", "Introduction day", "Closing"];
  for def in m.store().list_definitions().await.unwrap() {
    let translations = m.store().list_translations(def.definition_id).await.unwrap();
    if !translations.is_empty() {
      assert!(english_texts.contains(&def.value.as_str()), "{}", def.value);
    }
  }
}

#[tokio::test]
async fn database_rerun_inserts_nothing() {
  let m = migrator(EnglishIdentity::Key).await;
  let src = legacy(LEGACY_SEED).await;

  m.migrate_database(&src, 1).await.unwrap();
  let second = m.migrate_database(&src, 1).await.unwrap();

  assert!(second.is_noop());
  assert_eq!(second.translations_updated, 4);
}

#[tokio::test]
async fn missing_english_anchor_aborts_but_keeps_prior_writes() {
  let m = migrator(EnglishIdentity::Key).await;
  let src = legacy(
    "INSERT INTO lms_language (language_id, language_acronym) VALUES (1, 'en'), (2, 'fr');
     INSERT INTO program (name, description) VALUES ('Safety', NULL);
     INSERT INTO lms_event (event_id) VALUES (5);
     INSERT INTO lms_event_detail
       (event_detail_event_id, event_detail_language_id, event_detail_title)
     VALUES (5, 2, 'Bienvenue');",
  )
  .await;

  let err = m.migrate_database(&src, 1).await.unwrap_err();
  assert!(matches!(err, Error::Resolve(glossa_core::Error::MissingAnchor(5))));

  let defs = m.store().list_definitions().await.unwrap();
  assert_eq!(defs.len(), 1);
  assert_eq!(defs[0].value, "Safety");
}

#[tokio::test]
async fn unknown_language_aborts() {
  let m = migrator(EnglishIdentity::Key).await;
  let src = legacy(
    "INSERT INTO lms_language (language_id, language_acronym) VALUES (1, 'en');
     INSERT INTO lms_event (event_id) VALUES (5);
     INSERT INTO lms_event_detail
       (event_detail_event_id, event_detail_language_id, event_detail_title)
     VALUES (5, 1, 'Welcome'), (5, 4, 'Benvenuto');",
  )
  .await;

  let err = m.migrate_database(&src, 1).await.unwrap_err();
  assert!(matches!(err, Error::Resolve(glossa_core::Error::LanguageNotFound(4))));
}

#[tokio::test]
async fn empty_english_text_anchors_to_empty_definition() {
  let m = migrator(EnglishIdentity::Key).await;
  let src = legacy(
    "INSERT INTO lms_language (language_id, language_acronym) VALUES (1, 'en'), (2, 'fr');
     INSERT INTO lms_event (event_id) VALUES (5);
     INSERT INTO lms_event_detail
       (event_detail_event_id, event_detail_language_id, event_detail_title, event_detail_description)
     VALUES (5, 1, 'Welcome', NULL), (5, 2, 'Bienvenue', 'Description FR');",
  )
  .await;

  let report = m.migrate_database(&src, 1).await.unwrap();
  assert_eq!(report.translations_inserted, 2);

  let empty = m
    .store()
    .find_definition(NewDefinition::text(""))
    .await
    .unwrap()
    .unwrap();
  let fr = m.store().get_translation(empty.definition_id, "fr").await.unwrap().unwrap();
  assert_eq!(fr.translation, "Description FR");
}
