//! One-time schema migration from legacy flat-language records to the
//! versioned, tradition-aware shape.
//!
//! Legacy chapter records carry no schema-version marker and store each
//! verse as a flat object of language keys:
//!
//! ```text
//! { "chapter_number": 3, "verses": { "1": { "hebrew": "...", "latin": "..." } } }
//! ```
//!
//! Migration computes `chapter_in`/`exists_in` from the versification
//! mapper, gives every verse an identity `v_in`, and re-keys each language
//! into `text` under its translation code. Records that already carry the
//! marker are untouched, so the migration is safe to re-run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{info, warn};
use serde_json::Value;

use crate::canon::store::Store;
use crate::canon::types::error::{CanonError, Result};
use crate::canon::types::models::{
    ChapterRecord, SCHEMA_VERSION, Translation, VerseRecord,
};
use crate::canon::versification;

/// Legacy language key to translation code. Greek is absent on purpose:
/// it splits by testament (see [`Translation::greek_for`]).
const LANG_TO_CODE: [(&str, Translation); 8] = [
    ("hebrew", Translation::Wlc),
    ("latin", Translation::Vul),
    ("english", Translation::Nab),
    ("russian", Translation::Syn),
    ("french", Translation::Neo),
    ("spanish", Translation::VatEs),
    ("italian", Translation::Cei),
    ("portuguese", Translation::Por),
];

/// Whether the run writes anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    /// Full in-memory transform and counting, no writes, no backup.
    DryRun,
    /// Transform and overwrite records in place, snapshotting the whole
    /// store before the first overwrite.
    Live,
}

/// Outcome of one migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub chapters_migrated: usize,
    /// Records already in the versioned shape.
    pub chapters_skipped: usize,
    pub verses_migrated: usize,
    /// Chapters that could not be transformed, with reasons. The run
    /// continues past them.
    pub errors: Vec<(PathBuf, String)>,
    pub backup: Option<PathBuf>,
}

/// Migrates every legacy chapter record in the store.
///
/// # Errors
/// Fails early only if the store root cannot be listed or the pre-write
/// snapshot cannot be taken; per-chapter problems land in the report.
pub fn migrate_store(store: &Store, mode: MigrationMode) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();
    let books = store.book_codes()?;
    info!(
        "Migrating {} books{}",
        books.len(),
        if mode == MigrationMode::DryRun { " (dry run)" } else { "" }
    );

    for book in &books {
        let paths = match store.chapter_paths(book) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("{}: unreadable book directory: {}", book, e);
                report.errors.push((store.book_dir(book), e.to_string()));
                continue;
            }
        };

        let mut book_verses = 0usize;
        for path in paths {
            let old = match store.load_raw(&path) {
                Ok(value) => value,
                Err(e) => {
                    warn!("{}: {}", path.display(), e);
                    report.errors.push((path, e.to_string()));
                    continue;
                }
            };

            if old.get("_schema_version").is_some() {
                report.chapters_skipped += 1;
                continue;
            }

            let record = match migrate_chapter(&old) {
                Ok(record) => record,
                Err(e) => {
                    warn!("{}: {}", path.display(), e);
                    report.errors.push((path, e.to_string()));
                    continue;
                }
            };
            book_verses += record.verses.len();

            if mode == MigrationMode::Live {
                if report.backup.is_none() {
                    report.backup = Some(store.backup()?);
                }
                if let Err(e) = store.write_json(&path, &record) {
                    warn!("{}: write failed: {}", path.display(), e);
                    report.errors.push((path, e.to_string()));
                    continue;
                }
            }
            report.chapters_migrated += 1;
        }
        report.verses_migrated += book_verses;
    }

    info!(
        "Migration complete: {} chapters, {} verses, {} already versioned, {} errors",
        report.chapters_migrated,
        report.verses_migrated,
        report.chapters_skipped,
        report.errors.len()
    );
    Ok(report)
}

/// Transforms one legacy chapter value into a versioned record.
pub fn migrate_chapter(old: &Value) -> Result<ChapterRecord> {
    let book_key = old
        .get("book_key")
        .and_then(Value::as_str)
        .unwrap_or("UNKN")
        .to_string();
    let sequence = old
        .get("chapter_number")
        .and_then(Value::as_u64)
        .unwrap_or(1) as u32;
    let testament = old
        .get("testament")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let section = old
        .get("section")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let chapter_id = old
        .get("chapter_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| ChapterRecord::chapter_id_for(&book_key, sequence));

    let mapping = versification::map_chapter(&book_key, sequence);

    let mut verses = BTreeMap::new();
    if let Some(old_verses) = old.get("verses") {
        let old_verses = old_verses
            .as_object()
            .ok_or_else(|| CanonError::Transform("verses is not an object".to_string()))?;

        for (verse_key, old_verse) in old_verses {
            let verse_num: u32 = verse_key.parse().map_err(|_| {
                CanonError::Transform(format!("non-numeric verse key {:?}", verse_key))
            })?;
            let old_verse = old_verse.as_object().ok_or_else(|| {
                CanonError::Transform(format!("verse {} is not an object", verse_num))
            })?;

            let mut text = BTreeMap::new();
            for (lang, code) in LANG_TO_CODE {
                if let Some(value) = old_verse.get(lang).and_then(Value::as_str)
                    && !value.is_empty()
                {
                    text.insert(code, value.to_string());
                }
            }
            // One flat "greek" key historically held both Greek traditions;
            // the testament tag says which this chapter is.
            if let Some(value) = old_verse.get("greek").and_then(Value::as_str)
                && !value.is_empty()
            {
                text.insert(Translation::greek_for(&testament), value.to_string());
            }

            verses.insert(
                verse_num,
                VerseRecord {
                    seq: verse_num,
                    v_in: versification::map_verse(&book_key, sequence, verse_num),
                    text,
                },
            );
        }
    }

    Ok(ChapterRecord {
        schema_version: SCHEMA_VERSION.to_string(),
        chapter_id,
        book_key,
        sequence,
        chapter_in: mapping.chapter_in,
        testament,
        section,
        exists_in: mapping.exists_in,
        verses,
    })
}
