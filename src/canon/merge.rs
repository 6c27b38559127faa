//! The merge/update engine.
//!
//! Takes parser output for any number of translations and writes it into
//! the existing chapter records of one book. The engine never creates,
//! deletes, or reorders records; it only sets entries inside each verse's
//! `text` map. Re-running with identical inputs changes nothing and counts
//! nothing, so a crashed run is repaired by running again.
//!
//! Source chapter numbers are the source tradition's own. Before lookup,
//! the canonical sequence is mapped through the versification mapper for
//! each translation's tradition, so a Vulgate-numbered psalter lands on the
//! right canonical chapters instead of being taken at face value. Where the
//! Vulgate combines two Masoretic psalms, both canonical chapters read the
//! same source chapter and verses past the shared range stay untouched;
//! the verse-level split is not modeled.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::canon::format::ParsedBook;
use crate::canon::store::Store;
use crate::canon::types::books::BookConfig;
use crate::canon::types::error::{CanonError, Result};
use crate::canon::types::models::Translation;
use crate::canon::versification;

/// Outcome of one merge run over one book.
#[derive(Debug, Default)]
pub struct MergeReport {
    /// Changed `text` entries per translation. Zero means the translation
    /// contributed nothing new, including the source-missing case.
    pub updated: BTreeMap<Translation, usize>,
    /// Chapter records that changed and were written back.
    pub chapters_written: usize,
    /// Sequences in range with no record in the store.
    pub missing: Vec<u32>,
    /// Sequences whose record could not be read or written, with reasons.
    pub failed: Vec<(u32, String)>,
    /// The full-store backup taken before the first write, if any write
    /// happened.
    pub backup: Option<PathBuf>,
}

impl MergeReport {
    /// Total changed entries across all translations.
    pub fn total_updated(&self) -> usize {
        self.updated.values().sum()
    }
}

/// Merges parser output into the chapter records of `book` over the given
/// canonical sequence range.
///
/// # Errors
/// Returns [`CanonError::StoreMissing`] if the book directory is absent,
/// and fails if the pre-write backup cannot be taken. Everything else is
/// recorded in the report and the run continues.
pub fn merge_book(
    store: &Store,
    book: &BookConfig,
    chapters: RangeInclusive<u32>,
    sources: &[(Translation, ParsedBook)],
) -> Result<MergeReport> {
    store.require_book(book.code)?;

    let mut report = MergeReport::default();
    for (translation, _) in sources {
        report.updated.entry(*translation).or_insert(0);
    }

    info!(
        "Merging {} translations into {} chapters {}-{}",
        sources.len(),
        book.code,
        chapters.start(),
        chapters.end()
    );

    for sequence in chapters {
        let mut record = match store.load_chapter(book.code, sequence) {
            Ok(record) => record,
            Err(CanonError::RecordMissing { .. }) => {
                debug!("{} {:03}: no record, skipping", book.code, sequence);
                report.missing.push(sequence);
                continue;
            }
            Err(e) => {
                warn!("{} {:03}: {}", book.code, sequence, e);
                report.failed.push((sequence, e.to_string()));
                continue;
            }
        };

        let mapping = versification::map_chapter(book.code, sequence);
        let mut changed = false;

        for (translation, parsed) in sources {
            let tradition = translation.tradition();
            let Some(&source_chapter) = mapping.chapter_in.get(&tradition) else {
                // This tradition has no such chapter; nothing to merge.
                continue;
            };
            let Some(source_verses) = parsed.get(&source_chapter) else {
                continue;
            };

            for (&verse_seq, verse) in record.verses.iter_mut() {
                let source_verse = verse.v_in.get(&tradition).copied().unwrap_or(verse_seq);
                let Some(text) = source_verses.get(&source_verse) else {
                    continue;
                };
                if text.is_empty() || verse.text.get(translation) == Some(text) {
                    continue;
                }
                verse.text.insert(*translation, text.clone());
                *report.updated.entry(*translation).or_insert(0) += 1;
                changed = true;
            }
        }

        if !changed {
            continue;
        }

        // One full-store backup per run, taken before anything is touched.
        if report.backup.is_none() {
            report.backup = Some(store.backup()?);
        }
        if let Err(e) = store.save_chapter(&record) {
            warn!("{} {:03}: write failed: {}", book.code, sequence, e);
            report.failed.push((sequence, e.to_string()));
            continue;
        }
        report.chapters_written += 1;
    }

    info!(
        "Merge of {} complete: {} entries changed in {} chapters ({} missing, {} failed)",
        book.code,
        report.total_updated(),
        report.chapters_written,
        report.missing.len(),
        report.failed.len()
    );
    Ok(report)
}
