//! # Source Format Parsers
//!
//! This module acts as the entry point for extracting verse text from the
//! six incompatible source encodings. It dispatches to the appropriate
//! format-specific parser based on [`SourceKind`].
//!
//! Every parser shares one contract: input is the resolved source location
//! for one book, output is `{source-chapter → {source-verse → text}}` in the
//! source's own numbering. Only successfully extracted, non-empty verses
//! appear; a missing file yields an empty result, never an error. Duplicate
//! (chapter, verse) candidates keep the longer non-empty text.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::warn;

pub mod colon_ref;
pub mod fixed_ref;
pub mod headed;
pub mod script;
pub mod tagged;
pub mod typeset;

use crate::canon::types::books::BookConfig;
use typeset::PageFamily;

/// Verse number to text, in the source's own numbering.
pub type VerseMap = BTreeMap<u32, String>;

/// Chapter number to verses, in the source's own numbering.
pub type ParsedBook = BTreeMap<u32, VerseMap>;

/// The six parsing strategies, one per source encoding family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Hierarchical word-tagged markup (`<verse osisID>` wrappers).
    Tagged,
    /// Fixed-width 8-digit reference + one word per line.
    FixedRef,
    /// `chapter:verse` references followed by free text.
    ColonRef,
    /// Marker-delimited script with inline word annotations.
    Script,
    /// Chapter-header-delimited flat numbered text.
    Headed,
    /// Typeset documents, one file per chapter, in one of three layouts.
    Typeset(PageFamily),
}

/// Resolved source location for one (book, translation) pair.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// A single whole-book file.
    File(PathBuf),
    /// One document per chapter, keyed by source chapter number.
    ChapterFiles(BTreeMap<u32, PathBuf>),
}

/// Runs the parser selected by `kind` over `input`.
///
/// A mismatched kind/input pairing is a resolver bug; it is logged and
/// yields an empty result rather than failing the run.
pub fn extract(kind: SourceKind, input: &SourceInput, book: &BookConfig) -> ParsedBook {
    match (kind, input) {
        (SourceKind::Tagged, SourceInput::File(path)) => tagged::parse(path, book.tagged_name),
        (SourceKind::FixedRef, SourceInput::File(path)) => fixed_ref::parse(path),
        (SourceKind::ColonRef, SourceInput::File(path)) => colon_ref::parse(path),
        (SourceKind::Script, SourceInput::File(path)) => script::parse(path),
        (SourceKind::Headed, SourceInput::File(path)) => headed::parse(path),
        (SourceKind::Typeset(family), SourceInput::ChapterFiles(files)) => {
            typeset::parse(family, files)
        }
        (kind, _) => {
            warn!("{:?} parser given the wrong input shape, skipping", kind);
            ParsedBook::new()
        }
    }
}

/// Inserts a verse candidate, keeping the longer text when the key is
/// already taken. Empty candidates never land.
pub(crate) fn insert_keep_longer(verses: &mut VerseMap, verse: u32, text: String) {
    if text.is_empty() {
        return;
    }
    match verses.get(&verse) {
        Some(existing) if existing.len() >= text.len() => {}
        _ => {
            verses.insert(verse, text);
        }
    }
}

/// Collapses all whitespace runs to single spaces and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                out.push(' ');
                in_gap = true;
            }
        } else {
            out.push(ch);
            in_gap = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Counts extracted verses across all chapters, for summary logging.
pub fn verse_count(book: &ParsedBook) -> usize {
    book.values().map(|v| v.len()).sum()
}
