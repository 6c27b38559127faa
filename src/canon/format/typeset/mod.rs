//! Verse extraction from typeset documents.
//!
//! These sources are exported page markup, one document per chapter, in a
//! legacy 8-bit encoding, and were never meant to be machine-read: verse
//! boundaries are a typesetting convention, not structure. Three layout
//! conventions exist in the corpus, modeled as interchangeable strategies
//! behind the [`PageLayout`] trait so a new convention is a new impl, not
//! another branch:
//!
//! - [`Stacked`]: a standalone-integer paragraph followed by an indented
//!   body paragraph
//! - [`Prefixed`]: the verse number at the start of a body paragraph
//! - [`Bracketed`]: inline `[N]` markers delimiting verses
//!
//! All three share the same post-processing: strip tags, decode the small
//! entity set these exports use, collapse whitespace, drop boilerplate by
//! keyword, and drop implausible verse numbers (a "verse 713" is a footnote
//! mis-parsed as a verse, not a verse).

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use encoding_rs::WINDOWS_1252;
use log::{debug, info, warn};

mod layouts;

pub use layouts::{Bracketed, Prefixed, Stacked};

use super::{ParsedBook, collapse_whitespace, insert_keep_longer, verse_count};

/// No chapter in the corpus reaches this many verses; candidates at or
/// above it are footnote numbers or page artifacts.
const MAX_PLAUSIBLE_VERSE: u32 = 200;

/// Phrases that mark navigation chrome and legal boilerplate, not verse
/// text. Compared lowercase.
const BOILERPLATE_KEYWORDS: [&str; 5] =
    ["previous", "next", "click here", "concordance", "copyright"];

/// The entity set these exports actually use. Anything numeric that
/// remains afterwards is dropped.
const ENTITIES: [(&str, &str); 21] = [
    ("&quot;", "\""),
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&iacute;", "í"),
    ("&aacute;", "á"),
    ("&eacute;", "é"),
    ("&oacute;", "ó"),
    ("&uacute;", "ú"),
    ("&ntilde;", "ñ"),
    ("&egrave;", "è"),
    ("&agrave;", "à"),
    ("&igrave;", "ì"),
    ("&ograve;", "ò"),
    ("&ugrave;", "ù"),
    ("&Egrave;", "È"),
    ("&laquo;", "«"),
    ("&raquo;", "»"),
    ("&ndash;", "–"),
    ("&mdash;", "—"),
];

/// One layout convention for a family of typeset documents.
pub trait PageLayout {
    /// A short name used for logging.
    const DEBUG_NAME: &'static str;

    /// Extracts raw (verse number, body markup) candidates from one
    /// chapter document. Bodies are uncleaned; the caller owns the shared
    /// post-processing.
    fn candidates(content: &str) -> Vec<(u32, String)>;
}

/// Layout selector carried by source configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFamily {
    Stacked,
    Prefixed,
    Bracketed,
}

/// Parses a per-chapter document map using the layout selected by `family`.
pub fn parse(family: PageFamily, files: &BTreeMap<u32, PathBuf>) -> ParsedBook {
    match family {
        PageFamily::Stacked => parse_chapters::<Stacked>(files),
        PageFamily::Prefixed => parse_chapters::<Prefixed>(files),
        PageFamily::Bracketed => parse_chapters::<Bracketed>(files),
    }
}

/// Runs one layout over every chapter document.
pub fn parse_chapters<L: PageLayout>(files: &BTreeMap<u32, PathBuf>) -> ParsedBook {
    let mut book = ParsedBook::new();

    for (&chapter, path) in files {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("{} chapter {} missing: {} ({})", L::DEBUG_NAME, chapter, path.display(), e);
                continue;
            }
        };
        let (content, _, had_errors) = WINDOWS_1252.decode(&bytes);
        if had_errors {
            warn!("{}: undecodable bytes in {}", L::DEBUG_NAME, path.display());
        }

        for (verse, raw) in L::candidates(&content) {
            if verse == 0 || verse >= MAX_PLAUSIBLE_VERSE {
                debug!("{}: dropping implausible verse number {}", L::DEBUG_NAME, verse);
                continue;
            }
            let text = clean_body(&raw);
            if text.is_empty() || is_boilerplate(&text) {
                continue;
            }
            insert_keep_longer(book.entry(chapter).or_default(), verse, text);
        }
    }

    info!("{} typeset source: {} verses", L::DEBUG_NAME, verse_count(&book));
    book
}

/// Shared body cleanup: footnote spans, tags, entities, whitespace.
fn clean_body(raw: &str) -> String {
    let text = layouts::strip_sup(raw);
    let text = layouts::strip_tags(&text);
    let text = decode_entities(&text);
    collapse_whitespace(&text)
}

fn decode_entities(text: &str) -> String {
    let mut out = text.to_string();
    for (entity, replacement) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    // Whatever numeric entities remain (arrows, ornaments) carry no text.
    layouts::strip_numeric_entities(&out)
}

fn is_boilerplate(text: &str) -> bool {
    let lower = text.to_lowercase();
    BOILERPLATE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
