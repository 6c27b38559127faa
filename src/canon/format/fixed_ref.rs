//! Parser for the fixed-width numeric-reference word stream.
//!
//! Each line carries an 8-digit reference and one word:
//!
//! ```text
//! 08001001 word
//! ```
//!
//! Digits 1-2 are the corpus book number (ignored here; the file is already
//! book-specific), 3-5 the chapter, 6-8 the verse. Words accumulate per
//! (chapter, verse) in file order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;

use super::{ParsedBook, insert_keep_longer, verse_count};

static LINE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn line_regex() -> &'static Regex {
    LINE_PATTERN.get_or_init(|| Regex::new(r"^(\d{8})\s+(\S+)").expect("Invalid reference pattern"))
}

/// Parses one book file of the reference + word-per-line stream.
pub fn parse(path: &Path) -> ParsedBook {
    let mut book = ParsedBook::new();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Fixed-ref source not found: {} ({})", path.display(), e);
            return book;
        }
    };

    // Words per (chapter, verse), kept in file order.
    let mut accum: BTreeMap<(u32, u32), Vec<&str>> = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(cap) = line_regex().captures(line) else {
            continue;
        };
        let reference = &cap[1];
        let chapter: u32 = reference[2..5].parse().unwrap_or(0);
        let verse: u32 = reference[5..8].parse().unwrap_or(0);
        if chapter == 0 || verse == 0 {
            continue;
        }
        accum
            .entry((chapter, verse))
            .or_default()
            .push(cap.get(2).map(|m| m.as_str()).unwrap_or(""));
    }

    for ((chapter, verse), words) in accum {
        let text = tighten_punctuation(&words.join(" "));
        insert_keep_longer(book.entry(chapter).or_default(), verse, text);
    }

    info!("Fixed-ref source {}: {} verses", path.display(), verse_count(&book));
    book
}

/// Removes the space a word-per-line stream leaves before punctuation
/// tokens, so ". word , word" joins read naturally.
fn tighten_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, ',' | '.' | ';' | ':' | '!' | '?' | '\u{0387}') && out.ends_with(' ') {
            out.pop();
        }
        out.push(ch);
    }
    out
}
