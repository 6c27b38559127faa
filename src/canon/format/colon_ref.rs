//! Parser for colon-delimited references followed by free text.
//!
//! References look like `3:14` at the start of a line; everything between
//! one reference and the next belongs to the preceding one, including
//! wrapped continuation lines. Some sources end wrapped lines with a
//! backslash continuation marker, which is stripped.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;

use super::{ParsedBook, collapse_whitespace, insert_keep_longer, verse_count};

static REF_PATTERN: OnceLock<Regex> = OnceLock::new();

fn ref_regex() -> &'static Regex {
    REF_PATTERN
        .get_or_init(|| Regex::new(r"(?m)^(\d+):(\d+)[ \t]+").expect("Invalid reference pattern"))
}

/// Parses one book file of `chapter:verse text` lines.
pub fn parse(path: &Path) -> ParsedBook {
    let mut book = ParsedBook::new();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Colon-ref source not found: {} ({})", path.display(), e);
            return book;
        }
    };
    // Some files in this family carry stray non-UTF-8 bytes; replace them
    // rather than fail the whole book.
    let content = String::from_utf8_lossy(&bytes);

    // Collect marker positions first, then slice the text between
    // consecutive markers.
    let markers: Vec<(u32, u32, usize, usize)> = ref_regex()
        .captures_iter(&content)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let chapter = cap[1].parse().ok()?;
            let verse = cap[2].parse().ok()?;
            Some((chapter, verse, whole.end(), whole.start()))
        })
        .collect();

    for (i, &(chapter, verse, text_start, _)) in markers.iter().enumerate() {
        let text_end = markers
            .get(i + 1)
            .map(|&(_, _, _, next_start)| next_start)
            .unwrap_or(content.len());
        let raw = &content[text_start..text_end];
        let text = collapse_whitespace(raw)
            .trim_end_matches('\\')
            .trim()
            .to_string();
        insert_keep_longer(book.entry(chapter).or_default(), verse, text);
    }

    info!("Colon-ref source {}: {} verses", path.display(), verse_count(&book));
    book
}
