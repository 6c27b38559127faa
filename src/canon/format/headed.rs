//! Parser for chapter-header-delimited flat numbered text.
//!
//! ```text
//! == Book Title ==
//! === 1 ===
//! 1 First verse text
//! 2 Second verse text
//! ```
//!
//! Chapter headers open a chapter; verse lines are a bare number followed
//! by text. Title lines and anything outside a chapter are skipped.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;

use super::{ParsedBook, insert_keep_longer, verse_count};

static CHAPTER_HEADER: OnceLock<Regex> = OnceLock::new();
static VERSE_LINE: OnceLock<Regex> = OnceLock::new();

fn chapter_header() -> &'static Regex {
    CHAPTER_HEADER
        .get_or_init(|| Regex::new(r"^===\s*(\d+)\s*===").expect("Invalid header pattern"))
}

fn verse_line() -> &'static Regex {
    VERSE_LINE.get_or_init(|| Regex::new(r"^(\d+)\s+(.+)").expect("Invalid verse pattern"))
}

/// Parses one book file of chapter-headed flat text.
pub fn parse(path: &Path) -> ParsedBook {
    let mut book = ParsedBook::new();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Headed source not found: {} ({})", path.display(), e);
            return book;
        }
    };

    let mut current_chapter = 0u32;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(cap) = chapter_header().captures(line) {
            current_chapter = cap[1].parse().unwrap_or(0);
            continue;
        }

        // Book title line.
        if line.starts_with("== ") {
            continue;
        }

        if current_chapter > 0
            && let Some(cap) = verse_line().captures(line)
            && let Ok(verse) = cap[1].parse()
        {
            let text = cap[2].trim_matches(['*', '_']).trim().to_string();
            insert_keep_longer(book.entry(current_chapter).or_default(), verse, text);
        }
    }

    info!("Headed source {}: {} verses", path.display(), verse_count(&book));
    book
}
