//! Parser for marker-delimited script sources with inline word annotations.
//!
//! The format is line-oriented: `\c N` opens a chapter, `\v N [text]` opens
//! a verse, plain lines continue the open verse. Inline spans of the shape
//! `\w word|annotation\w*` reduce to the bare word; structural marker lines
//! (`\id`, `\h`, `\toc`, `\mt`, `\s`, `\p`, `\q`, `\r`) carry no verse text
//! and are dropped.
//!
//! The scan runs an explicit state machine rather than loose chapter/verse
//! variables: a marker seen in the wrong state simply resets the scanner
//! instead of attaching text to a stale reference.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;

use super::{ParsedBook, collapse_whitespace, insert_keep_longer, verse_count};

static VERSE_MARKER: OnceLock<Regex> = OnceLock::new();
static WORD_SPAN: OnceLock<Regex> = OnceLock::new();
static BARE_MARKER: OnceLock<Regex> = OnceLock::new();

fn verse_marker() -> &'static Regex {
    VERSE_MARKER.get_or_init(|| Regex::new(r"^\\v\s+(\d+)\s*(.*)").expect("Invalid verse pattern"))
}

fn word_span() -> &'static Regex {
    WORD_SPAN
        .get_or_init(|| Regex::new(r"\\w\s*([^|]+)\|[^*]+\\w\*").expect("Invalid span pattern"))
}

fn bare_marker() -> &'static Regex {
    BARE_MARKER.get_or_init(|| Regex::new(r"\\[a-z]+\d*\s*").expect("Invalid marker pattern"))
}

/// Marker lines that structure the document but never carry verse text.
const STRUCTURAL_MARKERS: [&str; 10] = [
    "\\id", "\\h", "\\toc", "\\mt", "\\c ", "\\v ", "\\s", "\\p", "\\q", "\\r",
];

/// Scanner states for the marker-delimited format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the first chapter marker.
    BetweenChapters,
    /// A chapter is open but no verse yet; loose text here is discarded.
    InChapter,
    /// A verse is open and accumulating text.
    InVerse,
}

/// Explicit scanner state threaded through the line scan.
struct Scanner {
    state: ScanState,
    chapter: u32,
    verse: u32,
    pending: Vec<String>,
    book: ParsedBook,
}

impl Scanner {
    fn new() -> Self {
        Scanner {
            state: ScanState::BetweenChapters,
            chapter: 0,
            verse: 0,
            pending: Vec::new(),
            book: ParsedBook::new(),
        }
    }

    fn on_chapter_marker(&mut self, chapter: u32) {
        self.flush_verse();
        self.chapter = chapter;
        self.verse = 0;
        self.state = ScanState::InChapter;
    }

    fn on_verse_marker(&mut self, verse: u32, rest: &str) {
        self.flush_verse();
        self.verse = verse;
        if !rest.is_empty() {
            self.pending.push(rest.to_string());
        }
        self.state = if self.state == ScanState::BetweenChapters {
            // A verse before any chapter has nothing to attach to.
            ScanState::BetweenChapters
        } else {
            ScanState::InVerse
        };
    }

    fn on_text(&mut self, text: &str) {
        if self.state == ScanState::InVerse {
            self.pending.push(text.to_string());
        }
    }

    fn flush_verse(&mut self) {
        if self.state == ScanState::InVerse && self.chapter > 0 && self.verse > 0 {
            let text = clean_inline_markup(&self.pending.join(" "));
            insert_keep_longer(self.book.entry(self.chapter).or_default(), self.verse, text);
        }
        self.pending.clear();
    }

    fn finish(mut self) -> ParsedBook {
        self.flush_verse();
        self.book
    }
}

/// Parses one book file of the marker-delimited script format.
pub fn parse(path: &Path) -> ParsedBook {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Script source not found: {} ({})", path.display(), e);
            return ParsedBook::new();
        }
    };

    let mut scanner = Scanner::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("\\c ") {
            match rest.split_whitespace().next().and_then(|n| n.parse().ok()) {
                Some(chapter) => scanner.on_chapter_marker(chapter),
                None => warn!("Unreadable chapter marker in {}: {:?}", path.display(), line),
            }
            continue;
        }

        if let Some(cap) = verse_marker().captures(line) {
            if let Ok(verse) = cap[1].parse() {
                scanner.on_verse_marker(verse, cap[2].trim());
            }
            continue;
        }

        if !line.starts_with('\\') {
            scanner.on_text(line);
        } else if !STRUCTURAL_MARKERS.iter().any(|m| line.starts_with(m)) {
            // An unrecognized marker may still carry verse text after it.
            let text = bare_marker().replace(line, "");
            let text = text.trim();
            if !text.is_empty() {
                scanner.on_text(text);
            }
        }
    }

    let book = scanner.finish();
    info!("Script source {}: {} verses", path.display(), verse_count(&book));
    book
}

/// Reduces `\w word|annotation\w*` spans to bare words, drops any leftover
/// markers, and collapses whitespace.
fn clean_inline_markup(text: &str) -> String {
    let text = word_span().replace_all(text, "$1");
    let text = bare_marker().replace_all(&text, "");
    collapse_whitespace(&text)
}
