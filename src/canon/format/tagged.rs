//! Parser for hierarchical word-tagged markup.
//!
//! Verse boundaries are wrapper elements carrying a `Book.Chapter.Verse`
//! identifier; the verse text is the concatenation of the `<w>` word tokens
//! inside the wrapper, one space apart. Everything else in the document
//! (morphology attributes, notes, section headings) is ignored.

use std::fs;
use std::path::Path;

use log::{info, warn};
use quick_xml::Reader;
use quick_xml::events::Event;

use super::{ParsedBook, insert_keep_longer, verse_count};

/// Verse-final mark appended when the source omits it (sof pasuq).
const VERSE_FINAL_MARK: char = '\u{05C3}';

/// Parses one book file of word-tagged markup.
///
/// `book_name` is the identifier prefix used by the source, e.g. `Ruth`
/// for `osisID="Ruth.1.4"`; wrappers for any other book are skipped.
pub fn parse(path: &Path, book_name: &str) -> ParsedBook {
    let mut book = ParsedBook::new();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Tagged source not found: {} ({})", path.display(), e);
            return book;
        }
    };

    let mut reader = Reader::from_reader(content.as_bytes());
    let mut buf = Vec::new();

    // (chapter, verse) of the wrapper currently open, plus its words.
    let mut current: Option<(u32, u32)> = None;
    let mut words: Vec<String> = Vec::new();
    let mut in_word = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"verse" => {
                    current = verse_id(&e, book_name);
                    words.clear();
                }
                b"w" if current.is_some() => in_word = true,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_word {
                    if let Ok(text) = t.unescape() {
                        let word = text.trim();
                        if !word.is_empty() {
                            words.push(word.to_string());
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"w" => in_word = false,
                b"verse" => {
                    if let Some((chapter, verse)) = current.take() {
                        let mut text = words.join(" ");
                        if !text.is_empty() && !text.ends_with(VERSE_FINAL_MARK) {
                            text.push(VERSE_FINAL_MARK);
                        }
                        insert_keep_longer(book.entry(chapter).or_default(), verse, text);
                    }
                    words.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("Malformed markup in {}: {}", path.display(), e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    info!("Tagged source {}: {} verses", path.display(), verse_count(&book));
    book
}

/// Reads the wrapper identifier and splits it into (chapter, verse).
fn verse_id(e: &quick_xml::events::BytesStart, book_name: &str) -> Option<(u32, u32)> {
    let attr = e.try_get_attribute("osisID").ok().flatten()?;
    let value = attr.unescape_value().ok()?;
    let mut parts = value.split('.');
    if parts.next()? != book_name {
        return None;
    }
    let chapter = parts.next()?.parse().ok()?;
    let verse = parts.next()?.parse().ok()?;
    Some((chapter, verse))
}
