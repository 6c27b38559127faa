//! Source file resolution.
//!
//! Maps (sources root, book configuration) to the concrete files each
//! translation is parsed from. The paths and naming schemes mirror how the
//! corpora are distributed; the parsers stay path-agnostic.

use std::collections::BTreeMap;
use std::path::Path;

use crate::canon::format::typeset::PageFamily;
use crate::canon::format::{SourceInput, SourceKind};
use crate::canon::types::books::BookConfig;
use crate::canon::types::models::Translation;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Everything the drivers need to parse one translation of one book.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub translation: Translation,
    pub kind: SourceKind,
    pub input: SourceInput,
}

/// Resolves every configured source for one book.
///
/// Translations whose file-name components are not configured for this
/// book are simply absent from the result; the merge then reports zero
/// updates for them rather than failing.
pub fn resolve(sources_root: &Path, book: &BookConfig) -> Vec<ResolvedSource> {
    let mut resolved = Vec::new();

    resolved.push(ResolvedSource {
        translation: Translation::Wlc,
        kind: SourceKind::Tagged,
        input: SourceInput::File(
            sources_root
                .join("hebrew/wlc")
                .join(format!("{}.xml", book.tagged_name)),
        ),
    });

    // Greek is Septuagint for OT books, Byzantine for NT books; the two
    // corpora share one encoding but live in different directories.
    let greek = Translation::greek_for(book.testament);
    let greek_dir = match greek {
        Translation::Byz => "greek/byzantine",
        _ => "greek/septuagint",
    };
    let (num, abbrev) = book.fixed_ref_file;
    resolved.push(ResolvedSource {
        translation: greek,
        kind: SourceKind::FixedRef,
        input: SourceInput::File(
            sources_root
                .join(greek_dir)
                .join(format!("{:02}.{}.txt", num, abbrev)),
        ),
    });

    resolved.push(ResolvedSource {
        translation: Translation::Vul,
        kind: SourceKind::ColonRef,
        input: SourceInput::File(
            sources_root
                .join("latin/clementine/src/utf8")
                .join(format!("{}.lat", book.colon_ref_abbrev)),
        ),
    });

    let (num, abbrev) = book.headed_file;
    resolved.push(ResolvedSource {
        translation: Translation::Syn,
        kind: SourceKind::Headed,
        input: SourceInput::File(
            sources_root
                .join("russian/synodal-77books")
                .join(format!("{:02}_{}.txt", num, abbrev)),
        ),
    });

    let (num, abbrev) = book.script_file;
    resolved.push(ResolvedSource {
        translation: Translation::Neo,
        kind: SourceKind::Script,
        input: SourceInput::File(
            sources_root
                .join("french/neo-crampon")
                .join(format!("{:02}-{}francl.usfm", num, abbrev)),
        ),
    });

    let typeset = [
        (Translation::Nab, PageFamily::Stacked, "english/nab-vatican", book.stacked_start),
        (Translation::VatEs, PageFamily::Prefixed, "spanish/libro-pueblo-dios", book.prefixed_start),
        (Translation::Cei, PageFamily::Bracketed, "italian/vatican", book.bracketed_start),
    ];
    for (translation, family, dir, start) in typeset {
        let Some(start) = start else { continue };
        let dir = sources_root.join(dir);
        let files = base36_chapter_files(start, book.chapters)
            .into_iter()
            .map(|(chapter, name)| (chapter, dir.join(name)))
            .collect();
        resolved.push(ResolvedSource {
            translation,
            kind: SourceKind::Typeset(family),
            input: SourceInput::ChapterFiles(files),
        });
    }

    resolved
}

/// Generates the per-chapter file names of a typeset family.
///
/// The documents are numbered positionally in base-36: chapter `N` lives at
/// `__P<code>.HTM` where `code` is the family's start offset plus `N - 1`,
/// written in base-36 (one digit below 36, two digits from 36 up).
pub fn base36_chapter_files(start_code: &str, chapters: u32) -> BTreeMap<u32, String> {
    let mut files = BTreeMap::new();
    let Some(start) = base36_value(start_code) else {
        return files;
    };
    for chapter in 1..=chapters {
        let offset = start + chapter - 1;
        let code = if offset < 36 {
            (BASE36[offset as usize] as char).to_string()
        } else {
            let high = BASE36[(offset / 36) as usize % 36] as char;
            let low = BASE36[(offset % 36) as usize] as char;
            format!("{}{}", high, low)
        };
        files.insert(chapter, format!("__P{}.HTM", code));
    }
    files
}

fn base36_value(code: &str) -> Option<u32> {
    let digit = |c: char| {
        BASE36
            .iter()
            .position(|&b| b as char == c.to_ascii_uppercase())
            .map(|p| p as u32)
    };
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(high), Some(low)) => Some(digit(high)? * 36 + digit(low)?),
        (Some(single), None) => digit(single),
        _ => None,
    }
}
