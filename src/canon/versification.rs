//! Versification mapping between the canonical sequence and the three
//! tradition numbering schemes.
//!
//! The internal sequence follows MT (Hebrew) numbering, extended at the
//! tail for tradition-only content. `map_chapter` answers what chapter
//! number each tradition uses for a given sequence, and which traditions
//! carry it at all. The mapping is pure data: no I/O, no state.
//!
//! Psalms is the hard case. The Vulgate combines MT 9+10 and MT 114+115
//! into single psalms, and splits MT 116 and MT 147 into two, so most of
//! the psalter is offset by one:
//!
//! ```text
//! MT   1-8    = VUL 1-8
//! MT   9+10   = VUL 9        (combined)
//! MT  11-113  = VUL 10-112   (offset by 1)
//! MT 114+115  = VUL 113      (combined)
//! MT 116      = VUL 114+115  (split)
//! MT 117-146  = VUL 116-145  (offset by 1)
//! MT 147      = VUL 146+147  (split)
//! MT 148-150  = VUL 148-150
//! MT (none)   = LXX 151      (Greek-only psalm)
//! ```
//!
//! LXX follows the Vulgate numbering for Psalms 1-150.

use std::collections::BTreeMap;

use crate::canon::types::models::Tradition;

/// The mapper's answer for one canonical sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMapping {
    /// Chapter number per tradition. A missing entry means the tradition
    /// has no such chapter.
    pub chapter_in: BTreeMap<Tradition, u32>,
    /// Explicit availability subset. `None` means all three traditions.
    pub exists_in: Option<Vec<Tradition>>,
}

impl ChapterMapping {
    fn identity(sequence: u32) -> Self {
        let mut chapter_in = BTreeMap::new();
        chapter_in.insert(Tradition::Mt, sequence);
        chapter_in.insert(Tradition::Vul, sequence);
        chapter_in.insert(Tradition::Lxx, sequence);
        ChapterMapping {
            chapter_in,
            exists_in: None,
        }
    }
}

/// Maps a canonical chapter sequence to per-tradition chapter numbers.
///
/// Unknown book codes get the identity mapping; that is deliberate, not an
/// error, so new books work before they grow exceptions.
pub fn map_chapter(book_code: &str, sequence: u32) -> ChapterMapping {
    match book_code {
        "PSAL" => map_psalm(sequence),
        // Daniel 13-14: Susanna, Bel and the Dragon.
        "DAN" if sequence > 12 => greek_addition(sequence),
        // Esther 11-16: the Greek additions.
        "ESTH" if sequence > 10 => greek_addition(sequence),
        _ => ChapterMapping::identity(sequence),
    }
}

/// Verse-number mapping per tradition: identity, always.
///
/// Real verse-level exceptions exist (Psalm superscriptions shift Hebrew
/// verse numbers by one, Daniel 3 has a Greek insertion) but no mapping is
/// implemented for them; guessing would corrupt alignments silently.
pub fn map_verse(_book_code: &str, _sequence: u32, verse: u32) -> BTreeMap<Tradition, u32> {
    let mut v_in = BTreeMap::new();
    v_in.insert(Tradition::Mt, verse);
    v_in.insert(Tradition::Vul, verse);
    v_in.insert(Tradition::Lxx, verse);
    v_in
}

fn greek_addition(sequence: u32) -> ChapterMapping {
    let mut chapter_in = BTreeMap::new();
    chapter_in.insert(Tradition::Vul, sequence);
    chapter_in.insert(Tradition::Lxx, sequence);
    ChapterMapping {
        chapter_in,
        exists_in: Some(vec![Tradition::Vul, Tradition::Lxx]),
    }
}

fn map_psalm(sequence: u32) -> ChapterMapping {
    // The Greek-only psalm sits past the MT tail.
    if sequence == 151 {
        let mut chapter_in = BTreeMap::new();
        chapter_in.insert(Tradition::Lxx, 151);
        return ChapterMapping {
            chapter_in,
            exists_in: Some(vec![Tradition::Lxx]),
        };
    }

    let vul = match sequence {
        1..=8 => sequence,
        // VUL 9 spans MT 9 and MT 10; the verse-level split is unresolved.
        9 | 10 => 9,
        11..=113 => sequence - 1,
        // VUL 113 spans MT 114 and MT 115.
        114 | 115 => 113,
        // MT 116 splits into VUL 114 and 115; 114 is the primary reference.
        116 => 114,
        117..=146 => sequence - 1,
        // MT 147 splits into VUL 146 and 147; 146 is the primary reference.
        147 => 146,
        148..=150 => sequence,
        _ => sequence,
    };

    let mut chapter_in = BTreeMap::new();
    chapter_in.insert(Tradition::Mt, sequence);
    chapter_in.insert(Tradition::Vul, vul);
    chapter_in.insert(Tradition::Lxx, vul);
    ChapterMapping {
        chapter_in,
        exists_in: None,
    }
}
