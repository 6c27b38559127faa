//! Per-book configuration data.
//!
//! Book identity, canonical chapter counts, and the file-name components
//! each source family needs. Consumed, never mutated, by the core; the
//! numbering quirks live here so the parsers and drivers stay generic.
//! Source numbering is per-family: the same book can be 19 in one corpus,
//! 22 in another.

/// Immutable configuration for one book of the corpus.
#[derive(Debug, Clone, Copy)]
pub struct BookConfig {
    /// Store book key, e.g. `RUTH`, `PSAL`.
    pub code: &'static str,
    /// Canonical (MT-based) chapter count.
    pub chapters: u32,
    /// Total sequence count including the tradition-only tail
    /// (e.g. 151 for Psalms, 14 for Daniel). Equal to `chapters` for most
    /// books.
    pub extended_chapters: u32,
    /// Testament tag as recorded on chapter records.
    pub testament: &'static str,
    /// Section tag as recorded on chapter records.
    pub section: &'static str,
    /// Book name used in word-tagged markup identifiers, e.g. `Ruth.1.4`.
    pub tagged_name: &'static str,
    /// (corpus number, abbreviation) for the fixed-width reference corpus,
    /// e.g. `(8, "Rut")` resolving to `08.Rut.txt`.
    pub fixed_ref_file: (u32, &'static str),
    /// Abbreviation for the colon-reference corpus, e.g. `Rt` for `Rt.lat`.
    pub colon_ref_abbrev: &'static str,
    /// (corpus number, abbreviation) for the chapter-headed corpus,
    /// e.g. `(8, "ruf")` resolving to `08_ruf.txt`.
    pub headed_file: (u32, &'static str),
    /// (corpus number, abbreviation) for the marker-script corpus,
    /// e.g. `(8, "RUT")` resolving to `08-RUTfrancl.usfm`.
    pub script_file: (u32, &'static str),
    /// Base-36 start codes for the three typeset families, chapter 1 first.
    /// `None` while a family's file range is undiscovered.
    pub stacked_start: Option<&'static str>,
    pub prefixed_start: Option<&'static str>,
    pub bracketed_start: Option<&'static str>,
}

impl BookConfig {
    /// Looks up a book by store key.
    pub fn find(code: &str) -> Option<&'static BookConfig> {
        BOOKS.iter().find(|b| b.code == code)
    }
}

/// The books the drivers currently know how to populate.
pub static BOOKS: &[BookConfig] = &[
    BookConfig {
        code: "GENE",
        chapters: 50,
        extended_chapters: 50,
        testament: "OT",
        section: "Pentateuch",
        tagged_name: "Gen",
        fixed_ref_file: (1, "Gen"),
        colon_ref_abbrev: "Gn",
        headed_file: (1, "gen"),
        script_file: (1, "GEN"),
        stacked_start: Some("3"),
        prefixed_start: None,
        bracketed_start: None,
    },
    BookConfig {
        code: "RUTH",
        chapters: 4,
        extended_chapters: 4,
        testament: "OT",
        section: "Historical",
        tagged_name: "Ruth",
        fixed_ref_file: (8, "Rut"),
        colon_ref_abbrev: "Rt",
        headed_file: (8, "ruf"),
        script_file: (8, "RUT"),
        stacked_start: Some("6Q"),
        prefixed_start: Some("ME"),
        bracketed_start: Some("6H"),
    },
    BookConfig {
        code: "ESTH",
        chapters: 10,
        extended_chapters: 16,
        testament: "OT",
        section: "Historical",
        tagged_name: "Esth",
        fixed_ref_file: (17, "Est"),
        colon_ref_abbrev: "Est",
        headed_file: (17, "esf"),
        script_file: (17, "EST"),
        stacked_start: None,
        prefixed_start: None,
        bracketed_start: None,
    },
    BookConfig {
        code: "PSAL",
        chapters: 150,
        extended_chapters: 151,
        testament: "OT",
        section: "Wisdom",
        tagged_name: "Ps",
        fixed_ref_file: (18, "Psa"),
        colon_ref_abbrev: "Ps",
        headed_file: (22, "ps"),
        script_file: (20, "PSA"),
        stacked_start: Some("FT"),
        prefixed_start: Some("G6"),
        bracketed_start: Some("F0"),
    },
    BookConfig {
        code: "DAN",
        chapters: 12,
        extended_chapters: 14,
        testament: "OT",
        section: "Prophets",
        tagged_name: "Dan",
        fixed_ref_file: (27, "Dan"),
        colon_ref_abbrev: "Dn",
        headed_file: (34, "dan"),
        script_file: (27, "DAN"),
        stacked_start: None,
        prefixed_start: None,
        bracketed_start: None,
    },
];
