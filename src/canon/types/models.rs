//! Core data structures for the canonical verse store.
//!
//! This module defines the fundamental types used throughout the library:
//! - Tradition and translation code enumerations
//! - Persisted chapter and verse record shapes
//! - The schema-version marker

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CanonError, Result};

/// Schema-version marker carried by every versioned chapter record.
/// Records without it are in the legacy flat-language shape.
pub const SCHEMA_VERSION: &str = "2.0";

/// A versification tradition: the scheme by which a textual tradition
/// divides a book into chapters and verses.
///
/// The internal chapter sequence is MT-based; `chapter_in` maps it into the
/// other two schemes. Tradition codes key `chapter_in`/`v_in`/`exists_in`
/// and are a separate typed key space from [`Translation`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tradition {
    /// Masoretic (Hebrew) numbering. The canonical sequence follows it.
    Mt,
    /// Vulgate (Latin) numbering.
    Vul,
    /// Septuagint (Greek) numbering. Follows the Vulgate for Psalms 1-150.
    Lxx,
}

impl Tradition {
    pub const ALL: [Tradition; 3] = [Tradition::Mt, Tradition::Vul, Tradition::Lxx];

    pub fn code(&self) -> &'static str {
        match self {
            Tradition::Mt => "MT",
            Tradition::Vul => "VUL",
            Tradition::Lxx => "LXX",
        }
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Tradition {
    type Error = CanonError;
    fn try_from(code: &str) -> Result<Self> {
        match code {
            "MT" => Ok(Tradition::Mt),
            "VUL" => Ok(Tradition::Vul),
            "LXX" => Ok(Tradition::Lxx),
            _ => Err(CanonError::UnknownCode(code.to_string())),
        }
    }
}

/// One published rendering of the text. Each translation is associated with
/// exactly one [`Tradition`], which decides how its source numbering maps
/// onto the canonical sequence at merge time.
///
/// `LXX` and `VUL` also exist as tradition codes; the two enums keep the
/// key spaces apart even where the strings coincide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Translation {
    /// Westminster Leningrad Codex (Hebrew).
    Wlc,
    /// Septuagint, Swete edition (Greek OT).
    Lxx,
    /// Clementine Vulgate (Latin).
    Vul,
    /// Byzantine/Robinson-Pierpont (Greek NT).
    Byz,
    /// New American Bible (English).
    Nab,
    /// Synodal translation (Russian).
    Syn,
    /// Neo-Crampon (French).
    Neo,
    /// Libro del Pueblo de Dios (Spanish).
    VatEs,
    /// CEI (Italian).
    Cei,
    /// Portuguese (pending).
    Por,
}

impl Translation {
    pub fn code(&self) -> &'static str {
        match self {
            Translation::Wlc => "WLC",
            Translation::Lxx => "LXX",
            Translation::Vul => "VUL",
            Translation::Byz => "BYZ",
            Translation::Nab => "NAB",
            Translation::Syn => "SYN",
            Translation::Neo => "NEO",
            Translation::VatEs => "VAT_ES",
            Translation::Cei => "CEI",
            Translation::Por => "POR",
        }
    }

    /// The versification tradition this translation's sources are numbered
    /// in. Modern translations follow MT numbering.
    pub fn tradition(&self) -> Tradition {
        match self {
            Translation::Wlc => Tradition::Mt,
            Translation::Lxx => Tradition::Lxx,
            Translation::Vul => Tradition::Vul,
            Translation::Byz
            | Translation::Nab
            | Translation::Syn
            | Translation::Neo
            | Translation::VatEs
            | Translation::Cei
            | Translation::Por => Tradition::Mt,
        }
    }

    /// Selects the translation code for Greek text by testament section.
    ///
    /// Greek straddles two traditions: Old Testament chapters carry the
    /// Septuagint, New Testament chapters the Byzantine text. Both were
    /// historically stored under one flat "greek" key.
    pub fn greek_for(testament: &str) -> Translation {
        if testament.contains("Novum") || testament == "NT" {
            Translation::Byz
        } else {
            Translation::Lxx
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Translation {
    type Error = CanonError;
    fn try_from(code: &str) -> Result<Self> {
        match code {
            "WLC" => Ok(Translation::Wlc),
            "LXX" => Ok(Translation::Lxx),
            "VUL" => Ok(Translation::Vul),
            "BYZ" => Ok(Translation::Byz),
            "NAB" => Ok(Translation::Nab),
            "SYN" => Ok(Translation::Syn),
            "NEO" => Ok(Translation::Neo),
            "VAT_ES" => Ok(Translation::VatEs),
            "CEI" => Ok(Translation::Cei),
            "POR" => Ok(Translation::Por),
            _ => Err(CanonError::UnknownCode(code.to_string())),
        }
    }
}

/// A persisted chapter record, one JSON file per (book, sequence).
///
/// `sequence` is the internal MT-based ordinal, extended at the tail for
/// tradition-only content (e.g. sequence 151 for the Greek-only psalm).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRecord {
    #[serde(rename = "_schema_version")]
    pub schema_version: String,
    pub chapter_id: String,
    pub book_key: String,
    pub sequence: u32,
    /// Chapter number each tradition uses for this content. An absent
    /// entry means that tradition lacks this chapter entirely.
    pub chapter_in: BTreeMap<Tradition, u32>,
    #[serde(default)]
    pub testament: String,
    #[serde(default)]
    pub section: String,
    /// Explicit subset of traditions the chapter exists in. Absent means
    /// present in all three.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists_in: Option<Vec<Tradition>>,
    #[serde(default)]
    pub verses: BTreeMap<u32, VerseRecord>,
}

impl ChapterRecord {
    /// Builds the canonical record id, e.g. `RUTH_003`.
    pub fn chapter_id_for(book_key: &str, sequence: u32) -> String {
        format!("{}_{:03}", book_key, sequence)
    }
}

/// A single verse inside a chapter record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseRecord {
    pub seq: u32,
    /// Verse number per tradition. Identity today; reserved for future
    /// splits (Psalm superscriptions, the Daniel 3 insertion).
    #[serde(default)]
    pub v_in: BTreeMap<Tradition, u32>,
    /// Translation code to verse text.
    #[serde(default)]
    pub text: BTreeMap<Translation, String>,
}
