//! # canon-builder
//!
//! Builds a single canonical, multi-translation verse store for a
//! scriptural text corpus: parses half a dozen incompatible source
//! encodings into one normalized shape, reconciles chapter numbering
//! across textual traditions, and merges everything idempotently into
//! persisted per-chapter records.
pub mod canon;

// Re-export the main types for convenience
pub use canon::{
    CanonError, Result, Store,
    format::{ParsedBook, SourceInput, SourceKind},
    merge::{MergeReport, merge_book},
    migrate::{MigrationMode, MigrationReport, migrate_store},
    types::{
        books::BookConfig,
        models::{ChapterRecord, Tradition, Translation, VerseRecord},
    },
    versification::ChapterMapping,
};
