use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use canon_builder::canon::format::{ParsedBook, colon_ref};
use canon_builder::canon::merge::merge_book;
use canon_builder::canon::types::books::BookConfig;
use canon_builder::canon::types::models::{
    ChapterRecord, SCHEMA_VERSION, Translation, VerseRecord,
};
use canon_builder::canon::versification;
use canon_builder::Store;

/// Creates a store with one book directory and opens it.
fn open_store(root: &Path, book: &str) -> Store {
    fs::create_dir_all(root.join(book)).expect("create book dir");
    Store::open(root).expect("open store")
}

/// Seeds an empty versioned chapter record, the way the external
/// book-initialization step would.
fn seed_chapter(store: &Store, book: &str, sequence: u32, verses: &[u32]) {
    let mapping = versification::map_chapter(book, sequence);
    let mut verse_map = BTreeMap::new();
    for &verse in verses {
        verse_map.insert(
            verse,
            VerseRecord {
                seq: verse,
                v_in: versification::map_verse(book, sequence, verse),
                text: BTreeMap::new(),
            },
        );
    }
    let record = ChapterRecord {
        schema_version: SCHEMA_VERSION.to_string(),
        chapter_id: ChapterRecord::chapter_id_for(book, sequence),
        book_key: book.to_string(),
        sequence,
        chapter_in: mapping.chapter_in,
        testament: "OT".to_string(),
        section: String::new(),
        exists_in: mapping.exists_in,
        verses: verse_map,
    };
    store.save_chapter(&record).expect("seed chapter");
}

fn backup_count(root: &Path) -> usize {
    let backups = root.parent().unwrap().join("backups");
    if !backups.is_dir() {
        return 0;
    }
    fs::read_dir(backups).unwrap().count()
}

const COLON_SOURCE: &str = "\
1:1 Verse one text
1:2 Verse two text
1:3 Verse three text
2:1 Verse four text
";

#[test]
fn colon_source_end_to_end_sets_vulgate_text() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    let store = open_store(&root, "RUTH");
    seed_chapter(&store, "RUTH", 1, &[1, 2, 3]);

    // Pre-existing text from another translation must survive the merge.
    let mut record = store.load_chapter("RUTH", 1).unwrap();
    record
        .verses
        .get_mut(&1)
        .unwrap()
        .text
        .insert(Translation::Wlc, "וַיְהִי׃".to_string());
    store.save_chapter(&record).unwrap();

    let source_path = dir.path().join("Rt.lat");
    fs::write(&source_path, COLON_SOURCE).unwrap();
    let parsed = colon_ref::parse(&source_path);

    let book = BookConfig::find("RUTH").unwrap();
    let report = merge_book(&store, book, 1..=1, &[(Translation::Vul, parsed)]).unwrap();

    assert_eq!(report.updated[&Translation::Vul], 3);
    assert_eq!(report.chapters_written, 1);

    let record = store.load_chapter("RUTH", 1).unwrap();
    assert_eq!(record.verses[&1].text[&Translation::Vul], "Verse one text");
    assert_eq!(record.verses[&2].text[&Translation::Vul], "Verse two text");
    assert_eq!(record.verses[&3].text[&Translation::Vul], "Verse three text");
    assert_eq!(
        record.verses[&1].text[&Translation::Wlc],
        "וַיְהִי׃",
        "other translations untouched"
    );
}

#[test]
fn merging_twice_changes_nothing_the_second_time() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    let store = open_store(&root, "RUTH");
    seed_chapter(&store, "RUTH", 1, &[1, 2]);
    seed_chapter(&store, "RUTH", 2, &[1]);

    let mut parsed = ParsedBook::new();
    parsed.entry(1).or_default().insert(1, "Prima".to_string());
    parsed.entry(1).or_default().insert(2, "Secunda".to_string());
    parsed.entry(2).or_default().insert(1, "Tertia".to_string());
    let sources = vec![(Translation::Vul, parsed)];

    let book = BookConfig::find("RUTH").unwrap();
    let first = merge_book(&store, book, 1..=2, &sources).unwrap();
    assert_eq!(first.total_updated(), 3);
    assert!(first.backup.is_some());

    let bytes_after_first: Vec<Vec<u8>> = (1..=2)
        .map(|seq| fs::read(store.chapter_path("RUTH", seq)).unwrap())
        .collect();

    let second = merge_book(&store, book, 1..=2, &sources).unwrap();
    assert_eq!(second.total_updated(), 0, "second run counts no changes");
    assert_eq!(second.chapters_written, 0);
    assert!(second.backup.is_none(), "no write, no backup");

    let bytes_after_second: Vec<Vec<u8>> = (1..=2)
        .map(|seq| fs::read(store.chapter_path("RUTH", seq)).unwrap())
        .collect();
    assert_eq!(bytes_after_first, bytes_after_second, "store bytes identical");
    assert_eq!(backup_count(&root), 1, "only the first run backed up");
}

#[test]
fn absent_source_reports_zero_for_that_translation_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    let store = open_store(&root, "RUTH");
    seed_chapter(&store, "RUTH", 1, &[1]);

    // Parsing a missing file degrades to an empty result, not an error.
    let missing = colon_ref::parse(&dir.path().join("no-such-file.lat"));
    assert!(missing.is_empty());

    let mut syn = ParsedBook::new();
    syn.entry(1).or_default().insert(1, "И было".to_string());

    let book = BookConfig::find("RUTH").unwrap();
    let report = merge_book(
        &store,
        book,
        1..=1,
        &[(Translation::Vul, missing), (Translation::Syn, syn)],
    )
    .unwrap();

    assert_eq!(report.updated[&Translation::Vul], 0);
    assert_eq!(report.updated[&Translation::Syn], 1);
    assert!(report.failed.is_empty());
}

#[test]
fn chapters_without_records_are_skipped_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    let store = open_store(&root, "RUTH");
    seed_chapter(&store, "RUTH", 1, &[1]);

    let mut parsed = ParsedBook::new();
    for chapter in 1..=3 {
        parsed.entry(chapter).or_default().insert(1, format!("Caput {}", chapter));
    }

    let book = BookConfig::find("RUTH").unwrap();
    let report = merge_book(&store, book, 1..=3, &[(Translation::Vul, parsed)]).unwrap();

    assert_eq!(report.missing, vec![2, 3]);
    assert_eq!(report.updated[&Translation::Vul], 1, "present chapter still merged");
}

#[test]
fn vulgate_numbering_is_mapped_onto_the_canonical_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    let store = open_store(&root, "PSAL");
    seed_chapter(&store, "PSAL", 11, &[1, 2]);

    // The source numbers this psalm 10, the Vulgate way; canonical
    // sequence 11 must pick it up.
    let mut vul = ParsedBook::new();
    vul.entry(10).or_default().insert(1, "In Domino confido".to_string());
    vul.entry(10).or_default().insert(2, "Quoniam ecce peccatores".to_string());

    let book = BookConfig::find("PSAL").unwrap();
    let report = merge_book(&store, book, 11..=11, &[(Translation::Vul, vul)]).unwrap();

    assert_eq!(report.updated[&Translation::Vul], 2);
    let record = store.load_chapter("PSAL", 11).unwrap();
    assert_eq!(record.verses[&1].text[&Translation::Vul], "In Domino confido");
}

#[test]
fn traditions_lacking_a_chapter_contribute_nothing_to_it() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    let store = open_store(&root, "PSAL");
    seed_chapter(&store, "PSAL", 151, &[1]);

    // Sequence 151 has no Vulgate chapter; a stray source entry for it
    // must not land. The Greek text does.
    let mut vul = ParsedBook::new();
    vul.entry(151).or_default().insert(1, "spurius".to_string());
    let mut lxx = ParsedBook::new();
    lxx.entry(151).or_default().insert(1, "Οὗτος ὁ ψαλμὸς".to_string());

    let book = BookConfig::find("PSAL").unwrap();
    let report = merge_book(
        &store,
        book,
        151..=151,
        &[(Translation::Vul, vul), (Translation::Lxx, lxx)],
    )
    .unwrap();

    assert_eq!(report.updated[&Translation::Vul], 0);
    assert_eq!(report.updated[&Translation::Lxx], 1);

    let record = store.load_chapter("PSAL", 151).unwrap();
    assert!(!record.verses[&1].text.contains_key(&Translation::Vul));
    assert_eq!(record.verses[&1].text[&Translation::Lxx], "Οὗτος ὁ ψαλμὸς");
}

#[test]
fn a_missing_book_directory_aborts_early() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("chapters");
    fs::create_dir_all(&root).unwrap();
    let store = Store::open(&root).unwrap();

    let book = BookConfig::find("RUTH").unwrap();
    let result = merge_book(&store, book, 1..=1, &[]);
    assert!(result.is_err(), "no book directory, nothing to merge into");
}
