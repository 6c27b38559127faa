use std::path::Path;

use canon_builder::Translation;
use canon_builder::canon::format::{SourceInput, SourceKind};
use canon_builder::canon::sources::{base36_chapter_files, resolve};
use canon_builder::canon::types::books::BookConfig;

#[test]
fn base36_names_advance_one_per_chapter() {
    let files = base36_chapter_files("FT", 3);
    assert_eq!(files[&1], "__PFT.HTM");
    assert_eq!(files[&2], "__PFU.HTM");
    assert_eq!(files[&3], "__PFV.HTM");
}

#[test]
fn base36_single_digit_start_rolls_into_two_digits() {
    let files = base36_chapter_files("3", 40);
    assert_eq!(files[&1], "__P3.HTM");
    assert_eq!(files[&2], "__P4.HTM");
    // Offset 35 is the last single-digit name, offset 36 is "10".
    assert_eq!(files[&33], "__PZ.HTM");
    assert_eq!(files[&34], "__P10.HTM");
    assert_eq!(files[&35], "__P11.HTM");
}

#[test]
fn base36_carries_across_the_second_digit() {
    let files = base36_chapter_files("6Q", 12);
    assert_eq!(files[&1], "__P6Q.HTM");
    // Q is digit 26; ten chapters later the first digit bumps.
    assert_eq!(files[&11], "__P70.HTM");
    assert_eq!(files[&12], "__P71.HTM");
}

#[test]
fn resolve_covers_every_configured_family() {
    let book = BookConfig::find("RUTH").unwrap();
    let resolved = resolve(Path::new("/corpus"), book);

    let find = |t: Translation| {
        resolved
            .iter()
            .find(|r| r.translation == t)
            .unwrap_or_else(|| panic!("missing {}", t))
    };

    match (&find(Translation::Wlc).kind, &find(Translation::Wlc).input) {
        (SourceKind::Tagged, SourceInput::File(path)) => {
            assert_eq!(path, Path::new("/corpus/hebrew/wlc/Ruth.xml"));
        }
        other => panic!("unexpected WLC source: {:?}", other),
    }

    match &find(Translation::Lxx).input {
        SourceInput::File(path) => {
            assert_eq!(path, Path::new("/corpus/greek/septuagint/08.Rut.txt"));
        }
        other => panic!("unexpected LXX source: {:?}", other),
    }

    match &find(Translation::Vul).input {
        SourceInput::File(path) => {
            assert_eq!(path, Path::new("/corpus/latin/clementine/src/utf8/Rt.lat"));
        }
        other => panic!("unexpected VUL source: {:?}", other),
    }

    match &find(Translation::Nab).input {
        SourceInput::ChapterFiles(files) => {
            assert_eq!(files.len(), 4);
            assert_eq!(
                files[&1],
                Path::new("/corpus/english/nab-vatican/__P6Q.HTM")
            );
        }
        other => panic!("unexpected NAB source: {:?}", other),
    }
}

#[test]
fn unconfigured_typeset_families_are_absent_not_errors() {
    let book = BookConfig::find("ESTH").unwrap();
    let resolved = resolve(Path::new("/corpus"), book);
    assert!(
        !resolved
            .iter()
            .any(|r| matches!(r.kind, SourceKind::Typeset(_))),
        "no typeset start codes configured for this book"
    );
}
