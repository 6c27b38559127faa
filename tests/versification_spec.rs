use canon_builder::Tradition;
use canon_builder::canon::versification::{map_chapter, map_verse};

#[test]
fn psalms_mt_numbering_is_the_sequence() {
    for seq in 1..=150 {
        let mapping = map_chapter("PSAL", seq);
        assert_eq!(
            mapping.chapter_in.get(&Tradition::Mt),
            Some(&seq),
            "MT number for psalm {}",
            seq
        );
        assert_eq!(mapping.exists_in, None, "psalm {} should be universal", seq);
    }
}

#[test]
fn psalms_aligned_ranges_match_all_traditions() {
    for seq in (1..=8).chain(148..=150) {
        let mapping = map_chapter("PSAL", seq);
        assert_eq!(mapping.chapter_in.get(&Tradition::Vul), Some(&seq));
        assert_eq!(mapping.chapter_in.get(&Tradition::Lxx), Some(&seq));
    }
}

#[test]
fn psalms_offset_ranges_shift_by_one() {
    for seq in (11..=113).chain(117..=146) {
        let mapping = map_chapter("PSAL", seq);
        let expected = seq - 1;
        assert_eq!(
            mapping.chapter_in.get(&Tradition::Vul),
            Some(&expected),
            "VUL number for psalm {}",
            seq
        );
    }
}

#[test]
fn psalms_combined_chapters_share_a_vulgate_number() {
    for (seq, vul) in [(9, 9), (10, 9), (114, 113), (115, 113)] {
        let mapping = map_chapter("PSAL", seq);
        assert_eq!(mapping.chapter_in.get(&Tradition::Vul), Some(&vul));
    }
}

#[test]
fn psalms_split_chapters_use_the_primary_reference() {
    assert_eq!(
        map_chapter("PSAL", 116).chapter_in.get(&Tradition::Vul),
        Some(&114)
    );
    assert_eq!(
        map_chapter("PSAL", 147).chapter_in.get(&Tradition::Vul),
        Some(&146)
    );
}

#[test]
fn psalms_lxx_follows_vulgate_numbering() {
    for seq in 1..=150 {
        let mapping = map_chapter("PSAL", seq);
        assert_eq!(
            mapping.chapter_in.get(&Tradition::Lxx),
            mapping.chapter_in.get(&Tradition::Vul),
            "LXX vs VUL for psalm {}",
            seq
        );
    }
}

#[test]
fn psalm_151_exists_only_in_greek() {
    let mapping = map_chapter("PSAL", 151);
    assert_eq!(mapping.chapter_in.get(&Tradition::Mt), None);
    assert_eq!(mapping.chapter_in.get(&Tradition::Vul), None);
    assert_eq!(mapping.chapter_in.get(&Tradition::Lxx), Some(&151));
    assert_eq!(mapping.exists_in, Some(vec![Tradition::Lxx]));
}

#[test]
fn daniel_tail_is_a_greek_addition() {
    for seq in [13, 14] {
        let mapping = map_chapter("DAN", seq);
        assert_eq!(mapping.chapter_in.get(&Tradition::Mt), None);
        assert_eq!(mapping.chapter_in.get(&Tradition::Vul), Some(&seq));
        assert_eq!(mapping.chapter_in.get(&Tradition::Lxx), Some(&seq));
        assert_eq!(
            mapping.exists_in,
            Some(vec![Tradition::Vul, Tradition::Lxx])
        );
    }
    // The Hebrew portion stays universal.
    let mapping = map_chapter("DAN", 12);
    assert_eq!(mapping.chapter_in.get(&Tradition::Mt), Some(&12));
    assert_eq!(mapping.exists_in, None);
}

#[test]
fn esther_tail_is_a_greek_addition() {
    for seq in 11..=16 {
        let mapping = map_chapter("ESTH", seq);
        assert_eq!(mapping.chapter_in.get(&Tradition::Mt), None);
        assert_eq!(
            mapping.exists_in,
            Some(vec![Tradition::Vul, Tradition::Lxx])
        );
    }
    assert_eq!(map_chapter("ESTH", 10).exists_in, None);
}

#[test]
fn unknown_books_default_to_identity() {
    let mapping = map_chapter("GENE", 37);
    for tradition in Tradition::ALL {
        assert_eq!(mapping.chapter_in.get(&tradition), Some(&37));
    }
    assert_eq!(mapping.exists_in, None);

    // Deliberately not an error: a book with no exceptions needs no entry.
    let mapping = map_chapter("NOBOOK", 3);
    assert_eq!(mapping.chapter_in.get(&Tradition::Mt), Some(&3));
}

#[test]
fn verse_mapping_is_identity_everywhere() {
    for (book, seq, verse) in [("PSAL", 9, 15), ("DAN", 3, 24), ("RUTH", 1, 1)] {
        let v_in = map_verse(book, seq, verse);
        for tradition in Tradition::ALL {
            assert_eq!(v_in.get(&tradition), Some(&verse));
        }
    }
}
