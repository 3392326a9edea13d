//! Tests for glyph classification
//!
//! - tone marks win over consonant and vowel lookups
//! - consonants win over complex-vowel membership
//! - anything outside the knowledge base is Unknown

use libthai::{classify, classify_text, CharacterKind, KnowledgeBase, ValidationMode};
use proptest::prelude::*;

fn fixture() -> KnowledgeBase {
    KnowledgeBase::from_json_str(include_str!("data/fixture.json"), ValidationMode::Strict).unwrap()
}

#[test]
fn tone_mark_wins_over_vowel() {
    let kb = fixture();
    // ่ is also registered as the vowel key "-่".
    assert!(kb.vowel('่').is_some());
    assert_eq!(classify(&kb, '่'), CharacterKind::ToneMark);
}

#[test]
fn tone_mark_wins_over_consonant() {
    let kb = fixture();
    assert!(kb.consonant('๋').is_some());
    assert_eq!(classify(&kb, '๋'), CharacterKind::ToneMark);
}

#[test]
fn consonant_wins_over_pattern_membership() {
    let kb = fixture();
    assert_eq!(kb.vowel('ย').map(|v| v.key.as_str()), Some("เ-ีย"));
    assert_eq!(classify(&kb, 'ย'), CharacterKind::Consonant);
}

#[test]
fn vowel_probes_reach_placeholder_and_pattern_forms() {
    let kb = fixture();
    assert_eq!(classify(&kb, 'า'), CharacterKind::Vowel);
    assert_eq!(classify(&kb, 'เ'), CharacterKind::Vowel);
    assert_eq!(classify(&kb, 'ะ'), CharacterKind::Vowel);
}

#[test]
fn latin_letter_is_unknown() {
    let kb = fixture();
    assert_eq!(classify(&kb, 'a'), CharacterKind::Unknown);
}

#[test]
fn unregistered_thai_glyph_is_unknown() {
    let kb = fixture();
    // ฮ exists in the script but not in the fixture.
    assert_eq!(classify(&kb, 'ฮ'), CharacterKind::Unknown);
    assert_eq!(classify(&kb, '-'), CharacterKind::Unknown);
}

#[test]
fn text_is_classified_glyph_by_glyph() {
    let kb = fixture();
    let out = classify_text(&kb, "ก่าz");
    assert_eq!(
        out,
        vec![
            ('ก', CharacterKind::Consonant),
            ('่', CharacterKind::ToneMark),
            ('า', CharacterKind::Vowel),
            ('z', CharacterKind::Unknown),
        ]
    );
}

proptest! {
    #[test]
    fn glyphs_missing_from_every_table_are_unknown(c in any::<char>()) {
        let kb = fixture();
        prop_assume!(kb.tone_mark(c).is_none() && kb.consonant(c).is_none() && kb.vowel(c).is_none());
        prop_assert_eq!(classify(&kb, c), CharacterKind::Unknown);
    }
}
