//! Glyph classification.
//!
//! Every glyph falls into exactly one category. The lookup order is fixed:
//! tone marks first, then consonants, then the vowel probes. Several vowel
//! glyphs also appear as trailing parts of complex patterns, and tone marks
//! must never be counted as vowels, so the order matters.

use libthai_core::{Consonant, KnowledgeBase, ToneMark, Vowel};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterKind {
    ToneMark,
    Consonant,
    Vowel,
    Unknown,
}

impl CharacterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CharacterKind::ToneMark => "tone mark",
            CharacterKind::Consonant => "consonant",
            CharacterKind::Vowel => "vowel",
            CharacterKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification together with the record that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified<'kb> {
    ToneMark(&'kb ToneMark),
    Consonant(&'kb Consonant),
    Vowel(&'kb Vowel),
    Unknown,
}

impl Classified<'_> {
    pub fn kind(&self) -> CharacterKind {
        match self {
            Classified::ToneMark(_) => CharacterKind::ToneMark,
            Classified::Consonant(_) => CharacterKind::Consonant,
            Classified::Vowel(_) => CharacterKind::Vowel,
            Classified::Unknown => CharacterKind::Unknown,
        }
    }
}

/// Classify a glyph and return the matching record.
pub fn classify_detailed(kb: &KnowledgeBase, glyph: char) -> Classified<'_> {
    if let Some(mark) = kb.tone_mark(glyph) {
        return Classified::ToneMark(mark);
    }
    if let Some(consonant) = kb.consonant(glyph) {
        return Classified::Consonant(consonant);
    }
    if let Some(vowel) = kb.vowel(glyph) {
        return Classified::Vowel(vowel);
    }
    Classified::Unknown
}

/// Classify a single glyph. Never fails: unregistered glyphs are `Unknown`.
pub fn classify(kb: &KnowledgeBase, glyph: char) -> CharacterKind {
    classify_detailed(kb, glyph).kind()
}

/// Classify every glyph of `text` in order.
pub fn classify_text(kb: &KnowledgeBase, text: &str) -> Vec<(char, CharacterKind)> {
    text.chars().map(|c| (c, classify(kb, c))).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use libthai_core::standard;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn glyphs_outside_thai_block_are_unknown(c in any::<char>().prop_filter("non-Thai", |c| !('\u{0E00}'..='\u{0E7F}').contains(c) && *c != '-')) {
            let kb = standard::shared();
            prop_assert_eq!(classify(&kb, c), CharacterKind::Unknown);
        }

        #[test]
        fn classification_is_total(c in any::<char>()) {
            let kb = standard::shared();
            let kind = classify(&kb, c);
            prop_assert_eq!(kind, classify_detailed(&kb, c).kind());
        }
    }
}
