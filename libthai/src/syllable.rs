//! Syllable structure analysis.
//!
//! Reconstructs the parts of one written syllable: the main (first)
//! consonant and its class, the final (last) consonant, the vowel and
//! tone-mark glyphs, vowel length and syllable weight.
//!
//! Weight comes only from how the syllable ends: no coda or a sonorant coda
//! is live, an obstruent coda is dead. A lone consonant is the main
//! consonant and the final consonant at once, but it is not a coda.

use libthai_core::{utils, ConsonantClass, FinalSoundType, KnowledgeBase, SyllableWeight, VowelLength};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{classify_detailed, Classified};
use crate::complex_vowel::{detect_complex_vowel, ComplexVowelMatch};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyllableStructure {
    pub glyphs: Vec<char>,
    pub main_consonant: Option<char>,
    /// Last consonant glyph; equals `main_consonant` for one-consonant syllables.
    pub final_consonant: Option<char>,
    /// Absent when the syllable has no consonant or its record has no class.
    pub consonant_class: Option<ConsonantClass>,
    /// The final consonant sits after the main consonant.
    pub has_coda: bool,
    /// Phonetic type of the coda, if any and if listed.
    pub final_sound_type: Option<FinalSoundType>,
    pub vowels: Vec<char>,
    pub tone_marks: Vec<char>,
    pub vowel_length: VowelLength,
    pub syllable_weight: SyllableWeight,
    pub complex_vowel: Option<ComplexVowelMatch>,
}

impl SyllableStructure {
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// First tone mark, the one that drives tone resolution.
    pub fn tone_mark(&self) -> Option<char> {
        self.tone_marks.first().copied()
    }
}

/// Analyze a syllable given as text.
pub fn analyze_syllable(kb: &KnowledgeBase, syllable: &str) -> SyllableStructure {
    analyze_glyphs(kb, &utils::glyphs(syllable))
}

/// Analyze a syllable given as an ordered glyph sequence.
pub fn analyze_glyphs(kb: &KnowledgeBase, glyphs: &[char]) -> SyllableStructure {
    if glyphs.is_empty() {
        return SyllableStructure::default();
    }
    let classified: Vec<Classified<'_>> = glyphs.iter().map(|&g| classify_detailed(kb, g)).collect();

    let main_idx = classified.iter().position(|c| matches!(c, Classified::Consonant(_)));
    let final_idx = classified.iter().rposition(|c| matches!(c, Classified::Consonant(_)));

    let consonant_class = main_idx.and_then(|i| match classified[i] {
        Classified::Consonant(c) => c.class,
        _ => None,
    });

    let has_coda = matches!((main_idx, final_idx), (Some(m), Some(f)) if f > m);
    let final_consonant = final_idx.map(|i| glyphs[i]);
    let final_sound_type = if has_coda {
        final_consonant.and_then(|c| kb.final_sound_type(c))
    } else {
        None
    };

    let syllable_weight = match (has_coda, final_sound_type) {
        (false, _) => SyllableWeight::Live,
        (true, Some(FinalSoundType::Sonorant)) => SyllableWeight::Live,
        (true, Some(FinalSoundType::Obstruent)) => SyllableWeight::Dead,
        (true, None) => {
            debug!(coda = ?final_consonant, "coda is in neither final table; treating syllable as live");
            SyllableWeight::Live
        }
    };

    let mut vowels = Vec::new();
    let mut tone_marks = Vec::new();
    for (&glyph, class) in glyphs.iter().zip(&classified) {
        match class {
            Classified::Vowel(_) => vowels.push(glyph),
            Classified::ToneMark(_) => tone_marks.push(glyph),
            Classified::Consonant(_) | Classified::Unknown => {}
        }
    }
    if tone_marks.len() > 1 {
        debug!(?tone_marks, "several tone marks in one syllable; the first one decides the tone");
    }

    let word: String = glyphs.iter().collect();
    let complex_vowel = vowels.iter().find_map(|&v| detect_complex_vowel(kb, v, &word));

    let vowel_length = match &complex_vowel {
        Some(m) => m.length,
        None if vowels.iter().any(|&v| kb.vowel(v).is_some_and(|r| r.is_long())) => VowelLength::Long,
        None => VowelLength::Short,
    };

    SyllableStructure {
        glyphs: glyphs.to_vec(),
        main_consonant: main_idx.map(|i| glyphs[i]),
        final_consonant,
        consonant_class,
        has_coda,
        final_sound_type,
        vowels,
        tone_marks,
        vowel_length,
        syllable_weight,
        complex_vowel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libthai_core::standard;

    #[test]
    fn empty_syllable_is_all_default() {
        let kb = standard::shared();
        let s = analyze_syllable(&kb, "");
        assert_eq!(s, SyllableStructure::default());
        assert_eq!(s.syllable_weight, SyllableWeight::Live);
        assert_eq!(s.vowel_length, VowelLength::Short);
    }

    #[test]
    fn open_syllable_with_long_vowel() {
        let kb = standard::shared();
        let s = analyze_syllable(&kb, "กา");
        assert_eq!(s.main_consonant, Some('ก'));
        assert_eq!(s.final_consonant, Some('ก'));
        assert!(!s.has_coda);
        assert_eq!(s.consonant_class, Some(ConsonantClass::Mid));
        assert_eq!(s.vowels, ['า']);
        assert_eq!(s.vowel_length, VowelLength::Long);
        assert_eq!(s.syllable_weight, SyllableWeight::Live);
    }

    #[test]
    fn stop_coda_makes_dead_syllable() {
        let kb = standard::shared();
        let s = analyze_syllable(&kb, "กัด");
        assert_eq!(s.final_consonant, Some('ด'));
        assert_eq!(s.final_sound_type, Some(FinalSoundType::Obstruent));
        assert_eq!(s.syllable_weight, SyllableWeight::Dead);
        assert_eq!(s.vowel_length, VowelLength::Short);
    }

    #[test]
    fn complex_vowel_decides_length() {
        let kb = standard::shared();
        let s = analyze_syllable(&kb, "เกาะ");
        assert_eq!(s.complex_vowel.as_ref().map(|m| m.pattern.as_str()), Some("เ-าะ"));
        assert_eq!(s.vowel_length, VowelLength::Short);

        let s = analyze_syllable(&kb, "เมีย");
        assert_eq!(s.vowel_length, VowelLength::Long);
        assert_eq!(s.final_consonant, Some('ย'));
        assert_eq!(s.syllable_weight, SyllableWeight::Live);
    }

    #[test]
    fn tone_marks_are_collected_in_order() {
        let kb = standard::shared();
        let s = analyze_syllable(&kb, "ไม้");
        assert_eq!(s.tone_marks, ['\u{0E49}']);
        assert_eq!(s.vowels, ['ไ']);
        assert_eq!(s.main_consonant, Some('ม'));
        assert_eq!(s.consonant_class, Some(ConsonantClass::Low));
    }

    #[test]
    fn unknown_glyphs_are_ignored() {
        let kb = standard::shared();
        let s = analyze_syllable(&kb, "abc");
        assert_eq!(s.main_consonant, None);
        assert_eq!(s.consonant_class, None);
        assert!(s.vowels.is_empty());
        assert_eq!(s.glyphs.len(), 3);
    }

    #[test]
    fn unlisted_coda_is_live() {
        let kb = standard::shared();
        // ห has no final sound and is in neither final table.
        let s = analyze_syllable(&kb, "กห");
        assert!(s.has_coda);
        assert_eq!(s.final_sound_type, None);
        assert_eq!(s.syllable_weight, SyllableWeight::Live);
    }
}
