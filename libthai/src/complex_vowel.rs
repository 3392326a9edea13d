//! Discontinuous vowel detection.
//!
//! Many Thai vowels are written as several glyphs around the consonant
//! (`เ-ีย`, `เ-ือ`, `-ัว`). A glyph that is part of such a pattern is
//! pronounced as the whole pattern, not on its own.
//!
//! Detection is by containment: a pattern matches a glyph when the glyph is
//! one of its constituents and every constituent occurs somewhere in the
//! word. When more than one pattern qualifies, patterns whose constituents
//! appear in written order are preferred, then the pattern with the most
//! constituents. A lone candidate is accepted on containment alone, so a
//! word that happens to contain the right glyphs in the wrong places can
//! still match.

use libthai_core::{utils, KnowledgeBase, Vowel, VowelLength};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A glyph recognised as part of a complex vowel pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexVowelMatch {
    /// Pattern key, e.g. `เ-ีย`.
    pub pattern: String,
    pub name: String,
    /// The glyph is the pattern's first written constituent.
    pub is_first_constituent: bool,
    /// Romanization of the whole pattern.
    pub romanization: String,
    pub length: VowelLength,
}

impl ComplexVowelMatch {
    fn new(pattern: &Vowel, glyph: char) -> Self {
        Self {
            pattern: pattern.key.clone(),
            name: pattern.name.clone(),
            is_first_constituent: pattern.constituents().first() == Some(&glyph),
            romanization: pattern.romanization.clone(),
            length: pattern.length,
        }
    }
}

/// Find the complex vowel pattern `glyph` belongs to within `word`.
pub fn detect_complex_vowel(kb: &KnowledgeBase, glyph: char, word: &str) -> Option<ComplexVowelMatch> {
    let glyphs = utils::glyphs(word);
    if !glyphs.contains(&glyph) {
        return None;
    }
    let candidates: Vec<&Vowel> = kb
        .complex_vowel_patterns()
        .filter(|p| p.contains(glyph))
        .filter(|p| p.constituents().iter().all(|c| glyphs.contains(c)))
        .collect();

    let chosen = match candidates.as_slice() {
        [] => return None,
        [only] => *only,
        several => most_specific(several, &glyphs),
    };
    trace!(%glyph, word, pattern = %chosen.key, candidates = candidates.len(), "complex vowel match");
    Some(ComplexVowelMatch::new(chosen, glyph))
}

/// Every glyph of `word` that belongs to some complex pattern, with its match.
pub fn complex_vowel_glyphs(kb: &KnowledgeBase, word: &str) -> Vec<(usize, char, ComplexVowelMatch)> {
    word.chars()
        .enumerate()
        .filter_map(|(i, c)| detect_complex_vowel(kb, c, word).map(|m| (i, c, m)))
        .collect()
}

fn most_specific<'kb>(candidates: &[&'kb Vowel], glyphs: &[char]) -> &'kb Vowel {
    let ordered: Vec<&Vowel> = candidates
        .iter()
        .copied()
        .filter(|p| in_written_order(p.constituents(), glyphs))
        .collect();
    let pool: &[&Vowel] = if ordered.is_empty() { candidates } else { &ordered };

    let mut best = pool[0];
    for &p in &pool[1..] {
        if p.constituents().len() > best.constituents().len() {
            best = p;
        }
    }
    best
}

/// Constituents occur as a subsequence of the word.
fn in_written_order(constituents: &[char], glyphs: &[char]) -> bool {
    let mut rest = glyphs.iter();
    constituents.iter().all(|c| rest.any(|g| g == c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use libthai_core::standard;

    #[test]
    fn subsequence_check() {
        assert!(in_written_order(&['เ', 'ี', 'ย'], &['เ', 'ม', 'ี', 'ย']));
        assert!(!in_written_order(&['เ', 'ี', 'ย'], &['ย', 'ม', 'ี', 'เ']));
        assert!(in_written_order(&[], &['ก']));
    }

    #[test]
    fn longest_pattern_wins_among_ordered_candidates() {
        // เกาะ contains both เ-า and เ-าะ in written order.
        let kb = standard::shared();
        let m = detect_complex_vowel(&kb, 'า', "เกาะ").unwrap();
        assert_eq!(m.pattern, "เ-าะ");
        assert_eq!(m.length, VowelLength::Short);
        assert!(!m.is_first_constituent);
    }

    #[test]
    fn shorter_pattern_when_longer_is_incomplete() {
        let kb = standard::shared();
        let m = detect_complex_vowel(&kb, 'า', "เขา").unwrap();
        assert_eq!(m.pattern, "เ-า");
        assert_eq!(m.romanization, "ao");
    }

    #[test]
    fn leading_glyph_is_first_constituent() {
        let kb = standard::shared();
        let m = detect_complex_vowel(&kb, 'เ', "เมีย").unwrap();
        assert_eq!(m.pattern, "เ-ีย");
        assert!(m.is_first_constituent);
    }

    #[test]
    fn glyph_absent_from_word_never_matches() {
        let kb = standard::shared();
        assert_eq!(detect_complex_vowel(&kb, 'ี', "เมือ"), None);
    }

    #[test]
    fn lists_all_pattern_glyphs_of_a_word() {
        let kb = standard::shared();
        let found: Vec<char> = complex_vowel_glyphs(&kb, "เรือ").into_iter().map(|(_, c, _)| c).collect();
        assert_eq!(found, ['เ', 'ื', 'อ']);
    }
}
