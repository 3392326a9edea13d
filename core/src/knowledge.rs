//! Typed knowledge base for Thai script analysis.
//!
//! The knowledge base holds every linguistic fact the engine consults:
//! consonants with their class and sounds, vowels (including discontinuous
//! patterns written around the consonant slot), tone marks with their effect
//! tables, the default tone table and the final-consonant sound tables.
//!
//! It is built once by the loader in `schema` and never mutated afterwards;
//! every accessor is a read-only, total lookup.
//!
//! Public API:
//! - `KnowledgeBase` - frozen fact store with the four glyph lookups
//! - `Consonant`, `Vowel`, `ToneMark` - typed records
//! - `ConsonantClass`, `Tone`, `SyllableWeight`, `VowelLength`,
//!   `VowelPosition`, `FinalSoundType` - closed vocabularies
//! - `ToneEffect`, `ToneEffects`, `DefaultToneTable` - rule tables

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Consonant class, a lexical property of every consonant letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsonantClass {
    Low,
    Mid,
    High,
}

impl ConsonantClass {
    pub const ALL: [ConsonantClass; 3] = [ConsonantClass::Low, ConsonantClass::Mid, ConsonantClass::High];

    pub fn as_str(self) -> &'static str {
        match self {
            ConsonantClass::Low => "low",
            ConsonantClass::Mid => "mid",
            ConsonantClass::High => "high",
        }
    }
}

impl fmt::Display for ConsonantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConsonantClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ConsonantClass::Low),
            "mid" | "middle" => Ok(ConsonantClass::Mid),
            "high" => Ok(ConsonantClass::High),
            other => Err(format!("unknown consonant class {other:?}")),
        }
    }
}

/// The five lexical tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Mid,
    Low,
    Falling,
    High,
    Rising,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Mid => "mid",
            Tone::Low => "low",
            Tone::Falling => "falling",
            Tone::High => "high",
            Tone::Rising => "rising",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live syllables end openly or in a sonorant; dead ones end in a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyllableWeight {
    #[default]
    Live,
    Dead,
}

impl SyllableWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            SyllableWeight::Live => "live",
            SyllableWeight::Dead => "dead",
        }
    }
}

impl fmt::Display for SyllableWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SyllableWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(SyllableWeight::Live),
            "dead" => Ok(SyllableWeight::Dead),
            other => Err(format!("unknown syllable weight {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VowelLength {
    #[default]
    Short,
    Long,
}

impl fmt::Display for VowelLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VowelLength::Short => "short",
            VowelLength::Long => "long",
        })
    }
}

/// Where a vowel is written relative to its consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VowelPosition {
    Before,
    After,
    Above,
    Below,
    Surrounding,
}

/// Articulatory type of a final consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalSoundType {
    /// Nasals and approximants; airflow continues.
    Sonorant,
    /// Stops and fricatives; airflow is cut off.
    Obstruent,
}

impl fmt::Display for FinalSoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FinalSoundType::Sonorant => "sonorant",
            FinalSoundType::Obstruent => "obstruent",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consonant {
    pub character: char,
    /// Absent only when a lenient load accepted a record without a class.
    pub class: Option<ConsonantClass>,
    pub initial_sound: String,
    pub final_sound: Option<String>,
    pub name: String,
}

/// A vowel record. Keys either name a literal glyph or a pattern in which
/// the placeholder stands for the consonant slot (e.g. `เ-ีย`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vowel {
    pub key: String,
    pub position: VowelPosition,
    pub romanization: String,
    pub name: String,
    pub length: VowelLength,
    /// Key glyphs in written order, placeholder removed.
    constituents: Vec<char>,
    /// Number of constituents written before the placeholder.
    leading: usize,
    has_placeholder: bool,
}

impl Vowel {
    pub(crate) fn new(
        key: String,
        placeholder: char,
        position: VowelPosition,
        romanization: String,
        name: String,
        length: VowelLength,
    ) -> Self {
        let has_placeholder = key.contains(placeholder);
        let leading = key.chars().take_while(|&c| c != placeholder).count();
        let leading = if has_placeholder { leading } else { 0 };
        let constituents = key.chars().filter(|&c| c != placeholder).collect();
        Self {
            key,
            position,
            romanization,
            name,
            length,
            constituents,
            leading,
            has_placeholder,
        }
    }

    /// Glyphs making up this vowel, in written order.
    pub fn constituents(&self) -> &[char] {
        &self.constituents
    }

    /// Glyphs written before the consonant slot.
    pub fn leading_constituents(&self) -> &[char] {
        &self.constituents[..self.leading]
    }

    /// Glyphs written after (or above/below) the consonant slot.
    pub fn trailing_constituents(&self) -> &[char] {
        &self.constituents[self.leading..]
    }

    pub fn contains(&self, glyph: char) -> bool {
        self.constituents.contains(&glyph)
    }

    /// A discontinuous pattern: placeholder-bearing key with two or more glyphs.
    pub fn is_complex(&self) -> bool {
        self.has_placeholder && self.constituents.len() >= 2
    }

    pub fn is_long(&self) -> bool {
        self.length == VowelLength::Long
    }
}

/// Effect of a tone mark for one consonant class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneEffect {
    /// The class alone determines the tone.
    Fixed(Tone),
    /// The tone also depends on syllable weight.
    ByWeight { live: Tone, dead: Tone },
}

impl ToneEffect {
    pub fn tone(self, weight: SyllableWeight) -> Tone {
        match self {
            ToneEffect::Fixed(tone) => tone,
            ToneEffect::ByWeight { live, dead } => match weight {
                SyllableWeight::Live => live,
                SyllableWeight::Dead => dead,
            },
        }
    }

    pub fn depends_on_weight(self) -> bool {
        matches!(self, ToneEffect::ByWeight { .. })
    }
}

/// Per-class effect table of a tone mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneEffects {
    pub low: Option<ToneEffect>,
    pub mid: Option<ToneEffect>,
    pub high: Option<ToneEffect>,
}

impl ToneEffects {
    pub fn get(&self, class: ConsonantClass) -> Option<ToneEffect> {
        match class {
            ConsonantClass::Low => self.low,
            ConsonantClass::Mid => self.mid,
            ConsonantClass::High => self.high,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneMark {
    pub character: char,
    pub name: String,
    pub effects: ToneEffects,
}

impl ToneMark {
    pub fn effect(&self, class: ConsonantClass) -> Option<ToneEffect> {
        self.effects.get(class)
    }
}

/// Tone of an unmarked syllable by consonant class and syllable weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultToneTable {
    entries: AHashMap<(ConsonantClass, SyllableWeight), Tone>,
}

impl DefaultToneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: ConsonantClass, weight: SyllableWeight, tone: Tone) {
        self.entries.insert((class, weight), tone);
    }

    pub fn get(&self, class: ConsonantClass, weight: SyllableWeight) -> Option<Tone> {
        self.entries.get(&(class, weight)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Frozen store of linguistic facts.
///
/// Construct through the loaders (`KnowledgeBase::from_json_str`,
/// `KnowledgeBase::load`, `KnowledgeBase::standard`, ...). There are no
/// write operations; share it across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub(crate) placeholder: char,
    pub(crate) consonants: AHashMap<char, Consonant>,
    pub(crate) consonant_order: Vec<char>,
    pub(crate) vowels: Vec<Vowel>,
    pub(crate) vowel_keys: AHashMap<String, usize>,
    /// `vowel` probes, precomputed at load time.
    pub(crate) literal_vowels: AHashMap<char, usize>,
    pub(crate) after_placeholder: AHashMap<char, usize>,
    pub(crate) before_placeholder: AHashMap<char, usize>,
    pub(crate) constituent_of: AHashMap<char, usize>,
    pub(crate) complex: Vec<usize>,
    pub(crate) tone_marks: AHashMap<char, ToneMark>,
    pub(crate) tone_mark_order: Vec<char>,
    pub(crate) default_tones: DefaultToneTable,
    pub(crate) sonorant_finals: AHashSet<char>,
    pub(crate) obstruent_finals: AHashSet<char>,
}

impl KnowledgeBase {
    /// The marker standing for the consonant slot in vowel keys.
    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    pub fn consonant(&self, glyph: char) -> Option<&Consonant> {
        self.consonants.get(&glyph)
    }

    /// Vowel lookup for a single glyph.
    ///
    /// Probes, in order: a literal key, `placeholder + glyph`,
    /// `glyph + placeholder`, and finally membership in any complex
    /// pattern (first pattern in knowledge-base order wins).
    pub fn vowel(&self, glyph: char) -> Option<&Vowel> {
        self.literal_vowels
            .get(&glyph)
            .or_else(|| self.after_placeholder.get(&glyph))
            .or_else(|| self.before_placeholder.get(&glyph))
            .or_else(|| self.constituent_of.get(&glyph))
            .map(|&idx| &self.vowels[idx])
    }

    /// Exact lookup by full vowel key (e.g. `"เ-ีย"`).
    pub fn vowel_by_key(&self, key: &str) -> Option<&Vowel> {
        self.vowel_keys.get(key).map(|&idx| &self.vowels[idx])
    }

    pub fn tone_mark(&self, glyph: char) -> Option<&ToneMark> {
        self.tone_marks.get(&glyph)
    }

    /// Discontinuous vowel patterns in knowledge-base order.
    pub fn complex_vowel_patterns(&self) -> impl Iterator<Item = &Vowel> + '_ {
        self.complex.iter().map(move |&idx| &self.vowels[idx])
    }

    /// Phonetic type of a glyph in final position, from the fixed tables.
    pub fn final_sound_type(&self, glyph: char) -> Option<FinalSoundType> {
        if self.sonorant_finals.contains(&glyph) {
            Some(FinalSoundType::Sonorant)
        } else if self.obstruent_finals.contains(&glyph) {
            Some(FinalSoundType::Obstruent)
        } else {
            None
        }
    }

    pub fn default_tone(&self, class: ConsonantClass, weight: SyllableWeight) -> Option<Tone> {
        self.default_tones.get(class, weight)
    }

    pub fn default_tones(&self) -> &DefaultToneTable {
        &self.default_tones
    }

    /// Consonants in the order they were declared.
    pub fn consonants(&self) -> impl Iterator<Item = &Consonant> + '_ {
        self.consonant_order.iter().filter_map(move |c| self.consonants.get(c))
    }

    pub fn vowels(&self) -> impl Iterator<Item = &Vowel> + '_ {
        self.vowels.iter()
    }

    pub fn tone_marks(&self) -> impl Iterator<Item = &ToneMark> + '_ {
        self.tone_mark_order.iter().filter_map(move |c| self.tone_marks.get(c))
    }

    pub fn consonant_count(&self) -> usize {
        self.consonants.len()
    }

    pub fn vowel_count(&self) -> usize {
        self.vowels.len()
    }

    pub fn tone_mark_count(&self) -> usize {
        self.tone_marks.len()
    }

    pub fn complex_vowel_count(&self) -> usize {
        self.complex.len()
    }
}
