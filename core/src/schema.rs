//! Serialized knowledge-base schema and the loader that validates it.
//!
//! `RawKnowledgeBase` is the on-disk shape shared by the JSON, TOML and
//! bincode forms. Nothing outside this module sees it after loading:
//! `KnowledgeBase::from_raw` checks every record, normalizes optional
//! fields and precomputes the glyph indexes used by the lookups.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{KnowledgeBaseError, Result};
use crate::knowledge::{
    Consonant, ConsonantClass, DefaultToneTable, KnowledgeBase, SyllableWeight, Tone, ToneEffects,
    ToneMark, Vowel, VowelLength, VowelPosition,
};

pub const DEFAULT_PLACEHOLDER: &str = "-";

/// How strictly `KnowledgeBase::from_raw` treats incomplete records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject consonants without a class.
    #[default]
    Strict,
    /// Keep them with an absent class and log a warning.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConsonant {
    pub character: String,
    #[serde(default)]
    pub class: Option<ConsonantClass>,
    #[serde(default)]
    pub initial_sound: String,
    #[serde(default)]
    pub final_sound: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVowel {
    pub key: String,
    pub position: VowelPosition,
    #[serde(default)]
    pub romanization: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub length: VowelLength,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToneMark {
    pub character: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub effects: ToneEffects,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWeightTones {
    #[serde(default)]
    pub live: Option<Tone>,
    #[serde(default)]
    pub dead: Option<Tone>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDefaultTones {
    #[serde(default)]
    pub low: RawWeightTones,
    #[serde(default)]
    pub mid: RawWeightTones,
    #[serde(default)]
    pub high: RawWeightTones,
}

/// Final-position glyph tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFinals {
    #[serde(default)]
    pub sonorant: Vec<String>,
    #[serde(default)]
    pub obstruent: Vec<String>,
}

/// The serialized knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKnowledgeBase {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default)]
    pub consonants: Vec<RawConsonant>,
    #[serde(default)]
    pub vowels: Vec<RawVowel>,
    #[serde(default)]
    pub tone_marks: Vec<RawToneMark>,
    #[serde(default)]
    pub default_tones: RawDefaultTones,
    #[serde(default)]
    pub finals: RawFinals,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl Default for RawKnowledgeBase {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            consonants: Vec::new(),
            vowels: Vec::new(),
            tone_marks: Vec::new(),
            default_tones: RawDefaultTones::default(),
            finals: RawFinals::default(),
        }
    }
}

/// Serialization formats understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeBaseFormat {
    Json,
    Toml,
    Bincode,
}

impl KnowledgeBaseFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "bin" | "bincode" => Ok(Self::Bincode),
            _ => Err(KnowledgeBaseError::UnsupportedFormat(ext)),
        }
    }
}

impl RawKnowledgeBase {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_bincode_slice(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_bincode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Read a serialized knowledge base; the format follows the extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = KnowledgeBaseFormat::from_path(path)?;
        let io_err = |source| KnowledgeBaseError::Io {
            path: path.to_path_buf(),
            source,
        };
        match format {
            KnowledgeBaseFormat::Json => Self::from_json_str(&fs::read_to_string(path).map_err(io_err)?),
            KnowledgeBaseFormat::Toml => Self::from_toml_str(&fs::read_to_string(path).map_err(io_err)?),
            KnowledgeBaseFormat::Bincode => Self::from_bincode_slice(&fs::read(path).map_err(io_err)?),
        }
    }

    /// Write the compact bincode form.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bincode()?;
        fs::write(path, bytes).map_err(|source| KnowledgeBaseError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn single_glyph(section: &'static str, value: &str) -> Result<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => Err(KnowledgeBaseError::invalid(section, value, "empty glyph")),
        _ => Err(KnowledgeBaseError::invalid(section, value, "expected exactly one glyph")),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl KnowledgeBase {
    /// Validate and normalize a raw knowledge base into the typed model.
    pub fn from_raw(raw: RawKnowledgeBase, mode: ValidationMode) -> Result<Self> {
        let placeholder = single_glyph("placeholder", &raw.placeholder)?;

        let mut consonants = AHashMap::with_capacity(raw.consonants.len());
        let mut consonant_order = Vec::with_capacity(raw.consonants.len());
        for rc in raw.consonants {
            let character = single_glyph("consonant", &rc.character)?;
            if consonants.contains_key(&character) {
                return Err(KnowledgeBaseError::duplicate("consonant", rc.character));
            }
            if rc.class.is_none() {
                match mode {
                    ValidationMode::Strict => {
                        return Err(KnowledgeBaseError::invalid("consonant", rc.character, "missing class"));
                    }
                    ValidationMode::Lenient => {
                        warn!(consonant = %character, "consonant has no class; tone resolution will lack context");
                    }
                }
            }
            consonants.insert(
                character,
                Consonant {
                    character,
                    class: rc.class,
                    initial_sound: rc.initial_sound.trim().to_string(),
                    final_sound: non_empty(rc.final_sound),
                    name: rc.name.trim().to_string(),
                },
            );
            consonant_order.push(character);
        }

        let mut vowels = Vec::with_capacity(raw.vowels.len());
        let mut vowel_keys = AHashMap::with_capacity(raw.vowels.len());
        for rv in raw.vowels {
            let key = rv.key.trim().to_string();
            let placeholders = key.chars().filter(|&c| c == placeholder).count();
            if key.chars().all(|c| c == placeholder) {
                return Err(KnowledgeBaseError::invalid("vowel", key, "key has no glyph besides the placeholder"));
            }
            if placeholders > 1 {
                return Err(KnowledgeBaseError::invalid("vowel", key, "key has more than one placeholder"));
            }
            if vowel_keys.contains_key(&key) {
                return Err(KnowledgeBaseError::duplicate("vowel", key));
            }
            vowel_keys.insert(key.clone(), vowels.len());
            vowels.push(Vowel::new(
                key,
                placeholder,
                rv.position,
                rv.romanization.trim().to_string(),
                rv.name.trim().to_string(),
                rv.length,
            ));
        }

        let mut literal_vowels = AHashMap::new();
        let mut after_placeholder = AHashMap::new();
        let mut before_placeholder = AHashMap::new();
        let mut constituent_of = AHashMap::new();
        let mut complex = Vec::new();
        for (idx, vowel) in vowels.iter().enumerate() {
            if vowel.is_complex() {
                complex.push(idx);
                for &c in vowel.constituents() {
                    constituent_of.entry(c).or_insert(idx);
                }
                continue;
            }
            if let [glyph] = vowel.constituents() {
                let mut chars = vowel.key.chars();
                let slot = match (chars.next(), chars.next()) {
                    (Some(_), None) => &mut literal_vowels,
                    (Some(first), Some(_)) if first == placeholder => &mut after_placeholder,
                    _ => &mut before_placeholder,
                };
                slot.entry(*glyph).or_insert(idx);
            }
        }

        let mut tone_marks = AHashMap::with_capacity(raw.tone_marks.len());
        let mut tone_mark_order = Vec::with_capacity(raw.tone_marks.len());
        for rt in raw.tone_marks {
            let character = single_glyph("tone mark", &rt.character)?;
            if tone_marks.contains_key(&character) {
                return Err(KnowledgeBaseError::duplicate("tone mark", rt.character));
            }
            if consonants.contains_key(&character)
                || literal_vowels.contains_key(&character)
                || after_placeholder.contains_key(&character)
                || before_placeholder.contains_key(&character)
                || constituent_of.contains_key(&character)
            {
                warn!(tone_mark = %character, "tone mark glyph is also registered as a consonant or vowel; tone mark wins");
            }
            tone_marks.insert(
                character,
                ToneMark {
                    character,
                    name: rt.name.trim().to_string(),
                    effects: rt.effects,
                },
            );
            tone_mark_order.push(character);
        }

        let mut default_tones = DefaultToneTable::new();
        for (class, tones) in [
            (ConsonantClass::Low, raw.default_tones.low),
            (ConsonantClass::Mid, raw.default_tones.mid),
            (ConsonantClass::High, raw.default_tones.high),
        ] {
            for (weight, tone) in [(SyllableWeight::Live, tones.live), (SyllableWeight::Dead, tones.dead)] {
                match tone {
                    Some(tone) => default_tones.insert(class, weight, tone),
                    None => debug!(%class, %weight, "no default tone entry; resolver falls back to mid"),
                }
            }
        }

        let sonorant_finals = final_set(&raw.finals.sonorant, &consonants)?;
        let obstruent_finals = final_set(&raw.finals.obstruent, &consonants)?;
        if let Some(both) = sonorant_finals.intersection(&obstruent_finals).next() {
            return Err(KnowledgeBaseError::invalid(
                "final",
                both.to_string(),
                "listed as both sonorant and obstruent",
            ));
        }

        info!(
            consonants = consonants.len(),
            vowels = vowels.len(),
            complex_vowels = complex.len(),
            tone_marks = tone_marks.len(),
            "loaded knowledge base"
        );

        Ok(Self {
            placeholder,
            consonants,
            consonant_order,
            vowels,
            vowel_keys,
            literal_vowels,
            after_placeholder,
            before_placeholder,
            constituent_of,
            complex,
            tone_marks,
            tone_mark_order,
            default_tones,
            sonorant_finals,
            obstruent_finals,
        })
    }

    pub fn from_json_str(content: &str, mode: ValidationMode) -> Result<Self> {
        Self::from_raw(RawKnowledgeBase::from_json_str(content)?, mode)
    }

    pub fn from_toml_str(content: &str, mode: ValidationMode) -> Result<Self> {
        Self::from_raw(RawKnowledgeBase::from_toml_str(content)?, mode)
    }

    pub fn from_bincode_slice(bytes: &[u8], mode: ValidationMode) -> Result<Self> {
        Self::from_raw(RawKnowledgeBase::from_bincode_slice(bytes)?, mode)
    }

    /// Load and validate a knowledge base file (`.json`, `.toml`, `.bin`, `.bincode`).
    pub fn load<P: AsRef<Path>>(path: P, mode: ValidationMode) -> Result<Self> {
        Self::from_raw(RawKnowledgeBase::load(path)?, mode)
    }
}

fn final_set(glyphs: &[String], consonants: &AHashMap<char, Consonant>) -> Result<AHashSet<char>> {
    let mut set = AHashSet::with_capacity(glyphs.len());
    for g in glyphs {
        let c = single_glyph("final", g)?;
        if !consonants.contains_key(&c) {
            warn!(final_glyph = %c, "final table lists a glyph that is not a registered consonant");
        }
        set.insert(c);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_consonant(class: Option<ConsonantClass>) -> RawKnowledgeBase {
        RawKnowledgeBase {
            consonants: vec![RawConsonant {
                character: "ก".into(),
                class,
                initial_sound: "k".into(),
                final_sound: Some("k".into()),
                name: "ko kai".into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn strict_mode_rejects_missing_class() {
        let err = KnowledgeBase::from_raw(raw_with_consonant(None), ValidationMode::Strict).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::InvalidEntry { section: "consonant", .. }));
    }

    #[test]
    fn lenient_mode_keeps_classless_consonant() {
        let kb = KnowledgeBase::from_raw(raw_with_consonant(None), ValidationMode::Lenient).unwrap();
        let c = kb.consonant('ก').unwrap();
        assert_eq!(c.class, None);
    }

    #[test]
    fn blank_final_sound_normalizes_to_none() {
        let mut raw = raw_with_consonant(Some(ConsonantClass::Mid));
        raw.consonants[0].final_sound = Some("  ".into());
        let kb = KnowledgeBase::from_raw(raw, ValidationMode::Strict).unwrap();
        assert_eq!(kb.consonant('ก').unwrap().final_sound, None);
    }

    #[test]
    fn multi_glyph_consonant_is_rejected() {
        let mut raw = raw_with_consonant(Some(ConsonantClass::Mid));
        raw.consonants[0].character = "กข".into();
        assert!(KnowledgeBase::from_raw(raw, ValidationMode::Strict).is_err());
    }

    #[test]
    fn placeholder_only_vowel_is_rejected() {
        let raw = RawKnowledgeBase {
            vowels: vec![RawVowel {
                key: "-".into(),
                position: VowelPosition::After,
                romanization: String::new(),
                name: String::new(),
                length: VowelLength::Short,
            }],
            ..Default::default()
        };
        assert!(KnowledgeBase::from_raw(raw, ValidationMode::Strict).is_err());
    }

    #[test]
    fn overlapping_final_tables_are_rejected() {
        let mut raw = raw_with_consonant(Some(ConsonantClass::Mid));
        raw.finals.sonorant = vec!["ก".into()];
        raw.finals.obstruent = vec!["ก".into()];
        let err = KnowledgeBase::from_raw(raw, ValidationMode::Strict).unwrap_err();
        assert!(err.to_string().contains("both sonorant and obstruent"));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            KnowledgeBaseFormat::from_path(Path::new("kb.JSON")).unwrap(),
            KnowledgeBaseFormat::Json
        );
        assert_eq!(
            KnowledgeBaseFormat::from_path(Path::new("kb.bincode")).unwrap(),
            KnowledgeBaseFormat::Bincode
        );
        assert!(KnowledgeBaseFormat::from_path(Path::new("kb.yaml")).is_err());
    }
}
