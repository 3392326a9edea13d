//! Tests for knowledge-base loading and lookups
//!
//! Covers:
//! - JSON, TOML and bincode sources (strings and files)
//! - the ordered four-way vowel lookup
//! - duplicate and malformed record rejection
//! - Config-driven loading

use libthai_core::{
    Config, ConsonantClass, KnowledgeBase, KnowledgeBaseError, RawKnowledgeBase, SyllableWeight,
    Tone, ToneEffect, ValidationMode, VowelLength,
};

const FIXTURE_JSON: &str = r#"{
  "placeholder": "-",
  "consonants": [
    { "character": "ก", "class": "mid", "initial_sound": "k", "final_sound": "k", "name": "ko kai" },
    { "character": "ม", "class": "low", "initial_sound": "m", "final_sound": "m", "name": "mo ma" },
    { "character": "ย", "class": "low", "initial_sound": "y", "final_sound": "i", "name": "yo yak" }
  ],
  "vowels": [
    { "key": "า", "position": "after", "romanization": "aa-literal", "name": "literal aa", "length": "long" },
    { "key": "-า", "position": "after", "romanization": "aa", "name": "sara aa", "length": "long" },
    { "key": "-ุ", "position": "below", "romanization": "u", "name": "sara u" },
    { "key": "แ-", "position": "before", "romanization": "ae", "name": "sara ae", "length": "long" },
    { "key": "เ-ีย", "position": "surrounding", "romanization": "ia", "name": "sara ia", "length": "long" },
    { "key": "เ-ือ", "position": "surrounding", "romanization": "uea", "name": "sara uea", "length": "long" }
  ],
  "tone_marks": [
    { "character": "่", "name": "mai ek", "effects": {
        "low": { "by_weight": { "live": "falling", "dead": "high" } },
        "mid": { "fixed": "low" },
        "high": { "fixed": "low" } } }
  ],
  "default_tones": {
    "mid": { "live": "mid", "dead": "low" },
    "high": { "live": "rising", "dead": "low" }
  },
  "finals": { "sonorant": ["ม", "ย"], "obstruent": ["ก"] }
}"#;

const FIXTURE_TOML: &str = r#"
placeholder = "-"

[[consonants]]
character = "ก"
class = "mid"
initial_sound = "k"
final_sound = "k"
name = "ko kai"

[[vowels]]
key = "-ะ"
position = "after"
romanization = "a"
name = "sara a"

[[tone_marks]]
character = "้"
name = "mai tho"
effects.mid = { fixed = "falling" }
effects.low = { fixed = "high" }

[default_tones]
mid = { live = "mid", dead = "low" }

[finals]
obstruent = ["ก"]
"#;

fn fixture() -> KnowledgeBase {
    KnowledgeBase::from_json_str(FIXTURE_JSON, ValidationMode::Strict).unwrap()
}

#[test]
fn literal_vowel_key_wins_over_placeholder_forms() {
    let kb = fixture();
    assert_eq!(kb.vowel('า').unwrap().romanization, "aa-literal");
}

#[test]
fn placeholder_before_and_after_probes() {
    let kb = fixture();
    assert_eq!(kb.vowel('ุ').unwrap().key, "-ุ");
    assert_eq!(kb.vowel('แ').unwrap().key, "แ-");
}

#[test]
fn complex_membership_is_the_last_probe() {
    let kb = fixture();
    // Only reachable through complex patterns; first pattern in order wins.
    assert_eq!(kb.vowel('เ').unwrap().key, "เ-ีย");
    assert_eq!(kb.vowel('ื').unwrap().key, "เ-ือ");
    assert!(kb.vowel('x').is_none());
}

#[test]
fn complex_patterns_keep_declaration_order() {
    let kb = fixture();
    let keys: Vec<&str> = kb.complex_vowel_patterns().map(|v| v.key.as_str()).collect();
    assert_eq!(keys, ["เ-ีย", "เ-ือ"]);
}

#[test]
fn missing_default_entries_stay_absent() {
    let kb = fixture();
    assert_eq!(kb.default_tone(ConsonantClass::Mid, SyllableWeight::Dead), Some(Tone::Low));
    assert_eq!(kb.default_tone(ConsonantClass::Low, SyllableWeight::Live), None);
}

#[test]
fn unset_vowel_length_defaults_to_short() {
    let kb = fixture();
    assert_eq!(kb.vowel_by_key("-ุ").unwrap().length, VowelLength::Short);
}

#[test]
fn toml_source_loads() {
    let kb = KnowledgeBase::from_toml_str(FIXTURE_TOML, ValidationMode::Strict).unwrap();
    assert_eq!(kb.consonant('ก').unwrap().class, Some(ConsonantClass::Mid));
    let mai_tho = kb.tone_mark('้').unwrap();
    assert_eq!(mai_tho.effect(ConsonantClass::Mid), Some(ToneEffect::Fixed(Tone::Falling)));
    assert_eq!(mai_tho.effect(ConsonantClass::High), None);
}

#[test]
fn duplicate_consonant_is_rejected() {
    let mut raw = RawKnowledgeBase::from_json_str(FIXTURE_JSON).unwrap();
    let dup = raw.consonants[0].clone();
    raw.consonants.push(dup);
    let err = KnowledgeBase::from_raw(raw, ValidationMode::Lenient).unwrap_err();
    assert!(matches!(err, KnowledgeBaseError::Duplicate { section: "consonant", .. }));
}

#[test]
fn duplicate_vowel_key_is_rejected() {
    let mut raw = RawKnowledgeBase::from_json_str(FIXTURE_JSON).unwrap();
    let dup = raw.vowels[1].clone();
    raw.vowels.push(dup);
    assert!(KnowledgeBase::from_raw(raw, ValidationMode::Strict).is_err());
}

#[test]
fn unknown_class_is_a_parse_error() {
    let bad = FIXTURE_JSON.replace(r#""class": "mid""#, r#""class": "upper""#);
    let err = KnowledgeBase::from_json_str(&bad, ValidationMode::Lenient).unwrap_err();
    assert!(matches!(err, KnowledgeBaseError::Json(_)));
}

#[test]
fn files_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("kb.json");
    std::fs::write(&json_path, FIXTURE_JSON).unwrap();
    let from_json = KnowledgeBase::load(&json_path, ValidationMode::Strict).unwrap();

    let bin_path = dir.path().join("kb.bincode");
    RawKnowledgeBase::load(&json_path).unwrap().save_bincode(&bin_path).unwrap();
    let from_bin = KnowledgeBase::load(&bin_path, ValidationMode::Strict).unwrap();

    assert_eq!(from_json.consonant_count(), from_bin.consonant_count());
    assert_eq!(from_json.vowel('แ'), from_bin.vowel('แ'));

    let yaml_path = dir.path().join("kb.yaml");
    std::fs::write(&yaml_path, "consonants: []").unwrap();
    assert!(matches!(
        KnowledgeBase::load(&yaml_path, ValidationMode::Strict),
        Err(KnowledgeBaseError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = KnowledgeBase::load("/nonexistent/kb.json", ValidationMode::Strict).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/kb.json"));
}

#[test]
fn config_selects_knowledge_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.toml");
    std::fs::write(&path, FIXTURE_TOML).unwrap();

    let mut cfg = Config::default();
    assert_eq!(cfg.load_knowledge_base().unwrap().consonant_count(), 44);

    cfg.set_knowledge_base(&path);
    assert_eq!(cfg.load_knowledge_base().unwrap().consonant_count(), 1);
}
