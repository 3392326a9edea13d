//! # libthai
//!
//! Thai script analysis built on libthai-core: glyph classification,
//! discontinuous vowel detection, syllable structure and tone resolution.
//!
//! All analysis is pure and synchronous over a frozen `KnowledgeBase`; the
//! same input always yields the same output. `Engine` bundles a knowledge
//! base with a `Config` and adds an optional memo for full syllable reports.
//!
//! ```
//! use libthai::{Engine, Tone};
//!
//! let engine = Engine::standard();
//! let report = engine.analyze("ไม้");
//! assert_eq!(report.tone.tone, Tone::High);
//! ```

pub mod classifier;
pub mod complex_vowel;
pub mod engine;
pub mod syllable;
pub mod tone;

pub use libthai_core::{
    Config, Consonant, ConsonantClass, FinalSoundType, KnowledgeBase, SyllableWeight, Tone, ToneMark,
    ValidationMode, Vowel, VowelLength,
};

pub use classifier::{classify, classify_detailed, classify_text, CharacterKind, Classified};
pub use complex_vowel::{complex_vowel_glyphs, detect_complex_vowel, ComplexVowelMatch};
pub use engine::{Engine, GlyphReport, SyllableReport};
pub use syllable::{analyze_glyphs, analyze_syllable, SyllableStructure};
pub use tone::{resolve_syllable_tone, resolve_tone, ToneResult, ToneRule};
