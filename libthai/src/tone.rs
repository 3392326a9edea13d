//! Tone resolution.
//!
//! With a tone mark, the mark's effect table decides from the consonant
//! class; only weight-split entries (low class with mai ek) also look at the
//! syllable weight. Without a mark, the default table decides from class and
//! weight. Missing entries resolve to mid, and so does a syllable without
//! consonant context. The result always names the rule that fired.

use libthai_core::{ConsonantClass, KnowledgeBase, SyllableWeight, Tone, ToneMark};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::syllable::SyllableStructure;

/// Which table entry produced a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ToneRule {
    /// Tone mark entry that depends on class only.
    MarkByClass { mark: char, class: ConsonantClass },
    /// Tone mark entry split by syllable weight.
    MarkByClassAndWeight {
        mark: char,
        class: ConsonantClass,
        weight: SyllableWeight,
    },
    /// The tone mark has no entry for this class.
    MarkWithoutEntry { mark: char, class: ConsonantClass },
    /// Unmarked syllable, default table entry.
    DefaultTable { class: ConsonantClass, weight: SyllableWeight },
    /// Unmarked syllable with no default table entry.
    MissingDefaultEntry { class: ConsonantClass, weight: SyllableWeight },
    /// No consonant class to resolve from.
    NoConsonantContext,
}

impl fmt::Display for ToneRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneRule::MarkByClass { mark, class } => write!(f, "{class} class + tone mark {mark}"),
            ToneRule::MarkByClassAndWeight { mark, class, weight } => {
                write!(f, "{class} class + tone mark {mark} + {weight} syllable")
            }
            ToneRule::MarkWithoutEntry { mark, class } => {
                write!(f, "tone mark {mark} has no rule for {class} class; defaulting to mid")
            }
            ToneRule::DefaultTable { class, weight } => write!(f, "{class} class + {weight} syllable"),
            ToneRule::MissingDefaultEntry { class, weight } => {
                write!(f, "no default rule for {class} class + {weight} syllable; defaulting to mid")
            }
            ToneRule::NoConsonantContext => f.write_str("no consonant context; defaulting to mid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneResult {
    pub tone: Tone,
    pub rule: ToneRule,
}

impl ToneResult {
    fn mid(rule: ToneRule) -> Self {
        Self { tone: Tone::Mid, rule }
    }
}

/// Resolve the tone from class, optional tone mark and syllable weight.
pub fn resolve_tone(
    kb: &KnowledgeBase,
    class: Option<ConsonantClass>,
    mark: Option<&ToneMark>,
    weight: SyllableWeight,
) -> ToneResult {
    let Some(class) = class else {
        return ToneResult::mid(ToneRule::NoConsonantContext);
    };

    match mark {
        Some(mark) => match mark.effect(class) {
            Some(effect) if effect.depends_on_weight() => ToneResult {
                tone: effect.tone(weight),
                rule: ToneRule::MarkByClassAndWeight {
                    mark: mark.character,
                    class,
                    weight,
                },
            },
            Some(effect) => ToneResult {
                tone: effect.tone(weight),
                rule: ToneRule::MarkByClass {
                    mark: mark.character,
                    class,
                },
            },
            None => ToneResult::mid(ToneRule::MarkWithoutEntry {
                mark: mark.character,
                class,
            }),
        },
        None => match kb.default_tone(class, weight) {
            Some(tone) => ToneResult {
                tone,
                rule: ToneRule::DefaultTable { class, weight },
            },
            None => ToneResult::mid(ToneRule::MissingDefaultEntry { class, weight }),
        },
    }
}

/// Resolve the tone of an analyzed syllable, using its first tone mark.
pub fn resolve_syllable_tone(kb: &KnowledgeBase, syllable: &SyllableStructure) -> ToneResult {
    let mark = syllable.tone_mark().and_then(|c| kb.tone_mark(c));
    resolve_tone(kb, syllable.consonant_class, mark, syllable.syllable_weight)
}
