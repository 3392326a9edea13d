//! Shared helpers for the knowledge base tools.

use anyhow::{Context, Result};
use libthai_core::{ConsonantClass, KnowledgeBase, RawKnowledgeBase, ValidationMode};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::info;
use tracing::level_filters::LevelFilter;

/// Record counts of a loaded knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub consonants: usize,
    pub low: usize,
    pub mid: usize,
    pub high: usize,
    pub unclassified: usize,
    pub vowels: usize,
    pub complex_vowels: usize,
    pub tone_marks: usize,
    pub default_tones: usize,
}

impl Summary {
    pub fn of(kb: &KnowledgeBase) -> Self {
        let count = |class: ConsonantClass| kb.consonants().filter(|c| c.class == Some(class)).count();
        Self {
            consonants: kb.consonant_count(),
            low: count(ConsonantClass::Low),
            mid: count(ConsonantClass::Mid),
            high: count(ConsonantClass::High),
            unclassified: kb.consonants().filter(|c| c.class.is_none()).count(),
            vowels: kb.vowel_count(),
            complex_vowels: kb.complex_vowel_count(),
            tone_marks: kb.tone_mark_count(),
            default_tones: kb.default_tones().len(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "consonants:    {} (low {}, mid {}, high {}, unclassified {})",
            self.consonants, self.low, self.mid, self.high, self.unclassified
        )?;
        writeln!(f, "vowels:        {} ({} complex)", self.vowels, self.complex_vowels)?;
        writeln!(f, "tone marks:    {}", self.tone_marks)?;
        write!(f, "default tones: {}/6", self.default_tones)
    }
}

/// Load and validate a knowledge base, keeping the raw form for re-encoding.
pub fn load_validated(path: &Path, mode: ValidationMode) -> Result<(RawKnowledgeBase, KnowledgeBase)> {
    let raw = RawKnowledgeBase::load(path).with_context(|| format!("reading {}", path.display()))?;
    let kb = KnowledgeBase::from_raw(raw.clone(), mode).with_context(|| format!("validating {}", path.display()))?;
    Ok((raw, kb))
}

/// Validate `input` and write it to `out` as bincode.
pub fn convert(input: &Path, out: &Path, mode: ValidationMode) -> Result<Summary> {
    let (raw, kb) = load_validated(input, mode)?;
    raw.save_bincode(out).with_context(|| format!("writing {}", out.display()))?;
    info!(input = %input.display(), out = %out.display(), "knowledge base converted");
    Ok(Summary::of(&kb))
}

pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
