//! libthai-core
//!
//! Knowledge base, loaders and configuration shared by the libthai analysis
//! engine and its tools.
//!
//! The knowledge base is loaded once (from JSON, TOML or bincode, or from the
//! embedded standard data), validated into typed records and then treated as
//! frozen. Analysis code never sees the serialized form.
//!
//! Public API:
//! - `KnowledgeBase` - frozen consonant/vowel/tone-mark store with rule tables
//! - `RawKnowledgeBase` - serialized schema, used by loaders and tools
//! - `ValidationMode` - strict or lenient handling of incomplete records
//! - `KnowledgeBaseError` - loading failures
//! - `Config` - configuration and feature flags
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod error;
pub use error::{KnowledgeBaseError, Result};

pub mod knowledge;
pub use knowledge::{
    Consonant, ConsonantClass, DefaultToneTable, FinalSoundType, KnowledgeBase, SyllableWeight,
    Tone, ToneEffect, ToneEffects, ToneMark, Vowel, VowelLength, VowelPosition,
};

pub mod schema;
pub use schema::{KnowledgeBaseFormat, RawKnowledgeBase, ValidationMode};

pub mod standard;

/// Engine configuration.
///
/// Loaded from TOML; every field has a default so partial files work.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Knowledge base file (`.json`, `.toml`, `.bin`, `.bincode`).
    /// `None` selects the embedded standard knowledge base.
    pub knowledge_base: Option<PathBuf>,

    /// Reject incomplete records instead of degrading them.
    pub strict_validation: bool,

    /// NFC-normalize and trim input text before analysis.
    pub normalize_input: bool,

    /// Maximum number of memoized syllable analyses (0 disables the cache).
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_base: None,
            strict_validation: true,
            normalize_input: true,
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validation_mode(&self) -> ValidationMode {
        if self.strict_validation {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }

    /// Load the configured knowledge base, or the embedded one when unset.
    pub fn load_knowledge_base(&self) -> Result<KnowledgeBase> {
        match &self.knowledge_base {
            Some(path) => KnowledgeBase::load(path, self.validation_mode()),
            None => KnowledgeBase::standard(),
        }
    }

    pub fn set_knowledge_base<P: Into<PathBuf>>(&mut self, path: P) {
        self.knowledge_base = Some(path.into());
    }

    pub fn set_strict_validation(&mut self, strict: bool) {
        self.strict_validation = strict;
    }

    pub fn set_normalize_input(&mut self, enabled: bool) {
        self.normalize_input = enabled;
    }

    pub fn set_max_cache_size(&mut self, size: usize) {
        self.max_cache_size = size;
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    /// Split text into glyphs (Unicode scalar values).
    pub fn glyphs(s: &str) -> Vec<char> {
        s.chars().collect()
    }
}
